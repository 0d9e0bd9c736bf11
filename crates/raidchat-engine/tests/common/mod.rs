use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;
use raidchat_core::{
    init_conversation, CommandIntent, CommandType, Conversation, NewRaidItem, RaidItem,
    RaidItemUpdate, RaidPriority, RaidStatus, RaidType, SequencerPolicy,
};
use raidchat_engine::{ApiError, ApiResponse, RaidApi};

pub const PROJECT: &str = "APOLLO";

mock! {
    pub Api {}

    #[async_trait]
    impl RaidApi for Api {
        async fn create_raid_item(
            &self,
            project_key: &str,
            payload: NewRaidItem,
        ) -> Result<ApiResponse<RaidItem>, ApiError>;

        async fn update_raid_item(
            &self,
            project_key: &str,
            raid_id: &str,
            updates: RaidItemUpdate,
        ) -> Result<ApiResponse<RaidItem>, ApiError>;

        async fn list_raid_items(
            &self,
            project_key: &str,
        ) -> Result<ApiResponse<Vec<RaidItem>>, ApiError>;
    }
}

/// A mock that fails the test on any backend call
#[allow(dead_code)]
pub fn untouched_api() -> MockApi {
    let mut api = MockApi::new();
    api.expect_create_raid_item().never();
    api.expect_update_raid_item().never();
    api.expect_list_raid_items().never();
    api
}

#[allow(dead_code)]
pub fn conversation(intent: CommandIntent) -> Conversation {
    init_conversation(&intent, PROJECT, &SequencerPolicy::default())
        .expect("command should open a conversation")
}

/// Create conversation with every step answered
#[allow(dead_code)]
pub fn completed_create(answers: &[&str]) -> Conversation {
    let mut conv = conversation(CommandIntent::new(CommandType::CreateRaid, "create a risk"));
    for answer in answers {
        conv.answer_current_step(answer)
            .unwrap_or_else(|e| panic!("answer {:?} rejected: {}", answer, e));
    }
    assert!(conv.is_complete(), "not enough answers");
    conv
}

#[allow(dead_code)]
pub fn sample_item(id: &str) -> RaidItem {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    RaidItem {
        id: id.to_string(),
        project_key: PROJECT.to_string(),
        raid_type: RaidType::Risk,
        title: "T".to_string(),
        description: "D".to_string(),
        status: RaidStatus::Open,
        priority: RaidPriority::Medium,
        owner: None,
        created_at: at,
        updated_at: at,
    }
}
