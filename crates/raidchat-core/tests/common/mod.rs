use chrono::{TimeZone, Utc};
use raidchat_core::{
    init_conversation, CommandIntent, CommandType, Conversation, RaidItem, RaidPriority,
    RaidStatus, RaidType, SequencerPolicy,
};

pub const PROJECT: &str = "APOLLO";

/// Start a conversation with the default policy
#[allow(dead_code)]
pub fn start(command: CommandType) -> Conversation {
    let intent = CommandIntent::new(command, "test");
    init_conversation(&intent, PROJECT, &SequencerPolicy::default())
        .expect("command should open a conversation")
}

/// Feed answers in order, panicking on the first rejection
#[allow(dead_code)]
pub fn answer_all(conversation: &mut Conversation, answers: &[&str]) {
    for answer in answers {
        conversation
            .answer_current_step(answer)
            .unwrap_or_else(|e| panic!("answer {:?} rejected: {}", answer, e));
    }
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
