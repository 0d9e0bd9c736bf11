mod common;

use common::sample_item;
use raidchat_core::render::{
    format_api_error, format_raid_created, format_raid_list, format_raid_updated,
    format_unsupported,
};
use raidchat_core::{CommandType, RaidPriority, RaidStatus, RaidType};

#[test]
fn test_created_message_field_order() {
    let item = sample_item("raid-1");
    let text = format_raid_created(&item);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "✅ **Risk created** (raid-1)",
            "**Title:** T",
            "**Description:** D",
            "**Priority:** medium",
            "**Status:** open",
        ]
    );
}

#[test]
fn test_created_message_includes_owner_when_present() {
    let mut item = sample_item("raid-2");
    item.owner = Some("dana".to_string());
    item.raid_type = RaidType::Dependency;

    let text = format_raid_created(&item);
    assert!(text.starts_with("✅ **Dependency created** (raid-2)"));
    assert!(text.ends_with("**Owner:** dana"));
}

#[test]
fn test_blank_owner_is_skipped() {
    let mut item = sample_item("raid-3");
    item.owner = Some("  ".to_string());

    assert!(!format_raid_created(&item).contains("Owner"));
}

#[test]
fn test_updated_message_field_order() {
    let mut item = sample_item("raid-7");
    item.status = RaidStatus::InProgress;
    item.priority = RaidPriority::Critical;
    item.owner = Some("lee".to_string());

    let lines: Vec<String> = format_raid_updated(&item)
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "✅ **Risk updated** (raid-7)",
            "**Title:** T",
            "**Status:** in_progress",
            "**Priority:** critical",
            "**Owner:** lee",
        ]
    );
}

#[test]
fn test_formatting_is_deterministic() {
    let item = sample_item("raid-1");
    assert_eq!(format_raid_created(&item), format_raid_created(&item));
}

#[test]
fn test_api_error_keeps_raw_text() {
    let raw = "409 Conflict: RAID item raid-1 was modified by someone else";
    let text = format_api_error(raw);
    assert!(text.starts_with("❌ "));
    assert!(text.ends_with(raw));
}

#[test]
fn test_list_is_sorted_by_id() {
    let items = vec![sample_item("raid-3"), sample_item("raid-1")];
    let text = format_raid_list("APOLLO", &items);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "**RAID items for APOLLO** (2)");
    assert_eq!(lines[1], "- raid-1 [Risk] T (open, medium)");
    assert_eq!(lines[2], "- raid-3 [Risk] T (open, medium)");
}

#[test]
fn test_list_orders_numeric_suffixes_naturally() {
    let items: Vec<_> = (1..=11)
        .rev()
        .map(|n| sample_item(&format!("raid-{}", n)))
        .collect();

    let text = format_raid_list("APOLLO", &items);

    let ids: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|line| line.strip_prefix("- ")?.split(' ').next())
        .collect();
    let expected: Vec<String> = (1..=11).map(|n| format!("raid-{}", n)).collect();
    assert_eq!(ids, expected);
    assert_eq!(ids[1], "raid-2");
    assert_eq!(ids[10], "raid-11");
}

#[test]
fn test_list_groups_ids_by_prefix() {
    let items = vec![
        sample_item("risk-2"),
        sample_item("raid-10"),
        sample_item("raid-9"),
        sample_item("legacy"),
    ];

    let text = format_raid_list("APOLLO", &items);

    let ids: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|line| line.strip_prefix("- ")?.split(' ').next())
        .collect();
    assert_eq!(ids, vec!["legacy", "raid-9", "raid-10", "risk-2"]);
}

#[test]
fn test_empty_list() {
    assert_eq!(
        format_raid_list("APOLLO", &[]),
        "No RAID items found for project APOLLO."
    );
}

#[test]
fn test_unsupported_names_the_command() {
    assert_eq!(
        format_unsupported(CommandType::TransitionWorkflow),
        "⚠️ Workflow transition is not yet supported."
    );
}
