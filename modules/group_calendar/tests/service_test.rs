use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use group_calendar::config::GroupCalendarConfig;
use group_calendar::contract::{
    AvailabilityUpdate, CallerCtx, EventPatch, EventWindow, GroupCalendarApi, GroupCalendarError,
    NewEvent, OverlapMode, TimeRange, TimeRangeInput, Weekday,
};
use group_calendar::GroupCalendar;

fn api() -> Arc<dyn GroupCalendarApi> {
    GroupCalendar::default().client()
}

fn alice() -> CallerCtx {
    CallerCtx::new("user_alice", "alice@example.com", "org_1")
}

fn outsider() -> CallerCtx {
    CallerCtx::new("user_eve", "eve@example.com", "org_2")
}

fn new_event(title: &str, start_h: i64, len_h: i64) -> NewEvent {
    let base = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    NewEvent {
        title: title.to_string(),
        start: base + Duration::hours(start_h),
        end: base + Duration::hours(start_h + len_h),
        all_day: false,
    }
}

fn assert_validation(err: GroupCalendarError, needle: &str) {
    match err {
        GroupCalendarError::Validation { message } => {
            assert!(message.contains(needle), "'{message}' should mention '{needle}'")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn init_applies_module_config_to_the_service() {
    let cfg = GroupCalendarConfig {
        overlap_mode: OverlapMode::Legacy,
        reject_inverted_ranges: false,
        max_ranges_per_day: 4,
        max_title_length: 32,
    };
    let service = GroupCalendar::init(&cfg).service();
    let applied = service.config();

    assert_eq!(applied.overlap_mode, OverlapMode::Legacy);
    assert!(!applied.reject_inverted_ranges);
    assert_eq!(applied.max_ranges_per_day, 4);
    assert_eq!(applied.max_title_length, 32);

    let defaults = GroupCalendar::default().service();
    assert_eq!(defaults.config().overlap_mode, OverlapMode::Plateau);
    assert!(defaults.config().reject_inverted_ranges);
}

// --- availability ---

#[tokio::test]
async fn get_availability_is_none_before_first_save() {
    let api = api();
    assert!(api.get_availability(&alice()).await.unwrap().is_none());
}

#[tokio::test]
async fn initialize_creates_full_week_once() {
    let api = api();
    let created = api.initialize_availability(&alice()).await.unwrap();
    for day in Weekday::ALL {
        assert_eq!(created.ranges(day), &[TimeRange::FULL_DAY]);
    }

    let update = AvailabilityUpdate::default()
        .with_day(Weekday::Friday, vec![TimeRangeInput::new("09:00", "12:00")]);
    api.update_availability(&alice(), update).await.unwrap();

    // a second initialize keeps the saved ranges
    let again = api.initialize_availability(&alice()).await.unwrap();
    assert!(again.ranges(Weekday::Monday).is_empty());
    assert_eq!(again.ranges(Weekday::Friday).len(), 1);
    assert_eq!(again.created_at, created.created_at);
}

#[tokio::test]
async fn update_replaces_ranges_and_preserves_created_at() {
    let api = api();
    let first = api
        .update_availability(
            &alice(),
            AvailabilityUpdate::default()
                .with_day(Weekday::Monday, vec![TimeRangeInput::new("09:00", "17:00")]),
        )
        .await
        .unwrap();

    let second = api
        .update_availability(
            &alice(),
            AvailabilityUpdate::default()
                .with_day(Weekday::Tuesday, vec![TimeRangeInput::new("10:00", "11:00")]),
        )
        .await
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert!(second.ranges(Weekday::Monday).is_empty());
    assert_eq!(
        second.ranges(Weekday::Tuesday),
        &[TimeRange::parse("10:00", "11:00").unwrap()]
    );

    let stored = api.get_availability(&alice()).await.unwrap().unwrap();
    assert_eq!(stored, second);
}

#[tokio::test]
async fn one_malformed_range_rejects_the_whole_update() {
    let api = api();
    let update = AvailabilityUpdate::default()
        .with_day(Weekday::Monday, vec![TimeRangeInput::new("09:00", "17:00")])
        .with_day(
            Weekday::Tuesday,
            vec![
                TimeRangeInput::new("08:00", "09:00"),
                TimeRangeInput::new("9:30", "10:00"),
            ],
        );

    let err = api.update_availability(&alice(), update).await.unwrap_err();
    assert_validation(err, "9:30");
    assert!(api.get_availability(&alice()).await.unwrap().is_none());
}

#[tokio::test]
async fn inverted_ranges_are_rejected_by_default() {
    let api = api();
    let update = AvailabilityUpdate::default()
        .with_day(Weekday::Monday, vec![TimeRangeInput::new("17:00", "09:00")]);
    let err = api.update_availability(&alice(), update).await.unwrap_err();
    assert_validation(err, "Inverted range on monday");
}

#[tokio::test]
async fn inverted_ranges_are_stored_but_ignored_when_allowed() {
    let api = GroupCalendar::init(&GroupCalendarConfig {
        reject_inverted_ranges: false,
        ..Default::default()
    })
    .client();

    let update = AvailabilityUpdate::default()
        .with_day(Weekday::Monday, vec![TimeRangeInput::new("17:00", "09:00")]);
    let saved = api.update_availability(&alice(), update).await.unwrap();
    assert!(saved.ranges(Weekday::Monday)[0].is_inverted());

    let overlap = api.calculate_overlap(&alice()).await.unwrap();
    assert_eq!(overlap.user_count, 1);
    assert!(overlap.ranges(Weekday::Monday).is_empty());
}

#[tokio::test]
async fn too_many_ranges_per_day_is_rejected() {
    let api = GroupCalendar::init(&GroupCalendarConfig {
        max_ranges_per_day: 2,
        ..Default::default()
    })
    .client();

    let ranges = vec![TimeRangeInput::new("01:00", "02:00"); 3];
    let update = AvailabilityUpdate::default().with_day(Weekday::Sunday, ranges);
    let err = api.update_availability(&alice(), update).await.unwrap_err();
    assert_validation(err, "Too many ranges on sunday");
}

#[tokio::test]
async fn organization_id_is_required() {
    let api = api();
    let ctx = CallerCtx::new("user_alice", "alice@example.com", "  ");
    let err = api.calculate_overlap(&ctx).await.unwrap_err();
    assert_validation(err, "Organization id is required");
}

#[tokio::test]
async fn group_listing_is_scoped_and_ordered() {
    let api = api();
    for user in ["user_c", "user_a", "user_b"] {
        api.initialize_availability(&CallerCtx::new(user, "x@example.com", "org_1"))
            .await
            .unwrap();
    }
    api.initialize_availability(&outsider()).await.unwrap();

    let users: Vec<_> = api
        .list_group_availability(&alice())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.user_id)
        .collect();
    assert_eq!(users, vec!["user_a", "user_b", "user_c"]);
}

// --- events ---

#[tokio::test]
async fn event_crud_roundtrip() {
    let api = api();
    let created = api
        .create_event(&alice(), new_event("  Standup  ", 9, 1))
        .await
        .unwrap();
    assert_eq!(created.title, "Standup");
    assert_eq!(created.organization_id, "org_1");
    assert_eq!(created.created_by, "user_alice");

    let fetched = api.get_event(&alice(), created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = api
        .update_event(
            &alice(),
            created.id,
            EventPatch {
                title: Some("Daily standup".into()),
                all_day: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Daily standup");
    assert!(updated.all_day);
    assert_eq!(updated.start, created.start);

    api.delete_event(&alice(), created.id).await.unwrap();
    assert_eq!(
        api.get_event(&alice(), created.id).await.unwrap_err(),
        GroupCalendarError::not_found(created.id)
    );
}

#[tokio::test]
async fn list_events_returns_contained_events_in_start_order() {
    let api = api();
    let late = api.create_event(&alice(), new_event("late", 14, 1)).await.unwrap();
    let early = api.create_event(&alice(), new_event("early", 8, 1)).await.unwrap();
    api.create_event(&alice(), new_event("overnight", 20, 8))
        .await
        .unwrap();
    api.create_event(&outsider(), new_event("foreign", 10, 1))
        .await
        .unwrap();

    let base = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    let window = EventWindow {
        start: base,
        end: base + Duration::hours(24),
    };
    let ids: Vec<_> = api
        .list_events(&alice(), window)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![early.id, late.id]);

    let inverted = EventWindow {
        start: window.end,
        end: window.start,
    };
    assert_validation(api.list_events(&alice(), inverted).await.unwrap_err(), "window");
}

#[tokio::test]
async fn event_validation() {
    let api = api();
    assert_validation(
        api.create_event(&alice(), new_event("   ", 9, 1))
            .await
            .unwrap_err(),
        "title cannot be empty",
    );
    assert_validation(
        api.create_event(&alice(), new_event("backwards", 9, -1))
            .await
            .unwrap_err(),
        "ends before it starts",
    );

    let long = "x".repeat(201);
    assert_validation(
        api.create_event(&alice(), new_event(&long, 9, 1))
            .await
            .unwrap_err(),
        "too long",
    );

    let created = api.create_event(&alice(), new_event("ok", 9, 1)).await.unwrap();
    let patch = EventPatch {
        end: Some(created.start - Duration::minutes(1)),
        ..Default::default()
    };
    assert_validation(
        api.update_event(&alice(), created.id, patch).await.unwrap_err(),
        "ends before it starts",
    );
    // failed patch leaves the stored event untouched
    assert_eq!(api.get_event(&alice(), created.id).await.unwrap(), created);
}

#[tokio::test]
async fn events_of_other_organizations_are_not_found() {
    let api = api();
    let created = api.create_event(&alice(), new_event("private", 9, 1)).await.unwrap();

    let not_found = GroupCalendarError::not_found(created.id);
    assert_eq!(api.get_event(&outsider(), created.id).await.unwrap_err(), not_found);
    assert_eq!(
        api.update_event(&outsider(), created.id, EventPatch::default())
            .await
            .unwrap_err(),
        not_found
    );
    assert_eq!(api.delete_event(&outsider(), created.id).await.unwrap_err(), not_found);
    assert!(api.get_event(&alice(), created.id).await.is_ok());

    let unknown = Uuid::new_v4();
    assert_eq!(
        api.delete_event(&alice(), unknown).await.unwrap_err(),
        GroupCalendarError::not_found(unknown)
    );
}
