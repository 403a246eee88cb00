//! End-to-end suppression behavior
//!
//! Drives the suppressor through a miniature host: reload against live and
//! dormant extensions, restoration, lifecycle-driven re-suppression, and the
//! failure modes that must degrade to per-rule skips.

mod common;

use common::{owned_at, HostFixture};
use listenercontrol::host::api::EventPriority;

const SESSION_RULE: &str = r#"
[deactivated-events.normal]
"ExampleExt" = ["SessionStartEvent"]
"#;

#[tokio::test]
async fn test_reload_removes_matching_listener() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 1);

    host.suppressor.load_config().await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
    let removed = host.suppressor.removed_registrations().await;
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].listener.owner(), "ExampleExt");
    assert_eq!(removed[0].priority, EventPriority::Normal);
    assert_eq!(removed[0].event_name, "runtime::event::SessionStartEvent");
    assert!(removed[0].handler_list.same_table(&sessions));
}

#[tokio::test]
async fn test_reload_is_idempotent() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;

    host.suppressor.load_config().await;
    let removed_once = host.suppressor.removed_registrations().await;
    let armed_once = host.suppressor.active_suppressions_for("ExampleExt").await;

    host.suppressor.load_config().await;
    let removed_twice = host.suppressor.removed_registrations().await;
    let armed_twice = host.suppressor.active_suppressions_for("ExampleExt").await;

    assert_eq!(removed_once.len(), removed_twice.len());
    assert_eq!(removed_once[0].listener.id(), removed_twice[0].listener.id());
    assert_eq!(armed_once.len(), armed_twice.len());
    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
}

#[tokio::test]
async fn test_dropping_rule_restores_listener() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    host.suppressor.load_config().await;
    assert_eq!(sessions.len().await, 0);

    host.write_config("[deactivated-events]\n");
    host.suppressor.load_config().await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 1);
    assert_eq!(host.suppressor.removed_count().await, 0);
    assert!(host.suppressor.suppressed_extensions().await.is_empty());
}

#[tokio::test]
async fn test_round_trip_resuppression_after_disable_enable() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    host.suppressor.load_config().await;
    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);

    // The extension goes away and comes back, re-registering its listener
    // during its enable phase
    host.disable_extension("ExampleExt", &[&sessions]).await;
    assert_eq!(host.suppressor.removed_count().await, 0);

    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
    assert_eq!(host.suppressor.removed_count().await, 1);
}

#[tokio::test]
async fn test_no_cross_contamination_between_extensions() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.load_extension("BystanderExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    host.enable_extension("BystanderExt", &[(&sessions, EventPriority::Normal)])
        .await;

    host.suppressor.load_config().await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
    assert_eq!(owned_at(&sessions, "BystanderExt", EventPriority::Normal).await, 1);

    // Restoration must not touch the bystander either
    host.write_config("[deactivated-events]\n");
    host.suppressor.load_config().await;
    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 1);
    assert_eq!(owned_at(&sessions, "BystanderExt", EventPriority::Normal).await, 1);
}

#[tokio::test]
async fn test_disable_discards_without_restore() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    host.suppressor.load_config().await;
    assert_eq!(host.suppressor.removed_count().await, 1);

    host.disable_extension("ExampleExt", &[&sessions]).await;

    // Dropped from tracking, nothing put back into the table
    assert_eq!(host.suppressor.removed_count().await, 0);
    assert_eq!(sessions.len().await, 0);

    // The extension's armed rules survive a disable; a later reload rebuilds
    // them and the restore sweep has nothing stale to trip over
    assert_eq!(
        host.suppressor.suppressed_extensions().await,
        vec!["ExampleExt"]
    );
    host.suppressor.load_config().await;
    assert_eq!(
        host.suppressor.suppressed_extensions().await,
        vec!["ExampleExt"]
    );
    assert_eq!(host.suppressor.removed_count().await, 0);
}

#[tokio::test]
async fn test_unresolvable_rule_does_not_block_siblings() {
    let host = HostFixture::new(
        r#"
        [deactivated-events.normal]
        "BrokenExt" = ["NoSuchEvent"]
        "ValidExt" = ["SessionStartEvent"]
        "#,
    )
    .await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ValidExt").await;
    host.enable_extension("ValidExt", &[(&sessions, EventPriority::Normal)])
        .await;

    host.suppressor.load_config().await;

    assert_eq!(owned_at(&sessions, "ValidExt", EventPriority::Normal).await, 0);
    assert_eq!(host.suppressor.removed_count().await, 1);
    // Only the valid rule is armed
    assert_eq!(host.suppressor.suppressed_extensions().await, vec!["ValidExt"]);
}

#[tokio::test]
async fn test_priority_tiers_do_not_interfere() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension(
        "ExampleExt",
        &[
            (&sessions, EventPriority::Normal),
            (&sessions, EventPriority::Monitor),
        ],
    )
    .await;

    host.suppressor.load_config().await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Monitor).await, 1);
}

#[tokio::test]
async fn test_sealed_table_skips_restoration() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;
    host.suppressor.load_config().await;
    assert_eq!(host.suppressor.removed_count().await, 1);

    // The host finalizes the table; the next reload's restore sweep must
    // skip this entry without failing the reload
    sessions.seal().await;
    host.write_config("[deactivated-events]\n");
    host.suppressor.load_config().await;

    assert_eq!(host.suppressor.removed_count().await, 0);
    assert_eq!(sessions.len().await, 0);
    assert!(host.suppressor.suppressed_extensions().await.is_empty());
}

#[tokio::test]
async fn test_rule_for_dormant_extension_arms_on_enable() {
    let host = HostFixture::new(SESSION_RULE).await;
    let sessions = host.register_event("runtime::event::SessionStartEvent").await;

    // Extension loaded but not enabled at reload time
    host.load_extension("ExampleExt").await;
    host.suppressor.load_config().await;
    assert_eq!(host.suppressor.removed_count().await, 0);
    assert_eq!(
        host.suppressor.suppressed_extensions().await,
        vec!["ExampleExt"]
    );

    host.enable_extension("ExampleExt", &[(&sessions, EventPriority::Normal)])
        .await;

    assert_eq!(owned_at(&sessions, "ExampleExt", EventPriority::Normal).await, 0);
    assert_eq!(host.suppressor.removed_count().await, 1);
}

#[tokio::test]
async fn test_literal_event_name_resolution() {
    let host = HostFixture::new(
        r#"
        [deactivated-events.high]
        "ExampleExt" = ["vendor::ChatEvent"]
        "#,
    )
    .await;
    let chat = host.register_event("vendor::ChatEvent").await;

    host.load_extension("ExampleExt").await;
    host.enable_extension("ExampleExt", &[(&chat, EventPriority::High)])
        .await;

    host.suppressor.load_config().await;

    assert_eq!(owned_at(&chat, "ExampleExt", EventPriority::High).await, 0);
    let armed = host.suppressor.active_suppressions_for("ExampleExt").await;
    assert_eq!(armed.len(), 1);
    assert_eq!(armed[0].event_name, "vendor::ChatEvent");
}
