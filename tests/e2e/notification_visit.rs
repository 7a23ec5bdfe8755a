use super::setup::{interaction_row, promotion_row, TestBackend};
use crate::common::init;
use anyhow::Result;
use chrono::{DateTime, Utc};
use marketfeed_lib::{domain::services::RevealState, PostId};
use pretty_assertions::assert_eq;
use serde_json::json;

const SELLER: &str = "seller-42";

fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

#[tokio::test]
async fn test_visit_then_relaunch() -> Result<()> {
    init();
    let backend = TestBackend::start().await?;
    backend
        .serve(
            SELLER,
            json!([
                interaction_row("n3", "p1", "save", "2024-05-01T10:05:00Z", "Ben"),
                interaction_row("n2", "p1", "like", "2024-05-01T10:00:00Z", "Ana"),
                interaction_row("n1", "p2", "like", "2024-05-01T09:00:00Z", "Ana"),
            ]),
            json!([promotion_row("p3", "pending", "2024-05-01T09:30:00Z", None)]),
            &[("p3", json!({ "caption": "Old bike", "images": ["bike.jpg"] }))],
        )
        .await;

    let feed = backend.launch(SELLER)?;
    assert!(feed.refresh().await.is_committed());

    let order: Vec<String> = feed.items().iter().map(|n| n.post_id.to_string()).collect();
    assert_eq!(order, vec!["p1", "p3", "p2"]);
    assert_eq!(feed.item_badge(&PostId::from("p1")), Some(2));
    assert_eq!(feed.global_badge(), 3);

    let bike = &feed.items()[1];
    assert!(bike.sender.is_system());
    assert_eq!(bike.display.caption, "Old bike");

    feed.on_enter_notifications_view();
    feed.refresh().await;
    assert!(feed.on_list_rendered(ts("2024-05-01T11:00:00Z")));
    assert_eq!(feed.visible_count(), 2);
    assert_eq!(feed.on_scroll_near_end(), RevealState::Advancing);
    assert!(!feed.on_animation_frame());
    assert_eq!(feed.visible_count(), 3);

    assert!(feed.mark_post_seen(&PostId::from("p1")));
    feed.on_exit_notifications_view();
    assert_eq!(feed.global_badge(), 0);
    drop(feed);

    backend
        .serve(
            SELLER,
            json!([
                interaction_row("n4", "p2", "save", "2024-05-01T11:30:00Z", "Cy"),
                interaction_row("n3", "p1", "save", "2024-05-01T10:05:00Z", "Ben"),
                interaction_row("n2", "p1", "like", "2024-05-01T10:00:00Z", "Ana"),
                interaction_row("n1", "p2", "like", "2024-05-01T09:00:00Z", "Ana"),
            ]),
            json!([promotion_row(
                "p3",
                "success",
                "2024-05-01T09:30:00Z",
                Some("2024-05-01T11:10:00Z")
            )]),
            &[("p3", json!({ "caption": "Old bike", "images": ["bike.jpg"] }))],
        )
        .await;

    let feed = backend.launch(SELLER)?;
    feed.refresh().await;

    let order: Vec<String> = feed.items().iter().map(|n| n.post_id.to_string()).collect();
    assert_eq!(order, vec!["p2", "p3", "p1"]);
    assert_eq!(feed.item_badge(&PostId::from("p1")), Some(0));
    assert_eq!(feed.item_badge(&PostId::from("p2")), Some(2));
    assert_eq!(feed.item_badge(&PostId::from("p3")), Some(1));
    assert_eq!(feed.global_badge(), 2);

    let sender = feed.items()[0].sender.display_name().to_string();
    assert_eq!(sender, "Cy");
    Ok(())
}

#[tokio::test]
async fn test_other_recipients_state_is_separate() -> Result<()> {
    init();
    let backend = TestBackend::start().await?;
    let rows = json!([interaction_row("n1", "p1", "like", "2024-05-01T10:00:00Z", "Ana")]);
    backend.serve(SELLER, rows.clone(), json!([]), &[]).await;

    let feed = backend.launch(SELLER)?;
    feed.refresh().await;
    feed.mark_all_seen();
    drop(feed);

    backend.serve("seller-7", rows, json!([]), &[]).await;
    let other = backend.launch("seller-7")?;
    other.refresh().await;

    assert_eq!(other.item_badge(&PostId::from("p1")), Some(1));
    Ok(())
}
