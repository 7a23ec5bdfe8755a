use crate::common::{
    create_test_interaction, create_test_post, create_test_promotion, init, seller,
    GatedInteractionSource, MockInteractionSource, MockKeyValueStore, MockPostDisplayLookup,
    MockPromotionSource, TestFeed,
};
use anyhow::Result;
use marketfeed_lib::{
    domain::{entities::PromotionStatus, DomainError},
    infrastructure::{FeedConfig, InMemoryEventSource, InMemoryKeyValueStore},
    FetchOutcome, NotificationFeedUseCases, PostId,
};
use mockall::predicate::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn test_superseded_fetch_is_dropped() -> Result<()> {
    init();
    let source = Arc::new(InMemoryEventSource::new());
    source.push_interaction(&seller(), create_test_interaction("e1", "p1", 10));
    let gated = Arc::new(GatedInteractionSource::new(source.clone()));

    let feed = Arc::new(NotificationFeedUseCases::from_sources(
        seller(),
        gated.clone(),
        source.clone(),
        source.clone(),
        Arc::new(InMemoryKeyValueStore::new()),
        &FeedConfig::default(),
    )?);

    let slow = tokio::spawn({
        let feed = feed.clone();
        async move { feed.refresh().await }
    });
    gated.entered.notified().await;

    source.push_interaction(&seller(), create_test_interaction("e2", "p2", 20));
    let fresh = feed.refresh().await;
    assert_eq!(
        fresh,
        FetchOutcome::Committed {
            generation: 2,
            items: 2,
            degraded: false
        }
    );

    gated.release.notify_one();
    let stale = slow.await?;
    assert_eq!(stale, FetchOutcome::Stale { generation: 1 });
    assert_eq!(feed.items().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_failed_promotion_source_degrades() -> Result<()> {
    init();
    let t = TestFeed::new(&FeedConfig::default());
    t.push_interaction(create_test_interaction("e1", "p1", 10));
    t.push_promotion(create_test_promotion("p2", PromotionStatus::Success, 20, None));
    t.source.set_promotions_failing(true);

    let outcome = t.feed.refresh().await;

    assert_eq!(
        outcome,
        FetchOutcome::Committed {
            generation: 1,
            items: 1,
            degraded: true
        }
    );
    assert_eq!(t.feed.items()[0].post_id, PostId::from("p1"));
    Ok(())
}

#[tokio::test]
async fn test_failed_interaction_source_degrades() -> Result<()> {
    init();
    let t = TestFeed::new(&FeedConfig::default());
    t.push_interaction(create_test_interaction("e1", "p1", 10));
    t.push_promotion(create_test_promotion("p1", PromotionStatus::Pending, 20, None));
    t.source.insert_post("p1".into(), create_test_post("Bike"));
    t.source.set_interactions_failing(true);

    t.feed.refresh().await;

    // With the interaction side missing the post falls back to a promotion-only row.
    let items = t.feed.items();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_promotion_only());
    assert_eq!(items[0].display.caption, "Bike");
    Ok(())
}

#[tokio::test]
async fn test_both_sources_failing_commits_empty_feed() -> Result<()> {
    init();
    let t = TestFeed::new(&FeedConfig::default());
    t.push_interaction(create_test_interaction("e1", "p1", 10));
    t.feed.refresh().await;
    assert_eq!(t.feed.items().len(), 1);

    t.source.set_interactions_failing(true);
    t.source.set_promotions_failing(true);
    let outcome = t.feed.refresh().await;

    assert!(outcome.is_committed());
    assert!(t.feed.items().is_empty());
    assert_eq!(t.feed.global_badge(), 0);
    Ok(())
}

#[tokio::test]
async fn test_transient_source_error_is_retried() -> Result<()> {
    init();
    let mut interactions = MockInteractionSource::new();
    let mut seq = mockall::Sequence::new();
    interactions
        .expect_fetch_interactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(DomainError::SourceError("connection reset".to_string())));
    interactions
        .expect_fetch_interactions()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![create_test_interaction("e1", "p1", 10)]));

    let mut promotions = MockPromotionSource::new();
    promotions
        .expect_fetch_promotions()
        .times(1)
        .returning(|_| Ok(vec![]));

    let mut lookup = MockPostDisplayLookup::new();
    lookup.expect_lookup_post_display_fields().never();

    let feed = NotificationFeedUseCases::from_sources(
        seller(),
        Arc::new(interactions),
        Arc::new(promotions),
        Arc::new(lookup),
        Arc::new(InMemoryKeyValueStore::new()),
        &FeedConfig::default(),
    )?;

    let outcome = feed.refresh().await;
    assert_eq!(
        outcome,
        FetchOutcome::Committed {
            generation: 1,
            items: 1,
            degraded: false
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_display_lookup_is_cached_across_cycles() -> Result<()> {
    init();
    let mut interactions = MockInteractionSource::new();
    interactions
        .expect_fetch_interactions()
        .returning(|_| Ok(vec![]));

    let mut promotions = MockPromotionSource::new();
    promotions.expect_fetch_promotions().returning(|_| {
        Ok(vec![create_test_promotion(
            "p7",
            PromotionStatus::Success,
            10,
            None,
        )])
    });

    let mut lookup = MockPostDisplayLookup::new();
    lookup
        .expect_lookup_post_display_fields()
        .with(eq(PostId::from("p7")))
        .times(1)
        .returning(|_| Ok(Some(create_test_post("Lamp"))));

    let feed = NotificationFeedUseCases::from_sources(
        seller(),
        Arc::new(interactions),
        Arc::new(promotions),
        Arc::new(lookup),
        Arc::new(InMemoryKeyValueStore::new()),
        &FeedConfig::default(),
    )?;

    feed.refresh().await;
    feed.refresh().await;

    assert_eq!(feed.items()[0].display.caption, "Lamp");
    Ok(())
}

#[tokio::test]
async fn test_unavailable_store_does_not_break_feed() -> Result<()> {
    init();
    let mut store = MockKeyValueStore::new();
    store
        .expect_get()
        .returning(|_| Err(DomainError::PersistenceError("storage disabled".to_string())));
    store
        .expect_set()
        .returning(|_, _| Err(DomainError::PersistenceError("storage disabled".to_string())));

    let source = Arc::new(InMemoryEventSource::new());
    source.push_interaction(&seller(), create_test_interaction("e1", "p1", 10));
    let feed = NotificationFeedUseCases::from_sources(
        seller(),
        source.clone(),
        source.clone(),
        source,
        Arc::new(store),
        &FeedConfig::default(),
    )?;

    feed.refresh().await;
    assert_eq!(feed.global_badge(), 1);

    // The local badge still clears for this session.
    assert!(feed.mark_post_seen(&PostId::from("p1")));
    assert_eq!(feed.item_badge(&PostId::from("p1")), Some(0));

    // Nothing was persisted, so the next cycle shows the post as new again.
    feed.refresh().await;
    assert_eq!(feed.item_badge(&PostId::from("p1")), Some(1));
    Ok(())
}
