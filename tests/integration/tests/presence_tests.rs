//! Presence set integration tests against Redis
//!
//! These tests require a running Redis instance. Set REDIS_URL before running:
//!
//! ```bash
//! export REDIS_URL="redis://127.0.0.1:6379/15"
//! cargo test -p integration-tests --test presence_tests
//! ```

use std::sync::Arc;

use integration_tests::{check_test_env, ClockPause, TestPresence, SECOND_MS, TEST_EPOCH_MS};
use presence_common::{DemoConfig, PresenceConfig};
use presence_core::{OrderedStore, PresenceError, ScoreRange, ScoredMember};
use presence_demo::{Scenario, ScenarioConfig};

// ============================================================================
// Store primitives
// ============================================================================

#[tokio::test]
async fn test_store_upsert_and_score() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("upsert").await.expect("Failed to connect");

    t.store.upsert(t.key(), "a", TEST_EPOCH_MS).await.unwrap();
    t.store.upsert(t.key(), "a", TEST_EPOCH_MS + 5).await.unwrap();

    assert_eq!(t.store.cardinality(t.key()).await.unwrap(), 1);
    assert_eq!(
        t.store.score(t.key(), "a").await.unwrap(),
        Some(TEST_EPOCH_MS + 5)
    );
    assert_eq!(t.store.score(t.key(), "missing").await.unwrap(), None);

    t.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_store_ranges() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("ranges").await.expect("Failed to connect");
    for (member, score) in [("a", 10), ("b", 20), ("c", 30), ("d", -5)] {
        t.store.upsert(t.key(), member, score).await.unwrap();
    }

    let above = t
        .store
        .range_by_score(t.key(), ScoreRange::above(10))
        .await
        .unwrap();
    assert_eq!(
        above,
        vec![ScoredMember::new("b", 20), ScoredMember::new("c", 30)]
    );
    assert_eq!(
        t.store
            .count_range_by_score(t.key(), ScoreRange::between(10, 20))
            .await
            .unwrap(),
        2
    );

    // No lower bound: the negative score goes too
    let removed = t
        .store
        .remove_range_by_score(t.key(), ScoreRange::up_to(20))
        .await
        .unwrap();
    assert_eq!(removed, 3);
    assert_eq!(t.store.cardinality(t.key()).await.unwrap(), 1);

    assert!(t.store.remove(t.key(), "c").await.unwrap());
    assert!(!t.store.remove(t.key(), "c").await.unwrap());
    // Redis deletes the key with its last member
    assert!(!t.store.clear(t.key()).await.unwrap());

    t.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_wrong_key_type_is_command_error() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("wrongtype").await.expect("Failed to connect");

    // Occupy the key with a plain list so sorted-set commands are rejected
    let pool = integration_tests::test_pool().await.unwrap();
    let mut conn = pool.get().await.unwrap();
    redis::cmd("RPUSH")
        .arg(t.key())
        .arg("not-a-member")
        .query_async::<i64>(&mut conn)
        .await
        .unwrap();

    let err = t.presence.touch("a", SECOND_MS).await.unwrap_err();
    assert!(matches!(err, PresenceError::StoreCommand(_)));

    t.cleanup().await.unwrap();
}

// ============================================================================
// Presence set
// ============================================================================

#[tokio::test]
async fn test_reference_scenario_against_redis() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("scenario").await.expect("Failed to connect");

    let scenario = Scenario::new(
        t.presence.clone(),
        Arc::new(ClockPause(t.clock.clone())),
        ScenarioConfig::reference(&PresenceConfig::default(), &DemoConfig::default()),
    );
    let report = scenario.run().await.unwrap();

    assert_eq!(report.swept, 2);
    assert_eq!(report.online, 3);
    assert!(report.passed());

    t.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_refresh_overwrites_expiry() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("refresh").await.expect("Failed to connect");

    t.presence.touch("m", 100 * SECOND_MS).await.unwrap();
    t.clock.advance(20 * SECOND_MS);
    t.presence.touch("m", 5 * SECOND_MS).await.unwrap();

    assert_eq!(
        t.presence.expiry_of("m").await.unwrap(),
        Some(TEST_EPOCH_MS + 25 * SECOND_MS)
    );

    t.clock.advance(5 * SECOND_MS);
    assert!(!t.presence.is_online("m").await.unwrap());
    assert_eq!(t.presence.count().await.unwrap(), 0);

    t.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_read_only_count_does_not_sweep() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("readonly").await.expect("Failed to connect");

    t.presence.touch("a", SECOND_MS).await.unwrap();
    t.presence.touch("b", 10 * SECOND_MS).await.unwrap();
    t.clock.advance(2 * SECOND_MS);

    assert_eq!(t.presence.count_online().await.unwrap(), 1);
    assert_eq!(t.store.cardinality(t.key()).await.unwrap(), 2);

    let online = t.presence.online_members().await.unwrap();
    assert_eq!(online.len(), 1);
    assert_eq!(online[0].member.as_str(), "b");

    assert_eq!(t.presence.count().await.unwrap(), 1);
    assert_eq!(t.store.cardinality(t.key()).await.unwrap(), 1);

    t.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_empty_set() {
    if !check_test_env() {
        return;
    }
    let t = TestPresence::start("empty").await.expect("Failed to connect");

    assert_eq!(t.presence.sweep().await.unwrap(), 0);
    assert_eq!(t.presence.count().await.unwrap(), 0);
    assert!(t.presence.online_members().await.unwrap().is_empty());

    t.cleanup().await.unwrap();
}
