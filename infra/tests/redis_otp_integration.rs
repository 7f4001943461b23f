//! Integration tests for the Redis-backed OTP store
//!
//! These tests require a local Redis instance and are ignored by default:
//! `cargo test -p cd_infra -- --ignored`

use std::sync::Arc;

use cd_core::domain::entities::otp_entry::OtpEntry;
use cd_core::services::otp::OtpStore;
use cd_infra::cache::{RedisClient, RedisOtpStore};
use cd_shared::config::CacheConfig;

async fn store() -> RedisOtpStore {
    let config = CacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
        connection_timeout: 5,
        key_prefix: Some("cd-test".to_string()),
    };
    let client = RedisClient::new(config)
        .await
        .expect("Failed to create Redis client");
    RedisOtpStore::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_verify_is_one_shot() {
    let store = store().await;
    let entry = OtpEntry::new("redis-one-shot@x.com".to_string());
    let code = entry.code.clone();

    store.put(entry).await.unwrap();
    assert!(store.pending("redis-one-shot@x.com").await.unwrap());

    assert!(store.verify("redis-one-shot@x.com", &code).await.unwrap());
    assert!(!store.verify("redis-one-shot@x.com", &code).await.unwrap());
    assert!(!store.pending("redis-one-shot@x.com").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_reissue_replaces_previous_code() {
    let store = store().await;
    let email = "redis-reissue@x.com";

    let first = OtpEntry::new(email.to_string());
    let first_code = first.code.clone();
    store.put(first).await.unwrap();

    let second = OtpEntry::new(email.to_string());
    let second_code = second.code.clone();
    store.put(second).await.unwrap();

    if first_code != second_code {
        assert!(!store.verify(email, &first_code).await.unwrap());
    }
    assert!(store.verify(email, &second_code).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_attempt_ceiling_kills_entry() {
    let store = store().await;
    let email = "redis-attempts@x.com";

    let entry = OtpEntry::new(email.to_string());
    let code = entry.code.clone();
    store.put(entry).await.unwrap();

    for _ in 0..3 {
        assert!(!store.verify(email, "no-match").await.unwrap());
    }

    // Correct code no longer verifies once attempts are exhausted
    assert!(!store.verify(email, &code).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis to be running
async fn test_concurrent_verify_single_winner() {
    let store = Arc::new(store().await);
    let email = "redis-race@x.com";

    let entry = OtpEntry::new(email.to_string());
    let code = entry.code.clone();
    store.put(entry).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            store.verify(email, &code).await.unwrap()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_clear_removes_entry() {
    let store = store().await;
    let email = "redis-clear@x.com";

    let entry = OtpEntry::new(email.to_string());
    let code = entry.code.clone();
    store.put(entry).await.unwrap();

    store.clear(email).await.unwrap();
    assert!(!store.pending(email).await.unwrap());
    assert!(!store.verify(email, &code).await.unwrap());
}
