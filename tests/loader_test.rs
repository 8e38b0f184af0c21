use std::cell::Cell;

use anyhow::anyhow;
use instant::Duration;
use wave_folio::{
    config::RetryPolicy,
    resources::{
        load_image,
        loader::{Deferred, LoadState, with_retry},
    },
};

fn quick(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        backoff: Duration::ZERO,
    }
}

#[test]
fn deferred_starts_pending() {
    let deferred: Deferred<u32> = Deferred::new("answer");
    assert!(deferred.state().is_pending());
    assert_eq!(deferred.ready(), None);
    assert_eq!(deferred.label(), "answer");
}

#[test]
fn deferred_settles_once() {
    let mut deferred = Deferred::new("answer");
    assert!(deferred.resolve(Ok(42)));
    assert_eq!(deferred.ready(), Some(&42));

    assert!(!deferred.resolve(Ok(7)));
    assert!(!deferred.resolve(Err(anyhow!("late failure"))));
    assert_eq!(deferred.ready(), Some(&42));
}

#[test]
fn failed_deferred_keeps_the_error() {
    let mut deferred: Deferred<u32> = Deferred::new("answer");
    assert!(deferred.resolve(Err(anyhow!("404"))));
    assert!(deferred.state().is_failed());
    assert_eq!(deferred.ready(), None);
    match deferred.state() {
        LoadState::Failed(e) => assert!(format!("{e:#}").contains("404")),
        other => panic!("expected a failure, got {other:?}"),
    }

    assert!(!deferred.resolve(Ok(1)));
    assert!(deferred.state().is_failed());
}

#[tokio::test]
async fn retry_stops_at_the_first_success() {
    let calls = Cell::new(0);
    let result = with_retry(quick(5), "flaky", |n| {
        calls.set(calls.get() + 1);
        async move {
            if n < 3 {
                Err(anyhow!("attempt {n} failed"))
            } else {
                Ok(n)
            }
        }
    })
    .await;
    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn retry_gives_up_after_max_attempts() {
    let calls = Cell::new(0);
    let result: anyhow::Result<()> = with_retry(quick(3), "broken", |n| {
        calls.set(calls.get() + 1);
        async move { Err(anyhow!("attempt {n} failed")) }
    })
    .await;
    assert_eq!(calls.get(), 3);
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("giving up after 3 attempt(s)"), "{message}");
    assert!(message.contains("attempt 3 failed"), "{message}");
}

#[tokio::test]
async fn zero_attempts_still_tries_once() {
    let calls = Cell::new(0);
    let result = with_retry(quick(0), "once", |_| {
        calls.set(calls.get() + 1);
        async { Ok::<_, anyhow::Error>("done") }
    })
    .await;
    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn loads_the_wave_texture() {
    let img = load_image("Artboard.png", RetryPolicy::NONE).await.unwrap();
    assert_eq!((img.width(), img.height()), (128, 192));
}

#[tokio::test]
async fn missing_texture_fails_after_retrying() {
    let err = load_image("does-not-exist.png", quick(2)).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("does-not-exist.png"), "{message}");
    assert!(message.contains("giving up after 2 attempt(s)"), "{message}");
}
