//! Tolerant fan-out/fan-in over independent fetches.

use futures::future::join_all;
use futures::FutureExt;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

/// Run every fetch concurrently and wait for all of them.
///
/// Batches come back in submission order. A fetch that errors or panics
/// contributes an empty batch and a warning; the call itself never fails.
///
/// The fetches are polled from the caller's task rather than spawned, so
/// dropping the returned future cancels every fetch still in flight.
pub async fn fetch_all<T, E, F, I>(fetches: I) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = (String, F)>,
    F: Future<Output = Result<Vec<T>, E>>,
    E: Display,
{
    let guarded = fetches.into_iter().map(|(label, fetch)| async move {
        match AssertUnwindSafe(fetch).catch_unwind().await {
            Ok(Ok(batch)) => {
                debug!("{}: {} results", label, batch.len());
                batch
            }
            Ok(Err(e)) => {
                warn!("{}: fetch failed, using empty batch: {}", label, e);
                Vec::new()
            }
            Err(_) => {
                warn!("{}: fetch panicked, using empty batch", label);
                Vec::new()
            }
        }
    });

    join_all(guarded).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Place};
    use crate::provider::ProviderError;
    use crate::search::merge;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn place(id: &str) -> Place {
        Place::new(id, id, Category::Food, 0.0, 0.0)
    }

    #[tokio::test]
    async fn test_failed_fetch_becomes_empty_batch() {
        let fetches = vec![
            (
                "one".to_string(),
                async { Ok::<_, ProviderError>(vec![place("a"), place("b")]) }.boxed(),
            ),
            (
                "two".to_string(),
                async { Err::<Vec<Place>, _>(ProviderError::Other("boom".into())) }.boxed(),
            ),
            (
                "three".to_string(),
                async { Ok::<_, ProviderError>(vec![place("b"), place("c")]) }.boxed(),
            ),
        ];

        let batches = fetch_all(fetches).await;
        assert_eq!(batches.len(), 3);
        assert!(batches[1].is_empty());

        let ids: Vec<_> = merge(batches).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_panicking_fetch_is_contained() {
        let fetches = vec![
            (
                "ok".to_string(),
                async { Ok::<_, ProviderError>(vec![place("a")]) }.boxed(),
            ),
            (
                "panics".to_string(),
                async {
                    if true {
                        panic!("provider bug");
                    }
                    Ok::<Vec<Place>, ProviderError>(Vec::new())
                }
                .boxed(),
            ),
        ];

        let batches = fetch_all(fetches).await;
        assert_eq!(batches[0].len(), 1);
        assert!(batches[1].is_empty());
    }

    #[tokio::test]
    async fn test_batches_keep_submission_order() {
        // later submissions finish first
        let fetches = (0..4u64).map(|i| {
            let label = format!("fetch-{i}");
            let fut = async move {
                tokio::time::sleep(Duration::from_millis(40 - i * 10)).await;
                Ok::<_, ProviderError>(vec![place(&i.to_string())])
            };
            (label, fut)
        });

        let batches = fetch_all(fetches).await;
        let ids: Vec<_> = batches.iter().map(|b| b[0].id.clone()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let start = tokio::time::Instant::now();
        let fetches = (0..5).map(|i| {
            let fut = async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, ProviderError>(vec![place(&i.to_string())])
            };
            (format!("fetch-{i}"), fut)
        });

        let batches = fetch_all(fetches).await;
        assert_eq!(batches.len(), 5);
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_dropping_fan_in_cancels_fetches() {
        let completed = Arc::new(AtomicUsize::new(0));
        let fetches = (0..3).map(|i| {
            let completed = completed.clone();
            let fut = async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ProviderError>(vec![place(&i.to_string())])
            };
            (format!("fetch-{i}"), fut)
        });

        let outcome = tokio::time::timeout(Duration::from_millis(50), fetch_all(fetches)).await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_fetches() {
        let fetches: Vec<(String, futures::future::Ready<Result<Vec<Place>, ProviderError>>)> =
            Vec::new();
        assert!(fetch_all(fetches).await.is_empty());
    }
}
