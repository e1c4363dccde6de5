//! All-or-nothing concurrent fan-out

use std::future::Future;

use futures_util::future::join_all;

use crate::error::CatalogError;

/// Run every request concurrently and wait for all of them.
///
/// Succeeds only when every request succeeded, preserving input order.
/// Otherwise reports how many failed along with the first failure.
pub async fn fan_out<I, F, T>(requests: I) -> Result<Vec<T>, CatalogError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, CatalogError>>,
{
    let results = join_all(requests).await;
    let total = results.len();

    let mut values = Vec::with_capacity(total);
    let mut failed = 0;
    let mut first = None;
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) => {
                failed += 1;
                first.get_or_insert(err);
            }
        }
    }

    match first {
        None => Ok(values),
        Some(first) => Err(CatalogError::Aggregate {
            failed,
            total,
            first: Box::new(first),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_preserves_order() {
        let requests = [30u64, 10, 20].map(|delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, CatalogError>(delay)
        });
        assert_eq!(fan_out(requests).await.unwrap(), vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_empty_is_ok() {
        let requests: Vec<std::future::Ready<Result<u32, CatalogError>>> = Vec::new();
        assert!(fan_out(requests).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_any_failure_fails_all() {
        let requests = (0..4).map(|i| async move {
            match i {
                1 => Err(CatalogError::Timeout),
                3 => Err(CatalogError::Offline),
                _ => Ok(i),
            }
        });
        match fan_out(requests).await {
            Err(CatalogError::Aggregate { failed, total, first }) => {
                assert_eq!(failed, 2);
                assert_eq!(total, 4);
                assert!(matches!(*first, CatalogError::Timeout));
            }
            other => panic!("expected aggregate failure, got {other:?}"),
        }
    }
}
