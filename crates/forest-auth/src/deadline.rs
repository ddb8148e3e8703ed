use super::Fault;
use forest_pg::StoreError;
use std::future::Future;
use std::time::Duration;

/// Runs one storage operation under a deadline.
///
/// Elapsed deadlines become [`Fault::Timeout`]; storage errors are
/// classified through `From<StoreError>`. Nothing is retried here.
pub async fn bounded<T, F>(limit: Duration, op: F) -> Result<T, Fault>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result.map_err(Fault::from),
        Err(_) => {
            log::warn!("database call exceeded {:?}", limit);
            Err(Fault::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[tokio::test]
    async fn passes_through_fast_results() {
        let result = bounded(Duration::from_secs(1), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result, Ok(7));
    }
    #[tokio::test]
    async fn classifies_store_errors() {
        let result = bounded(Duration::from_secs(1), async {
            Err::<(), _>(StoreError::Conflict("profiles_username_key".into()))
        })
        .await;
        assert_eq!(result, Err(Fault::Conflict));
    }
    #[tokio::test]
    async fn slow_calls_time_out() {
        let result = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        })
        .await;
        assert_eq!(result, Err(Fault::Timeout));
    }
}
