use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// How often and how patiently a request is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(retries: usize, delay: Duration) -> Self {
        Self { retries, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// Whether a failed request is worth repeating.
///
/// Client errors (4xx) mean the request itself is wrong or the resource is
/// missing, so repeating it cannot help. Connection failures, timeouts and
/// server errors are treated as transient.
pub fn is_transient(err: &reqwest::Error) -> bool {
    match err.status() {
        Some(status) => !status.is_client_error(),
        None => !err.is_builder() && !err.is_decode(),
    }
}

/// Runs `operation` until it succeeds, fails permanently or the policy's
/// retries are used up.
pub async fn with_retry<F, Fut, T>(mut operation: F, policy: RetryPolicy) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt < policy.retries && is_transient(&err) => {
                attempt += 1;
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    policy.retries + 1,
                    err
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FAST: RetryPolicy = RetryPolicy::new(2, Duration::from_millis(1));

    async fn count_attempts(status: u16, route: &str) -> (bool, usize) {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let url = format!("{}{}", mock_server.uri(), route);
        let attempts = AtomicUsize::new(0);
        let result = with_retry(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                reqwest::get(&url).await?.error_for_status()
            },
            FAST,
        )
        .await;

        (result.is_err(), attempts.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_server_error_is_retried_until_exhausted() {
        assert_eq!(count_attempts(503, "/flaky").await, (true, 3));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        assert_eq!(count_attempts(404, "/missing").await, (true, 1));
        assert_eq!(count_attempts(422, "/invalid").await, (true, 1));
    }

    #[tokio::test]
    async fn test_connection_failure_is_retried() {
        let attempts = AtomicUsize::new(0);
        // Port 9 (discard) on localhost is not expected to be listening.
        let result = with_retry(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                reqwest::get("http://127.0.0.1:9/").await
            },
            FAST,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_first_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/ok", mock_server.uri());
        let response = with_retry(|| async { reqwest::get(&url).await }, FAST)
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "fine");
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.delay, Duration::from_millis(500));
    }
}
