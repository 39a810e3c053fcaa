//! Fetching remote archives over HTTP(S).

use std::path::Path;
use std::time::Duration;

use crate::error::ReaderError;

/// Corpus archives can be large; this only guards against runaway bodies.
const MAX_DOWNLOAD_BYTES: u64 = 4 * 1024 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    pub max_retries: u32,
    /// First wait between attempts; doubles after each retry.
    pub initial_backoff: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        DownloadConfig {
            timeout: Duration::from_secs(10),
            max_retries: 10,
            initial_backoff: Duration::from_millis(100),
        }
    }
}

/// Whether a failed request is worth another attempt: connection
/// failures, timeouts, rate limiting and transient server errors.
fn is_retryable(err: &ureq::Error) -> bool {
    matches!(
        err,
        ureq::Error::StatusCode(429 | 500 | 502 | 503)
            | ureq::Error::Timeout(_)
            | ureq::Error::Io(_)
            | ureq::Error::ConnectionFailed
    )
}

/// Run `f` until it succeeds, fails for good, or the retry budget is spent.
/// Returns the error of the last attempt with the number of attempts made.
fn with_retry<T, E, F, R>(
    mut f: F,
    retryable: R,
    config: &DownloadConfig,
) -> Result<T, (E, u32)>
where
    F: FnMut() -> Result<T, E>,
    R: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut backoff = config.initial_backoff;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match f() {
            Ok(value) => return Ok(value),
            Err(e) if attempt <= config.max_retries && retryable(&e) => {
                tracing::warn!(
                    attempt,
                    max = config.max_retries + 1,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "retryable download error"
                );
                std::thread::sleep(backoff);
                backoff *= 2;
            }
            Err(e) => return Err((e, attempt)),
        }
    }
}

fn fetch(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, ureq::Error> {
    let response = agent.get(url).call()?;
    response
        .into_body()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
}

/// Download `url` to the file `dest`.
pub fn download(url: &str, dest: &Path, config: &DownloadConfig) -> Result<(), ReaderError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(config.timeout))
        .build()
        .into();

    tracing::info!(url, dest = %dest.display(), "downloading");
    let bytes = with_retry(|| fetch(&agent, url), is_retryable, config).map_err(
        |(e, attempts)| ReaderError::Download {
            url: url.to_string(),
            attempts,
            message: e.to_string(),
        },
    )?;
    std::fs::write(dest, &bytes).map_err(|e| ReaderError::io(dest, e))?;
    tracing::info!(url, bytes = bytes.len(), "download complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn quick(max_retries: u32) -> DownloadConfig {
        DownloadConfig {
            max_retries,
            initial_backoff: Duration::from_millis(1),
            ..DownloadConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let config = DownloadConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 10);
        assert_eq!(config.initial_backoff, Duration::from_millis(100));
    }

    #[test]
    fn retryable_errors() {
        assert!(is_retryable(&ureq::Error::StatusCode(429)));
        assert!(is_retryable(&ureq::Error::StatusCode(503)));
        assert!(is_retryable(&ureq::Error::ConnectionFailed));
        assert!(!is_retryable(&ureq::Error::StatusCode(404)));
        assert!(!is_retryable(&ureq::Error::HostNotFound));
    }

    #[test]
    fn retries_until_success() {
        let calls = Cell::new(0);
        let result: Result<u32, (String, u32)> = with_retry(
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    Err("flaky".to_string())
                } else {
                    Ok(7)
                }
            },
            |_| true,
            &quick(5),
        );
        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn gives_up_after_budget() {
        let result: Result<(), (String, u32)> =
            with_retry(|| Err("down".to_string()), |_| true, &quick(2));
        assert_eq!(result, Err(("down".to_string(), 3)));
    }

    #[test]
    fn permanent_errors_fail_fast() {
        let result: Result<(), (String, u32)> =
            with_retry(|| Err("404".to_string()), |_| false, &quick(5));
        assert_eq!(result, Err(("404".to_string(), 1)));
    }
}
