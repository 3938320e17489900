//! Bounded retry for bringing up collaborators that may not be ready yet.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

/// Run `op` until it succeeds or `attempts` tries have failed.
///
/// Waits `backoff` between tries. The last error is returned once the
/// attempts are used up; `attempts` of zero still tries once.
pub fn with_retry<T, E, F>(attempts: u32, backoff: Duration, mut op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                log::debug!("attempt {}/{} failed: {}", attempt, attempts, e);
                thread::sleep(backoff);
                attempt += 1;
            }
            Err(e) => {
                log::warn!("giving up after {} attempts: {}", attempts, e);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_after_failures() {
        let mut calls = 0;
        let result: Result<&str, String> = with_retry(5, Duration::ZERO, |attempt| {
            calls += 1;
            if attempt < 3 {
                Err(format!("not ready ({attempt})"))
            } else {
                Ok("ready")
            }
        });

        assert_eq!(result, Ok("ready"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_gives_up_with_last_error() {
        let mut calls = 0;
        let result: Result<(), String> = with_retry(4, Duration::ZERO, |attempt| {
            calls += 1;
            Err(format!("attempt {attempt}"))
        });

        assert_eq!(result, Err("attempt 4".to_string()));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_zero_attempts_tries_once() {
        let mut calls = 0;
        let _: Result<(), &str> = with_retry(0, Duration::ZERO, |_| {
            calls += 1;
            Err("no")
        });
        assert_eq!(calls, 1);
    }
}
