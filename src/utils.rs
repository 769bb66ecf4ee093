use std::cmp;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::delay_for;
use tracing::warn;

pub async fn with_retry<F, T, E, Fut>(
    retry_max: u32,
    wait_base: u32,
    wait_max: u32,
    mut f: F,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    F: FnMut() -> Fut,
    E: fmt::Display,
{
    let mut retry: u32 = 0;
    loop {
        let e = match f().await {
            Ok(r) => {
                return Ok(r);
            }
            Err(e) => e,
        };
        retry += 1;
        if retry > retry_max {
            return Err(e);
        }
        let wait = cmp::min(wait_max, wait_base.pow(retry));
        warn!("retry #{} waiting {}secs: {}", retry, wait, e);
        delay_for(Duration::from_secs(wait as u64)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn returns_first_success() {
        let calls = Cell::new(0u32);
        let out: Result<u32, String> = with_retry(3, 0, 0, || {
            calls.set(calls.get() + 1);
            async { Ok(7) }
        })
        .await;
        assert_eq!(out, Ok(7));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_the_retry_budget() {
        let calls = Cell::new(0u32);
        let out: Result<u32, String> = with_retry(2, 0, 0, || {
            calls.set(calls.get() + 1);
            async { Err("nope".to_string()) }
        })
        .await;
        assert_eq!(out, Err("nope".to_string()));
        // initial attempt plus two retries
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let calls = Cell::new(0u32);
        let out: Result<u32, String> = with_retry(5, 0, 0, || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move {
                if attempt < 3 {
                    Err("busy".to_string())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;
        assert_eq!(out, Ok(3));
    }
}
