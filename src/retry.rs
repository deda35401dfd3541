// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Fixed-interval retry for throttled forge requests.
///
/// A throttled request (HTTP 429) is repeated unchanged after a constant
/// cooldown. There is no backoff growth; the retry count is unbounded unless
/// a cap is configured.
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{error::Error, forge::ForgeResponse};

/// Status code the forge uses to signal throttling.
pub const THROTTLED: u16 = 429;

/// Configuration for retrying throttled requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct ThrottlePolicy
{
    /// Fixed pause before repeating a throttled request (default: 60s).
    pub cooldown:    Duration,
    /// Maximum number of retries; `None` retries forever (default).
    pub max_retries: Option<u32,>,
}

impl Default for ThrottlePolicy
{
    fn default() -> Self
    {
        Self {
            cooldown: Duration::from_secs(60,), max_retries: None,
        }
    }
}

/// Executes a request, repeating it for as long as the forge throttles it.
///
/// # Arguments
///
/// * `policy` - Cooldown and optional retry cap
/// * `url` - Resource being requested, for logging
/// * `f` - Async function issuing the request
///
/// # Errors
///
/// Propagates transport errors from `f` unchanged and returns
/// [`Error::ThrottleExhausted`] once a configured cap is exceeded.
pub async fn retry_on_throttle<F, Fut,>(
    policy: &ThrottlePolicy,
    url: &str,
    mut f: F,
) -> Result<ForgeResponse, Error,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<ForgeResponse, Error,>,>,
{
    let mut throttled = 0u32;

    loop {
        let response = f().await?;
        if response.status != THROTTLED {
            if throttled > 0 {
                debug!("{} succeeded after {} throttled attempts", url, throttled);
            }
            return Ok(response,);
        }

        throttled = throttled.saturating_add(1,);
        if let Some(max_retries,) = policy.max_retries
            && throttled > max_retries
        {
            warn!("{} still throttled after {} attempts, giving up", url, throttled);
            return Err(Error::ThrottleExhausted {
                url:      url.to_owned(),
                attempts: throttled,
            },);
        }

        warn!("Rate limited on {}. Waiting {}s before retrying...", url, policy.cooldown.as_secs());
        sleep(policy.cooldown,).await;
    }
}
