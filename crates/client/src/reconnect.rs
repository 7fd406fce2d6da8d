//! Reconnection policy for the user-input WebSocket.
//!
//! The default policy, [`NoReconnect`], gives up as soon as the socket
//! drops; the user has to start over. [`ExponentialBackoff`] keeps
//! retrying with growing delays until it connects, runs out of attempts,
//! or the [`CancellationToken`] fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{UserInputClient, UserInputConnection};

/// Decides whether and when to retry after a dropped connection.
pub trait ReconnectPolicy: Send + Sync {
    /// Delay before reconnect attempt number `attempt` (1-based), or
    /// `None` to stop retrying.
    fn delay_for(&self, attempt: u32) -> Option<Duration>;
}

/// Never reconnect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReconnect;

impl ReconnectPolicy for NoReconnect {
    fn delay_for(&self, _attempt: u32) -> Option<Duration> {
        None
    }
}

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
    /// Attempts before giving up.
    pub max_attempts: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            max_attempts: 5,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`ReconnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Retry with exponentially growing delays.
#[derive(Debug, Clone, Default)]
pub struct ExponentialBackoff {
    config: ReconnectConfig,
}

impl ExponentialBackoff {
    pub fn new(config: ReconnectConfig) -> Self {
        Self { config }
    }
}

impl ReconnectPolicy for ExponentialBackoff {
    fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.config.max_attempts {
            return None;
        }
        let mut delay = self.config.initial_delay.min(self.config.max_delay);
        for _ in 1..attempt {
            delay = next_delay(delay, &self.config);
        }
        Some(delay)
    }
}

/// Reconnect to the user-input endpoint as long as `policy` allows.
///
/// Returns `Some(connection)` once a connection succeeds, or `None` when
/// the policy gives up or `cancel` is triggered.
pub async fn reconnect_loop(
    client: &UserInputClient,
    policy: &dyn ReconnectPolicy,
    cancel: &CancellationToken,
) -> Option<UserInputConnection> {
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let Some(delay) = policy.delay_for(attempt) else {
            tracing::warn!(host = %client.host(), attempt, "Giving up on reconnecting");
            return None;
        };

        // Wait before the attempt, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(host = %client.host(), "Reconnect cancelled");
                return None;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        tracing::info!(
            host = %client.host(),
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to user-input endpoint",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(host = %client.host(), "Reconnect cancelled");
                return None;
            }
            result = client.connect() => {
                match result {
                    Ok(conn) => {
                        tracing::info!(host = %client.host(), attempt, "Reconnected");
                        return Some(conn);
                    }
                    Err(e) => {
                        tracing::warn!(
                            host = %client.host(),
                            error = %e,
                            "Reconnect attempt {attempt} failed",
                        );
                    }
                }
            }
        }
    }
}
