//! Deferred loading of assets.
//!
//! A [`Deferred`] is the boundary between something that is still being
//! fetched and the part of the scene that depends on it. It starts out
//! [`LoadState::Pending`] and settles exactly once, either to
//! [`LoadState::Ready`] or [`LoadState::Failed`]. Whoever owns the boundary
//! renders a fallback until it is ready; a failed boundary keeps showing the
//! fallback.

use std::fmt;

use anyhow::anyhow;

use crate::config::RetryPolicy;

pub enum LoadState<T> {
    Pending,
    Ready(T),
    Failed(anyhow::Error),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

impl<T> fmt::Debug for LoadState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Pending => f.write_str("Pending"),
            LoadState::Ready(_) => f.write_str("Ready(..)"),
            LoadState::Failed(e) => f.debug_tuple("Failed").field(&format!("{e:#}")).finish(),
        }
    }
}

#[derive(Debug)]
pub struct Deferred<T> {
    label: String,
    state: LoadState<T>,
}

impl<T> Deferred<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: LoadState::Pending,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Settle the boundary. Returns `false` and leaves the state untouched if
    /// it had already settled.
    pub fn resolve(&mut self, result: anyhow::Result<T>) -> bool {
        if !self.state.is_pending() {
            log::warn!(
                "{} was already settled ({:?}), ignoring late result",
                self.label,
                self.state
            );
            return false;
        }
        self.state = match result {
            Ok(value) => {
                log::info!("{} is ready", self.label);
                LoadState::Ready(value)
            }
            Err(e) => {
                log::error!("{} failed, keeping the fallback: {e:#}", self.label);
                LoadState::Failed(e)
            }
        };
        true
    }
}

/// Run `attempt` until it succeeds or `policy.max_attempts` is used up.
///
/// `attempt` receives the 1-based attempt number. Every failure but the last
/// is logged as a warning; the last one is returned with context attached.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, label: &str, mut attempt: F) -> anyhow::Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = anyhow!("{label}: no attempt was made");
    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if n < max_attempts {
                    log::warn!("{label}: attempt {n}/{max_attempts} failed: {e:#}");
                    backoff(policy).await;
                }
                last_error = e;
            }
        }
    }
    Err(last_error.context(format!("{label}: giving up after {max_attempts} attempt(s)")))
}

#[cfg(not(target_arch = "wasm32"))]
async fn backoff(policy: RetryPolicy) {
    if !policy.backoff.is_zero() {
        tokio::time::sleep(policy.backoff).await;
    }
}

// Retries on the web follow each other immediately.
#[cfg(target_arch = "wasm32")]
async fn backoff(_: RetryPolicy) {}
