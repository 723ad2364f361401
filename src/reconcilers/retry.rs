// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-aquarium exponential backoff for failed reconciliations.
//!
//! A failed pass is requeued after a delay that doubles with every consecutive
//! failure of the same aquarium, up to a cap. A successful pass resets it.

use crate::constants::{
    ERROR_BACKOFF_INITIAL_SECS, ERROR_BACKOFF_MAX_SECS, ERROR_BACKOFF_MULTIPLIER,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Simple exponential backoff without jitter.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    /// Interval returned by the next call to [`ExponentialBackoff::next_backoff`]
    pub current_interval: Duration,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    /// Growth factor applied after every call
    pub multiplier: u32,
}

impl ExponentialBackoff {
    #[must_use]
    pub fn new(initial_interval: Duration, max_interval: Duration, multiplier: u32) -> Self {
        Self {
            current_interval: initial_interval,
            initial_interval,
            max_interval,
            multiplier,
        }
    }

    /// Get the next backoff interval and advance.
    pub fn next_backoff(&mut self) -> Duration {
        let interval = self.current_interval.min(self.max_interval);
        self.current_interval = interval
            .checked_mul(self.multiplier)
            .unwrap_or(self.max_interval)
            .min(self.max_interval);
        interval
    }

    pub fn reset(&mut self) {
        self.current_interval = self.initial_interval;
    }
}

/// Create the backoff used for failed reconciliations.
///
/// # Retry Schedule
///
/// 1s, 2s, 4s, 8s, ... capped at `max_interval` (5 minutes by default).
#[must_use]
pub fn error_backoff(max_interval: Duration) -> ExponentialBackoff {
    ExponentialBackoff::new(
        Duration::from_secs(ERROR_BACKOFF_INITIAL_SECS),
        max_interval,
        ERROR_BACKOFF_MULTIPLIER,
    )
}

/// Tracks one [`ExponentialBackoff`] per aquarium key (`namespace/name`).
#[derive(Debug)]
pub struct ErrorBackoffs {
    max_interval: Duration,
    backoffs: Mutex<HashMap<String, ExponentialBackoff>>,
}

impl Default for ErrorBackoffs {
    fn default() -> Self {
        Self::new(Duration::from_secs(ERROR_BACKOFF_MAX_SECS))
    }
}

impl ErrorBackoffs {
    #[must_use]
    pub fn new(max_interval: Duration) -> Self {
        Self {
            max_interval,
            backoffs: Mutex::new(HashMap::new()),
        }
    }

    /// Delay before retrying `key` after another consecutive failure.
    pub fn next_delay(&self, key: &str) -> Duration {
        let mut backoffs = self
            .backoffs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let delay = backoffs
            .entry(key.to_string())
            .or_insert_with(|| error_backoff(self.max_interval))
            .next_backoff();
        debug!(key = %key, delay_secs = delay.as_secs(), "Computed error backoff");
        delay
    }

    /// Forget the failure history of `key` after a successful pass.
    pub fn reset(&self, key: &str) {
        self.backoffs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod retry_tests;
