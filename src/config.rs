// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Operator configuration from command-line flags and environment variables.
//!
//! Every flag has an environment fallback so the operator can be configured
//! from a Deployment manifest without overriding its command.

use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_RESYNC_INTERVAL_SECS, ERROR_BACKOFF_MAX_SECS, FIELD_MANAGER,
    METRICS_SERVER_BIND_ADDRESS, METRICS_SERVER_PORT,
};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime configuration for the Aquarium operator.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "aquarium-operator", version, about = "Reconciles Aquarium resources")]
pub struct OperatorConfig {
    /// Only watch `Aquarium` resources in this namespace. Watches all namespaces if unset.
    #[arg(long, env = "WATCH_NAMESPACE")]
    pub namespace: Option<String>,

    /// Field manager recorded for server-side apply
    #[arg(long, env = "FIELD_MANAGER", default_value = FIELD_MANAGER)]
    pub field_manager: String,

    /// Maximum number of aquaria reconciled at the same time
    #[arg(long, env = "CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: u16,

    /// Seconds to wait before re-checking an aquarium after a successful pass
    #[arg(long, env = "RESYNC_INTERVAL_SECS", default_value_t = DEFAULT_RESYNC_INTERVAL_SECS)]
    pub resync_interval_secs: u64,

    /// Upper bound in seconds for the retry delay after failed passes
    #[arg(long, env = "ERROR_BACKOFF_MAX_SECS", default_value_t = ERROR_BACKOFF_MAX_SECS)]
    pub error_backoff_max_secs: u64,

    /// Address the metrics and health server binds to
    #[arg(long, env = "METRICS_BIND_ADDRESS", default_value = METRICS_SERVER_BIND_ADDRESS)]
    pub metrics_bind_address: String,

    #[arg(long, env = "METRICS_PORT", default_value_t = METRICS_SERVER_PORT)]
    pub metrics_port: u16,
}

impl OperatorConfig {
    #[must_use]
    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs)
    }

    #[must_use]
    pub fn error_backoff_max(&self) -> Duration {
        Duration::from_secs(self.error_backoff_max_secs)
    }

    /// Socket address for the metrics server.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is not a valid IP address.
    pub fn metrics_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.metrics_bind_address, self.metrics_port).parse()
    }
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            field_manager: FIELD_MANAGER.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            resync_interval_secs: DEFAULT_RESYNC_INTERVAL_SECS,
            error_backoff_max_secs: ERROR_BACKOFF_MAX_SECS,
            metrics_bind_address: METRICS_SERVER_BIND_ADDRESS.to_string(),
            metrics_port: METRICS_SERVER_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        let config = OperatorConfig::try_parse_from(["aquarium-operator"]).unwrap();

        assert_eq!(config.field_manager, "aquarium-operator");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.resync_interval(), Duration::from_secs(300));
        assert_eq!(config.error_backoff_max(), Duration::from_secs(300));
        assert_eq!(config.metrics_port, 8080);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = OperatorConfig::try_parse_from([
            "aquarium-operator",
            "--namespace",
            "aquarium",
            "--concurrency",
            "8",
            "--resync-interval-secs",
            "60",
            "--metrics-port",
            "9090",
        ])
        .unwrap();

        assert_eq!(config.namespace.as_deref(), Some("aquarium"));
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.resync_interval(), Duration::from_secs(60));
        assert_eq!(config.metrics_port, 9090);
    }

    #[test]
    fn test_metrics_addr() {
        let config = OperatorConfig::default();
        assert_eq!(config.metrics_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_metrics_addr() {
        let config = OperatorConfig {
            metrics_bind_address: "not-an-ip".to_string(),
            ..OperatorConfig::default()
        };
        assert!(config.metrics_addr().is_err());
    }

    #[test]
    fn test_rejects_non_numeric_concurrency() {
        assert!(
            OperatorConfig::try_parse_from(["aquarium-operator", "--concurrency", "many"]).is_err()
        );
    }
}
