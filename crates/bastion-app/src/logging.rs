//! Structured logging setup.
//!
//! Library crates only emit `tracing` events; the binary installs the
//! subscriber here. Initialisation is idempotent and `RUST_LOG` overrides
//! the configured filter.

use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("bastion_sim::systems".to_string(), LogLevel::Info),
                ("bastion_sim::tracker".to_string(), LogLevel::Warn),
                ("bastion_combat".to_string(), LogLevel::Info),
            ],
            show_targets: true,
        }
    }
}

impl TracingConfig {
    /// Verbose variant used by `--verbose`.
    pub fn verbose() -> Self {
        Self {
            default_level: LogLevel::Debug,
            module_filters: Vec::new(),
            ..Self::default()
        }
    }

    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Install the global subscriber. First call wins.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_names(true)
            .compact();

        // A subscriber may already be installed by a test harness.
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_string() {
        let s = TracingConfig::default().to_env_filter_string();
        assert!(s.starts_with("info,"));
        assert!(s.contains("bastion_sim::tracker=warn"));
    }

    #[test]
    fn test_verbose_filter_string() {
        assert_eq!(TracingConfig::verbose().to_env_filter_string(), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing_default();
        init_tracing(&TracingConfig::verbose());
    }
}
