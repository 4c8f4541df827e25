use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the senate binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SenateConfig {
    #[serde(default)]
    pub deliberation: DeliberationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Risk thresholds applied when a request omits its own user settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliberationConfig {
    /// Minimum reward-to-risk ratio a plan must clear.
    #[serde(default = "default_min_rr")]
    pub min_rr: Decimal,
    /// Percent of account risked on Plan A.
    #[serde(default = "default_max_risk_percent")]
    pub max_risk_percent: Decimal,
}

impl Default for DeliberationConfig {
    fn default() -> Self {
        Self {
            min_rr: default_min_rr(),
            max_risk_percent: default_max_risk_percent(),
        }
    }
}

fn default_min_rr() -> Decimal {
    Decimal::TWO
}

fn default_max_risk_percent() -> Decimal {
    Decimal::ONE
}

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
