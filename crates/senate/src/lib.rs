//! Trade Senate Protocol
//!
//! A deliberation engine that convenes a bench of analyst opinions and
//! adjudicates them into exactly one trade decision. The pipeline is pure
//! and synchronous: opinions and risk settings in, one `Decision` out,
//! with every failure mode encoded in the ruling rather than an error.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use senate::models::{AnalystOutput, UserSettings, Decision, Ruling};
//! use senate::arbiter::{deliberate, deliberate_value};
//! use senate::models::{SenateConfig, DeliberationConfig};
//! ```

pub use senate_arbiter as arbiter;
pub use senate_arbiter::{deliberate, deliberate_value};
pub use senate_models as models;
pub use senate_models::Decision;

use senate_models::DeliberationConfig;
use serde::Deserialize;
use serde_json::{json, Value};

/// The request envelope accepted on stdin or via `--input`.
///
/// Both fields default to JSON null so a partial envelope still reaches
/// the arbiter and comes back as a `PROCEDURAL_FAIL` ruling instead of a
/// CLI parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberationRequest {
    #[serde(default)]
    pub analyst_outputs: Value,
    #[serde(default)]
    pub user_settings: Value,
}

/// Fill missing `userSettings` fields from configuration defaults.
///
/// A null settings value is replaced wholesale. An object only gains the
/// keys it does not already carry. Anything else is left untouched for
/// the arbiter to reject.
pub fn apply_settings_defaults(settings: &mut Value, defaults: &DeliberationConfig) {
    match settings {
        Value::Null => {
            *settings = json!({
                "minRR": defaults.min_rr,
                "maxRiskPercent": defaults.max_risk_percent,
            });
        }
        Value::Object(map) => {
            if !map.contains_key("minRR") {
                map.insert("minRR".to_string(), json!(defaults.min_rr));
            }
            if !map.contains_key("maxRiskPercent") {
                map.insert("maxRiskPercent".to_string(), json!(defaults.max_risk_percent));
            }
        }
        _ => {}
    }
}
