//! Procedural validation of the raw deliberation payload.
//!
//! Validation happens in two layers. The first layer walks the untyped JSON
//! in a fixed field-check order so a malformed payload is always reported
//! against the first offending analyst and field, matching what renderers
//! show to users. The second layer is the typed parse into
//! [`AnalystOutput`] / [`UserSettings`]; anything the shape checks let
//! through but serde rejects (a string where a number belongs) is still a
//! procedural failure, never a panic.

use senate_models::{AnalystOutput, UserSettings};
use serde_json::Value;
use thiserror::Error;

/// A payload defect that voids the deliberation before it starts.
///
/// The display strings double as the `reason` field of a
/// `PROCEDURAL_FAIL` ruling, so their wording is part of the wire contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("analystOutputs must be a non-empty array")]
    EmptyDocket,
    #[error("userSettings is required")]
    MissingSettings,
    #[error("Missing required fields from {agent}: {field}")]
    MissingField { agent: String, field: String },
    #[error("Malformed analyst payload from {agent}: {detail}")]
    MalformedAnalyst { agent: String, detail: String },
    #[error("Malformed userSettings: {detail}")]
    MalformedSettings { detail: String },
}

/// Required analyst fields, in the order they are reported when missing.
const REQUIRED_ANALYST_FIELDS: [&str; 10] = [
    "agentId",
    "direction",
    "claims",
    "evidenceTags",
    "keyLevels",
    "primaryScenario",
    "alternativeScenario",
    "confidence",
    "uncertaintyReason",
    "noTradeConditions",
];

const REQUIRED_KEY_LEVEL_FIELDS: [&str; 3] = ["poi", "invalidation", "targets"];

const VALID_DIRECTIONS: [&str; 3] = ["Long", "Short", "Wait"];

/// Validate and parse the full payload.
///
/// Returns the typed analyst list and settings, or the first
/// [`ContractViolation`] encountered in check order.
pub fn validate_payload(
    analyst_outputs: &Value,
    user_settings: &Value,
) -> Result<(Vec<AnalystOutput>, UserSettings), ContractViolation> {
    let elements = match analyst_outputs {
        Value::Array(elements) if !elements.is_empty() => elements,
        _ => return Err(ContractViolation::EmptyDocket),
    };
    if !matches!(user_settings, Value::Object(_) | Value::Array(_)) {
        return Err(ContractViolation::MissingSettings);
    }

    for element in elements {
        check_analyst_shape(element)?;
    }

    let mut analysts = Vec::with_capacity(elements.len());
    for element in elements {
        let analyst: AnalystOutput = serde_json::from_value(element.clone()).map_err(|err| {
            ContractViolation::MalformedAnalyst {
                agent: agent_label(element),
                detail: err.to_string(),
            }
        })?;
        analysts.push(analyst);
    }

    let settings: UserSettings = serde_json::from_value(user_settings.clone())
        .map_err(|err| ContractViolation::MalformedSettings {
            detail: err.to_string(),
        })?;

    Ok((analysts, settings))
}

/// Untyped shape checks for one analyst element, in reporting order.
fn check_analyst_shape(element: &Value) -> Result<(), ContractViolation> {
    let obj = match element {
        Value::Object(obj) => obj,
        _ => {
            return Err(ContractViolation::MissingField {
                agent: agent_label(element),
                field: "analyst object".to_string(),
            })
        }
    };

    for field in REQUIRED_ANALYST_FIELDS {
        if !obj.contains_key(field) {
            return Err(missing(element, field));
        }
    }

    let key_levels = &obj["keyLevels"];
    if !matches!(key_levels, Value::Object(_) | Value::Array(_)) {
        return Err(missing(element, "keyLevels (must be object)"));
    }
    for field in REQUIRED_KEY_LEVEL_FIELDS {
        let present = matches!(key_levels, Value::Object(kl) if kl.contains_key(field));
        if !present {
            return Err(missing(element, &format!("keyLevels.{field}")));
        }
    }

    for field in ["claims", "evidenceTags", "noTradeConditions"] {
        if !obj[field].is_array() {
            return Err(missing(element, &format!("{field} (must be array)")));
        }
    }
    if !key_levels["targets"].is_array() {
        return Err(missing(element, "keyLevels.targets (must be array)"));
    }

    let direction_ok = obj["direction"]
        .as_str()
        .is_some_and(|d| VALID_DIRECTIONS.contains(&d));
    if !direction_ok {
        return Err(missing(
            element,
            &format!("direction (must be one of: {})", VALID_DIRECTIONS.join("|")),
        ));
    }

    Ok(())
}

fn missing(element: &Value, field: &str) -> ContractViolation {
    ContractViolation::MissingField {
        agent: agent_label(element),
        field: field.to_string(),
    }
}

/// Best-effort agent id for error messages. Falls back to "unknown" when the
/// payload does not carry a usable one.
fn agent_label(element: &Value) -> String {
    match element.get("agentId") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => "unknown".to_string(),
    }
}
