use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directional vote cast by a single analyst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
    Wait,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
            Direction::Wait => "Wait",
        }
    }
}

/// Price levels cited by an analyst alongside their thesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyLevels {
    /// Entry zone where the analyst expects price reaction. None = no level given.
    pub poi: Option<Decimal>,
    /// Level whose breach falsifies the thesis. None = no level given.
    pub invalidation: Option<Decimal>,
    /// Profit targets, nearest first in the analyst's own ordering. May be empty.
    pub targets: Vec<Decimal>,
}

/// The structured opinion one analyst submits for deliberation.
///
/// Produced externally (one per analyst role) and validated at the engine
/// boundary; every field is required on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalystOutput {
    pub agent_id: String,
    pub direction: Direction,
    /// Supporting claims, ordered. Typically 3-8 entries.
    pub claims: Vec<String>,
    /// Timeframe/level citations (e.g., "H4-demand-zone").
    pub evidence_tags: Vec<String>,
    pub key_levels: KeyLevels,
    pub primary_scenario: String,
    pub alternative_scenario: String,
    /// Self-reported conviction, 0-100.
    pub confidence: Decimal,
    pub uncertainty_reason: String,
    /// Conditions under which this analyst would stand down.
    pub no_trade_conditions: Vec<String>,
}
