use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analyst::Direction;

/// Final adjudication of a deliberation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Ruling {
    #[serde(rename = "TRADE")]
    Trade,
    #[serde(rename = "CONDITIONAL")]
    Conditional,
    #[serde(rename = "NO_TRADE")]
    NoTrade,
    #[serde(rename = "PROCEDURAL_FAIL")]
    ProceduralFail,
}

impl Ruling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ruling::Trade => "TRADE",
            Ruling::Conditional => "CONDITIONAL",
            Ruling::NoTrade => "NO_TRADE",
            Ruling::ProceduralFail => "PROCEDURAL_FAIL",
        }
    }
}

/// Context snapshot under which the senate convened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Docket {
    pub instrument: String,
    pub timestamp: String,
    pub regime: String,
    pub volatility_state: String,
}

/// One analyst's position as tabled before deliberation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    pub agent_id: String,
    pub direction: Direction,
    pub confidence: Decimal,
}

/// A weighted item in the evidence ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceEntry {
    pub evidence: String,
    pub weight: u32,
    /// Agent ids that cited this evidence.
    pub sources: Vec<String>,
    /// Human-readable trace of the weighting rules that fired.
    pub deciding_rule: String,
}

/// The full record of how the ruling was reached. Read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SenateRecord {
    pub docket: Docket,
    pub motions: Vec<Motion>,
    /// Evidence tags cited by two or more analysts.
    pub points_of_agreement: Vec<String>,
    /// Pairwise Long-vs-Short scenario excerpts.
    pub contested_points: Vec<String>,
    /// Top-5 weighted evidence items, heaviest first.
    pub evidence_ledger: Vec<EvidenceEntry>,
    pub ruling: Ruling,
}

/// One executable plan. Plan B additionally names the trigger it arms on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    pub entry_model: String,
    pub invalidation: String,
    pub take_profit_logic: String,
    pub management_rule: String,
    pub risk_instruction: String,
    pub do_not_trade_if: Vec<String>,
}

/// Primary and optional conditional execution plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlan {
    pub plan_a: ExecutionPlan,
    pub plan_b: Option<ExecutionPlan>,
}

/// The mandatory minority report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dissent {
    pub strongest_opposing_case: String,
    pub what_would_fail_fast: String,
}

/// The sole return value of a deliberation.
///
/// Failure paths are encoded here rather than raised: `reason` is present
/// only when a procedural or consensus failure occurred, and the nullable
/// fields serialize as explicit `null` so downstream renderers can key off
/// them unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub ruling: Ruling,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// 0-100, integer-valued after clamping.
    pub confidence: u8,
    /// Null only on PROCEDURAL_FAIL.
    pub senate_record: Option<SenateRecord>,
    /// Null on NO_TRADE and PROCEDURAL_FAIL.
    pub order: Option<OrderPlan>,
    /// Null only on PROCEDURAL_FAIL.
    pub dissent: Option<Dissent>,
    pub veto_reason: Option<String>,
    pub conditional_trigger: Option<String>,
}
