use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market regime supplied by the caller.
///
/// Open-ended on the wire: only `Choppy` and `Ranging` carry engine
/// semantics, so unrecognized spellings are preserved rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Regime {
    Trending,
    Ranging,
    Choppy,
    Unknown,
    Other(String),
}

impl Regime {
    pub fn as_str(&self) -> &str {
        match self {
            Regime::Trending => "Trending",
            Regime::Ranging => "Ranging",
            Regime::Choppy => "Choppy",
            Regime::Unknown => "Unknown",
            Regime::Other(s) => s,
        }
    }
}

impl From<String> for Regime {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Trending" => Regime::Trending,
            "Ranging" => Regime::Ranging,
            "Choppy" => Regime::Choppy,
            "Unknown" => Regime::Unknown,
            _ => Regime::Other(value),
        }
    }
}

impl From<Regime> for String {
    fn from(value: Regime) -> Self {
        value.as_str().to_string()
    }
}

/// Session volatility state supplied by the caller.
///
/// Open-ended like [`Regime`]; only `Abnormal` carries engine semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum VolatilityState {
    Normal,
    Elevated,
    Abnormal,
    Unknown,
    Other(String),
}

impl VolatilityState {
    pub fn as_str(&self) -> &str {
        match self {
            VolatilityState::Normal => "Normal",
            VolatilityState::Elevated => "Elevated",
            VolatilityState::Abnormal => "Abnormal",
            VolatilityState::Unknown => "Unknown",
            VolatilityState::Other(s) => s,
        }
    }
}

impl From<String> for VolatilityState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Normal" => VolatilityState::Normal,
            "Elevated" => VolatilityState::Elevated,
            "Abnormal" => VolatilityState::Abnormal,
            "Unknown" => VolatilityState::Unknown,
            _ => VolatilityState::Other(value),
        }
    }
}

impl From<VolatilityState> for String {
    fn from(value: VolatilityState) -> Self {
        value.as_str().to_string()
    }
}

/// Risk and market-context settings snapshotted by the caller at
/// deliberation time. The engine never reads the caller's live state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Minimum acceptable reward-to-risk ratio.
    #[serde(rename = "minRR")]
    pub min_rr: Decimal,
    /// Maximum account risk per trade, in percent.
    pub max_risk_percent: Decimal,
    #[serde(default = "default_volatility_state")]
    pub session_volatility_state: VolatilityState,
    #[serde(default = "default_regime")]
    pub regime: Regime,
    #[serde(default)]
    pub instrument: Option<String>,
    /// ISO-8601 datetime of the snapshot.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub news_event_imminent: bool,
}

fn default_volatility_state() -> VolatilityState {
    VolatilityState::Unknown
}

fn default_regime() -> Regime {
    Regime::Unknown
}
