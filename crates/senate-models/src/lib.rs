pub mod analyst;
pub mod config;
pub mod decision;
pub mod settings;

pub use analyst::{AnalystOutput, Direction, KeyLevels};
pub use config::{DeliberationConfig, LoggingConfig, SenateConfig};
pub use decision::{
    Decision, Dissent, Docket, EvidenceEntry, ExecutionPlan, Motion, OrderPlan, Ruling,
    SenateRecord,
};
pub use settings::{Regime, UserSettings, VolatilityState};
