pub mod ballot;
pub mod dissent;
pub mod evidence;
pub mod gates;
pub mod matcher;
pub mod order;
pub mod pipeline;
pub mod quorum;
pub mod score;
pub mod validate;

pub use ballot::VoteTally;
pub use pipeline::{deliberate, deliberate_value};
pub use validate::ContractViolation;
