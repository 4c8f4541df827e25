//! Minority report: every ruling except a procedural failure carries one.

use senate_models::{AnalystOutput, Direction, Dissent};

use crate::matcher;

/// Build the dissent against the effective direction.
///
/// Preference order for the opposing case: the highest-confidence analyst
/// on the opposite side, then the first Wait analyst, then a counter-case
/// synthesized from stated uncertainty when the vote was unanimous.
pub fn build_dissent(analysts: &[AnalystOutput], direction: Direction) -> Dissent {
    let opposing = match direction {
        Direction::Long => Direction::Short,
        Direction::Short => Direction::Long,
        Direction::Wait => Direction::Wait,
    };

    let opposing_analysts: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == opposing)
        .collect();
    let wait_analysts: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == Direction::Wait)
        .collect();

    let strongest_opposing_case = if let Some(first) = opposing_analysts.first() {
        let mut best = *first;
        for candidate in opposing_analysts.iter().skip(1).copied() {
            if candidate.confidence > best.confidence {
                best = candidate;
            }
        }
        format!(
            "Best {} case ({}): {}",
            opposing.as_str(),
            best.agent_id,
            best.primary_scenario
        )
    } else if let Some(w) = wait_analysts.first() {
        let case = [w.primary_scenario.as_str(), w.uncertainty_reason.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Analyst recommends waiting for better conditions");
        format!("No-trade case ({}): {case}", w.agent_id)
    } else {
        // Unanimous vote. Synthesize a counter-case from stated uncertainty.
        let uncertainty = analysts
            .iter()
            .map(|a| a.uncertainty_reason.as_str())
            .find(|s| !s.is_empty())
            .unwrap_or("No explicit counter-case raised — validate before entry");
        format!("Counter-case from uncertainty: {uncertainty}")
    };

    let fail_signals = analysts
        .iter()
        .flat_map(|a| a.no_trade_conditions.iter())
        .filter(|c| !c.is_empty())
        .map(|c| c.as_str());
    let fail_scenarios = analysts
        .iter()
        .map(|a| a.alternative_scenario.as_str())
        .filter(|s| !s.is_empty() && matcher::has_failure_language(s));

    let combined: Vec<&str> = fail_signals.chain(fail_scenarios).collect();
    let what_would_fail_fast = if combined.is_empty() {
        "This fails fast if: price breaks through the invalidation level on a closing basis \
         without reclaim"
            .to_string()
    } else {
        format!("This fails fast if: {}", combined[..combined.len().min(2)].join("; "))
    };

    Dissent {
        strongest_opposing_case,
        what_would_fail_fast,
    }
}
