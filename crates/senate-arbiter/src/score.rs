//! Deterministic confidence scoring.

use senate_models::{AnalystOutput, Regime, UserSettings};

use crate::matcher;

/// Score a deliberation 0-100 from a base of 50.
///
/// Adjustments: +10 per independent evidence confluence capped at +30,
/// -15 when directions conflicted, -10 in an uncertain regime (Choppy or
/// Ranging), -10 when any analyst's language anticipates a move without
/// citing a completed confirmation.
pub fn confidence_score(
    analysts: &[AnalystOutput],
    settings: &UserSettings,
    conflict_mode: bool,
    confluent_count: u32,
) -> u8 {
    let mut score: i32 = 50;

    score += (confluent_count as i32 * 10).min(30);

    if conflict_mode {
        score -= 15;
    }

    if settings.regime == Regime::Choppy || settings.regime == Regime::Ranging {
        score -= 10;
    }

    if analysts.iter().any(anticipates_without_confirmation) {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

fn anticipates_without_confirmation(analyst: &AnalystOutput) -> bool {
    let mut text = analyst.claims.join(" ");
    text.push(' ');
    text.push_str(&analyst.primary_scenario);
    matcher::has_anticipation_language(&text) && !matcher::has_confirmation_language(&text)
}
