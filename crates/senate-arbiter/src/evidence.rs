//! Evidence aggregation: agreement, contention, and the weighted ledger.

use std::collections::HashSet;

use senate_models::{AnalystOutput, Direction, EvidenceEntry};

use crate::matcher;

/// Citation counts for one distinct evidence tag, in first-seen order.
struct TagTally {
    tag: String,
    count: u32,
    sources: Vec<String>,
}

/// Tally distinct evidence tags across analysts. Tags are deduplicated per
/// analyst so one analyst repeating a tag counts once, and first-seen order
/// across the whole list is preserved.
fn tally_tags(analysts: &[AnalystOutput]) -> Vec<TagTally> {
    let mut tallies: Vec<TagTally> = Vec::new();
    for analyst in analysts {
        let mut seen: HashSet<&str> = HashSet::new();
        for tag in &analyst.evidence_tags {
            if !seen.insert(tag.as_str()) {
                continue;
            }
            match tallies.iter_mut().find(|t| t.tag == *tag) {
                Some(tally) => {
                    tally.count += 1;
                    tally.sources.push(analyst.agent_id.clone());
                }
                None => tallies.push(TagTally {
                    tag: tag.clone(),
                    count: 1,
                    sources: vec![analyst.agent_id.clone()],
                }),
            }
        }
    }
    tallies
}

/// Evidence tags cited by two or more analysts.
pub fn points_of_agreement(analysts: &[AnalystOutput]) -> Vec<String> {
    tally_tags(analysts)
        .into_iter()
        .filter(|t| t.count >= 2)
        .map(|t| t.tag)
        .collect()
}

/// Pairwise contested points: every Long analyst against every Short
/// analyst, citing the first 80 characters of each primary scenario.
pub fn contested_points(analysts: &[AnalystOutput]) -> Vec<String> {
    let longs: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == Direction::Long)
        .collect();
    let shorts: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == Direction::Short)
        .collect();

    let mut contested = Vec::new();
    for l in &longs {
        for s in &shorts {
            contested.push(format!(
                "{} (Long) vs {} (Short) — Long: \"{}\" | Short: \"{}\"",
                l.agent_id,
                s.agent_id,
                excerpt(&l.primary_scenario),
                excerpt(&s.primary_scenario),
            ));
        }
    }
    contested
}

fn excerpt(scenario: &str) -> String {
    scenario.chars().take(80).collect()
}

/// Rank distinct evidence tags by weight and keep the top five.
///
/// Weighting rules, applied cumulatively per tag:
/// higher-timeframe citation +3, close-based confirmation +2,
/// multi-analyst confluence +2 per extra citing analyst, freshness
/// baseline +1. The deciding rule string records which rules fired.
pub fn evidence_ledger(analysts: &[AnalystOutput]) -> Vec<EvidenceEntry> {
    let mut entries: Vec<EvidenceEntry> = tally_tags(analysts)
        .into_iter()
        .map(|tally| {
            let mut weight = 0u32;
            let mut rules: Vec<String> = Vec::new();

            if matcher::is_htf_citation(&tally.tag) {
                weight += 3;
                rules.push("HTF bias (D/H4/H1) > LTF: +3".to_string());
            }
            if matcher::is_close_confirmation(&tally.tag) {
                weight += 2;
                rules.push("Close-based confirmation > wick-based: +2".to_string());
            }
            if tally.count > 1 {
                let bonus = 2 * (tally.count - 1);
                weight += bonus;
                rules.push(format!("Confluence ×{} analysts: +{bonus}", tally.count));
            }
            weight += 1;
            rules.push("Freshness baseline: +1".to_string());

            EvidenceEntry {
                evidence: tally.tag,
                weight,
                sources: tally.sources,
                deciding_rule: rules.join(" | "),
            }
        })
        .collect();

    // Stable sort keeps first-seen order among equal weights.
    entries.sort_by(|a, b| b.weight.cmp(&a.weight));
    entries.truncate(5);
    entries
}

/// Number of distinct tags cited by two or more analysts. Each counts as
/// one independent confluence for the confidence score.
pub fn confluent_count(analysts: &[AnalystOutput]) -> u32 {
    tally_tags(analysts).iter().filter(|t| t.count >= 2).count() as u32
}
