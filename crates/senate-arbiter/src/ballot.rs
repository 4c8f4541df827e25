//! Direction vote tallying and conflict resolution.

use senate_models::{AnalystOutput, Direction};

use crate::matcher;

/// Vote counts per direction for one deliberation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub long: usize,
    pub short: usize,
    pub wait: usize,
}

impl VoteTally {
    pub fn count(analysts: &[AnalystOutput]) -> Self {
        let mut tally = VoteTally {
            long: 0,
            short: 0,
            wait: 0,
        };
        for analyst in analysts {
            match analyst.direction {
                Direction::Long => tally.long += 1,
                Direction::Short => tally.short += 1,
                Direction::Wait => tally.wait += 1,
            }
        }
        tally
    }

    /// Directional votes only. Wait signals abstention and never counts.
    pub fn directional(&self) -> usize {
        self.long + self.short
    }

    /// The direction holding a clear 2+ vote majority, if any.
    /// Wait is never a quorum direction.
    pub fn quorum_direction(&self) -> Option<Direction> {
        if self.long >= 2 {
            Some(Direction::Long)
        } else if self.short >= 2 {
            Some(Direction::Short)
        } else {
            None
        }
    }

    /// Conflict = at least one Long vote and at least one Short vote.
    pub fn has_conflict(&self) -> bool {
        self.long > 0 && self.short > 0
    }

    /// Direction the gates evaluate against: quorum majority first, then a
    /// sole directional vote, then raw count with Long winning a dead tie.
    /// The tie arm is unreachable through the pipeline (a tied conflict is
    /// unresolvable and exits earlier) but keeps this total.
    pub fn effective_direction(&self) -> Direction {
        if let Some(direction) = self.quorum_direction() {
            direction
        } else if self.directional() == 1 {
            if self.long == 1 {
                Direction::Long
            } else {
                Direction::Short
            }
        } else if self.long >= self.short {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

/// Attempt conditional resolution of a direction conflict.
///
/// Scans dissenting (non-quorum, non-Wait) analysts in list order for an
/// `alternative_scenario` that is long enough to be meaningful and contains
/// conditional language. The first qualifying scenario becomes the trigger.
/// Returns `None` when no quorum direction exists or no dissenter qualifies;
/// the conflict is then unresolvable.
pub fn resolve_conflict(
    analysts: &[AnalystOutput],
    quorum_direction: Option<Direction>,
) -> Option<String> {
    let quorum_direction = quorum_direction?;

    analysts
        .iter()
        .filter(|a| a.direction != quorum_direction && a.direction != Direction::Wait)
        .find_map(|dissenter| {
            let scenario = dissenter.alternative_scenario.trim();
            if scenario.len() >= 10 && matcher::has_conditional_phrase(scenario) {
                Some(format!("Only {} if: {scenario}", quorum_direction.as_str()))
            } else {
                None
            }
        })
}
