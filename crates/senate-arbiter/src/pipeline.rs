//! The deliberation pipeline: one synchronous pass from analyst opinions
//! and user risk settings to a final [`Decision`].
//!
//! The pipeline never returns an error. Every failure mode is encoded in
//! the returned ruling: contract violations surface as `PROCEDURAL_FAIL`,
//! consensus and risk failures as `NO_TRADE` with the record, confidence,
//! and dissent still populated so callers can render why.

use chrono::{SecondsFormat, Utc};
use senate_models::{
    AnalystOutput, Decision, Direction, Docket, EvidenceEntry, Motion, Ruling, SenateRecord,
    UserSettings,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ballot::{self, VoteTally};
use crate::dissent::build_dissent;
use crate::evidence;
use crate::gates::{self, GateContext};
use crate::order::build_order;
use crate::quorum;
use crate::score::confidence_score;
use crate::validate::{self, ContractViolation};

/// Deliberate over an untyped JSON payload.
///
/// This is the boundary entry point: the payload is shape-checked and
/// parsed first, and any defect becomes a `PROCEDURAL_FAIL` decision
/// naming the offending agent and field.
pub fn deliberate_value(analyst_outputs: &Value, user_settings: &Value) -> Decision {
    match validate::validate_payload(analyst_outputs, user_settings) {
        Ok((analysts, settings)) => run(&analysts, &settings),
        Err(violation) => procedural_fail(violation),
    }
}

/// Deliberate over already-typed inputs.
pub fn deliberate(analysts: &[AnalystOutput], settings: &UserSettings) -> Decision {
    if analysts.is_empty() {
        return procedural_fail(ContractViolation::EmptyDocket);
    }
    run(analysts, settings)
}

fn procedural_fail(violation: ContractViolation) -> Decision {
    warn!(reason = %violation, "deliberation voided");
    Decision {
        ruling: Ruling::ProceduralFail,
        reason: Some(violation.to_string()),
        confidence: 0,
        senate_record: None,
        order: None,
        dissent: None,
        veto_reason: None,
        conditional_trigger: None,
    }
}

fn run(analysts: &[AnalystOutput], settings: &UserSettings) -> Decision {
    // 1. Convene: docket and motions
    let mut parts = RecordParts::convene(analysts, settings);

    // 2. Disagreement detection
    let tally = VoteTally::count(analysts);
    let conflict_mode = tally.has_conflict();
    let quorum_direction = tally.quorum_direction();
    debug!(
        long = tally.long,
        short = tally.short,
        wait = tally.wait,
        conflict = conflict_mode,
        "votes tallied"
    );

    let mut conditional_trigger: Option<String> = None;
    if conflict_mode {
        conditional_trigger = ballot::resolve_conflict(analysts, quorum_direction);
        match &conditional_trigger {
            Some(trigger) => debug!(%trigger, "direction conflict resolved conditionally"),
            None => {
                let confluent = evidence::confluent_count(analysts);
                let confidence = confidence_score(analysts, settings, conflict_mode, confluent);
                info!(confidence, "unresolvable direction conflict");
                parts.contested_points = evidence::contested_points(analysts);
                return Decision {
                    ruling: Ruling::NoTrade,
                    reason: Some("Unresolvable direction conflict".to_string()),
                    confidence,
                    senate_record: Some(parts.into_record(Ruling::NoTrade)),
                    order: None,
                    dissent: Some(build_dissent(
                        analysts,
                        quorum_direction.unwrap_or(Direction::Long),
                    )),
                    veto_reason: None,
                    conditional_trigger: None,
                };
            }
        }
    }

    // 3. Evidence weighting
    parts.points_of_agreement = evidence::points_of_agreement(analysts);
    parts.contested_points = evidence::contested_points(analysts);
    parts.evidence_ledger = evidence::evidence_ledger(analysts);
    let confluent = evidence::confluent_count(analysts);

    // 4. Quorum check
    let fatal = quorum::has_fatal_no_trade_condition(analysts, settings);
    if !quorum::quorum_passed(&tally, fatal) {
        let confidence = confidence_score(analysts, settings, conflict_mode, confluent);
        info!(confidence, fatal, "quorum not met");
        return Decision {
            ruling: Ruling::NoTrade,
            reason: Some("Quorum not met".to_string()),
            confidence,
            senate_record: Some(parts.into_record(Ruling::NoTrade)),
            order: None,
            dissent: Some(build_dissent(
                analysts,
                quorum_direction.unwrap_or(Direction::Long),
            )),
            veto_reason: None,
            conditional_trigger: None,
        };
    }

    let direction = tally.effective_direction();

    // 5. Hard gate vetoes
    let ctx = GateContext {
        analysts,
        settings,
        direction,
    };
    if let Some(verdict) = gates::run_gate_chain(&ctx) {
        let confidence = confidence_score(analysts, settings, conflict_mode, confluent);
        let dissent = build_dissent(analysts, direction);

        if verdict.ruling == Ruling::Conditional {
            // News gate: trade survives but only behind a trigger.
            let trigger = conditional_trigger.unwrap_or_else(|| verdict.veto_reason.clone());
            info!(confidence, %trigger, "conditional entry armed by news gate");
            return Decision {
                ruling: Ruling::Conditional,
                reason: None,
                confidence,
                senate_record: Some(parts.into_record(Ruling::Conditional)),
                order: Some(build_order(analysts, settings, direction, Some(&trigger))),
                dissent: Some(dissent),
                veto_reason: Some(verdict.veto_reason),
                conditional_trigger: Some(trigger),
            };
        }

        info!(confidence, veto = %verdict.veto_reason, "hard gate veto");
        return Decision {
            ruling: Ruling::NoTrade,
            reason: None,
            confidence,
            senate_record: Some(parts.into_record(Ruling::NoTrade)),
            order: None,
            dissent: Some(dissent),
            veto_reason: Some(verdict.veto_reason),
            conditional_trigger: None,
        };
    }

    // 6. Confidence score and final ruling
    let confidence = confidence_score(analysts, settings, conflict_mode, confluent);
    let mut ruling = if conflict_mode && conditional_trigger.is_some() {
        Ruling::Conditional
    } else {
        Ruling::Trade
    };
    if confidence < 55 && ruling == Ruling::Trade {
        ruling = Ruling::Conditional;
    }

    // 7. Order and dissent
    let order_trigger = if ruling == Ruling::Conditional {
        Some(conditional_trigger.clone().unwrap_or_else(|| {
            format!("Confidence {confidence} < 55 — wait for additional confirmation")
        }))
    } else {
        None
    };
    let order = build_order(analysts, settings, direction, order_trigger.as_deref());
    let dissent = build_dissent(analysts, direction);

    let top_level_trigger = if ruling == Ruling::Conditional {
        Some(conditional_trigger.unwrap_or_else(|| format!("Confidence {confidence} < 55")))
    } else {
        None
    };

    info!(
        ruling = ruling.as_str(),
        direction = direction.as_str(),
        confidence,
        "deliberation complete"
    );

    Decision {
        ruling,
        reason: None,
        confidence,
        senate_record: Some(parts.into_record(ruling)),
        order: Some(order),
        dissent: Some(dissent),
        veto_reason: None,
        conditional_trigger: top_level_trigger,
    }
}

/// Accumulates the senate record as the pipeline progresses; the ruling is
/// stamped on at the exit point.
struct RecordParts {
    docket: Docket,
    motions: Vec<Motion>,
    points_of_agreement: Vec<String>,
    contested_points: Vec<String>,
    evidence_ledger: Vec<EvidenceEntry>,
}

impl RecordParts {
    fn convene(analysts: &[AnalystOutput], settings: &UserSettings) -> Self {
        let docket = Docket {
            instrument: settings
                .instrument
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
            timestamp: settings
                .timestamp
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            regime: non_empty_or_unknown(settings.regime.as_str()),
            volatility_state: non_empty_or_unknown(settings.session_volatility_state.as_str()),
        };
        let motions = analysts
            .iter()
            .map(|a| Motion {
                agent_id: a.agent_id.clone(),
                direction: a.direction,
                confidence: a.confidence,
            })
            .collect();
        Self {
            docket,
            motions,
            points_of_agreement: Vec::new(),
            contested_points: Vec::new(),
            evidence_ledger: Vec::new(),
        }
    }

    fn into_record(self, ruling: Ruling) -> SenateRecord {
        SenateRecord {
            docket: self.docket,
            motions: self.motions,
            points_of_agreement: self.points_of_agreement,
            contested_points: self.contested_points,
            evidence_ledger: self.evidence_ledger,
            ruling,
        }
    }
}

fn non_empty_or_unknown(label: &str) -> String {
    if label.is_empty() {
        "Unknown".to_string()
    } else {
        label.to_string()
    }
}
