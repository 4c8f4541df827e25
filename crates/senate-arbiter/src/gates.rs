//! Hard gate chain: session-level vetoes evaluated in a fixed order.

use rust_decimal::{Decimal, RoundingStrategy};
use senate_models::{AnalystOutput, Direction, Regime, Ruling, UserSettings, VolatilityState};
use tracing::debug;

use crate::matcher;

/// Everything a gate may inspect. Gates never mutate state; they either
/// veto or stand aside.
pub struct GateContext<'a> {
    pub analysts: &'a [AnalystOutput],
    pub settings: &'a UserSettings,
    pub direction: Direction,
}

/// A gate's veto. `NO_TRADE` kills the trade outright; the news gate is the
/// one gate that downgrades to `CONDITIONAL` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateVerdict {
    pub ruling: Ruling,
    pub veto_reason: String,
}

impl GateVerdict {
    fn no_trade(veto_reason: impl Into<String>) -> Self {
        Self {
            ruling: Ruling::NoTrade,
            veto_reason: veto_reason.into(),
        }
    }

    fn conditional(veto_reason: impl Into<String>) -> Self {
        Self {
            ruling: Ruling::Conditional,
            veto_reason: veto_reason.into(),
        }
    }
}

type GateFn = fn(&GateContext<'_>) -> Option<GateVerdict>;

struct Gate {
    name: &'static str,
    evaluate: GateFn,
}

/// Evaluation order is part of the contract. Invalidation runs before R:R
/// because the ratio cannot be computed without an invalidation level, so
/// the missing level must be reported as the root cause.
static GATE_CHAIN: [Gate; 6] = [
    Gate {
        name: "invalidation",
        evaluate: invalidation_gate,
    },
    Gate {
        name: "risk_reward",
        evaluate: risk_reward_gate,
    },
    Gate {
        name: "volatility",
        evaluate: volatility_gate,
    },
    Gate {
        name: "chop",
        evaluate: chop_gate,
    },
    Gate {
        name: "news",
        evaluate: news_gate,
    },
    Gate {
        name: "setup_quality",
        evaluate: setup_quality_gate,
    },
];

/// Run all gates in order, short-circuiting on the first veto.
pub fn run_gate_chain(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    for gate in &GATE_CHAIN {
        if let Some(verdict) = (gate.evaluate)(ctx) {
            debug!(
                gate = gate.name,
                ruling = verdict.ruling.as_str(),
                reason = %verdict.veto_reason,
                "hard gate fired"
            );
            return Some(verdict);
        }
    }
    None
}

/// Expected reward-to-risk ratio for the given direction, averaged over the
/// directional analysts' POI, invalidation, and first target. `None` when
/// any leg is unknown or the implied risk is not positive.
pub fn expected_rr(analysts: &[AnalystOutput], direction: Direction) -> Option<Decimal> {
    let directional: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == direction)
        .collect();
    if directional.is_empty() {
        return None;
    }

    let poi = average(directional.iter().filter_map(|a| a.key_levels.poi))?;
    let inv = average(directional.iter().filter_map(|a| a.key_levels.invalidation))?;
    let tp1 = average(
        directional
            .iter()
            .filter_map(|a| a.key_levels.targets.first().copied()),
    )?;

    let (risk, reward) = match direction {
        Direction::Long => (poi - inv, tp1 - poi),
        Direction::Short => (inv - poi, poi - tp1),
        Direction::Wait => return None,
    };
    if risk <= Decimal::ZERO {
        return None;
    }
    reward.checked_div(risk)
}

fn average(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let values: Vec<Decimal> = values.collect();
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum.checked_div(Decimal::from(values.len() as u64))
}

fn invalidation_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    let has_invalidation = ctx
        .analysts
        .iter()
        .filter(|a| a.direction == ctx.direction)
        .any(|a| a.key_levels.invalidation.is_some());
    if has_invalidation {
        return None;
    }
    Some(GateVerdict::no_trade(
        "Invalidation Gate: no explicit invalidation level provided by directional analysts",
    ))
}

fn risk_reward_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    let rr = expected_rr(ctx.analysts, ctx.direction);
    let passes = rr.is_some_and(|rr| rr >= ctx.settings.min_rr);
    if passes {
        return None;
    }
    let shown = match rr {
        Some(rr) => format!(
            "{:.2}",
            rr.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => "unclear".to_string(),
    };
    Some(GateVerdict::no_trade(format!(
        "R:R Gate: expected R:R ({shown}) is below minimum ({})",
        ctx.settings.min_rr.normalize()
    )))
}

fn volatility_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    if ctx.settings.session_volatility_state != VolatilityState::Abnormal {
        return None;
    }
    Some(GateVerdict::no_trade(
        "Volatility Gate: session volatility state is Abnormal — no trades",
    ))
}

fn chop_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    if ctx.settings.regime != Regime::Choppy {
        return None;
    }
    let has_edge = ctx
        .analysts
        .iter()
        .any(|a| a.primary_scenario.trim().len() > 20);
    if has_edge {
        return None;
    }
    Some(GateVerdict::no_trade(
        "Chop Gate: regime is Choppy and no identifiable edge in analyst scenarios",
    ))
}

fn news_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    if !ctx.settings.news_event_imminent {
        return None;
    }
    Some(GateVerdict::conditional(
        "News Gate: high-impact news event imminent — wait until post-event",
    ))
}

fn setup_quality_gate(ctx: &GateContext<'_>) -> Option<GateVerdict> {
    let has_setup = ctx
        .analysts
        .iter()
        .any(|a| matcher::has_setup_keyword(&a.primary_scenario));
    if has_setup {
        return None;
    }
    Some(GateVerdict::no_trade(
        "Setup Quality Gate: no clear setup type identified across analyst scenarios",
    ))
}
