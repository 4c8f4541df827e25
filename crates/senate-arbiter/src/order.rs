//! Execution plan construction for TRADE and CONDITIONAL rulings.

use rust_decimal::{Decimal, RoundingStrategy};
use senate_models::{AnalystOutput, Direction, ExecutionPlan, OrderPlan, UserSettings};

/// Build Plan A (and Plan B when a conditional trigger is armed) from the
/// directional analysts' levels. Entry and invalidation are averaged across
/// the directional analysts; targets are pooled, deduplicated, and ordered
/// by distance in the trade direction.
pub fn build_order(
    analysts: &[AnalystOutput],
    settings: &UserSettings,
    direction: Direction,
    conditional_trigger: Option<&str>,
) -> OrderPlan {
    let directional: Vec<&AnalystOutput> = analysts
        .iter()
        .filter(|a| a.direction == direction)
        .collect();

    let avg_poi = average(directional.iter().filter_map(|a| a.key_levels.poi));
    let avg_inv = average(directional.iter().filter_map(|a| a.key_levels.invalidation));

    let mut targets: Vec<Decimal> = Vec::new();
    for analyst in &directional {
        for target in &analyst.key_levels.targets {
            if !targets.contains(target) {
                targets.push(*target);
            }
        }
    }
    targets.sort();
    if direction == Direction::Short {
        targets.reverse();
    }
    let tp1 = targets.first().copied();
    let tp2 = targets.get(1).copied();

    let tp_logic = match (tp1, tp2) {
        (Some(tp1), Some(tp2)) => format!(
            "TP1 at {} (50% exit), TP2 at {} (trail remainder to full exit)",
            fmt_price(Some(tp1)),
            fmt_price(Some(tp2)),
        ),
        (Some(tp1), None) => format!("Single target at {} — full exit", fmt_price(Some(tp1))),
        _ => "Targets TBD — derived from structure".to_string(),
    };

    let mut do_not_trade_if: Vec<String> = Vec::new();
    for analyst in analysts {
        for condition in &analyst.no_trade_conditions {
            if !do_not_trade_if.contains(condition) {
                do_not_trade_if.push(condition.clone());
            }
        }
    }

    let close_side = match direction {
        Direction::Long => "close below",
        _ => "close above",
    };

    let plan_a = ExecutionPlan {
        trigger: None,
        entry_model: format!("Limit at {} POI zone", fmt_price(avg_poi)),
        invalidation: format!("{} — {close_side} invalidates setup", fmt_price(avg_inv)),
        take_profit_logic: tp_logic.clone(),
        management_rule: "Move to breakeven at TP1. Partial close 50% at TP1. Trail remainder \
                          to TP2. Time stop: exit if no trigger within session."
            .to_string(),
        risk_instruction: format!("Risk {}% of account", settings.max_risk_percent.normalize()),
        do_not_trade_if: do_not_trade_if.clone(),
    };

    let plan_b = conditional_trigger.map(|trigger| {
        let reduced_risk = (settings.max_risk_percent / Decimal::TWO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let mut conditions = do_not_trade_if;
        conditions.push("Trigger does not fire within session window".to_string());
        ExecutionPlan {
            trigger: Some(trigger.to_string()),
            entry_model: format!("Market / trigger entry on: {trigger}"),
            invalidation: format!("{} — reassess after trigger fires", fmt_price(avg_inv)),
            take_profit_logic: tp_logic,
            management_rule:
                "Reduce size 50% vs Plan A. Standard partial and trail rules apply post-entry."
                    .to_string(),
            risk_instruction: format!(
                "Risk {reduced_risk:.2}% of account (reduced — conditional entry)"
            ),
            do_not_trade_if: conditions,
        }
    });

    OrderPlan { plan_a, plan_b }
}

fn average(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let values: Vec<Decimal> = values.collect();
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum.checked_div(Decimal::from(values.len() as u64))
}

/// Five-decimal price rendering, "TBD" when the level is unknown.
fn fmt_price(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!(
            "{:.5}",
            v.round_dp_with_strategy(5, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => "TBD".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use senate_models::KeyLevels;

    fn analyst(direction: Direction, levels: KeyLevels, conditions: &[&str]) -> AnalystOutput {
        AnalystOutput {
            agent_id: "TechnicalAnalyst".to_string(),
            direction,
            claims: vec![],
            evidence_tags: vec![],
            key_levels: levels,
            primary_scenario: "Pullback to H4 demand".to_string(),
            alternative_scenario: String::new(),
            confidence: dec!(80),
            uncertainty_reason: String::new(),
            no_trade_conditions: conditions.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn settings() -> UserSettings {
        UserSettings {
            min_rr: dec!(2.0),
            max_risk_percent: dec!(1.0),
            session_volatility_state: senate_models::VolatilityState::Normal,
            regime: senate_models::Regime::Trending,
            instrument: Some("XAUUSD".to_string()),
            timestamp: None,
            news_event_imminent: false,
        }
    }

    #[test]
    fn plan_a_from_a_long_consensus() {
        let analysts = vec![
            analyst(
                Direction::Long,
                KeyLevels {
                    poi: Some(dec!(2620)),
                    invalidation: Some(dec!(2600)),
                    targets: vec![dec!(2660), dec!(2700)],
                },
                &["Abnormal volatility at entry time"],
            ),
            analyst(
                Direction::Long,
                KeyLevels {
                    poi: Some(dec!(2630)),
                    invalidation: Some(dec!(2600)),
                    targets: vec![dec!(2660)],
                },
                &["Abnormal volatility at entry time", "News about to hit"],
            ),
        ];
        let order = build_order(&analysts, &settings(), Direction::Long, None);

        assert_eq!(order.plan_a.entry_model, "Limit at 2625.00000 POI zone");
        assert_eq!(
            order.plan_a.invalidation,
            "2600.00000 — close below invalidates setup"
        );
        assert_eq!(
            order.plan_a.take_profit_logic,
            "TP1 at 2660.00000 (50% exit), TP2 at 2700.00000 (trail remainder to full exit)"
        );
        assert_eq!(order.plan_a.risk_instruction, "Risk 1% of account");
        assert_eq!(
            order.plan_a.do_not_trade_if,
            vec!["Abnormal volatility at entry time", "News about to hit"]
        );
        assert!(order.plan_a.trigger.is_none());
        assert!(order.plan_b.is_none());
    }

    #[test]
    fn short_targets_are_ordered_downward() {
        let analysts = vec![analyst(
            Direction::Short,
            KeyLevels {
                poi: Some(dec!(2620)),
                invalidation: Some(dec!(2640)),
                targets: vec![dec!(2520), dec!(2560)],
            },
            &[],
        )];
        let order = build_order(&analysts, &settings(), Direction::Short, None);
        assert_eq!(
            order.plan_a.take_profit_logic,
            "TP1 at 2560.00000 (50% exit), TP2 at 2520.00000 (trail remainder to full exit)"
        );
        assert_eq!(
            order.plan_a.invalidation,
            "2640.00000 — close above invalidates setup"
        );
    }

    #[test]
    fn single_target_and_missing_levels() {
        let one_target = vec![analyst(
            Direction::Long,
            KeyLevels {
                poi: Some(dec!(2620)),
                invalidation: Some(dec!(2600)),
                targets: vec![dec!(2660)],
            },
            &[],
        )];
        let order = build_order(&one_target, &settings(), Direction::Long, None);
        assert_eq!(
            order.plan_a.take_profit_logic,
            "Single target at 2660.00000 — full exit"
        );

        let bare = vec![analyst(
            Direction::Long,
            KeyLevels {
                poi: None,
                invalidation: None,
                targets: vec![],
            },
            &[],
        )];
        let order = build_order(&bare, &settings(), Direction::Long, None);
        assert_eq!(order.plan_a.entry_model, "Limit at TBD POI zone");
        assert_eq!(
            order.plan_a.take_profit_logic,
            "Targets TBD — derived from structure"
        );
    }

    #[test]
    fn only_directional_analysts_contribute_levels() {
        let analysts = vec![
            analyst(
                Direction::Long,
                KeyLevels {
                    poi: Some(dec!(2620)),
                    invalidation: Some(dec!(2600)),
                    targets: vec![dec!(2660)],
                },
                &[],
            ),
            analyst(
                Direction::Wait,
                KeyLevels {
                    poi: Some(dec!(1000)),
                    invalidation: Some(dec!(990)),
                    targets: vec![dec!(1100)],
                },
                &["stand aside"],
            ),
        ];
        let order = build_order(&analysts, &settings(), Direction::Long, None);
        assert_eq!(order.plan_a.entry_model, "Limit at 2620.00000 POI zone");
        assert_eq!(
            order.plan_a.take_profit_logic,
            "Single target at 2660.00000 — full exit"
        );
        // But no-trade conditions come from every analyst, Wait included.
        assert_eq!(order.plan_a.do_not_trade_if, vec!["stand aside"]);
    }

    #[test]
    fn plan_b_arms_on_the_trigger() {
        let analysts = vec![analyst(
            Direction::Long,
            KeyLevels {
                poi: Some(dec!(2620)),
                invalidation: Some(dec!(2600)),
                targets: vec![dec!(2660)],
            },
            &["Abnormal volatility at entry time"],
        )];
        let trigger = "Only Long if: price closes above 2640 on H4";
        let order = build_order(&analysts, &settings(), Direction::Long, Some(trigger));

        let plan_b = order.plan_b.unwrap();
        assert_eq!(plan_b.trigger.as_deref(), Some(trigger));
        assert_eq!(
            plan_b.entry_model,
            "Market / trigger entry on: Only Long if: price closes above 2640 on H4"
        );
        assert_eq!(
            plan_b.invalidation,
            "2600.00000 — reassess after trigger fires"
        );
        assert_eq!(
            plan_b.risk_instruction,
            "Risk 0.50% of account (reduced — conditional entry)"
        );
        assert_eq!(
            plan_b.do_not_trade_if,
            vec![
                "Abnormal volatility at entry time",
                "Trigger does not fire within session window"
            ]
        );
    }
}
