//! Property tests for deliberation invariants.
//!
//! Uses proptest to verify:
//! 1. Totality: any JSON payload yields a decision, never a panic
//! 2. Dissent: present on every non-procedural ruling
//! 3. Reason discipline: `reason` appears only on the named failure exits
//! 4. Order presence: orders exist exactly on TRADE and CONDITIONAL
//! 5. Procedural failures: carry a reason and nothing else

use proptest::prelude::*;
use rust_decimal::Decimal;
use senate_arbiter::{deliberate, deliberate_value};
use senate_models::{
    AnalystOutput, Direction, KeyLevels, Regime, Ruling, UserSettings, VolatilityState,
};
use serde_json::Value;

// ── Strategies (proptest) ────────────────────────────────────────────

const AGENTS: &[&str] = &[
    "TechnicalAnalyst",
    "MacroContextAnalyst",
    "RiskAnalyst",
    "FlowAnalyst",
];

const CLAIMS: &[&str] = &[
    "H4 demand zone held on the retest",
    "D1 closed bullish above structure",
    "M15 BOS confirmed to the upside",
    "DXY strength caps the upside",
    "Expecting a sweep of the prior low",
    "",
];

const TAGS: &[&str] = &[
    "H4-demand-zone",
    "D1-HTF-bullish-close",
    "M15-BOS-confirmed",
    "DXY-strength",
    "H1-range-high",
];

const SCENARIOS: &[&str] = &[
    "Pullback to H4 demand zone before continuation higher",
    "Short from resistance after a confirmed bearish close",
    "No clean setup while the range holds",
    "Waiting for a liquidity sweep of the prior low",
    "Price drifts with no view either way",
    "",
];

const ALTERNATIVES: &[&str] = &[
    "If price closes above 2640, the bearish case is invalid",
    "Structure looks confused here",
    "Fails on a D1 close back below the level",
    "",
];

const UNCERTAINTIES: &[&str] = &[
    "LTF momentum not fully aligned",
    "Spread conditions unclear into the open",
    "",
];

const CONDITIONS: &[&str] = &[
    "Abnormal volatility at entry time",
    "News event fires before trigger",
    "Spread widens past 30 cents",
    "",
];

const REGIMES: &[&str] = &["Trending", "Ranging", "Choppy", "Breakout-Watch"];
const VOLATILITY: &[&str] = &["Normal", "Elevated", "Abnormal", "Thin"];

fn arb_price() -> impl Strategy<Value = Decimal> {
    // 2000.00 to 3000.00 in cents.
    (200_000i64..300_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Long),
        Just(Direction::Short),
        Just(Direction::Wait),
    ]
}

prop_compose! {
    fn arb_analyst()(
        agent_id in prop::sample::select(AGENTS),
        direction in arb_direction(),
        claims in prop::collection::vec(prop::sample::select(CLAIMS), 0..4),
        tags in prop::collection::vec(prop::sample::select(TAGS), 0..4),
        poi in prop::option::of(arb_price()),
        invalidation in prop::option::of(arb_price()),
        targets in prop::collection::vec(arb_price(), 0..3),
        primary in prop::sample::select(SCENARIOS),
        alternative in prop::sample::select(ALTERNATIVES),
        confidence in (0u32..=100).prop_map(Decimal::from),
        uncertainty in prop::sample::select(UNCERTAINTIES),
        conditions in prop::collection::vec(prop::sample::select(CONDITIONS), 0..3),
    ) -> AnalystOutput {
        AnalystOutput {
            agent_id: agent_id.to_string(),
            direction,
            claims: claims.into_iter().map(str::to_string).collect(),
            evidence_tags: tags.into_iter().map(str::to_string).collect(),
            key_levels: KeyLevels { poi, invalidation, targets },
            primary_scenario: primary.to_string(),
            alternative_scenario: alternative.to_string(),
            confidence,
            uncertainty_reason: uncertainty.to_string(),
            no_trade_conditions: conditions.into_iter().map(str::to_string).collect(),
        }
    }
}

prop_compose! {
    fn arb_settings()(
        min_rr in (10i64..40).prop_map(|tenths| Decimal::new(tenths, 1)),
        max_risk in (25i64..200).prop_map(|cents| Decimal::new(cents, 2)),
        volatility in prop::sample::select(VOLATILITY),
        regime in prop::sample::select(REGIMES),
        news in any::<bool>(),
    ) -> UserSettings {
        UserSettings {
            min_rr,
            max_risk_percent: max_risk,
            session_volatility_state: VolatilityState::from(volatility.to_string()),
            regime: Regime::from(regime.to_string()),
            instrument: Some("XAUUSD".to_string()),
            timestamp: Some("2026-02-26T09:00:00Z".to_string()),
            news_event_imminent: news,
        }
    }
}

/// Arbitrary JSON values, shallow enough to keep cases readable.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000).prop_map(Value::from),
        "[a-zA-Z0-9 -]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::hash_map("[a-zA-Z]{1,10}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

// ── 1. Totality ──────────────────────────────────────────────────────

proptest! {
    /// Any JSON in, one decision out. Malformed payloads become
    /// PROCEDURAL_FAIL rulings, never panics, and every decision
    /// serializes cleanly.
    #[test]
    fn any_json_payload_yields_a_decision(
        payload in arb_json(),
        settings in arb_json(),
    ) {
        let decision = deliberate_value(&payload, &settings);

        prop_assert!(decision.confidence <= 100);
        if decision.ruling == Ruling::ProceduralFail {
            prop_assert!(decision.reason.is_some());
            prop_assert!(decision.dissent.is_none());
        } else {
            prop_assert!(decision.dissent.is_some());
        }

        let json = serde_json::to_string(&decision).unwrap();
        let parsed: senate_models::Decision = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.ruling, decision.ruling);
    }
}

// ── 2-4. Well-formed benches ─────────────────────────────────────────

proptest! {
    /// A non-empty bench of well-formed opinions never fails
    /// procedurally, and the record mirrors the bench and the ruling.
    #[test]
    fn well_formed_benches_never_fail_procedurally(
        analysts in prop::collection::vec(arb_analyst(), 1..5),
        settings in arb_settings(),
    ) {
        let decision = deliberate(&analysts, &settings);

        prop_assert_ne!(decision.ruling, Ruling::ProceduralFail);
        prop_assert!(decision.confidence <= 100);
        prop_assert!(decision.dissent.is_some());

        let record = decision.senate_record.as_ref().unwrap();
        prop_assert_eq!(record.motions.len(), analysts.len());
        prop_assert_eq!(record.ruling, decision.ruling);
        prop_assert!(record.evidence_ledger.len() <= 5);
    }

    /// `reason` appears only on the two consensus failure exits, and
    /// only ever with a NO_TRADE ruling.
    #[test]
    fn reason_is_reserved_for_consensus_failures(
        analysts in prop::collection::vec(arb_analyst(), 1..5),
        settings in arb_settings(),
    ) {
        let decision = deliberate(&analysts, &settings);

        if let Some(reason) = decision.reason.as_deref() {
            prop_assert_eq!(decision.ruling, Ruling::NoTrade);
            prop_assert!(
                reason == "Quorum not met" || reason == "Unresolvable direction conflict",
                "unexpected reason: {}",
                reason
            );
        }
    }

    /// Orders exist exactly on TRADE and CONDITIONAL rulings, and the
    /// conditional trigger travels with CONDITIONAL alone.
    #[test]
    fn orders_and_triggers_track_the_ruling(
        analysts in prop::collection::vec(arb_analyst(), 1..5),
        settings in arb_settings(),
    ) {
        let decision = deliberate(&analysts, &settings);

        match decision.ruling {
            Ruling::Trade => {
                let order = decision.order.as_ref().unwrap();
                prop_assert!(order.plan_b.is_none());
                prop_assert!(decision.conditional_trigger.is_none());
                prop_assert!(decision.veto_reason.is_none());
            }
            Ruling::Conditional => {
                let order = decision.order.as_ref().unwrap();
                prop_assert!(order.plan_b.is_some());
                prop_assert!(decision.conditional_trigger.is_some());
            }
            Ruling::NoTrade => {
                prop_assert!(decision.order.is_none());
                prop_assert!(decision.conditional_trigger.is_none());
            }
            Ruling::ProceduralFail => prop_assert!(false, "typed input cannot fail procedurally"),
        }
    }
}

// ── 5. Procedural failures ───────────────────────────────────────────

proptest! {
    /// Removing any single required field voids the deliberation with a
    /// reason and an otherwise empty decision.
    #[test]
    fn dropping_any_required_field_is_procedural(
        analyst in arb_analyst(),
        field_idx in 0usize..10,
        settings in arb_settings(),
    ) {
        const FIELDS: [&str; 10] = [
            "agentId",
            "direction",
            "claims",
            "evidenceTags",
            "keyLevels",
            "primaryScenario",
            "alternativeScenario",
            "confidence",
            "uncertaintyReason",
            "noTradeConditions",
        ];

        let mut element = serde_json::to_value(&analyst).unwrap();
        element.as_object_mut().unwrap().remove(FIELDS[field_idx]);
        let payload = Value::Array(vec![element]);
        let settings_value = serde_json::to_value(&settings).unwrap();

        let decision = deliberate_value(&payload, &settings_value);

        prop_assert_eq!(decision.ruling, Ruling::ProceduralFail);
        prop_assert_eq!(decision.confidence, 0);
        prop_assert!(decision.reason.is_some());
        prop_assert!(decision.senate_record.is_none());
        prop_assert!(decision.order.is_none());
        prop_assert!(decision.dissent.is_none());
        prop_assert!(decision.veto_reason.is_none());
        prop_assert!(decision.conditional_trigger.is_none());
    }
}
