//! Quorum check: is there enough directional conviction to proceed?

use senate_models::{AnalystOutput, UserSettings, VolatilityState};

use crate::ballot::VoteTally;
use crate::matcher;

/// A no-trade condition is fatal when it names the state the session is
/// actually in: abnormal-volatility phrasing while volatility is Abnormal,
/// or news phrasing while a news event is imminent.
pub fn has_fatal_no_trade_condition(
    analysts: &[AnalystOutput],
    settings: &UserSettings,
) -> bool {
    let abnormal = settings.session_volatility_state == VolatilityState::Abnormal;
    analysts
        .iter()
        .flat_map(|a| a.no_trade_conditions.iter())
        .any(|condition| {
            (abnormal && matcher::mentions_abnormal_volatility(condition))
                || (settings.news_event_imminent && matcher::mentions_news_event(condition))
        })
}

/// Two directional votes always carry quorum. A single directional vote
/// carries it only when no fatal condition is armed.
pub fn quorum_passed(tally: &VoteTally, fatal_condition: bool) -> bool {
    tally.directional() >= 2 || (tally.directional() == 1 && !fatal_condition)
}
