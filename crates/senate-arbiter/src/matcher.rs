//! Phrase and citation matchers used across deliberation steps.
//!
//! Every free-text check the arbiter performs (conditional language in a
//! dissenter's scenario, timeframe citations in evidence tags, fatal
//! no-trade phrasing) is defined here so the patterns can be reviewed and
//! tested in one place rather than scattered through the pipeline.

use std::sync::LazyLock;

use regex::Regex;

static CONDITIONAL_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bif\b|\bwhen\b|\bonce\b|\bwait\b|\btrigger\b|\bbreaks?\b|\bretests?\b|\bconfirm|\babove\b|\bbelow\b|\bclos(e|ed|ing)\b",
    )
    .expect("valid conditional phrase regex")
});

static HTF_CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(D1?|W1?|H4|4H|HTF|daily|weekly|monthly)\b")
        .expect("valid timeframe citation regex")
});

static CLOSE_CONFIRMATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(clos(e|ed|ing))\b").expect("valid close regex"));

static ABNORMAL_VOLATILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)abnormal|extreme.?volat|spike").expect("valid volatility regex"));

static NEWS_EVENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnews\b|\bevent\b|\bannouncement\b|\bfomc\b|\bcpi\b|\bnfp\b")
        .expect("valid news regex")
});

static SETUP_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)pullback|breakout|reversal|range|sweep|retest|break|momentum|fvg|orderblock|poi|structure|bos|mss|liquidity",
    )
    .expect("valid setup keyword regex")
});

static ANTICIPATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\banticipat|\bahead of\b|\bexpecting\b|\bwait(ing)? for\b")
        .expect("valid anticipation regex")
});

static CONFIRMATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bconfirm(ed|ation)?\b|\bclosed?\b|\bbroken?\b|\breclaim(ed)?\b")
        .expect("valid confirmation regex")
});

static FAILURE_LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fail|invalid|break|reject|reverse").expect("valid failure regex"));

/// True if a dissenter's alternative scenario reads as a conditional
/// ("only valid if X happens") rather than a flat disagreement.
pub fn has_conditional_phrase(scenario: &str) -> bool {
    CONDITIONAL_PHRASE_RE.is_match(scenario)
}

/// True if an evidence tag cites a higher timeframe (D1/W1/H4 and friends).
pub fn is_htf_citation(tag: &str) -> bool {
    HTF_CITATION_RE.is_match(tag)
}

/// True if an evidence tag cites a close-based confirmation.
pub fn is_close_confirmation(tag: &str) -> bool {
    CLOSE_CONFIRMATION_RE.is_match(tag)
}

/// True if a no-trade condition describes abnormal or spiking volatility.
pub fn mentions_abnormal_volatility(condition: &str) -> bool {
    ABNORMAL_VOLATILITY_RE.is_match(condition)
}

/// True if a no-trade condition references a scheduled news event.
pub fn mentions_news_event(condition: &str) -> bool {
    NEWS_EVENT_RE.is_match(condition)
}

/// True if a primary scenario names a recognized setup type.
pub fn has_setup_keyword(scenario: &str) -> bool {
    SETUP_KEYWORD_RE.is_match(scenario)
}

/// True if the analyst's language anticipates a move that has not happened yet.
pub fn has_anticipation_language(text: &str) -> bool {
    ANTICIPATION_RE.is_match(text)
}

/// True if the analyst's language cites a completed confirmation.
pub fn has_confirmation_language(text: &str) -> bool {
    CONFIRMATION_RE.is_match(text)
}

/// True if an alternative scenario describes the setup failing.
pub fn has_failure_language(scenario: &str) -> bool {
    FAILURE_LANGUAGE_RE.is_match(scenario)
}
