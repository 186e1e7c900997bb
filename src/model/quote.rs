use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the chain a contract sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    Put,
    Call,
}

/// One exchange-listed contract, as parsed from the chain feed.
///
/// `last` is the traded premium used for all payoff math. Bid/ask, open
/// interest and IV are optional — metrics that need them go absent (and
/// rank last) rather than failing the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    pub symbol: String,
    pub option_type: OptionType,
    pub strike: f64,
    pub last: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub open_interest: Option<f64>,
    pub change_in_open_interest: Option<f64>,
    /// Implied volatility as a percentage (e.g. 22.5).
    pub implied_volatility: Option<f64>,
    /// None when the feed's expiry string did not parse; greeks are
    /// skipped for such legs instead of dropping them.
    pub expiry: Option<NaiveDate>,
}

/// Per-symbol state derived once before enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderlyingSnapshot {
    pub symbol: String,
    pub current_price: f64,
    /// Strike with the maximum put open interest (expected floor).
    pub support_strike: Option<f64>,
    /// Strike with the maximum call open interest (expected ceiling).
    pub resistance_strike: Option<f64>,
}

/// Everything the engine needs for one symbol: the underlying snapshot
/// plus the full quote set for one run.
#[derive(Debug, Clone)]
pub struct ChainSnapshot {
    pub underlying: UnderlyingSnapshot,
    pub quotes: Vec<OptionQuote>,
}
