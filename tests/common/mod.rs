use chrono::NaiveDate;

use collar_scan::engine::payoff;
use collar_scan::model::{
    ChainSnapshot, CollarCandidate, OptionQuote, OptionType, UnderlyingSnapshot,
};

/// Bare quote: no book, no OI, no IV, no expiry.
pub fn quote(option_type: OptionType, strike: f64, last: f64) -> OptionQuote {
    OptionQuote {
        symbol: "NIFTY".to_string(),
        option_type,
        strike,
        last,
        bid: None,
        ask: None,
        open_interest: None,
        change_in_open_interest: None,
        implied_volatility: None,
        expiry: None,
    }
}

pub fn put(strike: f64, last: f64) -> OptionQuote {
    quote(OptionType::Put, strike, last)
}

pub fn call(strike: f64, last: f64) -> OptionQuote {
    quote(OptionType::Call, strike, last)
}

pub fn snapshot(current_price: f64, quotes: Vec<OptionQuote>) -> ChainSnapshot {
    ChainSnapshot {
        underlying: UnderlyingSnapshot {
            symbol: "NIFTY".to_string(),
            current_price,
            support_strike: None,
            resistance_strike: None,
        },
        quotes,
    }
}

/// Candidate with primary metrics only, built through the payoff stage.
pub fn candidate(
    underlying: f64,
    put_strike: f64,
    put_last: f64,
    call_strike: f64,
    call_last: f64,
) -> CollarCandidate {
    let snap = snapshot(underlying, vec![]);
    payoff::compute(
        &snap.underlying,
        &put(put_strike, put_last),
        &call(call_strike, call_last),
        None,
    )
    .expect("primary metrics must compute")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
