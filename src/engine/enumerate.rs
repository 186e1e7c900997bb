use std::collections::HashSet;

use crate::model::{ChainSnapshot, OptionQuote, OptionType};

/// Split a symbol's quotes into put and call legs, deduplicated by strike
/// (first quote per strike wins). Quotes with a non-finite strike or last
/// price were already rejected at ingestion; this guards anyway so the
/// enumerator never emits a shell the payoff stage must drop for
/// non-finiteness.
pub fn split_legs(quotes: &[OptionQuote]) -> (Vec<OptionQuote>, Vec<OptionQuote>) {
    let mut puts = Vec::new();
    let mut calls = Vec::new();
    let mut seen_put_strikes: HashSet<u64> = HashSet::new();
    let mut seen_call_strikes: HashSet<u64> = HashSet::new();

    for quote in quotes {
        if !quote.strike.is_finite() || !quote.last.is_finite() {
            continue;
        }
        let key = quote.strike.to_bits();
        match quote.option_type {
            OptionType::Put => {
                if seen_put_strikes.insert(key) {
                    puts.push(quote.clone());
                }
            }
            OptionType::Call => {
                if seen_call_strikes.insert(key) {
                    calls.push(quote.clone());
                }
            }
        }
    }
    (puts, calls)
}

/// Cross-join put and call strikes, keeping only pairs that bracket the
/// underlying: put.strike < underlying < call.strike. A one-sided chain
/// simply yields no pairs.
pub fn enumerate_collars(snapshot: &ChainSnapshot) -> Vec<(OptionQuote, OptionQuote)> {
    let underlying = snapshot.underlying.current_price;
    let (puts, calls) = split_legs(&snapshot.quotes);

    let mut pairs = Vec::new();
    for put in &puts {
        if put.strike >= underlying {
            continue;
        }
        for call in &calls {
            if call.strike <= underlying {
                continue;
            }
            pairs.push((put.clone(), call.clone()));
        }
    }
    pairs
}
