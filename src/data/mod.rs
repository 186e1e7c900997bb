pub mod csv_types;
pub mod resolve;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::{ChainSnapshot, OptionQuote, OptionType, UnderlyingSnapshot};
use csv_types::ChainCsvRow;

/// Ingestion counters, reported under --verbose.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadStats {
    pub rows: usize,
    pub skipped_rows: usize,
    pub symbols: usize,
    pub skipped_symbols: usize,
}

/// Load and group a chain feed CSV. Malformed rows and symbols with an
/// unusable current price are skipped and counted; they never abort the
/// run.
pub fn load_chain(path: &Path) -> Result<(Vec<ChainSnapshot>, LoadStats)> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening chain CSV {}", path.display()))?;
    Ok(load_chain_from(reader))
}

/// Same as [`load_chain`] but over any reader (used by tests).
pub fn load_chain_reader<R: Read>(reader: R) -> (Vec<ChainSnapshot>, LoadStats) {
    load_chain_from(csv::Reader::from_reader(reader))
}

fn load_chain_from<R: Read>(mut reader: csv::Reader<R>) -> (Vec<ChainSnapshot>, LoadStats) {
    let mut stats = LoadStats::default();
    // First-seen symbol order is preserved through to the report.
    let mut order: Vec<String> = Vec::new();
    let mut by_symbol: HashMap<String, Vec<ChainCsvRow>> = HashMap::new();

    for record in reader.deserialize::<ChainCsvRow>() {
        stats.rows += 1;
        let row = match record {
            Ok(row) => row,
            Err(_) => {
                // Required column blank or non-numeric.
                stats.skipped_rows += 1;
                continue;
            }
        };
        if !by_symbol.contains_key(&row.symbol) {
            order.push(row.symbol.clone());
        }
        by_symbol.entry(row.symbol.clone()).or_default().push(row);
    }

    let mut snapshots = Vec::new();
    for symbol in order {
        let rows = by_symbol.remove(&symbol).unwrap_or_default();
        match build_snapshot(&symbol, rows, &mut stats) {
            Some(snapshot) => {
                stats.symbols += 1;
                snapshots.push(snapshot);
            }
            None => stats.skipped_symbols += 1,
        }
    }
    (snapshots, stats)
}

fn build_snapshot(
    symbol: &str,
    rows: Vec<ChainCsvRow>,
    stats: &mut LoadStats,
) -> Option<ChainSnapshot> {
    let current_price = rows.first().map(|r| r.current_price)?;
    if !current_price.is_finite() || current_price <= 0.0 {
        return None;
    }

    // The scraper repeats Support/Resistance on every row when it emits
    // them at all.
    let feed_support = rows.iter().find_map(|r| r.support);
    let feed_resistance = rows.iter().find_map(|r| r.resistance);

    let mut quotes = Vec::new();
    for row in &rows {
        match build_quote(symbol, row) {
            Some(quote) => quotes.push(quote),
            None => stats.skipped_rows += 1,
        }
    }

    let support_strike = feed_support.or_else(|| max_oi_strike(&quotes, OptionType::Put));
    let resistance_strike = feed_resistance.or_else(|| max_oi_strike(&quotes, OptionType::Call));

    Some(ChainSnapshot {
        underlying: UnderlyingSnapshot {
            symbol: symbol.to_string(),
            current_price,
            support_strike,
            resistance_strike,
        },
        quotes,
    })
}

fn build_quote(symbol: &str, row: &ChainCsvRow) -> Option<OptionQuote> {
    let option_type = parse_option_type(&row.option_type)?;
    if !row.strike.is_finite() || row.strike <= 0.0 {
        return None;
    }
    if !row.last.is_finite() || row.last < 0.0 {
        return None;
    }
    Some(OptionQuote {
        symbol: symbol.to_string(),
        option_type,
        strike: row.strike,
        last: row.last,
        bid: row.bid.filter(|v| v.is_finite()),
        ask: row.ask.filter(|v| v.is_finite()),
        open_interest: row.oi.filter(|v| v.is_finite() && *v >= 0.0),
        change_in_open_interest: row.chng_oi.filter(|v| v.is_finite()),
        implied_volatility: row.iv.filter(|v| v.is_finite() && *v > 0.0),
        expiry: parse_expiry(&row.expiry),
    })
}

fn parse_option_type(s: &str) -> Option<OptionType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "call" | "ce" => Some(OptionType::Call),
        "put" | "pe" => Some(OptionType::Put),
        _ => None,
    }
}

/// The feed writes `26-Jun-2025`; accept ISO as well.
pub fn parse_expiry(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d-%b-%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Strike carrying the maximum open interest on one side of the chain.
/// Used as the support (puts) / resistance (calls) proxy when the feed
/// does not provide them.
pub fn max_oi_strike(quotes: &[OptionQuote], side: OptionType) -> Option<f64> {
    quotes
        .iter()
        .filter(|q| q.option_type == side)
        .filter_map(|q| q.open_interest.map(|oi| (q.strike, oi)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(strike, _)| strike)
}
