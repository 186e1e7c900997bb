use serde::{Deserialize, Serialize};

/// One feed row: a single (symbol, strike, option type) contract plus the
/// per-symbol columns the scraper repeats on every row.
///
/// Header names match the chain feed exactly. Optional columns may be
/// blank; blank required columns fail row deserialization and the row is
/// skipped, not the run.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChainCsvRow {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "OptionType")]
    pub option_type: String,
    #[serde(rename = "Strike")]
    pub strike: f64,
    #[serde(rename = "Last")]
    pub last: f64,
    #[serde(rename = "Expiry")]
    pub expiry: String,
    #[serde(rename = "CurrentPrice")]
    pub current_price: f64,
    #[serde(rename = "IV", default)]
    pub iv: Option<f64>,
    #[serde(rename = "OI", default)]
    pub oi: Option<f64>,
    #[serde(rename = "ChngOI", default)]
    pub chng_oi: Option<f64>,
    #[serde(rename = "Bid", default)]
    pub bid: Option<f64>,
    #[serde(rename = "Ask", default)]
    pub ask: Option<f64>,
    #[serde(rename = "Support", default)]
    pub support: Option<f64>,
    #[serde(rename = "Resistance", default)]
    pub resistance: Option<f64>,
}
