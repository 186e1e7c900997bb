use serde::{Deserialize, Serialize};

use super::policy::Metric;
use super::quote::OptionQuote;

/// Black-Scholes net sensitivities for a collar (long put + short call).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetGreeks {
    /// |put_delta - call_delta|.
    pub net_delta_abs: f64,
    /// Gamma is strike-symmetric between put and call; the put leg's value.
    pub net_gamma: f64,
    /// put_theta - call_theta, per calendar day.
    pub net_theta: f64,
    /// Vega per 1% IV move; the put leg's value.
    pub net_vega: f64,
}

/// Derived payoff metrics for one (put, call) pairing.
///
/// The core fields are always finite — a pairing whose primary metrics
/// cannot be computed is never materialized. Secondary metrics are
/// `Option` and absent values sort last during ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payoff {
    pub net_premium: f64,
    pub net_premium_pct: f64,
    pub max_loss_pct: f64,
    pub max_profit_pct: f64,
    pub move_put_pct: f64,
    pub move_call_pct: f64,
    pub diff_pct: f64,
    pub risk_pct: f64,
    /// put OI + call OI.
    pub liquidity: Option<f64>,
    /// call IV - put IV.
    pub iv_diff: Option<f64>,
    /// Mean of the two legs' (ask - bid) / last; absent when either leg
    /// has no bid/ask or a zero last price.
    pub avg_spread: Option<f64>,
    /// |put_strike - support| + |call_strike - resistance|.
    pub strike_distance: Option<f64>,
    pub greeks: Option<NetGreeks>,
}

/// One admissible collar: put.strike < underlying < call.strike holds by
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollarCandidate {
    pub symbol: String,
    pub underlying_price: f64,
    pub put: OptionQuote,
    pub call: OptionQuote,
    pub payoff: Payoff,
}

/// Scenario P&L across the configured move grid, for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// (signed move %, realized collar P&L %) in grid order.
    pub moves: Vec<(f64, f64)>,
    /// Paired up/down round-trip aggregate (see engine::scenario).
    pub complete_total_pl_pct: f64,
}

/// A candidate that survived filtering, with its final rank attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: CollarCandidate,
    pub scenario: ScenarioResult,
    /// Per-metric min-method ranks (weighted mode only).
    pub metric_ranks: Vec<(Metric, u32)>,
    /// Weighted composite score (weighted mode only).
    pub weighted_total: Option<f64>,
    /// Dense, 1-based; scope (global vs per-symbol) is set by the policy.
    pub rank: u32,
}
