use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rankable candidate metric. Direction (whether smaller or larger is
/// better) is fixed per metric, not configurable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Net premium paid (put last - call last); smaller is better.
    NetPremium,
    /// Combined open interest of both legs; larger is better.
    Liquidity,
    /// call IV - put IV; larger is better.
    IvSkew,
    /// Average relative bid/ask spread; smaller is better.
    BidAskSpread,
    /// Distance of the strikes from support/resistance; smaller is better.
    StrikeDistance,
    /// |net delta|; smaller is better.
    NetDelta,
    /// Net gamma; smaller is better.
    NetGamma,
    /// Net theta; smaller is better.
    NetTheta,
    /// Net vega; smaller is better.
    NetVega,
}

impl Metric {
    /// True when a larger value should rank first.
    pub fn larger_is_better(self) -> bool {
        matches!(self, Metric::Liquidity | Metric::IvSkew)
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::NetPremium => "net_prem",
            Metric::Liquidity => "liquidity",
            Metric::IvSkew => "iv_diff",
            Metric::BidAskSpread => "avg_spread",
            Metric::StrikeDistance => "strike_distance",
            Metric::NetDelta => "net_delta_abs",
            Metric::NetGamma => "net_gamma",
            Metric::NetTheta => "net_theta",
            Metric::NetVega => "net_vega",
        }
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    pub lo: f64,
    pub hi: f64,
}

impl Bounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Candidate admission rules. Every check is inclusive and independent:
/// failing any one excludes the candidate outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilterRules {
    /// Upper bound on net premium as % of the underlying.
    pub net_premium_max_pct: f64,
    /// Allowed max-loss band (% of underlying).
    pub max_loss_range: Bounds,
    /// Allowed max-profit band (% of underlying).
    pub max_profit_range: Bounds,
    /// max_profit_pct - max_loss_pct must be at least this.
    pub profit_minus_loss_min: f64,
    /// move_call_pct - move_put_pct must be at least this, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_put_move_diff_min: Option<f64>,
    /// Require net_premium_pct < diff_pct (premium cheap relative to the
    /// strike spread).
    #[serde(default)]
    pub require_premium_below_diff: bool,
}

/// How survivors are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    /// Weighted sum of per-metric min-method ranks, ascending.
    Weighted,
    /// Complete round-trip scenario P&L, descending.
    CompleteTotal,
}

/// Whether ranks are assigned across the whole filtered set or within
/// each symbol's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankScope {
    Global,
    PerSymbol,
}

/// Full scan configuration: filter bounds, scenario grid, ranking weights.
///
/// Weights need not sum to 1 — they are normalized at use. The named
/// presets reproduce the historically used configurations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScanPolicy {
    pub name: String,
    pub filter: FilterRules,
    /// Signed percentage moves, e.g. [-4, -3, -2, -1, 1, 2, 3, 4].
    pub scenario_move_grid: Vec<f64>,
    /// metric -> non-negative weight. Ignored under complete_total ranking.
    pub metric_weights: BTreeMap<Metric, f64>,
    pub rank_by: RankBy,
    pub rank_scope: RankScope,
    /// Annualized risk-free rate, percent.
    pub risk_free_rate: f64,
}

/// The default ±1%..±4% grid used by every preset.
pub fn default_move_grid() -> Vec<f64> {
    vec![-4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0]
}

const DEFAULT_RISK_FREE_RATE: f64 = 6.75;

impl ScanPolicy {
    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        Self::presets().into_iter().find(|p| p.name == name)
    }

    /// All built-in presets, each one an observed scan configuration.
    pub fn presets() -> Vec<Self> {
        vec![
            Self::balanced(),
            Self::greeks(),
            Self::zero_cost(),
            Self::round_trip(),
        ]
    }

    /// Five-metric weighted scan: cheap premium, deep liquidity, tight
    /// spreads, strikes near support/resistance.
    pub fn balanced() -> Self {
        let weights = BTreeMap::from([
            (Metric::NetPremium, 0.25),
            (Metric::Liquidity, 0.25),
            (Metric::IvSkew, 0.15),
            (Metric::BidAskSpread, 0.20),
            (Metric::StrikeDistance, 0.15),
        ]);
        Self {
            name: "balanced".to_string(),
            filter: FilterRules {
                net_premium_max_pct: 0.5,
                max_loss_range: Bounds::new(0.0, 7.0),
                max_profit_range: Bounds::new(3.0, 20.0),
                profit_minus_loss_min: -3.0,
                call_put_move_diff_min: Some(-3.0),
                require_premium_below_diff: true,
            },
            scenario_move_grid: default_move_grid(),
            metric_weights: weights,
            rank_by: RankBy::Weighted,
            rank_scope: RankScope::Global,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Nine-metric scan that folds in Black-Scholes sensitivities; the
    /// tighter profit band suits hedged weekly positions.
    pub fn greeks() -> Self {
        let weights = BTreeMap::from([
            (Metric::NetPremium, 0.20),
            (Metric::Liquidity, 0.20),
            (Metric::IvSkew, 0.15),
            (Metric::BidAskSpread, 0.15),
            (Metric::StrikeDistance, 0.15),
            (Metric::NetDelta, 0.15),
            (Metric::NetGamma, 0.05),
            (Metric::NetTheta, 0.05),
            (Metric::NetVega, 0.05),
        ]);
        Self {
            name: "greeks".to_string(),
            filter: FilterRules {
                net_premium_max_pct: 0.5,
                max_loss_range: Bounds::new(0.0, 7.0),
                max_profit_range: Bounds::new(3.0, 10.0),
                profit_minus_loss_min: -3.0,
                call_put_move_diff_min: Some(-3.0),
                require_premium_below_diff: true,
            },
            scenario_move_grid: default_move_grid(),
            metric_weights: weights,
            rank_by: RankBy::Weighted,
            rank_scope: RankScope::Global,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Credit-or-free collars only: net premium must be zero or negative,
    /// ordered purely by cheapest premium.
    pub fn zero_cost() -> Self {
        let weights = BTreeMap::from([(Metric::NetPremium, 1.0)]);
        Self {
            name: "zero-cost".to_string(),
            filter: FilterRules {
                net_premium_max_pct: 0.0,
                max_loss_range: Bounds::new(0.0, 7.0),
                max_profit_range: Bounds::new(3.0, 20.0),
                profit_minus_loss_min: -3.0,
                call_put_move_diff_min: Some(-3.0),
                require_premium_below_diff: true,
            },
            scenario_move_grid: default_move_grid(),
            metric_weights: weights,
            rank_by: RankBy::Weighted,
            rank_scope: RankScope::Global,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Looser bounds, ranked by round-trip scenario P&L instead of the
    /// weighted score.
    pub fn round_trip() -> Self {
        Self {
            name: "round-trip".to_string(),
            filter: FilterRules {
                net_premium_max_pct: 0.5,
                max_loss_range: Bounds::new(0.0, 9.0),
                max_profit_range: Bounds::new(3.0, 15.0),
                profit_minus_loss_min: -3.0,
                call_put_move_diff_min: None,
                require_premium_below_diff: false,
            },
            scenario_move_grid: default_move_grid(),
            metric_weights: BTreeMap::new(),
            rank_by: RankBy::CompleteTotal,
            rank_scope: RankScope::Global,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self::balanced()
    }
}
