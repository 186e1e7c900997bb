use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{
    CollarCandidate, Metric, RankBy, RankScope, RankedCandidate, ScanPolicy, ScenarioResult,
};

/// The value a candidate exposes for one rankable metric. Absent values
/// (missing OI/IV/book, uncomputable greeks) sort last.
pub fn metric_value(metric: Metric, candidate: &CollarCandidate) -> Option<f64> {
    let p = &candidate.payoff;
    match metric {
        Metric::NetPremium => Some(p.net_premium),
        Metric::Liquidity => p.liquidity,
        Metric::IvSkew => p.iv_diff,
        Metric::BidAskSpread => p.avg_spread,
        Metric::StrikeDistance => p.strike_distance,
        Metric::NetDelta => p.greeks.map(|g| g.net_delta_abs),
        Metric::NetGamma => p.greeks.map(|g| g.net_gamma),
        Metric::NetTheta => p.greeks.map(|g| g.net_theta),
        Metric::NetVega => p.greeks.map(|g| g.net_vega),
    }
}

/// Min-method competition ranking, 1-based. Ties share the lowest
/// eligible rank; absent values sort after every present value and tie
/// with each other.
pub fn min_rank(values: &[Option<f64>], larger_is_better: bool) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| compare(values[a], values[b], larger_is_better));

    let mut ranks = vec![0u32; values.len()];
    let mut current_rank = 1u32;
    for (pos, &idx) in order.iter().enumerate() {
        if pos > 0 {
            let prev = order[pos - 1];
            if compare(values[idx], values[prev], larger_is_better) != Ordering::Equal {
                current_rank = pos as u32 + 1;
            }
        }
        ranks[idx] = current_rank;
    }
    ranks
}

fn compare(a: Option<f64>, b: Option<f64>, larger_is_better: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if larger_is_better { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dense ascending ranking: rank 1 for the smallest value, equal values
/// share a rank, no gaps.
pub fn dense_rank_asc(values: &[f64]) -> Vec<u32> {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted.dedup();
    values
        .iter()
        .map(|v| {
            let pos = sorted
                .iter()
                .position(|s| s == v)
                .unwrap_or(sorted.len().saturating_sub(1));
            pos as u32 + 1
        })
        .collect()
}

/// Rank the filtered survivors per the policy and return them grouped by
/// symbol (first-seen order), rank-ascending within each group.
pub fn rank_candidates(
    policy: &ScanPolicy,
    survivors: Vec<(CollarCandidate, ScenarioResult)>,
) -> Vec<RankedCandidate> {
    let n = survivors.len();
    let groups = scope_groups(policy.rank_scope, &survivors);

    let mut metric_ranks: Vec<Vec<(Metric, u32)>> = vec![Vec::new(); n];
    let mut weighted_total: Vec<Option<f64>> = vec![None; n];
    let mut final_rank = vec![0u32; n];

    for group in &groups {
        match policy.rank_by {
            RankBy::Weighted => {
                let active: Vec<(Metric, f64)> = policy
                    .metric_weights
                    .iter()
                    .filter(|(_, w)| **w > 0.0)
                    .map(|(m, w)| (*m, *w))
                    .collect();
                let total_weight: f64 = active.iter().map(|(_, w)| w).sum();

                let mut scores = vec![0.0f64; group.len()];
                for (metric, weight) in &active {
                    let values: Vec<Option<f64>> = group
                        .iter()
                        .map(|&i| metric_value(*metric, &survivors[i].0))
                        .collect();
                    let ranks = min_rank(&values, metric.larger_is_better());
                    for (j, &i) in group.iter().enumerate() {
                        metric_ranks[i].push((*metric, ranks[j]));
                        scores[j] += weight / total_weight * f64::from(ranks[j]);
                    }
                }

                let dense = dense_rank_asc(&scores);
                for (j, &i) in group.iter().enumerate() {
                    weighted_total[i] = Some(scores[j]);
                    final_rank[i] = dense[j];
                }
            }
            RankBy::CompleteTotal => {
                // Larger round-trip P&L is better; min-method on the
                // descending order, as the original round-trip scan did.
                let values: Vec<Option<f64>> = group
                    .iter()
                    .map(|&i| Some(survivors[i].1.complete_total_pl_pct))
                    .collect();
                let ranks = min_rank(&values, true);
                for (j, &i) in group.iter().enumerate() {
                    final_rank[i] = ranks[j];
                }
            }
        }
    }

    let mut symbol_order: Vec<String> = Vec::new();
    for (candidate, _) in &survivors {
        if !symbol_order.contains(&candidate.symbol) {
            symbol_order.push(candidate.symbol.clone());
        }
    }
    let symbol_pos: HashMap<&str, usize> = symbol_order
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut out: Vec<RankedCandidate> = survivors
        .into_iter()
        .enumerate()
        .map(|(i, (candidate, scenario))| RankedCandidate {
            candidate,
            scenario,
            metric_ranks: std::mem::take(&mut metric_ranks[i]),
            weighted_total: weighted_total[i],
            rank: final_rank[i],
        })
        .collect();

    out.sort_by(|a, b| {
        let ga = symbol_pos[a.candidate.symbol.as_str()];
        let gb = symbol_pos[b.candidate.symbol.as_str()];
        ga.cmp(&gb).then(a.rank.cmp(&b.rank))
    });
    out
}

fn scope_groups(
    scope: RankScope,
    survivors: &[(CollarCandidate, ScenarioResult)],
) -> Vec<Vec<usize>> {
    match scope {
        RankScope::Global => vec![(0..survivors.len()).collect()],
        RankScope::PerSymbol => {
            let mut order: Vec<&str> = Vec::new();
            let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, (candidate, _)) in survivors.iter().enumerate() {
                let symbol = candidate.symbol.as_str();
                if !groups.contains_key(symbol) {
                    order.push(symbol);
                }
                groups.entry(symbol).or_default().push(i);
            }
            order
                .into_iter()
                .map(|s| groups.remove(s).unwrap_or_default())
                .collect()
        }
    }
}
