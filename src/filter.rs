use crate::model::{CollarCandidate, FilterRules};

/// Does a candidate's payoff satisfy every rule? All bound checks are
/// inclusive; there is no partial credit.
pub fn passes(rules: &FilterRules, candidate: &CollarCandidate) -> bool {
    let p = &candidate.payoff;

    if p.net_premium_pct > rules.net_premium_max_pct {
        return false;
    }
    if !rules.max_loss_range.contains(p.max_loss_pct) {
        return false;
    }
    if !rules.max_profit_range.contains(p.max_profit_pct) {
        return false;
    }
    if p.max_profit_pct - p.max_loss_pct < rules.profit_minus_loss_min {
        return false;
    }
    if let Some(min) = rules.call_put_move_diff_min {
        if p.move_call_pct - p.move_put_pct < min {
            return false;
        }
    }
    if rules.require_premium_below_diff && p.net_premium_pct >= p.diff_pct {
        return false;
    }
    true
}

/// Retain the candidates that pass. Idempotent: re-filtering a filtered
/// set is a no-op.
pub fn apply(rules: &FilterRules, candidates: Vec<CollarCandidate>) -> Vec<CollarCandidate> {
    candidates
        .into_iter()
        .filter(|c| passes(rules, c))
        .collect()
}
