use crate::model::{CollarCandidate, ScenarioResult};

/// Realized collar P&L (% of the underlying) after an instantaneous move
/// of `move_pct`. Three legs: synthetic futures position, long put bought
/// at `put.last`, call written for `call.last`.
pub fn move_pl_pct(candidate: &CollarCandidate, move_pct: f64) -> f64 {
    let spot = candidate.underlying_price;
    let new_price = spot * (1.0 + move_pct / 100.0);

    let futures_pnl = new_price - spot;
    let put_pnl = (candidate.put.strike - new_price).max(0.0) - candidate.put.last;
    let call_pnl = candidate.call.last - (new_price - candidate.call.strike).max(0.0);

    (futures_pnl + put_pnl + call_pnl) / spot * 100.0
}

/// Evaluate the whole move grid. Buckets are independent: no compounding,
/// no path dependency, and no bucket is skipped.
pub fn scenario_pl(candidate: &CollarCandidate, grid: &[f64]) -> ScenarioResult {
    let moves: Vec<(f64, f64)> = grid
        .iter()
        .map(|&m| (m, move_pl_pct(candidate, m)))
        .collect();
    let complete_total_pl_pct = complete_total(&moves);
    ScenarioResult {
        moves,
        complete_total_pl_pct,
    }
}

/// Round-trip aggregate: for each magnitude present in both directions,
/// add the up-move result and the down-move result, clamping the
/// down-side sign so a loss is always subtracted. Unpaired grid entries
/// contribute nothing.
pub fn complete_total(moves: &[(f64, f64)]) -> f64 {
    let mut total = 0.0;
    for &(m, up) in moves {
        if m <= 0.0 {
            continue;
        }
        let Some(&(_, down)) = moves.iter().find(|(n, _)| approx_eq(*n, -m)) else {
            continue;
        };
        let adjusted_down = if down >= 0.0 { down } else { -down.abs() };
        total += up + adjusted_down;
    }
    total
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
