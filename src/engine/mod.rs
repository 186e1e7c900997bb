pub mod enumerate;
pub mod greeks;
pub mod payoff;
pub mod rank;
pub mod scenario;

pub use payoff::GreeksContext;

use crate::filter;
use crate::model::{ChainSnapshot, CollarCandidate, RankedCandidate, ScanPolicy, ScenarioResult};

/// Result of one batch scan across all symbols.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Grouped by symbol, rank-ascending within each group.
    pub results: Vec<RankedCandidate>,
    /// Candidates enumerated before filtering, across all symbols.
    pub enumerated: usize,
}

/// Enumerate, price, filter, and scenario-evaluate one symbol.
///
/// Symbols are independent: a symbol that yields nothing (one-sided
/// chain, nothing bracketing, nothing passing the filter) contributes an
/// empty set and never fails the run.
pub fn scan_symbol(
    snapshot: &ChainSnapshot,
    policy: &ScanPolicy,
    greeks_ctx: Option<&GreeksContext>,
) -> (Vec<(CollarCandidate, ScenarioResult)>, usize) {
    let candidates: Vec<CollarCandidate> = enumerate::enumerate_collars(snapshot)
        .iter()
        .filter_map(|(put, call)| payoff::compute(&snapshot.underlying, put, call, greeks_ctx))
        .collect();
    let enumerated = candidates.len();

    // Scenario P&L is only spent on survivors.
    let survivors = filter::apply(&policy.filter, candidates)
        .into_iter()
        .map(|c| {
            let scenario = scenario::scenario_pl(&c, &policy.scenario_move_grid);
            (c, scenario)
        })
        .collect();
    (survivors, enumerated)
}

/// Run the full pipeline over every symbol's snapshot and rank the
/// combined survivor set per the policy.
pub fn scan_chain(
    snapshots: &[ChainSnapshot],
    policy: &ScanPolicy,
    greeks_ctx: Option<&GreeksContext>,
) -> ScanOutcome {
    let mut survivors = Vec::new();
    let mut enumerated = 0;
    for snapshot in snapshots {
        let (mut symbol_survivors, symbol_enumerated) =
            scan_symbol(snapshot, policy, greeks_ctx);
        enumerated += symbol_enumerated;
        survivors.append(&mut symbol_survivors);
    }

    ScanOutcome {
        results: rank::rank_candidates(policy, survivors),
        enumerated,
    }
}
