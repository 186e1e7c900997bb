mod common;

use std::collections::BTreeMap;

use collar_scan::engine::rank::{dense_rank_asc, min_rank, rank_candidates};
use collar_scan::engine::scenario::scenario_pl;
use collar_scan::model::policy::default_move_grid;
use collar_scan::model::{
    CollarCandidate, Metric, RankBy, RankScope, ScanPolicy, ScenarioResult,
};
use common::{assert_close, candidate};

#[test]
fn min_rank_ascending_shares_the_lowest_rank_on_ties() {
    let values: Vec<Option<f64>> = vec![Some(3.0), Some(1.0), Some(1.0), Some(2.0)];
    assert_eq!(min_rank(&values, false), vec![4, 1, 1, 3]);
}

#[test]
fn min_rank_descending_reverses_direction() {
    let values: Vec<Option<f64>> = vec![Some(3.0), Some(1.0), Some(1.0), Some(2.0)];
    assert_eq!(min_rank(&values, true), vec![1, 3, 3, 2]);
}

#[test]
fn absent_values_sort_last_and_tie_with_each_other() {
    let values: Vec<Option<f64>> = vec![None, Some(5.0), None, Some(1.0)];
    assert_eq!(min_rank(&values, false), vec![3, 2, 3, 1]);
    // Direction does not rescue an absent value.
    assert_eq!(min_rank(&values, true), vec![3, 1, 3, 2]);
}

#[test]
fn dense_rank_has_no_gaps_after_ties() {
    assert_eq!(dense_rank_asc(&[0.5, 0.2, 0.2, 0.9]), vec![2, 1, 1, 3]);
    assert_eq!(dense_rank_asc(&[1.0, 1.0, 1.0]), vec![1, 1, 1]);
}

fn with_scenario(c: CollarCandidate) -> (CollarCandidate, ScenarioResult) {
    let scenario = scenario_pl(&c, &default_move_grid());
    (c, scenario)
}

fn premium_only_policy() -> ScanPolicy {
    let mut policy = ScanPolicy::balanced();
    policy.metric_weights = BTreeMap::from([(Metric::NetPremium, 1.0)]);
    policy
}

#[test]
fn weighted_single_metric_orders_by_that_metric() {
    // Net premiums 1.5, 0.5, 1.0.
    let survivors = vec![
        with_scenario(candidate(100.0, 95.0, 3.0, 110.0, 1.5)),
        with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)),
        with_scenario(candidate(100.0, 95.0, 2.5, 110.0, 1.5)),
    ];
    let ranked = rank_candidates(&premium_only_policy(), survivors);

    // Same symbol, so output is rank-ascending.
    assert_eq!(ranked[0].rank, 1);
    assert_close(ranked[0].candidate.payoff.net_premium, 0.5);
    assert_eq!(ranked[1].rank, 2);
    assert_close(ranked[1].candidate.payoff.net_premium, 1.0);
    assert_eq!(ranked[2].rank, 3);
    assert_close(ranked[2].candidate.payoff.net_premium, 1.5);
}

#[test]
fn weighted_mode_records_per_metric_ranks_and_score() {
    let survivors = vec![
        with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)),
        with_scenario(candidate(100.0, 95.0, 3.0, 110.0, 1.5)),
    ];
    let ranked = rank_candidates(&premium_only_policy(), survivors);

    let best = &ranked[0];
    assert_eq!(best.metric_ranks, vec![(Metric::NetPremium, 1)]);
    // One metric at full weight: score equals the metric rank.
    assert_close(best.weighted_total.unwrap(), 1.0);
    assert_close(ranked[1].weighted_total.unwrap(), 2.0);
}

#[test]
fn scaling_every_weight_leaves_scores_unchanged() {
    let make = || {
        vec![
            with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)),
            with_scenario(candidate(100.0, 94.0, 2.5, 111.0, 1.0)),
            with_scenario(candidate(100.0, 96.0, 1.5, 109.0, 1.2)),
        ]
    };
    let mut base = ScanPolicy::balanced();
    base.metric_weights = BTreeMap::from([
        (Metric::NetPremium, 0.6),
        (Metric::BidAskSpread, 0.4),
    ]);
    let mut scaled = base.clone();
    for w in scaled.metric_weights.values_mut() {
        *w *= 10.0;
    }

    let a = rank_candidates(&base, make());
    let b = rank_candidates(&scaled, make());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.rank, y.rank);
        assert_close(x.weighted_total.unwrap(), y.weighted_total.unwrap());
    }
}

#[test]
fn zero_weight_metrics_are_ignored() {
    let mut policy = premium_only_policy();
    policy
        .metric_weights
        .insert(Metric::Liquidity, 0.0);
    let survivors = vec![
        with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)),
        with_scenario(candidate(100.0, 95.0, 3.0, 110.0, 1.5)),
    ];
    let ranked = rank_candidates(&policy, survivors);
    for r in &ranked {
        assert!(r.metric_ranks.iter().all(|(m, _)| *m == Metric::NetPremium));
    }
}

#[test]
fn complete_total_mode_ranks_by_round_trip_pl_descending() {
    // Lower net premium means a higher (less negative) round-trip total.
    let survivors = vec![
        with_scenario(candidate(100.0, 95.0, 3.0, 110.0, 1.5)), // total -12
        with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)), // total -4
    ];
    let mut policy = ScanPolicy::round_trip();
    policy.rank_by = RankBy::CompleteTotal;
    let ranked = rank_candidates(&policy, survivors);

    assert_eq!(ranked[0].rank, 1);
    assert_close(ranked[0].scenario.complete_total_pl_pct, -4.0);
    assert_eq!(ranked[1].rank, 2);
    assert!(ranked[0].weighted_total.is_none());
}

#[test]
fn per_symbol_scope_restarts_ranks_in_each_group() {
    let mut a1 = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    let mut a2 = candidate(100.0, 95.0, 3.0, 110.0, 1.5);
    a1.symbol = "AAA".to_string();
    a2.symbol = "AAA".to_string();
    let mut b1 = candidate(200.0, 190.0, 5.0, 220.0, 2.0);
    b1.symbol = "BBB".to_string();

    let mut policy = premium_only_policy();
    policy.rank_scope = RankScope::PerSymbol;
    let ranked = rank_candidates(
        &policy,
        vec![with_scenario(a1), with_scenario(a2), with_scenario(b1)],
    );

    assert_eq!(ranked[0].candidate.symbol, "AAA");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].candidate.symbol, "AAA");
    assert_eq!(ranked[1].rank, 2);
    // The lone BBB candidate starts over at rank 1.
    assert_eq!(ranked[2].candidate.symbol, "BBB");
    assert_eq!(ranked[2].rank, 1);
}

#[test]
fn output_is_grouped_by_symbol_in_first_seen_order() {
    let mut z = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    z.symbol = "ZZZ".to_string();
    let mut a = candidate(100.0, 95.0, 3.0, 110.0, 1.5);
    a.symbol = "AAA".to_string();
    let mut z2 = candidate(100.0, 94.0, 2.5, 111.0, 1.0);
    z2.symbol = "ZZZ".to_string();

    let ranked = rank_candidates(
        &premium_only_policy(),
        vec![with_scenario(z), with_scenario(a), with_scenario(z2)],
    );

    let symbols: Vec<&str> = ranked.iter().map(|r| r.candidate.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["ZZZ", "ZZZ", "AAA"]);
}

#[test]
fn ranking_is_deterministic() {
    let make = || {
        vec![
            with_scenario(candidate(100.0, 95.0, 2.0, 110.0, 1.5)),
            with_scenario(candidate(100.0, 94.0, 2.5, 111.0, 1.0)),
        ]
    };
    let policy = premium_only_policy();
    let a = rank_candidates(&policy, make());
    let b = rank_candidates(&policy, make());
    let ranks_a: Vec<u32> = a.iter().map(|r| r.rank).collect();
    let ranks_b: Vec<u32> = b.iter().map(|r| r.rank).collect();
    assert_eq!(ranks_a, ranks_b);
}
