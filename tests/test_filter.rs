mod common;

use collar_scan::filter;
use collar_scan::model::{Bounds, FilterRules};
use common::candidate;

// Worked candidate: spot 100, 95-put @ 2, 110-call @ 1.5.
// net_prem_pct 0.5, max_loss 5.5, max_profit 9.5,
// move_put 5, move_call 10, diff 5.

fn permissive() -> FilterRules {
    FilterRules {
        net_premium_max_pct: 100.0,
        max_loss_range: Bounds::new(-100.0, 100.0),
        max_profit_range: Bounds::new(-100.0, 100.0),
        profit_minus_loss_min: -100.0,
        call_put_move_diff_min: None,
        require_premium_below_diff: false,
    }
}

#[test]
fn permissive_rules_pass_the_worked_candidate() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    assert!(filter::passes(&permissive(), &c));
}

#[test]
fn net_premium_cap_is_inclusive() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    let mut rules = permissive();
    rules.net_premium_max_pct = 0.5;
    assert!(filter::passes(&rules, &c));
    rules.net_premium_max_pct = 0.49;
    assert!(!filter::passes(&rules, &c));
}

#[test]
fn max_loss_band_is_inclusive_on_both_ends() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    let mut rules = permissive();
    rules.max_loss_range = Bounds::new(5.5, 5.5);
    assert!(filter::passes(&rules, &c));
    rules.max_loss_range = Bounds::new(0.0, 5.4);
    assert!(!filter::passes(&rules, &c));
    rules.max_loss_range = Bounds::new(5.6, 10.0);
    assert!(!filter::passes(&rules, &c));
}

#[test]
fn max_profit_band_is_inclusive_on_both_ends() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    let mut rules = permissive();
    rules.max_profit_range = Bounds::new(9.5, 9.5);
    assert!(filter::passes(&rules, &c));
    rules.max_profit_range = Bounds::new(0.0, 9.4);
    assert!(!filter::passes(&rules, &c));
}

#[test]
fn profit_minus_loss_floor() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    // 9.5 - 5.5 = 4.0
    let mut rules = permissive();
    rules.profit_minus_loss_min = 4.0;
    assert!(filter::passes(&rules, &c));
    rules.profit_minus_loss_min = 4.1;
    assert!(!filter::passes(&rules, &c));
}

#[test]
fn move_diff_floor_only_applies_when_set() {
    let c = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    // move_call - move_put = 10 - 5 = 5
    let mut rules = permissive();
    rules.call_put_move_diff_min = Some(5.0);
    assert!(filter::passes(&rules, &c));
    rules.call_put_move_diff_min = Some(5.1);
    assert!(!filter::passes(&rules, &c));
    rules.call_put_move_diff_min = None;
    assert!(filter::passes(&rules, &c));
}

#[test]
fn premium_below_diff_is_strict() {
    let cheap = candidate(100.0, 95.0, 2.0, 110.0, 1.5); // 0.5 < 5
    let mut rules = permissive();
    rules.require_premium_below_diff = true;
    assert!(filter::passes(&rules, &cheap));

    // Premium equal to diff must fail: 95-put @ 6, so net premium 5
    // exactly matches diff 5.
    let at_parity = candidate(100.0, 95.0, 6.0, 110.0, 1.0);
    assert!(!filter::passes(&rules, &at_parity));
}

#[test]
fn apply_retains_only_passing_candidates() {
    let good = candidate(100.0, 95.0, 2.0, 110.0, 1.5);
    let pricey = candidate(100.0, 95.0, 6.0, 110.0, 1.0); // net prem 5.0
    let mut rules = permissive();
    rules.net_premium_max_pct = 1.0;

    let kept = filter::apply(&rules, vec![good.clone(), pricey]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].put.strike, good.put.strike);
}

#[test]
fn apply_is_idempotent() {
    let rules = permissive();
    let once = filter::apply(&rules, vec![candidate(100.0, 95.0, 2.0, 110.0, 1.5)]);
    let twice = filter::apply(&rules, once.clone());
    assert_eq!(once.len(), twice.len());
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter::apply(&permissive(), Vec::new()).is_empty());
}
