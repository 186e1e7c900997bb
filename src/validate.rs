use std::path::Path;

use thiserror::Error;

use crate::model::{Bounds, RankBy, ScanPolicy};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{field}` is not a finite number")]
    NonFiniteBound { field: &'static str },

    #[error("`{field}` range is inverted: lo {lo} > hi {hi}")]
    InvertedRange { field: &'static str, lo: f64, hi: f64 },

    #[error("weight for `{metric}` is negative ({value})")]
    NegativeWeight { metric: &'static str, value: f64 },

    #[error("weighted ranking needs at least one positive metric weight")]
    NoPositiveWeights,

    #[error("scenario move grid is empty")]
    EmptyGrid,

    #[error("scenario move grid contains a zero move")]
    ZeroMove,

    #[error("scenario move grid repeats the move {value}%")]
    DuplicateMove { value: f64 },

    #[error("scenario move {value}% is not a finite number")]
    NonFiniteMove { value: f64 },

    #[error("risk-free rate {value} is not a finite number")]
    NonFiniteRate { value: f64 },
}

/// Load a policy JSON file and validate it, collecting every violation.
pub fn load_and_validate(path: &Path) -> Result<ScanPolicy, Vec<PolicyError>> {
    let contents = std::fs::read_to_string(path).map_err(|e| vec![PolicyError::from(e)])?;
    let policy: ScanPolicy =
        serde_json::from_str(&contents).map_err(|e| vec![PolicyError::from(e)])?;
    validate(&policy)?;
    Ok(policy)
}

/// Check a policy for internal consistency. Returns every violation, not
/// just the first.
pub fn validate(policy: &ScanPolicy) -> Result<(), Vec<PolicyError>> {
    let mut errors = Vec::new();

    check_finite(
        "filter.net_premium_max_pct",
        policy.filter.net_premium_max_pct,
        &mut errors,
    );
    check_range("filter.max_loss_range", policy.filter.max_loss_range, &mut errors);
    check_range(
        "filter.max_profit_range",
        policy.filter.max_profit_range,
        &mut errors,
    );
    check_finite(
        "filter.profit_minus_loss_min",
        policy.filter.profit_minus_loss_min,
        &mut errors,
    );
    if let Some(v) = policy.filter.call_put_move_diff_min {
        check_finite("filter.call_put_move_diff_min", v, &mut errors);
    }

    if policy.scenario_move_grid.is_empty() {
        errors.push(PolicyError::EmptyGrid);
    }
    for (i, &m) in policy.scenario_move_grid.iter().enumerate() {
        if !m.is_finite() {
            errors.push(PolicyError::NonFiniteMove { value: m });
        } else if m == 0.0 {
            errors.push(PolicyError::ZeroMove);
        } else if policy.scenario_move_grid[..i].contains(&m) {
            errors.push(PolicyError::DuplicateMove { value: m });
        }
    }

    for (metric, &weight) in &policy.metric_weights {
        if weight < 0.0 || !weight.is_finite() {
            errors.push(PolicyError::NegativeWeight {
                metric: metric.label(),
                value: weight,
            });
        }
    }
    if policy.rank_by == RankBy::Weighted
        && !policy.metric_weights.values().any(|&w| w > 0.0)
    {
        errors.push(PolicyError::NoPositiveWeights);
    }

    if !policy.risk_free_rate.is_finite() {
        errors.push(PolicyError::NonFiniteRate {
            value: policy.risk_free_rate,
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_finite(field: &'static str, value: f64, errors: &mut Vec<PolicyError>) {
    if !value.is_finite() {
        errors.push(PolicyError::NonFiniteBound { field });
    }
}

fn check_range(field: &'static str, bounds: Bounds, errors: &mut Vec<PolicyError>) {
    if !bounds.lo.is_finite() || !bounds.hi.is_finite() {
        errors.push(PolicyError::NonFiniteBound { field });
    } else if bounds.lo > bounds.hi {
        errors.push(PolicyError::InvertedRange {
            field,
            lo: bounds.lo,
            hi: bounds.hi,
        });
    }
}

/// CLI entry: validate a policy file and report.
pub fn run(path: &Path) -> anyhow::Result<()> {
    match load_and_validate(path) {
        Ok(policy) => {
            println!("policy `{}` is valid", policy.name);
            Ok(())
        }
        Err(errors) => {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::bail!("policy validation failed:\n  {}", msgs.join("\n  "))
        }
    }
}
