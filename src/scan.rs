use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::data::{self, resolve};
use crate::engine::{self, GreeksContext};
use crate::model::ScanPolicy;
use crate::report;
use crate::validate;

/// Configuration for one scan run.
pub struct ScanConfig {
    pub input: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub policy_path: Option<PathBuf>,
    pub preset: Option<String>,
    /// Valuation date for greeks; defaults to today.
    pub as_of: Option<NaiveDate>,
    /// Overrides the policy's risk-free rate (percent).
    pub risk_free_rate: Option<f64>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

/// Run a scan from the CLI: resolve the input snapshot, load the policy,
/// run the engine, report.
pub fn run(config: &ScanConfig) -> Result<()> {
    let mut policy = load_policy(config)?;
    if let Some(rate) = config.risk_free_rate {
        policy.risk_free_rate = rate;
    }
    if let Err(errors) = validate::validate(&policy) {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        bail!("policy validation failed:\n  {}", msgs.join("\n  "));
    }

    let input = resolve::resolve_input(config.input.as_deref(), config.data_dir.as_deref())?;
    let (snapshots, stats) = data::load_chain(&input)?;

    let as_of = config
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let greeks_ctx = GreeksContext {
        as_of,
        rate_pct: policy.risk_free_rate,
    };

    let outcome = engine::scan_chain(&snapshots, &policy, Some(&greeks_ctx));

    if config.verbose {
        println!(
            "policy `{}`: {} rows ({} skipped), {} symbols ({} skipped), {} candidates enumerated, {} ranked",
            policy.name,
            stats.rows,
            stats.skipped_rows,
            stats.symbols,
            stats.skipped_symbols,
            outcome.enumerated,
            outcome.results.len(),
        );
    }

    report::print_results(&outcome.results, &policy, config.verbose);

    if let Some(ref output) = config.output {
        report::write_csv(output, &outcome.results, &policy)
            .with_context(|| format!("writing results to {}", output.display()))?;
        println!("Saved {} ranked collars to {}", outcome.results.len(), output.display());
    }
    Ok(())
}

fn load_policy(config: &ScanConfig) -> Result<ScanPolicy> {
    if let Some(ref path) = config.policy_path {
        return validate::load_and_validate(path).map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!("loading policy {}:\n  {}", path.display(), msgs.join("\n  "))
        });
    }
    if let Some(ref name) = config.preset {
        return ScanPolicy::preset(name).with_context(|| {
            let names: Vec<String> =
                ScanPolicy::presets().iter().map(|p| p.name.clone()).collect();
            format!("unknown preset `{name}` (available: {})", names.join(", "))
        });
    }
    Ok(ScanPolicy::default())
}
