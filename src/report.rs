use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{RankBy, RankedCandidate, ScanPolicy};

/// Round to 2 decimals (premiums) / 3 decimals (percentages) — the
/// precision the downstream HTML renderer expects.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Column label for one scenario move, e.g. `PL_-4%` / `PL_2.5%`.
pub fn move_label(move_pct: f64) -> String {
    if move_pct.fract() == 0.0 {
        format!("PL_{move_pct:.0}%")
    } else {
        format!("PL_{move_pct}%")
    }
}

/// Print ranked results grouped by symbol. An empty set is a normal,
/// successful outcome.
pub fn print_results(results: &[RankedCandidate], policy: &ScanPolicy, verbose: bool) {
    if results.is_empty() {
        println!("No strategies meet the criteria.");
        return;
    }

    let sep = "─".repeat(120);
    let mut current_symbol: Option<&str> = None;
    for r in results {
        if current_symbol != Some(r.candidate.symbol.as_str()) {
            current_symbol = Some(r.candidate.symbol.as_str());
            println!("{sep}");
            println!(
                "  {}  (spot {:.2})",
                r.candidate.symbol, r.candidate.underlying_price
            );
            println!(
                "  {:>4} {:>10} {:>11} {:>9} {:>10} {:>10} {:>11} {:>8} {:>11} {:>9}",
                "Rank",
                "Put Strike",
                "Call Strike",
                "Net Prem",
                "Net Prem %",
                "Max Loss %",
                "Max Profit %",
                "Risk %",
                "Total PL %",
                "Score",
            );
        }
        let p = &r.candidate.payoff;
        let score = match policy.rank_by {
            RankBy::Weighted => r.weighted_total.unwrap_or(0.0),
            RankBy::CompleteTotal => r.scenario.complete_total_pl_pct,
        };
        println!(
            "  {:>4} {:>10.2} {:>11.2} {:>9.2} {:>10.3} {:>10.3} {:>11.3} {:>8.3} {:>11.3} {:>9.2}",
            r.rank,
            r.candidate.put.strike,
            r.candidate.call.strike,
            p.net_premium,
            p.net_premium_pct,
            p.max_loss_pct,
            p.max_profit_pct,
            p.risk_pct,
            r.scenario.complete_total_pl_pct,
            score,
        );
        if verbose && !r.metric_ranks.is_empty() {
            let parts: Vec<String> = r
                .metric_ranks
                .iter()
                .map(|(m, rank)| format!("{}:{rank}", m.label()))
                .collect();
            println!("        {}", parts.join(", "));
        }
    }
    println!("{sep}");
    println!("  {} candidates", results.len());
}

/// Write the ranked set as the collaborator-facing CSV: one row per
/// candidate, one `PL_n%` column per grid move.
pub fn write_csv(path: &Path, results: &[RankedCandidate], policy: &ScanPolicy) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "Stock".to_string(),
        "Put Strike".to_string(),
        "Call Strike".to_string(),
        "Put Premium".to_string(),
        "Call Credit".to_string(),
        "Net Premium".to_string(),
        "Net Prem %".to_string(),
        "Max Loss %".to_string(),
        "Max Profit %".to_string(),
        "Move PE %".to_string(),
        "Move CE %".to_string(),
        "Diff %".to_string(),
        "Risk %".to_string(),
    ];
    for &m in &policy.scenario_move_grid {
        header.push(move_label(m));
    }
    header.push("Complete Total PL %".to_string());
    header.push("Rank".to_string());
    writer.write_record(&header).context("writing CSV header")?;

    for r in results {
        let p = &r.candidate.payoff;
        let mut record = vec![
            r.candidate.symbol.clone(),
            format!("{}", r.candidate.put.strike),
            format!("{}", r.candidate.call.strike),
            format!("{}", round2(r.candidate.put.last)),
            format!("{}", round2(r.candidate.call.last)),
            format!("{}", round2(p.net_premium)),
            format!("{}", round3(p.net_premium_pct)),
            format!("{}", round3(p.max_loss_pct)),
            format!("{}", round3(p.max_profit_pct)),
            format!("{}", round3(p.move_put_pct)),
            format!("{}", round3(p.move_call_pct)),
            format!("{}", round3(p.diff_pct)),
            format!("{}", round3(p.risk_pct)),
        ];
        for &(_, pl) in &r.scenario.moves {
            record.push(format!("{}", round3(pl)));
        }
        record.push(format!("{}", round3(r.scenario.complete_total_pl_pct)));
        record.push(format!("{}", r.rank));
        writer.write_record(&record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
