use crate::model::{RankBy, ScanPolicy};

/// List the built-in policy presets and their admission bounds.
pub fn run() -> anyhow::Result<()> {
    println!(
        "  {:<12} {:>10} {:>12} {:>14} {:<15} {}",
        "Preset", "NetPrem ≤", "MaxLoss %", "MaxProfit %", "Ranking", "Metrics",
    );
    println!("  {}", "-".repeat(90));
    for preset in ScanPolicy::presets() {
        let f = &preset.filter;
        let ranking = match preset.rank_by {
            RankBy::Weighted => "weighted",
            RankBy::CompleteTotal => "complete-total",
        };
        let metrics: Vec<&str> = preset
            .metric_weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .map(|(m, _)| m.label())
            .collect();
        println!(
            "  {:<12} {:>10} {:>5}..{:<5} {:>7}..{:<5} {:<15} {}",
            preset.name,
            f.net_premium_max_pct,
            f.max_loss_range.lo,
            f.max_loss_range.hi,
            f.max_profit_range.lo,
            f.max_profit_range.hi,
            ranking,
            if metrics.is_empty() {
                "-".to_string()
            } else {
                metrics.join(", ")
            },
        );
    }
    Ok(())
}
