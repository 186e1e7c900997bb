use clap::Parser;
use schemars::schema_for;

use collar_scan::model::ScanPolicy;
use collar_scan::{cli, example, list_presets, scan, validate};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Scan {
            input,
            data_dir,
            policy,
            preset,
            as_of,
            risk_free_rate,
            output,
            verbose,
        } => scan::run(&scan::ScanConfig {
            input,
            data_dir,
            policy_path: policy,
            preset,
            as_of,
            risk_free_rate,
            output,
            verbose,
        }),
        cli::Command::Validate { file } => validate::run(&file),
        cli::Command::Schema => {
            let schema = schema_for!(ScanPolicy);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        cli::Command::Example => example::run(),
        cli::Command::Presets => list_presets::run(),
    }
}
