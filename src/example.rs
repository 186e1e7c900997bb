use crate::model::ScanPolicy;

/// Print an example policy JSON to stdout — a starting point for a
/// custom policy file.
pub fn run() -> anyhow::Result<()> {
    let policy = ScanPolicy::default();
    let json = serde_json::to_string_pretty(&policy)?;
    println!("{json}");
    Ok(())
}
