use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result, bail};

/// List candidate input files in a directory (by extension, case-insensitive)
/// together with their modification times.
pub fn scan_dir(dir: &Path, extension: &str) -> Result<Vec<(PathBuf, SystemTime)>> {
    let mut entries = Vec::new();
    let read = fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in read {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("reading mtime of {}", path.display()))?;
        entries.push((path, modified));
    }
    Ok(entries)
}

/// Pick the newest entry. Ties break toward the lexicographically later
/// path so timestamped filenames resolve deterministically.
pub fn latest(entries: &[(PathBuf, SystemTime)]) -> Option<&PathBuf> {
    entries
        .iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(path, _)| path)
}

/// Pure retention policy: everything except the `keep` newest entries.
/// Returned paths are candidates for an external janitor; nothing here
/// deletes.
pub fn retention(entries: &[(PathBuf, SystemTime)], keep: usize) -> Vec<PathBuf> {
    let mut sorted: Vec<&(PathBuf, SystemTime)> = entries.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    sorted
        .into_iter()
        .skip(keep)
        .map(|(path, _)| path.clone())
        .collect()
}

/// Resolve the scan input: an explicit file wins; otherwise the newest
/// CSV in `data_dir`.
pub fn resolve_input(file: Option<&Path>, data_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = file {
        return Ok(path.to_path_buf());
    }
    let dir = match data_dir {
        Some(d) => d,
        None => bail!("no input: pass a chain CSV file or --data-dir"),
    };
    let entries = scan_dir(dir, "csv")?;
    match latest(&entries) {
        Some(path) => Ok(path.clone()),
        None => bail!("no CSV files found in {}", dir.display()),
    }
}
