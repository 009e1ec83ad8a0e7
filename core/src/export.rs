//! Result export: a full JSON dump and a row-per-candidate CSV.
//!
//! Both are plain serialisations of the data records; field names match
//! the serde names used everywhere else.

use crate::{error::SimResult, selector::Candidate, snapshot::ResultSet};
use std::{fs, path::Path};

pub const CANDIDATE_CSV_HEADER: &str = "bits,probability,expected_return,risk,constraints";

pub fn to_json(results: &ResultSet) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Quote a CSV field if it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn candidates_csv(candidates: &[Candidate]) -> String {
    let mut out = String::from(CANDIDATE_CSV_HEADER);
    out.push('\n');
    for c in candidates {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&c.bits),
            c.probability,
            c.expected_return,
            c.risk,
            csv_field(c.compliance.label()),
        ));
    }
    out
}

pub fn write_json(results: &ResultSet, path: &Path) -> SimResult<()> {
    fs::write(path, to_json(results)?)?;
    log::info!("Wrote JSON export to {}", path.display());
    Ok(())
}

pub fn write_candidates_csv(candidates: &[Candidate], path: &Path) -> SimResult<()> {
    fs::write(path, candidates_csv(candidates))?;
    log::info!("Wrote {} candidates to {}", candidates.len(), path.display());
    Ok(())
}
