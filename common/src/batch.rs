//! # Batch Configuration
//!
//! Reads an INI file describing several scans at once:
//!
//! ```ini
//! [webserver]
//! host = 192.168.1.10
//! protocol = tcp
//! ports = 20-25,80,443
//! log = yes
//! ```
//!
//! Every section is one job. `protocol` is `tcp` or `syn`, `log` is `yes`
//! or `no`. Lines starting with `;` or `#` are comments.
//!
//! A section with a bad or missing value only invalidates its own job. Lines
//! that are not INI at all reject the whole file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::ScanMode;
use crate::error::ScanError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub name: String,
    pub host: String,
    pub mode: ScanMode,
    pub ports: String,
    pub log: bool,
}

/// Outcome of one `[section]`.
pub type JobEntry = Result<BatchJob, ScanError>;

pub fn load(path: &Path) -> Result<Vec<JobEntry>, ScanError> {
    let content: String = fs::read_to_string(path).map_err(|e| {
        ScanError::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse(&content)
}

/// One entry per section, in file order.
pub fn parse(content: &str) -> Result<Vec<JobEntry>, ScanError> {
    let mut sections: Vec<(String, HashMap<String, String>)> = Vec::new();

    for (line_no, raw) in content.lines().enumerate() {
        let line: &str = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.push((name.trim().to_string(), HashMap::new()));
            continue;
        }

        let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
            return Err(ScanError::InvalidConfig(format!(
                "line {}: expected 'key = value', got '{line}'",
                line_no + 1
            )));
        };

        let Some((_, entries)) = sections.last_mut() else {
            return Err(ScanError::InvalidConfig(format!(
                "line {}: key '{}' outside of any section",
                line_no + 1,
                key.trim()
            )));
        };
        entries.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    Ok(sections
        .into_iter()
        .map(|(name, entries)| job_from_section(name, &entries))
        .collect())
}

fn job_from_section(name: String, entries: &HashMap<String, String>) -> Result<BatchJob, ScanError> {
    let field = |key: &str| -> Result<String, ScanError> {
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| ScanError::InvalidConfig(format!("[{name}] is missing '{key}'")))
    };

    let mode: ScanMode = field("protocol")?
        .parse()
        .map_err(|e| match e {
            ScanError::InvalidConfig(msg) => ScanError::InvalidConfig(format!("[{name}] {msg}")),
            other => other,
        })?;

    let log: bool = match field("log")?.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => true,
        "no" | "false" | "0" => false,
        other => {
            return Err(ScanError::InvalidConfig(format!(
                "[{name}] log must be 'yes' or 'no', got '{other}'"
            )));
        }
    };

    Ok(BatchJob {
        host: field("host")?,
        ports: field("ports")?,
        mode,
        log,
        name,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
