//! Scan history on disk.
//!
//! One JSON object per line, appended after each logged scan. Reading is
//! forgiving: a missing file is an empty history and lines that do not parse
//! are skipped with a warning instead of failing the whole load.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local};
use penscan_common::{scan::ScanResult, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub date: DateTime<Local>,
    pub host: String,
    /// Open ports, comma separated and ascending. Empty when nothing answered.
    pub open_tcp: String,
}

impl ScanRecord {
    pub fn new(host: &str, result: &ScanResult) -> Self {
        let open_tcp: String = result
            .open_ports()
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            date: Local::now(),
            host: host.to_string(),
            open_tcp,
        }
    }

    pub fn open_ports(&self) -> Vec<u16> {
        self.open_tcp
            .split(',')
            .filter_map(|p| p.trim().parse().ok())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, host: &str, result: &ScanResult) -> anyhow::Result<ScanRecord> {
        let record = ScanRecord::new(host, result);
        let line: String = serde_json::to_string(&record)?;

        let mut file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening history file {}", self.path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("writing to history file {}", self.path.display()))?;

        Ok(record)
    }

    /// All records, newest first.
    pub fn load(&self) -> anyhow::Result<Vec<ScanRecord>> {
        let file: File = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading history file {}", self.path.display()));
            }
        };

        let mut records: Vec<ScanRecord> = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line: String = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ScanRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping malformed history entry on line {}: {e}",
                    idx + 1
                ),
            }
        }

        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    pub fn latest(&self, count: usize) -> anyhow::Result<Vec<ScanRecord>> {
        let mut records: Vec<ScanRecord> = self.load()?;
        records.truncate(count);
        Ok(records)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
