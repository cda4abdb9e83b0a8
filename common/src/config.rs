use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::ScanError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;
pub const DEFAULT_HISTORY_PATH: &str = "penscan.jsonl";

const EPHEMERAL_PORTS: std::ops::RangeInclusive<u16> = 49_152..=65_535;

static SOURCE_PORT: OnceLock<u16> = OnceLock::new();

/// Front-end settings that outlive a single scan.
#[derive(Debug, Clone)]
pub struct Config {
    /// File the scan history is appended to.
    pub history_path: PathBuf,
    /// 0 = info, 1 = debug, 2+ = trace.
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            verbosity: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Full TCP handshake per port.
    #[default]
    Connect,
    /// Half-open scan with hand-crafted SYN segments. Needs root.
    Syn,
}

impl FromStr for ScanMode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" | "connect" => Ok(ScanMode::Connect),
            "syn" => Ok(ScanMode::Syn),
            other => Err(ScanError::InvalidConfig(format!("protocol '{other}' unknown"))),
        }
    }
}

/// Settings for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub mode: ScanMode,
    /// Per-attempt timeout, never cumulative.
    pub timeout: Duration,
    /// Upper bound of simultaneous connect attempts. Zero is treated as one.
    pub max_concurrency: usize,
    /// Source port stamped on every SYN probe of a scan.
    pub source_port: u16,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            source_port: default_source_port(),
        }
    }
}

impl ScanConfig {
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_source_port(mut self, source_port: u16) -> Self {
        self.source_port = source_port;
        self
    }
}

/// Ephemeral port picked once and reused for the lifetime of the process.
pub fn default_source_port() -> u16 {
    *SOURCE_PORT.get_or_init(|| rand::random_range(EPHEMERAL_PORTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_mode_parsing() {
        assert_eq!("tcp".parse::<ScanMode>().unwrap(), ScanMode::Connect);
        assert_eq!("SYN".parse::<ScanMode>().unwrap(), ScanMode::Syn);
        assert!(matches!("udp".parse::<ScanMode>(), Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn source_port_is_stable_and_ephemeral() {
        let first = default_source_port();
        assert_eq!(first, default_source_port());
        assert!(EPHEMERAL_PORTS.contains(&first));
        assert_eq!(ScanConfig::default().source_port, first);
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let cfg = ScanConfig::default().with_max_concurrency(0);
        assert_eq!(cfg.max_concurrency, 1);
    }
}
