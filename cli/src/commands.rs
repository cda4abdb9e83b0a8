pub mod batch;
pub mod history;
pub mod scan;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use penscan_common::config::{DEFAULT_HISTORY_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT};
use penscan_common::network::{ports::PortSpec, target::Target};

#[derive(Parser)]
#[command(name = "penscan")]
#[command(about = "A TCP port scanner with connect and SYN modes.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// File logged scans are appended to
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_HISTORY_PATH)]
    pub history: PathBuf,

    /// More output: -v for debug, -vv for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the ports of a single host
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Run every job of an INI batch file
    #[command(alias = "b")]
    Batch { file: PathBuf },
    /// Show the most recent logged scans
    #[command(alias = "h")]
    History {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Host name or IPv4 address
    pub target: Target,

    /// Ports to scan, e.g. 80, 22,80,443 or 1-1024
    #[arg(short, long)]
    pub ports: PortSpec,

    /// Half-open scan through a raw socket (needs root)
    #[arg(long)]
    pub syn: bool,

    /// Append the result to the history file
    #[arg(long)]
    pub log: bool,

    /// Per-port timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout: u64,

    /// Connect attempts allowed in flight at once
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Fixed TCP source port for SYN probes
    #[arg(long, value_name = "PORT")]
    pub source_port: Option<u16>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
