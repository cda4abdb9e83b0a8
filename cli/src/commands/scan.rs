use std::time::{Duration, Instant};

use anyhow::Context;
use penscan_common::{
    config::{Config, ScanConfig, ScanMode},
    network::{ports::PortSpec, target::Target},
    scan::ScanResult,
    success,
};
use penscan_core::{history::HistoryStore, scanner};
use tracing::Instrument;

use super::ScanArgs;
use crate::terminal::{print, spinner};

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let mode: ScanMode = if args.syn { ScanMode::Syn } else { ScanMode::Connect };

    let mut scan_cfg: ScanConfig = ScanConfig::default()
        .with_mode(mode)
        .with_timeout(Duration::from_millis(args.timeout))
        .with_max_concurrency(args.concurrency);
    if let Some(port) = args.source_port {
        scan_cfg = scan_cfg.with_source_port(port);
    }

    run(&args.target, &args.ports, &scan_cfg, args.log, cfg).await
}

/// Scans one host, prints the report and optionally logs it.
pub async fn run(
    target: &Target,
    ports: &PortSpec,
    scan_cfg: &ScanConfig,
    log: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let span = spinner::scan_span(target, ports.len());
    let started: Instant = Instant::now();

    let result: ScanResult = scanner::perform_scan(target, ports, scan_cfg)
        .instrument(span.clone())
        .await
        .with_context(|| format!("scan of {target} failed"))?;
    drop(span);

    print::scan_report(target, &result, started.elapsed());

    if log {
        HistoryStore::open(&cfg.history_path)
            .append(&target.host, &result)
            .context("could not log scan")?;
        success!("Scan logged to {}", cfg.history_path.display());
    }

    Ok(())
}
