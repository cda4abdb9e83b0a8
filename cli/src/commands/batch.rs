use std::path::Path;

use anyhow::Context;
use penscan_common::{
    batch::{BatchJob, JobEntry},
    config::{Config, ScanConfig},
    error,
    network::{ports::PortSpec, target::Target},
    success, warn,
};

use super::scan;
use crate::terminal::print;

/// Runs every job of `file` in order. Returns how many jobs failed.
pub async fn batch(file: &Path, cfg: &Config) -> anyhow::Result<usize> {
    let entries: Vec<JobEntry> = penscan_common::batch::load(file)
        .with_context(|| format!("could not load batch file {}", file.display()))?;

    if entries.is_empty() {
        warn!("{} contains no jobs", file.display());
        return Ok(0);
    }

    let mut failed: usize = 0;
    for entry in &entries {
        let job: &BatchJob = match entry {
            Ok(job) => job,
            Err(e) => {
                error!("Skipping invalid job: {e}");
                failed += 1;
                continue;
            }
        };

        print::header(&format!("job {}", job.name));
        if let Err(e) = run_job(job, cfg).await {
            error!("Job '{}' failed: {e:#}", job.name);
            failed += 1;
        }
    }

    if failed == 0 {
        success!("All {} job(s) finished", entries.len());
    } else {
        warn!("{failed} of {} job(s) failed", entries.len());
    }
    Ok(failed)
}

async fn run_job(job: &BatchJob, cfg: &Config) -> anyhow::Result<()> {
    let target: Target = Target::resolve(&job.host)?;
    let ports: PortSpec = PortSpec::parse(&job.ports)?;
    let scan_cfg: ScanConfig = ScanConfig::default().with_mode(job.mode);

    scan::run(&target, &ports, &scan_cfg, job.log, cfg).await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
