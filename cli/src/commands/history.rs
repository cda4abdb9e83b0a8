use penscan_common::config::Config;
use penscan_core::history::{HistoryStore, ScanRecord};

use crate::terminal::print;

pub fn history(count: usize, cfg: &Config) -> anyhow::Result<()> {
    let records: Vec<ScanRecord> = HistoryStore::open(&cfg.history_path).latest(count)?;

    if records.is_empty() {
        print::no_results(&format!(
            "No logged scans in {}",
            cfg.history_path.display()
        ));
        return Ok(());
    }

    print::history_table(&records);
    Ok(())
}
