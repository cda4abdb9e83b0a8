#![cfg(test)]
use std::fs;

use penscan_common::batch;
use penscan_common::config::ScanMode;
use penscan_common::error::ScanError;
use penscan_common::scan::{PortState, ScanResult};
use penscan_core::history::HistoryStore;

#[test]
fn logged_scans_come_back_newest_first() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = HistoryStore::open(dir.path().join("penscan.jsonl"));

    let first: ScanResult = [(22, PortState::Open), (23, PortState::Closed)]
        .into_iter()
        .collect();
    let second: ScanResult = [(443, PortState::Open)].into_iter().collect();

    store.append("first.example", &first)?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    store.append("second.example", &second)?;

    let records = store.load()?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].host, "second.example");
    assert_eq!(records[0].open_ports(), vec![443]);
    assert_eq!(records[1].open_tcp, "22");
    Ok(())
}

#[test]
fn batch_file_is_read_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.ini");
    fs::write(
        &path,
        "; nightly\n[web]\nhost = 127.0.0.1\nprotocol = tcp\nports = 80,443\nlog = yes\n\n\
         [db]\nhost = 127.0.0.1\nprotocol = syn\nports = 5432\nlog = no\n",
    )
    .unwrap();

    let jobs = batch::load(&path)
        .unwrap()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].name, "web");
    assert_eq!(jobs[0].mode, ScanMode::Connect);
    assert!(jobs[0].log);
    assert_eq!(jobs[1].name, "db");
    assert_eq!(jobs[1].mode, ScanMode::Syn);
    assert_eq!(jobs[1].ports, "5432");
}

#[test]
fn missing_batch_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = batch::load(&dir.path().join("absent.ini"));
    assert!(matches!(res, Err(ScanError::InvalidConfig(_))));
}
