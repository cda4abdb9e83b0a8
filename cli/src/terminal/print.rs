use std::time::Duration;

use colored::*;
use penscan_common::{
    log::TARGET_PRINT,
    network::{services, target::Target},
    scan::ScanResult,
    success,
};
use penscan_core::history::ScanRecord;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

const PORT_COLUMN: usize = 10;
const STATE_COLUMN: usize = 7;

pub fn print(msg: &str) {
    info!(target: TARGET_PRINT, raw_msg = msg);
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

/// `PORT STATE SERVICE` table of the open ports, followed by the duration.
pub fn scan_report(target: &Target, result: &ScanResult, elapsed: Duration) {
    print(&format!(
        "{} {}",
        "Scan-Report for".color(colors::TEXT_DEFAULT),
        target.to_string().color(colors::PRIMARY).bold()
    ));

    let open: Vec<u16> = result.open_ports();
    if open.is_empty() {
        no_results("No open ports found");
    } else {
        print(&format!(
            "{}",
            format!(
                "{:<PORT_COLUMN$}{:<STATE_COLUMN$}{}",
                "PORT", "STATE", "SERVICE"
            )
            .bold()
        ));
        for port in open {
            port_row(port);
        }
    }

    fat_separator();
    success!(
        "Scan done in {}",
        format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow()
    );
}

fn port_row(port: u16) {
    let service: &str = services::lookup(port).unwrap_or("");
    let port_col: String = format!("{:<PORT_COLUMN$}", format!("{port}/tcp"));
    let state_col: String = format!("{:<STATE_COLUMN$}", "open");
    print(&format!(
        "{}{}{}",
        port_col.color(colors::ACCENT),
        state_col.color(colors::PORT_OPEN),
        service.color(colors::SERVICE)
    ));
}

pub fn history_table(records: &[ScanRecord]) {
    for record in records {
        let open: ColoredString = if record.open_tcp.is_empty() {
            "none".dimmed()
        } else {
            record.open_tcp.color(colors::PORT_OPEN)
        };
        print(&format!(
            "{} {} {} {}",
            record
                .date
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .color(colors::SEPARATOR),
            record.host.color(colors::PRIMARY),
            ">".color(colors::SEPARATOR),
            open
        ));
    }
}

pub fn no_results(msg: &str) {
    print(&format!("{}", msg.red().bold()));
}
