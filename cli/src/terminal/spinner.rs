use colored::*;
use indicatif::ProgressStyle;
use penscan_common::network::target::Target;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Span that renders as a spinner while a scan future runs inside it.
pub fn scan_span(target: &Target, port_count: usize) -> Span {
    let span: Span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&spinner_style());
    span.pb_set_message(
        &format!(
            "Probing {} on {}...",
            format!("{port_count} port(s)").green().bold(),
            target.to_string().color(colors::IPV4_ADDR)
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
    span
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}
