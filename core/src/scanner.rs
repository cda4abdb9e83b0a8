//! The scan **engine**.
//!
//! Two strategies live below this module:
//!
//! * [`connect`] completes a real TCP handshake per port, many at once,
//!   bounded by a [`gate::ConcurrencyGate`].
//! * [`syn`] sends hand-built SYN segments through a raw socket, one port at
//!   a time, and classifies the reply without finishing the handshake. This
//!   one requires **root privileges**.
//!
//! Callers should go through [`perform_scan`], which picks the strategy from
//! the [`ScanConfig`] and keeps the blocking raw-socket work off the async
//! runtime.

use std::io;
use std::time::Instant;

use penscan_common::{
    config::{ScanConfig, ScanMode},
    error::ScanError,
    info,
    network::{ports::PortSpec, target::Target},
    scan::ScanResult,
};

pub mod connect;
pub mod gate;
pub mod syn;

use connect::ConnectOptions;
use syn::SynOptions;

/// Scans `ports` on `target` with the strategy selected in `cfg`.
///
/// Structural problems (empty port set, missing privilege for SYN mode) are
/// returned before any probe leaves the machine. Per-port failures never
/// surface here; they end up as closed or absent entries in the result.
pub async fn perform_scan(
    target: &Target,
    ports: &PortSpec,
    cfg: &ScanConfig,
) -> Result<ScanResult, ScanError> {
    if ports.is_empty() {
        return Err(ScanError::invalid_port_spec("", "no ports to scan"));
    }

    info!(
        "Scanning {} port(s) on {target} ({:?} mode)",
        ports.len(),
        cfg.mode
    );
    let started: Instant = Instant::now();

    let result: ScanResult = match cfg.mode {
        ScanMode::Connect => {
            connect::scan_connect(target.addr, ports, ConnectOptions::from(cfg)).await
        }
        ScanMode::Syn => {
            let addr = target.addr;
            let ports: PortSpec = ports.clone();
            let opts: SynOptions = SynOptions::from(cfg);
            tokio::task::spawn_blocking(move || syn::scan_syn(addr, &ports, opts))
                .await
                .map_err(|e| ScanError::Socket(io::Error::other(e)))??
        }
    };

    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        open = result.open_ports().len(),
        "scan finished"
    );
    Ok(result)
}
