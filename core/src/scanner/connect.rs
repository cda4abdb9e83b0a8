//! Connect scan: one full TCP handshake per port.
//!
//! Every port gets its own tokio task. A task takes a permit from the
//! [`ConcurrencyGate`] before dialing and gives it back when the attempt ends,
//! whatever the outcome. Each task reports only its own classification, so
//! the result map is filled in one place after all attempts finished.

use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use penscan_common::{
    config::{DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT, ScanConfig},
    network::ports::PortSpec,
    scan::{PortState, ScanResult},
};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::network::tcp::{ConnectOutcome, Connector, TcpConnector};

use super::gate::ConcurrencyGate;

#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    pub timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl From<&ScanConfig> for ConnectOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            timeout: cfg.timeout,
            max_concurrency: cfg.max_concurrency,
        }
    }
}

/// Connect scan over the real network.
pub async fn scan_connect(target: Ipv4Addr, ports: &PortSpec, opts: ConnectOptions) -> ScanResult {
    scan_connect_with(Arc::new(TcpConnector), target, ports, opts).await
}

/// Connect scan through an arbitrary [`Connector`].
///
/// Returns exactly one entry per requested port.
pub async fn scan_connect_with<C>(
    connector: Arc<C>,
    target: Ipv4Addr,
    ports: &PortSpec,
    opts: ConnectOptions,
) -> ScanResult
where
    C: Connector + ?Sized + 'static,
{
    let gate = ConcurrencyGate::new(opts.max_concurrency);
    debug!(
        ports = ports.len(),
        capacity = gate.capacity(),
        "starting connect scan against {target}"
    );

    let attempts: Vec<(u16, JoinHandle<ConnectOutcome>)> = ports
        .iter()
        .map(|port| {
            let addr = SocketAddrV4::new(target, port);
            let handle = tokio::spawn(attempt(
                Arc::clone(&connector),
                gate.clone(),
                addr,
                opts.timeout,
            ));
            (port, handle)
        })
        .collect();

    let mut result = ScanResult::new();
    for (port, handle) in attempts {
        let outcome: ConnectOutcome = handle.await.unwrap_or_else(|e| {
            debug!("connect attempt on port {port} aborted: {e}");
            ConnectOutcome::Failed(io::ErrorKind::Other)
        });
        trace!(port, ?outcome, "connect attempt finished");
        result.record(port, PortState::from(outcome));
    }
    result
}

async fn attempt<C>(
    connector: Arc<C>,
    gate: ConcurrencyGate,
    addr: SocketAddrV4,
    probe_timeout: Duration,
) -> ConnectOutcome
where
    C: Connector + ?Sized,
{
    let Ok(_permit) = gate.acquire().await else {
        return ConnectOutcome::Failed(io::ErrorKind::Other);
    };
    let outcome: ConnectOutcome = connector.connect(addr, probe_timeout).await;
    if let ConnectOutcome::Failed(kind) = outcome {
        debug!("connect to {addr} failed: {kind}");
    }
    outcome
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
