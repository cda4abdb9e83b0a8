use std::io;
use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use penscan_common::scan::PortState;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// How a single connect attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Handshake completed within the timeout.
    Connected,
    /// The peer actively refused (RST).
    Refused,
    /// No answer within the timeout.
    TimedOut,
    /// Any other socket failure, e.g. descriptor exhaustion.
    Failed(io::ErrorKind),
}

impl From<ConnectOutcome> for PortState {
    fn from(outcome: ConnectOutcome) -> Self {
        match outcome {
            ConnectOutcome::Connected => PortState::Open,
            ConnectOutcome::Refused | ConnectOutcome::TimedOut | ConnectOutcome::Failed(_) => {
                PortState::Closed
            }
        }
    }
}

/// Performs one connection-oriented handshake.
///
/// The connect scanner only talks to this trait, so tests can swap the real
/// network for a deterministic double.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, addr: SocketAddrV4, probe_timeout: Duration) -> ConnectOutcome;
}

/// Plain tokio TCP handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddrV4, probe_timeout: Duration) -> ConnectOutcome {
        match timeout(probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => ConnectOutcome::Connected,
            Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => ConnectOutcome::Refused,
            Ok(Err(e)) => ConnectOutcome::Failed(e.kind()),
            Err(_elapsed) => ConnectOutcome::TimedOut,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
