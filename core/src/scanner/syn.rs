//! Stealth (half-open) SYN scan.
//!
//! For each port, strictly one after the other:
//! 1. build a SYN probe with the scan's fixed source port,
//! 2. push it out through the raw socket,
//! 3. wait up to the timeout for a reply addressed back to us,
//! 4. mark the port open only on SYN+ACK.
//!
//! The handshake is never completed. A refused port and a silent one look
//! the same in the result: neither is recorded. Only one raw receive socket
//! exists per scan, which is why the ports are probed sequentially.

use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use penscan_common::{
    config::{DEFAULT_TIMEOUT, ScanConfig, default_source_port},
    error::ScanError,
    network::ports::PortSpec,
    scan::{PortState, ScanResult},
};
use penscan_protocols::{ProbeBuilder, ProbePacket, TcpReply, tcp};
use tracing::{debug, trace};

use crate::network::route;
use crate::network::transport::{MIN_RECV_TIMEOUT, RawChannel, RawSocketChannel};

#[derive(Debug, Clone, Copy)]
pub struct SynOptions {
    pub timeout: Duration,
    pub source_port: u16,
}

impl Default for SynOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            source_port: default_source_port(),
        }
    }
}

impl From<&ScanConfig> for SynOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            timeout: cfg.timeout,
            source_port: cfg.source_port,
        }
    }
}

/// How a single probe ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynOutcome {
    /// SYN+ACK came back: something is listening.
    AckReceived,
    /// The port answered with anything else, usually RST.
    Rejected,
    /// Nothing matching arrived before the timeout.
    TimedOut,
}

/// SYN scan over a real raw socket. Blocks the calling thread.
///
/// Fails with `PrivilegeRequired` before any probe is sent when the raw
/// socket cannot be opened (neither root nor `CAP_NET_RAW`).
pub fn scan_syn(target: Ipv4Addr, ports: &PortSpec, opts: SynOptions) -> Result<ScanResult, ScanError> {
    let mut channel = RawSocketChannel::open()?;

    let src_addr: Ipv4Addr = route::source_addr_for(target)?;
    let builder = ProbeBuilder::with_source_port(src_addr, opts.source_port);

    debug!(
        "starting SYN scan against {target} from {src_addr}:{}",
        opts.source_port
    );
    scan_syn_with(&mut channel, &builder, target, ports, opts.timeout)
}

/// SYN scan through an arbitrary [`RawChannel`].
///
/// The result holds only ports that answered SYN+ACK. A failing send aborts
/// the scan, a failing receive only costs the port it was waiting for.
pub fn scan_syn_with<R>(
    channel: &mut R,
    builder: &ProbeBuilder,
    target: Ipv4Addr,
    ports: &PortSpec,
    probe_timeout: Duration,
) -> Result<ScanResult, ScanError>
where
    R: RawChannel + ?Sized,
{
    let mut result = ScanResult::new();

    for port in ports.iter() {
        let probe: ProbePacket = builder.build_probe(IpAddr::V4(target), port)?;

        channel.send(&probe)?;

        let outcome: SynOutcome = await_reply(channel, builder, target, port, probe_timeout);
        trace!(port, ?outcome, "probe classified");
        if outcome == SynOutcome::AckReceived {
            result.record(port, PortState::Open);
        }
    }

    Ok(result)
}

fn await_reply<R>(
    channel: &mut R,
    builder: &ProbeBuilder,
    target: Ipv4Addr,
    port: u16,
    probe_timeout: Duration,
) -> SynOutcome
where
    R: RawChannel + ?Sized,
{
    let deadline: Instant = Instant::now() + probe_timeout;

    loop {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining < MIN_RECV_TIMEOUT {
            return SynOutcome::TimedOut;
        }

        let frame: Vec<u8> = match channel.recv(remaining) {
            Ok(Some(frame)) => frame,
            Ok(None) => return SynOutcome::TimedOut,
            Err(e) => {
                debug!("receiving reply for port {port} failed: {e}");
                return SynOutcome::TimedOut;
            }
        };

        // Unrelated traffic on the raw socket is skipped, not classified.
        let Some(reply) = tcp::parse_reply(&frame) else {
            continue;
        };
        if !is_reply_to_probe(&reply, builder, target, port) {
            continue;
        }

        return if reply.is_syn_ack() {
            SynOutcome::AckReceived
        } else {
            SynOutcome::Rejected
        };
    }
}

fn is_reply_to_probe(reply: &TcpReply, builder: &ProbeBuilder, target: Ipv4Addr, port: u16) -> bool {
    reply.src_addr == target && reply.src_port == port && reply.dst_port == builder.src_port
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
