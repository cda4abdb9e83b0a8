use std::io;
use std::net::IpAddr;
use std::time::Duration;

use penscan_common::error::ScanError;
use penscan_protocols::ProbePacket;
use pnet::{
    packet::{Packet, ip::IpNextHeaderProtocols, ipv4::Ipv4Packet},
    transport::{self, TransportChannelType, TransportReceiver, TransportSender},
};

const TRANSPORT_BUFFER_SIZE: usize = 4096;

/// Shortest wait a receive can honour. The socket timeout has microsecond
/// resolution and a zero timeout blocks forever.
pub const MIN_RECV_TIMEOUT: Duration = Duration::from_micros(1);
const CHANNEL_TYPE_TCP_L3: TransportChannelType =
    TransportChannelType::Layer3(IpNextHeaderProtocols::Tcp);

/// Network-layer send/receive used by the SYN scanner.
pub trait RawChannel {
    /// Transmits a fully built probe, bypassing connection setup.
    fn send(&mut self, probe: &ProbePacket) -> Result<(), ScanError>;

    /// Waits up to `timeout` for the next inbound IPv4 datagram.
    /// `Ok(None)` means nothing arrived in time, including when `timeout` is
    /// below [`MIN_RECV_TIMEOUT`].
    fn recv(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, ScanError>;
}

/// Raw IPv4 socket with `IP_HDRINCL`, so the kernel sends our header as is.
pub struct RawSocketChannel {
    tx: TransportSender,
    rx: TransportReceiver,
}

impl RawSocketChannel {
    pub fn open() -> Result<Self, ScanError> {
        let (tx, rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_TCP_L3)
            .map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => ScanError::PrivilegeRequired(format!(
                    "opening a raw socket was denied ({e}); SYN scan requires root or CAP_NET_RAW"
                )),
                _ => ScanError::Socket(e),
            })?;
        Ok(Self { tx, rx })
    }
}

impl RawChannel for RawSocketChannel {
    fn send(&mut self, probe: &ProbePacket) -> Result<(), ScanError> {
        let packet = Ipv4Packet::new(probe.as_bytes())
            .ok_or(ScanError::MalformedPacket("probe shorter than an ipv4 header"))?;
        self.tx.send_to(packet, IpAddr::V4(probe.dst_addr()))?;
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, ScanError> {
        if timeout < MIN_RECV_TIMEOUT {
            return Ok(None);
        }
        let mut iterator = transport::ipv4_packet_iter(&mut self.rx);
        let received = iterator
            .next_with_timeout(timeout)?
            .map(|(packet, _source_ip)| packet.packet().to_vec());
        Ok(received)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn open_without_privilege_is_reported() {
        if is_root::is_root() {
            return;
        }
        // Succeeds only when the test binary holds CAP_NET_RAW.
        let res = RawSocketChannel::open();
        assert!(
            matches!(res, Ok(_) | Err(ScanError::PrivilegeRequired(_))),
            "unexpected error: {:?}",
            res.err()
        );
    }

    #[test]
    #[ignore]
    fn sub_microsecond_recv_returns_immediately() {
        let Ok(mut channel) = RawSocketChannel::open() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(channel.recv(Duration::from_nanos(500)).map(|f| f.is_none()));
        });

        let received = rx.recv_timeout(Duration::from_secs(1));
        assert!(matches!(received, Ok(Ok(true))), "recv blocked: {received:?}");
    }
}
