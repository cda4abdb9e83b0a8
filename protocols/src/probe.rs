//! Assembly of complete SYN probes.
//!
//! A [`ProbeBuilder`] carries everything that stays the same for every probe
//! of one scan (source address and port, sequence, window). The only fields
//! that vary between two probes of the same builder are the destination port
//! and the two checksums.

use std::net::{IpAddr, Ipv4Addr};

use penscan_common::config;
use penscan_common::error::ScanError;
use penscan_common::network::target;
use pnet::packet::ip::IpNextHeaderProtocols;

use crate::checksum::checksum;
use crate::ipv4::{IPV4_HDR_LEN, build_ip_header};
use crate::tcp::{TCP_HDR_LEN, WINDOW, build_tcp_header};

pub const PROBE_LEN: usize = IPV4_HDR_LEN + TCP_HDR_LEN;
const PSEUDO_HDR_LEN: usize = 12;
const TCP_PROTOCOL: u8 = 6;

/// A finished IPv4 + TCP SYN segment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePacket {
    bytes: [u8; PROBE_LEN],
}

impl ProbePacket {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn ip_header(&self) -> &[u8] {
        &self.bytes[..IPV4_HDR_LEN]
    }

    pub fn tcp_header(&self) -> &[u8] {
        &self.bytes[IPV4_HDR_LEN..]
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.bytes[16], self.bytes[17], self.bytes[18], self.bytes[19])
    }

    pub fn src_port(&self) -> u16 {
        u16::from_be_bytes([self.bytes[20], self.bytes[21]])
    }

    pub fn dst_port(&self) -> u16 {
        u16::from_be_bytes([self.bytes[22], self.bytes[23]])
    }
}

/// Per-scan packet template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeBuilder {
    pub src_addr: Ipv4Addr,
    pub src_port: u16,
    pub seq: u32,
    pub window: u16,
}

impl ProbeBuilder {
    /// Template using the process-wide source port.
    pub fn new(src_addr: Ipv4Addr) -> Self {
        Self::with_source_port(src_addr, config::default_source_port())
    }

    pub fn with_source_port(src_addr: Ipv4Addr, src_port: u16) -> Self {
        Self {
            src_addr,
            src_port,
            seq: 0,
            window: WINDOW,
        }
    }

    /// Builds the probe for `dst_port` on `dst_ip`.
    ///
    /// Fails with `InvalidAddress` before any byte is laid out if `dst_ip`
    /// is not IPv4.
    pub fn build_probe(&self, dst_ip: IpAddr, dst_port: u16) -> Result<ProbePacket, ScanError> {
        let dst_addr: Ipv4Addr = target::require_ipv4(dst_ip)?;

        let mut tcp_header: [u8; TCP_HDR_LEN] =
            build_tcp_header(self.src_port, dst_port, self.seq, 0, self.window, true)?;

        let tcp_csum: u16 = checksum(&self.pseudo_header_with(dst_addr, &tcp_header));
        tcp_header[16..18].copy_from_slice(&tcp_csum.to_be_bytes());

        let ip_header: [u8; IPV4_HDR_LEN] = build_ip_header(
            self.src_addr,
            dst_addr,
            IpNextHeaderProtocols::Tcp,
            PROBE_LEN as u16,
        )?;

        let mut bytes = [0u8; PROBE_LEN];
        bytes[..IPV4_HDR_LEN].copy_from_slice(&ip_header);
        bytes[IPV4_HDR_LEN..].copy_from_slice(&tcp_header);
        Ok(ProbePacket { bytes })
    }

    /// Pseudo-header followed by the TCP segment. Only ever checksummed,
    /// never transmitted.
    fn pseudo_header_with(
        &self,
        dst_addr: Ipv4Addr,
        tcp_header: &[u8; TCP_HDR_LEN],
    ) -> [u8; PSEUDO_HDR_LEN + TCP_HDR_LEN] {
        let mut buf = [0u8; PSEUDO_HDR_LEN + TCP_HDR_LEN];
        buf[0..4].copy_from_slice(&self.src_addr.octets());
        buf[4..8].copy_from_slice(&dst_addr.octets());
        buf[8] = 0;
        buf[9] = TCP_PROTOCOL;
        buf[10..12].copy_from_slice(&(TCP_HDR_LEN as u16).to_be_bytes());
        buf[PSEUDO_HDR_LEN..].copy_from_slice(tcp_header);
        buf
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
