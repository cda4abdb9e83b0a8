use std::net::Ipv4Addr;

use penscan_common::error::ScanError;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::tcp::{MutableTcpPacket, TcpFlags, TcpPacket};
use tracing::trace;

use crate::ipv4::IPV4_HDR_LEN;

pub const TCP_HDR_LEN: usize = 20;
pub const WINDOW: u16 = 0x7110;

/// Builds a 20-byte TCP header without options or payload. The checksum is
/// left at zero; it can only be computed together with the pseudo-header.
pub fn build_tcp_header(
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    window: u16,
    syn: bool,
) -> Result<[u8; TCP_HDR_LEN], ScanError> {
    let mut buffer = [0u8; TCP_HDR_LEN];
    {
        let mut tcp = MutableTcpPacket::new(&mut buffer)
            .ok_or(ScanError::MalformedPacket("tcp header buffer too small"))?;
        tcp.set_source(src_port);
        tcp.set_destination(dst_port);
        tcp.set_sequence(seq);
        tcp.set_acknowledgement(ack);
        tcp.set_data_offset(5);
        tcp.set_reserved(0);
        tcp.set_flags(if syn { TcpFlags::SYN } else { 0 });
        tcp.set_window(window);
        tcp.set_checksum(0);
        tcp.set_urgent_ptr(0);
    }
    Ok(buffer)
}

/// The fields of an inbound segment the SYN scanner cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpReply {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub syn: bool,
    pub ack: bool,
    pub rst: bool,
}

impl TcpReply {
    pub fn is_syn_ack(&self) -> bool {
        self.syn && self.ack
    }
}

/// Parses a raw IPv4 datagram carrying TCP.
///
/// Honours the IHL field, so replies with IP options are located correctly.
/// Anything truncated, non-IPv4 or non-TCP yields `None`.
pub fn parse_reply(frame: &[u8]) -> Option<TcpReply> {
    let ipv4: Ipv4Packet = Ipv4Packet::new(frame)?;
    if ipv4.get_version() != 4 || ipv4.get_next_level_protocol() != IpNextHeaderProtocols::Tcp {
        return None;
    }

    let ihl: usize = usize::from(ipv4.get_header_length()) * 4;
    if ihl < IPV4_HDR_LEN || frame.len() < ihl + TCP_HDR_LEN {
        trace!(ihl, len = frame.len(), "dropping truncated TCP reply");
        return None;
    }

    let tcp: TcpPacket = TcpPacket::new(&frame[ihl..])?;
    let flags = tcp.get_flags();

    Some(TcpReply {
        src_addr: ipv4.get_source(),
        dst_addr: ipv4.get_destination(),
        src_port: tcp.get_source(),
        dst_port: tcp.get_destination(),
        syn: flags & TcpFlags::SYN != 0,
        ack: flags & TcpFlags::ACK != 0,
        rst: flags & TcpFlags::RST != 0,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
