use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use penscan_common::error::ScanError;

// Any port works, connecting a UDP socket sends nothing.
const ROUTE_PROBE_PORT: u16 = 80;

/// Local IPv4 address the routing table would use to reach `target`.
pub fn source_addr_for(target: Ipv4Addr) -> Result<Ipv4Addr, ScanError> {
    let socket: UdpSocket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((target, ROUTE_PROBE_PORT))?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(addr) => Err(ScanError::InvalidAddress(addr.to_string())),
    }
}
