use std::net::Ipv4Addr;

use penscan_common::error::ScanError;
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::MutableIpv4Packet;

use crate::checksum::checksum;

pub const IPV4_HDR_LEN: usize = 20;
pub const IDENTIFICATION: u16 = 0xabcd;
pub const TTL: u8 = 64;

/// Builds a 20-byte IPv4 header (no options) with its checksum filled in.
pub fn build_ip_header(
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    protocol: IpNextHeaderProtocol,
    total_length: u16,
) -> Result<[u8; IPV4_HDR_LEN], ScanError> {
    let mut buffer = [0u8; IPV4_HDR_LEN];
    {
        let mut ipv4 = MutableIpv4Packet::new(&mut buffer)
            .ok_or(ScanError::MalformedPacket("ipv4 header buffer too small"))?;
        ipv4.set_version(4);
        ipv4.set_header_length(5);
        ipv4.set_dscp(0);
        ipv4.set_ecn(0);
        ipv4.set_total_length(total_length);
        ipv4.set_identification(IDENTIFICATION);
        ipv4.set_flags(0);
        ipv4.set_fragment_offset(0);
        ipv4.set_ttl(TTL);
        ipv4.set_next_level_protocol(protocol);
        ipv4.set_source(src_addr);
        ipv4.set_destination(dst_addr);
        ipv4.set_checksum(0);
    }

    let csum: u16 = checksum(&buffer);
    buffer[10..12].copy_from_slice(&csum.to_be_bytes());
    Ok(buffer)
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
    use pnet::packet::ip::IpNextHeaderProtocols;
    use pnet::packet::ipv4::{self, Ipv4Packet};

    fn sample() -> [u8; IPV4_HDR_LEN] {
        build_ip_header(
            Ipv4Addr::new(192, 168, 1, 10),
            Ipv4Addr::new(192, 168, 1, 1),
            IpNextHeaderProtocols::Tcp,
            40,
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_fields_byte_exact() {
        let header = sample();
        assert_eq!(header[0], 0x45);
        assert_eq!(header[1], 0x00);
        assert_eq!(&header[2..4], &[0x00, 0x28]);
        assert_eq!(&header[4..6], &[0xab, 0xcd]);
        assert_eq!(&header[6..8], &[0x00, 0x00]);
        assert_eq!(header[8], 64);
        assert_eq!(header[9], 6);
        assert_eq!(&header[12..16], &[192, 168, 1, 10]);
        assert_eq!(&header[16..20], &[192, 168, 1, 1]);
    }

    #[test]
    fn test_checksum_verifies_and_matches_pnet() {
        let header = sample();
        assert_eq!(checksum(&header), 0);

        let parsed = Ipv4Packet::new(&header).unwrap();
        assert_eq!(parsed.get_checksum(), ipv4::checksum(&parsed));
    }
}
