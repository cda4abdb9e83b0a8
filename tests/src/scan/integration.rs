#![cfg(test)]
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use penscan_common::config::{ScanConfig, ScanMode};
use penscan_common::error::ScanError;
use penscan_common::network::{ports::PortSpec, target::Target};
use penscan_common::scan::PortState;
use penscan_core::network::tcp::{ConnectOutcome, Connector};
use penscan_core::network::transport::{RawChannel, RawSocketChannel};
use penscan_core::scanner::{self, connect, syn};
use penscan_protocols::{ProbeBuilder, ProbePacket, checksum};
use tokio::net::TcpListener;

const TARGET: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

struct AcceptingConnector {
    open: HashSet<u16>,
}

#[async_trait]
impl Connector for AcceptingConnector {
    async fn connect(&self, addr: SocketAddrV4, _timeout: Duration) -> ConnectOutcome {
        if self.open.contains(&addr.port()) {
            ConnectOutcome::Connected
        } else {
            ConnectOutcome::Refused
        }
    }
}

/// Replies with SYN+ACK for the listed ports and stays silent otherwise.
struct SynAckChannel {
    open: HashSet<u16>,
    pending: Option<Vec<u8>>,
}

impl RawChannel for SynAckChannel {
    fn send(&mut self, probe: &ProbePacket) -> Result<(), ScanError> {
        let port = probe.dst_port();
        if self.open.contains(&port) {
            let mut reply = ProbeBuilder::with_source_port(TARGET, port)
                .build_probe(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), probe.src_port())?
                .as_bytes()
                .to_vec();
            reply[33] = 0x12;
            self.pending = Some(reply);
        }
        Ok(())
    }

    fn recv(&mut self, _timeout: Duration) -> Result<Option<Vec<u8>>, ScanError> {
        Ok(self.pending.take())
    }
}

/// A port that was bound a moment ago and is closed now.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn connect_scan_loopback_open_and_closed() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed = closed_port().await;
    tokio::spawn(async move {
        while let Ok((_stream, _)) = listener.accept().await {}
    });

    let target = Target::from(Ipv4Addr::LOCALHOST);
    let ports: PortSpec = [open, closed].into_iter().collect();
    let cfg = ScanConfig::default().with_timeout(Duration::from_millis(500));

    let result = scanner::perform_scan(&target, &ports, &cfg).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.get(open), Some(PortState::Open));
    assert_eq!(result.get(closed), Some(PortState::Closed));
}

#[tokio::test]
async fn connect_scenario_through_test_double() {
    let connector = Arc::new(AcceptingConnector {
        open: HashSet::from([22, 80]),
    });
    let ports = PortSpec::parse("21,22,80,443").unwrap();

    let result =
        connect::scan_connect_with(connector, TARGET, &ports, connect::ConnectOptions::default())
            .await;

    assert_eq!(result.to_string(), "{21:0, 22:1, 80:1, 443:0}");
}

#[test]
fn syn_scenario_through_test_double() {
    let mut channel = SynAckChannel {
        open: HashSet::from([80]),
        pending: None,
    };
    let builder = ProbeBuilder::with_source_port(Ipv4Addr::new(192, 0, 2, 1), 51_000);
    let ports = PortSpec::parse("80,81").unwrap();

    let result =
        syn::scan_syn_with(&mut channel, &builder, TARGET, &ports, Duration::from_millis(10))
            .unwrap();

    assert_eq!(result.to_string(), "{80:1}");
}

#[tokio::test]
async fn syn_scan_without_root_is_refused() {
    if is_root::is_root() || RawSocketChannel::open().is_ok() {
        return;
    }
    let target = Target::from(Ipv4Addr::LOCALHOST);
    let ports = PortSpec::parse("80").unwrap();
    let cfg = ScanConfig::default().with_mode(ScanMode::Syn);

    let res = scanner::perform_scan(&target, &ports, &cfg).await;

    assert!(matches!(res, Err(ScanError::PrivilegeRequired(_))));
}

#[tokio::test]
async fn empty_port_set_is_rejected_before_scanning() {
    let target = Target::from(Ipv4Addr::LOCALHOST);
    let res = scanner::perform_scan(&target, &PortSpec::default(), &ScanConfig::default()).await;
    assert!(matches!(res, Err(ScanError::InvalidPortSpec { .. })));
}

#[test]
fn ipv6_targets_are_rejected() {
    assert!(matches!(
        Target::resolve("::1"),
        Err(ScanError::InvalidAddress(_))
    ));

    let builder = ProbeBuilder::with_source_port(Ipv4Addr::LOCALHOST, 40_000);
    assert!(matches!(
        builder.build_probe(IpAddr::V6(Ipv6Addr::LOCALHOST), 80),
        Err(ScanError::InvalidAddress(_))
    ));
}

#[test]
fn built_probe_checksums_verify() {
    let src = Ipv4Addr::new(192, 168, 1, 5);
    let dst = Ipv4Addr::new(192, 168, 1, 1);
    let probe = ProbeBuilder::with_source_port(src, 54_321)
        .build_probe(IpAddr::V4(dst), 443)
        .unwrap();

    assert_eq!(checksum(probe.ip_header()), 0);

    let mut pseudo = Vec::with_capacity(12 + probe.tcp_header().len());
    pseudo.extend_from_slice(&src.octets());
    pseudo.extend_from_slice(&dst.octets());
    pseudo.extend_from_slice(&[0, 6, 0, 20]);
    pseudo.extend_from_slice(probe.tcp_header());
    assert_eq!(checksum(&pseudo), 0);
}
