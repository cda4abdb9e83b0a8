//! # Scan Target Model
//!
//! A target is the host string the user typed plus the IPv4 address it
//! resolved to. Resolution happens exactly once, before any probe is sent;
//! the scanners only ever see the address.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::error::ScanError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub addr: Ipv4Addr,
}

impl Target {
    /// Resolves `host` (dotted quad or hostname) to its first IPv4 address.
    pub fn resolve(host: &str) -> Result<Self, ScanError> {
        let host: &str = host.trim();
        if host.is_empty() {
            return Err(ScanError::InvalidAddress(host.to_string()));
        }

        if let Ok(ip) = host.parse::<IpAddr>() {
            return match ip {
                IpAddr::V4(addr) => Ok(Self::from(addr)),
                IpAddr::V6(_) => Err(ScanError::InvalidAddress(host.to_string())),
            };
        }

        let addr: Ipv4Addr = lookup_ipv4(host)?;
        Ok(Self {
            host: host.to_string(),
            addr,
        })
    }

    /// True when the user typed something other than the bare address.
    pub fn is_named(&self) -> bool {
        self.host != self.addr.to_string()
    }
}

impl From<Ipv4Addr> for Target {
    fn from(addr: Ipv4Addr) -> Self {
        Self {
            host: addr.to_string(),
            addr,
        }
    }
}

impl FromStr for Target {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_named() {
            write!(f, "{} ({})", self.host, self.addr)
        } else {
            write!(f, "{}", self.addr)
        }
    }
}

/// Accepts only an IPv4 address; anything else is an `InvalidAddress`.
pub fn require_ipv4(ip: IpAddr) -> Result<Ipv4Addr, ScanError> {
    match ip {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(addr) => Err(ScanError::InvalidAddress(addr.to_string())),
    }
}

fn lookup_ipv4(host: &str) -> Result<Ipv4Addr, ScanError> {
    let addrs = (host, 0)
        .to_socket_addrs()
        .map_err(|_| ScanError::InvalidAddress(host.to_string()))?;

    addrs
        .into_iter()
        .find_map(|sock_addr| match sock_addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(|| ScanError::InvalidAddress(host.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
