//! Hand-built IPv4/TCP packets for the stealth scanner.
//!
//! Everything in this crate is pure computation over byte buffers. Nothing
//! here ever opens or touches a socket.

pub mod checksum;
pub mod ipv4;
pub mod probe;
pub mod tcp;

pub use checksum::checksum;
pub use probe::{ProbeBuilder, ProbePacket};
pub use tcp::TcpReply;
