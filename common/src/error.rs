//! Error kinds shared by every penscan crate.
//!
//! Only **structural** failures live here. Conditions that concern a single
//! port (a probe timing out, a refused or failed connect) are classifications,
//! not errors, and never abort a scan.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The target could not be resolved to an IPv4 address.
    #[error("invalid address '{0}': target must resolve to an IPv4 address")]
    InvalidAddress(String),

    /// The port expression is malformed.
    #[error("invalid port specification '{spec}': {reason}")]
    InvalidPortSpec { spec: String, reason: String },

    /// A raw socket was requested without sufficient privilege.
    #[error("{0}")]
    PrivilegeRequired(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed packet: {0}")]
    MalformedPacket(&'static str),

    #[error("socket error: {0}")]
    Socket(#[from] io::Error),
}

impl ScanError {
    pub fn invalid_port_spec(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPortSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
