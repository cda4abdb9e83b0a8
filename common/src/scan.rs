//! Per-port results handed from the scanners to the reporting layer.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    Open,
    Closed,
}

impl PortState {
    pub fn is_open(self) -> bool {
        matches!(self, PortState::Open)
    }

    /// `1` for open, `0` for closed.
    pub fn as_flag(self) -> u8 {
        match self {
            PortState::Open => 1,
            PortState::Closed => 0,
        }
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "open"),
            PortState::Closed => write!(f, "closed"),
        }
    }
}

/// Sparse mapping from requested port to its state.
///
/// A connect scan writes one entry per requested port. A SYN scan only writes
/// ports it saw answer with SYN+ACK, so an absent port means "not open".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    states: BTreeMap<u16, PortState>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, port: u16, state: PortState) {
        self.states.insert(port, state);
    }

    pub fn get(&self, port: u16) -> Option<PortState> {
        self.states.get(&port).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Open ports in ascending order.
    pub fn open_ports(&self) -> Vec<u16> {
        self.iter()
            .filter(|(_, state)| state.is_open())
            .map(|(port, _)| port)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, PortState)> + '_ {
        self.states.iter().map(|(port, state)| (*port, *state))
    }
}

impl FromIterator<(u16, PortState)> for ScanResult {
    fn from_iter<T: IntoIterator<Item = (u16, PortState)>>(iter: T) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

/// Renders as `{21:0, 22:1}`.
impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .iter()
            .map(|(port, state)| format!("{port}:{}", state.as_flag()))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
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
