//! # Port Specification
//!
//! Normalizes the user's port expression into an ordered set of ports.
//!
//! Accepted forms:
//! * A single port (e.g., `80`).
//! * A comma-separated list (e.g., `80,443`).
//! * An inclusive range (e.g., `20-22`).
//!
//! List items may themselves be ranges (`22,80-82`).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortSpec {
    ports: BTreeSet<u16>,
}

impl FromStr for PortSpec {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err(ScanError::invalid_port_spec(s, "no ports given"));
        }

        let mut ports: BTreeSet<u16> = BTreeSet::new();
        for token in trimmed.split(',') {
            let token: &str = token.trim();
            match token.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = parse_range(start, end, s)?;
                    ports.extend(start..=end);
                }
                None => {
                    ports.insert(parse_port(token, s)?);
                }
            }
        }

        Ok(Self { ports })
    }
}

impl PortSpec {
    pub fn parse(s: &str) -> Result<Self, ScanError> {
        s.parse()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.iter().copied()
    }
}

impl FromIterator<u16> for PortSpec {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self {
            ports: iter.into_iter().filter(|port| *port != 0).collect(),
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.ports.iter().map(u16::to_string).collect();
        write!(f, "{}", joined.join(","))
    }
}

fn parse_range(start: &str, end: &str, input: &str) -> Result<(u16, u16), ScanError> {
    let start: u16 = parse_port(start.trim(), input)?;
    let end: u16 = parse_port(end.trim(), input)?;
    if start > end {
        return Err(ScanError::invalid_port_spec(
            input,
            format!("range {start}-{end} is reversed"),
        ));
    }
    Ok((start, end))
}

fn parse_port(token: &str, input: &str) -> Result<u16, ScanError> {
    if token.is_empty() {
        return Err(ScanError::invalid_port_spec(input, "empty port token"));
    }

    let port: u16 = token
        .parse::<u16>()
        .map_err(|e| ScanError::invalid_port_spec(input, format!("'{token}': {e}")))?;

    if port == 0 {
        return Err(ScanError::invalid_port_spec(
            input,
            "port 0 is not scannable",
        ));
    }
    Ok(port)
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

    fn ports_of(s: &str) -> Vec<u16> {
        PortSpec::parse(s).unwrap().iter().collect()
    }

    #[test]
    fn test_parse_basic_forms() {
        assert_eq!(ports_of("80"), vec![80]);
        assert_eq!(ports_of("80,443"), vec![80, 443]);
        assert_eq!(ports_of("20-22"), vec![20, 21, 22]);
        assert_eq!(ports_of("1-1"), vec![1]);
        assert_eq!(ports_of("65535"), vec![65535]);
    }

    #[test]
    fn test_parse_mixed_and_whitespace() {
        assert_eq!(ports_of(" 22, 80-82 ,443"), vec![22, 80, 81, 82, 443]);
        // Duplicates collapse
        assert_eq!(ports_of("80,80,79-80"), vec![79, 80]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["abc", "", "   ", "70-60", "0", "65536", "80,", ",80", "80-", "-80", "1-2-3", "8o"] {
            let res = PortSpec::parse(bad);
            assert!(
                matches!(res, Err(ScanError::InvalidPortSpec { .. })),
                "expected InvalidPortSpec for {bad:?}, got {res:?}"
            );
        }
    }

    #[test]
    fn test_full_range_len() {
        let spec = PortSpec::parse("1-65535").unwrap();
        assert_eq!(spec.len(), 65535);
        assert_eq!(spec.iter().next(), Some(1));
        assert_eq!(spec.iter().last(), Some(65535));
    }

    #[test]
    fn test_display_joins_sorted() {
        let spec = PortSpec::parse("443,22,80").unwrap();
        assert_eq!(spec.to_string(), "22,80,443");
    }
}
