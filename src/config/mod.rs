//! Configuration management
//!
//! Handles natgw.toml plus the bootstrap helper that reads the host's
//! ephemeral-port range. The table itself only ever sees two integers.

mod types;
mod validation;

pub use types::*;
pub use validation::{ValidationResult, validate};

use crate::{Error, Result};
use std::path::Path;

const PROC_PORT_RANGE: &str = "/proc/sys/net/ipv4/ip_local_port_range";

/// Load configuration from a TOML file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let config: Config = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
    Ok(config)
}

/// Reads the host's usable ephemeral-port range from
/// `/proc/sys/net/ipv4/ip_local_port_range`. Callers that don't configure
/// an explicit range pass this straight to the table.
pub fn local_port_range() -> Result<(u16, u16)> {
    let content = std::fs::read_to_string(PROC_PORT_RANGE)?;
    parse_port_range(&content)
}

fn parse_port_range(content: &str) -> Result<(u16, u16)> {
    let mut fields = content.split_whitespace();
    let (Some(start), Some(end)) = (fields.next(), fields.next()) else {
        return Err(Error::Config(format!(
            "malformed port range '{}'",
            content.trim()
        )));
    };

    let start: u16 = start
        .parse()
        .map_err(|_| Error::Config(format!("bad port range start '{start}'")))?;
    let end: u16 = end
        .parse()
        .map_err(|_| Error::Config(format!("bad port range end '{end}'")))?;

    if start == 0 || start > end {
        return Err(Error::InvalidPortRange { start, end });
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_range() {
        assert_eq!(parse_port_range("32768\t60999\n").unwrap(), (32768, 60999));
        assert_eq!(parse_port_range("40000 40002").unwrap(), (40000, 40002));
    }

    #[test]
    fn test_parse_port_range_rejects_garbage() {
        assert!(parse_port_range("").is_err());
        assert!(parse_port_range("32768").is_err());
        assert!(parse_port_range("foo bar").is_err());
        assert!(parse_port_range("99999 100000").is_err());
    }

    #[test]
    fn test_parse_port_range_rejects_inverted() {
        assert!(matches!(
            parse_port_range("60999 32768"),
            Err(Error::InvalidPortRange { .. })
        ));
        assert!(matches!(
            parse_port_range("0 60999"),
            Err(Error::InvalidPortRange { .. })
        ));
    }
}
