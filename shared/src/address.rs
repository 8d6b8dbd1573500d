//! Query targets and the `host:port` form bookmarks are stored in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("expected an address of the form host:port")]
    MissingPort,

    #[error("host is empty")]
    EmptyHost,

    #[error("port {0:?} is not a number")]
    InvalidPort(String),

    #[error("port {0} is out of range (1-65535)")]
    PortOutOfRange(u32),
}

/// A server to query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTarget {
    pub host: String,
    pub port: u16,
}

impl QueryTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses `host:port`. The string must contain exactly one `:`, so bare
    /// IPv6 literals are not accepted.
    pub fn parse(address: &str) -> Result<Self, AddressParseError> {
        let mut parts = address.split(':');
        let (host, port) = match (parts.next(), parts.next(), parts.next()) {
            (Some(host), Some(port), None) => (host.trim(), port.trim()),
            _ => return Err(AddressParseError::MissingPort),
        };

        if host.is_empty() {
            return Err(AddressParseError::EmptyHost);
        }

        let port: u32 = port
            .parse()
            .map_err(|_| AddressParseError::InvalidPort(port.to_string()))?;
        if port == 0 || port > u16::MAX as u32 {
            return Err(AddressParseError::PortOutOfRange(port));
        }

        Ok(Self::new(host, port as u16))
    }
}

impl FromStr for QueryTarget {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
