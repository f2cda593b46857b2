//! Calculator error type.

use thiserror::Error;

/// Rejection of a CIDR input, raised before any output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("malformed CIDR string: '{0}'")]
    Malformed(String),

    #[error("octet out of range: {0} > 255")]
    OctetOutOfRange(u16),

    #[error("prefix out of range: /{0} > /32")]
    PrefixOutOfRange(u16),

    #[error("invalid netmask: {0} is not a contiguous mask")]
    InvalidNetmask(String),
}

impl InvalidInputError {
    /// Short reason without the offending value, for grouping in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            InvalidInputError::Malformed(_) => "malformed CIDR string",
            InvalidInputError::OctetOutOfRange(_) => "octet out of range",
            InvalidInputError::PrefixOutOfRange(_) => "prefix out of range",
            InvalidInputError::InvalidNetmask(_) => "invalid netmask",
        }
    }
}
