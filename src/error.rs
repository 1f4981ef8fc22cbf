//! Error types for address parsing and arithmetic.
//!
//! Every failure is local to one call and carries the offending token or the
//! violated bound, so the `Display` text can be shown to a user as-is.

use thiserror::Error;

/// The coarse error categories callers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFormat,
    OctetOutOfRange,
    PrefixOutOfRange,
    AmbiguousCompression,
    AddressSpaceExhausted,
    FamilyMismatch,
}

/// Direction of a sequential step that ran off the end of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Step::Next => write!(f, "after"),
            Step::Prev => write!(f, "before"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddrError {
    #[error("invalid format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("value '{token}' out of range (max {max:#x})")]
    OctetOutOfRange { token: String, max: u32 },

    #[error("prefix length {prefix} out of range ({min}..={max})")]
    PrefixOutOfRange { prefix: String, min: u8, max: u8 },

    #[error("'::' appears more than once in '{input}'")]
    AmbiguousCompression { input: String },

    #[error("no address {step} {address}")]
    AddressSpaceExhausted { address: String, step: Step },

    #[error("address family mismatch: expected IPv{expected}, found IPv{found}")]
    FamilyMismatch { expected: u8, found: u8 },

    #[error("entry {index} ('{token}') is not an address or network: {source}")]
    InvalidSetEntry {
        index: usize,
        token: String,
        #[source]
        source: Box<AddrError>,
    },
}

impl AddrError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        AddrError::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The category of this error.
    ///
    /// A rejected set entry is reported as `InvalidFormat` whatever the
    /// underlying cause, since the set as a whole did not parse.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddrError::InvalidFormat { .. } | AddrError::InvalidSetEntry { .. } => {
                ErrorKind::InvalidFormat
            }
            AddrError::OctetOutOfRange { .. } => ErrorKind::OctetOutOfRange,
            AddrError::PrefixOutOfRange { .. } => ErrorKind::PrefixOutOfRange,
            AddrError::AmbiguousCompression { .. } => ErrorKind::AmbiguousCompression,
            AddrError::AddressSpaceExhausted { .. } => ErrorKind::AddressSpaceExhausted,
            AddrError::FamilyMismatch { .. } => ErrorKind::FamilyMismatch,
        }
    }
}

pub type AddrResult<T> = Result<T, AddrError>;
