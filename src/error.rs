//! Error classification shared by the three components.
//!
//! Every component has its own error enum, but callers at the edge only need to know
//! which bucket a failure falls into.

use std::fmt;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested record does not exist.
    NotFound,
    /// A call to another component failed or never answered.
    UpstreamCall,
    /// The component's own storage rejected or failed the operation.
    Persistence,
    /// The request can never succeed as made, whatever state the components are in.
    InvalidRequest,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::UpstreamCall => "upstream_call",
            ErrorKind::Persistence => "persistence",
            ErrorKind::InvalidRequest => "invalid_request",
        };
        f.write_str(name)
    }
}
