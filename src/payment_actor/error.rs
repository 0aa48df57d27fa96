//! Error types for the payment component.

use actor_framework::{FrameworkError, StoreError};
use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    /// The payment store failed to record the charge.
    #[error("Payment persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// The payment actor could not be reached or did not answer in time.
    #[error("Payment call failed: {0}")]
    Upstream(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Persistence(_) => ErrorKind::Persistence,
            PaymentError::Upstream(_) => ErrorKind::UpstreamCall,
        }
    }

    pub(crate) fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Store(e) => PaymentError::Persistence(e),
            other => other
                .downcast_entity::<PaymentError>()
                .unwrap_or_else(|other| PaymentError::Upstream(other.to_string())),
        }
    }
}
