//! Error types for the order component.

use actor_framework::{FrameworkError, StoreError};
use thiserror::Error;

use crate::catalog_actor::CatalogError;
use crate::error::ErrorKind;
use crate::model::OrderId;
use crate::payment_actor::PaymentError;

/// Errors that can occur while creating or reading orders.
///
/// Failures of the catalog and payment calls made on the order's behalf keep their own
/// type, so a caller can tell which dependency let the workflow down.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order store failed or rejected the write.
    #[error("Order persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// The resolved prices add up to more than an amount can hold. Nothing was charged.
    #[error("Order total overflows for order {0}")]
    TotalOverflow(OrderId),

    /// The order actor itself could not be reached or did not answer in time.
    #[error("Order call failed: {0}")]
    Upstream(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::Persistence(_) => ErrorKind::Persistence,
            OrderError::TotalOverflow(_) => ErrorKind::InvalidRequest,
            OrderError::Upstream(_) => ErrorKind::UpstreamCall,
            // Whatever went wrong inside a dependency, from here it is an upstream failure.
            OrderError::Catalog(_) | OrderError::Payment(_) => ErrorKind::UpstreamCall,
        }
    }

    pub(crate) fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Store(e) => OrderError::Persistence(e),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|other| OrderError::Upstream(other.to_string())),
        }
    }
}
