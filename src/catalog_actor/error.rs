//! Error types for the catalog component.

use actor_framework::{FrameworkError, StoreError};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::model::ProductId;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The catalog store failed or rejected the operation.
    #[error("Catalog persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// The catalog actor could not be reached or did not answer in time.
    #[error("Catalog call failed: {0}")]
    Upstream(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Persistence(_) => ErrorKind::Persistence,
            CatalogError::Upstream(_) => ErrorKind::UpstreamCall,
        }
    }

    pub(crate) fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Store(e) => CatalogError::Persistence(e),
            other => other
                .downcast_entity::<CatalogError>()
                .unwrap_or_else(|other| CatalogError::Upstream(other.to_string())),
        }
    }
}
