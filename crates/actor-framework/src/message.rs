//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Immutable Records
/// Records are written once and never edited, so the request set is reduced to the
/// operations such a resource supports:
///
/// - **Create**: Mints an ID, builds the record from [`ActorEntity::Create`], runs
///   [`ActorEntity::on_create`], persists it and answers with the stored record.
/// - **Get**: Point lookup by ID; `None` when no row matches.
/// - **List**: Filtered lookup. An empty `ids` means "every record"; otherwise at most one
///   record per distinct requested ID, unknown IDs silently dropped, order unspecified.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
}
