//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that serves one record type.
//! It implements the "Server" side of the Actor Model: it owns the mailbox, the storage handle
//! and the ID generator, and answers every request it receives.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::id::IdGenerator;
use crate::message::{ResourceRequest, Response};
use crate::store::{MemoryStore, Store};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// The generic actor that serves a single record type.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of the channel and
/// the component's storage handle. State lives in the store, not in the actor, so the actor
/// itself has nothing to protect.
///
/// **Concurrency Model**:
/// Every request pulled off the mailbox runs on its own Tokio task. A slow create (one that
/// waits on other actors from inside `on_create`) never blocks a concurrent read. Within one
/// request the steps run strictly in sequence. The store is the only shared mutable resource
/// and it handles its own synchronization.
///
/// **Cancellation**:
/// If the caller drops its request future, the response channel closes and the task abandons
/// whatever step it is on. Work already handed to another actor may or may not have completed
/// by then.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` with a store and an ID generator to get the
///     `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, MemoryStore, ResourceActor, ShortToken};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: String, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = String;
///     type Create = String;
///     type Context = ();
///     type Error = NoteError;
///     const TABLE: &'static str = "note";
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(id: String, text: String) -> Result<Self, NoteError> {
///         Ok(Self { id, text })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     // 1. Create
///     let (actor, client) =
///         ResourceActor::<Note>::new(10, MemoryStore::default(), ShortToken::default());
///
///     // 2. Wire & Run
///     tokio::spawn(actor.run(()));
///
///     // 3. Use
///     let note = client.create("hello".to_string()).await.unwrap();
///     assert_eq!(note.id.len(), 8);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: mint ID → `from_create_params` → `on_create` → single `insert`. Any failure
///   before the insert leaves storage untouched.
/// * **Get**: `fetch` → `on_load`. A missing row answers `Ok(None)`.
/// * **List**: `list` → `on_load` for every row.
pub struct ResourceActor<T: ActorEntity, S: Store<T> = MemoryStore<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: S,
    ids: Box<dyn IdGenerator<T::Id>>,
}

impl<T: ActorEntity, S: Store<T>> ResourceActor<T, S> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `store` - The storage handle this actor exclusively writes to.
    /// * `ids` - The strategy used to mint identifiers for new records.
    pub fn new(
        buffer_size: usize,
        store: S,
        ids: impl IdGenerator<T::Id>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            ids: Box::new(ids),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped, then waits for the
    /// requests still in flight.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = T::TABLE;
        info!(entity_type, "Actor started");

        let shared = Arc::new(Shared {
            store: self.store,
            ids: self.ids,
            context,
        });
        let mut in_flight = JoinSet::new();
        let mut served: u64 = 0;

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => {
                        served += 1;
                        in_flight.spawn(serve(shared.clone(), msg));
                    }
                    None => break,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(entity_type, error = %e, "Request task failed");
                    }
                }
            }
        }

        let draining = in_flight.len();
        if draining > 0 {
            debug!(entity_type, draining, "Draining in-flight requests");
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(entity_type, error = %e, "Request task failed");
            }
        }

        info!(entity_type, served, "Shutdown");
    }
}

/// Everything a request task needs, shared between all of them.
struct Shared<T: ActorEntity, S> {
    store: S,
    ids: Box<dyn IdGenerator<T::Id>>,
    context: T::Context,
}

impl<T: ActorEntity, S: Store<T>> Shared<T, S> {
    async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let entity_type = T::TABLE;
        debug!(entity_type, ?params, "Create");
        let id = self.ids.next_id();

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        // Await the async hook
        if let Err(e) = item.on_create(&self.context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if let Err(e) = self.store.insert(item.clone()).await {
            warn!(entity_type, %id, error = %e, "Persist failed");
            return Err(e.into());
        }

        info!(entity_type, %id, "Created");
        Ok(item)
    }

    async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let entity_type = T::TABLE;
        let item = self.store.fetch(&id).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Load failed");
            FrameworkError::from(e)
        })?;
        debug!(entity_type, %id, found = item.is_some(), "Get");

        match item {
            Some(mut item) => {
                if let Err(e) = item.on_load(&self.context).await {
                    warn!(entity_type, %id, error = %e, "on_load failed");
                    return Err(FrameworkError::EntityError(Box::new(e)));
                }
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, ids: Vec<T::Id>) -> Result<Vec<T>, FrameworkError> {
        let entity_type = T::TABLE;
        let mut items = self.store.list(&ids).await.map_err(|e| {
            warn!(entity_type, error = %e, "List failed");
            FrameworkError::from(e)
        })?;
        debug!(entity_type, requested = ids.len(), found = items.len(), "List");

        for item in items.iter_mut() {
            if let Err(e) = item.on_load(&self.context).await {
                warn!(entity_type, id = %item.id(), error = %e, "on_load failed");
                return Err(FrameworkError::EntityError(Box::new(e)));
            }
        }
        Ok(items)
    }
}

async fn serve<T: ActorEntity, S: Store<T>>(shared: Arc<Shared<T, S>>, msg: ResourceRequest<T>) {
    match msg {
        ResourceRequest::Create { params, respond_to } => {
            respond(respond_to, shared.create(params)).await
        }
        ResourceRequest::Get { id, respond_to } => respond(respond_to, shared.get(id)).await,
        ResourceRequest::List { ids, respond_to } => respond(respond_to, shared.list(ids)).await,
    }
}

/// Runs `work` unless the caller stops listening first.
async fn respond<R>(mut respond_to: Response<R>, work: impl Future<Output = Result<R, FrameworkError>>) {
    tokio::select! {
        biased;
        _ = respond_to.closed() => {
            debug!("Caller went away, request abandoned");
        }
        result = work => {
            let _ = respond_to.send(result);
        }
    }
}
