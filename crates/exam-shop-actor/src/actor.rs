//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, which owns a local snapshot of a remote
//! collection. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and ensuring exclusive access to the snapshot.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that holds an ordered, keyed snapshot of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store` and `order`)
/// and the receiver end of the channel. Each actor processes its messages *sequentially*,
/// so the snapshot needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (an API client, usually) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use exam_shop_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Ticket { id: u32, open: bool }
/// #[derive(Debug)] enum TicketAction { Close }
/// #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u32;
///     type Action = TicketAction;
///     type ActionResult = bool;
///     type Context = ();
///     type Error = TicketError;
///
///     fn id(&self) -> u32 { self.id }
///     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<bool, TicketError> {
///         let was_open = self.open;
///         self.open = false;
///         Ok(was_open)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Ticket>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.load(vec![Ticket { id: 7, open: true }]).await.unwrap();
///     assert!(client.perform_action(7, TicketAction::Close).await.unwrap());
/// }
/// ```
///
/// # Operations
///
/// * **Load**: clears the snapshot and inserts the items in the given order. Later duplicates
///   of an ID replace earlier ones but keep the first position.
/// * **Put**: replaces an entity in place, or appends it when the ID is new.
/// * **Action**: clones the stored entity, runs `handle_action` on the clone and commits it
///   only on success. A failed action leaves the snapshot untouched.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When it is full, client calls wait
    /// for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn insert(&mut self, item: T) {
        let id = item.id();
        if self.store.insert(id.clone(), item).is_none() {
            self.order.push(id);
        }
    }

    fn snapshot(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every action. This allows entities to reach
    /// dependencies that were created *after* the actor was instantiated but *before* the
    /// loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "exam_shop::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Load { items, respond_to } => {
                    self.store.clear();
                    self.order.clear();
                    for item in items {
                        self.insert(item);
                    }
                    info!(entity_type, size = self.store.len(), "Loaded");
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Put { item, respond_to } => {
                    let id = item.id();
                    debug!(entity_type, %id, "Put");
                    self.insert(item);
                    info!(entity_type, %id, size = self.store.len(), "Stored");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut draft) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), draft);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
