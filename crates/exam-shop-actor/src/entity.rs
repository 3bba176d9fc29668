//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a resource must satisfy to be held by the
//! generic `ResourceActor`. Entities are not created by the actor: they are mirrored from a
//! remote collection (a REST backend, for instance) and loaded in bulk. What the actor adds
//! is sequential, lock-free mutation through custom actions.
//!
//! # Architecture Note
//! Associated types keep every request type-safe. An `Order` actor only accepts
//! `OrderAction`s and only hands back the `Order`'s own error type, so a request meant for
//! one resource can never be routed to another.
//!
//! # Context
//! The `Context` associated type is injected into [`ActorEntity::handle_action`] by
//! `ResourceActor::run`. It usually carries the remote API client, so an action can talk
//! to the backend before the local snapshot is changed.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Enum representing resource-specific operations (e.g., `Review`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor, not one per action. Clients match on a single type; the
    /// price is that every action's signature admits every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this entity is stored under.
    fn id(&self) -> Self::Id;

    /// Handle a custom resource-specific action.
    ///
    /// The actor runs this against a copy of the stored entity and only commits the copy
    /// when the hook returns `Ok`, so an implementation may mutate `self` freely before
    /// discovering a failure.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
