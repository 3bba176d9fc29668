//! # Exam Shop Actor
//!
//! Building blocks for keeping a local, sequentially-mutated snapshot of a remote collection.
//! A storefront client fetches the order list from its backend, loads it into a
//! [`ResourceActor`], and applies admin decisions as actions that call the backend first and
//! commit locally only when the call succeeds.
//!
//! ## Why an actor?
//!
//! - **Isolated state**: the snapshot lives in one Tokio task, no locks.
//! - **Sequential processing**: two reviews of the same order cannot interleave.
//! - **Typed messages**: every entity declares its own `Action`, `ActionResult` and `Error`.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your domain type and its actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and the snapshot
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ```rust
//! use exam_shop_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Card { id: String, used: bool }
//!
//! #[derive(Debug)] enum CardAction { MarkUsed }
//! #[derive(Debug, thiserror::Error)] #[error("card already used")] struct AlreadyUsed;
//!
//! #[async_trait]
//! impl ActorEntity for Card {
//!     type Id = String;
//!     type Action = CardAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = AlreadyUsed;
//!
//!     fn id(&self) -> String { self.id.clone() }
//!
//!     async fn handle_action(&mut self, _: CardAction, _: &()) -> Result<(), AlreadyUsed> {
//!         if self.used { return Err(AlreadyUsed); }
//!         self.used = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Card>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.load(vec![Card { id: "c1".into(), used: false }]).await.unwrap();
//!     client.perform_action("c1".into(), CardAction::MarkUsed).await.unwrap();
//!     assert!(client.perform_action("c1".into(), CardAction::MarkUsed).await.is_err());
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which answers a real `ResourceClient` from a
//! queue of expectations, so code wrapping a client can be tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
