//! # Lifecycle
//!
//! Builds the storefront, owns the background actor and installs logging.
//!
//! Actors are created without dependencies and receive them when they start running:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = crate::order_actor::new();
//! tokio::spawn(order_actor.run(api.clone())); // Context = Arc<dyn StoreApi>
//! ```
//!
//! Shutdown is channel-driven. Dropping the last `OrderClient` ends the actor's receive
//! loop, so [`Storefront::shutdown`] drops the components before awaiting the task.

pub mod storefront;
pub mod tracing;

pub use self::storefront::*;
pub use self::tracing::setup_tracing;
