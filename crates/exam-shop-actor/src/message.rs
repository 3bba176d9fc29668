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
/// # Snapshot Operations
/// The actor mirrors a collection that lives elsewhere, so the vocabulary is about keeping a
/// local copy in step rather than about creating resources:
///
/// - **Load**: Replace the whole snapshot with a freshly fetched collection, keeping its order.
/// - **List**: Return the snapshot in order.
/// - **Get**: Fetch one entity by ID.
/// - **Put**: Insert or replace a single entity (e.g. after re-fetching one record).
/// - **Action**: Execute a custom [`ActorEntity::Action`] against one entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Load {
        items: Vec<T>,
        respond_to: Response<usize>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Put {
        item: T,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
