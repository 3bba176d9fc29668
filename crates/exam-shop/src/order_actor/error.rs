//! Error types for the Order actor.

use crate::api::ApiError;
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order-book operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order is not in the local order book.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Only pending orders can be confirmed or rejected.
    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The backend refused or failed the update; nothing was changed locally.
    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
