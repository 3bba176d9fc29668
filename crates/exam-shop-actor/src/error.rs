//! # Framework Errors
//!
//! Common error types shared by every actor and client built on this crate.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the original error untouched when it is not an entity error of type `E`.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("stale order")]
    struct StaleOrder;

    #[test]
    fn downcast_entity_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(StaleOrder));
        assert_eq!(err.downcast_entity::<StaleOrder>().unwrap(), StaleOrder);
    }

    #[test]
    fn downcast_entity_passes_through_other_errors() {
        let err = FrameworkError::NotFound("order_1".into());
        let back = err.downcast_entity::<StaleOrder>().unwrap_err();
        assert!(matches!(back, FrameworkError::NotFound(id) if id == "order_1"));
    }
}
