//! # Order Client
//!
//! Provides a high‑level API for the admin order book.
//! It wraps a `ResourceClient<Order>` and maps framework failures to [`OrderError`].
use crate::model::{Order, OrderReview};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use exam_shop_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Replaces the order book with a fresh backend listing.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn replace_all(&self, orders: Vec<Order>) -> Result<usize, OrderError> {
        debug!("replace_all called");
        self.inner.load(orders).await.map_err(Self::map_error)
    }

    /// Inserts or replaces one order, e.g. after re-fetching it.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn upsert(&self, order: Order) -> Result<(), OrderError> {
        self.inner.put(order).await.map_err(Self::map_error)
    }

    /// Confirms or rejects an order through the backend, then in the book.
    #[instrument(skip(self, review), fields(status = %review.status))]
    pub async fn review(&self, id: String, review: OrderReview) -> Result<Order, OrderError> {
        info!("Sending review to actor");
        self.inner
            .perform_action(id, OrderAction::Review(review))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
