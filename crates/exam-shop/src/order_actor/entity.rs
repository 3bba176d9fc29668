//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order book mirrors `GET /api/orders`. Its one action, a review, is written to the
//! backend first; the actor commits the local copy only if the backend accepted it.

use crate::api::StoreApi;
use crate::model::{Order, OrderReview};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use exam_shop_actor::ActorEntity;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Confirm or reject a pending order, with notes.
    Review(OrderReview),
}

#[async_trait]
impl ActorEntity for Order {
    type Id = String;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = Arc<dyn StoreApi>;
    type Error = OrderError;

    fn id(&self) -> String {
        self.id.clone()
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        api: &Arc<dyn StoreApi>,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Review(review) => {
                if !self.status.can_transition_to(review.status) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: review.status,
                    });
                }

                let stored = api.update_order(&self.id, &review).await?;
                debug!(order_id = %self.id, status = %stored.status, "Backend accepted review");

                self.status = review.status;
                self.admin_notes = Some(review.admin_notes);
                self.confirmed_at = stored.confirmed_at.or(self.confirmed_at);
                Ok(self.clone())
            }
        }
    }
}
