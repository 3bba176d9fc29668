//! The admin order book: a [`ResourceActor`] holding the last fetched order collection.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use exam_shop_actor::ResourceActor;

/// Creates a new Order actor and its client. Run the actor with the backend API as context.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}
