//! Type-safe wrappers around [`ResourceClient`](exam_shop_actor::ResourceClient).

pub mod order_client;

pub use order_client::*;
