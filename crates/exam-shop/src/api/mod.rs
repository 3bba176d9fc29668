//! # Backend API
//!
//! [`StoreApi`] is the seam between the storefront components and the REST backend.
//! Production code uses [`HttpStoreApi`]; tests script a [`mock::MockStoreApi`].
//!
//! | Call | Method/Path |
//! |------|-------------|
//! | `list_grades` | `GET /api/grades` |
//! | `list_subjects` | `GET /api/subjects/{grade}` |
//! | `pricing` | `GET /api/pricing` |
//! | `create_order` | `POST /api/orders` |
//! | `list_orders` | `GET /api/orders` |
//! | `get_order` | `GET /api/orders/{id}` |
//! | `update_order` | `PUT /api/orders/{id}` |

pub mod error;
pub mod http;
pub mod mock;

pub use error::ApiError;
pub use http::HttpStoreApi;

use crate::model::{CreatedOrder, Grade, Order, OrderPayload, OrderReview, Pricing, Subject};
use async_trait::async_trait;

/// REST contract consumed by the storefront.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Grades in backend order.
    async fn list_grades(&self) -> Result<Vec<Grade>, ApiError>;

    /// Subjects of one grade, looked up by the grade's canonical value.
    async fn list_subjects(&self, grade: &str) -> Result<Vec<Subject>, ApiError>;

    async fn pricing(&self) -> Result<Pricing, ApiError>;

    async fn create_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, ApiError>;

    /// The full, unfiltered order collection.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    async fn get_order(&self, id: &str) -> Result<Order, ApiError>;

    /// Applies an admin decision and returns the order as the backend now stores it.
    async fn update_order(&self, id: &str, review: &OrderReview) -> Result<Order, ApiError>;
}
