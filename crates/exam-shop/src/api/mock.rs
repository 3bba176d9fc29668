//! # Scripted backend for tests
//!
//! `MockStoreApi` answers [`StoreApi`] calls from a queue of expectations, in declaration
//! order, and records what was sent to it. A call that does not match the next expectation
//! panics with the expectation it found instead.
//!
//! ```rust
//! use exam_shop::api::mock::MockStoreApi;
//! use exam_shop::api::{ApiError, StoreApi};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockStoreApi::new();
//!     api.expect_list_orders().return_ok(vec![]);
//!     api.expect_get_order("o-1").return_err(ApiError::Network("down".into()));
//!
//!     assert!(api.list_orders().await.unwrap().is_empty());
//!     assert!(api.get_order("o-1").await.is_err());
//!     api.verify();
//! }
//! ```

use crate::api::{ApiError, StoreApi};
use crate::model::{CreatedOrder, Grade, Order, OrderPayload, OrderReview, Pricing, Subject};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug)]
enum Expectation {
    ListGrades(Result<Vec<Grade>, ApiError>),
    ListSubjects {
        grade: String,
        response: Result<Vec<Subject>, ApiError>,
    },
    Pricing(Result<Pricing, ApiError>),
    CreateOrder(Result<CreatedOrder, ApiError>),
    ListOrders(Result<Vec<Order>, ApiError>),
    GetOrder {
        id: String,
        response: Result<Order, ApiError>,
    },
    UpdateOrder {
        id: String,
        response: Result<Order, ApiError>,
    },
}

#[derive(Default)]
pub struct MockStoreApi {
    expectations: Mutex<VecDeque<Expectation>>,
    submitted: Mutex<Vec<OrderPayload>>,
    reviews: Mutex<Vec<(String, OrderReview)>>,
}

impl MockStoreApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list_grades(&self) -> ApiExpectation<'_, Vec<Grade>> {
        ApiExpectation::new(self, Expectation::ListGrades)
    }

    pub fn expect_list_subjects(&self, grade: &str) -> ApiExpectation<'_, Vec<Subject>> {
        let grade = grade.to_string();
        ApiExpectation::new(self, move |response| Expectation::ListSubjects {
            grade,
            response,
        })
    }

    pub fn expect_pricing(&self) -> ApiExpectation<'_, Pricing> {
        ApiExpectation::new(self, Expectation::Pricing)
    }

    pub fn expect_create_order(&self) -> ApiExpectation<'_, CreatedOrder> {
        ApiExpectation::new(self, Expectation::CreateOrder)
    }

    pub fn expect_list_orders(&self) -> ApiExpectation<'_, Vec<Order>> {
        ApiExpectation::new(self, Expectation::ListOrders)
    }

    pub fn expect_get_order(&self, id: &str) -> ApiExpectation<'_, Order> {
        let id = id.to_string();
        ApiExpectation::new(self, move |response| Expectation::GetOrder { id, response })
    }

    pub fn expect_update_order(&self, id: &str) -> ApiExpectation<'_, Order> {
        let id = id.to_string();
        ApiExpectation::new(self, move |response| Expectation::UpdateOrder { id, response })
    }

    /// Payloads received by `create_order`, in call order.
    pub fn submitted_payloads(&self) -> Vec<OrderPayload> {
        self.submitted.lock().unwrap().clone()
    }

    /// `(id, review)` pairs received by `update_order`, in call order.
    pub fn reviews(&self) -> Vec<(String, OrderReview)> {
        self.reviews.lock().unwrap().clone()
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn next(&self, call: &str) -> Expectation {
        match self.expectations.lock().unwrap().pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected {call} call: no expectations left"),
        }
    }
}

/// Completes an expectation with the response the mock answers it with.
pub struct ApiExpectation<'a, R> {
    mock: &'a MockStoreApi,
    make: Box<dyn FnOnce(Result<R, ApiError>) -> Expectation + Send + 'a>,
}

impl<'a, R> ApiExpectation<'a, R> {
    fn new(
        mock: &'a MockStoreApi,
        make: impl FnOnce(Result<R, ApiError>) -> Expectation + Send + 'a,
    ) -> Self {
        Self {
            mock,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        self.mock.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn return_err(self, error: ApiError) {
        let expectation = (self.make)(Err(error));
        self.mock.expectations.lock().unwrap().push_back(expectation);
    }
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn list_grades(&self) -> Result<Vec<Grade>, ApiError> {
        match self.next("list_grades") {
            Expectation::ListGrades(response) => response,
            other => panic!("list_grades called, expected {other:?}"),
        }
    }

    async fn list_subjects(&self, grade: &str) -> Result<Vec<Subject>, ApiError> {
        match self.next("list_subjects") {
            Expectation::ListSubjects {
                grade: expected,
                response,
            } => {
                assert_eq!(grade, expected, "list_subjects for unexpected grade");
                response
            }
            other => panic!("list_subjects called, expected {other:?}"),
        }
    }

    async fn pricing(&self) -> Result<Pricing, ApiError> {
        match self.next("pricing") {
            Expectation::Pricing(response) => response,
            other => panic!("pricing called, expected {other:?}"),
        }
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, ApiError> {
        match self.next("create_order") {
            Expectation::CreateOrder(response) => {
                self.submitted.lock().unwrap().push(payload.clone());
                response
            }
            other => panic!("create_order called, expected {other:?}"),
        }
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        match self.next("list_orders") {
            Expectation::ListOrders(response) => response,
            other => panic!("list_orders called, expected {other:?}"),
        }
    }

    async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        match self.next("get_order") {
            Expectation::GetOrder {
                id: expected,
                response,
            } => {
                assert_eq!(id, expected, "get_order for unexpected id");
                response
            }
            other => panic!("get_order called, expected {other:?}"),
        }
    }

    async fn update_order(&self, id: &str, review: &OrderReview) -> Result<Order, ApiError> {
        match self.next("update_order") {
            Expectation::UpdateOrder {
                id: expected,
                response,
            } => {
                assert_eq!(id, expected, "update_order for unexpected id");
                self.reviews
                    .lock()
                    .unwrap()
                    .push((id.to_string(), review.clone()));
                response
            }
            other => panic!("update_order called, expected {other:?}"),
        }
    }
}
