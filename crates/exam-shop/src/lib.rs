//! # Exam Shop
//!
//! Typed client for an exam-question storefront: browse grades and subjects, check out
//! with prepaid card codes, track your own orders and review every order as an admin.
//!
//! ## Components
//!
//! - **[catalog]**: grades, subjects, prices and the subject-page selection.
//! - **[checkout]**: draft validation and order submission.
//! - **[identity]**: the locally persisted client key that tags orders.
//! - **[tracker]**: "my orders", filtered by client key.
//! - **[admin]**: password gate and the review console over the order book.
//! - **[order_actor]** / **[clients]**: the order book as a [`ResourceActor`](exam_shop_actor::ResourceActor).
//! - **[api]**: the REST contract and its `reqwest` implementation.
//! - **[lifecycle]**: wiring, shutdown and tracing setup.
//!
//! ## Testing
//!
//! [`api::mock::MockStoreApi`] scripts the backend; `exam_shop_actor::mock` scripts the actor.

pub mod admin;
pub mod api;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod identity;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod tracker;
