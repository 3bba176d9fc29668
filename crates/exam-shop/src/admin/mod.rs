//! # Admin Console
//!
//! Lists every order, opens one for review and confirms or rejects it. The working copy of
//! the collection lives in the order-book actor ([`crate::order_actor`]); each refresh
//! replaces it wholesale, and a review only lands in it after the backend accepted it.

pub mod filter;
pub mod gate;

pub use filter::*;
pub use gate::*;

use crate::api::{ApiError, StoreApi};
use crate::clients::OrderClient;
use crate::model::{Order, OrderReview, OrderStatus};
use crate::order_actor::OrderError;
use exam_shop_actor::ActorClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("backend request failed: {0}")]
    Backend(#[from] ApiError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl AdminError {
    /// Message for the admin UI. Backend details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Gate(gate) => gate.to_string(),
            AdminError::Backend(_) => "The server request failed. Please try again.".to_string(),
            AdminError::Order(OrderError::InvalidTransition { from, .. }) => {
                format!("This order is already {from}.")
            }
            AdminError::Order(OrderError::NotFound(_)) => {
                "This order no longer exists. Refresh the list.".to_string()
            }
            AdminError::Order(_) => "Could not update the order. Please try again.".to_string(),
        }
    }
}

pub struct AdminConsole {
    gate: AdminGate,
    api: Arc<dyn StoreApi>,
    orders: OrderClient,
    selected: Option<Order>,
}

impl AdminConsole {
    pub fn new(gate: AdminGate, api: Arc<dyn StoreApi>, orders: OrderClient) -> Self {
        Self {
            gate,
            api,
            orders,
            selected: None,
        }
    }

    pub fn authenticate(&mut self, password: &str) -> Result<(), AdminError> {
        Ok(self.gate.authenticate(password)?)
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    pub fn logout(&mut self) {
        self.selected = None;
        self.gate.logout();
    }

    /// Re-fetches the whole collection into the order book and returns it unfiltered.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, AdminError> {
        self.gate.ensure_authenticated()?;
        let fetched = self.api.list_orders().await.map_err(|e| {
            error!(error = %e, "Order list refresh failed");
            e
        })?;
        let count = self.orders.replace_all(fetched).await?;
        info!(count, "Order book refreshed");
        Ok(self.orders.list().await?)
    }

    /// Opens the detail view for an order already in the book.
    #[instrument(skip(self))]
    pub async fn open_order(&mut self, id: &str) -> Result<Order, AdminError> {
        self.gate.ensure_authenticated()?;
        let order = self
            .orders
            .get(id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        self.selected = Some(order.clone());
        Ok(order)
    }

    pub fn selected_order(&self) -> Option<&Order> {
        self.selected.as_ref()
    }

    pub fn close_order(&mut self) {
        self.selected = None;
    }

    /// Confirms or rejects a pending order. On success the book holds the new status and
    /// notes and the detail view is closed; on failure nothing changes.
    #[instrument(skip(self, notes))]
    pub async fn update_order(
        &mut self,
        id: &str,
        status: OrderStatus,
        notes: impl Into<String> + Send,
    ) -> Result<Order, AdminError> {
        self.gate.ensure_authenticated()?;
        let review = OrderReview {
            status,
            admin_notes: notes.into(),
        };
        match self.orders.review(id.to_string(), review).await {
            Ok(order) => {
                info!(order_id = %order.id, status = %order.status, "Order reviewed");
                self.selected = None;
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order review failed");
                Err(e.into())
            }
        }
    }

    /// Re-fetches one order and stores it in the book.
    #[instrument(skip(self))]
    pub async fn refresh_order(&mut self, id: &str) -> Result<Order, AdminError> {
        self.gate.ensure_authenticated()?;
        let order = self.api.get_order(id).await?;
        self.orders.upsert(order.clone()).await?;
        if self.selected.as_ref().is_some_and(|open| open.id == order.id) {
            self.selected = Some(order.clone());
        }
        Ok(order)
    }

    /// The current book narrowed by status and search term. Does not hit the backend.
    pub async fn filtered(
        &self,
        filter: StatusFilter,
        term: &str,
    ) -> Result<Vec<Order>, AdminError> {
        self.gate.ensure_authenticated()?;
        let all = self.orders.list().await?;
        Ok(filter_orders(&all, filter, term))
    }

    pub async fn stats(&self) -> Result<OrderStats, AdminError> {
        self.gate.ensure_authenticated()?;
        let all = self.orders.list().await?;
        Ok(OrderStats::from_orders(&all))
    }
}
