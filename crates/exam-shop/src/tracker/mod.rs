//! # Order Tracker
//!
//! "My orders": the backend has no per-client endpoint, so the full collection is fetched
//! and filtered locally by client key.

use crate::api::{ApiError, StoreApi};
use crate::identity::{ClientKeyStore, IdentityError};
use crate::model::Order;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("could not load your orders, please try again")]
    Backend(#[from] ApiError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

#[derive(Clone)]
pub struct OrderTracker {
    api: Arc<dyn StoreApi>,
    keys: ClientKeyStore,
}

impl OrderTracker {
    pub fn new(api: Arc<dyn StoreApi>, keys: ClientKeyStore) -> Self {
        Self { api, keys }
    }

    /// Orders placed under `client_key`, in backend order. An empty key matches nothing.
    #[instrument(skip(self))]
    pub async fn list_mine(&self, client_key: &str) -> Result<Vec<Order>, TrackerError> {
        let all = self.api.list_orders().await?;
        let total = all.len();
        let mine: Vec<Order> = all
            .into_iter()
            .filter(|order| belongs_to(order, client_key))
            .collect();
        info!(total, matched = mine.len(), "Orders filtered by client key");
        Ok(mine)
    }

    /// [`list_mine`](Self::list_mine) with the locally stored key, creating it if needed.
    pub async fn list_my_orders(&self) -> Result<Vec<Order>, TrackerError> {
        let key = self.keys.get_or_create_client_key()?;
        self.list_mine(key.as_str()).await
    }
}

/// Exact match on `client_key`, or the key embedded in a legacy `telegram_username`.
pub fn belongs_to(order: &Order, client_key: &str) -> bool {
    if client_key.is_empty() {
        return false;
    }
    order.client_key.as_deref() == Some(client_key) || order.telegram_username.contains(client_key)
}

/// Case-insensitive match on student name, contact and grade. A blank term keeps everything.
pub fn search<'a>(orders: &'a [Order], term: &str) -> Vec<&'a Order> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return orders.iter().collect();
    }
    orders
        .iter()
        .filter(|order| {
            order.student_name.to_lowercase().contains(&needle)
                || order.contact_handle().to_lowercase().contains(&needle)
                || order.grade.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockStoreApi;
    use crate::identity::{MemoryStorage, CLIENT_KEY_ITEM};
    use crate::model::{OrderStatus, PurchaseType};
    use chrono::Utc;

    fn order(id: &str, key: Option<&str>, telegram: &str) -> Order {
        Order {
            id: id.into(),
            student_name: format!("Student {id}"),
            contact_method: None,
            contact_value: None,
            telegram_username: telegram.into(),
            phone_number: String::new(),
            email: String::new(),
            grade: "Grade 6".into(),
            purchase_type: PurchaseType::All,
            selected_subjects: vec![],
            card_numbers: vec!["123456789012".into()],
            card_number: None,
            total_amount: 50,
            status: OrderStatus::Pending,
            admin_notes: None,
            created_at: Utc::now(),
            confirmed_at: None,
            client_key: key.map(str::to_string),
        }
    }

    fn tracker(api: Arc<MockStoreApi>, stored: &str) -> OrderTracker {
        let keys = ClientKeyStore::new(Arc::new(MemoryStorage::with_item(CLIENT_KEY_ITEM, stored)));
        OrderTracker::new(api, keys)
    }

    #[test]
    fn matches_exact_key_or_legacy_embedding() {
        assert!(belongs_to(&order("1", Some("ck_a"), ""), "ck_a"));
        assert!(!belongs_to(&order("1", Some("ck_ab"), ""), "ck_a"));
        assert!(belongs_to(&order("1", None, "@sara ck_a"), "ck_a"));
        assert!(!belongs_to(&order("1", None, "@sara"), "ck_a"));
    }

    #[test]
    fn empty_key_matches_nothing() {
        assert!(!belongs_to(&order("1", Some(""), ""), ""));
        assert!(!belongs_to(&order("1", None, "@sara"), ""));
    }

    #[tokio::test]
    async fn test_list_mine_keeps_only_own_orders() {
        let api = Arc::new(MockStoreApi::new());
        api.expect_list_orders().return_ok(vec![
            order("o1", Some("ck_a"), ""),
            order("o2", Some("ck_b"), ""),
            order("o3", None, "@old ck_a"),
        ]);

        let mine = tracker(api.clone(), "ck_a").list_my_orders().await.unwrap();
        let ids: Vec<&str> = mine.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o3"]);
        api.verify();
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces() {
        let api = Arc::new(MockStoreApi::new());
        api.expect_list_orders()
            .return_err(ApiError::Network("timeout".into()));

        let err = tracker(api, "ck_a").list_mine("ck_a").await.unwrap_err();
        assert!(matches!(err, TrackerError::Backend(_)));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut a = order("1", None, "");
        a.student_name = "Sara Ali".into();
        let mut b = order("2", None, "");
        b.contact_value = Some("@Omar".into());
        b.grade = "Grade 9".into();
        let orders = vec![a, b];

        assert_eq!(search(&orders, "sara")[0].id, "1");
        assert_eq!(search(&orders, "@omar")[0].id, "2");
        assert_eq!(search(&orders, "GRADE 9").len(), 1);
        assert_eq!(search(&orders, "  ").len(), 2);
        assert!(search(&orders, "nobody").is_empty());
    }
}
