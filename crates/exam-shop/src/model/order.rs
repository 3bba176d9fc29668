//! Represents a purchase of exam question packages.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](exam_shop_actor::ActorEntity) trait, so the
//! admin console can hold the order collection in a [`ResourceActor`](exam_shop_actor::ResourceActor).
//! See [`crate::order_actor`] for the review action.
use crate::model::catalog::{ALL_SUBJECTS_PRICE, SINGLE_SUBJECT_PRICE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Rejected => "rejected",
        }
    }

    /// Only a pending order can be decided, and only into a final state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Rejected)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "rejected" => Ok(OrderStatus::Rejected),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    /// Pay per chosen subject.
    Single,
    /// Flat bundle price for every subject of the grade.
    All,
}

impl Display for PurchaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseType::Single => f.write_str("single"),
            PurchaseType::All => f.write_str("all"),
        }
    }
}

/// Total an order must carry: 10 per subject for `single`, 50 flat for `all`.
pub fn calculate_total(purchase_type: PurchaseType, subject_count: usize) -> u32 {
    match purchase_type {
        PurchaseType::All => ALL_SUBJECTS_PRICE,
        PurchaseType::Single => SINGLE_SUBJECT_PRICE.saturating_mul(subject_count as u32),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Telegram,
    Whatsapp,
    Email,
}

impl Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactMethod::Telegram => f.write_str("telegram"),
            ContactMethod::Whatsapp => f.write_str("whatsapp"),
            ContactMethod::Email => f.write_str("email"),
        }
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" => Ok(ContactMethod::Telegram),
            "whatsapp" => Ok(ContactMethod::Whatsapp),
            "email" => Ok(ContactMethod::Email),
            other => Err(format!("unknown contact method: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub student_name: String,
    #[serde(default)]
    pub contact_method: Option<ContactMethod>,
    #[serde(default)]
    pub contact_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telegram_username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    pub grade: String,
    pub purchase_type: PurchaseType,
    #[serde(default)]
    pub selected_subjects: Vec<String>,
    #[serde(default)]
    pub card_numbers: Vec<String>,
    /// Comma-joined card codes of the legacy payload shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub total_amount: u32,
    pub status: OrderStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::optional")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client_key: Option<String>,
}

impl Order {
    /// Short human-facing order number.
    pub fn reference(&self) -> String {
        short_reference(&self.id)
    }

    /// Card codes from whichever payload shape the order was created with.
    pub fn card_codes(&self) -> Vec<String> {
        if !self.card_numbers.is_empty() {
            return self.card_numbers.clone();
        }
        self.card_number
            .as_deref()
            .map(|joined| {
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Contact handle: the modern value, else the legacy telegram field.
    pub fn contact_handle(&self) -> &str {
        match self.contact_value.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => &self.telegram_username,
        }
    }
}

/// First 8 characters of an order id, uppercased.
pub fn short_reference(id: &str) -> String {
    id.chars().take(8).collect::<String>().to_uppercase()
}

/// Body of `PUT /api/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReview {
    pub status: OrderStatus,
    pub admin_notes: String,
}

/// What the client needs from the create-order response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    pub id: String,
}

/// Legacy contact fields may be stored as `null`.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps arrive either as RFC 3339 or as the backend's naive UTC ISO form.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod optional {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
