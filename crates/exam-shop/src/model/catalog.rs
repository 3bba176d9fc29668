//! Read-only reference data owned by the backend.

use serde::{Deserialize, Serialize};

/// Price of one subject under a `single` purchase.
pub const SINGLE_SUBJECT_PRICE: u32 = 10;

/// Flat price of the `all` bundle.
pub const ALL_SUBJECTS_PRICE: u32 = 50;

/// A school level that scopes subjects and pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Canonical value, used as the lookup key for subjects and stored on orders.
    pub value: String,
}

/// A purchasable course unit within a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub price: u32,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

/// Price list as published by `GET /api/pricing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub single_subject: PriceTier,
    pub all_subjects: PriceTier,
}

/// Wire envelope of `GET /api/grades`.
#[derive(Debug, Deserialize)]
pub(crate) struct GradeList {
    pub grades: Vec<Grade>,
}
