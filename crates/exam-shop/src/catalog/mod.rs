//! # Catalog Browser
//!
//! Read-only access to grades, subjects and prices, plus the subject-page selection that
//! turns a browsing session into an [`OrderContext`] for checkout.

pub mod selection;

pub use selection::*;

use crate::api::{ApiError, StoreApi};
use crate::model::{Grade, Pricing, Subject};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("could not load the catalog, please try again")]
    Backend(#[from] ApiError),
}

/// Fetches reference data. Every call goes to the backend.
#[derive(Clone)]
pub struct CatalogClient {
    api: Arc<dyn StoreApi>,
}

impl CatalogClient {
    pub fn new(api: Arc<dyn StoreApi>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list_grades(&self) -> Result<Vec<Grade>, CatalogError> {
        let grades = self.api.list_grades().await?;
        info!(count = grades.len(), "Grades loaded");
        Ok(grades)
    }

    /// Subjects of `grade_value`. An unknown grade comes back empty or as an error,
    /// depending on the backend.
    #[instrument(skip(self))]
    pub async fn list_subjects(&self, grade_value: &str) -> Result<Vec<Subject>, CatalogError> {
        let subjects = self.api.list_subjects(grade_value).await?;
        info!(count = subjects.len(), "Subjects loaded");
        Ok(subjects)
    }

    #[instrument(skip(self))]
    pub async fn pricing(&self) -> Result<Pricing, CatalogError> {
        Ok(self.api.pricing().await?)
    }
}
