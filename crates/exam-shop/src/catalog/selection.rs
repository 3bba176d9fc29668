//! Subject-page state: purchase type and chosen subjects for one grade.

use crate::model::{calculate_total, PurchaseType, Subject};
use thiserror::Error;

/// What checkout needs to know about the purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContext {
    pub grade: String,
    pub purchase_type: PurchaseType,
    pub selected_subjects: Vec<String>,
    pub total_amount: u32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("select at least one subject")]
    NothingSelected,
}

#[derive(Debug, Clone)]
pub struct SubjectSelection {
    grade: String,
    available: Vec<String>,
    purchase_type: PurchaseType,
    selected: Vec<String>,
}

impl SubjectSelection {
    /// Starts as a `single` purchase with nothing selected.
    pub fn new(grade: impl Into<String>, subjects: &[Subject]) -> Self {
        Self {
            grade: grade.into(),
            available: subjects.iter().map(|s| s.id.clone()).collect(),
            purchase_type: PurchaseType::Single,
            selected: Vec::new(),
        }
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn purchase_type(&self) -> PurchaseType {
        self.purchase_type
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Flips one subject in or out of a `single` selection. Returns whether it is now
    /// selected. Unknown ids and `all` purchases are left alone.
    pub fn toggle(&mut self, subject_id: &str) -> bool {
        if self.purchase_type == PurchaseType::All
            || !self.available.iter().any(|id| id == subject_id)
        {
            return self.selected.iter().any(|id| id == subject_id);
        }
        if let Some(pos) = self.selected.iter().position(|id| id == subject_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(subject_id.to_string());
            true
        }
    }

    /// `all` selects every listed subject; `single` starts over empty.
    pub fn set_purchase_type(&mut self, purchase_type: PurchaseType) {
        self.purchase_type = purchase_type;
        self.selected = match purchase_type {
            PurchaseType::All => self.available.clone(),
            PurchaseType::Single => Vec::new(),
        };
    }

    pub fn total(&self) -> u32 {
        calculate_total(self.purchase_type, self.selected.len())
    }

    pub fn to_order_context(&self) -> Result<OrderContext, SelectionError> {
        if self.purchase_type == PurchaseType::Single && self.selected.is_empty() {
            return Err(SelectionError::NothingSelected);
        }
        Ok(OrderContext {
            grade: self.grade.clone(),
            purchase_type: self.purchase_type,
            selected_subjects: self.selected.clone(),
            total_amount: self.total(),
        })
    }
}
