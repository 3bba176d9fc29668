//! The checkout form as the student fills it in.

use crate::model::ContactMethod;

/// Upper bound on card-code entries per order.
pub const MAX_CARD_CODES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDraft {
    pub student_name: String,
    pub contact_method: ContactMethod,
    pub contact_value: String,
    card_codes: Vec<String>,
}

impl Default for CheckoutDraft {
    fn default() -> Self {
        Self {
            student_name: String::new(),
            contact_method: ContactMethod::Telegram,
            contact_value: String::new(),
            card_codes: vec![String::new()],
        }
    }
}

impl CheckoutDraft {
    pub fn new(
        student_name: impl Into<String>,
        contact_method: ContactMethod,
        contact_value: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            contact_method,
            contact_value: contact_value.into(),
            ..Self::default()
        }
    }

    /// Builder-style shorthand: fills the first empty slot or appends one.
    pub fn with_card_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        match self.card_codes.iter().position(|c| c.is_empty()) {
            Some(slot) => self.card_codes[slot] = code,
            None if self.card_codes.len() < MAX_CARD_CODES => self.card_codes.push(code),
            None => {}
        }
        self
    }

    /// Entries as typed, including empty ones.
    pub fn card_codes(&self) -> &[String] {
        &self.card_codes
    }

    /// Adds an empty entry. Returns `false` once the form holds [`MAX_CARD_CODES`] entries.
    pub fn add_card_code(&mut self) -> bool {
        if self.card_codes.len() >= MAX_CARD_CODES {
            return false;
        }
        self.card_codes.push(String::new());
        true
    }

    /// Removes one entry. The last remaining entry is never removed.
    pub fn remove_card_code(&mut self, index: usize) -> bool {
        if self.card_codes.len() <= 1 || index >= self.card_codes.len() {
            return false;
        }
        self.card_codes.remove(index);
        true
    }

    pub fn set_card_code(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.card_codes.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}
