//! Field checks for a [`CheckoutDraft`] and card-code display helpers.

use crate::checkout::draft::CheckoutDraft;
use crate::model::ContactMethod;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    StudentName,
    ContactValue,
    /// The card-code list as a whole.
    CardCodes,
    /// One card-code entry, by position.
    CardCode(usize),
}

impl Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftField::StudentName => f.write_str("student_name"),
            DraftField::ContactValue => f.write_str("contact_value"),
            DraftField::CardCodes => f.write_str("card_codes"),
            DraftField::CardCode(i) => write!(f, "card_codes[{i}]"),
        }
    }
}

/// Field → message. Empty means the draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DraftField, &String)> {
        self.0.iter()
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate(draft: &CheckoutDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.student_name.trim().is_empty() {
        errors.insert(DraftField::StudentName, "name is required");
    }

    let contact = draft.contact_value.trim();
    if contact.is_empty() {
        errors.insert(DraftField::ContactValue, "contact is required");
    } else {
        let problem = match draft.contact_method {
            ContactMethod::Telegram if !is_telegram_handle(contact) => {
                Some("telegram username must contain @ (example: @username)")
            }
            ContactMethod::Whatsapp if !is_local_phone(contact) => {
                Some("invalid phone number (example: 07701234567)")
            }
            ContactMethod::Email if !is_email(contact) => {
                Some("invalid email address (example: name@example.com)")
            }
            _ => None,
        };
        if let Some(message) = problem {
            errors.insert(DraftField::ContactValue, message);
        }
    }

    let mut any_code = false;
    for (index, raw) in draft.card_codes().iter().enumerate() {
        let code = normalize_card_code(raw);
        if code.is_empty() {
            continue;
        }
        any_code = true;
        if !is_valid_card_code(&code) {
            errors.insert(
                DraftField::CardCode(index),
                "invalid card number (12-16 digits)",
            );
        }
    }
    if !any_code {
        errors.insert(DraftField::CardCodes, "at least one card number is required");
    }

    errors
}

/// The code with all whitespace removed.
pub fn normalize_card_code(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 12 to 16 ASCII digits, nothing else.
pub fn is_valid_card_code(code: &str) -> bool {
    (12..=16).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Digits only, grouped by four: `"1234567890123456"` → `"1234 5678 9012 3456"`.
pub fn format_card_code(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the first and last four digits for logs: `"1234********3456"`.
pub fn mask_card_code(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 8 {
        return "*".repeat(digits.len());
    }
    let head: String = digits[..4].iter().collect();
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(digits.len() - 8))
}

fn is_telegram_handle(value: &str) -> bool {
    value.contains('@')
}

/// `07` followed by nine digits.
fn is_local_phone(value: &str) -> bool {
    value.len() == 11 && value.starts_with("07") && value.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain.
fn is_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(method: ContactMethod, contact: &str, codes: &[&str]) -> CheckoutDraft {
        let mut draft = CheckoutDraft::new("Sara", method, contact);
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                draft.add_card_code();
            }
            draft.set_card_code(i, *code);
        }
        draft
    }

    #[test]
    fn valid_drafts_have_no_errors() {
        let cases = [
            draft(ContactMethod::Telegram, "@sara", &["123456789012"]),
            draft(ContactMethod::Whatsapp, "07701234567", &["1234 5678 9012 3456"]),
            draft(ContactMethod::Email, "sara@example.com", &["", "12345678901234"]),
        ];
        for case in &cases {
            assert!(validate(case).is_empty(), "{case:?}: {}", validate(case));
        }
    }

    #[test]
    fn blank_name_and_contact_are_required() {
        let mut d = draft(ContactMethod::Email, "   ", &["123456789012"]);
        d.student_name = "  ".into();
        let errors = validate(&d);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(DraftField::StudentName), Some("name is required"));
        assert_eq!(errors.get(DraftField::ContactValue), Some("contact is required"));
    }

    #[test]
    fn contact_format_depends_on_method() {
        for (method, value) in [
            (ContactMethod::Telegram, "sara"),
            (ContactMethod::Telegram, "sara.tg"),
            (ContactMethod::Whatsapp, "0770123456"),
            (ContactMethod::Whatsapp, "08701234567"),
            (ContactMethod::Whatsapp, "077012345678"),
            (ContactMethod::Email, "sara@example"),
            (ContactMethod::Email, "@example.com"),
            (ContactMethod::Email, "sara@@example.com"),
            (ContactMethod::Email, "sara @example.com"),
        ] {
            let errors = validate(&draft(method, value, &["123456789012"]));
            assert!(
                errors.get(DraftField::ContactValue).is_some(),
                "{method} {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn telegram_contact_only_needs_an_at_sign() {
        for value in ["sara@tg", "@sara ali", "@sara"] {
            let errors = validate(&draft(ContactMethod::Telegram, value, &["123456789012"]));
            assert!(errors.is_empty(), "{value:?} rejected: {errors}");
        }
    }

    #[test]
    fn card_codes_must_be_12_to_16_digits() {
        for bad in ["12345678901", "12345678901234567", "1234-5678-9012", "12345678901a"] {
            let errors = validate(&draft(ContactMethod::Telegram, "@s", &[bad]));
            assert!(errors.get(DraftField::CardCode(0)).is_some(), "{bad} accepted");
        }
        for good in ["123456789012", "1234567890123456", " 1234 5678 9012 "] {
            assert!(validate(&draft(ContactMethod::Telegram, "@s", &[good])).is_empty());
        }
    }

    #[test]
    fn errors_point_at_the_offending_entry() {
        let errors = validate(&draft(
            ContactMethod::Telegram,
            "@s",
            &["123456789012", "", "999"],
        ));
        assert_eq!(errors.len(), 1);
        assert!(errors.get(DraftField::CardCode(2)).is_some());
    }

    #[test]
    fn all_empty_codes_is_a_list_error() {
        let errors = validate(&draft(ContactMethod::Telegram, "@s", &["", "  "]));
        assert_eq!(
            errors.get(DraftField::CardCodes),
            Some("at least one card number is required")
        );
    }

    #[test]
    fn formats_and_masks_codes() {
        assert_eq!(format_card_code("1234567890123456"), "1234 5678 9012 3456");
        assert_eq!(format_card_code("12 34-56789012a3"), "1234 5678 9012 3");
        assert_eq!(format_card_code(""), "");
        assert_eq!(mask_card_code("1234 5678 9012 3456"), "1234********3456");
        assert_eq!(mask_card_code("123456789012"), "1234****9012");
        assert_eq!(mask_card_code("1234"), "****");
    }

    #[test]
    fn error_display_lists_fields() {
        let mut d = draft(ContactMethod::Telegram, "@s", &["1"]);
        d.student_name.clear();
        assert_eq!(
            validate(&d).to_string(),
            "student_name: name is required; card_codes[0]: invalid card number (12-16 digits)"
        );
    }
}
