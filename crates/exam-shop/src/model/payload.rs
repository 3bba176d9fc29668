//! Request bodies for `POST /api/orders`.
//!
//! The backend has accepted two body shapes over time. Which one a client sends is a
//! deployment decision ([`PayloadShape`]), never a guess made at submit time.

use crate::model::order::{ContactMethod, PurchaseType};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadShape {
    /// `card_numbers` list plus explicit contact and client-key fields.
    #[default]
    Modern,
    /// Single comma-joined `card_number`; the client key rides in `telegram_username`.
    Legacy,
}

impl Display for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadShape::Modern => f.write_str("modern"),
            PayloadShape::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for PayloadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(PayloadShape::Modern),
            "legacy" => Ok(PayloadShape::Legacy),
            other => Err(format!("unknown payload shape: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModernOrderPayload {
    pub student_name: String,
    pub contact_method: ContactMethod,
    pub contact_value: String,
    pub grade: String,
    pub purchase_type: PurchaseType,
    pub selected_subjects: Vec<String>,
    pub card_numbers: Vec<String>,
    pub total_amount: u32,
    pub client_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyOrderPayload {
    pub student_name: String,
    pub telegram_username: String,
    pub phone_number: String,
    pub email: String,
    pub grade: String,
    pub purchase_type: PurchaseType,
    pub selected_subjects: Vec<String>,
    pub card_number: String,
    pub total_amount: u32,
}

/// Everything a submission carries, independent of the wire shape.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub student_name: String,
    pub contact_method: ContactMethod,
    pub contact_value: String,
    pub grade: String,
    pub purchase_type: PurchaseType,
    pub selected_subjects: Vec<String>,
    pub card_codes: Vec<String>,
    pub total_amount: u32,
    pub client_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderPayload {
    Modern(ModernOrderPayload),
    Legacy(LegacyOrderPayload),
}

impl OrderPayload {
    pub fn build(shape: PayloadShape, submission: OrderSubmission) -> Self {
        match shape {
            PayloadShape::Modern => OrderPayload::Modern(ModernOrderPayload {
                student_name: submission.student_name,
                contact_method: submission.contact_method,
                contact_value: submission.contact_value,
                grade: submission.grade,
                purchase_type: submission.purchase_type,
                selected_subjects: submission.selected_subjects,
                card_numbers: submission.card_codes,
                total_amount: submission.total_amount,
                client_key: submission.client_key,
            }),
            PayloadShape::Legacy => {
                let (telegram_username, phone_number, email) = match submission.contact_method {
                    ContactMethod::Telegram => (
                        format!("{} {}", submission.contact_value, submission.client_key),
                        String::new(),
                        String::new(),
                    ),
                    ContactMethod::Whatsapp => {
                        (submission.client_key, submission.contact_value, String::new())
                    }
                    ContactMethod::Email => {
                        (submission.client_key, String::new(), submission.contact_value)
                    }
                };
                OrderPayload::Legacy(LegacyOrderPayload {
                    student_name: submission.student_name,
                    telegram_username,
                    phone_number,
                    email,
                    grade: submission.grade,
                    purchase_type: submission.purchase_type,
                    selected_subjects: submission.selected_subjects,
                    card_number: submission.card_codes.join(","),
                    total_amount: submission.total_amount,
                })
            }
        }
    }

    pub fn shape(&self) -> PayloadShape {
        match self {
            OrderPayload::Modern(_) => PayloadShape::Modern,
            OrderPayload::Legacy(_) => PayloadShape::Legacy,
        }
    }

    pub fn total_amount(&self) -> u32 {
        match self {
            OrderPayload::Modern(p) => p.total_amount,
            OrderPayload::Legacy(p) => p.total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(method: ContactMethod, value: &str) -> OrderSubmission {
        OrderSubmission {
            student_name: "Sara".into(),
            contact_method: method,
            contact_value: value.into(),
            grade: "Grade 6".into(),
            purchase_type: PurchaseType::Single,
            selected_subjects: vec!["s1".into(), "s2".into()],
            card_codes: vec!["123456789012".into(), "1234567890123456".into()],
            total_amount: 20,
            client_key: "ck_abc_1".into(),
        }
    }

    #[test]
    fn modern_payload_serializes_flat() {
        let payload = OrderPayload::build(
            PayloadShape::Modern,
            submission(ContactMethod::Email, "sara@example.com"),
        );
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "student_name": "Sara",
                "contact_method": "email",
                "contact_value": "sara@example.com",
                "grade": "Grade 6",
                "purchase_type": "single",
                "selected_subjects": ["s1", "s2"],
                "card_numbers": ["123456789012", "1234567890123456"],
                "total_amount": 20,
                "client_key": "ck_abc_1"
            })
        );
    }

    #[test]
    fn legacy_telegram_payload_embeds_client_key() {
        let payload = OrderPayload::build(
            PayloadShape::Legacy,
            submission(ContactMethod::Telegram, "@sara"),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["telegram_username"], "@sara ck_abc_1");
        assert_eq!(value["card_number"], "123456789012,1234567890123456");
        assert!(value.get("client_key").is_none());
        assert!(value.get("card_numbers").is_none());
    }

    #[test]
    fn legacy_whatsapp_payload_keeps_key_alone() {
        let payload = OrderPayload::build(
            PayloadShape::Legacy,
            submission(ContactMethod::Whatsapp, "07701234567"),
        );
        match payload {
            OrderPayload::Legacy(p) => {
                assert_eq!(p.telegram_username, "ck_abc_1");
                assert_eq!(p.phone_number, "07701234567");
                assert_eq!(p.email, "");
            }
            other => panic!("expected legacy payload, got {other:?}"),
        }
    }

    #[test]
    fn shape_parses_from_config_text() {
        assert_eq!("Legacy".parse::<PayloadShape>().unwrap(), PayloadShape::Legacy);
        assert_eq!(PayloadShape::default(), PayloadShape::Modern);
        assert!("v3".parse::<PayloadShape>().is_err());
    }
}
