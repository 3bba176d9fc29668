//! # Order Composer
//!
//! Turns a [`CheckoutDraft`] and the [`OrderContext`] chosen on the subject page into a
//! backend order. Submission validates locally, tags the order with the client key and
//! posts it once; retrying is left to the student.

pub mod draft;
pub mod validate;

pub use draft::*;
pub use validate::*;

use crate::api::{ApiError, StoreApi};
use crate::catalog::OrderContext;
use crate::identity::{ClientKeyStore, IdentityError};
use crate::model::{
    calculate_total, short_reference, OrderPayload, OrderSubmission, PayloadShape, PurchaseType,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("the form has errors: {0}")]
    Invalid(ValidationErrors),

    #[error("no subjects selected")]
    EmptySelection,

    #[error("order total {actual} does not match the expected {expected}")]
    TotalMismatch { expected: u32, actual: u32 },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("could not submit the order: {0}")]
    Backend(#[from] ApiError),
}

impl CheckoutError {
    /// What to show the student. Backend details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Invalid(errors) => format!("Please fix the form: {errors}"),
            CheckoutError::EmptySelection => "Please choose at least one subject.".to_string(),
            CheckoutError::TotalMismatch { .. } => {
                "The order total is out of date. Please reselect your subjects.".to_string()
            }
            CheckoutError::Identity(_) | CheckoutError::Backend(_) => {
                "Something went wrong while sending your order. Please try again.".to_string()
            }
        }
    }
}

/// Backend acknowledgement of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub order_id: String,
}

impl Confirmation {
    /// Order number shown to the student.
    pub fn reference(&self) -> String {
        short_reference(&self.order_id)
    }
}

#[derive(Clone)]
pub struct OrderComposer {
    api: Arc<dyn StoreApi>,
    keys: ClientKeyStore,
    shape: PayloadShape,
}

impl OrderComposer {
    pub fn new(api: Arc<dyn StoreApi>, keys: ClientKeyStore, shape: PayloadShape) -> Self {
        Self { api, keys, shape }
    }

    #[instrument(skip(self, draft, context), fields(grade = %context.grade, purchase_type = %context.purchase_type))]
    pub async fn submit(
        &self,
        draft: &CheckoutDraft,
        context: &OrderContext,
    ) -> Result<Confirmation, CheckoutError> {
        let errors = validate(draft);
        if !errors.is_empty() {
            warn!(problems = errors.len(), "Draft rejected");
            return Err(CheckoutError::Invalid(errors));
        }

        if context.purchase_type == PurchaseType::Single && context.selected_subjects.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        let expected = calculate_total(context.purchase_type, context.selected_subjects.len());
        if context.total_amount != expected {
            warn!(expected, actual = context.total_amount, "Stale order total");
            return Err(CheckoutError::TotalMismatch {
                expected,
                actual: context.total_amount,
            });
        }

        let client_key = self.keys.get_or_create_client_key()?;
        let card_codes: Vec<String> = draft
            .card_codes()
            .iter()
            .map(|raw| normalize_card_code(raw))
            .filter(|code| !code.is_empty())
            .collect();
        debug!(
            cards = ?card_codes.iter().map(|c| mask_card_code(c)).collect::<Vec<_>>(),
            shape = %self.shape,
            "Submitting order"
        );

        let payload = OrderPayload::build(
            self.shape,
            OrderSubmission {
                student_name: draft.student_name.trim().to_string(),
                contact_method: draft.contact_method,
                contact_value: draft.contact_value.trim().to_string(),
                grade: context.grade.clone(),
                purchase_type: context.purchase_type,
                selected_subjects: context.selected_subjects.clone(),
                card_codes,
                total_amount: context.total_amount,
                client_key: client_key.into_string(),
            },
        );

        let created = self.api.create_order(&payload).await.map_err(|e| {
            error!(error = %e, "Order submission failed");
            CheckoutError::Backend(e)
        })?;

        let confirmation = Confirmation {
            order_id: created.id,
        };
        info!(order_id = %confirmation.order_id, reference = %confirmation.reference(), "Order submitted");
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockStoreApi;
    use crate::identity::MemoryStorage;
    use crate::model::{ContactMethod, CreatedOrder};

    fn context(total: u32) -> OrderContext {
        OrderContext {
            grade: "g6".into(),
            purchase_type: PurchaseType::Single,
            selected_subjects: vec!["s1".into(), "s2".into()],
            total_amount: total,
        }
    }

    fn composer(api: Arc<MockStoreApi>, shape: PayloadShape) -> OrderComposer {
        let keys = ClientKeyStore::new(Arc::new(MemoryStorage::with_item("client_key", "ck_fixed_1")));
        OrderComposer::new(api, keys, shape)
    }

    fn valid_draft() -> CheckoutDraft {
        CheckoutDraft::new(" Sara ", ContactMethod::Email, "sara@example.com ")
            .with_card_code("1234 5678 9012 3456")
    }

    #[tokio::test]
    async fn test_submit_posts_clean_payload() {
        let api = Arc::new(MockStoreApi::new());
        api.expect_create_order().return_ok(CreatedOrder {
            id: "abcdef12-0000".into(),
        });

        let mut draft = valid_draft();
        draft.add_card_code();
        let confirmation = composer(api.clone(), PayloadShape::Modern)
            .submit(&draft, &context(20))
            .await
            .unwrap();
        assert_eq!(confirmation.reference(), "ABCDEF12");

        match &api.submitted_payloads()[..] {
            [OrderPayload::Modern(p)] => {
                assert_eq!(p.student_name, "Sara");
                assert_eq!(p.contact_value, "sara@example.com");
                assert_eq!(p.card_numbers, vec!["1234567890123456"]);
                assert_eq!(p.client_key, "ck_fixed_1");
                assert_eq!(p.total_amount, 20);
            }
            other => panic!("unexpected payloads {other:?}"),
        }
        api.verify();
    }

    #[tokio::test]
    async fn test_legacy_shape_is_used_when_configured() {
        let api = Arc::new(MockStoreApi::new());
        api.expect_create_order()
            .return_ok(CreatedOrder { id: "x".into() });

        composer(api.clone(), PayloadShape::Legacy)
            .submit(&valid_draft(), &context(20))
            .await
            .unwrap();
        assert_eq!(api.submitted_payloads()[0].shape(), PayloadShape::Legacy);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_backend() {
        let api = Arc::new(MockStoreApi::new());
        let draft = CheckoutDraft::new("", ContactMethod::Telegram, "@s");

        let err = composer(api.clone(), PayloadShape::Modern)
            .submit(&draft, &context(20))
            .await
            .unwrap_err();
        match err {
            CheckoutError::Invalid(errors) => {
                assert!(errors.get(DraftField::StudentName).is_some());
                assert!(errors.get(DraftField::CardCodes).is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(api.submitted_payloads().is_empty());
    }

    #[tokio::test]
    async fn test_stale_total_is_rejected() {
        let api = Arc::new(MockStoreApi::new());
        let err = composer(api, PayloadShape::Modern)
            .submit(&valid_draft(), &context(30))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::TotalMismatch {
                expected: 20,
                actual: 30
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_single_selection_is_rejected() {
        let api = Arc::new(MockStoreApi::new());
        let mut ctx = context(0);
        ctx.selected_subjects.clear();
        let err = composer(api, PayloadShape::Modern)
            .submit(&valid_draft(), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptySelection));
    }

    #[tokio::test]
    async fn test_backend_failure_has_generic_message() {
        let api = Arc::new(MockStoreApi::new());
        api.expect_create_order().return_err(ApiError::Status {
            status: 500,
            body: "Traceback ...".into(),
        });

        let err = composer(api, PayloadShape::Modern)
            .submit(&valid_draft(), &context(20))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Backend(_)));
        assert!(!err.user_message().contains("Traceback"));
        assert!(err.user_message().contains("try again"));
    }
}
