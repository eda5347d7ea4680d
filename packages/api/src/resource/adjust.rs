//! Manual stock corrections.
//!
//! A correction is a signed change to one product's quantity plus a reason.
//! The backend applies it and logs it; [`AdjustmentForm`] only holds the
//! inputs, the in-flight flag and the last outcome.

use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{AdjustmentResult, StockItem};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdjustmentError {
    #[error("Vennligst velg et produkt")]
    MissingProduct,
    #[error("Endring kan ikke være 0")]
    ZeroChange,
    #[error("Vennligst oppgi årsak for justeringen")]
    MissingReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockAdjustmentDraft {
    pub product_id: String,
    /// Raw input; positive adds, negative removes.
    pub change: String,
    pub reason: String,
}

impl StockAdjustmentDraft {
    /// Unparseable input counts as no change.
    pub fn change(&self) -> i64 {
        self.change.trim().parse().unwrap_or(0)
    }

    /// The `-` / `+` buttons.
    pub fn step(&mut self, delta: i64) {
        self.change = (self.change() + delta).to_string();
    }

    /// Quantity after the change, for the preview line.
    pub fn preview(&self, item: &StockItem) -> i64 {
        item.quantity + self.change()
    }

    /// Body for `POST /stock/adjust`.
    pub fn to_payload(&self) -> Result<Value, AdjustmentError> {
        if self.product_id.is_empty() {
            return Err(AdjustmentError::MissingProduct);
        }
        let change = self.change();
        if change == 0 {
            return Err(AdjustmentError::ZeroChange);
        }
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(AdjustmentError::MissingReason);
        }
        Ok(json!({
            "product_id": self.product_id,
            "change": change,
            "reason": reason,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentForm {
    pub draft: StockAdjustmentDraft,
    submitting: bool,
    notice: Option<Notice>,
}

impl AdjustmentForm {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Validate and mark in flight. Returns the draft to send, or `None` when
    /// a request is already running or validation failed (the error becomes
    /// the notice and the inputs stay).
    pub fn begin_submit(&mut self) -> Option<StockAdjustmentDraft> {
        if self.submitting {
            return None;
        }
        match self.draft.to_payload() {
            Ok(_) => {
                self.submitting = true;
                self.notice = None;
                Some(self.draft.clone())
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                None
            }
        }
    }

    /// Returns `true` when stock levels and history must be re-fetched.
    pub fn finish_submit(&mut self, result: Result<AdjustmentResult, ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(done) => {
                self.notice = Some(Notice::Success(format!(
                    "{}. Nytt antall: {}",
                    done.message, done.new_quantity
                )));
                self.draft = StockAdjustmentDraft::default();
                true
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.user_message("Feil ved lagerjustering")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> StockAdjustmentDraft {
        StockAdjustmentDraft {
            product_id: "P1".into(),
            change: "-3".into(),
            reason: "Svinn".into(),
        }
    }

    #[test]
    fn test_validation_order() {
        let mut draft = StockAdjustmentDraft::default();
        assert_eq!(draft.to_payload(), Err(AdjustmentError::MissingProduct));

        draft.product_id = "P1".into();
        draft.change = "abc".into();
        assert_eq!(draft.to_payload(), Err(AdjustmentError::ZeroChange));

        draft.step(1);
        draft.reason = "   ".into();
        assert_eq!(draft.to_payload(), Err(AdjustmentError::MissingReason));

        draft.reason = " Fysisk telling ".into();
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload["change"], 1);
        assert_eq!(payload["reason"], "Fysisk telling");
    }

    #[test]
    fn test_preview() {
        let item = StockItem {
            quantity: 2,
            ..Default::default()
        };
        assert_eq!(filled().preview(&item), -1);
    }

    #[test]
    fn test_invalid_form_keeps_inputs() {
        let mut form = AdjustmentForm {
            draft: filled(),
            ..Default::default()
        };
        form.draft.reason.clear();

        assert_eq!(form.begin_submit(), None);
        assert!(!form.is_submitting());
        assert_eq!(
            form.notice(),
            Some(&Notice::Error("Vennligst oppgi årsak for justeringen".into()))
        );
        assert_eq!(form.draft.change, "-3");
    }

    #[test]
    fn test_success_resets_and_refetches() {
        let mut form = AdjustmentForm {
            draft: filled(),
            ..Default::default()
        };

        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), None);

        let refetch = form.finish_submit(Ok(AdjustmentResult {
            message: "Lager justert".into(),
            new_quantity: 17,
        }));
        assert!(refetch);
        assert_eq!(form.draft, StockAdjustmentDraft::default());
        assert_eq!(
            form.notice(),
            Some(&Notice::Success("Lager justert. Nytt antall: 17".into()))
        );
    }

    #[test]
    fn test_failure_keeps_draft() {
        let mut form = AdjustmentForm {
            draft: filled(),
            ..Default::default()
        };
        form.begin_submit();

        let refetch = form.finish_submit(Err(ApiError::Validation("Kan ikke gå under 0".into())));
        assert!(!refetch);
        assert_eq!(form.draft, filled());
        assert_eq!(form.notice(), Some(&Notice::Error("Kan ikke gå under 0".into())));
    }
}
