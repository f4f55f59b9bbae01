//! The order submission workflow around an [`OrderDraft`].
//!
//! Submission is split in two halves so a front end can run the network call
//! elsewhere: [`SubmitForm::begin`] validates and coerces, the caller performs
//! `create_order`, and [`SubmitForm::finish`] folds the outcome back in.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::api::{ApiError, BrokerApi};
use crate::domain::{NewOrder, Order};
use crate::draft::{DraftEdit, DraftError, OrderDraft};

pub const SUCCESS_MESSAGE: &str = "Zlecenie zostało złożone pomyślnie!";

/// Why [`SubmitForm::begin`] did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight.
    InFlight,
    /// At least one field reports a validation error.
    Invalid(Vec<DraftError>),
}

/// Draft plus the derived UI state of the buy page.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitForm {
    pub draft: OrderDraft,
    pub loading: bool,
    pub success: Option<String>,
    pub error: Option<String>,
    /// Order returned by the last successful submission.
    pub last_created: Option<Order>,
}

impl SubmitForm {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            draft: OrderDraft::new(now),
            loading: false,
            success: None,
            error: None,
            last_created: None,
        }
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        self.draft = self.draft.apply(edit);
    }

    /// Discard the draft and all messages.
    pub fn reset(&mut self, now: DateTime<Local>) {
        *self = Self::new(now);
    }

    /// Validate, coerce and mark the form as loading.
    pub fn begin(&mut self, now: DateTime<Local>) -> Result<NewOrder, SubmitBlocked> {
        if self.loading {
            return Err(SubmitBlocked::InFlight);
        }
        let order = self.draft.to_new_order(now).map_err(|errors| {
            debug!(errors = ?errors, "submission blocked by validation");
            SubmitBlocked::Invalid(errors)
        })?;

        self.loading = true;
        self.success = None;
        self.error = None;
        Ok(order)
    }

    /// Fold the `create_order` outcome back into the form.
    pub fn finish(&mut self, result: Result<Order, ApiError>, now: DateTime<Local>) {
        self.loading = false;
        match result {
            Ok(order) => {
                info!(order_id = %order.order_id, isin = %order.isin, "order submitted");
                self.success = Some(SUCCESS_MESSAGE.to_string());
                self.draft = OrderDraft::new(now);
                self.last_created = Some(order);
            }
            Err(e) => {
                warn!(error = %e, "order submission failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Run a whole submission synchronously against `api`.
    pub fn submit<A: BrokerApi + ?Sized>(
        &mut self,
        api: &A,
        now: DateTime<Local>,
    ) -> Result<(), SubmitBlocked> {
        let order = self.begin(now)?;
        let result = api.create_order(&order);
        self.finish(result, now);
        Ok(())
    }
}
