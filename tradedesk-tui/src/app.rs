//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use tradedesk_core::api::ApiError;
use tradedesk_core::domain::Instrument;
use tradedesk_core::draft::{DraftEdit, DraftField, OrderDraft};
use tradedesk_core::submit::SubmitBlocked;
use tradedesk_core::{LoadState, OrdersView, ReferenceData, Route, Router, SubmitForm};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Maximum number of records kept in the error history overlay.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Http,
    Network,
    Data,
    Validation,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Validation => "FORM",
            ErrorCategory::Other => "ERR",
        }
    }
}

impl From<&ApiError> for ErrorCategory {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status { .. } => ErrorCategory::Http,
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Decode(_) => ErrorCategory::Data,
        }
    }
}

/// Which overlay (if any) is shown on top of the page.
///
/// The order detail overlay is not listed here: it belongs to the orders
/// page and is driven by `OrdersView::detail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Address,
    ErrorHistory,
    Help,
}

/// Buy page: the submission form plus the instrument reference data.
#[derive(Debug)]
pub struct BuyPageState {
    pub form: SubmitForm,
    pub reference: LoadState<ReferenceData>,
    pub focus: DraftField,
}

impl BuyPageState {
    pub fn new() -> Self {
        Self {
            form: SubmitForm::new(Local::now()),
            reference: LoadState::Idle,
            focus: DraftField::Instrument,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.form.draft
    }

    pub fn selected_instrument(&self) -> Option<&Instrument> {
        self.reference.loaded()?.instrument(&self.form.draft.isin)
    }

    /// Live price of the selected instrument.
    pub fn selected_price(&self) -> Option<f64> {
        self.reference.loaded()?.price(&self.form.draft.isin)
    }

    /// Move the instrument selection by `offset`, adopting its currency.
    pub fn step_instrument(&mut self, offset: isize) {
        let edit = self
            .reference
            .loaded()
            .and_then(|data| data.step(&self.form.draft.isin, offset))
            .map(DraftEdit::select);
        if let Some(edit) = edit {
            self.form.edit(edit);
        }
    }

    /// Left/right on a choice field.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            DraftField::Instrument => self.step_instrument(if forward { 1 } else { -1 }),
            DraftField::Side => {
                let side = self.form.draft.side.opposite();
                self.form.edit(DraftEdit::SetSide(side));
            }
            DraftField::OrderType => {
                let current = self.form.draft.order_type;
                let next = if forward { current.next() } else { current.prev() };
                self.form.edit(DraftEdit::SetOrderType(next));
            }
            _ => {}
        }
    }

    /// Append a character to the focused text field.
    pub fn type_char(&mut self, c: char) {
        let mut text = self.form.draft.field_text(self.focus);
        text.push(c);
        self.replace_focused_text(text);
    }

    /// Delete the last character of the focused text field, or clear the
    /// instrument selection.
    pub fn backspace(&mut self) {
        if self.focus == DraftField::Instrument {
            self.form.edit(DraftEdit::ClearInstrument);
            return;
        }
        let mut text = self.form.draft.field_text(self.focus);
        text.pop();
        self.replace_focused_text(text);
    }

    fn replace_focused_text(&mut self, text: String) {
        if let Some(edit) = OrderDraft::text_edit(self.focus, text) {
            self.form.edit(edit);
        }
    }

    /// Discard the draft and messages; reference data is refetched on mount.
    pub fn reset(&mut self) {
        self.form.reset(Local::now());
        self.focus = DraftField::Instrument;
    }
}

impl Default for BuyPageState {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub router: Router,
    pub running: bool,

    // Page states
    pub orders: OrdersView,
    pub buy: BuyPageState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub address_input: String,
    pub base_url: String,
}

impl AppState {
    /// Build the app at `initial_hash` and mount that page.
    pub fn new(
        initial_hash: &str,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        base_url: String,
    ) -> Self {
        let mut app = Self {
            router: Router::new(initial_hash),
            running: true,
            orders: OrdersView::default(),
            buy: BuyPageState::new(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            address_input: String::new(),
            base_url,
        };
        app.mount(app.router.route());
        app
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    /// Change the location hash; the new page is mounted only if it changed.
    pub fn navigate(&mut self, hash: &str) {
        let previous = self.router.route();
        let Some(route) = self.router.navigate(hash) else {
            return;
        };
        if previous == Route::Orders {
            self.orders.close_details();
        }
        if previous == Route::Buy {
            self.buy.reset();
        }
        self.mount(route);
    }

    pub fn go(&mut self, route: Route) {
        self.navigate(route.hash());
    }

    /// Start the page's initial loads.
    fn mount(&mut self, route: Route) {
        match route {
            Route::Home => {}
            Route::Orders => self.refresh_orders(),
            Route::Buy => {
                self.buy.reference = LoadState::Loading;
                self.send(WorkerCommand::LoadReferenceData);
            }
        }
    }

    pub fn refresh_orders(&mut self) {
        self.orders.start_loading();
        self.send(WorkerCommand::LoadOrders);
    }

    /// Open the detail overlay for the order under the cursor.
    pub fn open_order_details(&mut self) {
        if let Some(order_id) = self.orders.open_details() {
            self.send(WorkerCommand::LoadOrder { order_id });
        }
    }

    pub fn close_order_details(&mut self) {
        self.orders.close_details();
    }

    /// Validate the draft and hand the request to the worker.
    pub fn submit_order(&mut self) {
        match self.buy.form.begin(Local::now()) {
            Ok(order) => {
                self.set_status("Wysyłanie zlecenia...");
                self.send(WorkerCommand::SubmitOrder { order });
            }
            Err(SubmitBlocked::InFlight) => {}
            Err(SubmitBlocked::Invalid(errors)) => {
                if let Some(first) = errors.first() {
                    self.buy.focus = first.field();
                    self.set_warning(first.to_string());
                }
            }
        }
    }

    pub fn open_address_bar(&mut self) {
        self.address_input = self.router.hash().to_string();
        self.overlay = Overlay::Address;
    }

    /// Navigate to what was typed into the address overlay.
    pub fn commit_address(&mut self) {
        let hash = std::mem::take(&mut self.address_input);
        self.overlay = Overlay::None;
        self.navigate(&hash);
    }

    /// Apply a worker response to the page state it belongs to.
    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::OrdersLoaded(result) => {
                if let Err(e) = &result {
                    self.push_api_error(e, "GET /orders");
                }
                self.orders.finish_loading(result);
            }
            WorkerResponse::OrderLoaded { order_id, result } => {
                let failed = result.as_ref().err().cloned();
                if !self.orders.detail.finish_loading(&order_id, result) {
                    debug!(order_id = %order_id, "dropping stale order detail response");
                    return;
                }
                if let Some(e) = failed {
                    self.push_api_error(&e, &format!("GET /orders/{order_id}"));
                }
            }
            WorkerResponse::ReferenceDataLoaded(result) => {
                if let Err(e) = &result {
                    self.push_api_error(e, "GET /instruments");
                }
                self.buy.reference = LoadState::from_result(result);
            }
            WorkerResponse::OrderSubmitted(result) => {
                // The form was reset by leaving the buy page mid-submission.
                if !self.buy.form.loading {
                    debug!("dropping order submission response for an abandoned form");
                    if let Err(e) = &result {
                        self.push_api_error(e, "POST /orders");
                    }
                    return;
                }
                let failed = result.as_ref().err().cloned();
                self.buy.form.finish(result, Local::now());
                match failed {
                    Some(e) => self.push_api_error(&e, "POST /orders"),
                    None => {
                        if let Some(msg) = self.buy.form.success.clone() {
                            self.status_message = Some((msg, StatusLevel::Success));
                        }
                        self.buy.focus = DraftField::Instrument;
                    }
                }
            }
        }
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if let Err(e) = self.worker_tx.send(cmd) {
            warn!(command = ?e.0, "worker channel closed");
            self.push_error(
                ErrorCategory::Other,
                "Wątek roboczy nie odpowiada".into(),
                format!("{:?}", e.0),
            );
        }
    }

    fn push_api_error(&mut self, err: &ApiError, context: &str) {
        self.push_error(ErrorCategory::from(err), err.to_string(), context.to_string());
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
