//! View state for the orders list and the order detail overlay.
//!
//! Both follow `Idle → Loading → (Loaded | Failed)` and may re-enter
//! `Loading` from any state on refresh or reopen.

use crate::api::ApiError;
use crate::domain::{Order, OrderId};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// The single-order overlay. Inert until opened with an id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderDetailView {
    pub order_id: Option<OrderId>,
    pub open: bool,
    pub order: LoadState<Order>,
}

impl OrderDetailView {
    /// Set the `open` flag for `order_id`.
    ///
    /// Returns the id to fetch when `open` goes from false to true with a
    /// non-empty id.
    pub fn set_open(&mut self, open: bool, order_id: Option<OrderId>) -> Option<OrderId> {
        let was_open = self.open;
        self.open = open;
        self.order_id = order_id.filter(|id| !id.is_empty());

        if !open {
            self.order = LoadState::Idle;
            return None;
        }
        if was_open {
            return None;
        }
        let id = self.order_id.clone()?;
        self.order = LoadState::Loading;
        Some(id)
    }

    /// Store a fetch result. Results for another id are dropped.
    pub fn finish_loading(&mut self, order_id: &OrderId, result: Result<Order, ApiError>) -> bool {
        if !self.open || self.order_id.as_ref() != Some(order_id) {
            return false;
        }
        self.order = LoadState::from_result(result);
        true
    }

    /// Hide the overlay and clear local state.
    pub fn close(&mut self) {
        self.set_open(false, None);
    }
}

/// The orders table with its cursor and the detail overlay it owns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdersView {
    pub orders: LoadState<Vec<Order>>,
    pub cursor: usize,
    pub selected: Option<OrderId>,
    pub detail: OrderDetailView,
}

impl OrdersView {
    pub fn start_loading(&mut self) {
        self.orders = LoadState::Loading;
    }

    pub fn finish_loading(&mut self, result: Result<Vec<Order>, ApiError>) {
        self.orders = LoadState::from_result(result);
        let len = self.rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Loaded orders, empty in any other state.
    pub fn rows(&self) -> &[Order] {
        self.orders.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current(&self) -> Option<&Order> {
        self.rows().get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Open details for the order under the cursor. Only filled orders have
    /// details; returns the id to fetch.
    pub fn open_details(&mut self) -> Option<OrderId> {
        let order = self.current().filter(|o| o.status.is_filled())?;
        let id = order.order_id.clone();
        self.selected = Some(id.clone());
        self.detail.set_open(true, Some(id))
    }

    /// Close the overlay and deselect.
    pub fn close_details(&mut self) {
        self.detail.close();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            order_id: OrderId::new(id),
            isin: "PL0000000001".into(),
            side: None,
            order_type: None,
            quantity: 10,
            limit_price: None,
            trade_currency: Some("PLN".into()),
            expires_at: None,
            status,
            execution_price: Some(25.5),
            commission: None,
            registration_time: None,
            executed_time: None,
        }
    }

    fn loaded_view() -> OrdersView {
        let mut view = OrdersView::default();
        view.start_loading();
        view.finish_loading(Ok(vec![
            order("1", OrderStatus::Submitted),
            order("2", OrderStatus::Filled),
        ]));
        view
    }

    #[test]
    fn load_state_transitions() {
        let mut view = OrdersView::default();
        assert_eq!(view.orders, LoadState::Idle);
        view.start_loading();
        assert!(view.orders.is_loading());
        view.finish_loading(Err(ApiError::Transport("down".into())));
        assert!(view.orders.error().unwrap().contains("down"));
        view.start_loading();
        assert!(view.orders.is_loading());
    }

    #[test]
    fn details_only_for_filled_orders() {
        let mut view = loaded_view();
        assert_eq!(view.open_details(), None);
        assert!(!view.detail.open);

        view.select_next();
        assert_eq!(view.open_details(), Some(OrderId::new("2")));
        assert!(view.detail.open);
        assert!(view.detail.order.is_loading());
        assert_eq!(view.selected, Some(OrderId::new("2")));
    }

    #[test]
    fn reopening_while_open_does_not_refetch() {
        let mut detail = OrderDetailView::default();
        assert!(detail.set_open(true, Some(OrderId::new("2"))).is_some());
        assert!(detail.set_open(true, Some(OrderId::new("2"))).is_none());
    }

    #[test]
    fn open_without_id_stays_idle() {
        let mut detail = OrderDetailView::default();
        assert_eq!(detail.set_open(true, Some(OrderId::new(""))), None);
        assert_eq!(detail.order, LoadState::Idle);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut view = loaded_view();
        view.select_next();
        view.open_details();
        assert!(!view.detail.finish_loading(&OrderId::new("1"), Ok(order("1", OrderStatus::Filled))));
        assert!(view.detail.finish_loading(&OrderId::new("2"), Ok(order("2", OrderStatus::Filled))));
        assert_eq!(view.detail.order.loaded().unwrap().order_value(), Some(255.0));
    }

    #[test]
    fn closing_clears_and_deselects() {
        let mut view = loaded_view();
        view.select_next();
        view.open_details();
        view.close_details();
        assert!(!view.detail.open);
        assert_eq!(view.detail.order, LoadState::Idle);
        assert_eq!(view.selected, None);
        assert!(!view.detail.finish_loading(&OrderId::new("2"), Ok(order("2", OrderStatus::Filled))));
    }

    #[test]
    fn cursor_is_clamped_after_reload() {
        let mut view = loaded_view();
        view.select_next();
        view.finish_loading(Ok(vec![order("9", OrderStatus::Expired)]));
        assert_eq!(view.cursor, 0);
        view.select_next();
        assert_eq!(view.cursor, 0);
    }
}
