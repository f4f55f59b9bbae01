//! Test helpers for creating mock data

use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;

use chrono::{Duration, Local};

use tradedesk_core::api::{ApiError, BrokerApi};
use tradedesk_core::domain::{
    Instrument, NewOrder, Order, OrderId, OrderSide, OrderStatus, OrderType, PriceQuote,
};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        order_id: OrderId::new(id),
        isin: "PL0000000001".into(),
        side: Some("BUY".into()),
        order_type: Some("LMT".into()),
        quantity: 10,
        limit_price: Some(25.0),
        trade_currency: Some("PLN".into()),
        expires_at: None,
        status,
        execution_price: Some(25.5),
        commission: Some(1.5),
        registration_time: Some("2024-03-01T10:00:00Z".into()),
        executed_time: Some("2024-03-01T10:05:00Z".into()),
    }
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        order("1", OrderStatus::Submitted),
        order("2", OrderStatus::Filled),
        order("3", OrderStatus::Expired),
    ]
}

pub fn sample_instruments() -> Vec<Instrument> {
    vec![
        Instrument {
            isin: "PL0000000001".into(),
            name: "Polski Bank".into(),
            ticker: "PBK".into(),
            trade_currency: "PLN".into(),
        },
        Instrument {
            isin: "US0378331005".into(),
            name: "Apple Inc".into(),
            ticker: "AAPL".into(),
            trade_currency: "USD".into(),
        },
    ]
}

pub fn new_order() -> NewOrder {
    NewOrder {
        isin: "PL0000000001".into(),
        side: OrderSide::Buy,
        trade_currency: "PLN".into(),
        quantity: 1,
        expires_at: (Local::now() + Duration::minutes(15)).timestamp(),
        order_type: OrderType::Limit,
        limit_price: Some(10.0),
    }
}

/// In-memory backend recording created orders.
#[derive(Default)]
pub struct MockApi {
    pub orders: Vec<Order>,
    pub instruments: Vec<Instrument>,
    pub prices: Vec<PriceQuote>,
    pub created: Mutex<Vec<NewOrder>>,
}

impl MockApi {
    pub fn with_sample_data() -> Self {
        Self {
            orders: sample_orders(),
            instruments: sample_instruments(),
            prices: vec![PriceQuote {
                isin: "US0378331005".into(),
                price: 231.4,
            }],
            created: Mutex::default(),
        }
    }
}

impl BrokerApi for MockApi {
    fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.orders.clone())
    }

    fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.orders
            .iter()
            .find(|o| &o.order_id == order_id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: "Błąd sieci: 404".into(),
            })
    }

    fn list_instruments(&self) -> Result<Vec<Instrument>, ApiError> {
        Ok(self.instruments.clone())
    }

    fn current_prices(&self) -> Result<Vec<PriceQuote>, ApiError> {
        Ok(self.prices.clone())
    }

    fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.created.lock().unwrap().push(order.clone());
        let mut created = self::order("100", OrderStatus::Submitted);
        created.isin = order.isin.clone();
        Ok(created)
    }
}

/// An app wired to channels the test holds the other ends of.
pub fn test_app(initial_hash: &str) -> (AppState, Receiver<WorkerCommand>, mpsc::Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(initial_hash, cmd_tx, resp_rx, "http://localhost:8090/api".into());
    (app, cmd_rx, resp_tx)
}

/// Commands the app has sent so far.
pub fn drain(rx: &Receiver<WorkerCommand>) -> Vec<WorkerCommand> {
    rx.try_iter().collect()
}
