//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use tradedesk_core::api::{ApiError, BrokerApi};
use tradedesk_core::config::ClientConfig;
use tradedesk_core::domain::{Instrument, NewOrder, Order, OrderId, OrderStatus, PriceQuote};

/// The request a [`OneShotServer`] received.
#[derive(Debug, Default)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Answers exactly one HTTP request with a canned response.
pub struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl OneShotServer {
    pub fn start(status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).expect("body");

            let mut stream = stream;
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");

            CapturedRequest {
                method,
                path,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::start(status, "application/json", body)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        }
    }

    /// Wait for the request to be served and return what was received.
    pub fn finish(self) -> CapturedRequest {
        self.handle.join().expect("server thread panicked")
    }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
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
        commission: Some(1.5),
        registration_time: Some("2024-03-01T10:00:00Z".into()),
        executed_time: Some("2024-03-01T10:05:00Z".into()),
    }
}

pub fn instruments() -> Vec<Instrument> {
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

/// In-memory [`BrokerApi`] that records created orders.
#[derive(Default)]
pub struct MockApi {
    pub orders: Vec<Order>,
    pub create_error: Option<ApiError>,
    pub created: Mutex<Vec<NewOrder>>,
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
        Ok(instruments())
    }

    fn current_prices(&self) -> Result<Vec<PriceQuote>, ApiError> {
        Ok(vec![PriceQuote {
            isin: "US0378331005".into(),
            price: 231.4,
        }])
    }

    fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        self.created.lock().expect("lock").push(order.clone());
        let mut created = self::order("42", OrderStatus::Submitted);
        created.isin = order.isin.clone();
        created.quantity = order.quantity;
        Ok(created)
    }
}
