//! Blocking REST client for the brokerage backend.

use std::time::Instant;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::error::ApiError;
use super::message::{create_failure_message, extract_error_message, read_failure_message};
use crate::config::ClientConfig;
use crate::domain::{Instrument, NewOrder, Order, OrderId, PriceQuote};

/// One method per backend endpoint.
///
/// The HTTP implementation is [`HttpBrokerClient`]; tests and front ends can
/// substitute their own.
pub trait BrokerApi: Send + Sync {
    /// `GET /orders`
    fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// `GET /orders/{orderId}`
    fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError>;

    /// `GET /instruments`
    fn list_instruments(&self) -> Result<Vec<Instrument>, ApiError>;

    /// `GET /instruments/prices/current`
    fn current_prices(&self) -> Result<Vec<PriceQuote>, ApiError>;

    /// `POST /orders`
    fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError>;
}

/// [`BrokerApi`] over `reqwest::blocking`.
pub struct HttpBrokerClient {
    client: Client,
    base_url: String,
}

impl HttpBrokerClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Reads never look at an error body: a failure is `Błąd sieci: <status>`.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.client.get(self.url(path));
        self.execute("GET", path, builder, |status, _| read_failure_message(status))
    }

    /// Send a request and decode a 2xx JSON body.
    ///
    /// Non-2xx responses are turned into a message by `on_failure`, given the
    /// status and the (possibly empty) body.
    fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
        on_failure: fn(u16, &str) -> String,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let resp = builder.send().map_err(|e| {
            warn!(target: "http", method = %method, path = %path, error = %e, "HTTP request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = resp.status().as_u16();
        let body = resp.text();
        let latency_ms = started.elapsed().as_millis() as u64;
        info!(target: "http", method = %method, path = %path, status = %status, latency_ms = %latency_ms, "HTTP request completed");

        if !(200..300).contains(&status) {
            // An unreadable error body is treated like an empty one.
            let body = body.unwrap_or_default();
            let message = on_failure(status, &body);
            debug!(target: "http", status = %status, message = %message, "error response");
            return Err(ApiError::Status { status, message });
        }

        let body = body.map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }
}

impl BrokerApi for HttpBrokerClient {
    fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("/orders")
    }

    fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("/orders/{order_id}"))
    }

    fn list_instruments(&self) -> Result<Vec<Instrument>, ApiError> {
        self.get_json("/instruments")
    }

    fn current_prices(&self) -> Result<Vec<PriceQuote>, ApiError> {
        self.get_json("/instruments/prices/current")
    }

    fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let builder = self.client.post(self.url("/orders")).json(order);
        self.execute("POST", "/orders", builder, |status, body| {
            extract_error_message(body, &create_failure_message(status))
        })
    }
}
