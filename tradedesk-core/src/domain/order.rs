//! Orders as the backend returns them, and the creatable subset sent on submit.

use super::ids::OrderId;
use serde::{Deserialize, Serialize};

/// Buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

impl OrderSide {
    pub fn code(self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderSide::Buy => "Kupno",
            OrderSide::Sell => "Sprzedaż",
        }
    }

    pub fn opposite(self) -> OrderSide {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

/// Price constraint of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    /// Executable only at the limit price or better.
    #[default]
    #[serde(rename = "LMT")]
    Limit,
    #[serde(rename = "MKT")]
    Market,
    /// "Po każdej cenie": no price constraint at all.
    #[serde(rename = "PKC")]
    AnyPrice,
}

impl OrderType {
    pub const ALL: [OrderType; 3] = [OrderType::Limit, OrderType::Market, OrderType::AnyPrice];

    pub fn code(self) -> &'static str {
        match self {
            OrderType::Limit => "LMT",
            OrderType::Market => "MKT",
            OrderType::AnyPrice => "PKC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderType::Limit => "Z limitem ceny (LMT)",
            OrderType::Market => "Rynkowe (MKT)",
            OrderType::AnyPrice => "Po każdej cenie (PKC)",
        }
    }

    pub fn requires_limit_price(self) -> bool {
        matches!(self, OrderType::Limit)
    }

    pub fn next(self) -> OrderType {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> OrderType {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Order lifecycle status. Unknown backend codes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Submitted,
    Filled,
    Expired,
    Other(String),
}

impl OrderStatus {
    pub fn code(&self) -> &str {
        match self {
            OrderStatus::Submitted => "SUBMITTED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Expired => "EXPIRED",
            OrderStatus::Other(code) => code,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, OrderStatus::Filled)
    }
}

impl From<String> for OrderStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "SUBMITTED" => OrderStatus::Submitted,
            "FILLED" => OrderStatus::Filled,
            "EXPIRED" => OrderStatus::Expired,
            _ => OrderStatus::Other(code),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.code().to_string()
    }
}

/// An order as held by the backend. Display-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub isin: String,
    /// Raw side code. Kept as text so an unexpected code cannot fail the
    /// whole list.
    pub side: Option<String>,
    /// Raw order type code, see `side`.
    pub order_type: Option<String>,
    pub quantity: u64,
    pub limit_price: Option<f64>,
    pub trade_currency: Option<String>,
    /// Epoch seconds.
    pub expires_at: Option<i64>,
    pub status: OrderStatus,
    pub execution_price: Option<f64>,
    pub commission: Option<f64>,
    /// ISO-8601 timestamp.
    pub registration_time: Option<String>,
    /// ISO-8601 timestamp.
    pub executed_time: Option<String>,
}

impl Order {
    /// Quantity times execution price, once the order has an execution price.
    pub fn order_value(&self) -> Option<f64> {
        self.execution_price.map(|price| self.quantity as f64 * price)
    }
}

/// Request body for `POST /orders`.
///
/// Numeric fields are already coerced; `limit_price` is `None` (sent as
/// `null`) for anything but limit orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub isin: String,
    pub side: OrderSide,
    pub trade_currency: String,
    pub quantity: u64,
    pub expires_at: i64,
    pub order_type: OrderType,
    pub limit_price: Option<f64>,
}
