//! The order draft: typed form state, edits, validation and coercion.
//!
//! Text inputs (quantity, limit price, expiration) are kept as entered and
//! only coerced when the draft is turned into a [`NewOrder`]. Every edit goes
//! through [`OrderDraft::apply`], which returns a new snapshot.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use thiserror::Error;

use crate::domain::{Instrument, NewOrder, OrderSide, OrderType};

pub const DEFAULT_CURRENCY: &str = "PLN";
pub const DEFAULT_QUANTITY: u64 = 1;
/// Default expiration offset from "now".
pub const DEFAULT_EXPIRY_SECS: i64 = 15 * 60;
/// Expiration input layout, local time.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EXPIRY_INPUT_FORMATS: [&str; 4] = [
    EXPIRY_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One input of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Instrument,
    Side,
    OrderType,
    Quantity,
    LimitPrice,
    Currency,
    ExpiresAt,
}

impl DraftField {
    pub const ALL: [DraftField; 7] = [
        DraftField::Instrument,
        DraftField::Side,
        DraftField::OrderType,
        DraftField::Quantity,
        DraftField::LimitPrice,
        DraftField::Currency,
        DraftField::ExpiresAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Instrument => "Instrument",
            DraftField::Side => "Strona",
            DraftField::OrderType => "Typ zlecenia",
            DraftField::Quantity => "Liczba",
            DraftField::LimitPrice => "Limit ceny",
            DraftField::Currency => "Waluta",
            DraftField::ExpiresAt => "Ważne do",
        }
    }

    /// Free-text inputs; the others are choices cycled left/right.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            DraftField::Quantity | DraftField::LimitPrice | DraftField::Currency | DraftField::ExpiresAt
        )
    }

    pub fn next(self) -> DraftField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> DraftField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[i.saturating_sub(1)]
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Wybierz instrument")]
    MissingInstrument,

    #[error("Liczba musi być liczbą całkowitą nie mniejszą niż 1")]
    InvalidQuantity,

    #[error("Limit ceny musi być większy od 0")]
    InvalidLimitPrice,

    #[error("Podaj walutę")]
    MissingCurrency,

    #[error("Nieprawidłowa data, użyj formatu RRRR-MM-DD GG:MM:SS")]
    InvalidExpiry,

    #[error("Data wygaśnięcia nie może być wcześniejsza niż teraz")]
    ExpiryInPast,
}

impl DraftError {
    pub fn field(&self) -> DraftField {
        match self {
            DraftError::MissingInstrument => DraftField::Instrument,
            DraftError::InvalidQuantity => DraftField::Quantity,
            DraftError::InvalidLimitPrice => DraftField::LimitPrice,
            DraftError::MissingCurrency => DraftField::Currency,
            DraftError::InvalidExpiry | DraftError::ExpiryInPast => DraftField::ExpiresAt,
        }
    }
}

/// A single change to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    /// Pick an instrument; its trade currency replaces the current one.
    SelectInstrument { isin: String, trade_currency: String },
    ClearInstrument,
    SetSide(OrderSide),
    SetOrderType(OrderType),
    SetQuantity(String),
    /// Ignored unless the order type is limit.
    SetLimitPrice(String),
    SetCurrency(String),
    SetExpiresAt(String),
}

impl DraftEdit {
    pub fn select(instrument: &Instrument) -> Self {
        DraftEdit::SelectInstrument {
            isin: instrument.isin.clone(),
            trade_currency: instrument.trade_currency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub isin: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: String,
    pub limit_price: String,
    pub trade_currency: String,
    pub expires_at: String,
}

impl OrderDraft {
    /// A fresh draft: empty instrument, BUY, LMT, quantity 1, price 0, PLN,
    /// expiring 15 minutes after `now`.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            isin: String::new(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            quantity: DEFAULT_QUANTITY.to_string(),
            limit_price: "0".to_string(),
            trade_currency: DEFAULT_CURRENCY.to_string(),
            expires_at: format_expiry(now + Duration::seconds(DEFAULT_EXPIRY_SECS)),
        }
    }

    pub fn apply(&self, edit: DraftEdit) -> OrderDraft {
        let mut next = self.clone();
        match edit {
            DraftEdit::SelectInstrument { isin, trade_currency } => {
                next.isin = isin;
                next.trade_currency = trade_currency;
            }
            DraftEdit::ClearInstrument => next.isin.clear(),
            DraftEdit::SetSide(side) => next.side = side,
            DraftEdit::SetOrderType(order_type) => next.order_type = order_type,
            DraftEdit::SetQuantity(text) => next.quantity = text,
            DraftEdit::SetLimitPrice(text) => {
                if next.limit_price_editable() {
                    next.limit_price = text;
                }
            }
            DraftEdit::SetCurrency(text) => next.trade_currency = text,
            DraftEdit::SetExpiresAt(text) => next.expires_at = text,
        }
        next
    }

    pub fn limit_price_editable(&self) -> bool {
        self.order_type.requires_limit_price()
    }

    /// Current text of a text field; choice fields return their code.
    pub fn field_text(&self, field: DraftField) -> String {
        match field {
            DraftField::Instrument => self.isin.clone(),
            DraftField::Side => self.side.code().to_string(),
            DraftField::OrderType => self.order_type.code().to_string(),
            DraftField::Quantity => self.quantity.clone(),
            DraftField::LimitPrice => self.limit_price.clone(),
            DraftField::Currency => self.trade_currency.clone(),
            DraftField::ExpiresAt => self.expires_at.clone(),
        }
    }

    /// The edit that replaces a text field's content.
    pub fn text_edit(field: DraftField, text: String) -> Option<DraftEdit> {
        match field {
            DraftField::Quantity => Some(DraftEdit::SetQuantity(text)),
            DraftField::LimitPrice => Some(DraftEdit::SetLimitPrice(text)),
            DraftField::Currency => Some(DraftEdit::SetCurrency(text)),
            DraftField::ExpiresAt => Some(DraftEdit::SetExpiresAt(text)),
            _ => None,
        }
    }

    /// Validation error currently reported by one field.
    pub fn field_error(&self, field: DraftField, now: DateTime<Local>) -> Option<DraftError> {
        match field {
            DraftField::Instrument => self.isin.trim().is_empty().then_some(DraftError::MissingInstrument),
            DraftField::Side | DraftField::OrderType => None,
            DraftField::Quantity => self.parse_quantity().err(),
            DraftField::LimitPrice => {
                if self.limit_price_editable() {
                    self.parse_limit_price().err()
                } else {
                    None
                }
            }
            DraftField::Currency => self
                .trade_currency
                .trim()
                .is_empty()
                .then_some(DraftError::MissingCurrency),
            DraftField::ExpiresAt => self.parse_expiry(now).err(),
        }
    }

    /// All validation errors, in form order.
    pub fn validate(&self, now: DateTime<Local>) -> Vec<DraftError> {
        DraftField::ALL
            .iter()
            .filter_map(|field| self.field_error(*field, now))
            .collect()
    }

    /// Validate and coerce into the request body.
    pub fn to_new_order(&self, now: DateTime<Local>) -> Result<NewOrder, Vec<DraftError>> {
        let errors = self.validate(now);
        if !errors.is_empty() {
            return Err(errors);
        }

        let quantity = self.parse_quantity().map_err(|e| vec![e])?;
        let expires_at = self.parse_expiry(now).map_err(|e| vec![e])?;
        let limit_price = if self.limit_price_editable() {
            Some(self.parse_limit_price().map_err(|e| vec![e])?)
        } else {
            None
        };

        Ok(NewOrder {
            isin: self.isin.trim().to_string(),
            side: self.side,
            trade_currency: self.trade_currency.trim().to_uppercase(),
            quantity,
            expires_at,
            order_type: self.order_type,
            limit_price,
        })
    }

    fn parse_quantity(&self) -> Result<u64, DraftError> {
        match self.quantity.trim().parse::<u64>() {
            Ok(q) if q >= 1 => Ok(q),
            _ => Err(DraftError::InvalidQuantity),
        }
    }

    fn parse_limit_price(&self) -> Result<f64, DraftError> {
        // Accept the Polish decimal comma.
        match self.limit_price.trim().replace(',', ".").parse::<f64>() {
            Ok(p) if p.is_finite() && p > 0.0 => Ok(p),
            _ => Err(DraftError::InvalidLimitPrice),
        }
    }

    /// Expiration as epoch seconds, not earlier than `now`.
    fn parse_expiry(&self, now: DateTime<Local>) -> Result<i64, DraftError> {
        let secs = parse_expiry(&self.expires_at).ok_or(DraftError::InvalidExpiry)?;
        if secs < now.timestamp() {
            return Err(DraftError::ExpiryInPast);
        }
        Ok(secs)
    }
}

/// Render a local time in the expiration input layout.
pub fn format_expiry(at: DateTime<Local>) -> String {
    at.format(EXPIRY_FORMAT).to_string()
}

/// Parse an expiration input (local time) into epoch seconds.
pub fn parse_expiry(text: &str) -> Option<i64> {
    let text = text.trim();
    EXPIRY_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp())
}
