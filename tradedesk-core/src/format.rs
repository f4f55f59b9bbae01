//! Display formatting for backend codes, timestamps and amounts (pl-PL).

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::domain::{Order, OrderStatus};

const DATE_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";
const MISSING: &str = "-";

/// Translate a status code for display. Unknown codes are shown as-is.
pub fn translate_status(status: &OrderStatus) -> &str {
    match status {
        OrderStatus::Submitted => "Złożone",
        OrderStatus::Filled => "Zrealizowane",
        OrderStatus::Expired => "Wygasło",
        OrderStatus::Other(code) => code,
    }
}

/// Format an ISO-8601 timestamp in local time.
pub fn format_date(iso: Option<&str>) -> String {
    format_date_in(iso, &Local)
}

/// Format an ISO-8601 timestamp in the given zone.
///
/// Empty input renders as `-`; input that does not parse is echoed back.
/// Timestamps without an offset are taken as already local.
pub fn format_date_in<Tz: TimeZone>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let iso = match iso.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return MISSING.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.with_timezone(tz).format(DATE_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(iso, pattern) {
            return naive.format(DATE_FORMAT).to_string();
        }
    }
    iso.to_string()
}

/// Format epoch seconds in local time.
pub fn format_epoch(secs: Option<i64>) -> String {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.with_timezone(&Local).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Amounts always carry a fractional part: `255.0`, `25.5`, `0.125`.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn format_optional_amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| MISSING.to_string())
}

/// Labelled rows of the order detail view, in display order.
pub fn detail_rows(order: &Order) -> Vec<(&'static str, String)> {
    vec![
        ("Numer zlecenia", order.order_id.to_string()),
        ("Status", translate_status(&order.status).to_string()),
        ("ISIN", order.isin.clone()),
        (
            "Waluta",
            order.trade_currency.clone().unwrap_or_else(|| MISSING.to_string()),
        ),
        ("Kurs", format_optional_amount(order.execution_price)),
        ("Liczba", order.quantity.to_string()),
        ("Wartość zlecenia", format_optional_amount(order.order_value())),
        ("Data rejestracji", format_date(order.registration_time.as_deref())),
        ("Data wykonania", format_date(order.executed_time.as_deref())),
        ("Prowizja", format_optional_amount(order.commission)),
    ]
}
