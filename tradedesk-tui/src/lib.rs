//! Tradedesk TUI: terminal front end for the brokerage backend.
//!
//! Pages, switched by a location hash:
//! 1. Home (`#/home`): greeting and key guide
//! 2. Orders (`#/orders`): order table with a detail overlay for filled orders
//! 3. Buy (`#/buy`): order form backed by instruments and live prices

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
