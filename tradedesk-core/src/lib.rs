//! Tradedesk Core: domain types, broker API client, and front-end state.
//!
//! This crate holds everything the front ends share:
//! - Domain types (orders, instruments, price quotes) in their wire shape
//! - The blocking HTTP client behind the [`api::BrokerApi`] trait
//! - Hash routing, the order draft with its validation, and submission
//! - Load-state view models for the orders list and the detail overlay
//! - Polish display formatting for statuses, dates and amounts

pub mod api;
pub mod config;
pub mod domain;
pub mod draft;
pub mod format;
pub mod reference;
pub mod route;
pub mod submit;
pub mod view;

pub use api::{ApiError, BrokerApi, HttpBrokerClient};
pub use config::{ClientConfig, ConfigError};
pub use reference::ReferenceData;
pub use route::{Route, Router};
pub use submit::SubmitForm;
pub use view::{LoadState, OrderDetailView, OrdersView};
