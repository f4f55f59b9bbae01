//! REST client for the brokerage backend.

pub mod client;
pub mod error;
pub mod message;

pub use client::{BrokerApi, HttpBrokerClient};
pub use error::ApiError;
pub use message::extract_error_message;
