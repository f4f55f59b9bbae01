//! Domain types shared by the client, the TUI and the CLI.

pub mod ids;
pub mod instrument;
pub mod order;

pub use ids::OrderId;
pub use instrument::{Instrument, PriceQuote};
pub use order::{NewOrder, Order, OrderSide, OrderStatus, OrderType};
