//! Backend of the daily lunch roster: reads and writes the monthly order
//! sheets, reconciles last month's debts and publishes the roster images.

pub mod config;
pub mod error;
#[cfg(any(test, feature = "fakes"))]
pub mod fakes;
pub mod services;

pub use config::Config;
pub use error::{OrderError, OrderResult};
pub use services::order_service::OrderService;
