//! # Daily roster pipeline
//!
//! Pieces used to turn the current period sheet into published roster pages:
//!
//! - `debt`: who left the previous period unpaid.
//! - `registration`: who registered today, their debt status and the two
//!   floor groups lunch tickets are picked from.
//! - `compositor`: pagination and drawing of the roster images.
//! - `template`: where the blank roster template comes from.
//! - `publish`: upload of the rendered pages.
//!
//! The orchestration lives in `services::order_service`.

pub mod compositor;
pub mod debt;
pub mod publish;
pub mod registration;
pub mod template;
