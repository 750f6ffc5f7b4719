//! Notification side effects of idea writes.
//!
//! See [`fanout`] for recipient selection and delivery.

pub mod fanout;

pub use fanout::Delivery;
