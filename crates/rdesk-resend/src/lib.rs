//! Resend transactional-email notifier.
//!
//! Sends exactly one plain-text message per accepted submission to a
//! fixed recipient.

pub mod client;
pub mod config;

pub use client::{ResendNotifier, DEFAULT_API_URL};
pub use config::ResendConfig;
