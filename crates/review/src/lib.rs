//! Core domain for the asset rating review workflow.
//!
//! Holds the fixed rating scale, the asset and submission types, the
//! in-memory review session state machine, and the trait seams for the
//! upstream asset source and the submission notifier.

pub mod error;
pub mod notify;
pub mod scale;
pub mod session;
pub mod source;
pub mod types;
