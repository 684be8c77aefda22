//! Common utility functions shared across the engine and the client.
//!
//! Pure functions only - no side effects, no I/O.

pub mod string;

pub use string::{none_if_blank, normalize_label};
