//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod command_executor;
pub mod config;
pub mod ports;
pub mod privileges;
pub mod skin_source;
