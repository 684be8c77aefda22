pub mod error;
pub mod services;

pub use error::{ParseResponse, PlayerError};
