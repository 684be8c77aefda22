//! Infrastructure adapters for the player client

mod session_client;

pub use session_client::{SessionClient, DEFAULT_REQUEST_TIMEOUT};
