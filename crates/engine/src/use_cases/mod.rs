//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the configuration
//! service. WebSocket handlers stay thin and call into these.

pub mod configuration;
pub mod interaction;
pub mod skins;

pub use configuration::{ConfigurationError, ConfigurationUseCases};
pub use interaction::{InteractionError, InteractionUseCases};
pub use skins::{SkinError, SkinUseCases};
