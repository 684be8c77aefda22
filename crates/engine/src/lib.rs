//! EasyNPC Engine library.
//!
//! Server side of NPC configuration: the profile store, skin resolution and
//! the session protocol clients edit NPCs through.
//!
//! ## Structure
//!
//! - `stores/` - In-memory profile, skin cache and cooldown state
//! - `use_cases/` - Configuration, skin and interaction orchestration
//! - `infrastructure/` - Ports and their adapters, configuration
//! - `api/` - WebSocket entry point
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
