//! EasyNPC Player - client side of a configuration session.
//!
//! ## Structure
//!
//! - `state/` - Edit boxes and the skin browser view-model
//! - `application/` - Services issuing session requests
//! - `ports/` - Outbound request port
//! - `infrastructure/` - Request/response correlation over a message channel

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;
