//! Domain Events
//!
//! Return types from aggregate mutations, communicating what changed when a
//! profile was modified. The engine maps them to change notifications at the
//! adapter boundary.

pub mod profile_events;

pub use profile_events::*;
