//! In-memory state storage modules.
//!
//! - `ProfileStore` - authoritative NPC profiles
//! - `SkinCache` - resolved skins per model and active skin per NPC
//! - `CooldownStore` - per-NPC skin-location cooldowns

pub mod cooldown;
pub mod profile;
pub mod skin_cache;

pub use cooldown::{CooldownRejection, CooldownReservation, CooldownStore};
pub use profile::{ProfileObserver, ProfileStore, ProfileStoreError};
pub use skin_cache::{SkinCache, SkinCacheEntry};
