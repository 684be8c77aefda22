//! EasyNPC Domain - NPC configuration vocabulary and invariants.
//!
//! Pure data and rules: no I/O, no async. Everything that crosses the
//! engine/client boundary is built from the types in this crate.

extern crate self as easynpc_domain;

pub mod aggregates;
pub mod common;
pub mod error;
pub mod events;
pub mod ids;
pub mod interaction;
pub mod value_objects;

pub use aggregates::{NpcProfile, ProfileMutation};
pub use error::DomainError;
pub use events::ProfileUpdate;
pub use ids::{NpcId, PlayerId, SkinId};
pub use interaction::{plan_interaction, InteractionEffect, InteractionHand, Interactor};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ActionContext, ActionScript, ActionSettings, ActionTrigger, ConfigurationScreen,
    DialogAnswer, DialogConfig, DialogKind, DialogTextKey, EditField, EditState, EquipmentSlot,
    ItemReference, MutationKind, NavigationControls, NpcName, PageDirection, PaginationState,
    PermissionLevel, Scale, SkinKind, SkinLocation, SkinModel, SkinReference,
    DEFAULT_PAGE_SIZE, MAX_NPC_NAME_LENGTH,
};
pub use value_objects::{
    is_valid_player_name, is_valid_skin_url, MAX_ACTION_SCRIPT_LENGTH, MAX_DIALOG_TEXT_LENGTH,
    MAX_PAGE_SIZE, MAX_PERMISSION_LEVEL, MAX_SKIN_LOCATION_LENGTH, MAX_STACK_COUNT,
};
