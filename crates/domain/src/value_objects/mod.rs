//! Value objects - Immutable objects defined by their attributes

mod action;
mod configuration;
mod dialog;
mod edit_field;
mod equipment;
mod names;
mod pagination;
mod scale;
mod skin;

pub use action::{
    ActionContext, ActionScript, ActionSettings, ActionTrigger, PermissionLevel,
    MAX_ACTION_SCRIPT_LENGTH, MAX_PERMISSION_LEVEL,
};
pub use configuration::{ConfigurationScreen, MutationKind};
pub use dialog::{DialogAnswer, DialogConfig, DialogKind, DialogTextKey, MAX_DIALOG_TEXT_LENGTH};
pub use edit_field::{EditField, EditState};
pub use equipment::{EquipmentSlot, ItemReference, MAX_STACK_COUNT};
pub use names::{NpcName, MAX_NPC_NAME_LENGTH};
pub use pagination::{
    NavigationControls, PageDirection, PaginationState, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use scale::Scale;
pub use skin::{
    is_valid_player_name, is_valid_skin_url, SkinKind, SkinLocation, SkinModel, SkinReference,
    MAX_SKIN_LOCATION_LENGTH,
};
