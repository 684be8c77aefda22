//! Configuration screens and mutation kinds

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dialog::DialogKind;
use super::skin::SkinKind;

/// A configuration screen the client can be asked to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationScreen {
    Main,
    PlayerSkin,
    CustomSkin,
    DefaultSkin,
    BasicDialog,
    YesNoDialog,
    BasicAction,
    Equipment,
    Scaling,
}

impl ConfigurationScreen {
    /// Skin screen matching the profile's current skin kind.
    pub fn for_skin(kind: SkinKind) -> Self {
        match kind {
            SkinKind::PlayerSkin | SkinKind::SecureRemoteUrl | SkinKind::InsecureRemoteUrl => {
                ConfigurationScreen::PlayerSkin
            }
            SkinKind::Custom => ConfigurationScreen::CustomSkin,
            SkinKind::Default => ConfigurationScreen::DefaultSkin,
        }
    }

    /// Dialog screen matching the profile's dialog kind.
    pub fn for_dialog(kind: DialogKind) -> Self {
        match kind {
            DialogKind::Basic => ConfigurationScreen::BasicDialog,
            DialogKind::YesNo => ConfigurationScreen::YesNoDialog,
        }
    }
}

impl fmt::Display for ConfigurationScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigurationScreen::Main => "main",
            ConfigurationScreen::PlayerSkin => "player_skin",
            ConfigurationScreen::CustomSkin => "custom_skin",
            ConfigurationScreen::DefaultSkin => "default_skin",
            ConfigurationScreen::BasicDialog => "basic_dialog",
            ConfigurationScreen::YesNoDialog => "yes_no_dialog",
            ConfigurationScreen::BasicAction => "basic_action",
            ConfigurationScreen::Equipment => "equipment",
            ConfigurationScreen::Scaling => "scaling",
        };
        write!(f, "{}", name)
    }
}

/// Kind of change a profile mutation makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Rename,
    SkinChange,
    DialogChange,
    ActionChange,
    ActionSettingsChange,
    EquipmentChange,
    ScaleChange,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::Rename => "rename",
            MutationKind::SkinChange => "skin_change",
            MutationKind::DialogChange => "dialog_change",
            MutationKind::ActionChange => "action_change",
            MutationKind::ActionSettingsChange => "action_settings_change",
            MutationKind::EquipmentChange => "equipment_change",
            MutationKind::ScaleChange => "scale_change",
        };
        write!(f, "{}", name)
    }
}
