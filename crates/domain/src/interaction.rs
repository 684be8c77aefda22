//! What happens when a player interacts with an NPC
//!
//! `plan_interaction` is pure: it only decides the ordered effects. Running
//! action scripts and opening screens is left to the caller.

use serde::{Deserialize, Serialize};

use crate::aggregates::NpcProfile;
use crate::value_objects::{ActionTrigger, ConfigurationScreen};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionHand {
    #[default]
    MainHand,
    OffHand,
}

/// The interacting player's situation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactor {
    pub creative: bool,
    pub crouching: bool,
    pub hand: InteractionHand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEffect {
    OpenConfiguration { screen: ConfigurationScreen },
    ExecuteAction { trigger: ActionTrigger },
    /// Opening the dialog also fires `OnOpenDialog`
    OpenDialog,
}

/// Decide the effects of an interaction, in execution order.
///
/// ```
/// use easynpc_domain::{plan_interaction, InteractionEffect, Interactor, NpcId, NpcProfile, SkinModel};
///
/// let profile = NpcProfile::spawn(NpcId::new(), SkinModel::Humanoid);
/// let survival = Interactor::default();
/// assert!(plan_interaction(&profile, survival).is_empty());
/// ```
pub fn plan_interaction(profile: &NpcProfile, interactor: Interactor) -> Vec<InteractionEffect> {
    if interactor.hand == InteractionHand::OffHand {
        return Vec::new();
    }

    let has_dialog = profile.has_dialog();
    let has_action = profile.action(ActionTrigger::OnInteraction).is_some();

    if interactor.creative && (interactor.crouching || (!has_dialog && !has_action)) {
        return vec![InteractionEffect::OpenConfiguration {
            screen: ConfigurationScreen::Main,
        }];
    }

    let mut effects = Vec::with_capacity(2);
    if has_action {
        effects.push(InteractionEffect::ExecuteAction {
            trigger: ActionTrigger::OnInteraction,
        });
    }
    if has_dialog {
        effects.push(InteractionEffect::OpenDialog);
    }
    effects
}
