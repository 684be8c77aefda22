use super::*;

use easynpc_shared::{ConfigurationData, NpcRequest, SkinCooldownData};

pub(super) async fn handle_npc_request(
    state: &WsState,
    request_id: &str,
    caller: &Caller,
    request: NpcRequest,
) -> Result<ResponseResult, ServerMessage> {
    let configuration = &state.app.use_cases.configuration;

    let result = match request {
        NpcRequest::GetProfile { npc_id } => respond(configuration.profile.get_profile(npc_id)),

        NpcRequest::Rename { npc_id, name } => {
            respond(configuration.profile.rename(npc_id, &name).await)
        }

        NpcRequest::ChangeSkinLocation { npc_id, location } => respond(
            configuration
                .skin
                .change_skin_location(npc_id, &location)
                .await,
        ),

        NpcRequest::SelectSkin { npc_id, skin_id } => {
            respond(configuration.skin.select_skin(npc_id, skin_id).await)
        }

        NpcRequest::SelectDefaultSkin { npc_id, variant } => respond(
            configuration
                .skin
                .select_default_skin(npc_id, &variant)
                .await,
        ),

        NpcRequest::ChangeDialog {
            npc_id,
            kind,
            texts,
        } => respond(
            configuration
                .profile
                .change_dialog(npc_id, kind, texts)
                .await,
        ),

        NpcRequest::SetAction {
            npc_id,
            trigger,
            script,
        } => respond(
            configuration
                .profile
                .set_action(npc_id, trigger, script.as_deref())
                .await,
        ),

        NpcRequest::ChangeActionSettings {
            npc_id,
            permission_level,
            debug,
        } => respond(
            configuration
                .profile
                .change_action_settings(npc_id, permission_level, debug)
                .await,
        ),

        NpcRequest::SetEquipment { npc_id, slot, item } => respond(
            configuration
                .profile
                .set_equipment(npc_id, slot, item)
                .await,
        ),

        NpcRequest::ChangeScale { npc_id, scale } => {
            respond(configuration.profile.change_scale(npc_id, scale).await)
        }

        NpcRequest::GetSkinCooldown { npc_id } => respond(
            configuration
                .skin
                .skin_cooldown(npc_id)
                .map(|remaining_secs| SkinCooldownData {
                    npc_id,
                    remaining_secs,
                }),
        ),

        NpcRequest::OpenConfiguration { npc_id, screen } => respond(
            configuration
                .access
                .open_configuration(caller.player_id, npc_id, screen)
                .await
                .map(|(screen, profile)| ConfigurationData { screen, profile }),
        ),

        NpcRequest::Remove { npc_id } => {
            match configuration.access.remove(caller.player_id, npc_id).await {
                Ok(_) => ResponseResult::success_empty(),
                Err(e) => e.into_response(),
            }
        }

        NpcRequest::Spawn { model } => {
            respond(configuration.access.spawn(caller.player_id, model).await)
        }
    };

    if let ResponseResult::Error { code, message, .. } = &result {
        tracing::debug!(request_id, ?code, message = %message, "NPC request rejected");
    }
    Ok(result)
}
