//! In-world interactions. These are not request/response: the outcome is
//! pushed to the interacting connection as screen or dialog messages.

use super::*;

use easynpc_domain::{DialogAnswer, Interactor, NpcId};

use crate::use_cases::InteractionError;

pub(super) async fn handle_interact(
    state: &WsState,
    connection_id: Uuid,
    caller: &Caller,
    npc_id: NpcId,
    interactor: Interactor,
) -> Option<ServerMessage> {
    let outcome = match state
        .app
        .use_cases
        .interaction
        .dispatch
        .interact(caller, npc_id, interactor)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return Some(interaction_error(e)),
    };

    tracing::debug!(
        connection_id = %connection_id,
        npc_id = %npc_id,
        executed = ?outcome.executed,
        "Interaction handled"
    );

    if let Some((screen, profile)) = outcome.configuration {
        state
            .connections
            .send_to(
                connection_id,
                ServerMessage::OpenConfiguration {
                    npc_id,
                    screen,
                    profile,
                },
            )
            .await;
    }
    if let Some(dialog) = outcome.dialog {
        state
            .connections
            .send_to(
                connection_id,
                ServerMessage::OpenDialog {
                    npc_id: dialog.npc_id,
                    npc_name: dialog.npc_name,
                    dialog: dialog.dialog,
                },
            )
            .await;
    }
    None
}

pub(super) async fn handle_dialog_answer(
    state: &WsState,
    caller: &Caller,
    npc_id: NpcId,
    answer: DialogAnswer,
) -> Option<ServerMessage> {
    match state
        .app
        .use_cases
        .interaction
        .dispatch
        .dialog_answer(caller, npc_id, answer)
        .await
    {
        Ok(outcome) => outcome.text.map(|text| ServerMessage::DialogAnswerText {
            npc_id,
            npc_name: outcome.npc_name,
            text,
        }),
        Err(e) => Some(interaction_error(e)),
    }
}

pub(super) async fn handle_close_dialog(
    state: &WsState,
    caller: &Caller,
    npc_id: NpcId,
) -> Option<ServerMessage> {
    match state
        .app
        .use_cases
        .interaction
        .dispatch
        .close_dialog(caller, npc_id)
        .await
    {
        Ok(_) => None,
        Err(e) => Some(interaction_error(e)),
    }
}

fn interaction_error(error: InteractionError) -> ServerMessage {
    match error.into_response() {
        ResponseResult::Error { code, message, .. } => ServerMessage::error(code, message),
        _ => ServerMessage::error(ErrorCode::InternalError, "Interaction failed"),
    }
}
