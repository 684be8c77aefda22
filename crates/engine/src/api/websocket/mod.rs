//! WebSocket handling for configuration clients.
//!
//! Every connection identifies as a player first; requests and interactions
//! are rejected until it does. Accepted profile mutations are broadcast to
//! all connections by the connection manager.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

mod error_mapping;
mod ws_interaction;
mod ws_npc;
mod ws_skin;

pub mod error_sanitizer;

use easynpc_domain::Interactor;
use easynpc_shared::{ClientMessage, ErrorCode, RequestPayload, ResponseResult, ServerMessage};

use self::error_mapping::IntoResponse;
use super::connections::ConnectionManager;
use crate::app::App;
use crate::use_cases::interaction::Caller;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();

    // Create a bounded channel for sending messages to this client
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    state.connections.register(connection_id, tx.clone()).await;

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to serialize server message"),
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(msg) => handle_message(msg, &state, connection_id).await,
                    Err(e) => {
                        tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse message");
                        Some(ServerMessage::error(
                            ErrorCode::BadRequest,
                            format!("Invalid message format: {}", e),
                        ))
                    }
                };
                if let Some(response) = response {
                    if tx.try_send(response).is_err() {
                        tracing::warn!(
                            connection_id = %connection_id,
                            "Failed to send response, channel full or closed"
                        );
                    }
                }
            }
            Ok(Message::Ping(_)) => {
                let _ = tx.try_send(ServerMessage::Pong);
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    state.connections.unregister(connection_id).await;
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message to the appropriate handler.
async fn handle_message(
    msg: ClientMessage,
    state: &WsState,
    connection_id: Uuid,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Heartbeat => Some(ServerMessage::Pong),

        ClientMessage::Identify { player_id, name } => {
            let name = name.trim();
            if name.is_empty() {
                return Some(ServerMessage::error(
                    ErrorCode::BadRequest,
                    "Player name cannot be empty",
                ));
            }
            match state
                .connections
                .identify(connection_id, Caller::new(player_id, name))
                .await
            {
                Ok(()) => None,
                Err(e) => Some(ServerMessage::error(ErrorCode::BadRequest, e.to_string())),
            }
        }

        ClientMessage::Request {
            request_id,
            payload,
        } => Some(handle_request(state, connection_id, request_id, payload).await),

        ClientMessage::Interact {
            npc_id,
            creative,
            crouching,
            hand,
        } => {
            let caller = match identified(state, connection_id).await {
                Ok(caller) => caller,
                Err(e) => return Some(e),
            };
            let interactor = Interactor {
                creative,
                crouching,
                hand,
            };
            ws_interaction::handle_interact(state, connection_id, &caller, npc_id, interactor)
                .await
        }

        ClientMessage::DialogAnswer { npc_id, answer } => {
            let caller = match identified(state, connection_id).await {
                Ok(caller) => caller,
                Err(e) => return Some(e),
            };
            ws_interaction::handle_dialog_answer(state, &caller, npc_id, answer).await
        }

        ClientMessage::CloseDialog { npc_id } => {
            let caller = match identified(state, connection_id).await {
                Ok(caller) => caller,
                Err(e) => return Some(e),
            };
            ws_interaction::handle_close_dialog(state, &caller, npc_id).await
        }

        ClientMessage::Unknown => {
            tracing::debug!(connection_id = %connection_id, "Ignoring unknown message type");
            Some(ServerMessage::error(
                ErrorCode::BadRequest,
                "Unknown message type",
            ))
        }
    }
}

async fn handle_request(
    state: &WsState,
    connection_id: Uuid,
    request_id: String,
    payload: RequestPayload,
) -> ServerMessage {
    let caller = match identified(state, connection_id).await {
        Ok(caller) => caller,
        Err(_) => {
            return ServerMessage::Response {
                request_id,
                result: ResponseResult::error(ErrorCode::Unauthorized, "Identify first"),
            };
        }
    };

    let dispatched = match payload {
        RequestPayload::Npc(req) => {
            ws_npc::handle_npc_request(state, &request_id, &caller, req).await
        }
        RequestPayload::Skin(req) => ws_skin::handle_skin_request(state, &request_id, req).await,
    };

    match dispatched {
        Ok(result) => ServerMessage::Response { request_id, result },
        Err(message) => message,
    }
}

/// Player behind a connection, or an `Unauthorized` error message.
async fn identified(state: &WsState, connection_id: Uuid) -> Result<Caller, ServerMessage> {
    state
        .connections
        .get(connection_id)
        .await
        .and_then(|info| info.player)
        .ok_or_else(|| ServerMessage::error(ErrorCode::Unauthorized, "Identify first"))
}

fn respond<T: Serialize, E: IntoResponse>(result: Result<T, E>) -> ResponseResult {
    match result {
        Ok(data) => ResponseResult::success(data),
        Err(e) => e.into_response(),
    }
}
