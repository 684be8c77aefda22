//! Request/response correlation over an outgoing message channel.
//!
//! The transport owns the socket: it drains the receiver half of the
//! channel into the connection and feeds every incoming `ServerMessage`
//! through [`SessionClient::handle_server_message`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, Mutex};
use uuid::Uuid;

use easynpc_domain::PlayerId;
use easynpc_shared::{ClientMessage, RequestError, RequestPayload, ResponseResult, ServerMessage};

use crate::ports::outbound::NpcRequestPort;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type PendingRequests = HashMap<String, oneshot::Sender<ResponseResult>>;

pub struct SessionClient {
    outgoing: mpsc::Sender<ClientMessage>,
    pending: Mutex<PendingRequests>,
    next_request: AtomicU64,
    session: Uuid,
    timeout: Duration,
}

impl SessionClient {
    pub fn new(outgoing: mpsc::Sender<ClientMessage>) -> Self {
        Self::with_timeout(outgoing, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(outgoing: mpsc::Sender<ClientMessage>, timeout: Duration) -> Self {
        Self {
            outgoing,
            pending: Mutex::new(HashMap::new()),
            next_request: AtomicU64::new(1),
            session: Uuid::new_v4(),
            timeout,
        }
    }

    /// Attribute the connection to a player. Must precede any request.
    pub async fn identify(&self, player_id: PlayerId, name: &str) -> Result<(), RequestError> {
        self.send(ClientMessage::Identify {
            player_id,
            name: name.to_string(),
        })
        .await
    }

    pub async fn heartbeat(&self) -> Result<(), RequestError> {
        self.send(ClientMessage::Heartbeat).await
    }

    /// Send a non-request message such as an interaction.
    pub async fn send(&self, message: ClientMessage) -> Result<(), RequestError> {
        self.outgoing
            .send(message)
            .await
            .map_err(|_| RequestError::NotConnected)
    }

    /// Route an incoming message. Responses complete their pending request;
    /// everything else is handed back to the caller.
    pub async fn handle_server_message(&self, message: ServerMessage) -> Option<ServerMessage> {
        match message {
            ServerMessage::Response { request_id, result } => {
                match self.pending.lock().await.remove(&request_id) {
                    Some(waiter) => {
                        // The requester may have timed out in the meantime.
                        let _ = waiter.send(result);
                    }
                    None => {
                        tracing::debug!(request_id = %request_id, "Response for unknown request");
                    }
                }
                None
            }
            other => Some(other),
        }
    }

    /// Fail every outstanding request after the connection dropped.
    pub async fn disconnect(&self) {
        let mut pending = self.pending.lock().await;
        if !pending.is_empty() {
            tracing::info!(count = pending.len(), "Cancelling pending requests");
        }
        // Dropping the senders wakes the waiters with `Cancelled`.
        pending.clear();
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    fn next_request_id(&self) -> String {
        let n = self.next_request.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.session, n)
    }
}

#[async_trait]
impl NpcRequestPort for SessionClient {
    async fn request(&self, payload: RequestPayload) -> Result<ResponseResult, RequestError> {
        let request_id = self.next_request_id();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(request_id.clone(), tx);

        let message = ClientMessage::Request {
            request_id: request_id.clone(),
            payload,
        };
        if let Err(e) = self.send(message).await {
            self.pending.lock().await.remove(&request_id);
            return Err(e);
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(RequestError::Cancelled),
            Err(_) => {
                self.pending.lock().await.remove(&request_id);
                tracing::warn!(request_id = %request_id, "Request timed out");
                Err(RequestError::Timeout)
            }
        }
    }
}
