//! Connection management for WebSocket clients.
//!
//! Tracks connected clients and the player each one identified as, and
//! fans profile changes out to all of them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::infrastructure::ports::ChangeBroadcastPort;
use crate::use_cases::interaction::Caller;
use easynpc_domain::{NpcId, NpcProfile, PlayerId};
use easynpc_shared::ServerMessage;

/// Information about a connected client.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Unique ID for this connection
    pub connection_id: Uuid,
    /// Player behind the connection, once identified
    pub player: Option<Caller>,
}

impl ConnectionInfo {
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player.as_ref().map(|player| player.player_id)
    }
}

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    /// Map of connection_id -> (ConnectionInfo, sender channel)
    connections: RwLock<HashMap<Uuid, (ConnectionInfo, mpsc::Sender<ServerMessage>)>>,
}

impl ConnectionManager {
    /// Create a new connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    pub async fn register(&self, connection_id: Uuid, sender: mpsc::Sender<ServerMessage>) {
        let info = ConnectionInfo {
            connection_id,
            player: None,
        };
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, (info, sender));
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
    }

    /// Attribute a connection to a player.
    pub async fn identify(&self, connection_id: Uuid, player: Caller) -> Result<(), ConnectionError> {
        let mut connections = self.connections.write().await;
        let (info, _) = connections
            .get_mut(&connection_id)
            .ok_or(ConnectionError::NotFound)?;
        tracing::info!(
            connection_id = %connection_id,
            player_id = %player.player_id,
            name = %player.name,
            "Connection identified"
        );
        info.player = Some(player);
        Ok(())
    }

    /// Get connection info by ID.
    pub async fn get(&self, connection_id: Uuid) -> Option<ConnectionInfo> {
        let connections = self.connections.read().await;
        connections.get(&connection_id).map(|(info, _)| info.clone())
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Broadcast a message to every connection.
    pub async fn broadcast(&self, message: ServerMessage) {
        let connections = self.connections.read().await;
        for (info, sender) in connections.values() {
            if let Err(e) = sender.try_send(message.clone()) {
                tracing::warn!(
                    connection_id = %info.connection_id,
                    error = %e,
                    "Failed to broadcast message"
                );
            }
        }
    }

    /// Send a message to one connection.
    pub async fn send_to(&self, connection_id: Uuid, message: ServerMessage) {
        let connections = self.connections.read().await;
        if let Some((_, sender)) = connections.get(&connection_id) {
            if let Err(e) = sender.try_send(message) {
                tracing::warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to send message"
                );
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeBroadcastPort for ConnectionManager {
    async fn profile_changed(&self, npc_id: NpcId, profile: &NpcProfile) {
        self.broadcast(ServerMessage::ProfileChanged {
            npc_id,
            profile: profile.clone(),
        })
        .await;
    }

    async fn profile_removed(&self, npc_id: NpcId) {
        self.broadcast(ServerMessage::ProfileRemoved { npc_id }).await;
    }
}

/// Errors that can occur during connection operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use easynpc_domain::SkinModel;

    #[tokio::test]
    async fn identify_attaches_player() {
        let manager = ConnectionManager::new();
        let connection_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::channel(4);
        manager.register(connection_id, tx).await;

        let player_id = PlayerId::new();
        manager
            .identify(connection_id, Caller::new(player_id, "Alex"))
            .await
            .unwrap();
        let info = manager.get(connection_id).await.unwrap();
        assert_eq!(info.player_id(), Some(player_id));

        assert!(manager
            .identify(Uuid::new_v4(), Caller::new(player_id, "Alex"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn profile_changes_reach_every_connection() {
        let manager = ConnectionManager::new();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        manager.register(Uuid::new_v4(), tx_a).await;
        manager.register(Uuid::new_v4(), tx_b).await;

        let profile = NpcProfile::spawn(NpcId::new(), SkinModel::Humanoid);
        manager.profile_changed(profile.id(), &profile).await;
        manager.profile_removed(profile.id()).await;

        for rx in [&mut rx_a, &mut rx_b] {
            assert!(matches!(
                rx.recv().await,
                Some(ServerMessage::ProfileChanged { .. })
            ));
            assert_eq!(
                rx.recv().await,
                Some(ServerMessage::ProfileRemoved {
                    npc_id: profile.id()
                })
            );
        }
        assert_eq!(manager.connection_count().await, 2);
    }

    #[tokio::test]
    async fn unregistered_connections_are_skipped() {
        let manager = ConnectionManager::new();
        let connection_id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::channel(4);
        manager.register(connection_id, tx).await;
        manager.unregister(connection_id).await;

        manager.send_to(connection_id, ServerMessage::Pong).await;
        assert!(rx.recv().await.is_none());
    }
}
