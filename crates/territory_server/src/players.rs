//! Player registration and token lookup.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use territory::PlayerId;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::ServiceError;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity used in sessions.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Secret credential presented with every request.
    token: String,
}

/// Resolves player credentials to identities.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    by_token: Arc<RwLock<HashMap<String, Player>>>,
}

impl PlayerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new player under a fresh id and token.
    #[instrument(skip(self))]
    pub async fn register(&self, name: String) -> Result<Player, ServiceError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            warn!("Rejected blank player name");
            return Err(ServiceError::InvalidPlayerName);
        }

        let player = Player {
            id: Uuid::new_v4().to_string(),
            name,
            token: Uuid::new_v4().simple().to_string(),
        };

        self.by_token
            .write()
            .await
            .insert(player.token.clone(), player.clone());
        info!(player_id = %player.id, name = %player.name, "Player registered");
        Ok(player)
    }

    /// Looks up the player owning a token.
    #[instrument(skip(self, token))]
    pub async fn resolve(&self, token: &str) -> Result<Player, ServiceError> {
        let player = self.by_token.read().await.get(token).cloned();
        match player {
            Some(player) => {
                debug!(player_id = %player.id, "Token resolved");
                Ok(player)
            }
            None => {
                warn!("Unknown player token");
                Err(ServiceError::PlayerNotFound)
            }
        }
    }

    /// Number of registered players.
    pub async fn len(&self) -> usize {
        self.by_token.read().await.len()
    }

    /// True if nobody registered yet.
    pub async fn is_empty(&self) -> bool {
        self.by_token.read().await.is_empty()
    }
}
