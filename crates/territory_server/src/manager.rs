//! Session storage with per-session serialization and change notification.
//!
//! Every session sits behind its own mutex, so at most one mutation per
//! session is in flight while different sessions proceed in parallel.
//! Mutations run on a copy that is only committed when the engine accepts
//! it, and each commit is broadcast to the session's subscribers.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use territory::{Action, GameEngine, Role, Session, Status, TurnOutcome};
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{ConfigError, PlayerDirectory, ServerConfig, ServiceError};

/// Unique identifier for a session.
pub type SessionId = String;

/// Snapshot published after every committed mutation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    /// Session that changed.
    pub session_id: SessionId,
    /// State after the change.
    pub session: Session,
}

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Session id.
    pub id: SessionId,
    /// Display name.
    pub name: String,
    /// Lifecycle state.
    pub status: Status,
}

#[derive(Debug)]
struct SessionSlot {
    session: Mutex<Session>,
    updates: broadcast::Sender<SessionUpdate>,
}

/// Owns every live session and routes player requests to the engine.
#[derive(Debug, Clone)]
pub struct SessionManager {
    engine: Arc<GameEngine>,
    players: PlayerDirectory,
    sessions: Arc<RwLock<HashMap<SessionId, Arc<SessionSlot>>>>,
    notification_capacity: usize,
}

impl SessionManager {
    /// Creates a manager around an engine and a player directory.
    #[instrument(skip(engine, players))]
    pub fn new(engine: GameEngine, players: PlayerDirectory, notification_capacity: usize) -> Self {
        info!("Creating session manager");
        Self {
            engine: Arc::new(engine),
            players,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            notification_capacity: notification_capacity.max(1),
        }
    }

    /// Creates a manager with a fresh directory from configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let engine = GameEngine::new(config.rules().clone())
            .map_err(|e| ConfigError::new(e.to_string()))?;
        Ok(Self::new(
            engine,
            PlayerDirectory::new(),
            *config.notification_capacity(),
        ))
    }

    /// The player directory used to resolve tokens.
    pub fn players(&self) -> &PlayerDirectory {
        &self.players
    }

    /// The engine applying the rules.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Creates a new waiting session.
    #[instrument(skip(self))]
    pub async fn create_session(&self, name: String) -> SessionId {
        let id = Uuid::new_v4().to_string();
        let (updates, _) = broadcast::channel(self.notification_capacity);
        let slot = SessionSlot {
            session: Mutex::new(self.engine.new_session(name)),
            updates,
        };

        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(slot));
        info!(session_id = %id, "Created new session");
        id
    }

    /// Lists every session.
    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        let slots: Vec<_> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, slot)| (id.clone(), Arc::clone(slot)))
            .collect();

        let mut summaries = Vec::with_capacity(slots.len());
        for (id, slot) in slots {
            let session = slot.session.lock().await;
            summaries.push(SessionSummary {
                id,
                name: session.name.clone(),
                status: session.status,
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        info!(count = summaries.len(), "Listed sessions");
        summaries
    }

    async fn slot(&self, id: &str) -> Result<Arc<SessionSlot>, ServiceError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| {
                debug!(session_id = id, "Session not found");
                ServiceError::SessionNotFound(id.to_string())
            })
    }

    /// Returns a snapshot of a session.
    pub async fn get_session(&self, id: &str) -> Result<Session, ServiceError> {
        let slot = self.slot(id).await?;
        let session = slot.session.lock().await.clone();
        Ok(session)
    }

    /// Subscribes to a session's committed changes.
    pub async fn subscribe(
        &self,
        id: &str,
    ) -> Result<broadcast::Receiver<SessionUpdate>, ServiceError> {
        let slot = self.slot(id).await?;
        Ok(slot.updates.subscribe())
    }

    /// Number of live subscriptions to a session.
    pub async fn subscriber_count(&self, id: &str) -> Result<usize, ServiceError> {
        let slot = self.slot(id).await?;
        Ok(slot.updates.receiver_count())
    }

    /// Seats the player owning `token` in a session.
    #[instrument(skip(self, token))]
    pub async fn join(&self, id: &str, token: &str) -> Result<Role, ServiceError> {
        let slot = self.slot(id).await?;
        let player = self.players.resolve(token).await?;

        let mut guard = slot.session.lock().await;
        let mut draft = guard.clone();
        let role = self.engine.join(&mut draft, player.id().clone())?;
        *guard = draft;

        publish(&slot, id, &guard);
        info!(session_id = id, role = %role, "Player joined session");
        Ok(role)
    }

    /// Captures `(x, y)` on behalf of the player owning `token`.
    pub async fn make_move(
        &self,
        id: &str,
        token: &str,
        x: i64,
        y: i64,
    ) -> Result<(Session, TurnOutcome), ServiceError> {
        self.submit(id, token, Action::Capture { x, y }).await
    }

    /// Ends the turn of the player owning `token`.
    pub async fn end_turn(
        &self,
        id: &str,
        token: &str,
    ) -> Result<(Session, TurnOutcome), ServiceError> {
        self.submit(id, token, Action::EndTurn).await
    }

    /// Applies an action while holding the session's lock.
    ///
    /// A rejected action leaves the stored session unchanged and publishes
    /// nothing.
    #[instrument(skip(self, token))]
    pub async fn submit(
        &self,
        id: &str,
        token: &str,
        action: Action,
    ) -> Result<(Session, TurnOutcome), ServiceError> {
        let slot = self.slot(id).await?;
        let player = self.players.resolve(token).await?;

        let mut guard = slot.session.lock().await;
        let role = guard.role_of(player.id()).ok_or_else(|| {
            warn!(player_id = %player.id(), "Player not part of this session");
            ServiceError::NotInSession
        })?;

        let mut draft = guard.clone();
        let outcome = self.engine.apply(&mut draft, role, action)?;
        *guard = draft;

        publish(&slot, id, &guard);
        info!(session_id = id, role = %role, ?outcome, "Action committed");
        Ok((guard.clone(), outcome))
    }
}

fn publish(slot: &SessionSlot, id: &str, session: &Session) {
    let update = SessionUpdate {
        session_id: id.to_string(),
        session: session.clone(),
    };
    match slot.updates.send(update) {
        Ok(receivers) => debug!(session_id = id, receivers, "Session update broadcast"),
        Err(_) => debug!(session_id = id, "No subscribers for session update"),
    }
}
