//! Territory server - the collaborators around the game engine.
//!
//! # Architecture
//!
//! - **PlayerDirectory**: registers players and resolves tokens
//! - **SessionManager**: stores sessions, serializes mutations per
//!   session and broadcasts every committed change
//! - **ServerConfig**: rules and service settings loaded from TOML
//! - **play**: a hot-seat match over line-based text input

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod manager;
pub mod play;
mod players;

pub use config::{ConfigError, LOG_ENV, ServerConfig};
pub use error::ServiceError;
pub use manager::{SessionId, SessionManager, SessionSummary, SessionUpdate};
pub use players::{Player, PlayerDirectory};
