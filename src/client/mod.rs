//! Display-side access to game sessions.
//!
//! [`GameApi`] is the seam between the display and a session service. It is
//! implemented by [`GameClient`] over HTTP and by [`SessionService`] directly
//! for single-process play. [`SyncClient`] keeps a local mirror of one
//! session in step with the service.

mod http;
mod sync;

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{CreatedGame, GameState};
use crate::service::{ServiceError, SessionService};

pub use http::GameClient;
pub use sync::{Mirror, Phase, SyncClient, SyncClosed, SyncHandle};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl ClientError {
    /// Short text suitable for a status line.
    pub fn notification(&self) -> String {
        match self {
            Self::Network(_) => "Error: Couldn't connect to API".to_string(),
            Self::Parse(_) => "Error: Invalid response from API".to_string(),
            Self::NotFound(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Server(msg) => format!("Error: {msg}"),
        }
    }
}

impl From<ServiceError> for ClientError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound => Self::NotFound(e.to_string()),
            ServiceError::Rejected(_) => Self::Rejected(e.to_string()),
        }
    }
}

/// Operations a display needs from a session service.
pub trait GameApi: Send + Sync + 'static {
    fn create(&self) -> impl Future<Output = Result<CreatedGame, ClientError>> + Send;

    fn state(&self, id: Uuid) -> impl Future<Output = Result<GameState, ClientError>> + Send;

    fn guess(
        &self,
        id: Uuid,
        word: &str,
    ) -> impl Future<Output = Result<GameState, ClientError>> + Send;
}

impl GameApi for SessionService {
    fn create(&self) -> impl Future<Output = Result<CreatedGame, ClientError>> + Send {
        std::future::ready(Ok(SessionService::create(self)))
    }

    fn state(&self, id: Uuid) -> impl Future<Output = Result<GameState, ClientError>> + Send {
        std::future::ready(SessionService::state(self, id).map_err(ClientError::from))
    }

    fn guess(
        &self,
        id: Uuid,
        word: &str,
    ) -> impl Future<Output = Result<GameState, ClientError>> + Send {
        std::future::ready(SessionService::guess(self, id, word).map_err(ClientError::from))
    }
}
