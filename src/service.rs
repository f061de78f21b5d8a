//! Request-level façade over the session store.
//!
//! Every failure is returned as a [`ServiceError`] value; the HTTP layer turns
//! it into an `{ "error": ... }` payload.

use thiserror::Error;
use uuid::Uuid;

use crate::game::GuessRejection;
use crate::models::{CreatedGame, GameState};
use crate::store::{lock_session, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Game not found!")]
    NotFound,
    #[error(transparent)]
    Rejected(#[from] GuessRejection),
}

#[derive(Clone)]
pub struct SessionService {
    store: SessionStore,
}

impl SessionService {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn create(&self) -> CreatedGame {
        let (session_id, session) = self.store.create();
        let state = lock_session(&session).state();
        CreatedGame { session_id, state }
    }

    pub fn state(&self, id: Uuid) -> Result<GameState, ServiceError> {
        let session = self.lookup(id)?;
        let state = lock_session(&session).state();
        Ok(state)
    }

    /// Submit a guess. The session lock is held for the whole evaluation.
    pub fn guess(&self, id: Uuid, word: &str) -> Result<GameState, ServiceError> {
        let session = self.lookup(id)?;
        let mut game = lock_session(&session);

        match game.evaluate_guess(word) {
            Ok(state) => {
                tracing::debug!(
                    session_id = %id,
                    guess = %word,
                    chances_left = state.chances_left,
                    "Guess accepted"
                );
                if state.is_finished() {
                    tracing::info!(session_id = %id, win = state.win, target = %game.target(), "Game finished");
                }
                Ok(state)
            }
            Err(rejection) => {
                tracing::debug!(session_id = %id, guess = %word, %rejection, "Guess rejected");
                Err(rejection.into())
            }
        }
    }

    /// Same as [`Self::state`], for ids that arrive as raw strings.
    pub fn state_by_key(&self, key: &str) -> Result<GameState, ServiceError> {
        self.state(parse_id(key)?)
    }

    /// Same as [`Self::guess`], for ids that arrive as raw strings.
    pub fn guess_by_key(&self, key: &str, word: &str) -> Result<GameState, ServiceError> {
        self.guess(parse_id(key)?, word)
    }

    fn lookup(&self, id: Uuid) -> Result<crate::store::SharedSession, ServiceError> {
        self.store.get(id).ok_or_else(|| {
            tracing::debug!(session_id = %id, "Unknown session");
            ServiceError::NotFound
        })
    }
}

/// A malformed id can never name a session.
fn parse_id(key: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(key).map_err(|_| ServiceError::NotFound)
}
