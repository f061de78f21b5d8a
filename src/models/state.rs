use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GuessRecord;

/// Externally visible state of a session.
///
/// `chances_left` is always `max_guesses - guesses.len()`; `win` and `lost`
/// are never both true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub chances_left: u32,
    pub lost: bool,
    pub win: bool,
    pub guesses: Vec<GuessRecord>,
}

impl GameState {
    pub fn is_finished(&self) -> bool {
        self.win || self.lost
    }
}

/// Response when creating a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGame {
    pub session_id: Uuid,
    pub state: GameState,
}

/// Body of a guess submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessInput {
    pub guess: String,
}

/// Body returned for every soft failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
