use serde::{Deserialize, Serialize};

use crate::words::{Word, WORD_LENGTH};

/// Feedback for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    /// Letter is not in the target, or every occurrence is already accounted for.
    #[serde(rename = "b")]
    Absent,
    /// Letter is in the target at another position.
    #[serde(rename = "y")]
    Present,
    /// Letter is in the target at this position.
    #[serde(rename = "g")]
    Correct,
}

impl Hint {
    /// The one-character wire code.
    pub fn code(&self) -> char {
        match self {
            Self::Absent => 'b',
            Self::Present => 'y',
            Self::Correct => 'g',
        }
    }
}

/// A guessed word together with its hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord(Word, [Hint; WORD_LENGTH]);

impl GuessRecord {
    pub fn new(word: Word, hints: [Hint; WORD_LENGTH]) -> Self {
        Self(word, hints)
    }

    pub fn word(&self) -> &Word {
        &self.0
    }

    pub fn hints(&self) -> &[Hint; WORD_LENGTH] {
        &self.1
    }

    /// Hints as a compact string such as `"ybbgy"`.
    pub fn hint_codes(&self) -> String {
        self.1.iter().map(Hint::code).collect()
    }

    pub fn is_solved(&self) -> bool {
        self.1.iter().all(|hint| *hint == Hint::Correct)
    }
}
