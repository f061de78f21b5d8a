//! A single game: the target, the guess history and the win/loss state machine.
//!
//! ```text
//! InProgress ──correct guess──────────────▶ Won
//!     │
//!     └──history reaches max_guesses───────▶ Lost
//! ```
//!
//! Terminal states freeze the history. Every rejected guess leaves the session
//! untouched.

use std::num::NonZeroU32;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{GameState, GuessRecord, Hint};
use crate::words::{Word, WordLists, WORD_LENGTH};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Why a guess was not recorded. The messages are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("Game Over!")]
    GameOver,
    #[error("You have already won!!")]
    AlreadyWon,
    #[error("Invalid Guess :(")]
    InvalidGuess,
}

/// Score `guess` against `target`.
///
/// Greens are assigned first and consume their letter, so a letter is never
/// marked non-absent more times than it occurs in the target.
pub fn evaluate(guess: &Word, target: &Word) -> [Hint; WORD_LENGTH] {
    let mut hints = [Hint::Absent; WORD_LENGTH];
    let mut remaining = target.letter_counts();
    let guess = guess.letters();
    let target = target.letters();

    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            hints[i] = Hint::Correct;
            remaining[usize::from(guess[i] - b'A')] -= 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if hints[i] == Hint::Correct {
            continue;
        }
        let slot = &mut remaining[usize::from(guess[i] - b'A')];
        if *slot > 0 {
            hints[i] = Hint::Present;
            *slot -= 1;
        }
    }

    hints
}

/// One active game.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    target: Word,
    history: Vec<GuessRecord>,
    max_guesses: NonZeroU32,
    status: GameStatus,
    words: Arc<WordLists>,
}

impl GameSession {
    pub fn new(id: Uuid, target: Word, max_guesses: NonZeroU32, words: Arc<WordLists>) -> Self {
        Self {
            id,
            target,
            history: Vec::new(),
            max_guesses,
            status: GameStatus::InProgress,
            words,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn max_guesses(&self) -> u32 {
        self.max_guesses.get()
    }

    /// Validate, score and record a guess, then advance the state machine.
    ///
    /// Checks run in order and the first failure wins: terminal state, then
    /// shape (five ASCII letters, any case), then guess-set membership.
    pub fn evaluate_guess(&mut self, input: &str) -> Result<GameState, GuessRejection> {
        match self.status {
            GameStatus::Lost => return Err(GuessRejection::GameOver),
            GameStatus::Won => return Err(GuessRejection::AlreadyWon),
            GameStatus::InProgress => {}
        }

        let word = Word::new(input).map_err(|_| GuessRejection::InvalidGuess)?;
        if !self.words.is_valid_guess(&word) {
            return Err(GuessRejection::InvalidGuess);
        }

        let hints = evaluate(&word, &self.target);
        let record = GuessRecord::new(word, hints);
        let solved = record.is_solved();
        self.history.push(record);

        if solved {
            self.status = GameStatus::Won;
        } else if self.history.len() >= self.max_guesses() as usize {
            self.status = GameStatus::Lost;
        }

        Ok(self.state())
    }

    pub fn state(&self) -> GameState {
        GameState {
            chances_left: self.max_guesses() - self.history.len() as u32,
            lost: self.status == GameStatus::Lost,
            win: self.status == GameStatus::Won,
            guesses: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Hint::{Absent as B, Correct as G, Present as Y};

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn score(guess: &str, target: &str) -> [Hint; WORD_LENGTH] {
        evaluate(&word(guess), &word(target))
    }

    fn session(target: &str, max_guesses: u32) -> GameSession {
        let words = WordLists::from_words(
            [word(target)],
            ["crane", "level", "slate", "speed", "robot", "alley"].map(word),
        )
        .unwrap();
        let max_guesses = NonZeroU32::new(max_guesses).unwrap();
        GameSession::new(Uuid::new_v4(), word(target), max_guesses, Arc::new(words))
    }

    #[test]
    fn green_consumes_letter_before_yellows() {
        // ALLEY's only E is matched in place, so LEVEL's first E is absent;
        // one L is left over for the trailing L after the leading L takes one.
        assert_eq!(score("level", "alley"), [Y, B, B, G, Y]);
    }

    #[test]
    fn no_letters_in_common() {
        assert_eq!(score("abcde", "fghij"), [B; WORD_LENGTH]);
    }

    #[test]
    fn duplicate_guess_letters_both_yellow_when_target_has_two() {
        assert_eq!(score("speed", "erase"), [Y, B, Y, Y, B]);
    }

    #[test]
    fn yellow_then_green_for_same_letter() {
        assert_eq!(score("robot", "floor"), [Y, Y, B, G, B]);
    }

    #[test]
    fn excess_duplicates_are_absent() {
        assert_eq!(score("eeeee", "crane"), [B, B, B, B, G]);
        assert_eq!(score("lllll", "alley"), [B, G, G, B, B]);
    }

    #[test]
    fn max_guesses_is_reported_from_the_session() {
        let game = session("alley", 3);
        assert_eq!(game.max_guesses(), 3);
        assert_eq!(game.state().chances_left, 3);
    }

    #[test]
    fn correct_guess_wins_immediately() {
        let mut game = session("alley", 6);
        let state = game.evaluate_guess("alley").unwrap();

        assert!(state.win);
        assert!(!state.lost);
        assert_eq!(state.chances_left, 5);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn exhausting_guesses_loses() {
        let mut game = session("alley", 2);
        game.evaluate_guess("crane").unwrap();
        let state = game.evaluate_guess("slate").unwrap();

        assert!(state.lost);
        assert!(!state.win);
        assert_eq!(state.chances_left, 0);
    }

    #[test]
    fn winning_on_last_guess_is_a_win() {
        let mut game = session("alley", 2);
        game.evaluate_guess("crane").unwrap();
        let state = game.evaluate_guess("alley").unwrap();

        assert!(state.win);
        assert!(!state.lost);
    }

    #[test]
    fn terminal_states_reject_and_freeze_history() {
        let mut won = session("alley", 6);
        won.evaluate_guess("alley").unwrap();
        assert_eq!(won.evaluate_guess("crane"), Err(GuessRejection::AlreadyWon));
        assert_eq!(won.history().len(), 1);

        let mut lost = session("alley", 1);
        lost.evaluate_guess("crane").unwrap();
        assert_eq!(lost.evaluate_guess("alley"), Err(GuessRejection::GameOver));
        assert_eq!(lost.history().len(), 1);
    }

    #[test]
    fn terminal_check_precedes_validation() {
        let mut game = session("alley", 1);
        game.evaluate_guess("crane").unwrap();
        assert_eq!(game.evaluate_guess("xx"), Err(GuessRejection::GameOver));
    }

    #[test]
    fn invalid_guesses_leave_state_unchanged() {
        let mut game = session("alley", 6);
        for bad in ["toolong", "abc", "cr4ne", "zzzzz", ""] {
            assert_eq!(game.evaluate_guess(bad), Err(GuessRejection::InvalidGuess));
        }
        assert!(game.history().is_empty());
        assert_eq!(game.state().chances_left, 6);
    }

    #[test]
    fn guesses_are_case_insensitive() {
        let mut game = session("alley", 6);
        let state = game.evaluate_guess("LeVeL").unwrap();
        assert_eq!(state.guesses[0].word().as_str(), "LEVEL");
        assert_eq!(state.guesses[0].hint_codes(), "ybbgy");
    }

    #[test]
    fn rejection_messages_match_wire_contract() {
        assert_eq!(GuessRejection::InvalidGuess.to_string(), "Invalid Guess :(");
        assert_eq!(GuessRejection::GameOver.to_string(), "Game Over!");
        assert_eq!(GuessRejection::AlreadyWon.to_string(), "You have already won!!");
    }
}
