//! Word lists: loading, validation and membership.
//!
//! Two collections are loaded at startup and shared read-only by every
//! session: the answer set (targets are drawn from it) and the guess set
//! (submissions must belong to it). Only two source pairings are accepted,
//! because mixing the combined list with the disjoint Wordle lists would
//! silently break `answers ⊆ guesses`:
//!
//! - `word_list.txt` for both roles, filtered to five-letter words.
//! - `wordle_allowed_guesses.txt` for guesses and
//!   `wordle_answers_alphabetical.txt` for answers. The guess set becomes the
//!   union of the two files.

mod word;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use word::{Word, WordError};

use crate::config::ConfigError;

/// Fixed length of every playable word.
pub const WORD_LENGTH: usize = 5;

/// The named word-list files a deployment can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WordSource {
    /// `word_list.txt`: one large list used for both roles.
    Combined,
    /// `wordle_allowed_guesses.txt`: guesses that are never answers.
    AllowedGuesses,
    /// `wordle_answers_alphabetical.txt`: the answer words.
    Answers,
}

impl WordSource {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Combined => "word_list.txt",
            Self::AllowedGuesses => "wordle_allowed_guesses.txt",
            Self::Answers => "wordle_answers_alphabetical.txt",
        }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for WordSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word_list.txt" | "combined" => Ok(Self::Combined),
            "wordle_allowed_guesses.txt" | "allowed-guesses" => Ok(Self::AllowedGuesses),
            "wordle_answers_alphabetical.txt" | "answers" => Ok(Self::Answers),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

impl TryFrom<String> for WordSource {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WordSource> for String {
    fn from(source: WordSource) -> Self {
        source.file_name().to_string()
    }
}

/// Reject any pairing other than the two supported ones.
pub fn check_pairing(guess: WordSource, answer: WordSource) -> Result<(), ConfigError> {
    match (guess, answer) {
        (WordSource::Combined, WordSource::Combined)
        | (WordSource::AllowedGuesses, WordSource::Answers) => Ok(()),
        (guess, answer) => Err(ConfigError::IncompatibleSources { guess, answer }),
    }
}

/// An ordered, duplicate-free list of words with O(1) membership.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl WordList {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    pub fn get(&self, position: usize) -> Option<&Word> {
        self.words.get(position)
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    fn push(&mut self, word: Word) {
        if self.index.insert(word.clone()) {
            self.words.push(word);
        }
    }
}

impl FromIterator<Word> for WordList {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        let mut list = Self::default();
        for word in iter {
            list.push(word);
        }
        list
    }
}

/// The answer set and guess set, with `answers ⊆ guesses` guaranteed.
#[derive(Debug, Clone)]
pub struct WordLists {
    answers: WordList,
    guesses: WordList,
}

impl WordLists {
    /// Load a validated pairing from files in `dir`.
    pub fn load(dir: &Path, guess: WordSource, answer: WordSource) -> Result<Self, ConfigError> {
        check_pairing(guess, answer)?;

        let lists = match (guess, answer) {
            (WordSource::AllowedGuesses, WordSource::Answers) => {
                let answers = read_prefiltered(&dir.join(answer.file_name()))?;
                let allowed = read_prefiltered(&dir.join(guess.file_name()))?;
                Self::from_words(answers, allowed)?
            }
            _ => {
                let combined = read_combined(&dir.join(guess.file_name()))?;
                Self::from_words(combined.clone(), combined)?
            }
        };

        tracing::info!(
            answers = lists.answers.len(),
            guesses = lists.guesses.len(),
            %guess,
            %answer,
            "Loaded word lists"
        );
        Ok(lists)
    }

    /// Build from in-memory words. The guess set is `allowed ∪ answers`.
    pub fn from_words(
        answers: impl IntoIterator<Item = Word>,
        allowed: impl IntoIterator<Item = Word>,
    ) -> Result<Self, ConfigError> {
        let answers: WordList = answers.into_iter().collect();
        if answers.is_empty() {
            return Err(ConfigError::EmptyAnswers);
        }
        let guesses: WordList = allowed.into_iter().chain(answers.iter().cloned()).collect();

        Ok(Self { answers, guesses })
    }

    pub fn answers(&self) -> &WordList {
        &self.answers
    }

    pub fn guesses(&self) -> &WordList {
        &self.guesses
    }

    pub fn is_valid_guess(&self, word: &Word) -> bool {
        self.guesses.contains(word)
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// The combined list holds words of every length; keep the five-letter ones.
fn read_combined(path: &Path) -> Result<Vec<Word>, ConfigError> {
    Ok(read_lines(path)?
        .iter()
        .filter_map(|line| Word::new(line).ok())
        .collect())
}

/// The Wordle lists are already five-letter words; anything else is skipped.
fn read_prefiltered(path: &Path) -> Result<Vec<Word>, ConfigError> {
    let lines = read_lines(path)?;
    let total = lines.len();
    let words: Vec<Word> = lines.iter().filter_map(|line| Word::new(line).ok()).collect();

    if words.len() != total {
        tracing::warn!(
            path = %path.display(),
            skipped = total - words.len(),
            "Skipped malformed word-list entries"
        );
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    fn write_file(dir: &Path, name: &str, body: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn accepts_only_supported_pairings() {
        use WordSource::*;

        assert!(check_pairing(Combined, Combined).is_ok());
        assert!(check_pairing(AllowedGuesses, Answers).is_ok());

        for (guess, answer) in [
            (Combined, Answers),
            (AllowedGuesses, Combined),
            (Answers, AllowedGuesses),
            (Answers, Answers),
            (AllowedGuesses, AllowedGuesses),
        ] {
            assert!(
                matches!(
                    check_pairing(guess, answer),
                    Err(ConfigError::IncompatibleSources { .. })
                ),
                "{guess} / {answer} should be rejected"
            );
        }
    }

    #[test]
    fn parses_file_names_and_aliases() {
        assert_eq!("word_list.txt".parse::<WordSource>().unwrap(), WordSource::Combined);
        assert_eq!("answers".parse::<WordSource>().unwrap(), WordSource::Answers);
        assert!(matches!(
            "words.csv".parse::<WordSource>(),
            Err(ConfigError::UnknownSource(_))
        ));
    }

    #[test]
    fn guess_set_is_union_of_allowed_and_answers() {
        let lists = WordLists::from_words(words(&["alley", "crane"]), words(&["level", "xylyl"]))
            .unwrap();

        assert_eq!(lists.answers().len(), 2);
        assert_eq!(lists.guesses().len(), 4);
        for answer in lists.answers().iter() {
            assert!(lists.is_valid_guess(answer));
        }
    }

    #[test]
    fn rejects_empty_answer_set() {
        let result = WordLists::from_words(Vec::new(), words(&["crane"]));
        assert!(matches!(result, Err(ConfigError::EmptyAnswers)));
    }

    #[test]
    fn deduplicates_preserving_order() {
        let list: WordList = words(&["crane", "alley", "crane"]).into_iter().collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().as_str(), "CRANE");
        assert_eq!(list.get(1).unwrap().as_str(), "ALLEY");
    }

    #[test]
    fn loads_combined_list_filtered_to_five_letters() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "word_list.txt", "a\ncrane\nAlley\nsmallest\n\nlevel\n");

        let lists =
            WordLists::load(dir.path(), WordSource::Combined, WordSource::Combined).unwrap();

        let answers: Vec<&str> = lists.answers().iter().map(Word::as_str).collect();
        assert_eq!(answers, ["CRANE", "ALLEY", "LEVEL"]);
        assert_eq!(lists.guesses().len(), 3);
    }

    #[test]
    fn loads_disjoint_lists_as_union() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "wordle_allowed_guesses.txt", "aahed\naalii\n");
        write_file(dir.path(), "wordle_answers_alphabetical.txt", "aback\nabase\n");

        let lists =
            WordLists::load(dir.path(), WordSource::AllowedGuesses, WordSource::Answers).unwrap();

        assert_eq!(lists.answers().len(), 2);
        assert_eq!(lists.guesses().len(), 4);
        assert!(lists.is_valid_guess(&Word::new("ABASE").unwrap()));
        assert!(!lists.answers().contains(&Word::new("AAHED").unwrap()));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = WordLists::load(dir.path(), WordSource::Combined, WordSource::Combined);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn incompatible_pairing_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let result = WordLists::load(dir.path(), WordSource::Combined, WordSource::Answers);
        assert!(matches!(result, Err(ConfigError::IncompatibleSources { .. })));
    }
}
