//! Process-wide session registry.
//!
//! The map has its own lock, separate from each session's lock: creating or
//! looking up one session never waits on a guess being scored in another.
//! A guess holds its session's mutex for the whole check, append and
//! transition sequence, so two concurrent guesses on one id are serialised.
//!
//! Sessions live until the process exits; nothing is evicted.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rand::Rng;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::game::GameSession;
use crate::words::{Word, WordList, WordLists};

/// Chooses the target word for a new session.
pub trait TargetPicker: Send + Sync {
    /// `answers` is never empty.
    fn pick(&self, answers: &WordList) -> Word;
}

/// Uniformly random choice from the answer set.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl TargetPicker for RandomPicker {
    fn pick(&self, answers: &WordList) -> Word {
        let position = rand::rng().random_range(0..answers.len());
        answers.as_slice()[position].clone()
    }
}

/// Always the same target. Lets tests and demos play a known word.
#[derive(Debug, Clone)]
pub struct FixedPicker(pub Word);

impl TargetPicker for FixedPicker {
    fn pick(&self, _answers: &WordList) -> Word {
        self.0.clone()
    }
}

/// A session shared between concurrent requests.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Lock a session, recovering the guard if a previous holder panicked.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    words: Arc<WordLists>,
    picker: Box<dyn TargetPicker>,
    max_guesses: NonZeroU32,
}

/// Concurrent map from session id to [`GameSession`]. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Fails with [`ConfigError::InvalidMaxGuesses`] when `max_guesses` is zero.
    pub fn new(words: Arc<WordLists>, max_guesses: u32) -> Result<Self, ConfigError> {
        Self::with_picker(words, max_guesses, RandomPicker)
    }

    pub fn with_picker(
        words: Arc<WordLists>,
        max_guesses: u32,
        picker: impl TargetPicker + 'static,
    ) -> Result<Self, ConfigError> {
        let max_guesses = NonZeroU32::new(max_guesses).ok_or(ConfigError::InvalidMaxGuesses)?;
        Ok(Self {
            inner: Arc::new(Inner {
                sessions: RwLock::new(HashMap::new()),
                words,
                picker: Box::new(picker),
                max_guesses,
            }),
        })
    }

    pub fn words(&self) -> &WordLists {
        &self.inner.words
    }

    /// Start a new game under a fresh random 128-bit id.
    pub fn create(&self) -> (Uuid, SharedSession) {
        let target = self.inner.picker.pick(self.inner.words.answers());
        let mut sessions = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            let id = Uuid::new_v4();
            if let Entry::Vacant(slot) = sessions.entry(id) {
                let session = Arc::new(Mutex::new(GameSession::new(
                    id,
                    target,
                    self.inner.max_guesses,
                    Arc::clone(&self.inner.words),
                )));
                slot.insert(Arc::clone(&session));
                tracing::info!(session_id = %id, active = sessions.len(), "Created session");
                return (id, session);
            }
            tracing::warn!(session_id = %id, "Session id collision, regenerating");
        }
    }

    /// Look up a session. Never inserts.
    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
