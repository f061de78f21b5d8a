//! Keeps a local mirror of one session in step with the service.
//!
//! A single background task owns the mirror. It is the only writer: it runs
//! the periodic reconciliation tick, performs the network calls triggered by
//! user commands, and publishes every change as a [`Mirror`] snapshot on a
//! `watch` channel. The interaction flow sends commands and reads snapshots;
//! it never touches the mirror directly and never waits on the network.
//!
//! ```text
//! NoSession ──start/attach──▶ AwaitingCreate ──ok──▶ Active(id)
//!     ▲                            │
//!     └─────────── error ──────────┘
//! ```
//!
//! A tick only adopts the server's state when the server holds more guesses
//! than the mirror, and then replaces the local history wholesale. That is how
//! guesses made by another actor on the same session become visible.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use super::{ClientError, GameApi};
use crate::models::{GameState, GuessRecord};
use crate::words::WORD_LENGTH;

const COMMAND_BUFFER: usize = 16;

/// Where the client is in its session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NoSession,
    AwaitingCreate,
    Active(Uuid),
}

/// Local copy of a session's state plus the current status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mirror {
    pub phase: Phase,
    pub guesses: Vec<GuessRecord>,
    pub chances_left: u32,
    pub win: bool,
    pub lost: bool,
    pub notification: Option<String>,
}

impl Mirror {
    pub fn session_id(&self) -> Option<Uuid> {
        match self.phase {
            Phase::Active(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.win || self.lost
    }

    /// Replace everything with the server's view.
    pub fn adopt(&mut self, state: GameState) {
        self.guesses = state.guesses;
        self.chances_left = state.chances_left;
        self.win = state.win;
        self.lost = state.lost;
    }

    /// Adopt `state` only if the server has seen more guesses than we have.
    ///
    /// Returns whether anything changed.
    pub fn reconcile(&mut self, state: GameState) -> bool {
        if state.guesses.len() > self.guesses.len() {
            self.adopt(state);
            true
        } else {
            false
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    fn outcome(&self, origin: Origin) -> &'static str {
        if self.win {
            "You won!"
        } else if self.lost {
            "Game over!"
        } else {
            match origin {
                Origin::Local => "Guess submitted. Awaiting next guess.",
                Origin::Remote => "State updated remotely",
            }
        }
    }
}

/// Who caused the state change being reported.
#[derive(Debug, Clone, Copy)]
enum Origin {
    Local,
    Remote,
}

/// The sync task has stopped and no longer accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sync task is not running")]
pub struct SyncClosed;

#[derive(Debug)]
enum Command {
    Start,
    Attach(Uuid),
    Guess(String),
}

/// Builder for the background sync task.
pub struct SyncClient<A> {
    api: A,
    poll_interval: Duration,
}

impl<A: GameApi> SyncClient<A> {
    pub fn new(api: A, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    /// Spawn the sync task on the current tokio runtime.
    pub fn spawn(self) -> SyncHandle {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, snapshots) = watch::channel(Mirror::default());
        let poll_interval = self.poll_interval;

        let worker = Worker {
            api: self.api,
            mirror: Mirror::default(),
            publisher,
        };
        let task = tokio::spawn(worker.run(command_rx, poll_interval));

        SyncHandle {
            commands,
            snapshots,
            task,
            poll_interval,
        }
    }
}

/// Interaction-side handle to a running sync task.
pub struct SyncHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Mirror>,
    task: JoinHandle<()>,
    poll_interval: Duration,
}

impl SyncHandle {
    /// Create a new session and start following it.
    pub async fn start(&self) -> Result<(), SyncClosed> {
        self.send(Command::Start).await
    }

    /// Follow an existing session, e.g. one another actor is playing.
    pub async fn attach(&self, id: Uuid) -> Result<(), SyncClosed> {
        self.send(Command::Attach(id)).await
    }

    /// Submit a guess for the followed session.
    pub async fn guess(&self, word: impl Into<String>) -> Result<(), SyncClosed> {
        self.send(Command::Guess(word.into())).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Mirror {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every published change.
    pub fn subscribe(&self) -> watch::Receiver<Mirror> {
        self.snapshots.clone()
    }

    /// Stop the task, waiting at most one poll interval before aborting it.
    pub async fn shutdown(self) {
        let Self {
            commands,
            task,
            poll_interval,
            ..
        } = self;
        drop(commands);

        let abort = task.abort_handle();
        if tokio::time::timeout(poll_interval, task).await.is_err() {
            tracing::debug!("Sync task did not stop within one poll interval, aborting");
            abort.abort();
        }
    }

    async fn send(&self, command: Command) -> Result<(), SyncClosed> {
        self.commands.send(command).await.map_err(|_| SyncClosed)
    }
}

struct Worker<A> {
    api: A,
    mirror: Mirror,
    publisher: watch::Sender<Mirror>,
}

impl<A: GameApi> Worker<A> {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, poll_interval: Duration) {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                _ = ticker.tick() => self.tick().await,
            }
        }
        tracing::debug!("Sync task stopped");
    }

    fn publish(&self) {
        let mirror = &self.mirror;
        self.publisher.send_if_modified(|current| {
            if current == mirror {
                false
            } else {
                current.clone_from(mirror);
                true
            }
        });
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Start => self.start().await,
            Command::Attach(id) => self.attach(id).await,
            Command::Guess(word) => self.guess(&word).await,
        }
        self.publish();
    }

    async fn start(&mut self) {
        let previous = self.mirror.phase;
        self.mirror.phase = Phase::AwaitingCreate;
        self.publish();

        match self.api.create().await {
            Ok(created) => {
                self.mirror.phase = Phase::Active(created.session_id);
                self.mirror.adopt(created.state);
                self.mirror.notify("New game started!");
                tracing::info!(session_id = %created.session_id, "Started game");
            }
            Err(e) => {
                self.mirror.phase = previous;
                self.report(&e);
            }
        }
    }

    async fn attach(&mut self, id: Uuid) {
        let previous = self.mirror.phase;
        self.mirror.phase = Phase::AwaitingCreate;
        self.publish();

        match self.api.state(id).await {
            Ok(state) => {
                self.mirror.phase = Phase::Active(id);
                self.mirror.adopt(state);
                self.mirror.notify(format!("Following game {id}"));
                tracing::info!(session_id = %id, "Attached to game");
            }
            Err(e) => {
                self.mirror.phase = previous;
                self.report(&e);
            }
        }
    }

    async fn guess(&mut self, word: &str) {
        let Some(id) = self.mirror.session_id() else {
            self.mirror.notify("No active game");
            return;
        };
        if word.chars().count() != WORD_LENGTH {
            self.mirror.notify("Guess must be 5 letters!");
            return;
        }
        if self.mirror.is_finished() {
            self.mirror.notify("Game over!");
            return;
        }

        match self.api.guess(id, word).await {
            Ok(state) => {
                self.mirror.adopt(state);
                let message = self.mirror.outcome(Origin::Local);
                self.mirror.notify(message);
            }
            Err(e) => self.report(&e),
        }
    }

    /// One reconciliation step against the followed session.
    async fn tick(&mut self) {
        let Some(id) = self.mirror.session_id() else {
            return;
        };

        match self.api.state(id).await {
            Ok(state) => {
                if self.mirror.reconcile(state) {
                    tracing::debug!(session_id = %id, guesses = self.mirror.guesses.len(), "Adopted remote state");
                    let message = self.mirror.outcome(Origin::Remote);
                    self.mirror.notify(message);
                }
            }
            Err(e) => self.report(&e),
        }
        self.publish();
    }

    fn report(&mut self, error: &ClientError) {
        tracing::warn!(%error, "Session sync failed");
        self.mirror.notify(error.notification());
    }
}
