//! Wire models shared by the service, the HTTP layer and the clients.
//!
//! # Core Concepts
//!
//! - [`Hint`]: per-letter feedback, serialised as `g` (correct), `y`
//!   (present elsewhere) or `b` (absent).
//! - [`GuessRecord`]: a submitted word and its five hints, serialised as
//!   `["WORD", ["g", "b", ...]]`. Immutable once recorded.
//! - [`GameState`]: the snapshot every endpoint returns for a session.

mod hint;
mod state;

pub use hint::*;
pub use state::*;
