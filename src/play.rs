//! Line-oriented terminal front end for [`SyncHandle`].
//!
//! Each line typed is a guess, except `/new` (start another game) and `/quit`.
//! The board is redrawn whenever the sync task publishes a new snapshot.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::{Mirror, Phase, SyncClosed, SyncHandle};
use crate::models::Hint;
use crate::words::WORD_LENGTH;

const CORRECT: char = '🟩';
const PRESENT: char = '🟨';
const ABSENT: char = '⬛';
const EMPTY: char = '⬜';

/// Why the terminal loop stopped early.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Closed(#[from] SyncClosed),
}

fn hint_symbol(hint: Hint) -> char {
    match hint {
        Hint::Correct => CORRECT,
        Hint::Present => PRESENT,
        Hint::Absent => ABSENT,
    }
}

/// Render the mirror as text.
///
/// Example output:
/// ```text
/// L E V E L  🟨⬛⬛🟩🟨
/// . . . . .  ⬜⬜⬜⬜⬜
/// 5 chances left
/// > Guess submitted. Awaiting next guess.
/// ```
pub fn render_board(mirror: &Mirror) -> String {
    let mut output = String::new();

    match mirror.phase {
        Phase::NoSession => output.push_str("No game. Type /new to start.\n"),
        Phase::AwaitingCreate => output.push_str("Connecting...\n"),
        Phase::Active(_) => {
            for guess in &mirror.guesses {
                let letters: Vec<String> =
                    guess.word().as_str().chars().map(String::from).collect();
                output.push_str(&letters.join(" "));
                output.push_str("  ");
                output.extend(guess.hints().iter().copied().map(hint_symbol));
                output.push('\n');
            }
            for _ in 0..mirror.chances_left {
                output.push_str(&vec!["."; WORD_LENGTH].join(" "));
                output.push_str("  ");
                output.extend(std::iter::repeat_n(EMPTY, WORD_LENGTH));
                output.push('\n');
            }
            if !mirror.is_finished() {
                output.push_str(&format!("{} chances left\n", mirror.chances_left));
            }
        }
    }

    if let Some(note) = &mirror.notification {
        output.push_str("> ");
        output.push_str(note);
        output.push('\n');
    }
    output
}

/// Drive the sync task from line input until `/quit` or end of input.
pub async fn run<R>(handle: SyncHandle, input: R) -> Result<(), PlayError>
where
    R: AsyncBufRead + Unpin,
{
    let mut snapshots = handle.subscribe();
    let mut lines = input.lines();
    println!("{}", render_board(&snapshots.borrow_and_update()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => {}
                    "/quit" => break,
                    "/new" => handle.start().await?,
                    guess => handle.guess(guess).await?,
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render_board(&snapshots.borrow_and_update()));
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
