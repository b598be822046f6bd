//! Terminal hangman: a round state machine over a fixed Russian word list.
//!
//! The game core lives in [`game`]: [`RoundState`] holds the secret word, the
//! revealed pattern and the wrong-guess bookkeeping; [`RoundController`]
//! drives one round through `AwaitingGuess` to `Won` or `Lost`, talking to
//! the terminal front end through the [`RoundIo`] seam. [`words`] and [`art`]
//! are the static collaborators the front end renders with.

pub mod art;
pub mod game;
pub mod words;

pub use game::{
    in_alphabet, DisplaySnapshot, GuessOutcome, GuessResolution, IntegrityError, RoundController,
    RoundError, RoundEvent, RoundIo, RoundOutcome, RoundPhase, RoundState, SecretWordError,
    MAX_ERRORS, PLACEHOLDER,
};
