//! Game core: the round state and the state machine that drives it.

pub mod rules;
pub mod state;

pub use rules::{
    GuessResolution,
    RoundController,
    RoundError,
    RoundEvent,
    RoundIo,
    RoundOutcome,
    RoundPhase,
};
pub use state::{
    in_alphabet,
    DisplaySnapshot,
    GuessOutcome,
    IntegrityError,
    RoundState,
    SecretWordError,
    MAX_ERRORS,
    PLACEHOLDER,
};
