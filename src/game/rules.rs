use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{
    in_alphabet, DisplaySnapshot, GuessOutcome, IntegrityError, RoundState, SecretWordError,
};

/// Phase of the round state machine. `Won` and `Lost` are terminal: once
/// entered, the controller accepts no further guesses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    #[default]
    AwaitingGuess,
    Won,
    Lost,
}

/// Everything the caller needs to narrate one accepted guess.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// A correct guess; `positions` are the newly revealed slots.
    LetterRevealed { letter: char, positions: Vec<usize> },
    /// A wrong guess; `error_count` is the total after recording it.
    WrongLetter { letter: char, error_count: u8 },
    /// The letter was tried before; the round state did not change.
    RepeatGuess { letter: char },
    RoundWon { secret: String },
    RoundLost { secret: String },
}

/// Terminal report handed to the menu loop when the round ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RoundOutcome {
    Won { secret: String },
    Lost { secret: String },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum RoundError {
    #[error("round already ended; no further guesses are accepted")]
    RoundFinished,
    #[error("'{letter}' is outside the recognized alphabet")]
    LetterOutOfAlphabet { letter: char },
    #[error("round state invariant violated: {error}")]
    IntegrityViolation { error: IntegrityError },
}

/// State snapshot plus the events one guess produced, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessResolution {
    pub snapshot: DisplaySnapshot,
    pub events: Vec<RoundEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RoundOutcome>,
}

/// Seam between the round state machine and the terminal front end. The
/// implementor renders snapshots, collects a validated letter per prompt and
/// narrates events; the controller owns every state transition.
pub trait RoundIo {
    /// Ask for the next candidate letter. The returned char must already be
    /// validated as a single recognized-alphabet letter.
    fn request_letter(&mut self, snapshot: &DisplaySnapshot) -> char;

    fn notify(&mut self, event: &RoundEvent);
}

/// Drives one round to completion over a [`RoundState`].
#[derive(Debug, Clone)]
pub struct RoundController {
    state: RoundState,
    phase: RoundPhase,
}

impl RoundController {
    pub fn new(state: RoundState) -> Self {
        Self {
            state,
            phase: RoundPhase::AwaitingGuess,
        }
    }

    pub fn from_secret(secret: &str) -> Result<Self, SecretWordError> {
        RoundState::new(secret).map(Self::new)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase != RoundPhase::AwaitingGuess
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.state.snapshot()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::AwaitingGuess => None,
            RoundPhase::Won => Some(RoundOutcome::Won {
                secret: self.state.secret_word(),
            }),
            RoundPhase::Lost => Some(RoundOutcome::Lost {
                secret: self.state.secret_word(),
            }),
        }
    }

    fn ensure_integrity(state: &RoundState) -> Result<(), RoundError> {
        state
            .integrity_check()
            .map_err(|error| RoundError::IntegrityViolation { error })
    }

    /// Applies one candidate letter. A repeat guess leaves the state machine
    /// in `AwaitingGuess` without touching the state; otherwise the guess is
    /// applied and the loss check runs before the win check, so the two
    /// terminal transitions stay mutually exclusive.
    pub fn guess(&mut self, letter: char) -> Result<GuessResolution, RoundError> {
        if self.is_finished() {
            return Err(RoundError::RoundFinished);
        }
        if !in_alphabet(letter) {
            return Err(RoundError::LetterOutOfAlphabet { letter });
        }
        Self::ensure_integrity(&self.state)?;

        let mut events = Vec::new();

        if self.state.is_already_guessed(letter) {
            events.push(RoundEvent::RepeatGuess { letter });
            return Ok(self.resolution(events));
        }

        match self.state.apply_guess(letter) {
            // Unreachable after the check above; kept as a defensive no-op.
            GuessOutcome::AlreadyGuessed => {
                events.push(RoundEvent::RepeatGuess { letter });
            }
            GuessOutcome::Incorrect => {
                events.push(RoundEvent::WrongLetter {
                    letter,
                    error_count: self.state.error_count(),
                });
                if self.state.is_lost() {
                    self.phase = RoundPhase::Lost;
                    events.push(RoundEvent::RoundLost {
                        secret: self.state.secret_word(),
                    });
                }
            }
            GuessOutcome::Correct => {
                events.push(RoundEvent::LetterRevealed {
                    letter,
                    positions: self.state.revealed_positions(letter),
                });
                if self.state.is_won() {
                    self.phase = RoundPhase::Won;
                    events.push(RoundEvent::RoundWon {
                        secret: self.state.secret_word(),
                    });
                }
            }
        }

        Ok(self.resolution(events))
    }

    /// Runs the round to completion: request a letter, apply it, narrate the
    /// events, repeat until a terminal phase is reached.
    pub fn run(&mut self, io: &mut impl RoundIo) -> Result<RoundOutcome, RoundError> {
        loop {
            let letter = io.request_letter(&self.snapshot());
            let resolution = self.guess(letter)?;
            for event in &resolution.events {
                io.notify(event);
            }
            if let Some(outcome) = resolution.outcome {
                return Ok(outcome);
            }
        }
    }

    fn resolution(&self, events: Vec<RoundEvent>) -> GuessResolution {
        GuessResolution {
            snapshot: self.state.snapshot(),
            events,
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::MAX_ERRORS;

    fn controller(secret: &str) -> RoundController {
        RoundController::from_secret(secret).expect("valid secret")
    }

    #[test]
    fn winning_round_walks_through_awaiting_guess() {
        let mut round = controller("КОТ");
        assert_eq!(round.phase(), RoundPhase::AwaitingGuess);

        let first = round.guess('К').expect("guess accepted");
        assert_eq!(first.snapshot.masked_word(), "К__");
        assert_eq!(
            first.events,
            vec![RoundEvent::LetterRevealed {
                letter: 'К',
                positions: vec![0],
            }]
        );
        assert!(first.outcome.is_none());

        round.guess('О').expect("guess accepted");
        let last = round.guess('Т').expect("guess accepted");

        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(
            last.outcome,
            Some(RoundOutcome::Won {
                secret: "КОТ".to_string(),
            })
        );
        assert!(last
            .events
            .iter()
            .any(|event| matches!(event, RoundEvent::RoundWon { .. })));
    }

    #[test]
    fn loss_fires_exactly_on_the_final_miss() {
        let mut round = controller("ДОМ");
        for letter in ['Б', 'В', 'Г', 'Е', 'Ж'] {
            let resolution = round.guess(letter).expect("guess accepted");
            assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
            assert!(resolution.outcome.is_none());
        }

        let last = round.guess('З').expect("guess accepted");
        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(last.snapshot.error_count, MAX_ERRORS);
        assert_eq!(
            last.events,
            vec![
                RoundEvent::WrongLetter {
                    letter: 'З',
                    error_count: MAX_ERRORS,
                },
                RoundEvent::RoundLost {
                    secret: "ДОМ".to_string(),
                },
            ]
        );
    }

    #[test]
    fn repeat_guess_does_not_consume_state() {
        let mut round = controller("ДОМ");
        round.guess('Д').expect("guess accepted");
        let before = round.snapshot();

        let repeat = round.guess('Д').expect("repeat accepted as no-op");
        assert_eq!(
            repeat.events,
            vec![RoundEvent::RepeatGuess { letter: 'Д' }]
        );
        assert_eq!(repeat.snapshot, before);
        assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
    }

    #[test]
    fn finished_round_rejects_further_guesses() {
        let mut round = controller("А");
        round.guess('А').expect("guess accepted");
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.guess('Б'), Err(RoundError::RoundFinished));
    }

    #[test]
    fn letters_outside_the_alphabet_are_rejected() {
        let mut round = controller("ДОМ");
        assert_eq!(
            round.guess('Q'),
            Err(RoundError::LetterOutOfAlphabet { letter: 'Q' })
        );
        assert_eq!(round.snapshot().error_count, 0);
    }

    struct ScriptedIo {
        letters: Vec<char>,
        seen: Vec<RoundEvent>,
    }

    impl ScriptedIo {
        fn new(letters: &[char]) -> Self {
            let mut letters: Vec<char> = letters.to_vec();
            letters.reverse();
            Self {
                letters,
                seen: Vec::new(),
            }
        }
    }

    impl RoundIo for ScriptedIo {
        fn request_letter(&mut self, _snapshot: &DisplaySnapshot) -> char {
            self.letters.pop().expect("script ran out of letters")
        }

        fn notify(&mut self, event: &RoundEvent) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn run_drives_a_scripted_round_to_victory() {
        let mut round = controller("КОТ");
        let mut io = ScriptedIo::new(&['К', 'К', 'О', 'Т']);

        let outcome = round.run(&mut io).expect("round runs to completion");
        assert_eq!(
            outcome,
            RoundOutcome::Won {
                secret: "КОТ".to_string(),
            }
        );
        assert!(io
            .seen
            .iter()
            .any(|event| matches!(event, RoundEvent::RepeatGuess { letter: 'К' })));
        assert!(matches!(io.seen.last(), Some(RoundEvent::RoundWon { .. })));
    }

    #[test]
    fn run_reports_a_loss_with_the_secret() {
        let mut round = controller("ДОМ");
        let mut io = ScriptedIo::new(&['Б', 'В', 'Г', 'Е', 'Ж', 'З']);

        let outcome = round.run(&mut io).expect("round runs to completion");
        assert_eq!(
            outcome,
            RoundOutcome::Lost {
                secret: "ДОМ".to_string(),
            }
        );
    }
}
