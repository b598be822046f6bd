use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of wrong guesses that ends the round. Also the index of the final
/// gallows drawing, one past the range shown while the round is still live.
pub const MAX_ERRORS: u8 = 6;

/// Masking symbol for an unrevealed letter position.
pub const PLACEHOLDER: char = '_';

const ALPHABET_FIRST: char = 'А';
const ALPHABET_LAST: char = 'Я';

/// True for the 32 uppercase Cyrillic letters the game recognizes.
/// Ё sits outside the contiguous А..=Я block and is not accepted.
pub fn in_alphabet(letter: char) -> bool {
    (ALPHABET_FIRST..=ALPHABET_LAST).contains(&letter)
}

/// Result of applying one guess to the round state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter was tried before; nothing changed.
    AlreadyGuessed,
    /// The letter occurs in the secret; every occurrence is now revealed.
    Correct,
    /// The letter does not occur; it was recorded and the error count grew.
    Incorrect,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SecretWordError {
    #[error("secret word is empty")]
    Empty,
    #[error("secret word contains '{letter}', outside the recognized alphabet")]
    LetterOutOfAlphabet { letter: char },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IntegrityError {
    #[error("revealed pattern length {actual} does not match secret length {expected}")]
    RevealedLengthMismatch { expected: usize, actual: usize },
    #[error("revealed slot {index} holds a letter that is not the secret's")]
    RevealedMismatch { index: usize },
    #[error("wrong-letter set contains '{letter}', which occurs in the secret")]
    WrongLetterInSecret { letter: char },
    #[error("error count {actual} does not match {expected} wrong letters")]
    ErrorCountMismatch { expected: usize, actual: u8 },
    #[error("error count {value} exceeds the loss threshold")]
    ErrorCountOverflow { value: u8 },
}

/// Read-only view of the round handed to the renderer after every transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplaySnapshot {
    /// Positional pattern: the guessed letter in place, placeholder elsewhere.
    pub revealed: Vec<char>,
    /// Distinct wrong letters in stable (alphabetical) order.
    pub wrong_letters: Vec<char>,
    pub error_count: u8,
}

impl DisplaySnapshot {
    pub fn masked_word(&self) -> String {
        self.revealed.iter().collect()
    }
}

/// Authoritative state of one round. Constructed once per round, mutated only
/// through [`RoundState::apply_guess`], discarded when the round ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    secret: Vec<char>,
    revealed: Vec<char>,
    wrong_letters: BTreeSet<char>,
    error_count: u8,
}

impl RoundState {
    /// Builds a fresh round around `secret`: all positions unrevealed, no
    /// wrong letters, zero errors. The secret must be a non-empty word made
    /// of recognized-alphabet letters.
    pub fn new(secret: &str) -> Result<Self, SecretWordError> {
        let secret: Vec<char> = secret.chars().collect();
        if secret.is_empty() {
            return Err(SecretWordError::Empty);
        }
        if let Some(&letter) = secret.iter().find(|letter| !in_alphabet(**letter)) {
            return Err(SecretWordError::LetterOutOfAlphabet { letter });
        }
        let revealed = vec![PLACEHOLDER; secret.len()];
        Ok(Self {
            secret,
            revealed,
            wrong_letters: BTreeSet::new(),
            error_count: 0,
        })
    }

    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn error_count(&self) -> u8 {
        self.error_count
    }

    /// True if `letter` was tried before, whichever bucket it landed in:
    /// revealed in the pattern or recorded as a wrong letter.
    pub fn is_already_guessed(&self, letter: char) -> bool {
        self.revealed.contains(&letter) || self.wrong_letters.contains(&letter)
    }

    /// The sole mutating operation besides construction. Reveals every
    /// occurrence of `letter`, or records it as wrong and bumps the error
    /// count. A repeated letter is a caller contract violation; it no-ops.
    pub fn apply_guess(&mut self, letter: char) -> GuessOutcome {
        if self.is_already_guessed(letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        let mut found = false;
        for (slot, &hidden) in self.revealed.iter_mut().zip(self.secret.iter()) {
            if hidden == letter {
                *slot = letter;
                found = true;
            }
        }

        if found {
            GuessOutcome::Correct
        } else {
            self.wrong_letters.insert(letter);
            self.error_count += 1;
            GuessOutcome::Incorrect
        }
    }

    pub fn is_won(&self) -> bool {
        !self.revealed.contains(&PLACEHOLDER)
    }

    pub fn is_lost(&self) -> bool {
        self.error_count == MAX_ERRORS
    }

    /// Indices of `letter` in the revealed pattern.
    pub fn revealed_positions(&self, letter: char) -> Vec<usize> {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, &shown)| shown == letter)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            revealed: self.revealed.clone(),
            wrong_letters: self.wrong_letters.iter().copied().collect(),
            error_count: self.error_count,
        }
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        if self.revealed.len() != self.secret.len() {
            return Err(IntegrityError::RevealedLengthMismatch {
                expected: self.secret.len(),
                actual: self.revealed.len(),
            });
        }
        for (index, (&shown, &hidden)) in self.revealed.iter().zip(self.secret.iter()).enumerate() {
            if shown != PLACEHOLDER && shown != hidden {
                return Err(IntegrityError::RevealedMismatch { index });
            }
        }
        for &letter in &self.wrong_letters {
            if self.secret.contains(&letter) {
                return Err(IntegrityError::WrongLetterInSecret { letter });
            }
        }
        if self.error_count as usize != self.wrong_letters.len() {
            return Err(IntegrityError::ErrorCountMismatch {
                expected: self.wrong_letters.len(),
                actual: self.error_count,
            });
        }
        if self.error_count > MAX_ERRORS {
            return Err(IntegrityError::ErrorCountOverflow {
                value: self.error_count,
            });
        }
        Ok(())
    }
}
