//! Static word pool and random selection. The menu loop owns the rng and
//! injects it here; the game core never sees where the secret came from.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uppercase Cyrillic words only; [`crate::game::RoundState::new`] rejects
/// anything else at round construction.
pub const WORDS: &[&str] = &[
    "ЯБЛОКО",
    "ТЕЛЕФОН",
    "КОМПЬЮТЕР",
    "СОБАКА",
    "СОЛНЦЕ",
    "БИБЛИОТЕКА",
    "АВТОМОБИЛЬ",
    "КОРОБКА",
    "МОЛОКО",
    "ПИАНИНО",
];

pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or(WORDS[0])
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::RoundState;

    #[test]
    fn every_word_builds_a_valid_round() {
        for word in WORDS {
            RoundState::new(word).expect("word pool entry must be a valid secret");
        }
    }

    #[test]
    fn random_word_comes_from_the_pool() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let word = random_word(&mut rng);
            assert!(WORDS.contains(&word));
        }
    }
}
