//! Terminal front end: menu loop, input validation and rendering. Everything
//! that reaches the game core from here is already a single uppercase letter
//! of the recognized alphabet.

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

use hangman::{art, words, DisplaySnapshot, RoundController, RoundEvent, RoundIo, MAX_ERRORS};

const INITIAL_PROMPT: &str = "Привет, хочешь начать новую игру?\n(1) Да\n(2) Выйти из приложения\n";
const MENU_RETRY: &str = "Пожалуйста, введите 1 или 2";
const LETTER_PROMPT: &str = "Введите букву: ";
const LETTER_RETRY: &str = "Пожалуйста, введите одну русскую букву!";
const REPEAT_NOTICE: &str = "Вы уже пробовали эту букву!";

enum MenuChoice {
    NewRound,
    Exit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut rng = SmallRng::from_entropy();

    loop {
        println!("{INITIAL_PROMPT}");
        match menu_choice(&mut input)? {
            MenuChoice::NewRound => play_round(&mut input, &mut rng)?,
            MenuChoice::Exit => break,
        }
    }
    Ok(())
}

fn play_round(input: &mut impl BufRead, rng: &mut SmallRng) -> Result<()> {
    let secret = words::random_word(rng);
    let mut round = RoundController::from_secret(secret)
        .context("word pool produced an unusable secret")?;
    let mut terminal = TerminalIo { input };

    let outcome = round.run(&mut terminal).context("round aborted")?;
    debug!(?outcome, "round finished");
    Ok(())
}

/// Reads menu input until the player picks `1` or `2`. A closed stdin counts
/// as choosing to exit.
fn menu_choice(input: &mut impl BufRead) -> Result<MenuChoice> {
    loop {
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(MenuChoice::Exit),
        };
        match line.trim() {
            "1" => return Ok(MenuChoice::NewRound),
            "2" => return Ok(MenuChoice::Exit),
            _ => println!("{MENU_RETRY}"),
        }
    }
}

struct TerminalIo<'a, R: BufRead> {
    input: &'a mut R,
}

impl<R: BufRead> RoundIo for TerminalIo<'_, R> {
    fn request_letter(&mut self, snapshot: &DisplaySnapshot) -> char {
        print_state(snapshot);
        prompt_letter(self.input)
    }

    fn notify(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::RepeatGuess { .. } => println!("{REPEAT_NOTICE}"),
            RoundEvent::RoundWon { secret } => {
                println!("Поздравляем! Вы угадали слово: {secret}");
            }
            RoundEvent::RoundLost { secret } => {
                println!("{}", art::stage(MAX_ERRORS));
                println!("Игра окончена! Загаданное слово: {secret}");
            }
            RoundEvent::LetterRevealed { .. } | RoundEvent::WrongLetter { .. } => {}
        }
    }
}

fn print_state(snapshot: &DisplaySnapshot) {
    debug!(
        state = %serde_json::to_string(snapshot).unwrap_or_default(),
        "prompting"
    );
    println!("{}", art::stage(snapshot.error_count));
    println!("Слово: {}", snapshot.masked_word());

    if !snapshot.wrong_letters.is_empty() {
        let listed = snapshot
            .wrong_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("Ошибки ({}): {}", snapshot.wrong_letters.len(), listed);
    }
}

/// Re-prompts until the input is exactly one recognized-alphabet letter.
/// Lowercase input is accepted and uppercased here.
fn prompt_letter(input: &mut impl BufRead) -> char {
    loop {
        print!("{LETTER_PROMPT}");
        let _ = io::stdout().flush();

        let line = match read_line(input) {
            Ok(Some(line)) => line,
            // Nothing sensible to do mid-round without stdin.
            Ok(None) | Err(_) => {
                println!();
                process::exit(0);
            }
        };

        let upper = line.trim().to_uppercase();
        let mut letters = upper.chars();
        if let (Some(letter), None) = (letters.next(), letters.next()) {
            if hangman::in_alphabet(letter) {
                return letter;
            }
        }
        println!("{LETTER_RETRY}");
    }
}

/// `None` on end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
