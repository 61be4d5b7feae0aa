//! Line-oriented player commands.
use cryptoquip_game::Letter;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z])\s*(?:=|->|\s)\s*([A-Za-z])$").expect("pair pattern is valid")
});
static PICK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pick\s+([A-Za-z])$").expect("pick pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle selection of a ciphertext letter.
    Select(Letter),
    /// Propose a plaintext letter for the selected ciphertext letter.
    Pick(Letter),
    /// Propose `plain` for `cipher` directly.
    Pair { cipher: Letter, plain: Letter },
    Hint,
    /// Give up and reveal the answer.
    Solve,
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unrecognized command: {0} (type 'help')")]
    Unknown(String),
}

fn letter_at(captures: &regex::Captures<'_>, group: usize) -> Option<Letter> {
    captures
        .get(group)
        .and_then(|m| m.as_str().chars().next())
        .and_then(|c| Letter::new(c).ok())
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`ParseError`] for blank or unrecognized input.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let input = line.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let lowered = input.to_ascii_lowercase();
    let command = match lowered.as_str() {
        "hint" => Some(Command::Hint),
        "solve" | "give up" | "giveup" => Some(Command::Solve),
        "reset" | "clear" => Some(Command::Reset),
        "show" => Some(Command::Show),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    };
    if let Some(command) = command {
        return Ok(command);
    }
    if let Some(captures) = PICK.captures(&lowered)
        && let Some(plain) = letter_at(&captures, 1)
    {
        return Ok(Command::Pick(plain));
    }
    if let Some(captures) = PAIR.captures(&lowered)
        && let (Some(cipher), Some(plain)) = (letter_at(&captures, 1), letter_at(&captures, 2))
    {
        return Ok(Command::Pair { cipher, plain });
    }
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Ok(cipher) = Letter::new(c)
    {
        return Ok(Command::Select(cipher));
    }
    Err(ParseError::Unknown(input.to_string()))
}

pub const HELP: &str = "\
Commands:
  <x>            select (or deselect) puzzle letter x
  pick <y>       guess y for the selected letter
  <x> <y>, x=y   guess y for puzzle letter x (repeat to undo)
  hint           reveal one letter (limited)
  solve          give up and show the answer
  reset          clear all guesses and hints
  show           redraw the board
  quit           leave";
