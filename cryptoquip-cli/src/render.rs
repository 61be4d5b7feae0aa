//! Terminal rendering of the puzzle board.
use colored::Colorize;
use cryptoquip_game::{DisplayToken, Letter, Outcome, PuzzleSession};
use std::io::{self, Write};

fn cipher_cell(token: DisplayToken, selected: Option<Letter>) -> String {
    let text = token.cipher.to_string();
    let is_selected = Letter::new(token.cipher)
        .ok()
        .is_some_and(|letter| Some(letter) == selected);
    if is_selected {
        text.black().on_bright_yellow().to_string()
    } else if token.is_letter() {
        text.bright_cyan().to_string()
    } else {
        text
    }
}

fn guess_cell(token: DisplayToken) -> String {
    let text = token.shown().to_string();
    match token.replacement {
        Some(_) => text.bright_white().bold().to_string(),
        None if token.is_letter() => text.dimmed().to_string(),
        None => text,
    }
}

/// Write the quip (ciphertext row over guess row), author, alphabet and
/// remaining hints.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_board(out: &mut impl Write, session: &PuzzleSession) -> io::Result<()> {
    let words = session.display();
    let selected = session.selected();
    let cipher_row: Vec<String> = words
        .iter()
        .map(|word| word.iter().map(|&t| cipher_cell(t, selected)).collect())
        .collect();
    let guess_row: Vec<String> = words
        .iter()
        .map(|word| word.iter().map(|&t| guess_cell(t)).collect())
        .collect();

    writeln!(out)?;
    writeln!(out, "  {}", cipher_row.join("   "))?;
    writeln!(out, "  {}", guess_row.join("   "))?;
    writeln!(out, "      - {}", session.author().italic())?;
    writeln!(out)?;

    let in_use = session.letters_in_use();
    let alphabet: Vec<String> = Letter::all()
        .map(|letter| {
            let text = letter.to_string();
            if in_use.contains(&letter) || Some(letter) == selected {
                text.dimmed().strikethrough().to_string()
            } else {
                text.green().to_string()
            }
        })
        .collect();
    writeln!(out, "  {}", alphabet.join(" "))?;

    let hints = format!(
        "Hints left: {}/{}",
        session.hints_remaining(),
        session.hint_budget()
    );
    writeln!(out, "  {}", hints.yellow())?;
    match session.outcome() {
        Outcome::Playing => {}
        Outcome::Solved => writeln!(out, "  {}", "🎉 Solved! Well done.".bright_green().bold())?,
        Outcome::Revealed => writeln!(out, "  {}", "Revealed. Better luck tomorrow.".magenta())?,
    }
    Ok(())
}
