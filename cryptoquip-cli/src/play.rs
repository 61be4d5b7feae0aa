//! Command loop driving a puzzle session.
use colored::Colorize;
use cryptoquip_game::{Proposal, PuzzleSession, SessionError};
use rand::Rng;
use std::io::{self, Write};

use crate::commands::{Command, HELP, ParseError, parse};
use crate::render::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn notice(out: &mut impl Write, err: &SessionError) -> io::Result<()> {
    writeln!(out, "{}", format!("⚠ {err}").yellow())
}

fn report_proposal(
    out: &mut impl Write,
    result: Result<Proposal, SessionError>,
) -> io::Result<()> {
    match result {
        Ok(Proposal {
            toggled_off: true, ..
        }) => writeln!(out, "Guess removed."),
        Ok(Proposal { solved: true, .. }) => writeln!(out, "{}", "Last letter in place!".green()),
        Ok(_) => Ok(()),
        Err(err) => notice(out, &err),
    }
}

/// Apply one command and redraw the board when it changed.
///
/// # Errors
///
/// Propagates write failures; player mistakes are reported as notices.
pub fn execute<R: Rng>(
    session: &mut PuzzleSession,
    command: Command,
    rng: &mut R,
    out: &mut impl Write,
) -> io::Result<Flow> {
    log::debug!("command {command:?}");
    match command {
        Command::Select(cipher) => match session.select(cipher) {
            Ok(Some(letter)) => writeln!(out, "Selected {letter}.")?,
            Ok(None) => writeln!(out, "Selection cleared.")?,
            Err(err) => notice(out, &err)?,
        },
        Command::Pick(plain) => report_proposal(out, session.propose(plain))?,
        Command::Pair { cipher, plain } => {
            report_proposal(out, session.propose_pair(cipher, plain))?;
        }
        Command::Hint => match session.hint(rng) {
            Ok(pair) => writeln!(out, "Hint: {} is {}.", pair.cipher, pair.plain)?,
            Err(err) => notice(out, &err)?,
        },
        Command::Solve => session.reveal(),
        Command::Reset => {
            session.reset();
            writeln!(out, "Board cleared.")?;
        }
        Command::Show => {}
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    render_board(out, session)?;
    Ok(Flow::Continue)
}

/// Draw the board, then run `lines` as commands until they end or `quit`.
///
/// # Errors
///
/// Propagates write failures.
pub fn run_lines<R: Rng>(
    session: &mut PuzzleSession,
    lines: impl IntoIterator<Item = String>,
    rng: &mut R,
    out: &mut impl Write,
    prompt: bool,
) -> io::Result<()> {
    render_board(out, session)?;
    let mut lines = lines.into_iter();
    loop {
        if prompt {
            write!(out, "{} ", ">".bright_cyan())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(err) => {
                writeln!(out, "{}", err.to_string().red())?;
                continue;
            }
        };
        if execute(session, command, rng, out)? == Flow::Quit {
            break;
        }
    }
    out.flush()
}
