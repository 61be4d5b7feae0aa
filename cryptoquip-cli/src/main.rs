mod commands;
mod play;
mod quote;
mod render;
mod store;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use cryptoquip_game::{
    KeyValueStore, MemoryStore, PuzzleConfig, PuzzleEngine, PuzzleSession, Quote,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{BufRead, Write, stdin, stdout};
use std::path::PathBuf;

use play::run_lines;
use quote::fetch_quote;
use store::FileStore;

#[derive(Debug, Parser)]
#[command(name = "cryptoquip", version)]
#[command(about = "Daily substitution-cipher puzzle in the terminal")]
struct Args {
    /// Puzzle store file (the day's puzzle is kept here)
    #[arg(long, default_value = ".cryptoquip.json")]
    store: PathBuf,

    /// Keep the puzzle in memory only
    #[arg(long)]
    no_cache: bool,

    /// Discard today's stored puzzle and start a new one
    #[arg(long)]
    fresh: bool,

    /// Optional JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use this quotation instead of fetching one (replaces today's puzzle)
    #[arg(long)]
    quote: Option<String>,

    /// Author for --quote
    #[arg(long, requires = "quote")]
    author: Option<String>,

    /// Seed for cipher and hint randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Play as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Semicolon-separated commands to run instead of reading stdin
    #[arg(long)]
    script: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(args.config.as_ref())?;
    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());

    announce_banner(today);

    let mut session = if args.no_cache {
        let engine = PuzzleEngine::new(config, MemoryStore::new());
        start_session(&args, &engine, today, &mut rng).await?
    } else {
        let engine = PuzzleEngine::new(config, FileStore::new(&args.store));
        start_session(&args, &engine, today, &mut rng).await?
    };

    let mut out = stdout().lock();
    if let Some(script) = &args.script {
        let lines = script.split(';').map(str::to_string);
        run_lines(&mut session, lines, &mut rng, &mut out, false)?;
    } else {
        writeln!(out, "Type 'help' for commands.")?;
        let lines = stdin().lock().lines().map_while(Result::ok);
        run_lines(&mut session, lines, &mut rng, &mut out, true)?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<PuzzleConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            PuzzleConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PuzzleConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn announce_banner(today: NaiveDate) {
    println!("{}", "🔐 Cryptoquip".bright_cyan().bold());
    println!("{}", format!("Puzzle for {today}").cyan());
}

async fn start_session<S: KeyValueStore>(
    args: &Args,
    engine: &PuzzleEngine<S>,
    today: NaiveDate,
    rng: &mut ChaCha20Rng,
) -> Result<PuzzleSession> {
    if args.fresh {
        engine.discard().context("discarding stored puzzle")?;
    }

    if args.quote.is_none() {
        match engine.load_today(today) {
            Ok(Some(session)) => {
                println!("Resuming today's puzzle.");
                return Ok(session);
            }
            Ok(None) => {}
            Err(err) => log::warn!("could not read stored puzzle: {err}"),
        }
    }

    let quote = match &args.quote {
        Some(content) => Quote::new(content.clone(), args.author.clone().unwrap_or_default()),
        None => fetch_quote(engine.config())
            .await
            .context("fetching today's quotation")?,
    };
    engine
        .generate(&quote, today, rng)
        .context("creating today's puzzle")
}
