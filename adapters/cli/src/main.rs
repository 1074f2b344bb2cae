#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line front end for the Gridfall games.
//!
//! Loads a level file, optionally replays the command characters of a
//! recording, then plays on from standard input, printing the board and the
//! status line after every resolved turn. On exit the run is folded into a
//! JSON high-score table, and the trace recording can be written to a file.

mod scores;

use std::fs;
use std::io::{self, BufRead as _, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use gridfall_rockfall::Rockfall;
use gridfall_starmaze::Starmaze;
use gridfall_world::{Game, Level};

use crate::scores::ScoreTable;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "gridfall", about = "Play or replay a Gridfall level")]
struct Args {
    /// Level text file; the level takes its name from the file stem.
    level: PathBuf,

    /// Game whose rules drive the level.
    #[arg(long, short, value_enum, default_value = "rockfall")]
    game: GameChoice,

    /// File whose lines are replayed, first character per line, before
    /// stdin is read. A trace recording works unchanged.
    #[arg(long, short)]
    playback: Option<PathBuf>,

    /// Replay at most this many lines of the playback file.
    #[arg(long, short)]
    steps: Option<usize>,

    /// Write the trace recording of the whole run to this file on exit.
    #[arg(long, short)]
    record: Option<PathBuf>,

    /// High-score table location.
    #[arg(long, default_value = "scores.json")]
    scores: PathBuf,
}

/// The games this binary can drive.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameChoice {
    /// The full boulders-and-monsters game.
    Rockfall,
    /// The four-code maze mini-game.
    Starmaze,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.game {
        GameChoice::Rockfall => run::<Rockfall>(&args),
        GameChoice::Starmaze => run::<Starmaze>(&args),
    }
}

/// Loads the level, drives it from the playback file and stdin, then
/// settles the recording and the score table.
fn run<G: Game>(args: &Args) -> Result<()> {
    let name = level_name(&args.level)?;
    let text = fs::read_to_string(&args.level)
        .with_context(|| format!("reading level file {}", args.level.display()))?;

    let mut level = Level::<G>::new();
    level
        .load(&name, &text)
        .with_context(|| format!("loading level {name}"))?;
    level.record();
    log::info!("loaded {name}: {} ({}x{})", level.title(), level.width(), level.height());

    let stdout = io::stdout();
    show(&level, &mut stdout.lock())?;

    if let Some(path) = &args.playback {
        let recorded = fs::read_to_string(path)
            .with_context(|| format!("reading playback file {}", path.display()))?;
        let mut budget = args.steps.unwrap_or(usize::MAX);
        for line in recorded.lines() {
            if budget == 0 {
                break;
            }
            budget -= 1;
            let command = match line.chars().next() {
                Some(command) => command,
                None => anyhow::bail!("playback file {} has an empty line", path.display()),
            };
            log::debug!("playback command {command:?}");
            level.resolve(command);
            show(&level, &mut stdout.lock())?;
        }
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading a command from stdin")?;
        let command = match line.chars().next() {
            Some(command) => command,
            None => continue,
        };
        level.resolve(command);
        show(&level, &mut stdout.lock())?;
    }

    if let Some(path) = &args.record {
        let mut recording = level.take_recording().join("\n");
        recording.push('\n');
        fs::write(path, recording)
            .with_context(|| format!("writing recording {}", path.display()))?;
    }

    let mut table = ScoreTable::load(&args.scores)?;
    table.report(&name, level.score(), level.succeeded());
    if let Some(best) = table.entry(&name) {
        log::info!("best for {name}: score {}, done {}", best.score, best.done);
    }
    table.store(&args.scores)
}

/// The level name: the file stem of the level path.
fn level_name(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("level path {} has no usable file name", path.display()))?;
    Ok(stem.to_owned())
}

/// Prints the visible board and the status line.
fn show<G: Game>(level: &Level<G>, out: &mut impl Write) -> Result<()> {
    for y in 0..level.height() {
        let mut row = String::with_capacity(level.width() as usize);
        for x in 0..level.width() {
            row.push(level.visible(x, y).unwrap_or(' '));
        }
        writeln!(out, "{row}")?;
    }
    writeln!(out, "{}", level.status())?;
    writeln!(out)?;
    Ok(())
}
