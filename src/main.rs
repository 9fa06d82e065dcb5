//! Card-match solitaire - text driver
//!
//! Plays a level from the command line, reading moves from a script or stdin.

use card_match_rs::{
    core::CardId,
    game::{GameEngine, VerbosityLevel},
    loader::{GameRulesConfig, LayoutConfig, LevelLoader},
    MatchError, Result,
};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "cardmatch")]
#[command(about = "Card-match solitaire with undo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a level with text commands
    Play {
        /// Level file (.json)
        #[arg(value_name = "LEVEL")]
        level: PathBuf,

        /// Game rules file (.json); defaults apply when omitted
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,

        /// Layout file (.json); defaults apply when omitted
        #[arg(long, value_name = "LAYOUT_FILE")]
        layout: Option<PathBuf>,

        /// Seed for ShuffleOnLoad
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Commands to run instead of reading stdin (comma separated, e.g. "p 1001, d, u")
        #[arg(long, value_name = "COMMANDS")]
        script: Option<String>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Validate a level file and print its summary
    Check {
        /// Level file (.json)
        #[arg(value_name = "LEVEL")]
        level: PathBuf,
    },
}

/// One text command
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Play(CardId),
    Draw,
    Undo,
    Show,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let command = match (parts.next(), parts.next()) {
            (Some("p" | "play"), Some(id)) => {
                let id = id
                    .parse::<u32>()
                    .map_err(|_| MatchError::ParseError(format!("bad card id '{id}'")))?;
                Command::Play(CardId::new(id))
            }
            (Some("d" | "draw"), None) => Command::Draw,
            (Some("u" | "undo"), None) => Command::Undo,
            (Some("s" | "show"), None) => Command::Show,
            (Some("q" | "quit"), None) => Command::Quit,
            _ => {
                return Err(MatchError::ParseError(format!(
                    "unknown command '{s}' (expected: p <id>, d, u, s, q)"
                )))
            }
        };
        if parts.next().is_some() {
            return Err(MatchError::ParseError(format!("trailing input in '{s}'")));
        }
        Ok(command)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            level,
            rules,
            layout,
            seed,
            script,
            verbosity,
        } => run_play(level, rules, layout, seed, script, verbosity.into()).await,
        Commands::Check { level } => {
            let level = LevelLoader::load_async(&level).await?;
            println!("{}", level.summary());
            Ok(())
        }
    }
}

async fn run_play(
    level_path: PathBuf,
    rules_path: Option<PathBuf>,
    layout_path: Option<PathBuf>,
    seed: u64,
    script: Option<String>,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let level = LevelLoader::load_async(&level_path).await?;
    let rules = load_or_default(rules_path.as_deref(), GameRulesConfig::load_from_file)?;
    let layout = load_or_default(layout_path.as_deref(), LayoutConfig::load_from_file)?;

    let mut engine = GameEngine::from_level(&level, &rules, &layout, seed)?.with_verbosity(verbosity);
    println!("{}", level.summary());
    print_state(&engine);

    match script {
        Some(script) => {
            for line in script.split(',') {
                if !run_line(&mut engine, line)? {
                    break;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                if !run_line(&mut engine, &line?)? {
                    break;
                }
            }
        }
    }

    if engine.is_won() {
        println!("Level cleared in {} moves", engine.state().move_count());
    } else if engine.is_stuck() {
        println!("No moves left");
    }
    Ok(())
}

fn load_or_default<T: Default>(
    path: Option<&Path>,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    path.map_or_else(|| Ok(T::default()), load)
}

/// Run one command line; returns false when the session should end
fn run_line(engine: &mut GameEngine, line: &str) -> Result<bool> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(true);
    }
    println!("> {line}");

    let outcome = match line.parse::<Command>() {
        Ok(Command::Quit) => return Ok(false),
        Ok(Command::Show) => {
            print_undo_summary(engine);
            Ok(())
        }
        Ok(Command::Play(id)) => engine.apply_playfield_move(id).map(|_| ()),
        Ok(Command::Draw) => engine.apply_stack_draw().map(|_| ()),
        Ok(Command::Undo) => engine.undo().map(|_| ()),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => {}
        Err(err @ MatchError::ParseError(_)) => println!("  ! {err}"),
        Err(err) if err.is_recoverable() => println!("  ! {err}"),
        Err(err) => return Err(err),
    }

    print_state(engine);
    Ok(!engine.is_won())
}

fn print_state(engine: &GameEngine) {
    let state = engine.state();
    let cards = |ids: &[CardId]| {
        ids.iter()
            .filter_map(|&id| state.card(id).ok())
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("  playfield: {}", cards(state.playfield().cards()));
    match state.active_current_card() {
        Some(card) => println!("  current:   {card}"),
        None => println!("  current:   -"),
    }
    println!(
        "  draw pile: {} cards | moves {} | score {} | undo {}/{}",
        state.draw_pile().len(),
        state.move_count(),
        state.score(),
        engine.undo_count(),
        engine.history().capacity()
    );
    println!("  playable:  {}", cards(&engine.matchable_cards()));
}

fn print_undo_summary(engine: &GameEngine) {
    if !engine.can_undo() {
        println!("  (nothing to undo)");
    }
    for line in engine.undo_summary() {
        println!("  {line}");
    }
}
