use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_ai::{AiAgent, Difficulty};
use chess_core::Color;
use chess_game::{Game, GameConfig, GameMode, GameSettings, GameStatus};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess engine with a difficulty-tiered AI")]
struct Cli {
    /// Configuration file (defaults to chess.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two AI players play each other
    Selfplay {
        /// White difficulty
        #[arg(long, default_value = "medium")]
        white: Difficulty,
        /// Black difficulty
        #[arg(long, default_value = "medium")]
        black: Difficulty,
        /// Stop after this many plies
        #[arg(long, default_value = "200")]
        max_plies: u32,
        /// Seed for Easy players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play against the AI, one "from to" move per line
    Play {
        /// AI difficulty (overrides the config file)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Side the AI plays (overrides the config file)
        #[arg(long)]
        ai_color: Option<Color>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::load(),
    }
    .context("loading configuration")?;

    match cli.command {
        Commands::Selfplay {
            white,
            black,
            max_plies,
            seed,
        } => selfplay(&config, white, black, max_plies, seed),
        Commands::Play {
            difficulty,
            ai_color,
        } => play(&config, difficulty, ai_color),
    }
}

fn selfplay(
    config: &GameConfig,
    white: Difficulty,
    black: Difficulty,
    max_plies: u32,
    seed: Option<u64>,
) -> Result<()> {
    let seed = seed.or(config.ai.seed);
    let make_agent = |difficulty, color: Color| {
        let mut agent = AiAgent::new(difficulty, color);
        if let Some(seed) = seed {
            agent = agent.with_seed(seed.wrapping_add(color.index() as u64));
        }
        if let Some(limit) = config.ai.node_limit {
            agent = agent.with_node_limit(limit);
        }
        agent
    };
    let mut agents = [make_agent(white, Color::White), make_agent(black, Color::Black)];

    let mut game = Game::new();
    game.start(GameSettings::human_vs_human(
        format!("AI ({})", white),
        format!("AI ({})", black),
    ))?;
    info!(%white, %black, max_plies, "self-play started");

    for _ in 0..max_plies {
        if game.status().is_terminal() {
            info!(status = %game.status(), "self-play finished");
            break;
        }
        let turn = game.turn();
        let mut scratch = match game.position() {
            Some(position) => position.clone(),
            None => bail!("game has no position"),
        };
        let Some(mv) = agents[turn.index()].get_best_move(&mut scratch) else {
            break;
        };
        let report = game.submit_move(mv.from(), mv.to())?;
        println!("{} {}: {}", turn, mv, report.message);
    }

    println!("{}", game.snapshot()?.to_json()?);
    Ok(())
}

fn play(config: &GameConfig, difficulty: Option<Difficulty>, ai_color: Option<Color>) -> Result<()> {
    let mut settings = config.settings(GameMode::HumanVsAi);
    if let Some(difficulty) = difficulty {
        settings.difficulty = Some(difficulty);
    }
    if let Some(color) = ai_color {
        settings.ai_color = color;
    }

    let mut game = Game::with_config(config);
    game.start(settings)?;
    println!(
        "New game started for {} (White) vs. {} (Black).",
        game.players().white,
        game.players().black
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while game.status() == GameStatus::Active {
        if game.is_ai_turn() {
            match game.request_ai_move() {
                Ok(report) => println!("{}", report.message),
                Err(err) => println!("{}", err),
            }
            continue;
        }

        if let Some(position) = game.position() {
            print_board(&position.symbols());
        }
        print!("{} to move> ", game.turn());
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        let Some((from, to)) = split_move(line) else {
            println!("Enter a move as \"from to\", e.g. \"e2 e4\", or \"quit\".");
            continue;
        };
        match game.submit_move_algebraic(from, to) {
            Ok(report) => println!("{}", report.message),
            Err(err) => println!("{}", err),
        }
    }

    if game.status().is_terminal() {
        println!("Final status: {}", game.status());
    }
    game.end();
    Ok(())
}

/// Accepts `"e2 e4"` or `"e2e4"`.
fn split_move(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) => Some((from, to)),
        (Some(joined), None, None) if joined.len() == 4 && joined.is_ascii() => {
            Some(joined.split_at(2))
        }
        _ => None,
    }
}

fn print_board(grid: &[[Option<char>; 8]; 8]) {
    for (rank, row) in grid.iter().enumerate().rev() {
        let squares: String = row
            .iter()
            .map(|symbol| symbol.unwrap_or('.'))
            .flat_map(|c| [c, ' '])
            .collect();
        println!("{} {}", rank + 1, squares.trim_end());
    }
    println!("  a b c d e f g h");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_selfplay_flags() {
        let cli = Cli::parse_from([
            "chess",
            "-v",
            "selfplay",
            "--white",
            "easy",
            "--black",
            "hard",
            "--max-plies",
            "12",
            "--seed",
            "4",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Selfplay {
                white,
                black,
                max_plies,
                seed,
            } => {
                assert_eq!(white, Difficulty::Easy);
                assert_eq!(black, Difficulty::Hard);
                assert_eq!(max_plies, 12);
                assert_eq!(seed, Some(4));
            }
            Commands::Play { .. } => panic!("expected selfplay"),
        }
    }

    #[test]
    fn parses_play_flags() {
        let cli = Cli::parse_from([
            "chess",
            "play",
            "--difficulty",
            "Hard",
            "--ai-color",
            "white",
            "--config",
            "other.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        match cli.command {
            Commands::Play {
                difficulty,
                ai_color,
            } => {
                assert_eq!(difficulty, Some(Difficulty::Hard));
                assert_eq!(ai_color, Some(Color::White));
            }
            Commands::Selfplay { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn split_move_forms() {
        assert_eq!(split_move("e2 e4"), Some(("e2", "e4")));
        assert_eq!(split_move("e2e4"), Some(("e2", "e4")));
        assert_eq!(split_move("e2"), None);
        assert_eq!(split_move("e2 e4 e5"), None);
    }
}
