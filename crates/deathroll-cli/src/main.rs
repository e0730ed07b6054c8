//! Deathroll CLI
//!
//! Plays deathroll in the terminal, interactively or as a batch simulation.

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use deathroll_core::{
    DeathrollError, GameState, Player, RandomSource, RngSource, RollEngine, RollOutcome,
    ScriptedSource, DEFAULT_CEILING,
};

/// Deathroll - roll 1 and you lose
#[derive(Parser)]
#[command(name = "droll")]
#[command(author, version, about = "Deathroll - a two-player shrinking dice duel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Ceiling of the first roll
    #[arg(long, global = true, default_value_t = DEFAULT_CEILING,
          value_parser = clap::value_parser!(u32).range(1..))]
    ceiling: u32,

    /// Seed for a reproducible run
    #[arg(long, global = true, conflicts_with = "script")]
    seed: Option<u64>,

    /// Fixed draws to use instead of a random generator (e.g. "250,1")
    #[arg(long, global = true, value_delimiter = ',')]
    script: Option<Vec<u32>>,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively: Enter rolls, r restarts, q quits
    Play,

    /// Play whole games automatically and summarize who lost
    #[command(visible_alias = "sim")]
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Print one JSON line per finished game instead of every turn
        #[arg(long)]
        json: bool,
    },
}

/// One line of interactive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayCommand {
    Roll,
    Restart,
    Quit,
    Unknown,
}

fn parse_play_input(line: &str) -> PlayCommand {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "roll" => PlayCommand::Roll,
        "r" | "restart" => PlayCommand::Restart,
        "q" | "quit" | "exit" => PlayCommand::Quit,
        _ => PlayCommand::Unknown,
    }
}

/// Losses per player over a batch of games
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
struct SimulationSummary {
    games: usize,
    player_one_losses: usize,
    player_two_losses: usize,
    total_turns: usize,
}

impl SimulationSummary {
    fn record(&mut self, state: &GameState) {
        let Some(loser) = state.loser() else {
            return;
        };
        self.games += 1;
        self.total_turns += state.turns();
        match loser {
            Player::Player1 => self.player_one_losses += 1,
            Player::Player2 => self.player_two_losses += 1,
        }
    }

    fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn make_source(cli: &Cli) -> Box<dyn RandomSource> {
    if let Some(script) = &cli.script {
        log::debug!("using scripted draws: {:?}", script);
        return Box::new(ScriptedSource::new(script.iter().copied()));
    }
    match cli.seed {
        Some(seed) => {
            log::debug!("using seeded generator: {}", seed);
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::from_entropy()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = match RollEngine::with_starting_ceiling(cli.ceiling) {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };
    let mut source = make_source(&cli);

    let result = match cli.command.as_ref().unwrap_or(&Commands::Play) {
        Commands::Play => run_play(&engine, source.as_mut()),
        Commands::Simulate { games, json } => {
            run_simulate(&engine, source.as_mut(), *games, *json).map(|_| ())
        }
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn exit_with(error: &DeathrollError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    std::process::exit(1);
}

fn print_banner(title: &str) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", title.bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());
}

fn player_label(player: Player) -> colored::ColoredString {
    match player {
        Player::Player1 => player.label().red().bold(),
        Player::Player2 => player.label().blue().bold(),
    }
}

fn print_turn(outcome: &RollOutcome) {
    let roll = if outcome.game_over {
        outcome.roll.to_string().red().bold()
    } else {
        outcome.roll.to_string().green().bold()
    };
    println!(
        "{} rolls 1-{}: {}",
        player_label(outcome.player),
        outcome.rolled_from,
        roll
    );
    if let Some(loser) = outcome.loser() {
        println!("{} {}", player_label(loser), "loses!".red().bold());
    }
}

fn print_prompt(state: &GameState) {
    if state.is_over() {
        print!("{} ", "[r] restart  [q] quit >".dimmed());
    } else {
        print!(
            "{} {} {} ",
            player_label(state.active_player()),
            format!("to roll out of {}.", state.ceiling()).white(),
            "[Enter] roll  [r] restart  [q] quit >".dimmed()
        );
    }
    let _ = io::stdout().flush();
}

fn run_play(engine: &RollEngine, source: &mut dyn RandomSource) -> Result<(), DeathrollError> {
    let mut state = engine.new_game();
    print_banner("DEATHROLL");
    println!(
        "{}",
        format!(
            "Take turns rolling 1 to the last roll, starting at {}. Whoever rolls 1 loses.",
            engine.starting_ceiling()
        )
        .white()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_prompt(&state);
        let Some(Ok(line)) = lines.next() else {
            println!();
            break;
        };

        match parse_play_input(&line) {
            PlayCommand::Roll => match engine.roll(&mut state, source) {
                Ok(outcome) => print_turn(&outcome),
                Err(e) if e.is_invalid_state() => {
                    println!(
                        "{} {}",
                        "The game is over.".yellow(),
                        "Press r to restart.".dimmed()
                    );
                }
                Err(e) => return Err(e),
            },
            PlayCommand::Restart => {
                engine.reset(&mut state);
                println!("{}", "New game!".green().bold());
            }
            PlayCommand::Quit => break,
            PlayCommand::Unknown => {
                println!("{}", "Unknown command. Use Enter, r or q.".dimmed());
            }
        }
    }
    Ok(())
}

fn run_simulate(
    engine: &RollEngine,
    source: &mut dyn RandomSource,
    games: usize,
    json: bool,
) -> Result<SimulationSummary, DeathrollError> {
    let mut summary = SimulationSummary::default();
    let mut state = engine.new_game();

    if !json {
        print_banner("DEATHROLL SIMULATION");
    }

    for game in 1..=games {
        if game > 1 {
            engine.reset(&mut state);
        }
        if !json && games > 1 {
            println!("{}", format!("── Game {} ──", game).cyan());
        }

        while !state.is_over() {
            let outcome = engine.roll(&mut state, source)?;
            if !json {
                print_turn(&outcome);
            }
        }
        summary.record(&state);

        if json {
            match serde_json::to_string(&state) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("failed to serialize game {}: {}", game, e),
            }
        }
    }

    if json {
        if let Ok(line) = serde_json::to_string(&summary) {
            println!("{}", line);
        }
    } else {
        print_summary(&summary);
    }
    Ok(summary)
}

fn print_summary(summary: &SimulationSummary) {
    println!("{}", "───────────────────────────────────────".cyan());
    println!(
        "{} {}   {} {}   {} {}",
        "Games:".bold().white(),
        summary.games.to_string().bold(),
        "Player 1 lost:".bold().white(),
        summary.player_one_losses.to_string().red(),
        "Player 2 lost:".bold().white(),
        summary.player_two_losses.to_string().blue()
    );
    println!(
        "{} {:.1}",
        "Average turns:".bold().white(),
        summary.average_turns()
    );
    println!("{}", "═══════════════════════════════════════".cyan());
}
