// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use colored::Colorize;

use deathroll::game3d::{
    AppSettings, ColorSetting, DeathrollGamePlugin, DeathrollScenePlugin, DeathrollSession,
    GameDatabase, MatchHistory, MatchRecord, MatchTally, SceneConfig,
};
use deathroll_core::{RngSource, RollEngine};

/// Deathroll - 3D dice duel
#[derive(Parser, Debug)]
#[command(name = "deathroll")]
#[command(author, version, about = "Deathroll - roll 1 and you lose", long_about = None)]
struct Cli {
    /// Drop a physics die onto the floor instead of spinning a cube
    #[arg(long)]
    physics: bool,

    /// Ceiling of the first roll (default: saved setting, 500)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    ceiling: Option<u32>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Background color (any CSS color, e.g. "#101018" or "navy")
    #[arg(long, value_parser = parse_color_arg)]
    background: Option<ColorSetting>,

    /// Number of starfield particles
    #[arg(long)]
    particles: Option<usize>,

    /// Print recent matches and exit
    #[arg(long)]
    history: bool,

    /// Do not read or write the local database
    #[arg(long)]
    no_persist: bool,

    /// Store the effective settings as the new defaults
    #[arg(long)]
    save_settings: bool,
}

fn parse_color_arg(s: &str) -> Result<ColorSetting, String> {
    ColorSetting::parse(s)
}

fn main() {
    let cli = Cli::parse();

    let db = if cli.no_persist {
        None
    } else {
        match GameDatabase::open() {
            Ok(db) => Some(db),
            Err(e) => {
                eprintln!("Warning: match history disabled: {}", e);
                None
            }
        }
    };

    if cli.history {
        let Some(db) = db.as_ref() else {
            eprintln!("Error: no match database available");
            std::process::exit(1);
        };
        if let Err(e) = print_history(db) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut settings = db.as_ref().map(AppSettings::load_from_db).unwrap_or_default();
    apply_cli_overrides(&cli, &mut settings);

    if cli.save_settings {
        match db.as_ref() {
            Some(db) => {
                if let Err(e) = settings.save_to_db(db) {
                    eprintln!("Warning: failed to save settings: {}", e);
                }
            }
            None => eprintln!("Warning: --save-settings ignored, no database available"),
        }
    }

    let engine = match RollEngine::with_starting_ceiling(settings.starting_ceiling) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let rng = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let scene_config = SceneConfig::from_settings(&settings);
    let physics = scene_config.physics_enabled;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Deathroll".to_string(),
            resolution: (1280u32, 720u32).into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(scene_config.background_color.to_color()))
    .insert_resource(scene_config)
    .insert_resource(DeathrollSession::new(engine, rng))
    .insert_resource(MatchHistory::new(db))
    .add_plugins(DeathrollGamePlugin)
    .add_plugins(DeathrollScenePlugin);

    if physics {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    }

    app.run();
}

fn apply_cli_overrides(cli: &Cli, settings: &mut AppSettings) {
    if cli.physics {
        settings.physics_enabled = true;
    }
    if let Some(ceiling) = cli.ceiling {
        settings.starting_ceiling = ceiling;
    }
    if let Some(background) = cli.background {
        settings.background_color = background;
    }
    if let Some(particles) = cli.particles {
        settings.particle_count = particles;
    }
}

/// Matches listed by `--history`; the tally still covers all of them.
const HISTORY_LISTING: usize = 20;

fn print_history(db: &GameDatabase) -> Result<(), String> {
    let tally = MatchTally::from_records(&db.all_matches()?);
    let recent = db.recent_matches(HISTORY_LISTING)?;

    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", "DEATHROLL HISTORY".bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());

    if recent.is_empty() {
        println!("{}", "No matches played yet.".dimmed());
    }
    for record in &recent {
        print_match(record);
    }

    println!("{}", "───────────────────────────────────────".cyan());
    println!(
        "{} {}   {} {}   {} {}",
        "Matches:".bold().white(),
        tally.games.to_string().bold(),
        "Player 1 lost:".bold().white(),
        tally.player_one_losses.to_string().red(),
        "Player 2 lost:".bold().white(),
        tally.player_two_losses.to_string().blue()
    );
    println!("{}", "═══════════════════════════════════════".cyan());
    Ok(())
}

fn print_match(record: &MatchRecord) {
    let loser = match record.loser {
        1 => "Player 1".red().bold(),
        _ => "Player 2".blue().bold(),
    };
    let rolls: Vec<String> = record.rolls.iter().map(|r| r.to_string()).collect();
    println!(
        "#{:<4} {} lost in {} turns from {}: {}",
        record.sid,
        loser,
        record.turns,
        record.starting_ceiling,
        rolls.join(" → ").dimmed()
    );
}
