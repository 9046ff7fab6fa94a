//! Headless season runner
//!
//! Generates a world, takes charge of one club and plays whole seasons
//! through the same intents an interactive front end would dispatch.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use club_core::season::{Game, GameState, Intent, SeasonPhase};
use club_core::{ClubId, WorldConfig};

/// Upper bound on days in one season, guards against a stuck calendar
const MAX_DAYS_PER_SEASON: usize = 2_000;

#[derive(Parser)]
#[command(name = "club_cli")]
#[command(about = "Play football club management seasons headless", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play whole seasons and print each final table
    Simulate {
        /// World config file (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the config's master seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        seasons: u16,

        /// Club id the manager takes charge of
        #[arg(long, default_value_t = 0)]
        club: u32,

        /// Write the final state as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Generate a world and write it as JSON
    Generate {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> Result<WorldConfig> {
    let mut config = WorldConfig::default();
    if let Some(path) = path {
        let context = || format!("loading {}", path.display());
        config = WorldConfig::load(path).with_context(context)?;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn play_season(game: &mut Game) -> Result<()> {
    for _ in 0..MAX_DAYS_PER_SEASON {
        if game.state().phase == SeasonPhase::SeasonComplete {
            return Ok(());
        }
        game.dispatch(Intent::AdvanceDay)?;
        // Nobody reads the transient slots here
        game.dispatch(Intent::ClearMatchResults)?;
        game.dispatch(Intent::ClearMatchDayFixtures)?;
    }
    let season = game.state().season;
    bail!("season {} ran past {} days", season, MAX_DAYS_PER_SEASON)
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn club_name(state: &GameState, club: ClubId) -> &str {
    state.club(club).map_or("?", |c| c.name.as_str())
}

fn print_season(state: &GameState) {
    println!("\n=== Season {} ===", state.season);
    for (division, table) in state.standings.iter().enumerate() {
        println!("\nDivision {}", division + 1);
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
            "#", "Club", "P", "W", "D", "L", "GD", "Pts"
        );
        for (index, entry) in table.iter().enumerate() {
            let managed = state.is_user_club(entry.club);
            let marker = if managed { "*" } else { " " };
            println!(
                "{:>3}{} {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
                index + 1,
                marker,
                club_name(state, entry.club),
                entry.played,
                entry.won,
                entry.drawn,
                entry.lost,
                entry.goal_difference(),
                entry.points
            );
        }
    }

    let Some(review) = &state.season_review else {
        return;
    };
    if let Some(champion) = review.champion {
        println!("\nChampions: {}", club_name(state, champion));
    }
    for outcome in &review.divisions {
        let division = outcome.division + 1;
        for club in &outcome.promoted {
            let name = club_name(state, *club);
            println!("Promoted from division {}: {}", division, name);
        }
        for club in &outcome.relegated {
            let name = club_name(state, *club);
            println!("Relegated from division {}: {}", division, name);
        }
    }
    let awards = [
        ("Player of the season", &review.awards.best_player),
        ("Top scorer", &review.awards.top_scorer),
        ("Young player of the season", &review.awards.best_young_player),
    ];
    for (title, award) in awards {
        if let Some(award) = award {
            let name = state.player(award.player).map_or("?", |p| p.name.as_str());
            println!("{}: {} ({})", title, name, award.value);
        }
    }
    if let Some(user) = state.user_club.and_then(|id| state.club(id)) {
        println!("\n{} balance: {}", user.name, user.balance);
    }
}

fn simulate(config: WorldConfig, seasons: u16, club: u32, save: Option<PathBuf>) -> Result<()> {
    let mut game = Game::new(&config)?;
    game.dispatch(Intent::SelectClub { club: ClubId(club) })?;

    for season in 0..seasons {
        if season > 0 {
            game.dispatch(Intent::StartNewSeason)?;
        }
        play_season(&mut game)?;
        print_season(game.state());
    }

    if let Some(path) = save {
        let json = serde_json::to_string(game.state())?;
        write_json(&path, &json)?;
        log::info!("state saved to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Simulate {
            config,
            seed,
            seasons,
            club,
            save,
        } => {
            let config = load_config(config.as_ref(), seed)?;
            simulate(config, seasons, club, save)?;
        }
        Commands::Generate { config, seed, out } => {
            let config = load_config(config.as_ref(), seed)?;
            let state = club_core::world::generate(&config)?;
            let json = serde_json::to_string_pretty(&state)?;
            match out {
                Some(path) => {
                    write_json(&path, &json)?;
                    let players = state.players.len();
                    log::info!("world of {} players saved to {}", players, path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
