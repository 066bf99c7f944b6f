//! Stats CLI
//!
//! Standings and registration against a JSON dataset file.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use stats_core::models::SeasonDraft;
#[cfg(feature = "cli")]
use stats_core::{InMemoryStore, MatchSubmission, StatsService};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "stats_cli")]
#[command(about = "Football competition standings and result registration", long_about = None)]
struct Cli {
    /// JSON file overriding the rule constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the standings of one competition season
    Standings {
        /// Dataset JSON file
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        league: u32,

        #[arg(long)]
        season: u32,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Validate a match submission and register it
    RegisterMatch {
        /// Dataset JSON file
        #[arg(long)]
        data: PathBuf,

        /// Submission JSON file (result plus both lineups)
        #[arg(long)]
        submission: PathBuf,

        /// Persist the dataset after a successful registration
        #[arg(long, default_value = "false")]
        write: bool,
    },

    /// Validate a new season and make it current
    RegisterSeason {
        /// Dataset JSON file
        #[arg(long)]
        data: PathBuf,

        /// Season name (yyyy-yy)
        #[arg(long)]
        name: String,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Persist the dataset after a successful registration
        #[arg(long, default_value = "false")]
        write: bool,
    },

    /// Import results (no lineups) from CSV
    ImportResults {
        /// Dataset JSON file
        #[arg(long)]
        data: PathBuf,

        /// CSV with home_club_id,away_club_id,home_score,away_score,league_id,season_id,game_date
        #[arg(long)]
        csv: PathBuf,

        /// Persist the dataset after a successful import
        #[arg(long, default_value = "false")]
        write: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = stats_cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Standings { data, league, season, json } => {
            let store = stats_cli::load_dataset(&data)?;
            let service = StatsService::with_config(store, config);
            let standing = service.compute_standings(league, season)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&standing)?);
            } else {
                print!("{}", stats_cli::render_standing(&standing));
            }
        }

        Commands::RegisterMatch { data, submission, write } => {
            let store = stats_cli::load_dataset(&data)?;
            let raw = std::fs::read_to_string(&submission)
                .with_context(|| format!("Failed to read submission: {}", submission.display()))?;
            let submission: MatchSubmission =
                serde_json::from_str(&raw).context("Failed to parse submission")?;

            let mut service = StatsService::with_config(store, config);
            let committed = service.validate_and_register_match(submission)?;

            println!("✅ Match registered");
            println!("   Game:    {}", committed.result.id);
            println!(
                "   Score:   {} {}-{} {}",
                committed.result.home_club_id,
                committed.result.home_score,
                committed.result.away_score,
                committed.result.away_club_id
            );
            println!(
                "   Entries: {} home, {} away",
                committed.home_entries.len(),
                committed.away_entries.len()
            );

            finish(&data, service.into_store(), write)?;
        }

        Commands::RegisterSeason { data, name, start, end, write } => {
            let store = stats_cli::load_dataset(&data)?;
            let mut service = StatsService::with_config(store, config);
            let season = service.validate_and_register_season(SeasonDraft {
                name,
                start_date: start,
                end_date: end,
            })?;

            println!("✅ Season registered");
            println!("   Id:     {}", season.id);
            println!("   Name:   {}", season.name);
            println!("   Period: {} .. {}", season.start_date, season.end_date);

            finish(&data, service.into_store(), write)?;
        }

        Commands::ImportResults { data, csv, write } => {
            let mut store = stats_cli::load_dataset(&data)?;
            let count = stats_cli::import_results(&mut store, &csv)?;

            println!("✅ Imported {} results from {}", count, csv.display());

            finish(&data, store, write)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn finish(data: &Path, store: InMemoryStore, write: bool) -> Result<()> {
    if write {
        stats_cli::save_dataset(data, &store)?;
        println!("\n📄 Dataset saved to: {}", data.display());
    } else {
        println!("\n(dry run: pass --write to persist {})", data.display());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("stats_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
