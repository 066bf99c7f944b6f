//! Stats CLI Library
//!
//! Dataset file (JSON) <-> in-memory store, CSV result import, text rendering.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use stats_core::models::GameResultDraft;
use stats_core::{DataStore, InMemoryStore, Standing, StatsConfig};

/// Load a dataset file into the in-memory store.
pub fn load_dataset(path: &Path) -> Result<InMemoryStore> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let store: InMemoryStore = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;
    log::debug!(
        "loaded {} clubs, {} seasons, {} results from {}",
        store.clubs.len(),
        store.seasons.len(),
        store.game_results.len(),
        path.display()
    );
    Ok(store)
}

/// Write the dataset through a temp file and rename, so a failed write never
/// leaves a truncated dataset behind.
pub fn save_dataset(path: &Path, store: &InMemoryStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store).context("Failed to serialize dataset")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace dataset: {}", path.display()))?;
    log::info!("dataset saved to {}", path.display());
    Ok(())
}

/// Explicit `--config` file first, then `STATS_CONFIG_PATH`, then defaults.
pub fn load_config(path: Option<&Path>) -> Result<StatsConfig> {
    let config = match path {
        Some(path) => StatsConfig::from_file(path)?,
        None => StatsConfig::from_env()?,
    };
    Ok(config)
}

/// One row of a results CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub home_club_id: u32,
    pub away_club_id: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub league_id: u32,
    pub season_id: u32,
    pub game_date: NaiveDate,
}

impl From<ResultRow> for GameResultDraft {
    fn from(row: ResultRow) -> Self {
        GameResultDraft {
            home_club_id: row.home_club_id,
            away_club_id: row.away_club_id,
            home_score: row.home_score,
            away_score: row.away_score,
            league_id: row.league_id,
            season_id: row.season_id,
            game_date: row.game_date,
        }
    }
}

pub fn read_result_rows(csv_path: &Path) -> Result<Vec<ResultRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<ResultRow>().enumerate() {
        // Line 1 is the header.
        let row = record.with_context(|| format!("Invalid result row at line {}", i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Import results without lineups. Every row is checked against the dataset
/// before anything is inserted; the import is all-or-nothing.
pub fn import_results(store: &mut InMemoryStore, csv_path: &Path) -> Result<usize> {
    let rows = read_result_rows(csv_path)?;

    for (i, row) in rows.iter().enumerate() {
        let line = i + 2;
        if store.find_league(row.league_id).is_none() {
            bail!("Line {}: league {} not found", line, row.league_id);
        }
        if store.find_season(row.season_id).is_none() {
            bail!("Line {}: season {} not found", line, row.season_id);
        }
        for club_id in [row.home_club_id, row.away_club_id] {
            if store.find_club(club_id).is_none() {
                bail!("Line {}: club {} not found", line, club_id);
            }
        }
        if row.home_club_id == row.away_club_id {
            bail!("Line {}: Home club and away club must be different.", line);
        }
    }

    let count = rows.len();
    store.transaction(|s| {
        for row in rows {
            s.insert_game_result(row.into())?;
        }
        Ok(())
    })?;
    log::info!("imported {} results from {}", count, csv_path.display());
    Ok(count)
}

/// Plain-text standings table.
pub fn render_standing(standing: &Standing) -> String {
    let mut out = format!("{} {}\n", standing.league_name(), standing.season_name());
    if standing.is_empty() {
        out.push_str("  (no games played)\n");
        return out;
    }
    out.push_str(&format!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}\n",
        "Pos", "Club", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    ));
    for row in standing.rows() {
        let a = &row.aggregate;
        out.push_str(&format!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}\n",
            row.position,
            row.club_name,
            a.games_played,
            a.wins,
            a.draws,
            a.losses,
            a.goals_for,
            a.goals_against,
            a.goal_difference,
            a.points
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stats_core::models::{Club, League, Season};
    use stats_core::StatsService;
    use tempfile::{NamedTempFile, TempDir};

    fn dataset() -> InMemoryStore {
        let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        InMemoryStore::new()
            .with_league(League { id: 1, country_id: 1, name: "Premier".into() })
            .with_club(Club { id: 10, league_id: 1, name: "Club A".into() })
            .with_club(Club { id: 20, league_id: 1, name: "Club B".into() })
            .with_season(Season {
                id: 202324,
                name: "2023-24".into(),
                start_date: start,
                end_date: end,
                current: true,
            })
    }

    fn csv_file(body: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "home_club_id,away_club_id,home_score,away_score,league_id,season_id,game_date")?;
        file.write_all(body.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_dataset_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("dataset.json");
        let store = dataset();

        save_dataset(&path, &store)?;
        let loaded = load_dataset(&path)?;
        assert_eq!(loaded, store);
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_import_then_rank() -> Result<()> {
        let csv = csv_file("10,20,2,1,1,202324,2023-08-12\n20,10,2,2,1,202324,2023-08-19\n")?;
        let mut store = dataset();

        assert_eq!(import_results(&mut store, csv.path())?, 2);
        let svc = StatsService::new(store);
        let standing = svc.compute_standings(1, 202324)?;
        assert_eq!(standing.position_of(10), Some(1));
        assert_eq!(standing.row_for(10).map(|r| r.aggregate.points), Some(4));

        let table = render_standing(&standing);
        assert!(table.contains("Club A"));
        assert!(table.contains("+1"));
        Ok(())
    }

    #[test]
    fn test_import_unknown_club_inserts_nothing() -> Result<()> {
        let csv = csv_file("10,20,1,0,1,202324,2023-08-12\n10,99,1,0,1,202324,2023-08-19\n")?;
        let mut store = dataset();

        let err = import_results(&mut store, csv.path()).unwrap_err();
        assert!(err.to_string().contains("club 99 not found"));
        assert!(store.game_results.is_empty());
        Ok(())
    }

    #[test]
    fn test_import_same_club_rejected() -> Result<()> {
        let csv = csv_file("10,10,1,0,1,202324,2023-08-12\n")?;
        let mut store = dataset();

        let err = import_results(&mut store, csv.path()).unwrap_err();
        assert_eq!(err.to_string(), "Line 2: Home club and away club must be different.");
        assert!(store.game_results.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_row_reports_line() -> Result<()> {
        let csv = csv_file("10,20,1,0,1,202324,2023-08-12\n10,20,x,0,1,202324,2023-08-19\n")?;
        let err = read_result_rows(csv.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        Ok(())
    }

    #[test]
    fn test_empty_standing_renders_placeholder() {
        let svc = StatsService::new(dataset());
        let standing = svc.compute_standings(1, 202324).unwrap();
        assert!(render_standing(&standing).contains("no games played"));
    }
}
