//! Embedded SurrealDB database for settings & match history.
//!
//! This module provides persistent storage for:
//! - app settings
//! - finished matches (who lost, how long it took, every roll)

use bevy::prelude::*;
use deathroll_core::{GameState, Player};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use surrealdb::engine::local::{Db, Mem, SurrealKv};
use surrealdb::Surreal;

/// SurrealDB folder name (embedded database).
const DATABASE_FOLDER: &str = "matches.surrealdb";
/// App data folder name.
const APP_DATA_FOLDER: &str = "Deathroll";

const NS: &str = "deathroll";
const DB: &str = "deathroll";

/// A finished game as stored in the `finished_match` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Stable internal ID (never changes).
    pub sid: i64,
    /// 1 or 2.
    pub loser: u8,
    pub starting_ceiling: u32,
    pub turns: u32,
    /// Every roll in order; the last one is always 1.
    pub rolls: Vec<u32>,
    /// Seconds since the Unix epoch.
    pub finished_at: i64,
}

impl MatchRecord {
    /// Build a record from a finished game. Returns `None` while the game is
    /// still in progress.
    pub fn from_state(sid: i64, state: &GameState, finished_at: i64) -> Option<Self> {
        let loser = state.loser()?;
        Some(Self {
            sid,
            loser: loser.number(),
            starting_ceiling: state.starting_ceiling(),
            turns: state.turns() as u32,
            rolls: state.history().iter().map(|o| o.roll).collect(),
            finished_at,
        })
    }

    pub fn loser(&self) -> Option<Player> {
        Player::from_number(self.loser)
    }
}

/// Loss tally across all stored matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub games: usize,
    pub player_one_losses: usize,
    pub player_two_losses: usize,
}

impl MatchTally {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        records.iter().fold(Self::default(), |mut tally, record| {
            tally.games += 1;
            match record.loser() {
                Some(Player::Player1) => tally.player_one_losses += 1,
                Some(Player::Player2) => tally.player_two_losses += 1,
                None => {}
            }
            tally
        })
    }
}

/// Scene-side view of match history. `db` is `None` when persistence is
/// disabled or the store could not be opened.
#[derive(Resource, Default)]
pub struct MatchHistory {
    pub db: Option<GameDatabase>,
    pub tally: MatchTally,
}

impl MatchHistory {
    pub fn new(db: Option<GameDatabase>) -> Self {
        let tally = db
            .as_ref()
            .and_then(|db| db.all_matches().ok())
            .map(|records| MatchTally::from_records(&records))
            .unwrap_or_default();
        Self { db, tally }
    }

    /// Count a finished game and store it if a database is attached.
    pub fn record(&mut self, state: &GameState) -> Result<Option<MatchRecord>, String> {
        let Some(loser) = state.loser() else {
            return Ok(None);
        };

        self.tally.games += 1;
        match loser {
            Player::Player1 => self.tally.player_one_losses += 1,
            Player::Player2 => self.tally.player_two_losses += 1,
        }

        match &self.db {
            Some(db) => db.record_match(state).map(Some),
            None => Ok(None),
        }
    }
}

/// Resource for managing the match database.
#[derive(Resource)]
pub struct GameDatabase {
    rt: tokio::runtime::Runtime,
    db: Mutex<Surreal<Db>>,
}

impl GameDatabase {
    /// Per-user data folder for the app, created if needed.
    fn data_dir() -> Result<PathBuf, String> {
        let home = || std::env::var_os("HOME").map(PathBuf::from);
        let base = if cfg!(target_os = "windows") {
            std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
        } else if cfg!(target_os = "macos") {
            home().map(|h| h.join("Library").join("Application Support"))
        } else {
            std::env::var_os("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|| home().map(|h| h.join(".local").join("share")))
        };

        let dir = match base {
            Some(base) => base.join(APP_DATA_FOLDER),
            None => std::env::current_dir()
                .map_err(|e| format!("No data directory available: {}", e))?,
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create data directory {:?}: {}", dir, e))?;
        Ok(dir)
    }

    fn make_runtime() -> Result<tokio::runtime::Runtime, String> {
        tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create tokio runtime: {}", e))
    }

    async fn init(db: &Surreal<Db>) -> Result<(), String> {
        db.use_ns(NS)
            .use_db(DB)
            .await
            .map_err(|e| format!("Failed to select namespace/db: {}", e))?;

        let schema = r#"
            DEFINE TABLE setting SCHEMALESS;

            DEFINE TABLE finished_match SCHEMALESS;
            DEFINE INDEX finished_match_sid_unique ON finished_match FIELDS sid UNIQUE;
        "#;

        db.query(schema)
            .await
            .map_err(|e| format!("Failed to initialize schema: {}", e))?;

        Ok(())
    }

    /// Open or create the database in the per-user app data folder.
    pub fn open() -> Result<Self, String> {
        Self::open_at(Self::data_dir()?.join(DATABASE_FOLDER))
    }

    /// Open database at a specific path.
    pub fn open_at(path: PathBuf) -> Result<Self, String> {
        let rt = Self::make_runtime()?;
        std::fs::create_dir_all(&path)
            .map_err(|e| format!("Failed to create match store {:?}: {}", path, e))?;

        let db = rt
            .block_on(async { Surreal::new::<SurrealKv>(path.to_string_lossy().to_string()).await })
            .map_err(|e| format!("Failed to open match store: {}", e))?;
        rt.block_on(Self::init(&db))?;

        Ok(Self {
            rt,
            db: Mutex::new(db),
        })
    }

    /// In-memory database for testing.
    pub fn open_in_memory() -> Result<Self, String> {
        let rt = Self::make_runtime()?;
        let db = rt
            .block_on(async { Surreal::new::<Mem>(()).await })
            .map_err(|e| format!("Failed to open in-memory store: {}", e))?;
        rt.block_on(Self::init(&db))?;

        Ok(Self {
            rt,
            db: Mutex::new(db),
        })
    }

    fn with_db<T>(&self, f: impl FnOnce(&Surreal<Db>) -> Result<T, String>) -> Result<T, String> {
        let db = self.db.lock().map_err(|e| e.to_string())?;
        f(&db)
    }

    fn next_match_id(&self) -> Result<i64, String> {
        self.with_db(|db| {
            self.rt.block_on(async {
                let mut response = db
                    .query("SELECT VALUE sid FROM finished_match ORDER BY sid DESC LIMIT 1")
                    .await
                    .map_err(|e| format!("Failed to query next match id: {}", e))?;
                let rows: Vec<i64> = response
                    .take(0)
                    .map_err(|e| format!("Failed to decode next match id: {}", e))?;
                Ok(rows.first().map(|sid| sid + 1).unwrap_or(1))
            })
        })
    }

    /// Store a finished game and return its record.
    pub fn record_match(&self, state: &GameState) -> Result<MatchRecord, String> {
        let sid = self.next_match_id()?;
        let record = MatchRecord::from_state(sid, state, unix_now())
            .ok_or_else(|| "Cannot record a match that is still in progress".to_string())?;

        self.with_db(|db| {
            self.rt.block_on(async {
                let _: Option<MatchRecord> = db
                    .upsert(("finished_match", sid))
                    .content(record.clone())
                    .await
                    .map_err(|e| format!("Failed to save match: {}", e))?;
                Ok(())
            })
        })?;

        Ok(record)
    }

    fn query_matches(&self, limit: Option<usize>) -> Result<Vec<MatchRecord>, String> {
        const SELECT: &str = "SELECT sid, loser, starting_ceiling, turns, rolls, finished_at \
                              FROM finished_match ORDER BY sid DESC";
        self.with_db(|db| {
            self.rt.block_on(async {
                let query = match limit {
                    Some(limit) => db
                        .query(format!("{} LIMIT $limit", SELECT))
                        .bind(("limit", limit as i64)),
                    None => db.query(SELECT),
                };
                let mut response = query
                    .await
                    .map_err(|e| format!("Failed to query matches: {}", e))?;
                response
                    .take::<Vec<MatchRecord>>(0)
                    .map_err(|e| format!("Failed to decode match list: {}", e))
            })
        })
    }

    /// Most recent matches first.
    pub fn recent_matches(&self, limit: usize) -> Result<Vec<MatchRecord>, String> {
        self.query_matches(Some(limit))
    }

    pub fn all_matches(&self) -> Result<Vec<MatchRecord>, String> {
        self.query_matches(None)
    }

    /// Settings live in the `setting` table as a JSON string under `value`.
    pub fn get_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, String> {
        #[derive(Deserialize)]
        struct SettingDoc {
            value: String,
        }

        let doc = self.with_db(|db| {
            self.rt.block_on(async {
                db.select::<Option<SettingDoc>>(("setting", key.to_owned()))
                    .await
                    .map_err(|e| format!("Failed to load setting '{}': {}", key, e))
            })
        })?;

        doc.map(|doc| {
            serde_json::from_str(&doc.value)
                .map_err(|e| format!("Failed to decode setting '{}': {}", key, e))
        })
        .transpose()
    }

    pub fn set_setting<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        #[derive(Serialize)]
        struct SettingDoc {
            value: String,
        }

        let value = serde_json::to_string(value)
            .map_err(|e| format!("Failed to encode setting '{}': {}", key, e))?;
        self.with_db(|db| {
            self.rt.block_on(async {
                let _: Option<JsonValue> = db
                    .upsert(("setting", key.to_owned()))
                    .content(SettingDoc { value })
                    .await
                    .map_err(|e| format!("Failed to save setting '{}': {}", key, e))?;
                Ok(())
            })
        })
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game3d::types::settings::{AppSettings, ColorSetting};
    use deathroll_core::{RollEngine, ScriptedSource};

    fn finished_game(draws: &[u32]) -> GameState {
        let engine = RollEngine::new();
        let mut state = engine.new_game();
        let mut source = ScriptedSource::new(draws.iter().copied());
        engine.play_out(&mut state, &mut source).unwrap();
        state
    }

    #[test]
    fn test_match_record_from_state() {
        let state = finished_game(&[250, 40, 1]);
        let record = MatchRecord::from_state(7, &state, 1_700_000_000).unwrap();
        assert_eq!(record.sid, 7);
        assert_eq!(record.loser(), Some(Player::Player1));
        assert_eq!(record.turns, 3);
        assert_eq!(record.rolls, vec![250, 40, 1]);
        assert_eq!(record.starting_ceiling, 500);
    }

    #[test]
    fn test_match_record_requires_finished_game() {
        let state = RollEngine::new().new_game();
        assert!(MatchRecord::from_state(1, &state, 0).is_none());
    }

    #[test]
    fn test_tally_counts_losses() {
        let records = vec![
            MatchRecord::from_state(1, &finished_game(&[1]), 0).unwrap(),
            MatchRecord::from_state(2, &finished_game(&[9, 1]), 0).unwrap(),
            MatchRecord::from_state(3, &finished_game(&[9, 3, 1]), 0).unwrap(),
        ];
        let tally = MatchTally::from_records(&records);
        assert_eq!(tally.games, 3);
        assert_eq!(tally.player_one_losses, 2);
        assert_eq!(tally.player_two_losses, 1);
    }

    #[test]
    fn test_record_and_list_matches() {
        let db = GameDatabase::open_in_memory().unwrap();

        let first = db.record_match(&finished_game(&[1])).unwrap();
        let second = db.record_match(&finished_game(&[300, 1])).unwrap();
        assert_eq!(first.sid, 1);
        assert_eq!(second.sid, 2);
        assert_eq!(db.all_matches().unwrap().len(), 2);

        let recent = db.recent_matches(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], second);
        assert_eq!(recent[1], first);

        let limited = db.recent_matches(1).unwrap();
        assert_eq!(limited, vec![second]);
    }

    #[test]
    fn test_recent_listing_is_limited_but_tally_is_not() {
        let db = GameDatabase::open_in_memory().unwrap();
        for draws in [&[1][..], &[9, 1], &[9, 3, 1]] {
            db.record_match(&finished_game(draws)).unwrap();
        }

        let recent = db.recent_matches(2).unwrap();
        assert_eq!(recent.iter().map(|r| r.sid).collect::<Vec<_>>(), vec![3, 2]);

        let tally = MatchTally::from_records(&db.all_matches().unwrap());
        assert_eq!(tally.games, 3);
    }

    #[test]
    fn test_setting_with_wrong_shape_fails_to_decode() {
        let db = GameDatabase::open_in_memory().unwrap();
        db.set_setting("app_settings", &5u32).unwrap();
        let err = db.get_setting::<AppSettings>("app_settings").unwrap_err();
        assert!(err.contains("Failed to decode setting 'app_settings'"));
        assert_eq!(db.get_setting::<u32>("app_settings").unwrap(), Some(5));
    }

    #[test]
    fn test_record_rejects_unfinished_game() {
        let db = GameDatabase::open_in_memory().unwrap();
        let state = RollEngine::new().new_game();
        assert!(db.record_match(&state).is_err());
        assert!(db.all_matches().unwrap().is_empty());
    }

    #[test]
    fn test_match_history_tallies_and_stores() {
        let db = GameDatabase::open_in_memory().unwrap();
        db.record_match(&finished_game(&[1])).unwrap();

        let mut history = MatchHistory::new(Some(db));
        assert_eq!(history.tally.games, 1);
        assert_eq!(history.tally.player_one_losses, 1);

        let stored = history.record(&finished_game(&[60, 1])).unwrap().unwrap();
        assert_eq!(stored.sid, 2);
        assert_eq!(history.tally.games, 2);
        assert_eq!(history.tally.player_two_losses, 1);
        assert_eq!(history.db.as_ref().unwrap().all_matches().unwrap().len(), 2);
    }

    #[test]
    fn test_match_history_without_db_still_counts() {
        let mut history = MatchHistory::new(None);
        assert_eq!(history.record(&finished_game(&[1])).unwrap(), None);
        assert_eq!(history.tally.games, 1);

        let in_progress = RollEngine::new().new_game();
        assert_eq!(history.record(&in_progress).unwrap(), None);
        assert_eq!(history.tally.games, 1);
    }

    #[test]
    fn test_settings_round_trip() {
        let db = GameDatabase::open_in_memory().unwrap();
        assert_eq!(db.get_setting::<AppSettings>("app_settings").unwrap(), None);

        let settings = AppSettings {
            starting_ceiling: 100,
            physics_enabled: true,
            background_color: ColorSetting::rgb(0.1, 0.2, 0.3),
            ..Default::default()
        };

        settings.save_to_db(&db).unwrap();
        let loaded = AppSettings::load_from_db(&db);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_persist_to_disk_round_trip() {
        // Use a unique folder under the OS temp dir.
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!("deathroll-test-{}", ts));

        // First run: save.
        {
            let db = GameDatabase::open_at(path.clone()).unwrap();
            db.record_match(&finished_game(&[5, 1])).unwrap();
            AppSettings {
                particle_count: 42,
                ..Default::default()
            }
            .save_to_db(&db)
            .unwrap();
        }

        // Second run: reload.
        {
            let db = GameDatabase::open_at(path.clone()).unwrap();
            assert_eq!(db.all_matches().unwrap().len(), 1);
            assert_eq!(AppSettings::load_from_db(&db).particle_count, 42);
        }

        // Best-effort cleanup.
        let _ = std::fs::remove_dir_all(&path);
    }
}
