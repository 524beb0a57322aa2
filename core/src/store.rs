//! Key-value persistence for the CEO profile and the game record.
//!
//! RULE: Only this module talks to storage. Everything else goes through
//! the `ProfileStore` trait and its typed helpers.

use crate::{error::GameResult, profile::CeoProfile, state::GameRecord};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

pub const PROFILE_KEY: &str = "empireCEO_profile";
pub const GAME_DATA_KEY: &str = "empireCEO_gameData";

pub trait ProfileStore {
    fn get(&self, key: &str) -> GameResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> GameResult<()>;
    /// Drop every key.
    fn clear(&mut self) -> GameResult<()>;

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> GameResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> GameResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    fn load_profile(&self) -> GameResult<Option<CeoProfile>>
    where
        Self: Sized,
    {
        self.get_json(PROFILE_KEY)
    }

    fn save_profile(&mut self, profile: &CeoProfile) -> GameResult<()>
    where
        Self: Sized,
    {
        self.set_json(PROFILE_KEY, profile)
    }

    fn load_record(&self) -> GameResult<Option<GameRecord>>
    where
        Self: Sized,
    {
        self.get_json(GAME_DATA_KEY)
    }

    fn save_record(&mut self, record: &GameRecord) -> GameResult<()>
    where
        Self: Sized,
    {
        self.set_json(GAME_DATA_KEY, record)
    }
}

impl<S: ProfileStore + ?Sized> ProfileStore for &mut S {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        (**self).set(key, value)
    }

    fn clear(&mut self) -> GameResult<()> {
        (**self).clear()
    }
}

// ── SQLite ─────────────────────────────────────────────────────

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Safe to call repeatedly.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_kv_store.sql"))?;
        Ok(())
    }

    pub fn len(&self) -> GameResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn is_empty(&self) -> GameResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl ProfileStore for SqliteStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> GameResult<()> {
        self.conn.execute("DELETE FROM kv_store", [])?;
        Ok(())
    }
}

// ── In-memory ──────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> GameResult<()> {
        self.entries.clear();
        Ok(())
    }
}
