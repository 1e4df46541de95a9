// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store: named JSON collections kept in a local key-value medium.

use anyhow::Context;
use chrono::Utc;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{
    Collection, NewRecord, Patch, ProfilePatch, Record, Transaction, UserProfile,
};
use crate::seed;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const INITIALIZED_KEY: &str = "fintrack_initialized";
pub const PREFERENCES_KEY: &str = "fintrack_preferences";

pub fn db_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

/// Open the store at `path`, or at the platform data dir when `None`.
pub fn open_or_init(path: Option<&Path>) -> anyhow::Result<RecordStore<SqliteMedium>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let medium =
        SqliteMedium::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    Ok(RecordStore::new(medium))
}

/// A string-valued key-value medium. Writes replace the whole value.
pub trait Medium {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<M: Medium + ?Sized> Medium for &M {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

pub struct SqliteMedium {
    conn: Connection,
}

impl SqliteMedium {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl Medium for SqliteMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Display settings for the shell, persisted next to the collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub locale: String,
    pub currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            currency: "USD".to_string(),
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub struct RecordStore<M> {
    medium: M,
}

impl<M: Medium> RecordStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.medium.read(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.medium.write(key, &raw)?;
        debug!(key, bytes = raw.len(), "persisted");
        Ok(())
    }

    /// All records of `R`'s collection, empty if never written.
    pub fn get<R: Record>(&self) -> Result<Vec<R>> {
        Ok(self
            .read_json::<Vec<R>>(R::COLLECTION.key())?
            .unwrap_or_default())
    }

    pub fn create<N: NewRecord>(&self, new: N) -> Result<N::Output> {
        let key = <N::Output as Record>::COLLECTION.key();
        let mut records: Vec<N::Output> = self.get()?;
        let record = new.into_record(new_id(), Utc::now());
        records.push(record.clone());
        self.write_json(key, &records)?;
        Ok(record)
    }

    pub fn update<R: Record, P: Patch<R>>(&self, id: &str, patch: P) -> Result<R> {
        let mut records: Vec<R> = self.get()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(R::COLLECTION.name(), id))?;
        patch.apply(record);
        record.touch(Utc::now());
        let updated = record.clone();
        self.write_json(R::COLLECTION.key(), &records)?;
        Ok(updated)
    }

    /// Removes `id` if present; an unknown id is not an error.
    pub fn delete<R: Record>(&self, id: &str) -> Result<()> {
        let records: Vec<R> = self.get()?;
        let before = records.len();
        let kept: Vec<R> = records.into_iter().filter(|r| r.id() != id).collect();
        if kept.len() == before {
            let collection = R::COLLECTION.name();
            debug!(collection, id, "delete of absent id ignored");
            return Ok(());
        }
        self.write_json(R::COLLECTION.key(), &kept)
    }

    /// Drops every transaction owned by `card_id`, returning how many went.
    pub fn delete_transactions_for_card(&self, card_id: &str) -> Result<usize> {
        let records: Vec<Transaction> = self.get()?;
        let before = records.len();
        let kept: Vec<Transaction> = records
            .into_iter()
            .filter(|t| t.card_id != card_id)
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.write_json(Collection::Transactions.key(), &kept)?;
        }
        Ok(removed)
    }

    pub fn get_profile(&self) -> Result<Option<UserProfile>> {
        self.read_json(Collection::UserProfile.key())
    }

    /// Merges `patch` onto the profile, creating a blank one first if needed.
    pub fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile> {
        let now = Utc::now();
        let mut profile = self
            .get_profile()?
            .unwrap_or_else(|| UserProfile::blank(new_id(), now));
        patch.apply(&mut profile);
        profile.updated_at = Some(now);
        self.write_json(Collection::UserProfile.key(), &profile)?;
        Ok(profile)
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.medium.read(INITIALIZED_KEY)?.is_some())
    }

    /// Installs the demonstration dataset once. Returns false, writing
    /// nothing, when the store is already initialized.
    pub fn seed_demo_data(&self) -> Result<bool> {
        if self.is_initialized()? {
            debug!("store already initialized, seed skipped");
            return Ok(false);
        }
        let data = seed::demo_dataset(Utc::now());
        self.write_json(Collection::UserProfile.key(), &data.profile)?;
        self.write_json(Collection::Cards.key(), &data.cards)?;
        self.write_json(Collection::Transactions.key(), &data.transactions)?;
        self.write_json(Collection::Budgets.key(), &data.budgets)?;
        self.write_json(Collection::Bills.key(), &data.bills)?;
        self.write_json(Collection::SavingsGoals.key(), &data.savings_goals)?;
        self.write_json(Collection::Investments.key(), &data.investments)?;
        self.write_json(Collection::Debts.key(), &data.debts)?;
        self.write_json(INITIALIZED_KEY, &true)?;
        info!("sample data initialized");
        Ok(true)
    }

    pub fn preferences(&self) -> Result<Preferences> {
        Ok(self.read_json(PREFERENCES_KEY)?.unwrap_or_default())
    }

    pub fn set_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.write_json(PREFERENCES_KEY, prefs)
    }
}
