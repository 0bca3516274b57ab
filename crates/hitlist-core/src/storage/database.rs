//! SQLite-based habit storage.
//!
//! Provides persistent storage for:
//! - Habits, keyed by the month they are tracked in
//! - Per-day completion marks
//! - Key-value store for application state
//!
//! Day toggles run inside a single immediate transaction so the
//! read-toggle-recompute-persist sequence for a habit is never interleaved
//! with another writer.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::calendar::{DayContext, MonthKey};
use crate::celebration::{apply_toggle, ToggleOutcome};
use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::habit::{validate_habit_fields, Habit, HabitCategory};

use super::data_dir;

fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        kind: "habit",
        id: id.to_string(),
    }
}

/// SQLite database for habits and their completions.
pub struct HabitStore {
    conn: Connection,
}

impl HabitStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the store at `<data_dir>/hitlist.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("hitlist.db"))
    }

    /// Open the store at an explicit path, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let store = Self { conn };
        store.migrate()?;
        tracing::debug!(path = %path.display(), "opened habit store");
        Ok(store)
    }

    /// Open an in-memory store.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS habits (
                id             TEXT PRIMARY KEY,
                year           INTEGER NOT NULL,
                month          INTEGER NOT NULL,
                name           TEXT NOT NULL,
                category       TEXT NOT NULL,
                monthly_goal   INTEGER NOT NULL,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                created_at     TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS completions (
                habit_id TEXT NOT NULL,
                day      INTEGER NOT NULL,
                PRIMARY KEY (habit_id, day)
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_habits_month ON habits(year, month);",
        )
    }

    /// Run `f` inside `BEGIN IMMEDIATE`, committing on success.
    fn with_write_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        match f() {
            Ok(value) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(value)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    fn load_completed_days(&self, habit_id: &str) -> Result<BTreeSet<u32>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT day FROM completions WHERE habit_id = ?1")?;
        let days = stmt
            .query_map(params![habit_id], |row| row.get::<_, u32>(0))?
            .collect::<Result<BTreeSet<u32>, _>>()?;
        Ok(days)
    }

    fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
        let category: String = row.get(4)?;
        let created_at: String = row.get(7)?;
        Ok(Habit {
            id: row.get(0)?,
            month: MonthKey {
                year: row.get(1)?,
                month: row.get(2)?,
            },
            name: row.get(3)?,
            category: category.parse::<HabitCategory>().unwrap_or_default(),
            monthly_goal: row.get(5)?,
            longest_streak: row.get(6)?,
            created_at: parse_datetime_fallback(&created_at),
            completed_days: BTreeSet::new(),
        })
    }

    fn insert_habit(&self, habit: &Habit) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO habits (id, year, month, name, category, monthly_goal, longest_streak, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                habit.id,
                habit.month.year,
                habit.month.month,
                habit.name,
                habit.category.as_str(),
                habit.monthly_goal,
                habit.longest_streak,
                habit.created_at.to_rfc3339(),
            ],
        )?;
        for day in &habit.completed_days {
            self.conn.execute(
                "INSERT OR IGNORE INTO completions (habit_id, day) VALUES (?1, ?2)",
                params![habit.id, day],
            )?;
        }
        Ok(())
    }

    // === Habit CRUD ===

    /// Create a new habit.
    pub fn create_habit(&self, habit: &Habit) -> Result<()> {
        self.insert_habit(habit)?;
        tracing::info!(habit_id = %habit.id, name = %habit.name, month = %habit.month, "habit created");
        Ok(())
    }

    /// Get a habit by ID, with its completed days.
    pub fn get_habit(&self, id: &str) -> Result<Option<Habit>> {
        let habit = self
            .conn
            .query_row(
                "SELECT id, year, month, name, category, monthly_goal, longest_streak, created_at
                 FROM habits WHERE id = ?1",
                params![id],
                Self::row_to_habit,
            )
            .optional()?;

        match habit {
            Some(mut habit) => {
                habit.completed_days = self.load_completed_days(&habit.id)?;
                Ok(Some(habit))
            }
            None => Ok(None),
        }
    }

    /// List the habits tracked in `month`, oldest first.
    pub fn list_habits(&self, month: MonthKey) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, year, month, name, category, monthly_goal, longest_streak, created_at
             FROM habits WHERE year = ?1 AND month = ?2
             ORDER BY rowid",
        )?;
        let mut habits = stmt
            .query_map(params![month.year, month.month], Self::row_to_habit)?
            .collect::<Result<Vec<Habit>, _>>()?;
        for habit in &mut habits {
            habit.completed_days = self.load_completed_days(&habit.id)?;
        }
        Ok(habits)
    }

    /// Update a habit's name, category and goal.
    ///
    /// # Errors
    /// Returns an error if the habit does not exist or the new values fail
    /// validation.
    pub fn update_habit(
        &self,
        id: &str,
        name: &str,
        category: HabitCategory,
        monthly_goal: u32,
    ) -> Result<Habit> {
        let mut habit = self.get_habit(id)?.ok_or_else(|| not_found(id))?;
        habit.name = validate_habit_fields(name, monthly_goal, habit.month)?;
        habit.category = category;
        habit.monthly_goal = monthly_goal;
        self.conn.execute(
            "UPDATE habits SET name = ?1, category = ?2, monthly_goal = ?3 WHERE id = ?4",
            params![habit.name, habit.category.as_str(), habit.monthly_goal, habit.id],
        )?;
        tracing::info!(habit_id = %id, "habit updated");
        Ok(habit)
    }

    /// Delete a habit and its completions.
    pub fn delete_habit(&self, id: &str) -> Result<()> {
        self.with_write_lock(|| {
            self.conn
                .execute("DELETE FROM completions WHERE habit_id = ?1", params![id])?;
            let deleted = self
                .conn
                .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })?;
        tracing::info!(habit_id = %id, "habit deleted");
        Ok(())
    }

    /// Toggle completion of `day` for a habit and persist the result.
    ///
    /// `today` positions the streak cursor: it only counts as the current
    /// day when it falls in the habit's month.
    ///
    /// # Errors
    /// Returns an error if the habit does not exist or `day` is outside its
    /// month.
    pub fn toggle_day(&self, habit_id: &str, day: u32, today: NaiveDate) -> Result<ToggleOutcome> {
        self.with_write_lock(|| {
            let mut habit = self.get_habit(habit_id)?.ok_or_else(|| not_found(habit_id))?;
            let ctx = DayContext::for_month(habit.month, today);
            let outcome = apply_toggle(&mut habit, day, ctx)?;

            if outcome.marked {
                self.conn.execute(
                    "INSERT OR IGNORE INTO completions (habit_id, day) VALUES (?1, ?2)",
                    params![habit.id, day],
                )?;
            } else {
                self.conn.execute(
                    "DELETE FROM completions WHERE habit_id = ?1 AND day = ?2",
                    params![habit.id, day],
                )?;
            }
            self.conn.execute(
                "UPDATE habits SET longest_streak = ?1 WHERE id = ?2",
                params![habit.longest_streak, habit.id],
            )?;
            Ok(outcome)
        })
    }

    /// Whether any habit is tracked in `month`.
    pub fn has_month(&self, month: MonthKey) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM habits WHERE year = ?1 AND month = ?2",
            params![month.year, month.month],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Copy the habits of `from` into `to` with no completions.
    ///
    /// # Errors
    /// Returns an error if `to` already has habits.
    pub fn reuse_month(&self, from: MonthKey, to: MonthKey) -> Result<Vec<Habit>> {
        let copies = self.with_write_lock(|| {
            if self.has_month(to)? {
                return Err(ValidationError::InvalidValue {
                    field: "month".into(),
                    message: format!("{to} already has habits"),
                }
                .into());
            }
            let copies: Vec<Habit> = self
                .list_habits(from)?
                .iter()
                .map(|h| h.reuse_for(to))
                .collect();
            for habit in &copies {
                self.insert_habit(habit)?;
            }
            Ok(copies)
        })?;
        tracing::info!(%from, %to, count = copies.len(), "reused habits for new month");
        Ok(copies)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
