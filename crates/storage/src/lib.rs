use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{Item, ItemId};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

/// Result of renaming an item. `Missing` is not an error: the id simply matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Renamed,
    NameTaken,
    Missing,
}

impl Storage {
    /// Opens (creating if needed) the database behind `database_url` and brings the
    /// `items` schema up to date. Safe to call against an existing database.
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply items schema")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query("SELECT id, name FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .context("failed to list items")?;
        Ok(rows.iter().map(item_from_row).collect())
    }

    pub async fn find_item(&self, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query("SELECT id, name FROM items WHERE id = ?")
            .bind(item_id.0)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load item")?;
        Ok(row.as_ref().map(item_from_row))
    }

    pub async fn count_items(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
            .context("failed to count items")?;
        Ok(count)
    }

    /// Exact, case-sensitive lookup. Callers trim before asking.
    pub async fn item_name_exists(&self, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM items WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("failed to look up item name")?;
        Ok(row.is_some())
    }

    /// Inserts `name` unless another item already holds it. The check and the write are a
    /// single statement, so `None` means nothing was written.
    pub async fn create_item(&self, name: &str) -> Result<Option<Item>> {
        let row = sqlx::query(
            "INSERT INTO items (name) VALUES (?)
             ON CONFLICT(name) DO NOTHING
             RETURNING id, name",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("failed to insert item")?;
        Ok(row.as_ref().map(item_from_row))
    }

    pub async fn update_item_name(&self, item_id: ItemId, name: &str) -> Result<UpdateOutcome> {
        let result = sqlx::query("UPDATE items SET name = ? WHERE id = ?")
            .bind(name)
            .bind(item_id.0)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(UpdateOutcome::Missing),
            Ok(_) => Ok(UpdateOutcome::Renamed),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Ok(UpdateOutcome::NameTaken)
            }
            Err(err) => Err(anyhow::Error::new(err).context("failed to update item name")),
        }
    }

    /// Returns `false` when no item had `item_id`.
    pub async fn remove_item(&self, item_id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(item_id.0)
            .execute(&self.pool)
            .await
            .context("failed to delete item")?;
        Ok(result.rows_affected() > 0)
    }
}

fn item_from_row(row: &SqliteRow) -> Item {
    Item {
        id: ItemId(row.get::<i64, _>("id")),
        name: row.get::<Option<String>, _>("name").unwrap_or_default(),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
