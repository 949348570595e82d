//! ItemStore — SQLite storage for inventory items
//!
//! One table, `items(id, name, quantity)`. Every operation opens its own
//! connection and drops it before returning: there is no pool and no
//! transaction spanning more than one statement.

use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DEFAULT_BUSY_TIMEOUT_MS;
use crate::error::{InventoryError, Result};
use crate::item::{Item, ItemInput};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS items (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        quantity INTEGER NOT NULL
    );
";

/// Handle on a store file. Holds no open connection.
#[derive(Debug, Clone)]
pub struct ItemStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl ItemStore {
    /// Open (or create) the store file and make sure the schema exists.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use inventory_core::ItemStore;
    /// let store = ItemStore::open("inventory.db").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_busy_timeout(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Same as [`ItemStore::open`] with an explicit SQLite busy timeout.
    pub fn with_busy_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path: path.to_path_buf(),
            busy_timeout,
        };
        store.init()?;
        tracing::info!("Item store ready at {}", store.path.display());
        Ok(store)
    }

    /// Path of the underlying SQLite file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotent schema creation
    pub fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Every row, in insertion order
    pub fn list_all(&self) -> Result<Vec<Item>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, quantity FROM items ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Item {
                id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?;

        let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Fetch a single item by id
    pub fn get(&self, id: i64) -> Result<Option<Item>> {
        let conn = self.connect()?;
        let result = conn.query_row(
            "SELECT id, name, quantity FROM items WHERE id = ?1",
            params![id],
            |row| {
                Ok(Item {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    quantity: row.get(2)?,
                })
            },
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a new item and return its assigned id
    pub fn insert(&self, input: &ItemInput) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO items (name, quantity) VALUES (?1, ?2)",
            params![input.name(), input.quantity()],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, name = input.name(), quantity = input.quantity(), "Item inserted");
        Ok(id)
    }

    /// Overwrite name and quantity of the row with `id`
    pub fn update(&self, id: i64, input: &ItemInput) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE items SET name = ?1, quantity = ?2 WHERE id = ?3",
            params![input.name(), input.quantity(), id],
        )?;

        if changed == 0 {
            return Err(InventoryError::ItemNotFound(id));
        }
        tracing::info!(id, name = input.name(), quantity = input.quantity(), "Item updated");
        Ok(())
    }

    /// Physically delete the row with `id`
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(InventoryError::ItemNotFound(id));
        }
        tracing::info!(id, "Item deleted");
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }
}
