//! Inventory Core - item model, validation and SQLite store for Stockroom
//!
//! # Quick Start
//!
//! ```
//! use inventory_core::{ItemInput, ItemStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = ItemStore::open(dir.path().join("inventory.db")).unwrap();
//!
//! let id = store.insert(&ItemInput::parse("Pen", "10").unwrap()).unwrap();
//! store.update(id, &ItemInput::parse("Pencil", "5").unwrap()).unwrap();
//!
//! let items = store.list_all().unwrap();
//! assert_eq!(items[0].name, "Pencil");
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod config;
pub mod error;
pub mod item;
pub mod storage;

pub use config::{AppConfig, ColumnWidths, ViewportSettings};
pub use error::{InventoryError, Result, ValidationError};
pub use item::{Item, ItemInput};
pub use storage::ItemStore;
