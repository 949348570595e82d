//! Persistent storage layer — SQLite
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          ItemStore           │
//! ├──────────────────────────────┤
//! │  items (id, name, quantity)  │
//! └──────────────────────────────┘
//!     ↓ one connection per call
//! ```
//!
//! # Example
//!
//! ```no_run
//! use inventory_core::{ItemInput, ItemStore};
//!
//! # fn example() -> inventory_core::Result<()> {
//! let store = ItemStore::open("inventory.db")?;
//! let id = store.insert(&ItemInput::parse("Pen", "10")?)?;
//! store.delete(id)?;
//! # Ok(())
//! # }
//! ```

pub mod item_store;

pub use item_store::ItemStore;
