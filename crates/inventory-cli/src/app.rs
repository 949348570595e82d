//! Controller state for the inventory screen
//!
//! Every user action maps to one store call followed by a full reload: all
//! rows are dropped, re-queried and rebuilt in display mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use inventory_core::{AppConfig, InventoryError, Item, ItemInput, ItemStore};
use ratatui::widgets::TableState;

/// Which widget receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    NameInput,
    QuantityInput,
    Table,
}

/// Buffer being typed into while a row is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Display,
    Editing {
        name: String,
        quantity: String,
        field: EditField,
    },
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    /// 1-based position in the table, independent of the database id
    pub number: usize,
    pub item: Item,
    pub mode: RowMode,
}

impl ItemRow {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug)]
pub struct InventoryApp {
    store: ItemStore,
    pub config: AppConfig,
    pub name_input: String,
    pub quantity_input: String,
    pub rows: Vec<ItemRow>,
    pub table_state: TableState,
    pub focus: Focus,
    pub status: Option<StatusLine>,
    pub should_quit: bool,
}

impl InventoryApp {
    pub fn new(store: ItemStore, config: AppConfig) -> Self {
        let mut app = Self {
            store,
            config,
            name_input: String::new(),
            quantity_input: String::new(),
            rows: Vec::new(),
            table_state: TableState::default(),
            focus: Focus::NameInput,
            status: None,
            should_quit: false,
        };
        app.reload();
        app
    }

    /// Drop every row, re-query the store and rebuild in display mode
    pub fn load_data(&mut self) -> inventory_core::Result<()> {
        self.rows.clear();
        let items = self.store.list_all()?;
        self.rows = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| ItemRow {
                number: index + 1,
                item,
                mode: RowMode::Display,
            })
            .collect();

        let selected = match (self.table_state.selected(), self.rows.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
        tracing::debug!(rows = self.rows.len(), "Table reloaded");
        Ok(())
    }

    fn reload(&mut self) {
        if let Err(e) = self.load_data() {
            self.fail("Reload failed", e);
        }
    }

    /// Validate the form and insert a new item
    pub fn register(&mut self) {
        let input = match ItemInput::parse(&self.name_input, &self.quantity_input) {
            Ok(input) => input,
            Err(e) => return self.warn(e.to_string()),
        };

        match self.store.insert(&input) {
            Ok(_) => {
                self.name_input.clear();
                self.quantity_input.clear();
                self.info(format!("Registered {} ({})", input.name(), input.quantity()));
                self.reload();
            }
            Err(e) => self.fail("Register failed", e),
        }
    }

    /// Switch a row from display to editing, seeding buffers from the item
    pub fn begin_edit(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            if !row.is_editing() {
                row.mode = RowMode::Editing {
                    name: row.item.name.clone(),
                    quantity: row.item.quantity.to_string(),
                    field: EditField::Name,
                };
            }
        }
    }

    /// Abandon an edit without writing anything
    pub fn cancel_edit(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.mode = RowMode::Display;
        }
    }

    /// Validate an editing row's buffers, persist them and reload
    pub fn save(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let RowMode::Editing { name, quantity, .. } = &row.mode else {
            return;
        };

        let id = row.item.id;
        let input = match ItemInput::parse(name, quantity) {
            Ok(input) => input,
            Err(e) => return self.warn(e.to_string()),
        };

        match self.store.update(id, &input) {
            Ok(()) => {
                self.info(format!("Saved {} ({})", input.name(), input.quantity()));
                self.reload();
            }
            Err(e @ InventoryError::ItemNotFound(_)) => {
                self.fail("Save failed", e);
                self.resync();
            }
            Err(e) => self.fail("Save failed", e),
        }
    }

    /// Physically delete the item shown in row `index`, then reload
    pub fn delete(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let item = row.item.clone();

        match self.store.delete(item.id) {
            Ok(()) => {
                self.info(format!("Deleted {}", item.name));
                self.reload();
            }
            Err(e @ InventoryError::ItemNotFound(_)) => {
                self.fail("Delete failed", e);
                self.resync();
            }
            Err(e) => self.fail("Delete failed", e),
        }
    }

    // Reload without clobbering the status set by the caller.
    fn resync(&mut self) {
        if let Err(e) = self.load_data() {
            tracing::error!("Reload after failure also failed: {}", e);
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected().filter(|i| *i < self.rows.len())
    }

    pub fn next_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::NameInput | Focus::QuantityInput => self.handle_form_key(key),
            Focus::Table => match self.selected() {
                Some(index) if self.rows[index].is_editing() => self.handle_edit_key(index, key),
                selected => self.handle_table_key(selected, key),
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let field = match self.focus {
            Focus::NameInput => &mut self.name_input,
            _ => &mut self.quantity_input,
        };

        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::NameInput => Focus::QuantityInput,
                    _ => Focus::Table,
                }
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::QuantityInput => Focus::NameInput,
                    _ => Focus::Table,
                }
            }
            KeyCode::Char(c) if is_plain(&key) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter => self.register(),
            _ => {}
        }
    }

    fn handle_table_key(&mut self, selected: Option<usize>, key: KeyEvent) {
        match key.code {
            KeyCode::Char(_) if !is_plain(&key) => {}
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.focus = Focus::NameInput,
            KeyCode::BackTab => self.focus = Focus::QuantityInput,
            KeyCode::Down => self.next_row(),
            KeyCode::Up => self.previous_row(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(index) = selected {
                    self.begin_edit(index);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(index) = selected {
                    self.delete(index);
                }
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, index: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => return self.save(index),
            KeyCode::Esc => return self.cancel_edit(index),
            KeyCode::Down => return self.next_row(),
            KeyCode::Up => return self.previous_row(),
            _ => {}
        }

        let RowMode::Editing {
            name,
            quantity,
            field,
        } = &mut self.rows[index].mode
        else {
            return;
        };
        let buffer = match field {
            EditField::Name => name,
            EditField::Quantity => quantity,
        };

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                *field = match field {
                    EditField::Name => EditField::Quantity,
                    EditField::Quantity => EditField::Name,
                }
            }
            KeyCode::Char(c) if is_plain(&key) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
    }

    fn info(&mut self, message: String) {
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            message,
        });
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("Input rejected: {}", message);
        self.status = Some(StatusLine {
            kind: StatusKind::Warning,
            message,
        });
    }

    fn fail(&mut self, action: &str, error: InventoryError) {
        tracing::error!("{}: {}", action, error);
        self.status = Some(StatusLine {
            kind: StatusKind::Error,
            message: format!("{}: {}", action, error),
        });
    }
}

// Ctrl and Alt chords are shortcuts, never text or table commands
fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app_with(rows: &[(&str, i64)]) -> (TempDir, InventoryApp) {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::open(dir.path().join("inventory.db")).unwrap();
        for (name, qty) in rows {
            store.insert(&ItemInput::new(name, *qty).unwrap()).unwrap();
        }
        let app = InventoryApp::new(store, AppConfig::default());
        (dir, app)
    }

    fn press(app: &mut InventoryApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut InventoryApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn stored(app: &InventoryApp) -> Vec<(String, i64)> {
        app.store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|i| (i.name, i.quantity))
            .collect()
    }

    #[test]
    fn test_initial_load_numbers_rows() {
        let (_dir, app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        let numbers: Vec<usize> = app.rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(app.selected(), Some(0));
        assert!(app.rows.iter().all(|r| r.mode == RowMode::Display));
    }

    #[test]
    fn test_register_through_keys_clears_form() {
        let (_dir, mut app) = app_with(&[]);

        type_text(&mut app, " Pen ");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "10");
        press(&mut app, KeyCode::Enter);

        assert_eq!(stored(&app), vec![("Pen".to_string(), 10)]);
        assert!(app.name_input.is_empty());
        assert!(app.quantity_input.is_empty());
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn test_invalid_register_keeps_form_and_warns() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        app.name_input = "Glue".to_string();
        app.quantity_input = "lots".to_string();

        app.register();

        assert_eq!(stored(&app), vec![("Pen".to_string(), 10)]);
        assert_eq!(app.name_input, "Glue");
        assert_eq!(app.quantity_input, "lots");
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.message.contains("lots"));

        app.name_input = "   ".to_string();
        app.quantity_input = "3".to_string();
        app.register();
        assert_eq!(app.status.unwrap().message, "Name must not be blank");
    }

    #[test]
    fn test_edit_and_save_updates_only_that_row() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        app.focus = Focus::Table;
        app.next_row();

        press(&mut app, KeyCode::Char('e'));
        assert!(app.rows[1].is_editing());
        assert!(!app.rows[0].is_editing());

        for _ in 0.."Ruler".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Long ruler");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "7");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            stored(&app),
            vec![("Pen".to_string(), 10), ("Long ruler".to_string(), 7)]
        );
        assert!(app.rows.iter().all(|r| !r.is_editing()));
        assert_eq!(app.selected(), Some(1));
    }

    #[test]
    fn test_invalid_save_stays_editing() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        app.begin_edit(0);
        if let RowMode::Editing { quantity, .. } = &mut app.rows[0].mode {
            *quantity = "-4".to_string();
        }

        app.save(0);

        assert_eq!(stored(&app), vec![("Pen".to_string(), 10)]);
        assert!(app.rows[0].is_editing());
        assert_eq!(app.status.unwrap().kind, StatusKind::Warning);
    }

    #[test]
    fn test_reload_returns_every_row_to_display() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        app.begin_edit(0);
        app.begin_edit(1);

        app.name_input = "Glue".to_string();
        app.quantity_input = "1".to_string();
        app.register();

        assert_eq!(app.rows.len(), 3);
        assert!(app.rows.iter().all(|r| r.mode == RowMode::Display));
    }

    #[test]
    fn test_cancel_edit_writes_nothing() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        app.focus = Focus::Table;
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "cil");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.rows[0].mode, RowMode::Display);
        assert_eq!(stored(&app), vec![("Pen".to_string(), 10)]);
    }

    #[test]
    fn test_delete_removes_selected_and_renumbers() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2), ("Glue", 4)]);
        app.focus = Focus::Table;

        press(&mut app, KeyCode::Char('d'));

        assert_eq!(
            stored(&app),
            vec![("Ruler".to_string(), 2), ("Glue".to_string(), 4)]
        );
        assert_eq!(app.rows[0].number, 1);
        assert_eq!(app.rows[0].item.name, "Ruler");
        assert_eq!(app.rows[0].item.id, 2);
    }

    #[test]
    fn test_deleting_last_row_clears_selection() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        app.delete(0);
        assert!(app.rows.is_empty());
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_vanished_row_reports_error_and_resyncs() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        app.store.delete(app.rows[0].item.id).unwrap();

        app.delete(0);

        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.starts_with("Delete failed"));
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].item.name, "Ruler");
    }

    #[test]
    fn test_selection_wraps() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        app.previous_row();
        assert_eq!(app.selected(), Some(1));
        app.next_row();
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_modifier_chords_are_not_typed() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        type_text(&mut app, "Gl");
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        app.handle_key(KeyEvent::new(KeyCode::Char('U'), KeyModifiers::SHIFT));
        assert_eq!(app.name_input, "GlU");

        app.focus = Focus::Table;
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT));
        assert_eq!(stored(&app), vec![("Pen".to_string(), 10)]);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('e'));
        app.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        match &app.rows[0].mode {
            RowMode::Editing { name, .. } => assert_eq!(name, "Pen"),
            mode => panic!("expected editing row, got {:?}", mode),
        }
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app) = app_with(&[]);
        type_text(&mut app, "q");
        assert!(!app.should_quit, "q in a text field is just a letter");
        assert_eq!(app.name_input, "q");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
