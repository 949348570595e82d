use inventory_core::ViewportSettings;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{EditField, Focus, InventoryApp, RowMode, StatusKind};

const CURSOR: &str = "▏";

/// Centre a fixed-size area inside `outer`, shrinking only when the terminal is smaller
pub fn fixed_area(outer: Rect, viewport: ViewportSettings) -> Rect {
    let width = viewport.width.min(outer.width);
    let height = viewport.height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

pub fn draw(f: &mut Frame<'_>, app: &mut InventoryApp) {
    let area = fixed_area(f.size(), app.config.viewport);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Form
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(app.config.title.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[0]);

    draw_form(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        let line = Paragraph::new(status.message.as_str()).style(Style::default().fg(color));
        f.render_widget(line, chunks[3]);
    }

    let help = Paragraph::new(help_text(app)).style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[4]);
}

fn draw_form(f: &mut Frame<'_>, app: &InventoryApp, area: Rect) {
    let cols = app.config.columns;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(cols.name + 2),
            Constraint::Length(cols.quantity + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let fields = [
        ("Name", &app.name_input, Focus::NameInput),
        ("Quantity", &app.quantity_input, Focus::QuantityInput),
    ];
    for (chunk, (label, value, focus)) in chunks.iter().zip(fields) {
        let focused = app.focus == focus;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if focused {
            format!("{}{}", value, CURSOR)
        } else {
            value.clone()
        };
        let widget = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label),
        );
        f.render_widget(widget, *chunk);
    }

    let register = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Register"),
    ]));
    let hint_area = inner_line(chunks[2]);
    if hint_area.width > 0 {
        f.render_widget(register, hint_area);
    }
}

// Vertically align a one-line widget with the text inside the bordered fields
fn inner_line(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + area.height.min(3) / 2,
        width: area.width.saturating_sub(1),
        height: area.height.min(1),
    }
}

// Numbers line up on the right edge of their column
fn right_aligned(text: &str, width: u16) -> String {
    format!("{:>width$}", text, width = width as usize)
}

fn draw_table(f: &mut Frame<'_>, app: &mut InventoryApp, area: Rect) {
    let table_focused = app.focus == Focus::Table;
    let qty_width = app.config.columns.quantity;

    let rows = app.rows.iter().map(|row| {
        let (name, quantity, edit) = match &row.mode {
            RowMode::Display => (
                Cell::from(row.item.name.clone()),
                Cell::from(right_aligned(&row.item.quantity.to_string(), qty_width)),
                Cell::from("[edit]"),
            ),
            RowMode::Editing {
                name,
                quantity,
                field,
            } => {
                let active = Style::default().fg(Color::Black).bg(Color::Cyan);
                let idle = Style::default().add_modifier(Modifier::UNDERLINED);
                let (name_style, qty_style, name_text, qty_text) = match field {
                    EditField::Name => (active, idle, format!("{}{}", name, CURSOR), quantity.clone()),
                    EditField::Quantity => (idle, active, name.clone(), format!("{}{}", quantity, CURSOR)),
                };
                (
                    Cell::from(name_text).style(name_style),
                    Cell::from(qty_text).style(qty_style),
                    Cell::from("[save]").style(Style::default().fg(Color::Green)),
                )
            }
        };

        Row::new(vec![
            Cell::from(row.number.to_string()),
            name,
            quantity,
            edit,
            Cell::from("[del]").style(Style::default().fg(Color::Red)),
        ])
    });

    let widths = app.config.columns.as_array().map(Constraint::Length);
    let border = if table_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                Cell::from("No"),
                Cell::from("Name"),
                Cell::from(right_aligned("Quantity", qty_width)),
                Cell::from("Edit"),
                Cell::from("Delete"),
            ])
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Items"),
        )
        .highlight_style(if table_focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        })
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn help_text(app: &InventoryApp) -> &'static str {
    match app.focus {
        Focus::NameInput | Focus::QuantityInput => {
            "Tab: next field | Enter: register | Ctrl+C: quit"
        }
        Focus::Table => match app.selected() {
            Some(i) if app.rows[i].is_editing() => {
                "Tab: switch field | Enter: save | Esc: cancel | Ctrl+C: quit"
            }
            _ => "Up/Down: select | e: edit | d: delete | Tab: form | q: quit",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{AppConfig, ItemInput, ItemStore};
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn render(app: &mut InventoryApp, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.get(x, y).symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn app_with(rows: &[(&str, i64)]) -> (TempDir, InventoryApp) {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::open(dir.path().join("inventory.db")).unwrap();
        for (name, qty) in rows {
            store.insert(&ItemInput::new(name, *qty).unwrap()).unwrap();
        }
        let config = AppConfig {
            title: "Test Stock".to_string(),
            ..AppConfig::default()
        };
        let app = InventoryApp::new(store, config);
        (dir, app)
    }

    #[test]
    fn test_fixed_area_centres_and_clamps() {
        let viewport = ViewportSettings {
            width: 90,
            height: 30,
        };
        assert_eq!(
            fixed_area(Rect::new(0, 0, 120, 40), viewport),
            Rect::new(15, 5, 90, 30)
        );
        assert_eq!(
            fixed_area(Rect::new(0, 0, 60, 20), viewport),
            Rect::new(0, 0, 60, 20)
        );
    }

    #[test]
    fn test_table_shows_display_numbers_not_ids() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2), ("Glue", 4)]);
        app.delete(0);

        let screen = render(&mut app, 90, 30).join("\n");
        assert!(screen.contains("Test Stock"));
        assert!(screen.contains("No"));
        assert!(screen.contains("Quantity"));

        let number_before = |name: &str| {
            let line = screen.lines().find(|l| l.contains("[del]") && l.contains(name));
            let line = line.unwrap_or_else(|| panic!("no table row for {}", name));
            let prefix = &line[..line.find(name).unwrap()];
            prefix.trim_end().chars().last()
        };
        assert_eq!(number_before("Ruler"), Some('1'));
        assert_eq!(number_before("Glue"), Some('2'));
        assert!(screen
            .lines()
            .filter(|l| l.contains("[del]"))
            .all(|l| !l.contains("Pen")));
    }

    #[test]
    fn test_quantities_are_right_aligned() {
        let (_dir, mut app) = app_with(&[("Pen", 7), ("Ruler", 1250)]);
        let width = app.config.columns.quantity as usize;

        let screen = render(&mut app, 90, 30);
        let pen = screen.iter().find(|l| l.contains("Pen")).unwrap();
        let ruler = screen.iter().find(|l| l.contains("Ruler")).unwrap();
        assert!(pen.contains(&format!("{:>width$}", "7", width = width)));
        assert!(ruler.contains(&format!("{:>width$}", "1250", width = width)));

        let end_column = |line: &str, text: &str| {
            let start = line.find(text).unwrap();
            line[..start].chars().count() + text.chars().count()
        };
        let header = screen
            .iter()
            .find(|l| l.contains("Quantity") && l.contains("Delete"))
            .unwrap();
        assert_eq!(end_column(pen, " 7"), end_column(ruler, " 1250"));
        assert_eq!(end_column(header, " Quantity"), end_column(pen, " 7"));
    }

    #[test]
    fn test_editing_row_shows_save_marker() {
        let (_dir, mut app) = app_with(&[("Pen", 10), ("Ruler", 2)]);
        app.begin_edit(1);

        let screen = render(&mut app, 90, 30);
        let ruler = screen.iter().find(|l| l.contains("Ruler")).unwrap();
        assert!(ruler.contains("[save]"));
        let pen = screen.iter().find(|l| l.contains("Pen")).unwrap();
        assert!(pen.contains("[edit]"));
    }

    #[test]
    fn test_status_line_is_rendered() {
        let (_dir, mut app) = app_with(&[]);
        app.quantity_input = "x".to_string();
        app.name_input = "Pen".to_string();
        app.register();

        let screen = render(&mut app, 90, 30).join("\n");
        assert!(screen.contains("Quantity must be a whole number"));
    }

    #[test]
    fn test_draws_in_small_terminal() {
        let (_dir, mut app) = app_with(&[("Pen", 10)]);
        let screen = render(&mut app, 40, 12);
        assert_eq!(screen.len(), 12);
    }
}
