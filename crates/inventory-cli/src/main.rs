use anyhow::Context;
use clap::{Parser, Subcommand};
use inventory_core::{AppConfig, ItemInput, ItemStore};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod logging;
mod tui;
mod ui;

/// Stockroom - inventory table backed by a local SQLite file
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Store file (overrides the configuration; default: inventory.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive table (default)
    Ui,

    /// Print every item
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new item
    Add { name: String, quantity: String },

    /// Change the name and quantity of an item
    Update {
        id: i64,
        name: String,
        quantity: String,
    },

    /// Permanently delete an item
    Delete { id: i64 },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config = config.with_database(db);
    }

    let command = cli.command.unwrap_or(Commands::Ui);
    match &command {
        Commands::Ui => logging::init_file(&config.log_file, cli.verbose)?,
        _ => logging::init_stderr(cli.verbose),
    }

    execute(command, config, &mut io::stdout().lock())
}

fn open_store(config: &AppConfig) -> anyhow::Result<ItemStore> {
    ItemStore::with_busy_timeout(
        &config.database,
        Duration::from_millis(config.busy_timeout_ms),
    )
    .with_context(|| format!("Opening store '{}'", config.database.display()))
}

/// Run one command against the configured store, writing results to `out`
fn execute(command: Commands, config: AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Ui => {
            let store = open_store(&config)?;
            let app = app::InventoryApp::new(store, config);
            tui::run_tui(app)?;
        }
        Commands::List { json } => {
            let items = open_store(&config)?.list_all()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
            } else if items.is_empty() {
                writeln!(out, "No items.")?;
            } else {
                writeln!(out, "{:>6}  {:<30}  {:>10}", "ID", "NAME", "QUANTITY")?;
                for item in items {
                    writeln!(out, "{:>6}  {:<30}  {:>10}", item.id, item.name, item.quantity)?;
                }
            }
        }
        Commands::Add { name, quantity } => {
            let input = ItemInput::parse(&name, &quantity)?;
            let id = open_store(&config)?.insert(&input)?;
            writeln!(out, "Registered #{}: {} ({})", id, input.name(), input.quantity())?;
        }
        Commands::Update { id, name, quantity } => {
            let input = ItemInput::parse(&name, &quantity)?;
            open_store(&config)?.update(id, &input)?;
            writeln!(out, "Updated #{}: {} ({})", id, input.name(), input.quantity())?;
        }
        Commands::Delete { id } => {
            open_store(&config)?.delete(id)?;
            writeln!(out, "Deleted #{}", id)?;
        }
        Commands::Config => write!(out, "{}", config.to_toml()?)?,
    }

    Ok(())
}
