//! Command-line front-end for itemdeck.
//!
//! # Responsibility
//! - Parse arguments and resolve the data directory and log level.
//! - Open the SQLite-backed store and dispatch one command.
//! - Own confirmations and output; all item logic lives in `itemdeck_core`.

mod commands;

use clap::{Parser, Subcommand};
use itemdeck_core::config::{DATA_DIR_ENV, DEFAULT_APP_ID};
use itemdeck_core::{
    default_log_level, init_logging, AppConfig, ItemService, KvRecordStore, SqliteKeyValueBackend,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "itemdeck", version, about = "Manage small tagged items")]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, value_name = "PATH", env = DATA_DIR_ENV, default_value = ".")]
    data_dir: PathBuf,
    /// Application id; selects the item collection and export file prefix
    #[arg(long, default_value = DEFAULT_APP_ID)]
    app_id: String,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Comma-separated tags, e.g. "dairy, grocery"
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// List items with optional search, tag filter and sort
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Tag to filter by; `__no_tags__` selects untagged items
        #[arg(long)]
        tag: Option<String>,
        /// name-asc|name-desc|created-asc|created-desc|modified-asc|modified-desc
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one item
    Show { id: String },
    /// Edit an item; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replace tags with this comma-separated list
        #[arg(long, conflicts_with_all = ["add_tag", "remove_tag"])]
        tags: Option<String>,
        /// Add one tag (repeatable)
        #[arg(long)]
        add_tag: Vec<String>,
        /// Remove one tag (repeatable)
        #[arg(long)]
        remove_tag: Vec<String>,
    },
    /// Delete an item
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List tags in use, or suggest tags for partial input
    Tags {
        #[arg(long)]
        suggest: Option<String>,
    },
    /// Write all items to a JSON file
    Export {
        /// Output directory (file name is generated)
        #[arg(long, value_name = "PATH", default_value = ".")]
        out_dir: PathBuf,
    },
    /// Merge items from a JSON export
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(&cli.data_dir)?;
    let data_dir = cli.data_dir.canonicalize()?;
    start_logging(&data_dir, cli.log_level.as_deref());

    let config = AppConfig::new(&cli.app_id);
    let backend = SqliteKeyValueBackend::open(data_dir.join(config.db_file_name()))?;
    let store = KvRecordStore::new(backend, &config);
    let mut service = ItemService::new(store, config);

    commands::dispatch(&mut service, cli.command)
}

fn start_logging(data_dir: &Path, level: Option<&str>) {
    let log_dir = data_dir.join("logs");
    let level = level.unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}
