use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use promptbase_db::Database;

mod config;
mod logging;
mod tui;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "promptbase",
    about = "A simple app to store and retrieve prompts",
    version,
    author
)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "PROMPTBASE_DB")]
    db: Option<PathBuf>,

    /// Path to the config file (default: ./promptbase.toml)
    #[arg(long, default_value = config::CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = AppConfig::load(&cli.config)?.unwrap_or_default();
    let db_path = config::resolve_db_path(cli.db.clone(), &file_config);

    // The TUI owns the terminal, so logs go to a file
    let _log_guard = logging::init(&cli.log_level)?;
    tracing::info!(db = %db_path.display(), "opening prompt database");

    let db = Database::open_at(&db_path)
        .with_context(|| format!("Failed to open prompt database at {}", db_path.display()))?;

    let mut app = tui::App::new(db)?;
    app.run()
}
