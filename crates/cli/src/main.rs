use std::path::PathBuf;

use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Book library API server")]
struct Cli {
    /// Directory holding base.toml and <env>.toml
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Settings overlay to apply: local, staging or production
    #[arg(long = "env", global = true, value_name = "ENV")]
    environment: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the database schema if missing, then exit
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from(cli.config_dir.as_deref(), cli.environment.as_deref())
        .with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(env = ?settings.environment, "starting bookshelf server");
            bookshelf_app::run(settings).await
        }
        Command::InitDb => {
            let path = settings.database.path.clone();
            let tables = bookshelf_app::init_db(&settings)?;
            tracing::info!(db = %path, tables, "database initialized");
            println!("initialized {} ({} table definitions)", path, tables);
            Ok(())
        }
    }
}
