use std::sync::Arc;

use services::TriviaServices;
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::{Command, Config, print_usage};
use console::TerminalSink;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        // In-memory and `sqlite:file:` URLs manage themselves.
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(config::ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Config::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing(&parsed.log_filter);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = TriviaServices::new_sqlite(&parsed.db_url, Arc::new(TerminalSink)).await?;
    tracing::debug!(db_url = %parsed.db_url, command = ?parsed.command, "starting");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    match parsed.command {
        Command::Sets => console::list_sets(&services, &mut output).await,
        Command::Play(trivia_set_id) => {
            console::play(&services, trivia_set_id, &mut input, &mut output)
                .await
                .map(|_| ())
        }
        Command::Author => console::author(&services, &mut input, &mut output)
            .await
            .map(|_| ()),
        Command::Help => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
