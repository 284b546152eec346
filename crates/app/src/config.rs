use std::fmt;

use trivia_core::model::TriviaSetId;

pub const DEFAULT_DB_URL: &str = "sqlite://trivia.sqlite3";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingSetId,
    UnknownArg(String),
    UnknownCommand(String),
    InvalidSetId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingSetId => write!(f, "play requires a trivia set id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidSetId { raw } => write!(f, "invalid trivia set id: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sets,
    Play(TriviaSetId),
    Author,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub db_url: String,
    pub log_filter: String,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Config {
    /// Environment first (`TRIVIA_DB_URL`, `TRIVIA_LOG`), then flags.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("TRIVIA_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.to_string());
        let mut log_filter =
            env("TRIVIA_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let mut command = None;

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--log" => log_filter = require_value(&mut args, "--log")?,
                "--help" | "-h" => command = Some(Command::Help),
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if command.is_some() => return Err(ArgsError::UnknownArg(arg)),
                "sets" => command = Some(Command::Sets),
                "author" => command = Some(Command::Author),
                "play" => {
                    let raw = args.next().ok_or(ArgsError::MissingSetId)?;
                    let id = raw
                        .parse::<TriviaSetId>()
                        .map_err(|_| ArgsError::InvalidSetId { raw: raw.clone() })?;
                    command = Some(Command::Play(id));
                }
                _ => return Err(ArgsError::UnknownCommand(arg)),
            }
        }

        Ok(Self {
            command: command.unwrap_or(Command::Sets),
            db_url: normalize_sqlite_url(&db_url),
            log_filter,
        })
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  trivia [--db <sqlite_url>] [--log <filter>] sets");
    eprintln!("  trivia [--db <sqlite_url>] [--log <filter>] play <trivia-set-id>");
    eprintln!("  trivia [--db <sqlite_url>] [--log <filter>] author");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --log {DEFAULT_LOG_FILTER}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_DB_URL, TRIVIA_LOG");
}

/// Turn `sqlite:relative/path` into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite:file:") {
        return trimmed.to_string();
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
