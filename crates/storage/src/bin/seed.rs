use std::fmt;

use storage::repository::Storage;
use trivia_core::model::{QuestionDraft, QuestionField, TriviaTitle};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    title: String,
    description: Option<String>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("TRIVIA_DB_URL").unwrap_or_else(|_| "sqlite:trivia.sqlite3?mode=rwc".into());
        let mut title =
            std::env::var("TRIVIA_SEED_TITLE").unwrap_or_else(|_| "General Knowledge".into());
        let mut description = std::env::var("TRIVIA_SEED_DESC").ok();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--title" => title = require_value(&mut args, "--title")?,
                "--description" => description = Some(require_value(&mut args, "--description")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            title,
            description,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:trivia.sqlite3?mode=rwc)");
    eprintln!("  --title <text>            Trivia set title (default: General Knowledge)");
    eprintln!("  --description <text>      Optional trivia set description");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  TRIVIA_DB_URL, TRIVIA_SEED_TITLE, TRIVIA_SEED_DESC");
}

const SAMPLES: [(&str, &str, &str, &str, &str); 4] = [
    ("Which planet is known as the red planet?", "Venus", "Mars", "Jupiter", "B"),
    ("What is the chemical symbol for gold?", "Au", "Ag", "Gd", "A"),
    ("How many continents are there?", "Five", "Six", "Seven", "C"),
    ("Who wrote 'Hamlet'?", "William Shakespeare", "Charles Dickens", "Jane Austen", "A"),
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let title = TriviaTitle::new(args.title.clone())?;
    let set_id = storage
        .trivia
        .create_header(&title, args.description.as_deref())
        .await?;

    let drafts: Vec<QuestionDraft> = (1_u32..)
        .zip(SAMPLES)
        .map(|(row_key, (text, a, b, c, correct))| {
            let mut draft = QuestionDraft::blank(row_key, Some(set_id));
            draft.set(QuestionField::Text, text);
            draft.set(QuestionField::OptionA, a);
            draft.set(QuestionField::OptionB, b);
            draft.set(QuestionField::OptionC, c);
            draft.set(QuestionField::CorrectAnswer, correct);
            draft
        })
        .collect();
    let ids = storage.trivia.create_question_batch(&drafts).await?;

    println!(
        "Seeded trivia set {} ({}) with {} questions into {}",
        set_id,
        title,
        ids.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
