//! Daily word CLI.
//!
//! # Responsibility
//! - Drive database init, bulk word loading, the explicit assignment
//!   trigger, and the read queries from the command line.
//! - Print the same JSON reply bodies a transport layer would serve.

use clap::{Parser, Subcommand};
use dailyword_core::api;
use dailyword_core::db::open_db;
use dailyword_core::{default_log_level, init_logging, SqliteWordRepository, WordRepository};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "dailyword.sqlite3";
const DB_PATH_ENV_VAR: &str = "DAILYWORD_DB_PATH";

#[derive(Parser, Debug)]
#[command(
    name = "dailyword",
    version,
    about = "Word-of-the-day pool, assignment trigger, and history queries"
)]
struct Cli {
    /// Database file. Falls back to DAILYWORD_DB_PATH, then ./dailyword.sqlite3.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or migrate the database file
    Init,
    /// Load one word per non-blank line into the pool
    Load {
        /// Plain-text word list, one word per line
        file: PathBuf,
    },
    /// Ensure today has a word assigned
    Assign,
    /// Print today's word
    Today,
    /// Print the word for an exact date
    Date {
        /// Calendar date, YYYY-MM-DD
        date: String,
    },
    /// Print the most recently assigned words, newest first
    Recent {
        /// Maximum entries (default 7, capped at 50)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Print words assigned within an inclusive date range
    Range {
        /// Start date, YYYY-MM-DD
        from: String,
        /// End date, YYYY-MM-DD
        to: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir)?;
    }

    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Init => {
            let _conn = open_db(&db_path)?;
            print_reply(&serde_json::json!({
                "initialized": true,
                "db_path": db_path.display().to_string(),
            }))
        }
        Commands::Load { file } => {
            let mut conn = open_db(&db_path)?;
            let loaded = load_words(&mut conn, &file)?;
            print_reply(&serde_json::json!({ "loaded": loaded }))
        }
        Commands::Assign => print_reply(&api::trigger_assignment(&open_db(&db_path)?)),
        Commands::Today => print_reply(&api::get_word_for_today(&open_db(&db_path)?)),
        Commands::Date { date } => print_reply(&api::get_word_for_date(&open_db(&db_path)?, &date)),
        Commands::Recent { limit } => print_reply(&api::get_recent_words(&open_db(&db_path)?, limit)),
        Commands::Range { from, to } => {
            print_reply(&api::get_words_in_range(&open_db(&db_path)?, &from, &to))
        }
    }
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_DB_FILE)
}

fn load_words(conn: &mut Connection, file: &Path) -> Result<usize, Box<dyn Error>> {
    let contents = std::fs::read_to_string(file)?;

    let tx = conn.transaction()?;
    let mut loaded = 0usize;
    {
        let repo = SqliteWordRepository::try_new(&tx)?;
        for line in contents.lines() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            repo.insert_word(word)?;
            loaded += 1;
        }
    }
    tx.commit()?;

    info!("event=word_load module=cli status=ok count={loaded}");
    Ok(loaded)
}

fn print_reply<T: Serialize>(reply: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string(reply)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_words, resolve_db_path, DB_PATH_ENV_VAR, DEFAULT_DB_FILE};
    use dailyword_core::db::open_db_in_memory;
    use dailyword_core::{SqliteWordRepository, WordRepository};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn explicit_db_path_flag_wins() {
        let resolved = resolve_db_path(Some(PathBuf::from("/tmp/custom.sqlite3")));
        assert_eq!(resolved, PathBuf::from("/tmp/custom.sqlite3"));
    }

    #[test]
    fn default_db_path_is_working_directory_file() {
        if std::env::var(DB_PATH_ENV_VAR).is_ok() {
            return;
        }
        let resolved = resolve_db_path(None);
        assert_eq!(resolved, PathBuf::from(DEFAULT_DB_FILE));
    }

    #[test]
    fn load_words_skips_blank_lines_and_counts_inserts() {
        let mut conn = open_db_in_memory().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  beta  ").unwrap();
        writeln!(file, "alpha").unwrap();

        let loaded = load_words(&mut conn, file.path()).unwrap();
        assert_eq!(loaded, 3);

        let repo = SqliteWordRepository::try_new(&conn).unwrap();
        let pool_entry = repo.find_unassigned_random().unwrap().unwrap();
        assert!(pool_entry.text == "alpha" || pool_entry.text == "beta");
    }
}
