// SPDX-License-Identifier: Apache-2.0

//! Admin CLI over the phonebook store. Lists entries or adds one
//! directly, without going through the HTTP server.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use phonebook_model::PersonDraft;
use phonebook_store::{PersonStore, SqliteStore};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "phonebook.sqlite";

#[derive(Debug, Parser)]
#[command(name = "phonebook", about = "Inspect and edit the phonebook store")]
struct Cli {
    /// SQLite database file (falls back to PHONEBOOK_DB_PATH).
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every entry, one "name number" line per person (the default).
    List,
    /// Validate and add one entry.
    Add { name: String, number: String },
}

fn db_path(cli_db: Option<PathBuf>) -> PathBuf {
    cli_db
        .or_else(|| std::env::var("PHONEBOOK_DB_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

async fn run_list(store: &dyn PersonStore) -> Result<String, String> {
    let persons = store.list().await.map_err(|e| e.to_string())?;
    let mut out = String::from("Phonebook:");
    for person in &persons {
        out.push_str(&format!("\n{} {}", person.name, person.number));
    }
    Ok(out)
}

async fn run_add(store: &dyn PersonStore, name: &str, number: &str) -> Result<String, String> {
    let draft = PersonDraft::parse(name, number).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    store.insert(draft).await.map_err(|e| e.to_string())?;
    Ok("person saved!".to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let path = db_path(cli.db);
    let store = match SqliteStore::open(&path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("cannot open store at {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Command::List) {
        Command::List => run_list(&store).await,
        Command::Add { name, number } => run_add(&store, &name, &number).await,
    };
    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
