use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod context;
mod flow;
mod nav;
mod ops;
mod prompt;
mod render;
mod state;
mod steps;

use flow::App;
use prompt::Console;
use roster_core::store::RosterStore;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Interactive roster manager for trivia teams")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the roster database
    #[arg(long, global = true, default_value = "roster.sqlite")]
    db: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive flow (the default)
    Run,
    /// Rebuild the database with sample teams and participants
    Seed,
    /// Dump teams and their rosters as JSON
    Export,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&cli.db),
        Commands::Seed => cmd_seed(&cli.db),
        Commands::Export => cmd_export(&cli.db),
    };

    std::process::exit(exit_code);
}

fn open_store(db: &Path) -> Option<RosterStore> {
    match RosterStore::open(db) {
        Ok(store) => Some(store),
        Err(err) => {
            eprintln!("Failed to open {}: {}", db.display(), err);
            None
        }
    }
}

fn cmd_run(db: &Path) -> i32 {
    let Some(store) = open_store(db) else { return 1 };
    let free_agent_team = match store.free_agent_team() {
        Ok(team) => team,
        Err(err) => {
            eprintln!("Failed to load the free-agent pool: {}", err);
            return 1;
        }
    };

    let init = state::initial_state(free_agent_team);
    let mut app = App {
        ctx: context::StepContext::new(steps::select_team, init),
        store,
        console: Console::interactive(),
    };
    flow::run(&mut app);
    0
}

fn cmd_seed(db: &Path) -> i32 {
    let Some(mut store) = open_store(db) else { return 1 };
    match store.seed() {
        Ok((teams, participants)) => {
            println!("Seeded {} teams and {} participants", teams, participants);
            0
        }
        Err(err) => {
            eprintln!("Seed failed: {}", err);
            1
        }
    }
}

fn cmd_export(db: &Path) -> i32 {
    let Some(store) = open_store(db) else { return 1 };
    match export_entries(&store) {
        Ok(entries) => {
            println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            0
        }
        Err(err) => {
            eprintln!("Export failed: {}", err);
            1
        }
    }
}

fn export_entries(store: &RosterStore) -> rusqlite::Result<Vec<serde_json::Value>> {
    let mut entries = Vec::new();
    for team in store.teams()? {
        let roster = store.roster_of(team.id)?;
        entries.push(serde_json::json!({ "team": team, "roster": roster }));
    }
    Ok(entries)
}
