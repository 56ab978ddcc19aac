mod app;
mod config;
mod domain;
mod input;
mod logging;
mod persistence;
mod store;
mod theme;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{check_mark, empty_message, Filter, Task};
use persistence::{ensure_dir, init_local_data_dir, FileStore, MemoryStore, Storage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use store::{IdMatch, TaskStore};
use theme::{system_signal, ThemePreference};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A small terminal task list with persistent state and a light/dark theme", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .tally directory, then ~/.tally
    #[arg(long, env = "TALLY_DIR", global = true)]
    dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "tally=trace"
    #[arg(long, env = "TALLY_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tally directory in the current directory
    Init,
    #[command(flatten)]
    Task(TaskCommand),
}

/// Commands that read or write the data directory
#[derive(Subcommand)]
enum TaskCommand {
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Which tasks to show: all, active or completed
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: Filter,
    },
    /// Toggle completion of a task by id (or unique id prefix)
    Toggle { id: String },
    /// Delete a task by id (or unique id prefix)
    Delete { id: String },
    /// Remove all completed tasks
    ClearCompleted,
    /// Show the current theme, or toggle it
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

fn parse_filter(value: &str) -> Result<Filter, String> {
    Filter::from_name(value)
        .ok_or_else(|| format!("unknown filter '{}', expected all, active or completed", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init must not create the default data directory as a side effect
    let command = match cli.command {
        Some(Commands::Init) => return init_here(),
        Some(Commands::Task(command)) => Some(command),
        None => None,
    };

    let config = match Config::resolve(cli.dir, cli.log_level) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Warning: no data directory ({:#}), state will not persist", e);
            None
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = config.as_ref().and_then(|config| {
        match logging::init_logging(&config.log_dir(), &config.log_filter) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled: {:#}", e);
                None
            }
        }
    });

    let storage = open_storage(config.as_ref().map(|config| config.data_dir.as_path()));

    match command {
        None => run_tui(storage),
        Some(command) => run_command(command, storage),
    }
}

/// Create a local .tally directory in the current directory
fn init_here() -> Result<()> {
    let current_dir = std::env::current_dir().context("Could not determine current directory")?;
    let data_dir = init_local_data_dir(&current_dir)?;
    println!("Initialized tally directory: {}", data_dir.display());
    println!();
    println!("Tally will now use this local directory for task storage.");
    println!("Run 'tally' to start.");
    Ok(())
}

/// Use the data directory when it can be created, otherwise keep state in memory for this session
fn open_storage(data_dir: Option<&Path>) -> Storage {
    let Some(data_dir) = data_dir else {
        warn!("no data directory, state will not persist");
        return Storage::Memory(MemoryStore::new());
    };

    match ensure_dir(data_dir) {
        Ok(()) => {
            info!(data_dir = %data_dir.display(), "using data directory");
            Storage::File(FileStore::new(data_dir))
        }
        Err(e) => {
            let error = format!("{:#}", e);
            warn!(error = %error, "data directory unavailable, state will not persist");
            Storage::Memory(MemoryStore::new())
        }
    }
}

fn open_store(storage: Storage) -> TaskStore<Storage> {
    let mut store = TaskStore::new(storage);
    store.initialize();
    store
}

/// Format one task for the plain-text listing
fn task_line(task: &Task) -> String {
    format!(
        "{}  {} {}  (Created: {})",
        task.short_id(),
        check_mark(task.completed),
        task.text,
        task.created_at
    )
}

/// Resolve an id argument, printing why when it does not name exactly one task
fn resolve_id(store: &TaskStore<Storage>, id: &str) -> Result<Option<String>> {
    match store.find_by_prefix(id) {
        IdMatch::Unique(task) => Ok(Some(task.id.clone())),
        IdMatch::None => {
            println!("No task matching '{}'", id);
            Ok(None)
        }
        IdMatch::Ambiguous(count) => {
            anyhow::bail!("'{}' matches {} tasks, use a longer id", id, count)
        }
    }
}

fn run_command(command: TaskCommand, storage: Storage) -> Result<()> {
    match command {
        TaskCommand::Add { text } => {
            let mut store = open_store(storage);
            let before = store.counts().total;
            let snapshot = store.add(&text.join(" "));
            if snapshot.counts.total > before {
                if let Some(task) = store.tasks().first() {
                    println!("Added {}", task_line(task));
                }
            } else {
                println!("Ignored empty task");
            }
        }
        TaskCommand::List { filter } => {
            let mut store = open_store(storage);
            let snapshot = store.set_filter(filter);
            if snapshot.tasks.is_empty() {
                println!("{}", empty_message(snapshot.counts.total, filter));
            }
            for task in &snapshot.tasks {
                println!("{}", task_line(task));
            }
            println!();
            println!(
                "Total: {}  Active: {}  Completed: {}",
                snapshot.counts.total, snapshot.counts.active, snapshot.counts.completed
            );
        }
        TaskCommand::Toggle { id } => {
            let mut store = open_store(storage);
            if let Some(id) = resolve_id(&store, &id)? {
                store.toggle(&id);
                if let Some(task) = store.get(&id) {
                    println!("{}", task_line(task));
                }
            }
        }
        TaskCommand::Delete { id } => {
            let mut store = open_store(storage);
            if let Some(id) = resolve_id(&store, &id)? {
                store.delete(&id);
                println!("Deleted {}", id);
            }
        }
        TaskCommand::ClearCompleted => {
            let mut store = open_store(storage);
            let removed = store.counts().completed;
            store.clear_completed();
            println!("Removed {} completed task(s)", removed);
        }
        TaskCommand::Theme { action } => {
            let mut preference = ThemePreference::new(storage, system_signal(io::stdout().is_terminal()));
            preference.resolve_initial(&mut ());
            if let Some(ThemeAction::Toggle) = action {
                if !preference.is_resolved() {
                    println!("Theme not resolved yet (no saved theme and no terminal to ask); keeping light");
                }
                preference.toggle(&mut ());
            }
            println!("{}", preference.get().as_str());
        }
    }
    Ok(())
}

fn run_tui(storage: Storage) -> Result<()> {
    // Resolve the theme before the alternate screen hides stdout's terminal state
    let mut app = AppState::new(storage, system_signal(io::stdout().is_terminal()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(error = %err, "ui loop exited with error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_interval = ticker::poll_interval();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::KeyValueStore;

    #[test]
    fn test_open_storage_uses_data_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join(".tally");

        let storage = open_storage(Some(&data_dir));
        assert!(matches!(storage, Storage::File(_)));
        assert!(data_dir.is_dir());
    }

    #[test]
    fn test_open_storage_falls_back_to_memory() {
        let storage = open_storage(None);
        assert!(matches!(storage, Storage::Memory(_)));
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));

        // A regular file where the directory should be
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let storage = open_storage(Some(&blocker.join(".tally")));
        assert!(matches!(storage, Storage::Memory(_)));
    }

    #[test]
    fn test_init_is_parsed_apart_from_task_commands() {
        let cli = Cli::try_parse_from(["tally", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));

        let cli = Cli::try_parse_from(["tally", "add", "Buy", "milk"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Task(TaskCommand::Add { ref text })) if text.join(" ") == "Buy milk"
        ));

        let cli = Cli::try_parse_from(["tally", "list", "--filter", "done"]);
        assert!(cli.is_err());
    }
}
