//! Command-line front-end.
//!
//! Without a subcommand, reads lines from stdin and treats each one as a
//! launcher interaction:
//!
//! | Line          | Effect                                        |
//! |---------------|-----------------------------------------------|
//! | `?text`       | list candidates for `text`                    |
//! | `/r query`    | reverse search through recent commands        |
//! | `..`          | parent directory of the current text          |
//! | `/down`       | undo the last `..`                            |
//! | `!text`       | run `text` inside the terminal handler        |
//! | anything else | run it                                        |

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use drun::app::Session;
use drun::config::{self, labels};
use drun::core::{HistoryStore, LaunchContext, Launcher, PathIndex};
use drun::models::{PlatformKind, PlatformProfile};

#[derive(Parser, Debug)]
#[command(name = "drun")]
#[command(version)]
#[command(about = "Run dialog with ranked history, typo-tolerant completion and handler dispatch")]
pub struct Cli {
    /// History file (default: <cache dir>/drun/history)
    #[arg(long, global = true, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Handler config file (default: <config dir>/drun/rc)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Platform rules for paths, escaping and default handlers
    #[arg(long, global = true, value_name = "windows|posix")]
    pub platform: Option<PlatformKind>,

    /// File or directory handed to the launched command (repeatable)
    #[arg(long = "with", global = true, value_name = "PATH")]
    pub with: Vec<PathBuf>,

    /// Print invocations instead of launching them
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,

    /// Keep prompting after a successful launch
    #[arg(long, default_value_t = false)]
    pub resident: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completion candidates for TEXT
    Complete {
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print the most recent command matching QUERY
    Reverse { query: String },
    /// Print TEXT with its last path stepped up one directory
    Parent { text: String },
    /// Resolve, launch and record TEXT
    Run {
        /// Run inside the terminal handler
        #[arg(short, long)]
        terminal: bool,
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Remove TEXT from the history
    Forget { text: String },
    /// Print the ranked history table
    History {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the session described by the global options.
pub fn build_session(cli: &Cli) -> Session {
    let profile = cli
        .platform
        .map(PlatformProfile::from)
        .unwrap_or_else(PlatformProfile::current);
    let history_file = cli
        .history_file
        .clone()
        .unwrap_or_else(config::default_history_file);
    let config_file = cli
        .config_file
        .clone()
        .unwrap_or_else(config::default_config_file);

    let launcher = Launcher::new(&profile).dry_run(cli.dry_run);
    Session::new(
        HistoryStore::load(history_file),
        PathIndex::from_env(profile),
        config_file,
        config::home_dir(),
    )
    .with_context(LaunchContext::from_paths(cli.with.as_slice()))
    .with_launcher(launcher)
}

pub fn run(cli: Cli) -> ExitCode {
    let mut session = build_session(&cli);

    match cli.command {
        None => prompt_loop(&mut session, cli.resident, cli.dry_run),
        Some(Commands::Complete { text, json }) => {
            let candidates = session.produce_candidates(&text);
            if json {
                print_json(&candidates)
            } else {
                candidates.iter().for_each(|candidate| println!("{}", candidate));
                ExitCode::SUCCESS
            }
        }
        Some(Commands::Reverse { query }) => match session.reverse_search(&query) {
            Some(found) => {
                println!("{}", found);
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
        Some(Commands::Parent { text }) => {
            println!("{}", session.parent_directory(&text));
            ExitCode::SUCCESS
        }
        Some(Commands::Run { terminal, text }) => {
            if activate(&mut session, &text, terminal, cli.dry_run) {
                wait_for_launch();
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Some(Commands::Forget { text }) => {
            session.delete_candidate(&text);
            ExitCode::SUCCESS
        }
        Some(Commands::History { json }) => {
            let entries = session.history().entries();
            if json {
                print_json(entries)
            } else {
                entries.iter().for_each(|entry| println!("{}", entry));
                ExitCode::SUCCESS
            }
        }
    }
}

/// Interactive stdin loop. Ends on EOF, or after the first successful
/// launch unless `resident`.
fn prompt_loop(session: &mut Session, resident: bool, dry_run: bool) -> ExitCode {
    let stdin = io::stdin();
    let mut current = String::new();

    prompt(session);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!("cannot read input: {}", err);
                break;
            }
        };

        if let Some(text) = line.strip_prefix('?') {
            current = text.to_string();
            session.produce_candidates(text).iter().for_each(|c| println!("{}", c));
        } else if let Some(query) = line.strip_prefix("/r ") {
            let found = session.reverse_search(query);
            eprintln!("{}", session.prompt_label());
            if let Some(found) = found {
                println!("{}", found);
                current = found;
            }
            session.reverse_search_end();
        } else if line == ".." {
            current = session.parent_directory(&current);
            println!("{}", current);
        } else if line == "/down" {
            if let Some(child) = session.child_directory(&current) {
                current = child;
            }
            println!("{}", current);
        } else if !line.trim().is_empty() {
            let (text, terminal) = match line.strip_prefix('!') {
                Some(text) => (text, true),
                None => (line.as_str(), false),
            };
            session.apply_choice(text);
            if activate(session, text, terminal, dry_run) && !resident {
                wait_for_launch();
                return ExitCode::SUCCESS;
            }
        }
        prompt(session);
    }

    ExitCode::SUCCESS
}

fn activate(session: &mut Session, text: &str, terminal: bool, dry_run: bool) -> bool {
    if !session.activate(text, terminal) {
        eprintln!("{}", labels::NOT_FOUND);
        return false;
    }
    if dry_run && let Some(invocation) = session.last_invocation() {
        println!("{}", invocation.command);
    }
    true
}

fn prompt(session: &Session) {
    eprint!("{} ", session.prompt_label());
    let _ = io::stderr().flush();
}

/// Give the detached launch a moment before the process exits.
fn wait_for_launch() {
    std::thread::sleep(std::time::Duration::from_millis(config::LAUNCH_DELAY_MS * 5));
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::warn!("cannot encode output: {}", err);
            ExitCode::FAILURE
        }
    }
}
