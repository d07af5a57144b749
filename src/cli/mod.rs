//! Command-line interface for tasker
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::storage::TaskStore;
use crate::task::TaskFilter;

mod add;
mod complete;
mod init;
mod list;

/// tasker - a small task tracker
///
/// Keeps a list of tasks in a JSON file (`tasks.json` by default) and lets
/// you add, list and complete them.
#[derive(Parser, Debug)]
#[command(name = "tasker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Task store file (defaults to store.path from config, then tasks.json)
    #[arg(long, global = true, env = "TASKER_FILE")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to ./.tasker.toml when present)
    #[arg(long, global = true, env = "TASKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (when RUST_LOG is not set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        #[arg(long, short = 'n', visible_alias = "title")]
        name: Option<String>,
    },

    /// List tasks
    List {
        /// Only show tasks that are not completed
        #[arg(long, conflicts_with = "completed")]
        pending: bool,

        /// Only show completed tasks
        #[arg(long)]
        completed: bool,
    },

    /// Mark a task as completed
    Complete {
        /// ID of the task to complete
        id: i64,
    },

    /// Create an empty task store
    Init {
        /// Also write a .tasker.toml with the effective store settings
        #[arg(long)]
        write_config: bool,
    },
}

/// Store location and settings resolved from CLI flags and config
pub(crate) struct StoreContext {
    pub store: TaskStore,
    pub config: Config,
    /// Where `.tasker.toml` lives (or would live)
    pub config_path: PathBuf,
}

impl StoreContext {
    /// Resolve the store from `--config`/`--file` and `.tasker.toml`.
    ///
    /// An explicit config path must load; the implicit one falls back to
    /// defaults.
    pub fn resolve(file: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = match config {
            Some(path) => (Config::load(path)?, path.to_path_buf()),
            None => (
                Config::load_from_dir(&cwd),
                cwd.join(crate::config::CONFIG_FILE),
            ),
        };

        let base = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd,
        };
        let store_path = match file {
            Some(path) => path.to_path_buf(),
            None => config.store.resolve_path(&base),
        };
        tracing::debug!(
            store = %store_path.display(),
            config = %config_path.display(),
            "resolved task store"
        );

        Ok(Self {
            store: TaskStore::from_config(store_path, &config.store),
            config,
            config_path,
        })
    }
}

impl Cli {
    fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = self.output();
        let ctx = StoreContext::resolve(self.file.as_deref(), self.config.as_deref())?;

        match self.command {
            Commands::Add { name } => add::run(add::AddOptions {
                name,
                store: ctx.store,
                output,
            }),
            Commands::List { pending, completed } => {
                let filter = if pending {
                    TaskFilter::Pending
                } else if completed {
                    TaskFilter::Completed
                } else {
                    TaskFilter::All
                };
                list::run(list::ListOptions {
                    filter,
                    store: ctx.store,
                    output,
                })
            }
            Commands::Complete { id } => complete::run(complete::CompleteOptions {
                id,
                store: ctx.store,
                output,
            }),
            Commands::Init { write_config } => init::run(init::InitOptions {
                write_config,
                ctx,
                output,
            }),
        }
    }
}
