//! tasker - task tracker library
//!
//! Keeps an ordered list of tasks in a single JSON file. Every operation
//! reads the whole file, changes it in memory and writes it back.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.tasker.toml`
//! - `error`: Error types and result aliases
//! - `lock`: File locking and atomic writes
//! - `output`: Human and JSON output for commands
//! - `storage`: The task store (load, save, add, list, complete)
//! - `task`: The task model and its on-disk field names

pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod output;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
pub use storage::{load_all, save_all, TaskStore};
pub use task::Task;
