//! Task store for tasker
//!
//! The store is a single JSON file holding an array of tasks in insertion
//! order. Every operation reads the whole file, changes it in memory and
//! writes the whole file back:
//!
//! ```text
//! tasks.json        # [{"id": 5381, "title": ..., "CreatedAt": ..., "status": false}, ...]
//! tasks.json.lock   # advisory lock held for the duration of each operation
//! ```
//!
//! Writes go through a temp file + rename, so a crash never leaves a
//! truncated store behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::{next_task_id, Task, TaskFilter};

/// Read every task from `path`.
///
/// Fails with `Error::Io` when the file can't be read and `Error::Format`
/// when it isn't a JSON array of tasks. A `null` document reads as empty.
pub fn load_all(path: &Path) -> Result<Vec<Task>> {
    let content = fs::read_to_string(path)?;
    let tasks: Option<Vec<Task>> = serde_json::from_str(&content)?;
    let tasks = tasks.unwrap_or_default();
    tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// Replace the contents of `path` with `tasks`.
pub fn save_all(path: &Path, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks)?;
    lock::write_atomic(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "saved tasks");
    Ok(())
}

/// Outcome of [`TaskStore::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// Task store bound to one file
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    lock_timeout_ms: u64,
    create_missing: bool,
}

impl TaskStore {
    /// Store at `path` with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            create_missing: false,
        }
    }

    /// Store at `path` using the lock and missing-file settings from `config`
    pub fn from_config(path: impl Into<PathBuf>, config: &StoreConfig) -> Self {
        Self::new(path)
            .with_lock_timeout(config.lock_timeout_ms)
            .with_create_missing(config.create_missing)
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    /// Read a missing store file as an empty task list instead of failing
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store file with an empty task list if it doesn't exist.
    pub fn init(&self) -> Result<InitOutcome> {
        self.locked(|| {
            if self.path.exists() {
                return Ok(InitOutcome::AlreadyExists);
            }
            save_all(&self.path, &[])?;
            tracing::info!(path = %self.path.display(), "initialized task store");
            Ok(InitOutcome::Created)
        })
    }

    /// Append a task titled `title` and return it.
    ///
    /// The title is stored as given; rejecting empty titles is up to the
    /// caller.
    pub fn add(&self, title: &str) -> Result<Task> {
        self.locked(|| {
            let mut tasks = self.read()?;
            let id = next_task_id(&tasks);
            if tasks.iter().any(|task| task.id == id) {
                tracing::warn!(
                    id,
                    path = %self.path.display(),
                    "assigned task id collides with an existing task"
                );
            }

            let task = Task::new(id, title);
            tasks.push(task.clone());
            save_all(&self.path, &tasks)?;
            tracing::info!(id, title = %task.title, "task added");
            Ok(task)
        })
    }

    /// All tasks in file order.
    pub fn list(&self) -> Result<Vec<Task>> {
        self.locked(|| self.read())
    }

    /// Tasks matching `filter`, in file order.
    pub fn list_filtered(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        Ok(filter.apply(self.list()?))
    }

    /// Mark the first task with `id` as completed and return it.
    ///
    /// Fails with `Error::TaskNotFound` without touching the file when no
    /// task matches.
    pub fn complete(&self, id: i64) -> Result<Task> {
        self.locked(|| {
            let mut tasks = self.read()?;
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or(Error::TaskNotFound(id))?;
            task.completed = true;
            let completed = task.clone();

            save_all(&self.path, &tasks)?;
            tracing::info!(id, "task completed");
            Ok(completed)
        })
    }

    fn read(&self) -> Result<Vec<Task>> {
        match load_all(&self.path) {
            Err(err) if self.create_missing && err.is_missing_file() => {
                tracing::debug!(path = %self.path.display(), "store missing, starting empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn locked<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        lock::with_lock(&self.path, self.lock_timeout_ms, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{lock_path_for, FileLock};
    use crate::task::ID_BASE;
    use tempfile::TempDir;

    fn empty_store() -> (TempDir, TaskStore) {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[]").expect("seed store");
        (dir, TaskStore::new(path))
    }

    #[test]
    fn add_to_empty_store_uses_base_id() {
        let (_dir, store) = empty_store();

        let task = store.add("Buy milk").unwrap();
        assert_eq!(task.id, ID_BASE);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);

        let tasks = load_all(store.path()).unwrap();
        assert_eq!(tasks, vec![task]);
    }

    #[test]
    fn add_appends_with_count_based_id() {
        let (_dir, store) = empty_store();
        for title in ["a", "b", "c"] {
            store.add(title).unwrap();
        }

        let task = store.add("d").unwrap();
        assert_eq!(task.id, 3 + ID_BASE);

        let tasks = store.list().unwrap();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks.last().unwrap().title, "d");
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn add_does_not_validate_title() {
        let (_dir, store) = empty_store();
        let task = store.add("").unwrap();
        assert_eq!(task.title, "");
    }

    #[test]
    fn add_keeps_count_policy_on_collision() {
        let (_dir, store) = empty_store();
        let mut seeded = Task::new(ID_BASE + 1, "hand-edited");
        seeded.completed = true;
        save_all(store.path(), &[seeded]).unwrap();

        let task = store.add("new").unwrap();
        assert_eq!(task.id, ID_BASE + 1);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn complete_marks_only_matching_task() {
        let (_dir, store) = empty_store();
        let first = store.add("one").unwrap();
        let second = store.add("two").unwrap();

        let done = store.complete(second.id).unwrap();
        assert!(done.completed);

        let tasks = store.list().unwrap();
        assert_eq!(tasks[0], first);
        assert!(tasks[1].completed);
        assert_eq!(tasks[1].created_at, second.created_at);
    }

    #[test]
    fn complete_unknown_id_leaves_file_untouched() {
        let (_dir, store) = empty_store();
        store.add("one").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.complete(9999).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(9999)));

        let after = fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn complete_affects_first_duplicate_only() {
        let (_dir, store) = empty_store();
        let a = Task::new(7, "first");
        let b = Task::new(7, "second");
        save_all(store.path(), &[a, b]).unwrap();

        store.complete(7).unwrap();
        let tasks = store.list().unwrap();
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
    }

    #[test]
    fn missing_store_is_io_error_by_default() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("absent.json"));

        let err = store.list().unwrap_err();
        assert!(err.is_missing_file());
        assert!(!store.path().exists());
    }

    #[test]
    fn create_missing_treats_absent_file_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("absent.json")).with_create_missing(true);

        assert!(store.list().unwrap().is_empty());
        let task = store.add("first").unwrap();
        assert_eq!(task.id, ID_BASE);
        assert!(store.path().exists());
    }

    #[test]
    fn malformed_store_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{not json").unwrap();

        let err = TaskStore::new(&path).add("x").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn empty_file_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "").unwrap();

        assert!(matches!(load_all(&path), Err(Error::Format(_))));
    }

    #[test]
    fn null_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "null").unwrap();

        assert!(load_all(&path).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_file_content() {
        let (_dir, store) = empty_store();
        store.add("one").unwrap();
        store.add("two").unwrap();
        store.complete(ID_BASE).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let tasks = load_all(store.path()).unwrap();
        save_all(store.path(), &tasks).unwrap();

        let after = fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn save_writes_indented_array_without_trailing_newline() {
        let (_dir, store) = empty_store();
        store.add("one").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": 5381,"));
        assert!(content.ends_with(']'));
    }

    #[test]
    fn init_creates_empty_store_once() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        assert_eq!(store.init().unwrap(), InitOutcome::Created);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");

        store.add("keep me").unwrap();
        assert_eq!(store.init().unwrap(), InitOutcome::AlreadyExists);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn list_filtered_selects_by_status() {
        let (_dir, store) = empty_store();
        store.add("one").unwrap();
        store.add("two").unwrap();
        store.complete(ID_BASE + 1).unwrap();

        let pending = store.list_filtered(TaskFilter::Pending).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "one");

        let completed = store.list_filtered(TaskFilter::Completed).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "two");
    }

    #[test]
    fn held_lock_times_out_operations() {
        let (_dir, store) = empty_store();
        let store = store.with_lock_timeout(50);
        let _held = FileLock::acquire(lock_path_for(store.path()), 1000).unwrap();

        let err = store.add("blocked").unwrap_err();
        assert!(matches!(err, Error::LockFailed(_)));
        assert!(load_all(store.path()).unwrap().is_empty());
    }
}
