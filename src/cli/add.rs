//! tasker add command implementation

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::TaskStore;
use crate::task::Task;

/// Options for `tasker add`
pub struct AddOptions {
    pub name: Option<String>,
    pub store: TaskStore,
    pub output: OutputOptions,
}

pub fn run(options: AddOptions) -> Result<()> {
    // Whitespace-only names are rejected, but the name is stored as given.
    let title = options.name.as_deref().unwrap_or_default();
    if title.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "task name cannot be empty".to_string(),
        ));
    }

    let task: Task = options.store.add(title)?;

    let mut human = HumanOutput::new("Task added");
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Title", task.title.clone());

    emit_success(options.output, "add", &task, Some(&human))
}
