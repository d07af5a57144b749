//! tasker list command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::TaskStore;
use crate::task::{Task, TaskFilter};

/// Options for `tasker list`
pub struct ListOptions {
    pub filter: TaskFilter,
    pub store: TaskStore,
    pub output: OutputOptions,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    filter: TaskFilter,
    tasks: Vec<Task>,
}

pub fn run(options: ListOptions) -> Result<()> {
    let tasks = options.store.list_filtered(options.filter)?;

    let human = if tasks.is_empty() {
        HumanOutput::new("No tasks found.")
    } else {
        let mut human = HumanOutput::new("Tasks:");
        for task in &tasks {
            human.push_line(task.display_line());
        }
        human
    };

    let output = TaskListOutput {
        total: tasks.len(),
        filter: options.filter,
        tasks,
    };

    emit_success(options.output, "list", &output, Some(&human))
}
