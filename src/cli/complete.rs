//! tasker complete command implementation

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::TaskStore;

/// Options for `tasker complete`
pub struct CompleteOptions {
    pub id: i64,
    pub store: TaskStore,
    pub output: OutputOptions,
}

pub fn run(options: CompleteOptions) -> Result<()> {
    let task = options.store.complete(options.id)?;

    let mut human = HumanOutput::new(format!("Task {} marked as completed.", task.id));
    human.push_summary("Title", task.title.clone());

    emit_success(options.output, "complete", &task, Some(&human))
}
