//! Task runner
//!
//! Runs a requested task after its declared dependencies, wrapped in the
//! registry's lifecycle hooks.
//!
//! Dependency resolution is one level deep: only the dependencies listed on the
//! requested task run, in declaration order, and a task that runs as a
//! dependency does not run its own dependencies. Names that are not registered
//! are skipped without error, and requesting an unregistered task is a silent
//! no-op.

use crate::execution::output::Reporter;
use crate::tasks::{run_hooks, Task, Tasks};
use crate::types::{ChoreError, ChoreResult};

/// Sequential runner over a fully initialized registry
pub struct TaskRunner<'t, 'w, C> {
    tasks: &'t Tasks<C>,
    context: &'t C,
    reporter: Reporter<'w>,
}

impl<'t, 'w, C> TaskRunner<'t, 'w, C> {
    pub fn new(tasks: &'t Tasks<C>, context: &'t C, reporter: Reporter<'w>) -> Self {
        Self {
            tasks,
            context,
            reporter,
        }
    }

    /// Run `name` after its dependencies.
    ///
    /// Before-all hooks run once the task is known to exist. After-all hooks
    /// run on every path past that point, including failures; the error
    /// returned is the first action failure.
    pub fn run_task_and_dependencies(&mut self, name: &str) -> ChoreResult<()> {
        let tasks = self.tasks;
        let Some(task) = tasks.get(name) else {
            tracing::debug!(task = name, "requested task is not registered, nothing to run");
            return Ok(());
        };

        let hooks = tasks.hooks();
        tracing::debug!(task = name, hooks = hooks.before_all.len(), "running before-all hooks");
        run_hooks(&hooks.before_all, self.context);

        let result = self.run_chain(task);

        tracing::debug!(task = name, hooks = hooks.after_all.len(), "running after-all hooks");
        run_hooks(&hooks.after_all, self.context);

        result
    }

    fn run_chain(&mut self, task: &Task<C>) -> ChoreResult<()> {
        let tasks = self.tasks;
        for dependency in task.dependencies() {
            match tasks.get(dependency) {
                Some(dependency) => self.run_single(dependency)?,
                None => tracing::debug!(
                    task = task.name(),
                    dependency = dependency.as_str(),
                    "dependency is not registered, skipping"
                ),
            }
        }

        self.run_single(task)
    }

    /// Announce, then run `task` between the per-task hooks. A task whose
    /// announcement cannot be written runs no hooks at all, so before-each
    /// is never left without its after-each.
    fn run_single(&mut self, task: &Task<C>) -> ChoreResult<()> {
        let hooks = self.tasks.hooks();
        let context = self.context;
        self.reporter.running(task.name())?;

        run_hooks(&hooks.before_each, context);
        tracing::debug!(task = task.name(), "task started");
        let outcome = task.perform(context);

        run_hooks(&hooks.after_each, context);

        match outcome {
            Ok(()) => {
                tracing::debug!(task = task.name(), "task finished");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(task = task.name(), error = %error, "task failed");
                Err(ChoreError::Execution {
                    task: task.name().to_string(),
                    error,
                })
            }
        }
    }
}
