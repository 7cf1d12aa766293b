//! Task definitions and the task registry
//!
//! A [`Tasks`] registry is filled once per invocation by the caller's
//! initializer and is read-only afterwards. Tasks are keyed by name; the
//! registry keeps registration order so listings are stable.

use crate::utils::Utils;

/// Work performed by a task, given the shared utility context
pub type Action<C> = Box<dyn Fn(&C) -> anyhow::Result<()>>;

/// Lifecycle callback
pub type Hook<C> = Box<dyn Fn(&C)>;

/// A named, described unit of work with a flat dependency list
pub struct Task<C = Utils> {
    name: String,
    description: String,
    dependencies: Vec<String>,
    action: Action<C>,
}

impl<C> Task<C> {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, action: F) -> Self
    where
        F: Fn(&C) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            dependencies: Vec::new(),
            action: Box::new(action),
        }
    }

    /// Declare the tasks to run before this one. Names are resolved at run time,
    /// so they may refer to tasks registered later.
    #[must_use]
    pub fn depends_on<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn perform(&self, context: &C) -> anyhow::Result<()> {
        (self.action)(context)
    }
}

impl<C> std::fmt::Debug for Task<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Hook lists, each run in registration order
pub struct Hooks<C = Utils> {
    pub(crate) before_all: Vec<Hook<C>>,
    pub(crate) after_all: Vec<Hook<C>>,
    pub(crate) before_each: Vec<Hook<C>>,
    pub(crate) after_each: Vec<Hook<C>>,
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self {
            before_all: Vec::new(),
            after_all: Vec::new(),
            before_each: Vec::new(),
            after_each: Vec::new(),
        }
    }
}

pub(crate) fn run_hooks<C>(hooks: &[Hook<C>], context: &C) {
    for hook in hooks {
        hook(context);
    }
}

/// Registry of tasks and lifecycle hooks for one invocation
pub struct Tasks<C = Utils> {
    tasks: Vec<Task<C>>,
    hooks: Hooks<C>,
}

impl<C> Default for Tasks<C> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            hooks: Hooks::default(),
        }
    }
}

impl<C> Tasks<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task from its parts
    pub fn task<I, S, F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        dependencies: I,
        action: F,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&C) -> anyhow::Result<()> + 'static,
    {
        self.add(Task::new(name, description, action).depends_on(dependencies));
    }

    /// Register a prepared task. A task with the same name replaces the earlier
    /// registration in place.
    pub fn add(&mut self, task: Task<C>) {
        match self.tasks.iter_mut().find(|t| t.name == task.name) {
            Some(existing) => {
                tracing::debug!(task = %task.name, "replacing previously registered task");
                *existing = task;
            }
            None => self.tasks.push(task),
        }
    }

    pub fn before_all<F>(&mut self, hook: F)
    where
        F: Fn(&C) + 'static,
    {
        self.hooks.before_all.push(Box::new(hook));
    }

    pub fn after_all<F>(&mut self, hook: F)
    where
        F: Fn(&C) + 'static,
    {
        self.hooks.after_all.push(Box::new(hook));
    }

    pub fn before_each<F>(&mut self, hook: F)
    where
        F: Fn(&C) + 'static,
    {
        self.hooks.before_each.push(Box::new(hook));
    }

    pub fn after_each<F>(&mut self, hook: F)
    where
        F: Fn(&C) + 'static,
    {
        self.hooks.after_each.push(Box::new(hook));
    }

    pub fn get(&self, name: &str) -> Option<&Task<C>> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Tasks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Task<C>> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn hooks(&self) -> &Hooks<C> {
        &self.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn noop(_: &()) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn test_duplicate_name_overwrites_in_place() {
        let mut tasks: Tasks<()> = Tasks::new();
        tasks.task("build", "Old build", Vec::<String>::new(), noop);
        tasks.task("test", "Run tests", ["build"], noop);
        tasks.task("build", "New build", ["fmt"], noop);

        assert_eq!(tasks.len(), 2);
        let build = tasks.get("build").expect("build should be registered");
        assert_eq!(build.description(), "New build");
        assert_eq!(build.dependencies(), ["fmt".to_string()]);

        let names: Vec<_> = tasks.iter().map(Task::name).collect();
        assert_eq!(names, vec!["build", "test"]);
    }

    #[test]
    fn test_missing_lookup_is_none() {
        let tasks: Tasks<()> = Tasks::new();
        assert!(tasks.get("deploy").is_none());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_dependencies_are_not_validated_at_registration() {
        let mut tasks: Tasks<()> = Tasks::new();
        tasks.add(Task::new("deploy", "Ship it", noop).depends_on(["build", "nowhere"]));

        let deploy = tasks.get("deploy").expect("deploy should be registered");
        assert_eq!(deploy.dependencies(), ["build".to_string(), "nowhere".to_string()]);
    }

    #[test]
    fn test_hooks_keep_registration_order() {
        let log = RefCell::new(Vec::new());
        let mut tasks: Tasks<RefCell<Vec<&'static str>>> = Tasks::new();
        tasks.before_each(|log| log.borrow_mut().push("first"));
        tasks.before_each(|log| log.borrow_mut().push("second"));
        tasks.after_all(|log| log.borrow_mut().push("after"));

        run_hooks(&tasks.hooks().before_each, &log);
        run_hooks(&tasks.hooks().after_all, &log);

        assert_eq!(*log.borrow(), vec!["first", "second", "after"]);
    }
}
