//! Command dispatch
//!
//! [`Chore`] is the entry point a chorefile hands control to. It builds the
//! task registry, reads the command vocabulary (`tasks`, `task <name>`) and
//! decides what is printed and which exit code the process ends with. Nothing
//! below this layer exits the process.

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::configs::chore::{ChoreConfig, ColorChoice};
use crate::execution::{Reporter, TaskRunner};
use crate::tasks::Tasks;
use crate::types::{ChoreError, ChoreResult, InvocationError};
use crate::utils::Utils;

/// Fills a fresh registry; called once per invocation before any task runs
pub type Initializer<C> = Box<dyn Fn(&mut Tasks<C>) -> anyhow::Result<()>>;

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct Invocation {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every registered task
    #[command(disable_help_flag = true)]
    Tasks {
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        _ignored: Vec<String>,
    },
}

/// What an invocation asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListTasks,
    RunTask(String),
}

/// Turn process arguments (without the program name) into a [`Request`]
pub fn parse_request<I, S>(args: I) -> Result<Request, InvocationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args: Vec<String> = args.into_iter().map(Into::into).collect();
    let command = args.first().cloned();
    match command.as_deref() {
        None => return Err(InvocationError::MissingArgument),
        Some("--") => return Err(InvocationError::InvalidArgument),
        // `task` takes exactly one name, read verbatim so `--` and `-x` stay names
        Some("task") if args.len() == 2 => return Ok(Request::RunTask(args.swap_remove(1))),
        Some("task") => return Err(InvocationError::MissingTaskName),
        _ => {}
    }

    let invocation = Invocation::try_parse_from(&args).map_err(|e| {
        tracing::debug!(error = %e, "unrecognized invocation");
        InvocationError::InvalidArgument
    })?;

    match invocation.command {
        None => Err(InvocationError::MissingArgument),
        Some(Command::Tasks { .. }) => Ok(Request::ListTasks),
    }
}

/// Process exit status for a dispatch result
pub fn exit_code(result: &ChoreResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// A task set together with the context its actions run against
pub struct Chore<C = Utils> {
    context: C,
    initializer: Initializer<C>,
    config: ChoreConfig,
}

impl Chore<Utils> {
    /// Tasks run against the default [`Utils`] context
    pub fn new<F>(initializer: F) -> ChoreResult<Self>
    where
        F: Fn(&mut Tasks<Utils>) -> anyhow::Result<()> + 'static,
    {
        Ok(Self::with_context(Utils::new()?, initializer))
    }
}

impl<C> Chore<C> {
    pub fn with_context<F>(context: C, initializer: F) -> Self
    where
        F: Fn(&mut Tasks<C>) -> anyhow::Result<()> + 'static,
    {
        Self {
            context,
            initializer: Box::new(initializer),
            config: ChoreConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ChoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Build a fresh registry by running the initializer
    pub fn load_tasks(&self) -> ChoreResult<Tasks<C>> {
        let mut tasks = Tasks::new();
        (self.initializer)(&mut tasks).map_err(ChoreError::Initialization)?;
        tracing::debug!(tasks = tasks.len(), "tasks initialized");
        Ok(tasks)
    }

    /// Initialize, parse `args` and carry out the request, writing progress to `out`.
    /// Errors are returned, not printed.
    pub fn execute<I, S>(&self, args: I, out: &mut dyn Write, color: bool) -> ChoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = self.load_tasks()?;
        let request = parse_request(args)?;
        tracing::debug!(?request, "dispatching");

        let mut reporter = Reporter::new(out, color);
        match request {
            Request::ListTasks => reporter.listing(&tasks),
            Request::RunTask(name) => {
                TaskRunner::new(&tasks, &self.context, reporter).run_task_and_dependencies(&name)
            }
        }
    }

    /// Like [`Chore::execute`], but prints any error to `out` and returns the exit code
    pub fn run_with<I, S>(&self, args: I, out: &mut dyn Write) -> u8
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(args, out, self.config.color.enabled(false))
    }

    /// Run with the process arguments and stdout
    pub fn run(&self) -> ExitCode {
        let stdout = std::io::stdout();
        let color = self.config.color.enabled(stdout.is_terminal());
        let mut out = stdout.lock();
        ExitCode::from(self.dispatch(std::env::args().skip(1), &mut out, color))
    }

    fn dispatch<I, S>(&self, args: I, out: &mut dyn Write, color: bool) -> u8
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.config.color {
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
            ColorChoice::Auto => {}
        }

        let result = self.execute(args, out, color);
        if let Err(error) = &result {
            let mut reporter = Reporter::new(out, color);
            let reported = match error {
                ChoreError::Initialization(e) => reporter.initialization_error(&e.to_string()),
                other => reporter.error(&other.to_string()),
            };
            if let Err(e) = reported {
                tracing::error!(error = %e, "failed to report error");
            }
        }
        exit_code(&result)
    }
}
