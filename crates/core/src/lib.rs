//! Chore Core Library
//!
//! A declarative task runner. A chorefile registers named tasks, each with a
//! description, a list of dependencies and an action, then hands control to
//! [`Chore`], which reads the command line and runs the requested task after
//! its dependencies.
//!
//! ## Architecture
//!
//! - [`tasks`] - Task definitions, the task registry and lifecycle hooks
//! - [`execution`] - Task runner and console reporting
//! - [`dispatch`] - Command vocabulary, error presentation and exit codes
//! - [`utils`] - The utility context passed to every action
//! - [`configs`] - `chore.yml` configuration
//! - [`logging`] - Diagnostic logging setup
//! - [`types`] - Error types and result alias
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chore_core::{Chore, ChoreResult, Tasks};
//!
//! fn main() -> ChoreResult<std::process::ExitCode> {
//!     let chore = Chore::new(|tasks: &mut Tasks| {
//!         tasks.task("build", "Compile the project", Vec::<String>::new(), |_| Ok(()));
//!         tasks.task("deploy", "Ship the build", ["build"], |_| Ok(()));
//!         Ok(())
//!     })?;
//!     Ok(chore.run())
//! }
//! ```
//!
//! `chore tasks` lists the registered tasks and `chore task deploy` runs
//! `build` and then `deploy`.

pub mod configs;
pub mod dispatch;
pub mod execution;
pub mod logging;
pub mod tasks;
pub mod types;
pub mod utils;

// Re-export the main types for easier usage
pub use configs::chore::{ChoreConfig, ColorChoice, HttpConfig};
pub use dispatch::Chore;
pub use tasks::{Task, Tasks};
pub use types::{ChoreError, ChoreResult, InvocationError};
pub use utils::{Http, Utils};
