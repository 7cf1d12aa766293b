//! Task execution module
//!
//! This module handles running a task after its declared dependencies, the
//! lifecycle hooks around them, and the console lines reported while doing so.

pub mod output;
pub mod runner;

pub use output::{Reporter, LISTING_MARGIN};
pub use runner::TaskRunner;
