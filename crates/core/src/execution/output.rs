//! Console output for task runs and listings
//!
//! All user-facing lines go through [`Reporter`] so they can be captured in
//! tests. Colour is opt-in; the plain text is identical either way.

use std::io::Write;

use colored::*;

use crate::tasks::Tasks;
use crate::types::ChoreResult;

/// Columns added after the widest task name in a listing
pub const LISTING_MARGIN: usize = 4;

pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    color: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write, color: bool) -> Self {
        Self { out, color }
    }

    /// `> Running "<name>"`
    pub fn running(&mut self, name: &str) -> ChoreResult<()> {
        let quoted = format!("\"{}\"", name);
        if self.color {
            writeln!(self.out, "{} Running {}", ">".bright_black(), quoted.cyan().bold())?;
        } else {
            writeln!(self.out, "> Running {}", quoted)?;
        }
        Ok(())
    }

    /// One row per task: the name padded to a shared column, then the description
    pub fn listing<C>(&mut self, tasks: &Tasks<C>) -> ChoreResult<()> {
        let width = listing_width(tasks);
        for task in tasks.iter() {
            let padded = format!("{:<width$}", task.name(), width = width);
            if self.color {
                writeln!(self.out, "{}{}", padded.blue().bold(), task.description())?;
            } else {
                writeln!(self.out, "{}{}", padded, task.description())?;
            }
        }
        Ok(())
    }

    /// `> Error: <message>`
    pub fn error(&mut self, message: &str) -> ChoreResult<()> {
        self.error_line("Error:", message)
    }

    /// `> Error initializing tasks: <message>`
    pub fn initialization_error(&mut self, message: &str) -> ChoreResult<()> {
        self.error_line("Error initializing tasks:", message)
    }

    fn error_line(&mut self, label: &str, message: &str) -> ChoreResult<()> {
        if self.color {
            writeln!(self.out, "{} {} {}", ">".bright_black(), label.red().bold(), message)?;
        } else {
            writeln!(self.out, "> {} {}", label, message)?;
        }
        Ok(())
    }
}

/// Width of the name column: the longest name plus [`LISTING_MARGIN`]
pub fn listing_width<C>(tasks: &Tasks<C>) -> usize {
    tasks
        .iter()
        .map(|t| t.name().chars().count())
        .max()
        .unwrap_or(0)
        + LISTING_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &()) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(tasks: &Tasks<()>) -> String {
        let mut buffer = Vec::new();
        Reporter::new(&mut buffer, false).listing(tasks).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_listing_pads_to_widest_name() {
        let mut tasks: Tasks<()> = Tasks::new();
        tasks.task("ci", "Run CI", Vec::<String>::new(), noop);
        tasks.task("integration", "Integration tests", Vec::<String>::new(), noop);
        tasks.task("fmt", "Format sources", Vec::<String>::new(), noop);

        let output = render(&tasks);
        let width = "integration".len() + LISTING_MARGIN;
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{:<width$}Run CI", "ci", width = width));
        assert_eq!(lines[1], format!("integration{}Integration tests", " ".repeat(LISTING_MARGIN)));
        assert_eq!(lines[2], format!("{:<width$}Format sources", "fmt", width = width));
        for (line, description) in lines.iter().zip(["Run CI", "Integration tests", "Format sources"]) {
            assert_eq!(line.find(description), Some(width));
        }
    }

    #[test]
    fn test_listing_width_independent_of_position() {
        let mut first: Tasks<()> = Tasks::new();
        first.task("longest-name", "a", Vec::<String>::new(), noop);
        first.task("x", "b", Vec::<String>::new(), noop);

        let mut last: Tasks<()> = Tasks::new();
        last.task("x", "b", Vec::<String>::new(), noop);
        last.task("longest-name", "a", Vec::<String>::new(), noop);

        assert_eq!(listing_width(&first), listing_width(&last));
        assert_eq!(listing_width(&first), "longest-name".len() + LISTING_MARGIN);
    }

    #[test]
    fn test_empty_listing_prints_nothing() {
        let tasks: Tasks<()> = Tasks::new();
        assert_eq!(render(&tasks), "");
    }

    #[test]
    fn test_plain_lines() {
        let mut buffer = Vec::new();
        {
            let mut reporter = Reporter::new(&mut buffer, false);
            reporter.running("build").unwrap();
            reporter.error("compile error").unwrap();
            reporter.initialization_error("bad setup").unwrap();
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "> Running \"build\"\n> Error: compile error\n> Error initializing tasks: bad setup\n"
        );
    }
}
