//! Tasks for working on this repository

use std::process::Command;

use anyhow::{bail, Context, Result};
use chore_core::{Task, Tasks, Utils};
use colored::*;

/// Environment variable holding the URL of the release feed
pub const RELEASE_FEED_VAR: &str = "CHORE_RELEASE_FEED";

pub fn register(tasks: &mut Tasks) -> Result<()> {
    tasks.task("fmt", "Check formatting", Vec::<String>::new(), |_| {
        cargo(&["fmt", "--all", "--", "--check"])
    });
    tasks.task("lint", "Run clippy on every crate", Vec::<String>::new(), |_| {
        cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
    });
    tasks.task("test", "Run the test suite", Vec::<String>::new(), |_| {
        cargo(&["test", "--workspace"])
    });
    tasks.add(
        Task::new("ci", "Everything CI runs", |_: &Utils| {
            println!("{} {}", "✓".green().bold(), "CI checks passed".green().bold());
            Ok(())
        })
        .depends_on(["fmt", "lint", "test"]),
    );
    tasks.task(
        "release-notes",
        "Show the latest published release",
        Vec::<String>::new(),
        release_notes,
    );

    tasks.before_all(|_| tracing::info!("starting chore run"));
    tasks.after_each(|_| tracing::debug!("task step complete"));
    tasks.after_all(|_| tracing::info!("chore run finished"));

    Ok(())
}

/// Run cargo in the current directory, failing on a non-zero exit
fn cargo(args: &[&str]) -> Result<()> {
    let rendered = format!("cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to execute `{}`", rendered))?;

    if !status.success() {
        bail!(
            "`{}` failed with exit code {}",
            rendered,
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}

fn release_notes(utils: &Utils) -> Result<()> {
    let Ok(feed) = std::env::var(RELEASE_FEED_VAR) else {
        bail!("{} is not set", RELEASE_FEED_VAR);
    };

    let request = utils
        .http
        .get(&feed)
        .build()
        .with_context(|| format!("Invalid release feed URL: {}", feed))?;
    let release = utils.http.execute_json(request)?;

    let Some(tag) = release["tag_name"].as_str() else {
        bail!("Release feed {} has no tag_name", feed);
    };
    println!("{} {}", "Latest release:".bold(), tag);
    if let Some(name) = release["name"].as_str() {
        println!("{} {}", "Title:".bold(), name);
    }
    if let Some(published) = release["published_at"].as_str() {
        println!("{} {}", "Published:".bold(), published);
    }
    Ok(())
}
