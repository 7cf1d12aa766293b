use std::process::ExitCode;

use chore_core::execution::Reporter;
use chore_core::{logging, Chore, ChoreConfig, ChoreResult, Utils};

mod tasks;

/// Chore - the task file for this repository
///
/// `chore tasks` lists what can be run, `chore task <name>` runs one.
fn main() -> ExitCode {
    logging::init();

    match chorefile() {
        Ok(chore) => chore.run(),
        Err(e) => {
            let mut stdout = std::io::stdout();
            if let Err(report_error) = Reporter::new(&mut stdout, false).error(&e.to_string()) {
                tracing::error!(error = %report_error, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn chorefile() -> ChoreResult<Chore> {
    // Settings come from chore.yml in the directory chore is invoked from
    let config = ChoreConfig::load(&std::env::current_dir()?)?;
    let utils = Utils::from_config(&config.http)?;

    Ok(Chore::with_context(utils, tasks::register).with_config(config))
}
