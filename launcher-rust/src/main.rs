mod alert;
mod config;
mod logging;
mod runner;

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("warning: {err:#}");
    }

    let outcome = runner::run(&runner::Launch::default());
    ExitCode::from(runner::exit_code(&outcome))
}
