//! puck binary entry point.

use std::process::ExitCode;

use puck::ui::output;
use puck::PuckError;

fn main() -> ExitCode {
    match puck::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            let code = err
                .downcast_ref::<PuckError>()
                .map_or(1, PuckError::exit_code);
            ExitCode::from(code)
        }
    }
}
