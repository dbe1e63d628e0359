mod commands;
mod error;
pub mod exit_codes;
mod output;

pub use commands::{Cli, Commands};
pub use error::CliError;

use output::{ErrorData, OutputMode};

/// run a parsed command line, returning the process exit code
pub fn run(cli: Cli) -> i32 {
    let mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet);

    match commands::execute(cli, mode) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, mode);
            e.exit_code()
        }
    }
}

fn report_error(e: &CliError, mode: OutputMode) {
    let code = e.exit_code();

    if mode.is_json() {
        match e {
            CliError::InvalidStatement(err) => output::print_json_error_with_data(
                code,
                &e.to_string(),
                ErrorData {
                    path: Some(err.path.clone()),
                    errors: Vec::new(),
                },
            ),
            CliError::ConfigInvalid { errors, .. } => output::print_json_error_with_data(
                code,
                &e.to_string(),
                ErrorData {
                    path: None,
                    errors: errors.clone(),
                },
            ),
            _ => output::print_json_error(code, &e.to_string()),
        }
        return;
    }

    // errors go to stderr in text and quiet modes
    eprintln!("error: {}", e);
    if let CliError::ConfigInvalid { errors, .. } = e {
        for error in errors {
            eprintln!("  - {}", error);
        }
    }
}
