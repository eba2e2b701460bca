//! meilisearch-cli binary entry point.

use colored::Colorize;
use meili_cli::error::exit_code_from_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            return ExitCode::FAILURE;
        },
    };

    match runtime.block_on(meili_cli::run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
