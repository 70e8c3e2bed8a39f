mod cli;
mod commands;
mod infra;

use nutrilens::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
