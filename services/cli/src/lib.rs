mod cli;
mod commands;
mod demo;
mod infra;

use market_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
