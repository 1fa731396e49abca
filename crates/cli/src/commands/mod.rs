//! Command implementations, grouped the way the CLI groups subcommands.

use std::io::{self, Write};
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use lowkal_core::Price;
use lowkal_engine::{EngineError, FileBlobStore, Marketplace, PersistenceError};

pub mod account;
pub mod chat;
pub mod listing;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// An engine operation was rejected.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The data directory could not be opened.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Terminal input could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] io::Error),

    /// A price argument was not a non-negative decimal number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Open the marketplace over the JSON documents in `data_dir`.
pub fn open(data_dir: &Path) -> Result<Marketplace<FileBlobStore>, CliError> {
    Ok(Marketplace::open(FileBlobStore::open(data_dir)?))
}

/// Parse a decimal price argument.
pub fn parse_price(raw: &str) -> Result<Price, CliError> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidPrice(raw.to_owned()))?;
    Price::new(amount).map_err(|_| CliError::InvalidPrice(raw.to_owned()))
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no.
pub fn confirm(question: &str) -> Result<bool, CliError> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
