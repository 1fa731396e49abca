//! Lowkal CLI - drive the marketplace engine from the terminal.
//!
//! State lives as JSON documents under a data directory (`--data-dir`,
//! `LOWKAL_DATA_DIR`, or `.lowkal` by default), so the session survives
//! between invocations.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in
//! lowkal account signup -f Ayşe -l Demir -e ayse@example.com -p sifre123
//! lowkal account login -e ayse@example.com -p sifre123
//!
//! # Publish and browse listings
//! lowkal listing publish --title "Dağ bisikleti" --price 1200 \
//!     --category Spor --condition good --photo ./bike.jpg
//! lowkal listing browse --search bisiklet --sort priceLow
//!
//! # Negotiate
//! lowkal chat offer --product 3 --amount 950 --note "nakit alırım"
//! lowkal chat inbox
//! ```
//!
//! # Commands
//!
//! - `account` - Sign up, log in/out, profile
//! - `listing` - Publish, edit, delete, browse, favorites
//! - `chat` - Messages, offers, exchange proposals, inbox
//! - `reset` - Wipe listings and conversations (accounts survive)

#![cfg_attr(not(test), forbid(unsafe_code))]
// a CLI talks to its user on stdout
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{account, chat, listing};

#[derive(Parser)]
#[command(name = "lowkal")]
#[command(author, version, about = "Lowkal marketplace CLI")]
struct Cli {
    /// Directory holding the persisted marketplace documents
    #[arg(long, env = "LOWKAL_DATA_DIR", default_value = ".lowkal", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the account and session
    Account {
        #[command(subcommand)]
        action: account::Action,
    },
    /// Manage and browse listings
    Listing {
        #[command(subcommand)]
        action: listing::Action,
    },
    /// Converse on listings
    Chat {
        #[command(subcommand)]
        action: chat::Action,
    },
    /// Delete every listing and conversation; accounts and the session
    /// are kept
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Account { action } => account::run(&cli.data_dir, action),
        Commands::Listing { action } => listing::run(&cli.data_dir, action),
        Commands::Chat { action } => chat::run(&cli.data_dir, action),
        Commands::Reset { yes } => {
            if !yes && !commands::confirm("Delete ALL listings and conversations?")? {
                println!("Aborted.");
                return Ok(());
            }
            let mut marketplace = commands::open(&cli.data_dir)?;
            marketplace.reset_all();
            println!("Marketplace reset. Accounts were kept.");
            Ok(())
        }
    }
}
