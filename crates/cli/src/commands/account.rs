//! Account and session commands.
//!
//! # Usage
//!
//! ```bash
//! lowkal account signup -f Ayşe -l Demir -e ayse@example.com -p sifre123
//! lowkal account login -e ayse@example.com -p sifre123
//! lowkal account whoami
//! lowkal account bio --text "İkinci el eşya satıyorum"
//! lowkal account logout
//! ```

use std::path::Path;

use clap::Subcommand;

use super::CliError;

#[derive(Subcommand)]
pub enum Action {
    /// Create an account and log in as it
    Signup {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Email address (unique, case-insensitive)
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Clear the session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Update the profile bio
    Bio {
        /// New bio text
        #[arg(short, long)]
        text: String,
    },
}

pub fn run(data_dir: &Path, action: Action) -> Result<(), CliError> {
    let mut marketplace = super::open(data_dir)?;

    match action {
        Action::Signup {
            first_name,
            last_name,
            email,
            password,
        } => {
            // the terminal asks for the password once, so it is its own
            // confirmation
            let id = marketplace.sign_up(&first_name, &last_name, &email, &password, &password)?;
            println!("Account created and logged in ({id}).");
        }
        Action::Login { email, password } => {
            let id = marketplace.log_in(&email, &password)?;
            println!("Logged in ({id}).");
        }
        Action::Logout => {
            marketplace.log_out();
            println!("Logged out.");
        }
        Action::Whoami => match marketplace.state().current_user() {
            Some(user) => {
                println!("{} <{}>", user.display_name(), user.email);
                if !user.bio.is_empty() {
                    println!("{}", user.bio);
                }
                println!(
                    "{} listing(s), {} favorite(s)",
                    marketplace.my_listings().len(),
                    user.liked_product_ids.len()
                );
            }
            None => println!("Not logged in."),
        },
        Action::Bio { text } => {
            marketplace.save_profile(&text)?;
            println!("Profile updated.");
        }
    }
    Ok(())
}
