//! Conversation commands: messages, offers, exchange proposals.
//!
//! # Usage
//!
//! ```bash
//! lowkal chat send --product 3 --text "hâlâ satılık mı?"
//! lowkal chat offer --product 3 --amount 950 --note "nakit alırım"
//! lowkal chat exchange --product 3 --with 7 --plus 100
//! lowkal chat inbox
//! lowkal chat thread 3
//! ```

use std::path::Path;

use clap::Subcommand;

use lowkal_core::ProductId;
use lowkal_engine::InteractionDraft;

use super::CliError;

#[derive(Subcommand)]
pub enum Action {
    /// Send a plain message on a listing
    Send {
        /// Listing id
        #[arg(long)]
        product: i64,

        /// Message text
        #[arg(long)]
        text: String,
    },
    /// Make a cash offer on a listing
    Offer {
        /// Listing id
        #[arg(long)]
        product: i64,

        /// Offered amount in TL (must be positive)
        #[arg(long)]
        amount: String,

        /// Optional note appended to the offer
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Propose swapping one of your own listings for another
    Exchange {
        /// Listing id you want
        #[arg(long)]
        product: i64,

        /// Id of your own listing you are offering
        #[arg(long = "with")]
        offered: i64,

        /// Optional cash on top, in TL
        #[arg(long = "plus")]
        cash_delta: Option<String>,

        /// Optional note appended to the proposal
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List conversations, most recent first
    Inbox,
    /// Show the full conversation on a listing
    Thread {
        /// Listing id
        id: i64,
    },
}

pub fn run(data_dir: &Path, action: Action) -> Result<(), CliError> {
    let mut marketplace = super::open(data_dir)?;

    match action {
        Action::Send { product, text } => {
            let draft = InteractionDraft::message(ProductId::new(product), text);
            send(&mut marketplace, &draft, "Message is empty; nothing sent.")?;
        }
        Action::Offer {
            product,
            amount,
            note,
        } => {
            let amount = super::parse_price(&amount)?;
            let draft = InteractionDraft::offer(ProductId::new(product), amount, note);
            send(
                &mut marketplace,
                &draft,
                "Offer amount must be positive; nothing sent.",
            )?;
        }
        Action::Exchange {
            product,
            offered,
            cash_delta,
            note,
        } => {
            let cash_delta = cash_delta.as_deref().map(super::parse_price).transpose()?;
            let draft = InteractionDraft::exchange(
                ProductId::new(product),
                ProductId::new(offered),
                cash_delta,
                note,
            );
            send(
                &mut marketplace,
                &draft,
                "The offered listing must be one of your own; nothing sent.",
            )?;
        }
        Action::Inbox => {
            let inbox = marketplace.inbox();
            if inbox.is_empty() {
                println!("No conversations.");
            }
            for entry in inbox {
                println!(
                    "#{} {} - {}: {} ({})",
                    entry.product.id,
                    entry.product.title,
                    entry.last_interaction.author_display_name,
                    entry.last_interaction.body,
                    entry.last_interaction.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Action::Thread { id } => {
            let thread = marketplace.thread(ProductId::new(id));
            if thread.is_empty() {
                println!("No interactions on listing {id}.");
            }
            for interaction in thread {
                println!(
                    "[{}] {}: {}",
                    interaction.created_at.format("%Y-%m-%d %H:%M"),
                    interaction.author_display_name,
                    interaction.body
                );
            }
        }
    }
    Ok(())
}

fn send(
    marketplace: &mut lowkal_engine::Marketplace<lowkal_engine::FileBlobStore>,
    draft: &InteractionDraft,
    noop_hint: &str,
) -> Result<(), CliError> {
    match marketplace.send_interaction(draft)? {
        Some(_) => println!("Sent."),
        None => println!("{noop_hint}"),
    }
    Ok(())
}
