//! Listing management and browsing commands.
//!
//! # Usage
//!
//! ```bash
//! lowkal listing publish --title "Dağ bisikleti" --price 1200 \
//!     --category Spor --condition good --photo ./bike.jpg --takas
//! lowkal listing browse --search bisiklet --sort priceLow --max-km 8
//! lowkal listing favorite 3
//! lowkal listing delete 3
//! ```

use std::path::Path;

use clap::Subcommand;

use lowkal_core::{Condition, ProductId, SortMode};
use lowkal_engine::{FileBlobStore, Marketplace, Product, ProductDraft};

use super::CliError;

#[derive(Subcommand)]
pub enum Action {
    /// Publish a new listing
    Publish {
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Edit one of your listings
    Edit {
        /// Listing id
        id: i64,

        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Delete one of your listings and its conversation
    Delete {
        /// Listing id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Browse the catalog with the stored filters, optionally adjusting
    /// them first (adjustments persist)
    Browse {
        /// Search text matched against title, category, and description
        #[arg(long)]
        search: Option<String>,

        /// Sort order: newest, priceLow, or priceHigh
        #[arg(long)]
        sort: Option<SortMode>,

        /// Maximum distance in km (1-10)
        #[arg(long)]
        max_km: Option<u8>,

        /// Only show listings open to barter
        #[arg(long)]
        takas_only: bool,
    },
    /// List your own listings
    Mine,
    /// Toggle a listing in your favorites
    Favorite {
        /// Listing id
        id: i64,
    },
    /// List your favorites
    Favorites,
}

/// The listing fields shared by `publish` and `edit`.
#[derive(clap::Args)]
pub struct DraftArgs {
    /// Listing title
    #[arg(long)]
    title: String,

    /// Asking price in TL (must be positive)
    #[arg(long)]
    price: String,

    /// Category label
    #[arg(long)]
    category: String,

    /// Condition: new, likeNew, good, or fair
    #[arg(long, default_value = "good")]
    condition: Condition,

    /// Photo reference (path or data URL)
    #[arg(long)]
    photo: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    description: String,

    /// Open to barter
    #[arg(long)]
    takas: bool,

    /// Distance from the buyer in km
    #[arg(long, default_value_t = 1.0)]
    distance_km: f64,
}

impl DraftArgs {
    fn into_draft(self) -> Result<ProductDraft, CliError> {
        Ok(ProductDraft {
            photo: self.photo,
            title: self.title,
            price: super::parse_price(&self.price)?,
            category: self.category,
            condition: self.condition,
            description: self.description,
            takas_enabled: self.takas,
            distance_km: self.distance_km,
        })
    }
}

pub fn run(data_dir: &Path, action: Action) -> Result<(), CliError> {
    let mut marketplace = super::open(data_dir)?;

    match action {
        Action::Publish { fields } => {
            match marketplace.publish_product(&fields.into_draft()?)? {
                Some(id) => println!("Published listing {id}."),
                None => println!("Listing is incomplete: photo, title, category, and a positive price are required."),
            }
        }
        Action::Edit { id, fields } => {
            if marketplace.update_product(ProductId::new(id), &fields.into_draft()?)? {
                println!("Listing {id} updated.");
            } else {
                println!("Listing is incomplete: photo, title, category, and a positive price are required.");
            }
        }
        Action::Delete { id, yes } => {
            if !yes && !super::confirm(&format!("Delete listing {id} and its conversation?"))? {
                println!("Aborted.");
                return Ok(());
            }
            marketplace.delete_product(ProductId::new(id))?;
            println!("Listing {id} deleted.");
        }
        Action::Browse {
            search,
            sort,
            max_km,
            takas_only,
        } => {
            if search.is_some() || sort.is_some() || max_km.is_some() || takas_only {
                marketplace.update_config(|ui| {
                    if let Some(text) = search {
                        ui.search_text = text;
                    }
                    if let Some(mode) = sort {
                        ui.sort_mode = mode;
                    }
                    if let Some(km) = max_km {
                        ui.max_distance_km = km;
                    }
                    if takas_only {
                        ui.takas_only = true;
                    }
                });
            }
            print_products(&marketplace.catalog(), &marketplace);
        }
        Action::Mine => print_products(&marketplace.my_listings(), &marketplace),
        Action::Favorite { id } => {
            if marketplace.toggle_favorite(ProductId::new(id))? {
                println!("Listing {id} added to favorites.");
            } else {
                println!("Listing {id} removed from favorites.");
            }
        }
        Action::Favorites => print_products(&marketplace.favorites(), &marketplace),
    }
    Ok(())
}

fn print_products(products: &[&Product], marketplace: &Marketplace<FileBlobStore>) {
    if products.is_empty() {
        println!("No listings.");
        return;
    }
    for product in products {
        let favorite = if marketplace.is_favorite(product.id) {
            " *"
        } else {
            ""
        };
        println!(
            "#{} {} - {} TL ({}, {:.1} km, {}){}",
            product.id,
            product.title,
            product.price,
            product.condition,
            product.distance_km,
            product.owner_display_name,
            favorite
        );
    }
}
