//! Kids KickLabs CLI - catalog and restoration quote tools.
//!
//! # Usage
//!
//! ```bash
//! # List every product
//! kk-cli catalog
//!
//! # Ready-made sneakers under NPR 3,000
//! kk-cli catalog --category ready-made --tag Sneakers --max-price 3000
//!
//! # Quote a restoration
//! kk-cli estimate --condition medium --service deep --service stain --service lace
//! ```
//!
//! # Commands
//!
//! - `catalog` - Print the fixture catalog through the shop filter
//! - `estimate` - Print a restoration quote

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use clap::{Parser, Subcommand};
use kicklabs_core::{Category, Condition, Service};

mod commands;

#[derive(Parser)]
#[command(name = "kk-cli")]
#[command(author, version, about = "Kids KickLabs CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a filter
    Catalog {
        /// Category (`ready-made`, `customizable`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Price ceiling in whole rupees
        #[arg(short, long)]
        max_price: Option<u32>,

        /// Required tag (repeatable; all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Allowed brand (repeatable; any may match)
        #[arg(short, long = "brand")]
        brands: Vec<String>,

        /// Case-insensitive search over name and brand
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Quote a restoration
    Estimate {
        /// Shoe condition (`light`, `medium`, `heavy`, `damage`)
        #[arg(short, long, default_value = "light")]
        condition: Condition,

        /// Extra service (repeatable): `deep`, `stain`, `lace`, `white`, `glue`
        #[arg(short, long = "service")]
        services: Vec<Service>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Catalog {
            category,
            max_price,
            tags,
            brands,
            search,
        } => {
            let filter = commands::catalog::build_filter(category, max_price, tags, brands, search);
            commands::catalog::list(&mut out, &filter)?;
        }
        Commands::Estimate {
            condition,
            services,
        } => commands::estimate::quote(&mut out, condition, services)?,
    }
    Ok(())
}
