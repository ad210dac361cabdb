//! Backroom CLI - store inspection and variation planning tools.
//!
//! # Usage
//!
//! ```bash
//! # Check connectivity and credentials
//! br-cli status
//!
//! # List global attributes, optionally with their terms
//! br-cli attributes
//! br-cli attributes --terms
//!
//! # List the persisted variations of a product
//! br-cli variations 123
//!
//! # Dry-run the variation combinations a selection would generate
//! br-cli plan --attr 1=10,11 --attr 2=20
//! ```
//!
//! # Commands
//!
//! - `status` - Probe the store API connection
//! - `attributes` - List attributes (and terms)
//! - `variations` - List a product's variations
//! - `plan` - Preview the cartesian combination set for a selection

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "br-cli")]
#[command(author, version, about = "Backroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the store API connection
    Status,
    /// List global attributes
    Attributes {
        /// Also fetch and list each attribute's terms
        #[arg(long)]
        terms: bool,
    },
    /// List the persisted variations of a product
    Variations {
        /// Product id
        product_id: i64,
    },
    /// Preview the variation combinations of an attribute selection
    Plan {
        /// Selection entries as `<attribute-id>=<term-id>[,<term-id>...]`
        #[arg(long = "attr", required = true)]
        attrs: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Status => commands::status::run().await?,
        Commands::Attributes { terms } => commands::attributes::run(terms).await?,
        Commands::Variations { product_id } => commands::variations::run(product_id).await?,
        Commands::Plan { attrs } => commands::plan::run(&attrs).await?,
    }
    Ok(())
}
