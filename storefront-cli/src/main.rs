//! Storefront CLI
//!
//! Prices orders, lists saved payment methods and runs checkouts against a
//! storefront backend.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use config::ConfigLoader;
use rust_decimal::Decimal;
use storefront_core::pricing::PricingInput;
use storefront_sdk::objects::Currency;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Storefront checkout client
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./storefront.toml")]
    config: PathBuf,

    /// Override the API base URL (e.g., http://localhost:8080/)
    #[arg(short, long)]
    base_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price an order without contacting the backend
    Quote(PriceArgs),

    /// List the saved cards and bank accounts usable at checkout
    Methods,

    /// Convert an amount between currencies
    Convert {
        amount: Decimal,
        from: Currency,
        to: Currency,
    },

    /// Create and initialize a payment for a product
    Checkout {
        /// Product being bought
        #[arg(long)]
        product_id: String,

        /// Accepted offer, if the price was negotiated
        #[arg(long)]
        offer_id: Option<String>,

        /// Saved card or bank account id (optionally `card:ID` or `bank:ID`),
        /// or `new-card`. Defaults to the default instrument.
        #[arg(long)]
        method: Option<String>,

        #[command(flatten)]
        price: PriceArgs,
    },
}

#[derive(ClapArgs, Debug, Clone)]
struct PriceArgs {
    /// Listed product price
    #[arg(long)]
    price: Decimal,

    /// Accepted offer amount, replaces the listed price
    #[arg(long)]
    offer: Option<Decimal>,

    /// Shipping cost
    #[arg(long, default_value = "0")]
    shipping: Decimal,

    /// Use standard protection instead of escrow
    #[arg(long)]
    standard: bool,

    #[arg(long, default_value = "USD")]
    currency: Currency,
}

impl PriceArgs {
    fn to_input(&self) -> PricingInput {
        PricingInput {
            product_price: self.price,
            offer_amount: self.offer,
            shipping_cost: self.shipping,
            use_escrow: !self.standard,
            currency: self.currency.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let loaded_config = ConfigLoader::new(&args.config, args.base_url.clone())
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::debug!("Configuration loaded from {:?}", args.config);

    match args.command {
        Command::Quote(price) => commands::quote(&loaded_config, &price.to_input()),
        Command::Methods => commands::methods(&loaded_config).await,
        Command::Convert { amount, from, to } => {
            commands::convert(&loaded_config, amount, from, to).await
        }
        Command::Checkout {
            product_id,
            offer_id,
            method,
            price,
        } => {
            commands::checkout(
                &loaded_config,
                commands::CheckoutArgs {
                    product_id,
                    offer_id,
                    method,
                    pricing: price.to_input(),
                },
            )
            .await
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
