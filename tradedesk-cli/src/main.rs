//! Tradedesk CLI: order and instrument commands against the brokerage backend.
//!
//! Commands:
//! - `orders`: list all orders
//! - `order <id>`: show one order with its derived value
//! - `instruments`: list instruments with current prices
//! - `buy`: validate and submit a new order

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tradedesk_core::api::BrokerApi;
use tradedesk_core::domain::{OrderId, OrderSide, OrderType};
use tradedesk_core::draft::{format_expiry, DraftEdit};
use tradedesk_core::format::{
    detail_rows, format_amount, format_date, format_optional_amount, translate_status,
};
use tradedesk_core::submit::SubmitBlocked;
use tradedesk_core::{ClientConfig, HttpBrokerClient, ReferenceData, SubmitForm};

#[derive(Parser)]
#[command(name = "tradedesk", about = "Tradedesk CLI: review and place brokerage orders")]
struct Cli {
    /// Backend base URL, overrides the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all orders.
    Orders,
    /// Show a single order.
    Order {
        /// Order identifier.
        id: String,
    },
    /// List instruments with their current prices.
    Instruments,
    /// Submit a new order.
    Buy {
        /// Instrument ISIN.
        #[arg(long)]
        isin: String,

        /// BUY or SELL.
        #[arg(long, default_value = "BUY", value_parser = parse_side)]
        side: OrderSide,

        /// LMT, MKT or PKC.
        #[arg(long, default_value = "LMT", value_parser = parse_order_type)]
        order_type: OrderType,

        /// Number of units.
        #[arg(long, default_value = "1")]
        quantity: String,

        /// Limit price (limit orders only).
        #[arg(long)]
        limit_price: Option<String>,

        /// Trade currency. Defaults to the instrument's currency.
        #[arg(long)]
        currency: Option<String>,

        /// Minutes until the order expires.
        #[arg(long, default_value_t = 15)]
        expires_in_mins: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let default_config = dirs::config_dir().map(|d| d.join("tradedesk").join("config.toml"));
    let config = ClientConfig::load(cli.config.as_deref(), default_config.as_deref())?
        .with_base_url(cli.base_url)?;
    let client = HttpBrokerClient::new(&config)?;

    match cli.command {
        Commands::Orders => run_orders(&client, cli.json),
        Commands::Order { id } => run_order(&client, &id, cli.json),
        Commands::Instruments => run_instruments(&client, cli.json),
        Commands::Buy {
            isin,
            side,
            order_type,
            quantity,
            limit_price,
            currency,
            expires_in_mins,
        } => run_buy(
            &client,
            BuyArgs {
                isin,
                side,
                order_type,
                quantity,
                limit_price,
                currency,
                expires_in_mins,
            },
        ),
    }
}

fn run_orders(api: &dyn BrokerApi, json: bool) -> Result<()> {
    let orders = api.list_orders()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }
    if orders.is_empty() {
        println!("Brak zamówień.");
        return Ok(());
    }

    println!(
        "{:<16} {:<14} {:<14} {:>8} {:>10}  {}",
        "Numer zlecenia", "Status", "Isin", "Liczba", "Limit", "Rejestracja"
    );
    println!("{}", "-".repeat(86));
    for order in &orders {
        println!(
            "{:<16} {:<14} {:<14} {:>8} {:>10}  {}",
            order.order_id,
            translate_status(&order.status),
            order.isin,
            order.quantity,
            order.limit_price.map(format_amount).unwrap_or_default(),
            format_date(order.registration_time.as_deref()),
        );
    }
    Ok(())
}

fn run_order(api: &dyn BrokerApi, id: &str, json: bool) -> Result<()> {
    let order_id = OrderId::new(id);
    if order_id.is_empty() {
        bail!("order id must not be empty");
    }
    let order = api.get_order(&order_id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
        return Ok(());
    }

    println!();
    println!("=== Szczegóły zamówienia {} ===", order.order_id);
    for (label, value) in detail_rows(&order) {
        println!("{:<18}{value}", format!("{label}:"));
    }
    println!();
    Ok(())
}

fn run_instruments(api: &dyn BrokerApi, json: bool) -> Result<()> {
    let data = ReferenceData::fetch(api)?;
    if json {
        let rows: Vec<serde_json::Value> = data
            .instruments
            .iter()
            .map(|i| {
                serde_json::json!({
                    "isin": i.isin,
                    "name": i.name,
                    "ticker": i.ticker,
                    "tradeCurrency": i.trade_currency,
                    "price": data.price(&i.isin),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<14} {:<8} {:<30} {:<6} {:>12}",
        "ISIN", "Ticker", "Nazwa", "Waluta", "Kurs"
    );
    println!("{}", "-".repeat(74));
    for instrument in &data.instruments {
        println!(
            "{:<14} {:<8} {:<30} {:<6} {:>12}",
            instrument.isin,
            instrument.ticker,
            instrument.name,
            instrument.trade_currency,
            format_optional_amount(data.price(&instrument.isin)),
        );
    }
    Ok(())
}

struct BuyArgs {
    isin: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: String,
    limit_price: Option<String>,
    currency: Option<String>,
    expires_in_mins: i64,
}

fn run_buy(api: &dyn BrokerApi, args: BuyArgs) -> Result<()> {
    let now = Local::now();

    // The instrument's currency applies unless one was given explicitly.
    let instrument_currency = match &args.currency {
        Some(_) => None,
        None => api
            .list_instruments()?
            .into_iter()
            .find(|i| i.isin == args.isin)
            .map(|i| i.trade_currency),
    };

    let mut form = SubmitForm::new(now);
    for edit in buy_edits(&args, instrument_currency, now)? {
        form.edit(edit);
    }

    match form.submit(api, now) {
        Ok(()) => {}
        Err(SubmitBlocked::Invalid(errors)) => {
            for err in &errors {
                eprintln!("{}: {err}", err.field().label());
            }
            bail!("order rejected by validation ({} error(s))", errors.len());
        }
        Err(SubmitBlocked::InFlight) => bail!("a submission is already in progress"),
    }

    if let Some(err) = form.error {
        bail!(err);
    }
    if let Some(msg) = &form.success {
        println!("{msg}");
    }
    if let Some(order) = &form.last_created {
        println!("Numer zlecenia: {}", order.order_id);
        println!("Status:         {}", translate_status(&order.status));
    }
    Ok(())
}

/// Draft edits reproducing the command-line arguments.
fn buy_edits(
    args: &BuyArgs,
    instrument_currency: Option<String>,
    now: chrono::DateTime<Local>,
) -> Result<Vec<DraftEdit>> {
    let Some(expires_at) = Duration::try_minutes(args.expires_in_mins)
        .and_then(|offset| now.checked_add_signed(offset))
    else {
        bail!("--expires-in-mins {} is out of range", args.expires_in_mins);
    };

    let currency = args
        .currency
        .clone()
        .or(instrument_currency)
        .unwrap_or_else(|| tradedesk_core::draft::DEFAULT_CURRENCY.to_string());

    let mut edits = vec![
        DraftEdit::SelectInstrument {
            isin: args.isin.clone(),
            trade_currency: currency,
        },
        DraftEdit::SetSide(args.side),
        DraftEdit::SetOrderType(args.order_type),
        DraftEdit::SetQuantity(args.quantity.clone()),
        DraftEdit::SetExpiresAt(format_expiry(expires_at)),
    ];
    if let Some(price) = &args.limit_price {
        edits.push(DraftEdit::SetLimitPrice(price.clone()));
    }
    Ok(edits)
}

fn parse_side(s: &str) -> Result<OrderSide, String> {
    match s.to_ascii_uppercase().as_str() {
        "BUY" => Ok(OrderSide::Buy),
        "SELL" => Ok(OrderSide::Sell),
        _ => Err(format!("unknown side '{s}'. Valid: BUY, SELL")),
    }
}

fn parse_order_type(s: &str) -> Result<OrderType, String> {
    let upper = s.to_ascii_uppercase();
    OrderType::ALL
        .into_iter()
        .find(|t| t.code() == upper)
        .ok_or_else(|| format!("unknown order type '{s}'. Valid: LMT, MKT, PKC"))
}
