use crate::infra::engine_from_path;
use chrono::{Local, NaiveDate};
use clap::Args;
use enrollment_pricing::error::AppError;
use enrollment_pricing::pricing::{format_minor_units, QuoteRequest, QuoteResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Program level identifier (level1, level2, level3)
    #[arg(long)]
    pub(crate) level: String,
    /// Number of sessions in the package (8, 16, or 24)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) sessions: i64,
    /// Optional promo code, matched case-insensitively
    #[arg(long)]
    pub(crate) promo_code: Option<String>,
    /// Currency label attached to the quote (defaults to the table's currency)
    #[arg(long)]
    pub(crate) currency: Option<String>,
    /// Purchase date used to show the package expiry date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) purchased_on: Option<NaiveDate>,
    /// JSON pricing table to quote against instead of the built-in prices
    #[arg(long)]
    pub(crate) pricing_table: Option<PathBuf>,
    /// Print the quote as JSON instead of a readable breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PricingArgs {
    /// JSON pricing table to validate and print instead of the built-in prices
    #[arg(long)]
    pub(crate) pricing_table: Option<PathBuf>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        level,
        sessions,
        promo_code,
        currency,
        purchased_on,
        pricing_table,
        json,
    } = args;

    let engine = engine_from_path(pricing_table.as_deref())?;
    let request = QuoteRequest {
        level,
        sessions,
        promo_code,
        currency,
    };
    let quote = engine.compute_quote(&request)?;

    if json {
        match serde_json::to_string_pretty(&quote) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Quote payload unavailable: {err}"),
        }
        return Ok(());
    }

    let purchased_on = purchased_on.unwrap_or_else(|| Local::now().date_naive());
    render_quote(&request, &quote, purchased_on);
    Ok(())
}

pub(crate) fn run_pricing(args: PricingArgs) -> Result<(), AppError> {
    let engine = engine_from_path(args.pricing_table.as_deref())?;
    match serde_json::to_string_pretty(engine.table()) {
        Ok(body) => println!("{body}"),
        Err(err) => println!("Pricing table unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn render_quote(request: &QuoteRequest, quote: &QuoteResult, purchased_on: NaiveDate) {
    let money = |cents: i64| format_minor_units(cents, &quote.currency);
    let breakdown = &quote.breakdown;

    println!(
        "Quote for {} x {} sessions",
        request.level.trim(),
        request.sessions
    );
    println!("- Base price: {}", money(breakdown.base_cents));
    println!(
        "- Package discount: -{}",
        money(breakdown.package_discount_cents)
    );
    if breakdown.time_adj_cents != 0 {
        println!("- Time adjustment: {}", money(breakdown.time_adj_cents));
    }
    match request.promo_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() && breakdown.promo_cents > 0 => {
            println!("- Promo {}: -{}", code, money(breakdown.promo_cents));
        }
        Some(code) if !code.is_empty() => {
            println!("- Promo {}: not recognized, no discount", code);
        }
        _ => {}
    }
    println!("Total: {}", quote.display_total());
    println!(
        "Valid for {} days (purchased {}, expires {})",
        quote.expiry_days,
        purchased_on,
        quote.expires_on(purchased_on)
    );
}
