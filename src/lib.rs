//! Group tour quoting calculator
//!
//! A cost catalog plus per-day selections go in; per-day totals, the grand
//! total and the marked-up client price come out, in JPY, USD and KZT.
//! [`QuoteSession`] holds the form state and [`views`] renders it.

pub mod config;
pub mod error;
pub mod pricing;
pub mod session;
pub mod views;

use tracing_subscriber::EnvFilter;

pub use config::CalculatorConfig;
pub use error::{QuoteError, Result};
pub use pricing::{
    format_amount, summarize, Catalog, Category, Currency, DayConfig, ExchangeRates, QuoteRequest,
    QuoteSummary, QuoteVariant,
};
pub use session::QuoteSession;

/// Install the fmt subscriber, filtered by `RUST_LOG`.
///
/// Defaults to `tour_quote=info`. Later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_quote=info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("Tracing subscriber already installed");
    }
}
