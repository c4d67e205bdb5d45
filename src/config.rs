//! Calculator configuration
//!
//! Built-in defaults, optionally overridden from the environment (and a
//! `.env` file when one exists).

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::pricing::defaults::clamp_days;
use crate::pricing::{Currency, ExchangeRates, QuoteVariant};

const DEFAULT_TITLE: &str = "Business Mission in Japan";

/// Start-up settings for a quote session
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub variant: QuoteVariant,
    pub currency: Currency,
    pub num_days: usize,
    pub num_people: u32,
    pub rates: ExchangeRates,
    /// Page heading
    pub title: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            variant: QuoteVariant::default(),
            currency: Currency::HOME,
            num_days: 7,
            num_people: 10,
            rates: ExchangeRates::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Load from the process environment.
    ///
    /// Reads `TOUR_QUOTE_VARIANT`, `TOUR_QUOTE_CURRENCY`, `TOUR_QUOTE_DAYS`,
    /// `TOUR_QUOTE_PEOPLE`, `TOUR_QUOTE_USD_RATE`, `TOUR_QUOTE_KZT_RATE` and
    /// `TOUR_QUOTE_TITLE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(variant) = parse_var(&lookup, "TOUR_QUOTE_VARIANT") {
            config.variant = variant;
        }
        if let Some(currency) = parse_var(&lookup, "TOUR_QUOTE_CURRENCY") {
            config.currency = currency;
        }
        if let Some(days) = parse_var::<usize, _>(&lookup, "TOUR_QUOTE_DAYS") {
            config.num_days = clamp_days(days);
        }
        match parse_var::<u32, _>(&lookup, "TOUR_QUOTE_PEOPLE") {
            Some(0) => warn!("TOUR_QUOTE_PEOPLE must be at least 1, keeping {}", config.num_people),
            Some(people) => config.num_people = people,
            None => {}
        }
        if let Some(rate) = parse_rate(&lookup, "TOUR_QUOTE_USD_RATE") {
            config.rates.usd = rate;
        }
        if let Some(rate) = parse_rate(&lookup, "TOUR_QUOTE_KZT_RATE") {
            config.rates.kzt = rate;
        }
        if let Some(title) = lookup("TOUR_QUOTE_TITLE").filter(|t| !t.trim().is_empty()) {
            config.title = title;
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn parse_rate<F>(lookup: &F, key: &str) -> Option<Decimal>
where
    F: Fn(&str) -> Option<String>,
{
    let rate: Decimal = parse_var(lookup, key)?;
    if rate <= Decimal::ZERO {
        warn!("Ignoring non-positive {}={}", key, rate);
        return None;
    }
    Some(rate)
}
