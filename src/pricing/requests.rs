//! Engine input for a quote.

use serde::{Deserialize, Serialize};

use super::currency::{Currency, ExchangeRates};
use super::defaults::{default_catalog, default_day_configs};
use super::models::{Catalog, DayConfig, QuoteVariant};

/// Everything the engine needs to price a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub num_people: u32,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    #[serde(default)]
    pub variant: QuoteVariant,
    pub catalog: Catalog,
    /// One entry per day of the trip
    pub day_configs: Vec<DayConfig>,
    #[serde(default)]
    pub rates: ExchangeRates,
}

fn default_currency() -> Currency {
    Currency::HOME
}

impl QuoteRequest {
    /// Request with the variant's default catalog and itinerary
    pub fn with_defaults(
        variant: QuoteVariant,
        num_days: usize,
        num_people: u32,
        currency: Currency,
        rates: ExchangeRates,
    ) -> Self {
        Self {
            num_people,
            currency,
            variant,
            catalog: default_catalog(variant),
            day_configs: default_day_configs(variant, num_days, num_people),
            rates,
        }
    }

    pub fn num_days(&self) -> usize {
        self.day_configs.len()
    }
}
