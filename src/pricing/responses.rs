//! Quote summary DTOs.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::DayBreakdown;
use super::currency::{convert, Currency, ExchangeRates, Money};
use super::models::{ClientBasis, Price};

/// One amount shown in every supported currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyAmounts {
    pub jpy: Money,
    pub usd: Money,
    pub kzt: Money,
}

impl CurrencyAmounts {
    pub fn new(amount: Decimal, rates: &ExchangeRates) -> Self {
        Self {
            jpy: convert(amount, Currency::Jpy, rates),
            usd: convert(amount, Currency::Usd, rates),
            kzt: convert(amount, Currency::Kzt, rates),
        }
    }

    pub fn get(&self, currency: Currency) -> &Money {
        match currency {
            Currency::Jpy => &self.jpy,
            Currency::Usd => &self.usd,
            Currency::Kzt => &self.kzt,
        }
    }
}

/// Totals for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTotalResponse {
    /// 1-based day number
    pub day: usize,
    pub breakdown: DayBreakdown,
    pub total: Price,
    /// Group total in the display currency
    pub group_display: String,
    /// Per-person share in the display currency, `N/A` without travelers
    pub per_person_display: String,
}

/// Full quote for the running summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub num_days: usize,
    pub num_people: u32,
    pub currency: Currency,
    pub days: Vec<DayTotalResponse>,
    /// Operator cost in yen
    pub grand_total: Price,
    pub group_cost: CurrencyAmounts,
    pub per_person_cost: Option<CurrencyAmounts>,
    /// Client price in yen
    pub client_total: Price,
    pub client_group: CurrencyAmounts,
    pub client_per_person: Option<CurrencyAmounts>,
    pub client_basis: ClientBasis,
}

impl QuoteSummary {
    /// Client price as the variant headlines it
    pub fn client_headline(&self) -> Option<&CurrencyAmounts> {
        match self.client_basis {
            ClientBasis::Group => Some(&self.client_group),
            ClientBasis::PerPerson => self.client_per_person.as_ref(),
        }
    }
}
