//! Pricing engine module for tour quotes.
//!
//! Prices a multi-day group trip from a cost catalog and per-day selections.
//! Everything here is pure: the session owns the state and calls in.

pub mod calculators;
pub mod currency;
pub mod defaults;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    allocate_vehicles, client_price, compute_day_total, compute_grand_total, day_breakdown,
    per_person, round_money, DayBreakdown, VehicleAllocation,
};
pub use currency::{convert, format_amount, Currency, ExchangeRates, Money};
pub use defaults::{default_catalog, default_day_configs, tourism_options};
pub use models::{
    Catalog, Category, ClientBasis, DayConfig, DayField, ItemSet, MealSlot, Meals, Price,
    PricingRules, QuoteVariant, TourBracket,
};
pub use requests::QuoteRequest;
pub use responses::{CurrencyAmounts, DayTotalResponse, QuoteSummary};
pub use services::summarize;
