//! Quote summary assembly.
//!
//! Combines the calculators and currency formatting into the summary the
//! form and its sticky bar display. Recomputed in full on every change.

use rust_decimal::Decimal;

use super::calculators::{client_price, compute_grand_total, day_breakdown, per_person};
use super::currency::format_amount;
use super::requests::QuoteRequest;
use super::responses::{CurrencyAmounts, DayTotalResponse, QuoteSummary};

/// Shown where a per-person figure cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Price a request: per-day totals, grand total and client price.
pub fn summarize(request: &QuoteRequest) -> QuoteSummary {
    let people = request.num_people;
    let rates = &request.rates;

    let days = request
        .day_configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            let breakdown = day_breakdown(config, &request.catalog, people);
            let total = breakdown.total();
            DayTotalResponse {
                day: index + 1,
                breakdown,
                total,
                group_display: format_amount(Decimal::from(total), request.currency, rates),
                per_person_display: per_person(total, people)
                    .map(|share| format_amount(share, request.currency, rates))
                    .unwrap_or_else(|_| NOT_AVAILABLE.to_string()),
            }
        })
        .collect();

    let grand_total = compute_grand_total(&request.day_configs, &request.catalog, people);
    let client_total = client_price(grand_total);

    QuoteSummary {
        num_days: request.num_days(),
        num_people: people,
        currency: request.currency,
        days,
        grand_total,
        group_cost: CurrencyAmounts::new(Decimal::from(grand_total), rates),
        per_person_cost: per_person(grand_total, people)
            .ok()
            .map(|share| CurrencyAmounts::new(share, rates)),
        client_total,
        client_group: CurrencyAmounts::new(Decimal::from(client_total), rates),
        client_per_person: per_person(client_total, people)
            .ok()
            .map(|share| CurrencyAmounts::new(share, rates)),
        client_basis: request.variant.client_basis(),
    }
}
