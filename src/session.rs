//! Quote session state
//!
//! Holds the form state of one page view (trip length, group size, display
//! currency, catalog, per-day selections) and applies user input events.
//! Pricing is recomputed from scratch whenever a summary is requested.

use tracing::debug;

use crate::config::CalculatorConfig;
use crate::error::{QuoteError, Result};
use crate::pricing::defaults::{clamp_days, default_day_configs};
use crate::pricing::{
    summarize, Catalog, Category, Currency, DayConfig, DayField, ItemSet, MealSlot, Price,
    QuoteRequest, QuoteSummary, QuoteVariant,
};
use crate::views;

/// Share of the summary region that must be on screen for it to count as visible
pub const SUMMARY_VISIBILITY_THRESHOLD: f64 = 0.1;

/// Application state for one calculator page
#[derive(Debug, Clone)]
pub struct QuoteSession {
    request: QuoteRequest,
    title: String,
    show_settings: bool,
    summary_visible: bool,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl QuoteSession {
    pub fn new(config: &CalculatorConfig) -> Self {
        let request = QuoteRequest::with_defaults(
            config.variant,
            clamp_days(config.num_days),
            config.num_people.max(1),
            config.currency,
            config.rates,
        );
        Self {
            request,
            title: config.title.clone(),
            show_settings: false,
            summary_visible: true,
        }
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn variant(&self) -> QuoteVariant {
        self.request.variant
    }

    pub fn num_days(&self) -> usize {
        self.request.num_days()
    }

    pub fn num_people(&self) -> u32 {
        self.request.num_people
    }

    pub fn currency(&self) -> Currency {
        self.request.currency
    }

    pub fn catalog(&self) -> &Catalog {
        &self.request.catalog
    }

    pub fn day_configs(&self) -> &[DayConfig] {
        &self.request.day_configs
    }

    pub fn show_settings(&self) -> bool {
        self.show_settings
    }

    /// Apply the "Number of Days" input.
    ///
    /// Unparseable input keeps the current length; numbers are clamped to the
    /// supported range. A change regenerates every day, discarding edits.
    pub fn set_num_days(&mut self, raw: &str) -> usize {
        let current = self.num_days();
        let Ok(requested) = raw.trim().parse::<usize>() else {
            debug!("Ignoring day count input {:?}", raw);
            return current;
        };

        let num_days = clamp_days(requested);
        if num_days != current {
            self.regenerate(num_days);
        }
        num_days
    }

    /// Apply the "Number of People" input.
    ///
    /// Unparseable input and groups below one traveler keep the current size.
    pub fn set_num_people(&mut self, raw: &str) -> u32 {
        let current = self.num_people();
        let people = match raw.trim().parse::<u32>() {
            Ok(people) if people >= 1 => people,
            _ => {
                debug!("Ignoring group size input {:?}", raw);
                return current;
            }
        };

        if people != current {
            self.request.num_people = people;
            if self.variant().regenerates_on_group_size() {
                self.regenerate(self.num_days());
            }
        }
        people
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.request.currency = currency;
    }

    pub fn toggle_settings(&mut self) -> bool {
        self.show_settings = !self.show_settings;
        self.show_settings
    }

    /// Select (or clear, with `None`) a single-choice field of one day
    pub fn set_day_choice(&mut self, day: usize, field: DayField, key: Option<&str>) -> Result<()> {
        let config = self.day_mut(day)?;
        config.set_choice(field, key.filter(|k| !k.is_empty()).map(str::to_string));
        Ok(())
    }

    /// Check or uncheck a transport or extras item of one day
    pub fn set_day_item(
        &mut self,
        day: usize,
        set: ItemSet,
        key: &str,
        checked: bool,
    ) -> Result<()> {
        self.day_mut(day)?.toggle_item(set, key, checked);
        Ok(())
    }

    /// Choose the lunch or dinner of one day; `None` clears the slot
    pub fn set_meal(&mut self, day: usize, slot: MealSlot, key: Option<&str>) -> Result<()> {
        let key = key.filter(|k| !k.is_empty());
        if let Some(key) = key {
            if !slot.accepts(key) {
                return Err(QuoteError::InvalidMealKey {
                    slot: slot.as_str(),
                    key: key.to_string(),
                });
            }
        }
        self.day_mut(day)?.meals.set(slot, key.map(str::to_string));
        Ok(())
    }

    /// Apply a settings edit; returns the stored price
    pub fn update_cost(&mut self, category: &str, key: &str, raw: &str) -> Result<Price> {
        let category: Category = category.parse()?;
        let price = self.request.catalog.update_price(category, key, raw);
        debug!(%category, key, price, "Catalog price updated");
        Ok(price)
    }

    /// Remove a catalog entry; selections that reference it now cost nothing
    pub fn remove_cost(&mut self, category: &str, key: &str) -> Result<Option<Price>> {
        let category: Category = category.parse()?;
        Ok(self.request.catalog.remove_item(category, key))
    }

    /// Record the intersection ratio reported for the summary region
    pub fn report_intersection(&mut self, ratio: f64) {
        self.set_summary_visible(ratio >= SUMMARY_VISIBILITY_THRESHOLD);
    }

    pub fn set_summary_visible(&mut self, visible: bool) {
        if self.summary_visible != visible {
            debug!(visible, "Summary visibility changed");
        }
        self.summary_visible = visible;
    }

    /// The compact summary bar is shown while the full summary is off screen
    pub fn show_sticky_summary(&self) -> bool {
        !self.summary_visible
    }

    pub fn summary(&self) -> QuoteSummary {
        summarize(&self.request)
    }

    pub fn summary_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.summary())?)
    }

    /// Render the calculator page
    pub fn render(&self) -> Result<String> {
        views::render_calculator(self)
    }

    fn day_mut(&mut self, day: usize) -> Result<&mut DayConfig> {
        let len = self.request.day_configs.len();
        self.request
            .day_configs
            .get_mut(day)
            .ok_or(QuoteError::DayOutOfRange { index: day, len })
    }

    fn regenerate(&mut self, num_days: usize) {
        debug!(
            num_days,
            num_people = self.request.num_people,
            variant = self.variant().as_str(),
            "Regenerating day configurations"
        );
        self.request.day_configs =
            default_day_configs(self.request.variant, num_days, self.request.num_people);
    }
}
