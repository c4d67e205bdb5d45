//! Catalog and itinerary models for pricing.
//!
//! Prices are whole units of the home currency (JPY). Every category keeps its
//! entries in a `BTreeMap`, so iteration order is lexical by key.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Unit price in the home currency
pub type Price = u64;

/// Groups above this size use the large-group tour entries
pub const LARGE_GROUP_THRESHOLD: u32 = 7;

/// Cost catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Hotel,
    TourismActivities,
    TourGuides,
    Bus,
    BusinessActivities,
    Transport,
    Extras,
    Meals,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Hotel,
        Category::TourismActivities,
        Category::TourGuides,
        Category::Bus,
        Category::BusinessActivities,
        Category::Transport,
        Category::Extras,
        Category::Meals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotel => "hotel",
            Category::TourismActivities => "tourismActivities",
            Category::TourGuides => "tourGuides",
            Category::Bus => "bus",
            Category::BusinessActivities => "businessActivities",
            Category::Transport => "transport",
            Category::Extras => "extras",
            Category::Meals => "meals",
        }
    }

    /// Heading used by the settings editor
    pub fn title(&self) -> &'static str {
        match self {
            Category::Hotel => "Hotel",
            Category::TourismActivities => "Tourism Activities",
            Category::TourGuides => "Tour Guides",
            Category::Bus => "Bus",
            Category::BusinessActivities => "Business Activities",
            Category::Transport => "Transport",
            Category::Extras => "Extras",
            Category::Meals => "Meals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| QuoteError::UnknownCategory(s.to_string()))
    }
}

/// Rules that decide how catalog entries are charged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRules {
    /// People carried by one vehicle, per transport key
    #[serde(default)]
    pub transport_capacity: BTreeMap<String, u32>,
    /// Extras charged once per group instead of per person
    #[serde(default)]
    pub group_priced_extras: BTreeSet<String>,
    /// Business activities charged per person instead of per group
    #[serde(default)]
    pub per_person_business: BTreeSet<String>,
}

impl PricingRules {
    pub fn capacity(&self, key: &str) -> Option<u32> {
        self.transport_capacity.get(key).copied()
    }

    pub fn is_group_priced_extra(&self, key: &str) -> bool {
        self.group_priced_extras.contains(key)
    }

    pub fn is_per_person_business(&self, key: &str) -> bool {
        self.per_person_business.contains(key)
    }
}

/// Mapping from category to item key to unit price, plus the charging rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub prices: BTreeMap<Category, BTreeMap<String, Price>>,
    #[serde(default)]
    pub rules: PricingRules,
}

impl Catalog {
    /// Price of a single entry; `None` when the key is not in the catalog
    pub fn price(&self, category: Category, key: &str) -> Option<Price> {
        self.prices.get(&category)?.get(key).copied()
    }

    /// Entries of a category in key order
    pub fn items(&self, category: Category) -> impl Iterator<Item = (&str, Price)> + '_ {
        self.prices
            .get(&category)
            .into_iter()
            .flat_map(|items| items.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    pub fn set_price(&mut self, category: Category, key: &str, price: Price) {
        self.prices
            .entry(category)
            .or_default()
            .insert(key.to_string(), price);
    }

    /// Replace one entry's price with the parsed settings input.
    ///
    /// Returns the stored price. Day selections are not revalidated.
    pub fn update_price(&mut self, category: Category, key: &str, raw: &str) -> Price {
        let price = parse_price(raw);
        self.set_price(category, key, price);
        price
    }

    pub fn remove_item(&mut self, category: Category, key: &str) -> Option<Price> {
        self.prices.get_mut(&category)?.remove(key)
    }
}

/// Parse a settings price the way a lenient integer input does.
///
/// Leading digits are kept (`"1500.7"` gives 1500); empty, non-numeric and
/// negative input gives 0. Digit runs too long for a `Price` saturate.
pub fn parse_price(raw: &str) -> Price {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(Price::MAX)
}

/// Meal slot; each day holds at most one meal per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 2] = [MealSlot::Lunch, MealSlot::Dinner];

    /// Key prefix of the catalog meals that belong to this slot
    pub fn prefix(&self) -> &'static str {
        match self {
            MealSlot::Lunch => "lunch-",
            MealSlot::Dinner => "dinner-",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn accepts(&self, key: &str) -> bool {
        key.starts_with(self.prefix())
    }
}

/// Selected meals for one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
}

impl Meals {
    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    pub fn set(&mut self, slot: MealSlot, key: Option<String>) {
        match slot {
            MealSlot::Lunch => self.lunch = key,
            MealSlot::Dinner => self.dinner = key,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lunch.as_deref().into_iter().chain(self.dinner.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.lunch.is_none() && self.dinner.is_none()
    }
}

/// Single-choice fields of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    Hotel,
    TourismActivity,
    TourGuide,
    Bus,
    BusinessActivity,
}

impl DayField {
    pub const ALL: [DayField; 5] = [
        DayField::Hotel,
        DayField::TourismActivity,
        DayField::TourGuide,
        DayField::Bus,
        DayField::BusinessActivity,
    ];

    pub fn category(&self) -> Category {
        match self {
            DayField::Hotel => Category::Hotel,
            DayField::TourismActivity => Category::TourismActivities,
            DayField::TourGuide => Category::TourGuides,
            DayField::Bus => Category::Bus,
            DayField::BusinessActivity => Category::BusinessActivities,
        }
    }
}

/// Multi-choice fields of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSet {
    Transport,
    Extras,
}

impl ItemSet {
    pub fn category(&self) -> Category {
        match self {
            ItemSet::Transport => Category::Transport,
            ItemSet::Extras => Category::Extras,
        }
    }
}

/// Selections for one day of the trip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DayConfig {
    pub hotel: Option<String>,
    pub tourism_activity: Option<String>,
    pub tour_guide: Option<String>,
    pub bus: Option<String>,
    pub business_activity: Option<String>,
    pub transport: BTreeSet<String>,
    pub extras: BTreeSet<String>,
    pub meals: Meals,
}

impl DayConfig {
    pub fn choice(&self, field: DayField) -> Option<&str> {
        match field {
            DayField::Hotel => self.hotel.as_deref(),
            DayField::TourismActivity => self.tourism_activity.as_deref(),
            DayField::TourGuide => self.tour_guide.as_deref(),
            DayField::Bus => self.bus.as_deref(),
            DayField::BusinessActivity => self.business_activity.as_deref(),
        }
    }

    pub fn set_choice(&mut self, field: DayField, key: Option<String>) {
        let slot = match field {
            DayField::Hotel => &mut self.hotel,
            DayField::TourismActivity => &mut self.tourism_activity,
            DayField::TourGuide => &mut self.tour_guide,
            DayField::Bus => &mut self.bus,
            DayField::BusinessActivity => &mut self.business_activity,
        };
        *slot = key;
    }

    pub fn items(&self, set: ItemSet) -> &BTreeSet<String> {
        match set {
            ItemSet::Transport => &self.transport,
            ItemSet::Extras => &self.extras,
        }
    }

    /// Add or remove one checkbox item
    pub fn toggle_item(&mut self, set: ItemSet, key: &str, checked: bool) {
        let items = match set {
            ItemSet::Transport => &mut self.transport,
            ItemSet::Extras => &mut self.extras,
        };
        if checked {
            items.insert(key.to_string());
        } else {
            items.remove(key);
        }
    }
}

/// Group-size class used to pick tourism entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourBracket {
    Small,
    Large,
}

impl TourBracket {
    pub fn for_group(num_people: u32) -> Self {
        if num_people > LARGE_GROUP_THRESHOLD {
            TourBracket::Large
        } else {
            TourBracket::Small
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TourBracket::Small => "-small",
            TourBracket::Large => "-large",
        }
    }

    /// Catalog key of a bracketed tour, e.g. `city-tour-full-large`
    pub fn key(&self, base: &str) -> String {
        format!("{}{}", base, self.suffix())
    }

    pub fn other(&self) -> Self {
        match self {
            TourBracket::Small => TourBracket::Large,
            TourBracket::Large => TourBracket::Small,
        }
    }
}

/// How the client price is headlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientBasis {
    Group,
    PerPerson,
}

/// Calculator flavour: default catalog, charging rules and defaulting triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteVariant {
    /// Original mission catalog, no guides or buses
    Basic,
    /// Guides, buses, bracketed tours and per-person conference pricing
    #[default]
    Guided,
}

impl QuoteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteVariant::Basic => "basic",
            QuoteVariant::Guided => "guided",
        }
    }

    /// Whether a group-size change regenerates the day configurations
    pub fn regenerates_on_group_size(&self) -> bool {
        matches!(self, QuoteVariant::Guided)
    }

    pub fn brackets_tours(&self) -> bool {
        matches!(self, QuoteVariant::Guided)
    }

    pub fn client_basis(&self) -> ClientBasis {
        match self {
            QuoteVariant::Basic => ClientBasis::Group,
            QuoteVariant::Guided => ClientBasis::PerPerson,
        }
    }
}

impl FromStr for QuoteVariant {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(QuoteVariant::Basic),
            "guided" => Ok(QuoteVariant::Guided),
            other => Err(QuoteError::UnknownVariant(other.to_string())),
        }
    }
}
