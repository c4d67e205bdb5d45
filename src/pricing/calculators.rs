//! Core pricing calculation functions.
//!
//! Pure functions for quote math - no session state, no formatting.
//! Amounts are whole yen; keys missing from the catalog contribute nothing.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{QuoteError, Result};

use super::models::{Catalog, Category, DayConfig, Price};

/// Client price multiplier (operator cost doubled: 50% margin)
pub const CLIENT_MARKUP: Price = 2;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tour_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Vehicles booked for one day's transport selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleAllocation {
    /// Vehicle count per transport key
    pub vehicles: BTreeMap<String, u32>,
    /// Seats covered by the booked vehicles
    pub capacity: u64,
    pub cost: Price,
}

impl VehicleAllocation {
    pub fn vehicle_count(&self) -> u32 {
        self.vehicles.values().sum()
    }
}

/// A transport option that can actually be booked
struct Vehicle<'a> {
    key: &'a str,
    capacity: u64,
    price: Price,
}

impl Vehicle<'_> {
    /// `self` is strictly cheaper per seat than `other`
    fn cheaper_per_seat_than(&self, other: &Vehicle<'_>) -> bool {
        (self.price as u128) * (other.capacity as u128)
            < (other.price as u128) * (self.capacity as u128)
    }
}

/// Allocate vehicles for the selected transport options.
///
/// Only options with a catalog price and a positive capacity take part.
/// A single option books `ceil(people / capacity)` vehicles. Several options
/// book one vehicle of each type first, then top up one vehicle at a time with
/// the type of lowest price per seat until everyone is covered. Equal ratios go
/// to the lexically smallest key. The greedy top-up is not always the cheapest
/// possible allocation.
pub fn allocate_vehicles(
    selected: &BTreeSet<String>,
    catalog: &Catalog,
    num_people: u32,
) -> VehicleAllocation {
    let options: Vec<Vehicle<'_>> = selected
        .iter()
        .filter_map(|key| {
            let price = catalog.price(Category::Transport, key)?;
            let capacity = catalog.rules.capacity(key).filter(|c| *c > 0)?;
            Some(Vehicle {
                key: key.as_str(),
                capacity: u64::from(capacity),
                price,
            })
        })
        .collect();

    let people = u64::from(num_people);
    let mut allocation = VehicleAllocation::default();

    match options.as_slice() {
        [] => {}
        [only] => {
            let count = people.div_ceil(only.capacity);
            if count > 0 {
                allocation
                    .vehicles
                    .insert(only.key.to_string(), count as u32);
            }
            allocation.capacity = count * only.capacity;
            allocation.cost = only.price.saturating_mul(count);
        }
        several => {
            for vehicle in several {
                book(&mut allocation, vehicle);
            }

            // `several` is in key order, so the first strict minimum wins ties
            let mut best = &several[0];
            for vehicle in &several[1..] {
                if vehicle.cheaper_per_seat_than(best) {
                    best = vehicle;
                }
            }

            // `best` never changes, so the whole top-up is booked at once
            if allocation.capacity < people {
                let extra = (people - allocation.capacity).div_ceil(best.capacity);
                tracing::trace!(
                    vehicle = best.key,
                    covered = allocation.capacity,
                    people,
                    extra,
                    "Topping up transport"
                );
                book_many(&mut allocation, best, extra);
            }
        }
    }

    allocation
}

fn book(allocation: &mut VehicleAllocation, vehicle: &Vehicle<'_>) {
    book_many(allocation, vehicle, 1);
}

fn book_many(allocation: &mut VehicleAllocation, vehicle: &Vehicle<'_>, count: u64) {
    let booked = allocation
        .vehicles
        .entry(vehicle.key.to_string())
        .or_insert(0);
    *booked = booked.saturating_add(u32::try_from(count).unwrap_or(u32::MAX));
    allocation.capacity = allocation
        .capacity
        .saturating_add(count.saturating_mul(vehicle.capacity));
    allocation.cost = allocation
        .cost
        .saturating_add(vehicle.price.saturating_mul(count));
}

/// Day cost split by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayBreakdown {
    pub hotel: Price,
    pub tourism: Price,
    pub tour_guide: Price,
    pub bus: Price,
    pub business: Price,
    pub transport: Price,
    pub extras: Price,
    pub meals: Price,
}

impl DayBreakdown {
    pub fn total(&self) -> Price {
        [
            self.hotel,
            self.tourism,
            self.tour_guide,
            self.bus,
            self.business,
            self.transport,
            self.extras,
            self.meals,
        ]
        .into_iter()
        .fold(0, Price::saturating_add)
    }
}

/// Price each category of one day's selections.
pub fn day_breakdown(config: &DayConfig, catalog: &Catalog, num_people: u32) -> DayBreakdown {
    let people = Price::from(num_people);
    let flat = |category: Category, key: Option<&str>| -> Price {
        key.and_then(|k| catalog.price(category, k)).unwrap_or(0)
    };

    let business = match config.business_activity.as_deref() {
        Some(key) if catalog.rules.is_per_person_business(key) => {
            flat(Category::BusinessActivities, Some(key)).saturating_mul(people)
        }
        key => flat(Category::BusinessActivities, key),
    };

    let extras = config
        .extras
        .iter()
        .map(|key| {
            let price = flat(Category::Extras, Some(key.as_str()));
            if catalog.rules.is_group_priced_extra(key) {
                price
            } else {
                price.saturating_mul(people)
            }
        })
        .fold(0, Price::saturating_add);

    let meals = config
        .meals
        .iter()
        .map(|key| flat(Category::Meals, Some(key)).saturating_mul(people))
        .fold(0, Price::saturating_add);

    DayBreakdown {
        hotel: flat(Category::Hotel, config.hotel.as_deref()).saturating_mul(people),
        tourism: flat(Category::TourismActivities, config.tourism_activity.as_deref()),
        tour_guide: flat(Category::TourGuides, config.tour_guide.as_deref()),
        bus: flat(Category::Bus, config.bus.as_deref()),
        business,
        transport: allocate_vehicles(&config.transport, catalog, num_people).cost,
        extras,
        meals,
    }
}

/// Operator cost of one day.
pub fn compute_day_total(config: &DayConfig, catalog: &Catalog, num_people: u32) -> Price {
    day_breakdown(config, catalog, num_people).total()
}

/// Operator cost of the whole trip: the sum of the day totals.
pub fn compute_grand_total(day_configs: &[DayConfig], catalog: &Catalog, num_people: u32) -> Price {
    day_configs
        .iter()
        .map(|config| compute_day_total(config, catalog, num_people))
        .fold(0, Price::saturating_add)
}

/// Client-facing price for an operator cost.
pub fn client_price(total: Price) -> Price {
    total.saturating_mul(CLIENT_MARKUP)
}

/// Exact per-person share of a group amount.
pub fn per_person(amount: Price, num_people: u32) -> Result<Decimal> {
    if num_people == 0 {
        return Err(QuoteError::NoTravelers);
    }
    Ok(Decimal::from(amount) / Decimal::from(num_people))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{MealSlot, PricingRules};
    use rust_decimal_macros::dec;

    fn transport_catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.set_price(Category::Transport, "airport-transfer", 40000);
        catalog.set_price(Category::Transport, "airport-transfer-small", 20000);
        catalog.set_price(Category::Transport, "city-transfer", 7000);
        catalog.rules = PricingRules {
            transport_capacity: [
                ("airport-transfer".to_string(), 9),
                ("airport-transfer-small".to_string(), 4),
                ("city-transfer".to_string(), 4),
            ]
            .into_iter()
            .collect(),
            ..PricingRules::default()
        };
        catalog
    }

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_halves_away_from_zero() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
        assert_eq!(round_money(dec!(2.45), 1), dec!(2.5));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== allocate_vehicles tests ====================

    #[test]
    fn test_allocate_nothing_selected() {
        let allocation = allocate_vehicles(&BTreeSet::new(), &transport_catalog(), 10);
        assert_eq!(allocation, VehicleAllocation::default());
    }

    #[test]
    fn test_allocate_single_option_rounds_vehicles_up() {
        let catalog = transport_catalog();
        for people in 1..=30u32 {
            let allocation = allocate_vehicles(&keys(&["airport-transfer"]), &catalog, people);
            let vehicles = u64::from(people).div_ceil(9);
            assert_eq!(allocation.cost, vehicles * 40000, "{} people", people);
            assert_eq!(allocation.vehicle_count() as u64, vehicles);
        }

        let allocation = allocate_vehicles(&keys(&["city-transfer"]), &catalog, 10);
        assert_eq!(allocation.cost, 21000);
        assert_eq!(allocation.capacity, 12);
    }

    #[test]
    fn test_allocate_single_option_for_nobody_books_nothing() {
        let allocation = allocate_vehicles(&keys(&["city-transfer"]), &transport_catalog(), 0);
        assert_eq!(allocation.cost, 0);
        assert!(allocation.vehicles.is_empty());
    }

    #[test]
    fn test_allocate_several_seeds_one_of_each() {
        let catalog = transport_catalog();
        // 9 + 4 seats already cover 10 people
        let allocation =
            allocate_vehicles(&keys(&["airport-transfer", "city-transfer"]), &catalog, 10);
        assert_eq!(allocation.vehicles["airport-transfer"], 1);
        assert_eq!(allocation.vehicles["city-transfer"], 1);
        assert_eq!(allocation.capacity, 13);
        assert_eq!(allocation.cost, 47000);

        // Seeding happens even when one vehicle alone would suffice
        let allocation =
            allocate_vehicles(&keys(&["airport-transfer", "city-transfer"]), &catalog, 2);
        assert_eq!(allocation.vehicle_count(), 2);
        assert_eq!(allocation.cost, 47000);
    }

    #[test]
    fn test_allocate_several_tops_up_with_cheapest_per_seat() {
        let catalog = transport_catalog();
        // city-transfer: 1750/seat, airport-transfer: ~4444/seat
        let allocation =
            allocate_vehicles(&keys(&["airport-transfer", "city-transfer"]), &catalog, 20);
        assert_eq!(allocation.vehicles["airport-transfer"], 1);
        assert_eq!(allocation.vehicles["city-transfer"], 3);
        assert_eq!(allocation.capacity, 21);
        assert_eq!(allocation.cost, 40000 + 3 * 7000);

        // airport-transfer: ~4444/seat beats airport-transfer-small: 5000/seat
        let allocation = allocate_vehicles(
            &keys(&["airport-transfer", "airport-transfer-small"]),
            &catalog,
            20,
        );
        assert_eq!(allocation.vehicles["airport-transfer"], 2);
        assert_eq!(allocation.vehicles["airport-transfer-small"], 1);
        assert_eq!(allocation.cost, 100000);
    }

    #[test]
    fn test_allocate_huge_group_tops_up_in_one_step() {
        let catalog = transport_catalog();
        let selected = keys(&["airport-transfer", "city-transfer"]);

        // Seeded with 13 seats; city-transfer is cheaper per seat (1750 vs 4444)
        let allocation = allocate_vehicles(&selected, &catalog, 40_000_000);
        assert_eq!(allocation.vehicles["airport-transfer"], 1);
        assert_eq!(allocation.vehicles["city-transfer"], 9_999_998);
        assert_eq!(allocation.capacity, 40_000_001);
        assert_eq!(allocation.cost, 40000 + 7000 * 9_999_998);

        let allocation = allocate_vehicles(&selected, &catalog, u32::MAX);
        assert!(allocation.capacity >= u64::from(u32::MAX));
        assert_eq!(allocation.vehicles["airport-transfer"], 1);
    }

    #[test]
    fn test_allocate_tie_goes_to_smallest_key() {
        let mut catalog = Catalog::default();
        catalog.set_price(Category::Transport, "van-b", 16000);
        catalog.set_price(Category::Transport, "van-a", 8000);
        catalog.rules.transport_capacity.insert("van-a".to_string(), 4);
        catalog.rules.transport_capacity.insert("van-b".to_string(), 8);

        let allocation = allocate_vehicles(&keys(&["van-b", "van-a"]), &catalog, 13);
        assert_eq!(allocation.vehicles["van-a"], 2);
        assert_eq!(allocation.vehicles["van-b"], 1);
        assert_eq!(allocation.cost, 32000);
    }

    #[test]
    fn test_allocate_ignores_unpriced_or_unsized_options() {
        let mut catalog = transport_catalog();
        catalog.set_price(Category::Transport, "rickshaw", 1000);
        catalog.rules.transport_capacity.insert("broken".to_string(), 0);
        catalog.set_price(Category::Transport, "broken", 1);

        // Only city-transfer is bookable, so the single-option rule applies
        let allocation = allocate_vehicles(
            &keys(&["city-transfer", "rickshaw", "broken", "helicopter"]),
            &catalog,
            10,
        );
        assert_eq!(allocation.cost, 21000);
        assert_eq!(allocation.vehicles.len(), 1);
    }

    // ==================== day_breakdown tests ====================

    fn pricing_catalog() -> Catalog {
        let mut catalog = transport_catalog();
        catalog.set_price(Category::Hotel, "standard", 15000);
        catalog.set_price(Category::TourismActivities, "city-tour-half", 70000);
        catalog.set_price(Category::TourGuides, "guide-half-day", 25000);
        catalog.set_price(Category::Bus, "coach", 100000);
        catalog.set_price(Category::BusinessActivities, "business-meeting", 50000);
        catalog.set_price(Category::BusinessActivities, "conference-full", 100000);
        catalog.set_price(Category::Extras, "translator-half", 30000);
        catalog.set_price(Category::Extras, "kimono", 5000);
        catalog.set_price(Category::Meals, "lunch-standard", 10000);
        catalog.set_price(Category::Meals, "dinner-business", 25000);
        catalog
            .rules
            .group_priced_extras
            .insert("translator-half".to_string());
        catalog
            .rules
            .per_person_business
            .insert("conference-full".to_string());
        catalog
    }

    fn full_day() -> DayConfig {
        let mut day = DayConfig {
            hotel: Some("standard".to_string()),
            tourism_activity: Some("city-tour-half".to_string()),
            tour_guide: Some("guide-half-day".to_string()),
            bus: Some("coach".to_string()),
            business_activity: Some("business-meeting".to_string()),
            transport: keys(&["city-transfer"]),
            extras: keys(&["translator-half", "kimono"]),
            ..DayConfig::default()
        };
        day.meals.set(MealSlot::Lunch, Some("lunch-standard".to_string()));
        day.meals.set(MealSlot::Dinner, Some("dinner-business".to_string()));
        day
    }

    #[test]
    fn test_day_breakdown_per_category() {
        let breakdown = day_breakdown(&full_day(), &pricing_catalog(), 10);

        assert_eq!(breakdown.hotel, 150000); // per person
        assert_eq!(breakdown.tourism, 70000); // flat
        assert_eq!(breakdown.tour_guide, 25000); // flat
        assert_eq!(breakdown.bus, 100000); // flat
        assert_eq!(breakdown.business, 50000); // flat
        assert_eq!(breakdown.transport, 21000); // 3 cars
        assert_eq!(breakdown.extras, 30000 + 50000); // translator flat, kimono per person
        assert_eq!(breakdown.meals, 100000 + 250000);
        assert_eq!(breakdown.total(), 846000);
    }

    #[test]
    fn test_per_person_business_activity() {
        let mut day = DayConfig::default();
        day.business_activity = Some("conference-full".to_string());
        assert_eq!(compute_day_total(&day, &pricing_catalog(), 10), 1000000);

        let mut catalog = pricing_catalog();
        catalog.rules.per_person_business.clear();
        assert_eq!(compute_day_total(&day, &catalog, 10), 100000);
    }

    #[test]
    fn test_missing_keys_contribute_zero() {
        let mut catalog = pricing_catalog();
        catalog.remove_item(Category::Hotel, "standard");
        catalog.remove_item(Category::Extras, "kimono");

        let breakdown = day_breakdown(&full_day(), &catalog, 10);
        assert_eq!(breakdown.hotel, 0);
        assert_eq!(breakdown.extras, 30000);

        let empty = Catalog::default();
        assert_eq!(compute_day_total(&full_day(), &empty, 10), 0);
    }

    #[test]
    fn test_empty_day_costs_nothing() {
        assert_eq!(compute_day_total(&DayConfig::default(), &pricing_catalog(), 10), 0);
    }

    // ==================== totals tests ====================

    #[test]
    fn test_grand_total_is_sum_of_days() {
        let catalog = pricing_catalog();
        let mut light = DayConfig::default();
        light.hotel = Some("standard".to_string());
        let days = vec![full_day(), light, DayConfig::default(), full_day()];

        for people in [1, 4, 9, 10, 25] {
            let expected: Price = days
                .iter()
                .map(|d| compute_day_total(d, &catalog, people))
                .sum();
            assert_eq!(compute_grand_total(&days, &catalog, people), expected);
        }
        assert_eq!(compute_grand_total(&[], &catalog, 10), 0);
    }

    #[test]
    fn test_client_price_doubles_cost() {
        assert_eq!(client_price(3165000), 6330000);
        assert_eq!(client_price(0), 0);
    }

    #[test]
    fn test_per_person_split() {
        assert_eq!(per_person(6330000, 10).unwrap(), dec!(633000));
        assert_eq!(round_money(per_person(100000, 3).unwrap(), 0), dec!(33333));
        assert!(matches!(per_person(1000, 0), Err(QuoteError::NoTravelers)));
    }
}
