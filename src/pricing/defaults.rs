//! Built-in catalogs and default itineraries.
//!
//! Defaults are regenerated from scratch whenever the trip length (or, for the
//! guided variant, the group size) changes. Earlier edits are discarded.

use std::collections::BTreeSet;

use super::models::{Catalog, Category, DayConfig, Meals, Price, QuoteVariant, TourBracket};

pub const MIN_DAYS: usize = 1;
pub const MAX_DAYS: usize = 14;

/// Trip length with a hand-authored itinerary
pub const NARRATIVE_TRIP_DAYS: usize = 7;

const HOTEL: &[(&str, Price)] = &[
    ("standard", 15000),
    ("business", 30000),
    ("luxury", 60000),
];

const BASIC_TOURS: &[(&str, Price)] = &[
    ("city-tour-full", 150000),
    ("city-tour-half", 70000),
    ("free-day", 0),
];

const GUIDED_TOURS: &[(&str, Price)] = &[
    ("city-tour-full-small", 100000),
    ("city-tour-full-large", 150000),
    ("city-tour-half-small", 50000),
    ("city-tour-half-large", 70000),
    ("free-day", 0),
];

const TOUR_GUIDES: &[(&str, Price)] = &[("guide-half-day", 25000), ("guide-full-day", 40000)];

const BUSES: &[(&str, Price)] = &[("minibus", 60000), ("coach", 100000)];

const BUSINESS: &[(&str, Price)] = &[
    ("conference-full", 100000),
    ("business-meeting", 50000),
    ("kaizen-half-day", 800000),
    ("kaizen-full-day", 1600000),
    ("ikigai-workshop-kamakura-full-day", 800000),
    ("zen-and-tour-kamakura-full-day", 400000),
    ("business-lectures-half-day", 300000),
];

/// (key, price per vehicle, seats per vehicle)
const TRANSPORT: &[(&str, Price, u32)] = &[
    ("airport-transfer", 40000, 9),
    ("city-transfer", 7000, 4),
    ("airport-transfer-small", 20000, 4),
];

const EXTRAS: &[(&str, Price)] = &[
    ("translator-full", 50000),
    ("translator-half", 30000),
    ("kimono", 5000),
    ("sports-cars", 30000),
    ("tea-ceremony", 3000),
    ("sumo", 5000),
    ("teamlabs", 5000),
    ("museum", 2000),
    ("onsen", 7000),
    ("business-materials", 5000),
    ("shinkansen-standard", 15000),
    ("shinkansen-business", 30000),
    ("gift", 5000),
    ("expo", 8000),
];

const NETWORKING_RECEPTION: (&str, Price) = ("networking-reception", 150000);

const MEALS: &[(&str, Price)] = &[
    ("lunch-standard", 10000),
    ("lunch-business", 25000),
    ("lunch-luxury", 50000),
    ("dinner-standard", 10000),
    ("dinner-business", 25000),
    ("dinner-luxury", 50000),
];

const TRANSLATORS: &[&str] = &["translator-full", "translator-half"];

fn fill(catalog: &mut Catalog, category: Category, entries: &[(&str, Price)]) {
    for (key, price) in entries {
        catalog.set_price(category, key, *price);
    }
}

fn key_set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn shared_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    fill(&mut catalog, Category::Hotel, HOTEL);
    fill(&mut catalog, Category::BusinessActivities, BUSINESS);
    fill(&mut catalog, Category::Extras, EXTRAS);
    fill(&mut catalog, Category::Meals, MEALS);
    for (key, price, capacity) in TRANSPORT {
        catalog.set_price(Category::Transport, key, *price);
        catalog
            .rules
            .transport_capacity
            .insert(key.to_string(), *capacity);
    }
    catalog
}

/// Default cost catalog of a variant
pub fn default_catalog(variant: QuoteVariant) -> Catalog {
    let mut catalog = shared_catalog();
    match variant {
        QuoteVariant::Basic => {
            fill(&mut catalog, Category::TourismActivities, BASIC_TOURS);
            catalog.rules.group_priced_extras = key_set(TRANSLATORS);
        }
        QuoteVariant::Guided => {
            fill(&mut catalog, Category::TourismActivities, GUIDED_TOURS);
            fill(&mut catalog, Category::TourGuides, TOUR_GUIDES);
            fill(&mut catalog, Category::Bus, BUSES);
            let (key, price) = NETWORKING_RECEPTION;
            catalog.set_price(Category::Extras, key, price);

            let mut group_priced = key_set(TRANSLATORS);
            group_priced.insert(key.to_string());
            catalog.rules.group_priced_extras = group_priced;
            catalog.rules.per_person_business = key_set(&["conference-full"]);
        }
    }
    catalog
}

/// Tourism entries offered to a group of this size.
///
/// The guided variant hides the other bracket's tours; unbracketed entries
/// such as `free-day` are always offered.
pub fn tourism_options(
    catalog: &Catalog,
    variant: QuoteVariant,
    num_people: u32,
) -> Vec<(&str, Price)> {
    let hidden = TourBracket::for_group(num_people).other().suffix();
    catalog
        .items(Category::TourismActivities)
        .filter(|(key, _)| !variant.brackets_tours() || !key.ends_with(hidden))
        .collect()
}

/// Clamp a requested trip length into the supported range
pub fn clamp_days(num_days: usize) -> usize {
    num_days.clamp(MIN_DAYS, MAX_DAYS)
}

/// Kind of day in a default itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayTemplate {
    /// Arrival on a narrative trip: dinner only
    ArrivalDinner,
    /// Arrival on any other trip: lunch only
    ArrivalLunch,
    FullTour,
    /// Half-day tour, business meeting, lunch and dinner
    Working,
    /// Working day closed by a business dinner
    WorkingDinner,
    Departure,
}

fn template_for(index: usize, num_days: usize) -> DayTemplate {
    if num_days == NARRATIVE_TRIP_DAYS {
        match index {
            0 => DayTemplate::ArrivalDinner,
            1 => DayTemplate::FullTour,
            5 => DayTemplate::WorkingDinner,
            6 => DayTemplate::Departure,
            _ => DayTemplate::Working,
        }
    } else if index == 0 {
        DayTemplate::ArrivalLunch
    } else if index == num_days - 1 {
        DayTemplate::Departure
    } else {
        DayTemplate::Working
    }
}

fn meals(lunch: Option<&str>, dinner: Option<&str>) -> Meals {
    Meals {
        lunch: lunch.map(str::to_string),
        dinner: dinner.map(str::to_string),
    }
}

fn build_day(template: DayTemplate, variant: QuoteVariant, num_people: u32) -> DayConfig {
    let bracket = TourBracket::for_group(num_people);
    let tour = |base: &str| -> Option<String> {
        Some(if variant.brackets_tours() {
            bracket.key(base)
        } else {
            base.to_string()
        })
    };
    // Guides exist only in the guided catalog
    let guide = |key: &str| -> Option<String> {
        match variant {
            QuoteVariant::Guided => Some(key.to_string()),
            QuoteVariant::Basic => None,
        }
    };
    let standard = Some("standard".to_string());

    match template {
        DayTemplate::ArrivalDinner | DayTemplate::ArrivalLunch => DayConfig {
            hotel: standard,
            transport: key_set(&["airport-transfer"]),
            meals: if template == DayTemplate::ArrivalDinner {
                meals(None, Some("dinner-standard"))
            } else {
                meals(Some("lunch-standard"), None)
            },
            ..DayConfig::default()
        },
        DayTemplate::FullTour => DayConfig {
            hotel: standard,
            tourism_activity: tour("city-tour-full"),
            tour_guide: guide("guide-full-day"),
            transport: key_set(&["city-transfer"]),
            extras: key_set(&["tea-ceremony", "kimono"]),
            meals: meals(Some("lunch-standard"), Some("dinner-standard")),
            ..DayConfig::default()
        },
        DayTemplate::Working | DayTemplate::WorkingDinner => DayConfig {
            hotel: standard,
            tourism_activity: tour("city-tour-half"),
            tour_guide: guide("guide-half-day"),
            business_activity: Some("business-meeting".to_string()),
            transport: key_set(&["city-transfer"]),
            meals: if template == DayTemplate::WorkingDinner {
                meals(None, Some("dinner-business"))
            } else {
                meals(Some("lunch-standard"), Some("dinner-standard"))
            },
            ..DayConfig::default()
        },
        DayTemplate::Departure => DayConfig {
            transport: key_set(&["airport-transfer"]),
            ..DayConfig::default()
        },
    }
}

/// Fresh day configurations for a trip; always exactly `num_days` long.
pub fn default_day_configs(
    variant: QuoteVariant,
    num_days: usize,
    num_people: u32,
) -> Vec<DayConfig> {
    (0..num_days)
        .map(|index| build_day(template_for(index, num_days), variant, num_people))
        .collect()
}
