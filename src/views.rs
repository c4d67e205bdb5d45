//! Calculator page rendering
//!
//! Turns a session into the editable form, settings editor, summary block and
//! sticky summary bar. Templates live under `templates/`.

use askama::Template;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::pricing::defaults::{tourism_options, MAX_DAYS, MIN_DAYS};
use crate::pricing::services::NOT_AVAILABLE;
use crate::pricing::{
    format_amount, Catalog, Category, ClientBasis, Currency, CurrencyAmounts, DayConfig,
    DayField, ExchangeRates, ItemSet, MealSlot, Price, QuoteSummary,
};
use crate::session::QuoteSession;

/// Not offered on arrival and departure days
const CITY_TRANSFER: &str = "city-transfer";

/// Calculator page template
#[derive(Template)]
#[template(path = "calculator.html")]
struct CalculatorTemplate {
    title: String,
    num_days: usize,
    num_people: u32,
    min_days: usize,
    max_days: usize,
    currency_options: Vec<OptionView>,
    show_settings: bool,
    settings: Vec<SettingsCategoryView>,
    days: Vec<DayCardView>,
    summary: SummaryView,
    show_sticky: bool,
}

/// One `<option>` of a select
struct OptionView {
    value: String,
    label: String,
    selected: bool,
}

struct SelectView {
    name: String,
    label: String,
    none_label: String,
    options: Vec<OptionView>,
}

struct CheckboxView {
    name: String,
    value: String,
    label: String,
    checked: bool,
}

struct SettingsItemView {
    key: String,
    label: String,
    price: Price,
}

struct SettingsCategoryView {
    name: String,
    title: String,
    items: Vec<SettingsItemView>,
}

struct DayCardView {
    number: usize,
    selects: Vec<SelectView>,
    transport: Vec<CheckboxView>,
    meals: Vec<SelectView>,
    extras: Vec<CheckboxView>,
    group_total: String,
    per_person_total: String,
}

/// One summary line in all three currencies
struct AmountsView {
    jpy: String,
    usd: String,
    kzt: String,
}

impl AmountsView {
    fn from_amounts(amounts: Option<&CurrencyAmounts>) -> Self {
        match amounts {
            Some(a) => Self {
                jpy: a.jpy.to_string(),
                usd: a.usd.to_string(),
                kzt: a.kzt.to_string(),
            },
            None => Self {
                jpy: NOT_AVAILABLE.to_string(),
                usd: NOT_AVAILABLE.to_string(),
                kzt: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

struct SummaryView {
    group_cost: AmountsView,
    per_person_cost: AmountsView,
    client_group: AmountsView,
    client_per_person: AmountsView,
    client_headline: AmountsView,
    client_headline_label: String,
    num_people: u32,
    num_days: usize,
}

/// Render the full calculator page for a session
pub fn render_calculator(session: &QuoteSession) -> Result<String> {
    let summary = session.summary();
    let template = CalculatorTemplate {
        title: session.title().to_string(),
        num_days: session.num_days(),
        num_people: session.num_people(),
        min_days: MIN_DAYS,
        max_days: MAX_DAYS,
        currency_options: Currency::ALL
            .into_iter()
            .map(|c| OptionView {
                value: c.code().to_string(),
                label: c.code().to_string(),
                selected: c == session.currency(),
            })
            .collect(),
        show_settings: session.show_settings(),
        settings: if session.show_settings() {
            settings_views(session.catalog())
        } else {
            Vec::new()
        },
        days: day_views(session, &summary),
        summary: summary_view(&summary),
        show_sticky: session.show_sticky_summary(),
    };

    Ok(template.render()?)
}

/// `city-tour-half` -> `City Tour Half`
pub fn humanize(key: &str) -> String {
    key.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn settings_views(catalog: &Catalog) -> Vec<SettingsCategoryView> {
    Category::ALL
        .into_iter()
        .filter(|category| catalog.items(*category).next().is_some())
        .map(|category| SettingsCategoryView {
            name: category.as_str().to_string(),
            title: category.title().to_string(),
            items: catalog
                .items(category)
                .map(|(key, price)| SettingsItemView {
                    key: key.to_string(),
                    label: humanize(key),
                    price,
                })
                .collect(),
        })
        .collect()
}

/// Formats catalog prices for option labels
struct PriceLabels<'a> {
    currency: Currency,
    rates: &'a ExchangeRates,
}

impl PriceLabels<'_> {
    fn format(&self, price: Price) -> String {
        format_amount(Decimal::from(price), self.currency, self.rates)
    }
}

fn options<'k>(
    entries: impl IntoIterator<Item = (&'k str, Price)>,
    selected: Option<&str>,
    label: impl Fn(&str, Price) -> String,
) -> Vec<OptionView> {
    entries
        .into_iter()
        .map(|(key, price)| OptionView {
            value: key.to_string(),
            label: label(key, price),
            selected: selected == Some(key),
        })
        .collect()
}

fn choice_select(
    session: &QuoteSession,
    config: &DayConfig,
    field: DayField,
    day_index: usize,
    labels: &PriceLabels<'_>,
) -> Option<SelectView> {
    let catalog = session.catalog();
    let category = field.category();
    let selected = config.choice(field);

    let (label, entries): (&str, Vec<(&str, Price)>) = match field {
        DayField::Hotel => ("Hotel Type", catalog.items(category).collect()),
        DayField::TourismActivity => (
            "Tourism Activity",
            tourism_options(catalog, session.variant(), session.num_people()),
        ),
        DayField::TourGuide => ("Tour Guide", catalog.items(category).collect()),
        DayField::Bus => ("Bus", catalog.items(category).collect()),
        DayField::BusinessActivity => ("Business Activity", catalog.items(category).collect()),
    };

    // Guides and buses only appear when the catalog offers them
    if entries.is_empty() && matches!(field, DayField::TourGuide | DayField::Bus) {
        return None;
    }

    let per_person = |key: &str| match field {
        DayField::Hotel => true,
        DayField::BusinessActivity => catalog.rules.is_per_person_business(key),
        _ => false,
    };

    Some(SelectView {
        name: format!("day[{}][{}]", day_index, field_name(field)),
        label: label.to_string(),
        none_label: "None".to_string(),
        options: options(entries, selected, |key, price| {
            if per_person(key) {
                format!("{} ({}/person)", humanize(key), labels.format(price))
            } else {
                format!("{} ({})", humanize(key), labels.format(price))
            }
        }),
    })
}

fn field_name(field: DayField) -> &'static str {
    match field {
        DayField::Hotel => "hotel",
        DayField::TourismActivity => "tourismActivity",
        DayField::TourGuide => "tourGuide",
        DayField::Bus => "bus",
        DayField::BusinessActivity => "businessActivity",
    }
}

fn meal_select(
    catalog: &Catalog,
    config: &DayConfig,
    slot: MealSlot,
    day_index: usize,
    labels: &PriceLabels<'_>,
) -> SelectView {
    let entries = catalog
        .items(Category::Meals)
        .filter(|(key, _)| slot.accepts(key));
    let none_label = match slot {
        MealSlot::Lunch => "No Lunch",
        MealSlot::Dinner => "No Dinner",
    };

    SelectView {
        name: format!("day[{}][meals][{}]", day_index, slot.as_str()),
        label: humanize(slot.as_str()),
        none_label: none_label.to_string(),
        options: options(entries, config.meals.get(slot), |key, price| {
            format!("{} ({}/person)", humanize(key), labels.format(price))
        }),
    }
}

fn checkboxes(
    catalog: &Catalog,
    config: &DayConfig,
    set: ItemSet,
    day_index: usize,
    edge_day: bool,
    labels: &PriceLabels<'_>,
) -> Vec<CheckboxView> {
    let set_name = match set {
        ItemSet::Transport => "transport",
        ItemSet::Extras => "extras",
    };

    catalog
        .items(set.category())
        .filter(|(key, _)| !(edge_day && set == ItemSet::Transport && *key == CITY_TRANSFER))
        .map(|(key, price)| {
            let unit = match set {
                ItemSet::Transport => format!(
                    "car, max {} people",
                    catalog.rules.capacity(key).unwrap_or(0)
                ),
                ItemSet::Extras if catalog.rules.is_group_priced_extra(key) => "group".to_string(),
                ItemSet::Extras => "person".to_string(),
            };
            CheckboxView {
                name: format!("day[{}][{}][]", day_index, set_name),
                value: key.to_string(),
                label: format!("{} ({}/{})", humanize(key), labels.format(price), unit),
                checked: config.items(set).contains(key),
            }
        })
        .collect()
}

fn day_views(session: &QuoteSession, summary: &QuoteSummary) -> Vec<DayCardView> {
    let catalog = session.catalog();
    let labels = PriceLabels {
        currency: session.currency(),
        rates: &session.request().rates,
    };
    let last = session.num_days().saturating_sub(1);

    session
        .day_configs()
        .iter()
        .zip(&summary.days)
        .enumerate()
        .map(|(index, (config, totals))| {
            let edge_day = index == 0 || index == last;
            DayCardView {
                number: totals.day,
                selects: DayField::ALL
                    .into_iter()
                    .filter_map(|field| choice_select(session, config, field, index, &labels))
                    .collect(),
                transport: checkboxes(
                    catalog,
                    config,
                    ItemSet::Transport,
                    index,
                    edge_day,
                    &labels,
                ),
                meals: MealSlot::ALL
                    .into_iter()
                    .map(|slot| meal_select(catalog, config, slot, index, &labels))
                    .collect(),
                extras: checkboxes(catalog, config, ItemSet::Extras, index, edge_day, &labels),
                group_total: totals.group_display.clone(),
                per_person_total: totals.per_person_display.clone(),
            }
        })
        .collect()
}

fn summary_view(summary: &QuoteSummary) -> SummaryView {
    let headline_label = match summary.client_basis {
        ClientBasis::Group => "Client Price (group)",
        ClientBasis::PerPerson => "Client Price (per person)",
    };

    SummaryView {
        group_cost: AmountsView::from_amounts(Some(&summary.group_cost)),
        per_person_cost: AmountsView::from_amounts(summary.per_person_cost.as_ref()),
        client_group: AmountsView::from_amounts(Some(&summary.client_group)),
        client_per_person: AmountsView::from_amounts(summary.client_per_person.as_ref()),
        client_headline: AmountsView::from_amounts(summary.client_headline()),
        client_headline_label: headline_label.to_string(),
        num_people: summary.num_people,
        num_days: summary.num_days,
    }
}
