//! Display currencies, fixed exchange rates and amount formatting.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

use super::calculators::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Home currency; catalog prices are in yen
    #[default]
    #[serde(rename = "JPY")]
    Jpy,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "KZT")]
    Kzt,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Jpy, Currency::Usd, Currency::Kzt];
    pub const HOME: Currency = Currency::Jpy;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Jpy => "JPY",
            Currency::Usd => "USD",
            Currency::Kzt => "KZT",
        }
    }

    /// Decimal places shown for this currency
    pub fn display_places(&self) -> u32 {
        match self {
            Currency::Usd => 2,
            Currency::Jpy | Currency::Kzt => 0,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPY" => Ok(Currency::Jpy),
            "USD" => Ok(Currency::Usd),
            "KZT" => Ok(Currency::Kzt),
            _ => Err(QuoteError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Multipliers from the home currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub usd: Decimal,
    pub kzt: Decimal,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        // Yen to US dollar and to Kazakhstani tenge
        Self {
            usd: dec!(0.0064),
            kzt: dec!(3.336),
        }
    }
}

impl ExchangeRates {
    pub fn rate(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Jpy => Decimal::ONE,
            Currency::Usd => self.usd,
            Currency::Kzt => self.kzt,
        }
    }
}

/// Converted amount, rounded to the currency's display places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.display_places();
        let mut amount = round_money(self.amount, places);
        amount.rescale(places);
        let grouped = group_digits(&amount.to_string());
        match self.currency {
            Currency::Jpy => write!(f, "¥{}", grouped),
            Currency::Usd => write!(f, "${}", grouped),
            Currency::Kzt => write!(f, "{} KZT", grouped),
        }
    }
}

/// Convert a home-currency amount for display.
pub fn convert(amount: Decimal, currency: Currency, rates: &ExchangeRates) -> Money {
    Money {
        amount: round_money(amount * rates.rate(currency), currency.display_places()),
        currency,
    }
}

/// Format a home-currency amount in the selected currency.
///
/// Zero always renders as the home-currency zero, whatever the selection.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tour_quote::pricing::{format_amount, Currency, ExchangeRates};
///
/// let rates = ExchangeRates::default();
/// assert_eq!(format_amount(dec!(0), Currency::Usd, &rates), "¥0");
/// assert_eq!(format_amount(dec!(1500000), Currency::Jpy, &rates), "¥1,500,000");
/// assert_eq!(format_amount(dec!(1500000), Currency::Usd, &rates), "$9,600.00");
/// ```
pub fn format_amount(amount: Decimal, currency: Currency, rates: &ExchangeRates) -> String {
    if amount.is_zero() {
        return "¥0".to_string();
    }
    convert(amount, currency, rates).to_string()
}

/// Insert thousands separators into a plain decimal string
fn group_digits(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("20256.00"), "20,256.00");
        assert_eq!(group_digits("-1500"), "-1,500");
    }

    #[test]
    fn test_zero_is_home_currency_zero() {
        let rates = ExchangeRates::default();
        for currency in Currency::ALL {
            assert_eq!(format_amount(Decimal::ZERO, currency, &rates), "¥0");
        }
    }

    #[test]
    fn test_format_jpy_groups_digits() {
        let rates = ExchangeRates::default();
        assert_eq!(format_amount(dec!(3165000), Currency::Jpy, &rates), "¥3,165,000");
        assert_eq!(format_amount(dec!(15000), Currency::Jpy, &rates), "¥15,000");
    }

    #[test]
    fn test_format_jpy_rounds_fractional_yen() {
        let rates = ExchangeRates::default();
        // 100000 / 3 people
        assert_eq!(
            format_amount(dec!(33333.333), Currency::Jpy, &rates),
            "¥33,333"
        );
        assert_eq!(format_amount(dec!(2.5), Currency::Jpy, &rates), "¥3");
    }

    #[test]
    fn test_format_usd_two_places() {
        let rates = ExchangeRates::default();
        // 3165000 * 0.0064 = 20256
        assert_eq!(format_amount(dec!(3165000), Currency::Usd, &rates), "$20,256.00");
        // 15000 * 0.0064 = 96
        assert_eq!(format_amount(dec!(15000), Currency::Usd, &rates), "$96.00");
        // 3000 * 0.0064 = 19.2
        assert_eq!(format_amount(dec!(3000), Currency::Usd, &rates), "$19.20");
    }

    #[test]
    fn test_format_kzt_whole_units() {
        let rates = ExchangeRates::default();
        // 3165000 * 3.336 = 10558440
        assert_eq!(
            format_amount(dec!(3165000), Currency::Kzt, &rates),
            "10,558,440 KZT"
        );
        // 7000 * 3.336 = 23352
        assert_eq!(format_amount(dec!(7000), Currency::Kzt, &rates), "23,352 KZT");
        // 1 * 3.336 rounds to 3
        assert_eq!(format_amount(dec!(1), Currency::Kzt, &rates), "3 KZT");
    }

    #[test]
    fn test_money_display_keeps_currency_zero() {
        let rates = ExchangeRates::default();
        assert_eq!(convert(Decimal::ZERO, Currency::Usd, &rates).to_string(), "$0.00");
        assert_eq!(convert(Decimal::ZERO, Currency::Kzt, &rates).to_string(), "0 KZT");
    }

    #[test]
    fn test_convert_uses_rate() {
        let rates = ExchangeRates {
            usd: dec!(0.01),
            kzt: dec!(4),
        };
        assert_eq!(convert(dec!(1000), Currency::Usd, &rates).amount, dec!(10));
        assert_eq!(convert(dec!(1000), Currency::Kzt, &rates).amount, dec!(4000));
        assert_eq!(convert(dec!(1000), Currency::Jpy, &rates).amount, dec!(1000));
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("KZT".parse::<Currency>().unwrap(), Currency::Kzt);
        assert!(matches!(
            "EUR".parse::<Currency>(),
            Err(QuoteError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_money_serializes_amount_as_string() {
        let money = convert(dec!(15000), Currency::Usd, &ExchangeRates::default());
        let json = serde_json::to_value(money).unwrap();
        assert_eq!(json["amount"], "96.00");
        assert_eq!(json["currency"], "USD");
    }
}
