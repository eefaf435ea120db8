//! Currencies

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places amounts are rounded to for display and persistence.
pub const AMOUNT_SCALE: u32 = 2;

/// Errors raised while parsing a currency code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the storefront's checkout currencies.
    #[error("unsupported currency: {0}")]
    Unsupported(String),
}

/// Checkout currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// UAE dirham
    Aed,

    /// Indian rupee
    Inr,
}

impl Currency {
    /// ISO 4217 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Aed => "AED",
            Self::Inr => "INR",
        }
    }

    /// The `rusty_money` currency definition.
    #[must_use]
    pub const fn iso(self) -> &'static iso::Currency {
        match self {
            Self::Aed => iso::AED,
            Self::Inr => iso::INR,
        }
    }

    /// Build a money value in this currency from a major-unit amount.
    ///
    /// The amount is rounded to [`AMOUNT_SCALE`] decimal places first.
    #[must_use]
    pub fn money(self, amount: Decimal) -> Money<'static, iso::Currency> {
        Money::from_decimal(round_amount(amount), self.iso())
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AED" => Ok(Self::Aed),
            "INR" => Ok(Self::Inr),
            _ => Err(CurrencyError::Unsupported(value.to_string())),
        }
    }
}

/// One value per checkout currency.
///
/// Thresholds are configured independently for each currency; nothing is
/// converted between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerCurrency<T> {
    /// Value for UAE dirham carts.
    pub aed: T,
    /// Value for Indian rupee carts.
    pub inr: T,
}

impl<T> PerCurrency<T> {
    /// Create a pair from the dirham and rupee values.
    #[must_use]
    pub const fn new(aed: T, inr: T) -> Self {
        Self { aed, inr }
    }

    /// Value configured for `currency`.
    #[must_use]
    pub const fn get(&self, currency: Currency) -> &T {
        match currency {
            Currency::Aed => &self.aed,
            Currency::Inr => &self.inr,
        }
    }
}

impl<T> PerCurrency<Option<T>> {
    /// True when a value is configured for at least one currency.
    #[must_use]
    pub const fn is_any_set(&self) -> bool {
        self.aed.is_some() || self.inr.is_some()
    }
}

/// Round a major-unit amount to two decimal places, midpoint away from zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("aed".parse::<Currency>(), Ok(Currency::Aed));
        assert_eq!(" INR ".parse::<Currency>(), Ok(Currency::Inr));
        assert_eq!(
            "USD".parse::<Currency>(),
            Err(CurrencyError::Unsupported("USD".to_string()))
        );
    }

    #[test]
    fn per_currency_selects_matching_value() {
        let thresholds = PerCurrency::new(Some(dec!(200)), None);

        assert_eq!(thresholds.get(Currency::Aed), &Some(dec!(200)));
        assert_eq!(thresholds.get(Currency::Inr), &None);
        assert!(thresholds.is_any_set());
        assert!(!PerCurrency::<Option<Decimal>>::default().is_any_set());
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_amount(dec!(10.005)), dec!(10.01));
        assert_eq!(round_amount(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn money_uses_iso_currency() {
        let money = Currency::Inr.money(dec!(99.999));

        assert_eq!(money.currency(), iso::INR);
        assert_eq!(*money.amount(), dec!(100.00));
    }
}
