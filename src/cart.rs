//! Cart Context
//!
//! Snapshot of the checkout a code is being validated against. Supplied by the
//! cart and auth layers; guests have no user id.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Customer segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// First-time customer.
    New,
    /// Customer with earlier orders.
    Returning,
}

impl UserType {
    /// Lowercase name as stored and sent over the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Returning => "returning",
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "returning" => Ok(Self::Returning),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Storefront shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shop {
    /// Shop A.
    A,
    /// Shop B.
    B,
}

impl Shop {
    /// Single-letter shop id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl Display for Shop {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shop {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(format!("unknown shop: {value}")),
        }
    }
}

/// Cart snapshot used for code validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartContext {
    /// Order total in the cart's currency.
    pub order_total: Money<'static, iso::Currency>,
    /// Checkout currency.
    pub currency: Currency,
    /// Shop the order is placed in, if known.
    pub shop: Option<Shop>,
    /// Customer segment, if known.
    pub user_type: Option<UserType>,
    /// Signed-in customer id; `None` for guests.
    pub user_id: Option<String>,
    /// Customer email, if known.
    pub user_email: Option<String>,
    /// Categories of the items in the cart.
    pub category_ids: FxHashSet<String>,
}

impl CartContext {
    /// Anonymous cart with only a total.
    #[must_use]
    pub fn new(currency: Currency, order_total: Decimal) -> Self {
        Self {
            order_total: currency.money(order_total),
            currency,
            shop: None,
            user_type: None,
            user_id: None,
            user_email: None,
            category_ids: FxHashSet::default(),
        }
    }

    /// Mark the cart as belonging to a signed-in customer.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>, user_email: Option<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_email = user_email;
        self
    }

    /// Set the customer segment.
    #[must_use]
    pub const fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(user_type);
        self
    }

    /// Set the shop.
    #[must_use]
    pub const fn with_shop(mut self, shop: Shop) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Add item categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Order total in major units.
    #[must_use]
    pub fn total(&self) -> Decimal {
        *self.order_total.amount()
    }

    /// Guests have no authenticated user id.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.user_id.is_none()
    }

    /// Key the offer usage ledger is tracked under for this customer.
    #[must_use]
    pub fn usage_identifier(&self) -> Option<&str> {
        usage_identifier(self.user_id.as_deref(), self.user_email.as_deref())
    }
}

/// Offer usage is keyed by email when one is known, falling back to the user id.
///
/// Blank values are ignored.
#[must_use]
pub fn usage_identifier<'a>(user_id: Option<&'a str>, user_email: Option<&'a str>) -> Option<&'a str> {
    user_email
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .or_else(|| user_id.map(str::trim).filter(|id| !id.is_empty()))
}
