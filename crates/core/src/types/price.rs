//! Type-safe price representation using decimal arithmetic.
//!
//! All storefront prices are whole Nepalese rupees. Percentage discounts can
//! produce fractional amounts, so the amount is kept as a [`Decimal`] and only
//! truncated to whole units for display.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// An amount of money in Nepalese rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from whole rupees.
    #[must_use]
    pub fn npr(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }

    /// Create a price from an arbitrary decimal amount.
    #[must_use]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The given percentage of this price (e.g. `percent(10)` is 10%).
    #[must_use]
    pub fn percent(&self, pct: u32) -> Self {
        Self(self.0 * Decimal::from(pct) / Decimal::ONE_HUNDRED)
    }

    /// The amount truncated to whole rupees.
    #[must_use]
    pub fn whole_units(&self) -> i64 {
        self.0.trunc().to_i64().unwrap_or(0)
    }

    /// Format as `NPR 3,800` (truncated to whole rupees, grouped by thousands).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", CurrencyCode::NPR.code(), group_thousands(self.whole_units()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NPR,
}

impl CurrencyCode {
    /// The ISO code as shown next to amounts.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NPR => "NPR",
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
