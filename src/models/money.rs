//! Money type for currency amounts
//!
//! Amounts are stored as cents (i64) so that catalog limits and application
//! amounts never pick up floating-point noise. The amortization engine works
//! in `rust_decimal::Decimal` internally; this type provides the bridge in
//! both directions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// A zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The fractional cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by an integer count, failing on overflow
    pub fn checked_mul(&self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Exact Decimal representation (two fractional digits)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Convert a Decimal amount to cents, rounding half away from zero.
    ///
    /// Returns `None` when the rounded value does not fit in i64 cents.
    pub fn try_from_decimal(value: Decimal) -> Option<Self> {
        value
            .checked_mul(dec!(100))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Parse an amount from a string
    ///
    /// Accepts "2500", "2500.75", and "-13.40". A bare integer is read as
    /// whole currency units.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let cents = match digits.split_once('.') {
            Some((units_str, frac_str)) => {
                if frac_str.is_empty() || frac_str.len() > 2 {
                    return Err(MoneyParseError::InvalidFormat(s.to_string()));
                }
                let units: i64 = units_str
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                let mut frac: i64 = frac_str
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                if frac_str.len() == 1 {
                    frac *= 10;
                }
                units * 100 + frac
            }
            None => {
                digits
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                    * 100
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(250075);
        assert_eq!(m.cents(), 250075);
        assert_eq!(m.units(), 2500);
        assert_eq!(m.cents_part(), 75);
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Money::from_units(2500).cents(), 250000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(250075).to_string(), "2500.75");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1340).to_string(), "-13.40");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("2500").unwrap().cents(), 250000);
        assert_eq!(Money::parse("2500.75").unwrap().cents(), 250075);
        assert_eq!(Money::parse("2500.7").unwrap().cents(), 250070);
        assert_eq!(Money::parse("-13.40").unwrap().cents(), -1340);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("12.345").is_err());
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((-a).cents(), -1000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1250);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn test_decimal_round_trip() {
        let m = Money::from_cents(879159);
        assert_eq!(m.to_decimal(), dec!(8791.59));
        assert_eq!(Money::try_from_decimal(dec!(8791.59)), Some(m));
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(
            Money::try_from_decimal(dec!(833.335)),
            Some(Money::from_cents(83334))
        );
        assert_eq!(
            Money::try_from_decimal(dec!(-833.335)),
            Some(Money::from_cents(-83334))
        );
        assert_eq!(
            Money::try_from_decimal(dec!(7958.2554)),
            Some(Money::from_cents(795826))
        );
    }

    #[test]
    fn test_from_decimal_overflow() {
        let huge = Decimal::MAX;
        assert_eq!(Money::try_from_decimal(huge), None);
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(
            Money::from_cents(879159).checked_mul(12),
            Some(Money::from_cents(10549908))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(250075);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "250075");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
