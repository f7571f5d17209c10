//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides the strict fixed-point parser used by the record codec and
//! the more forgiving parser used for amounts typed by a user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Largest balance a ledger record can hold (99999.99)
pub const MAX_BALANCE: Money = Money::from_cents(9_999_999);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use simplebank::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Check if the amount fits a ledger balance field
    pub const fn is_valid_balance(&self) -> bool {
        self.0 >= 0 && self.0 <= MAX_BALANCE.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Parse a strict fixed-point number: `[-]digits[.d[d]]`
    ///
    /// This is the format found in ledger records. No currency symbol, no
    /// surrounding whitespace, at most two fractional digits.
    pub fn parse_fixed(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (body, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(invalid());
            }
            Some(f) => {
                let value: i64 = f.parse().map_err(|_| invalid())?;
                if f.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let dollars: i64 = whole.parse().map_err(|_| invalid())?;
        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse an amount entered by a user
    ///
    /// Accepts formats: "10.50", "$10.50", "10", " 10.5 ". The sign is kept so
    /// callers can reject negative amounts with their own error.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let amount = Self::parse_fixed(rest)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        if amount.is_negative() {
            // "--5" and "-$-5"
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        Ok(if negative { -amount } else { amount })
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain two-decimal rendering, the same text the ledger stores
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.dollars(), self.cents_part())
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

impl std::iter::Sum for Money {
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
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(MAX_BALANCE.to_string(), "99999.99");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(1050).format_with_symbol("$"), "$10.50");
        assert_eq!(Money::from_cents(-5).format_with_symbol("$"), "-$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(a.checked_sub(b), Some(Money::from_cents(500)));
    }

    #[test]
    fn test_parse_fixed() {
        assert_eq!(Money::parse_fixed("1000.00").unwrap().cents(), 100000);
        assert_eq!(Money::parse_fixed("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse_fixed("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse_fixed("-3.25").unwrap().cents(), -325);

        assert!(Money::parse_fixed("").is_err());
        assert!(Money::parse_fixed(" 1.00").is_err());
        assert!(Money::parse_fixed("1.000").is_err());
        assert!(Money::parse_fixed("1.").is_err());
        assert!(Money::parse_fixed(".50").is_err());
        assert!(Money::parse_fixed("$1.00").is_err());
        assert!(Money::parse_fixed("abc").is_err());
        assert!(Money::parse_fixed("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_user_amount() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" 200 ").unwrap().cents(), 20000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("1.234").is_err());
    }

    #[test]
    fn test_balance_range() {
        assert!(Money::zero().is_valid_balance());
        assert!(MAX_BALANCE.is_valid_balance());
        assert!(!Money::from_cents(10_000_000).is_valid_balance());
        assert!(!Money::from_cents(-1).is_valid_balance());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }
}
