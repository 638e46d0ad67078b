use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("too many decimals")]
    TooManyDecimals,
    #[error("amount too large")]
    Overflow,
}

/// Money amount represented as **integer cents**.
///
/// The remote store keeps `price` as a plain JSON number in major units
/// (`12.5` means 12.50), so this type serializes that way while everything
/// on this side of the wire computes on cents to avoid floating-point
/// drift.
///
/// Parsing from user input accepts `.` or `,` as decimal separator and
/// rejects more than two decimals:
///
/// ```rust
/// use api_types::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Plain decimal rendering without a currency symbol (`12.34`).
    ///
    /// Round-trips through [`FromStr`]; used to pre-fill edit forms.
    #[must_use]
    pub fn decimal(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }

    /// Renders the amount in the given display currency.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        match currency {
            Currency::Eur => format!("{sign}{major}.{minor:02}€"),
            Currency::Usd => format!("{sign}${major}.{minor:02}"),
            Currency::Brl => format!("{sign}R$ {major},{minor:02}"),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decimal())
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        if !major.is_finite() {
            return Err(serde::de::Error::custom("amount is not finite"));
        }
        Ok(Money((major * 100.0).round() as i64))
    }
}

impl FromStr for Money {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`; rejects more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or(AmountError::Invalid)?;
        let minor_str = parts.next();

        if parts.next().is_some() {
            return Err(AmountError::Invalid);
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }

        let major: i64 = major_str.parse().map_err(|_| AmountError::Invalid)?;

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(AmountError::Invalid);
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)? * 10,
                    2 => frac.parse::<i64>().map_err(|_| AmountError::Invalid)?,
                    _ => return Err(AmountError::TooManyDecimals),
                }
            }
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or(AmountError::Overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or(AmountError::Overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

/// Display currency for formatting; never sent to the remote store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Brl,
}

impl Currency {
    /// ISO 4217 code, for status bars and logs.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Brl => "BRL",
        }
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eur" => Ok(Self::Eur),
            "usd" => Ok(Self::Usd),
            "brl" => Ok(Self::Brl),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_renders_cents() {
        assert_eq!(Money::new(0).decimal(), "0.00");
        assert_eq!(Money::new(1).decimal(), "0.01");
        assert_eq!(Money::new(1050).decimal(), "10.50");
        assert_eq!(Money::new(-1050).decimal(), "-10.50");
    }

    #[test]
    fn format_per_currency() {
        assert_eq!(Money::new(1234).format(Currency::Eur), "12.34€");
        assert_eq!(Money::new(1234).format(Currency::Usd), "$12.34");
        assert_eq!(Money::new(1234).format(Currency::Brl), "R$ 12,34");
        assert_eq!(Money::new(-50).format(Currency::Usd), "-$0.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert_eq!("12.345".parse::<Money>(), Err(AmountError::TooManyDecimals));
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn serializes_as_major_unit_number() {
        assert_eq!(
            serde_json::to_value(Money::new(1050)).unwrap(),
            serde_json::json!(10.5)
        );
        let back: Money = serde_json::from_value(serde_json::json!(50)).unwrap();
        assert_eq!(back.cents(), 5000);
        let cents: Money = serde_json::from_value(serde_json::json!(10.55)).unwrap();
        assert_eq!(cents.cents(), 1055);
    }

    #[test]
    fn currency_parses_codes() {
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("brl".parse::<Currency>().unwrap(), Currency::Brl);
        assert!("chf".parse::<Currency>().is_err());
    }
}
