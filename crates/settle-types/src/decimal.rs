//! Fixed-point decimal arithmetic
//!
//! Settlement prices and quantities must be bit-for-bit deterministic across
//! nodes, which rules out floating point. `Decimal` stores a scaled `i128`
//! with six fractional digits and serializes as a decimal string
//! (`"100.5"`), so persisted records stay human-readable and re-parse to the
//! exact same value.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by `Decimal`.
pub const DECIMAL_PLACES: u32 = 6;

const SCALE: i128 = 10i128.pow(DECIMAL_PLACES);

/// Errors produced when parsing a decimal string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalError {
    #[error("empty decimal string")]
    Empty,

    #[error("invalid character in decimal string: {0:?}")]
    InvalidCharacter(char),

    #[error("more than {DECIMAL_PLACES} fractional digits")]
    TooManyFractionalDigits,

    #[error("decimal value out of range")]
    Overflow,
}

/// A signed fixed-point decimal with six fractional digits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(i128);

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);

    /// Build a decimal from a whole number.
    pub fn from_int(value: i64) -> Self {
        Decimal(value as i128 * SCALE)
    }

    /// Build a decimal from a raw scaled representation.
    pub const fn from_raw(raw: i128) -> Self {
        Decimal(raw)
    }

    /// Raw scaled representation (`value * 10^6`).
    pub const fn raw(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: Decimal) -> Option<Decimal> {
        self.0.checked_add(other.0).map(Decimal)
    }

    /// Overflow-safe addition used for volume accumulation.
    pub fn saturating_add(self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(other.0))
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(DecimalError::Empty);
        }

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || (frac_part.is_empty() && digits.contains('.')) {
            return Err(DecimalError::Empty);
        }
        if frac_part.len() as u32 > DECIMAL_PLACES {
            return Err(DecimalError::TooManyFractionalDigits);
        }

        let mut raw: i128 = 0;
        for c in int_part.chars() {
            let d = c.to_digit(10).ok_or(DecimalError::InvalidCharacter(c))? as i128;
            raw = raw
                .checked_mul(10)
                .and_then(|v| v.checked_add(d))
                .ok_or(DecimalError::Overflow)?;
        }
        raw = raw.checked_mul(SCALE).ok_or(DecimalError::Overflow)?;

        let mut frac: i128 = 0;
        for c in frac_part.chars() {
            let d = c.to_digit(10).ok_or(DecimalError::InvalidCharacter(c))? as i128;
            frac = frac * 10 + d;
        }
        frac *= 10i128.pow(DECIMAL_PLACES - frac_part.len() as u32);
        raw = raw.checked_add(frac).ok_or(DecimalError::Overflow)?;

        if negative {
            raw = -raw;
        }
        Ok(Decimal(raw))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u128;
        let frac = abs % SCALE as u128;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let frac_str = format!("{frac:0width$}", width = DECIMAL_PLACES as usize);
            write!(f, "{sign}{whole}.{}", frac_str.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
