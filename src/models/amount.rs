use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits carried below the smallest on-chain unit. Matches the
/// precision of the Cosmos `Dec` type used by reward payloads.
const FRACTION_DIGITS: usize = 18;
const ATTO_PER_UNIT: u64 = 1_000_000_000_000_000_000;
const UNITS_PER_TOKEN: u64 = 1_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount {0:?}")]
pub struct AmountParseError(String);

/// Exact, non-negative quantity of the staking token, stored in 10^-18 of
/// the smallest unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    #[cfg(test)]
    pub fn from_units(units: u64) -> Self {
        Self(BigUint::from(units) * BigUint::from(ATTO_PER_UNIT))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Converts to whole tokens (smallest units divided by 1,000,000).
    pub fn to_tokens(&self) -> f64 {
        let atto_per_unit = BigUint::from(ATTO_PER_UNIT);
        let per_token = &atto_per_unit * BigUint::from(UNITS_PER_TOKEN);
        let whole = &self.0 / &per_token;
        let rest = &self.0 % &per_token;
        let units = (&rest / &atto_per_unit).to_u64().unwrap_or(0);
        let atto = (&rest % &atto_per_unit).to_u64().unwrap_or(0);

        whole.to_f64().unwrap_or(f64::MAX)
            + units as f64 / UNITS_PER_TOKEN as f64
            + atto as f64 / (UNITS_PER_TOKEN as f64 * ATTO_PER_UNIT as f64)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Accepts integer strings ("5000000") and decimal strings
    /// ("250000.125000000000000000"). Digits past 18 decimals are dropped.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountParseError(raw.to_string());
        let (integer, fraction) = match raw.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some(parts) => parts,
            None => (raw, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
            return Err(invalid());
        }

        let mut digits = String::with_capacity(integer.len() + FRACTION_DIGITS);
        digits.push_str(integer);
        digits.extend(fraction.chars().take(FRACTION_DIGITS));
        for _ in fraction.len().min(FRACTION_DIGITS)..FRACTION_DIGITS {
            digits.push('0');
        }

        BigUint::from_str(&digits).map(Self).map_err(|_| invalid())
    }
}

/// Renders in smallest units, e.g. "250000.5".
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atto = BigUint::from(ATTO_PER_UNIT);
        let whole = &self.0 / &atto;
        let fraction = &self.0 % &atto;
        if fraction.is_zero() {
            write!(f, "{}", whole)
        } else {
            let fraction = format!("{:0>width$}", fraction.to_string(), width = FRACTION_DIGITS);
            write!(f, "{}.{}", whole, fraction.trim_end_matches('0'))
        }
    }
}

impl<'a> AddAssign<&'a Amount> for Amount {
    fn add_assign(&mut self, rhs: &'a Amount) {
        self.0 += &rhs.0;
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, amount| {
            acc += amount;
            acc
        })
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_tokens())
    }
}
