use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
/// A struct representing monetary value in the smallest currency unit (cents).
///
/// # Why Use Money? It is a Value Object.
/// Using `Money` as a wrapper around `i64` provides type safety and prevents confusion
/// with other numeric values. Amounts typed at the prompt are parsed through
/// `BigDecimal` and rounded to two decimal places; balances are kept as an integer
/// number of cents, so repeated deposits and withdrawals never accumulate
/// floating-point drift.
///
/// # Examples
/// ```
/// use bank_ledger::common::money::Money;
///
/// let amount = Money::new(150); // Represents 1.50 in currency
/// assert_eq!(amount.as_i64(), 150);
/// assert_eq!(amount.to_string_2dp(), "1.50");
/// ```
pub struct Money(i64);

impl Money {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to 2 decimal places
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

// The persisted balance field is a plain JSON number, so Money crosses the
// serde boundary as a float and is rounded back onto the cent grid on read.
impl serde::Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0 as f64 / SCALE as f64)
    }
}

impl<'de> serde::Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Money((value * SCALE as f64).round() as i64))
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
