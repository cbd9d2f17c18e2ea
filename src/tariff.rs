use crate::error::LedgerError;
use crate::time::MINUTES_PER_DAY;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

const MINUTES_PER_QUARTER: u64 = 15;
const FIRST_HOUR_QUARTERS: u64 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Money(pub f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn min(self, other: Money) -> Money {
        if other < self { other } else { self }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
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

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Self::Output {
        Money(self.0 * rhs as f64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Three-tier rate: per quarter hour during the first hour, per quarter hour
/// afterwards, and a cap for each 24h period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff {
    pub first_hour: Money,
    pub after_first_hour: Money,
    pub daily_cap: Money,
}

impl Tariff {
    /// Rates must be positive and strictly increasing.
    pub fn new(first_hour: f64, after_first_hour: f64, daily_cap: f64) -> Result<Tariff, LedgerError> {
        // NaN fails every comparison below and is rejected with the rest
        if !(first_hour > 0.0 && after_first_hour > 0.0 && daily_cap > 0.0) {
            return Err(LedgerError::InvalidCost);
        }
        if !(first_hour < after_first_hour && after_first_hour < daily_cap) {
            return Err(LedgerError::InvalidCost);
        }
        Ok(Tariff {
            first_hour: Money(first_hour),
            after_first_hour: Money(after_first_hour),
            daily_cap: Money(daily_cap),
        })
    }

    pub fn price(&self, elapsed_minutes: u64) -> Money {
        let day = MINUTES_PER_DAY as u64;
        let full_days = elapsed_minutes / day;
        let remainder = elapsed_minutes % day;

        let quarters = remainder.div_ceil(MINUTES_PER_QUARTER);
        let partial = if quarters <= FIRST_HOUR_QUARTERS {
            self.first_hour * quarters
        } else {
            self.first_hour * FIRST_HOUR_QUARTERS
                + self.after_first_hour * (quarters - FIRST_HOUR_QUARTERS)
        };

        self.daily_cap * full_days + partial.min(self.daily_cap)
    }
}
