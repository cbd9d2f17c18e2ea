use crate::error::LedgerError;
use crate::plate::Plate;
use crate::tariff::{Money, Tariff};
use crate::time::Timestamp;
use log::debug;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type FacilityId = Arc<str>;

#[derive(Clone, Debug, PartialEq)]
pub struct BillingRecord {
    pub plate: Plate,
    pub exit: Timestamp,
    pub cost: Money,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BillingDay {
    /// Exit timestamp of the first record; only its calendar day is meaningful.
    pub date: Timestamp,
    pub total: Money,
    pub records: Vec<BillingRecord>,
}

#[derive(Clone, Debug)]
pub struct Facility {
    pub id: FacilityId,
    pub capacity: u32,
    pub free_spaces: u32,
    pub tariff: Tariff,
    pub billing_days: Vec<BillingDay>,
}

impl Facility {
    pub fn new(id: FacilityId, capacity: u32, tariff: Tariff) -> Facility {
        Facility {
            id,
            capacity,
            free_spaces: capacity,
            tariff,
            billing_days: vec![],
        }
    }

    pub fn is_full(&self) -> bool {
        self.free_spaces == 0
    }

    // exits arrive in non-decreasing order, so only the last day can match
    pub fn record_billing(&mut self, plate: Plate, exit: Timestamp, cost: Money) -> Result<(), LedgerError> {
        let record = BillingRecord { plate, exit, cost };
        if let Some(day) = self.billing_days.last_mut().filter(|d| d.date.same_day(&exit)) {
            day.records.try_reserve(1)?;
            day.total += cost;
            day.records.push(record);
            return Ok(());
        }

        self.billing_days.try_reserve(1)?;
        let mut records = Vec::new();
        records.try_reserve(1)?;
        records.push(record);
        debug!("{}: opening billing day {}", self.id, exit.date());
        self.billing_days.push(BillingDay {
            date: exit,
            total: cost,
            records,
        });
        Ok(())
    }

    pub fn billing_day(&self, date: &Timestamp) -> Option<&BillingDay> {
        self.billing_days.iter().find(|d| d.date.same_day(date))
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.capacity, self.free_spaces)
    }
}
