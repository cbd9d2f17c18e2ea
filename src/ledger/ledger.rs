use crate::error::LedgerError;
use crate::facility::{BillingDay, BillingRecord, Facility, FacilityId};
use crate::plate::Plate;
use crate::registry::{FacilityRegistry, FacilitySpec};
use crate::tariff::Money;
use crate::time::{Clock, Timestamp};
use crate::vehicle::{ParkingEvent, Vehicle, VehicleIndex};
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EntryReceipt {
    pub facility_id: FacilityId,
    pub free_spaces: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExitReceipt {
    pub plate: Plate,
    pub entry: Timestamp,
    pub exit: Timestamp,
    pub cost: Money,
}

#[derive(Debug, PartialEq)]
pub enum Revenue<'a> {
    Daily(&'a [BillingDay]),
    Day(&'a [BillingRecord]),
}

#[derive(Default)]
pub struct Ledger {
    pub facilities: FacilityRegistry,
    pub vehicles: VehicleIndex,
    clock: Clock,
}

fn accepted_timestamp(clock: &Clock, date: &str, time: &str) -> Result<Timestamp, LedgerError> {
    Timestamp::parse(date, Some(time))
        .filter(|at| clock.accepts(at))
        .ok_or(LedgerError::InvalidDate)
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    pub fn clock_floor(&self) -> Option<Timestamp> {
        self.clock.floor()
    }

    pub fn facilities(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    pub fn add_facility(&mut self, spec: &FacilitySpec) -> Result<(), LedgerError> {
        let facility = self
            .facilities
            .add(spec)
            .inspect_err(|e| debug!("add facility rejected: {}", e))?;
        info!(
            "{}: added with capacity {} and rates {}/{}/{}",
            facility.id,
            facility.capacity,
            facility.tariff.first_hour,
            facility.tariff.after_first_hour,
            facility.tariff.daily_cap
        );
        Ok(())
    }

    pub fn enter(&mut self, facility: &str, plate: &str, date: &str, time: &str) -> Result<EntryReceipt, LedgerError> {
        let receipt = self
            .try_enter(facility, plate, date, time)
            .inspect_err(|e| debug!("entry rejected: {}", e))?;
        info!("{}: {} entered, {} free", receipt.facility_id, plate, receipt.free_spaces);
        self.assert_invariants();
        Ok(receipt)
    }

    fn try_enter(&mut self, name: &str, plate: &str, date: &str, time: &str) -> Result<EntryReceipt, LedgerError> {
        let facility = self
            .facilities
            .find_mut(name)
            .ok_or_else(|| LedgerError::NoSuchFacility(name.to_string()))?;
        if facility.is_full() {
            return Err(LedgerError::FacilityFull(name.to_string()));
        }
        let plate = Plate::parse(plate).ok_or_else(|| LedgerError::InvalidPlate(plate.to_string()))?;
        if self.vehicles.find(&plate).is_some_and(Vehicle::is_parked) {
            return Err(LedgerError::InvalidEntry(plate.to_string()));
        }
        let at = accepted_timestamp(&self.clock, date, time)?;

        self.vehicles.park(ParkingEvent {
            plate,
            facility_id: facility.id.clone(),
            entry: at,
            exit: None,
            cost: Money::ZERO,
        })?;
        facility.free_spaces -= 1;
        self.clock.advance(at);

        Ok(EntryReceipt {
            facility_id: facility.id.clone(),
            free_spaces: facility.free_spaces,
        })
    }

    pub fn exit(&mut self, facility: &str, plate: &str, date: &str, time: &str) -> Result<ExitReceipt, LedgerError> {
        let receipt = self
            .try_exit(facility, plate, date, time)
            .inspect_err(|e| debug!("exit rejected: {}", e))?;
        info!(
            "{}: {} left after {} minutes, charged {}",
            facility,
            receipt.plate,
            receipt.entry.elapsed_minutes(&receipt.exit),
            receipt.cost
        );
        self.assert_invariants();
        Ok(receipt)
    }

    fn try_exit(&mut self, name: &str, plate: &str, date: &str, time: &str) -> Result<ExitReceipt, LedgerError> {
        let facility = self
            .facilities
            .find_mut(name)
            .ok_or_else(|| LedgerError::NoSuchFacility(name.to_string()))?;
        let plate = Plate::parse(plate).ok_or_else(|| LedgerError::InvalidPlate(plate.to_string()))?;
        let vehicle = self
            .vehicles
            .find_mut(&plate)
            .filter(|v| v.is_parked_at(&facility.id))
            .ok_or_else(|| LedgerError::InvalidExit(plate.to_string()))?;
        let at = accepted_timestamp(&self.clock, date, time)?;

        let event = vehicle
            .open_event_mut()
            .ok_or_else(|| LedgerError::InvalidExit(plate.to_string()))?;
        let minutes = event.entry.elapsed_minutes(&at);
        debug_assert!(minutes >= 0, "exit at {} precedes entry at {}", at, event.entry);
        let cost = facility.tariff.price(u64::try_from(minutes).unwrap_or_default());

        // last fallible step; nothing below can fail
        facility.record_billing(plate.clone(), at, cost)?;

        event.exit = Some(at);
        event.cost = cost;
        let entry = event.entry;
        vehicle.parked_at = None;
        facility.free_spaces += 1;
        self.clock.advance(at);

        Ok(ExitReceipt {
            plate,
            entry,
            exit: at,
            cost,
        })
    }

    pub fn history(&self, plate: &str) -> Result<Vec<&ParkingEvent>, LedgerError> {
        let no_entries = || LedgerError::NoEntries(plate.to_string());
        let parsed = Plate::parse(plate).ok_or_else(|| LedgerError::InvalidPlate(plate.to_string()))?;
        let vehicle = self.vehicles.find(&parsed).ok_or_else(no_entries)?;

        let events = self
            .facilities
            .sorted_ids()
            .iter()
            .flat_map(|id| vehicle.events_at(id))
            .collect::<Vec<&ParkingEvent>>();

        if events.is_empty() {
            return Err(no_entries());
        }
        Ok(events)
    }

    /// A dated query may not ask for a day past the clock floor.
    pub fn revenue(&self, name: &str, date: Option<&str>) -> Result<Revenue<'_>, LedgerError> {
        let facility = self
            .facilities
            .find(name)
            .ok_or_else(|| LedgerError::NoSuchFacility(name.to_string()))?;

        match date {
            None => Ok(Revenue::Daily(&facility.billing_days)),
            Some(date) => {
                let day = Timestamp::parse(date, None)
                    .filter(Timestamp::is_valid)
                    .filter(|day| self.clock.has_reached_day(day))
                    .ok_or(LedgerError::InvalidDate)?;
                Ok(Revenue::Day(
                    facility
                        .billing_day(&day)
                        .map(|d| d.records.as_slice())
                        .unwrap_or(&[]),
                ))
            }
        }
    }

    pub fn remove_facility(&mut self, name: &str) -> Result<Vec<FacilityId>, LedgerError> {
        let removed = self
            .facilities
            .remove(name)
            .ok_or_else(|| LedgerError::NoSuchFacility(name.to_string()))
            .inspect_err(|e| debug!("removal rejected: {}", e))?;

        let purged: usize = self
            .vehicles
            .iter_mut()
            .map(|v| v.purge_facility(&removed.id))
            .sum();
        info!(
            "{}: removed with {} billing days and {} parking events",
            removed.id,
            removed.billing_days.len(),
            purged
        );

        self.assert_invariants();
        Ok(self.facilities.sorted_ids())
    }

    fn assert_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let mut parked: HashMap<&str, u32> = HashMap::new();
        for vehicle in self.vehicles.iter() {
            if let Some(id) = &vehicle.parked_at {
                *parked.entry(&**id).or_default() += 1;
            }
            debug_assert_eq!(
                vehicle.is_parked(),
                vehicle.events.last().is_some_and(ParkingEvent::is_open),
                "Parked state <-> open event invariant violated"
            );
            debug_assert!(
                vehicle.events.iter().all(|e| e.plate == vehicle.plate),
                "Event filed under the wrong vehicle"
            );
            debug_assert!(
                vehicle.events.windows(2).all(|es| es[0].entry <= es[1].entry),
                "Event chronology invariant violated"
            );
            debug_assert!(
                vehicle
                    .events
                    .iter()
                    .all(|e| self.facilities.find(&e.facility_id).is_some()),
                "Event references a removed facility"
            );
        }

        for facility in self.facilities.iter() {
            debug_assert_eq!(
                facility.capacity,
                facility.free_spaces + parked.get(&*facility.id).copied().unwrap_or(0),
                "Capacity conservation violated at {}",
                facility.id
            );
            debug_assert!(
                facility
                    .billing_days
                    .windows(2)
                    .all(|ds| ds[0].date < ds[1].date && !ds[0].date.same_day(&ds[1].date)),
                "Billing day ordering violated at {}",
                facility.id
            );
        }
    }
}
