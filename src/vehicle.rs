use crate::error::LedgerError;
use crate::facility::FacilityId;
use crate::plate::Plate;
use crate::tariff::Money;
use crate::time::Timestamp;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct ParkingEvent {
    pub plate: Plate,
    pub facility_id: FacilityId,
    pub entry: Timestamp,
    pub exit: Option<Timestamp>,
    pub cost: Money,
}

impl ParkingEvent {
    pub fn is_open(&self) -> bool {
        self.exit.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    pub plate: Plate,
    /// Present iff the vehicle is currently parked.
    pub parked_at: Option<FacilityId>,
    pub events: Vec<ParkingEvent>,
}

impl Vehicle {
    pub fn new(plate: Plate) -> Vehicle {
        Vehicle {
            plate,
            parked_at: None,
            events: vec![],
        }
    }

    pub fn is_parked(&self) -> bool {
        self.parked_at.is_some()
    }

    pub fn is_parked_at(&self, facility_id: &str) -> bool {
        self.parked_at.as_deref() == Some(facility_id)
    }

    fn open_stay(&mut self, event: ParkingEvent) -> Result<(), LedgerError> {
        self.events.try_reserve(1)?;
        self.parked_at = Some(event.facility_id.clone());
        self.events.push(event);
        Ok(())
    }

    pub fn open_event_mut(&mut self) -> Option<&mut ParkingEvent> {
        self.events.last_mut().filter(|e| e.is_open())
    }

    pub fn events_at<'a>(&'a self, facility_id: &str) -> impl Iterator<Item = &'a ParkingEvent> {
        self.events
            .iter()
            .filter(move |e| &*e.facility_id == facility_id)
    }

    /// Returns how many events were dropped.
    pub fn purge_facility(&mut self, facility_id: &str) -> usize {
        let before = self.events.len();
        self.events.retain(|e| &*e.facility_id != facility_id);
        if self.is_parked_at(facility_id) {
            self.parked_at = None;
        }
        before - self.events.len()
    }
}

#[derive(Default)]
pub struct VehicleIndex {
    vehicles: HashMap<Plate, Vehicle>,
}

impl VehicleIndex {
    pub fn find(&self, plate: &Plate) -> Option<&Vehicle> {
        self.vehicles.get(plate)
    }

    pub fn find_mut(&mut self, plate: &Plate) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(plate)
    }

    /// Opens `event` as the vehicle's current stay, creating the vehicle on its
    /// first entry. Nothing changes unless every allocation succeeds.
    pub fn park(&mut self, event: ParkingEvent) -> Result<(), LedgerError> {
        if let Some(vehicle) = self.vehicles.get_mut(&event.plate) {
            return vehicle.open_stay(event);
        }

        let mut vehicle = Vehicle::new(event.plate.clone());
        vehicle.open_stay(event)?;
        self.vehicles.try_reserve(1)?;
        self.vehicles.insert(vehicle.plate.clone(), vehicle);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.vehicles.values_mut()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }
}
