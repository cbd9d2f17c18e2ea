use crate::error::LedgerError;
use crate::facility::{Facility, FacilityId};
use crate::tariff::Tariff;
use serde::Deserialize;
use std::sync::Arc;

pub const MAX_FACILITIES: usize = 20;

/// Parameters of a facility as they arrive from a command or the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacilitySpec {
    pub name: String,
    pub capacity: i64,
    pub first_hour: f64,
    pub after_first_hour: f64,
    pub daily_cap: f64,
}

/// Facilities in insertion order, bounded by `MAX_FACILITIES`.
pub struct FacilityRegistry {
    facilities: Vec<Facility>,
    limit: usize,
}

impl Default for FacilityRegistry {
    fn default() -> Self {
        FacilityRegistry::with_limit(MAX_FACILITIES)
    }
}

impl FacilityRegistry {
    pub fn with_limit(limit: usize) -> FacilityRegistry {
        FacilityRegistry {
            facilities: Vec::new(),
            limit,
        }
    }

    pub fn add(&mut self, spec: &FacilitySpec) -> Result<&Facility, LedgerError> {
        if self.facilities.len() >= self.limit {
            return Err(LedgerError::TooManyFacilities);
        }
        if self.find(&spec.name).is_some() {
            return Err(LedgerError::DuplicateFacility(spec.name.clone()));
        }
        let capacity = u32::try_from(spec.capacity)
            .ok()
            .filter(|c| *c > 0)
            .ok_or(LedgerError::InvalidCapacity(spec.capacity))?;
        let tariff = Tariff::new(spec.first_hour, spec.after_first_hour, spec.daily_cap)?;

        self.facilities.try_reserve(1)?;
        self.facilities
            .push(Facility::new(Arc::from(spec.name.as_str()), capacity, tariff));
        Ok(&self.facilities[self.facilities.len() - 1])
    }

    pub fn find(&self, name: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| &*f.id == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Facility> {
        self.facilities.iter_mut().find(|f| &*f.id == name)
    }

    /// Detaches the facility, keeping the relative order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Facility> {
        let idx = self.facilities.iter().position(|f| &*f.id == name)?;
        Some(self.facilities.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    pub fn sorted_ids(&self) -> Vec<FacilityId> {
        let mut ids = self
            .facilities
            .iter()
            .map(|f| f.id.clone())
            .collect::<Vec<FacilityId>>();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, capacity: i64, x: f64, y: f64, z: f64) -> FacilitySpec {
        FacilitySpec {
            name: name.to_string(),
            capacity,
            first_hour: x,
            after_first_hour: y,
            daily_cap: z,
        }
    }

    #[test]
    fn test_add_initialises_free_spaces() {
        let mut registry = FacilityRegistry::default();
        let facility = registry.add(&spec("Parking1", 2, 1.0, 1.5, 20.0)).unwrap();
        assert_eq!(2, facility.free_spaces);
        assert_eq!(1, registry.len());
    }

    #[test]
    fn test_add_rejections() {
        let mut registry = FacilityRegistry::default();
        registry.add(&spec("Parking1", 2, 1.0, 1.5, 20.0)).unwrap();

        assert_eq!(
            Err(LedgerError::DuplicateFacility("Parking1".into())),
            registry.add(&spec("Parking1", 5, 1.0, 1.5, 20.0)).map(|_| ())
        );
        assert_eq!(
            Err(LedgerError::InvalidCapacity(0)),
            registry.add(&spec("Parking2", 0, 1.0, 1.5, 20.0)).map(|_| ())
        );
        assert_eq!(
            Err(LedgerError::InvalidCapacity(-3)),
            registry.add(&spec("Parking2", -3, 1.0, 1.5, 20.0)).map(|_| ())
        );
        assert_eq!(
            Err(LedgerError::InvalidCost),
            registry.add(&spec("Parking2", 3, 2.0, 1.5, 20.0)).map(|_| ())
        );
        assert_eq!(1, registry.len());
    }

    #[test]
    fn test_limit_checked_first() {
        let mut registry = FacilityRegistry::with_limit(1);
        registry.add(&spec("Parking1", 2, 1.0, 1.5, 20.0)).unwrap();
        assert_eq!(
            Err(LedgerError::TooManyFacilities),
            registry.add(&spec("Parking1", 0, 0.0, 0.0, 0.0)).map(|_| ())
        );
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut registry = FacilityRegistry::default();
        for name in ["C", "A", "B"] {
            registry.add(&spec(name, 1, 1.0, 1.5, 20.0)).unwrap();
        }
        assert!(registry.remove("A").is_some());
        assert!(registry.remove("A").is_none());

        let names = registry.iter().map(|f| f.id.to_string()).collect::<Vec<_>>();
        assert_eq!(vec!["C", "B"], names);
    }

    #[test]
    fn test_sorted_ids() {
        let mut registry = FacilityRegistry::default();
        for name in ["Saldanha", "Alameda", "CC Colombo"] {
            registry.add(&spec(name, 1, 1.0, 1.5, 20.0)).unwrap();
        }
        let ids = registry.sorted_ids();
        assert_eq!(vec!["Alameda", "CC Colombo", "Saldanha"], ids.iter().map(|i| &**i).collect::<Vec<_>>());
    }
}
