use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::registry::FacilitySpec;
use serde::Deserialize;
use std::io;
use std::path::Path;

/// Facilities to register before the first command is read.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub facilities: Vec<FacilitySpec>,
}

impl Config {
    pub fn parse(data: &str) -> serde_json::Result<Config> {
        serde_json::from_str(data)
    }

    pub fn load_from_file(path: &Path) -> io::Result<Config> {
        let data = std::fs::read_to_string(path)?;
        Ok(Config::parse(&data)?)
    }

    /// Registers every facility in file order, stopping at the first rejection.
    pub fn apply(&self, ledger: &mut Ledger) -> Result<usize, LedgerError> {
        for spec in &self.facilities {
            ledger.add_facility(spec)?;
        }
        Ok(self.facilities.len())
    }
}
