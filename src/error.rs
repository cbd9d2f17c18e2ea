use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    StateConflict,
    Fatal,
}

/// Every rejection the ledger can report. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("{0}: invalid licence plate.")]
    InvalidPlate(String),

    #[error("invalid date.")]
    InvalidDate,

    #[error("{0}: invalid capacity.")]
    InvalidCapacity(i64),

    #[error("invalid cost.")]
    InvalidCost,

    #[error("{0}: no such parking.")]
    NoSuchFacility(String),

    #[error("{0}: no entries found in any parking.")]
    NoEntries(String),

    #[error("{0}: invalid vehicle entry.")]
    InvalidEntry(String),

    #[error("{0}: invalid vehicle exit.")]
    InvalidExit(String),

    #[error("{0}: parking is full.")]
    FacilityFull(String),

    #[error("{0}: parking already exists.")]
    DuplicateFacility(String),

    #[error("too many parks.")]
    TooManyFacilities,

    #[error("out of memory.")]
    OutOfMemory,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidPlate(_)
            | LedgerError::InvalidDate
            | LedgerError::InvalidCapacity(_)
            | LedgerError::InvalidCost => ErrorKind::Validation,
            LedgerError::NoSuchFacility(_) | LedgerError::NoEntries(_) => ErrorKind::NotFound,
            LedgerError::InvalidEntry(_)
            | LedgerError::InvalidExit(_)
            | LedgerError::FacilityFull(_)
            | LedgerError::DuplicateFacility(_)
            | LedgerError::TooManyFacilities => ErrorKind::StateConflict,
            LedgerError::OutOfMemory => ErrorKind::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

impl From<std::collections::TryReserveError> for LedgerError {
    fn from(_: std::collections::TryReserveError) -> Self {
        LedgerError::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!("AA-00-A: invalid licence plate.", LedgerError::InvalidPlate("AA-00-A".into()).to_string());
        assert_eq!("0: invalid capacity.", LedgerError::InvalidCapacity(0).to_string());
        assert_eq!("Saldanha: no such parking.", LedgerError::NoSuchFacility("Saldanha".into()).to_string());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ErrorKind::Validation, LedgerError::InvalidDate.kind());
        assert_eq!(ErrorKind::NotFound, LedgerError::NoEntries("AA-00-AA".into()).kind());
        assert_eq!(ErrorKind::StateConflict, LedgerError::TooManyFacilities.kind());
        assert!(LedgerError::OutOfMemory.is_fatal());
        assert!(!LedgerError::InvalidCost.is_fatal());
    }
}
