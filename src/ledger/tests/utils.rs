use crate::ledger::ledger::Ledger;
use crate::plate::Plate;
use crate::registry::FacilitySpec;
use crate::time::Timestamp;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn spec(name: &str, capacity: i64, rates: (f64, f64, f64)) -> FacilitySpec {
    FacilitySpec {
        name: name.to_string(),
        capacity,
        first_hour: rates.0,
        after_first_hour: rates.1,
        daily_cap: rates.2,
    }
}

pub fn add_facility(ledger: &mut Ledger, name: &str, capacity: i64) {
    ledger
        .add_facility(&spec(name, capacity, (1.0, 1.5, 20.0)))
        .unwrap();
}

pub fn enter(ledger: &mut Ledger, facility: &str, plate: &str, date: &str, time: &str) {
    ledger.enter(facility, plate, date, time).unwrap();
}

pub fn exit(ledger: &mut Ledger, facility: &str, plate: &str, date: &str, time: &str) {
    ledger.exit(facility, plate, date, time).unwrap();
}

pub fn plate(s: &str) -> Plate {
    Plate::parse(s).unwrap()
}

pub fn ts(day: u32, month: u32, year: u32, hour: u32, minute: u32) -> Timestamp {
    Timestamp::new(day, month, year, hour, minute)
}

pub fn free_spaces(ledger: &Ledger, facility: &str) -> u32 {
    ledger.facilities.find(facility).unwrap().free_spaces
}

/// A single ledger command generated for property tests.
#[derive(Debug, Clone)]
pub enum Op {
    Enter { facility: &'static str, plate: &'static str },
    Exit { facility: &'static str, plate: &'static str },
    Remove { facility: &'static str },
}

pub fn arb_facility() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("P1"), Just("P2"), Just("P3")]
}

pub fn arb_plate() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("AA-00-AA"),
        Just("12-AB-34"),
        Just("ZZ-99-00"),
        Just("00-XY-ZW"),
    ]
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arb_facility(), arb_plate()).prop_map(|(facility, plate)| Op::Enter { facility, plate }),
        4 => (arb_facility(), arb_plate()).prop_map(|(facility, plate)| Op::Exit { facility, plate }),
        1 => arb_facility().prop_map(|facility| Op::Remove { facility }),
    ]
}

/// Turns a minute offset into `DD-MM-YYYY` / `HH:MM` tokens starting at 01-01-2023.
pub fn tokens_at(offset: u64) -> (String, String) {
    let mut day_of_year = offset / 1440;
    let minute_of_day = offset % 1440;
    let mut month = 1;
    while let Some(days) = crate::time::days_in_month(month).map(u64::from) {
        if day_of_year < days {
            break;
        }
        day_of_year -= days;
        month += 1;
    }
    (
        format!("{:02}-{:02}-2023", day_of_year + 1, month),
        format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60),
    )
}
