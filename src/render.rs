use crate::facility::{Facility, FacilityId};
use crate::ledger::{EntryReceipt, ExitReceipt, Revenue};
use crate::plate::Plate;
use crate::tariff::Money;
use crate::vehicle::ParkingEvent;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FacilityRow {
    name: FacilityId,
    capacity: u32,
    free: u32,
    first_hour: Money,
    after_first_hour: Money,
    daily_cap: Money,
}

#[derive(Tabled)]
struct StayRow {
    parking: FacilityId,
    entry: String,
    exit: String,
}

#[derive(Tabled)]
struct DayRow {
    date: String,
    total: Money,
}

#[derive(Tabled)]
struct ExitRow {
    plate: Plate,
    time: String,
    cost: Money,
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

/// Turns ledger results into output text: one record per line in the plain
/// form, or rounded tables for listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub tables: bool,
}

impl Renderer {
    pub fn facilities<'a>(&self, facilities: impl Iterator<Item = &'a Facility>) -> String {
        if self.tables {
            return table(
                facilities
                    .map(|f| FacilityRow {
                        name: f.id.clone(),
                        capacity: f.capacity,
                        free: f.free_spaces,
                        first_hour: f.tariff.first_hour,
                        after_first_hour: f.tariff.after_first_hour,
                        daily_cap: f.tariff.daily_cap,
                    })
                    .collect(),
            );
        }
        facilities.map(|f| f.to_string()).collect::<Vec<_>>().join("\n")
    }

    pub fn entry(&self, receipt: &EntryReceipt) -> String {
        format!("{} {}", receipt.facility_id, receipt.free_spaces)
    }

    pub fn exit(&self, receipt: &ExitReceipt) -> String {
        format!(
            "{} {} {} {}",
            receipt.plate, receipt.entry, receipt.exit, receipt.cost
        )
    }

    pub fn history(&self, events: &[&ParkingEvent]) -> String {
        if self.tables {
            return table(
                events
                    .iter()
                    .map(|e| StayRow {
                        parking: e.facility_id.clone(),
                        entry: e.entry.to_string(),
                        exit: e.exit.map(|t| t.to_string()).unwrap_or_default(),
                    })
                    .collect(),
            );
        }
        events
            .iter()
            .map(|e| match e.exit {
                Some(exit) => format!("{} {} {}", e.facility_id, e.entry, exit),
                None => format!("{} {}", e.facility_id, e.entry),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn revenue(&self, revenue: &Revenue<'_>) -> String {
        match (revenue, self.tables) {
            (Revenue::Daily(days), true) => table(
                days.iter()
                    .map(|d| DayRow {
                        date: d.date.date(),
                        total: d.total,
                    })
                    .collect(),
            ),
            (Revenue::Daily(days), false) => days
                .iter()
                .map(|d| format!("{} {}", d.date.date(), d.total))
                .collect::<Vec<_>>()
                .join("\n"),
            (Revenue::Day(records), true) => table(
                records
                    .iter()
                    .map(|r| ExitRow {
                        plate: r.plate.clone(),
                        time: r.exit.clock(),
                        cost: r.cost,
                    })
                    .collect(),
            ),
            (Revenue::Day(records), false) => records
                .iter()
                .map(|r| format!("{} {} {}", r.plate, r.exit.clock(), r.cost))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn names(&self, names: &[FacilityId]) -> String {
        names.join("\n")
    }
}
