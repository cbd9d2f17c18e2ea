use std::cmp::Ordering;
use std::fmt;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const DAYS_PER_YEAR: i64 = 365;

pub fn days_in_month(month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(28),
        _ => None,
    }
}

/// Field order matters: the derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Timestamp {
    pub fn new(day: u32, month: u32, year: u32, hour: u32, minute: u32) -> Timestamp {
        Timestamp {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    pub fn parse(date: &str, time: Option<&str>) -> Option<Timestamp> {
        let mut date_parts = date.split('-').map(|p| p.parse::<u32>());
        let (day, month, year) = match (date_parts.next(), date_parts.next(), date_parts.next()) {
            (Some(Ok(d)), Some(Ok(m)), Some(Ok(y))) => (d, m, y),
            _ => return None,
        };
        if date_parts.next().is_some() {
            return None;
        }

        let (hour, minute) = match time {
            None => (0, 0),
            Some(time) => {
                let (h, m) = time.split_once(':')?;
                (h.parse().ok()?, m.parse().ok()?)
            }
        };

        Some(Timestamp::new(day, month, year, hour, minute))
    }

    pub fn is_valid(&self) -> bool {
        days_in_month(self.month).is_some_and(|days| self.day >= 1 && self.day <= days)
            && self.hour <= 23
            && self.minute <= 59
    }

    fn absolute_minutes(&self) -> i64 {
        let days_before_month: i64 = (1..self.month)
            .filter_map(days_in_month)
            .map(i64::from)
            .sum();
        let days = i64::from(self.year) * DAYS_PER_YEAR + days_before_month + i64::from(self.day);
        days * MINUTES_PER_DAY + i64::from(self.hour) * MINUTES_PER_HOUR + i64::from(self.minute)
    }

    pub fn elapsed_minutes(&self, later: &Timestamp) -> i64 {
        later.absolute_minutes() - self.absolute_minutes()
    }

    /// `Equal` means the same calendar day.
    pub fn cmp_day(&self, other: &Timestamp) -> Ordering {
        if self.same_day(other) {
            Ordering::Equal
        } else {
            0_i64.cmp(&self.elapsed_minutes(other))
        }
    }

    pub fn same_day(&self, other: &Timestamp) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }

    pub fn date(&self) -> String {
        format!("{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }

    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date(), self.clock())
    }
}

#[derive(Debug, Default, Clone)]
pub struct Clock {
    floor: Option<Timestamp>,
}

impl Clock {
    pub fn floor(&self) -> Option<Timestamp> {
        self.floor
    }

    pub fn accepts(&self, at: &Timestamp) -> bool {
        at.is_valid() && self.floor.is_none_or(|floor| *at >= floor)
    }

    /// Ratchets the floor forward; an earlier or invalid `at` is refused.
    pub fn advance(&mut self, at: Timestamp) -> bool {
        if !self.accepts(&at) {
            return false;
        }
        self.floor = Some(at);
        true
    }

    pub fn has_reached_day(&self, at: &Timestamp) -> bool {
        self.floor
            .is_some_and(|floor| floor.cmp_day(at) != Ordering::Less)
    }
}
