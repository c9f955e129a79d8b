//! New Year countdown

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone};

use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use crate::platform::Target;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountdownField {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl CountdownField {
    pub const ALL: [CountdownField; 4] = [
        CountdownField::Days,
        CountdownField::Hours,
        CountdownField::Minutes,
        CountdownField::Seconds,
    ];

    pub fn target(self) -> Target {
        match self {
            CountdownField::Days => Target::Days,
            CountdownField::Hours => Target::Hours,
            CountdownField::Minutes => Target::Minutes,
            CountdownField::Seconds => Target::Seconds,
        }
    }
}

/// Remaining time split into whole display units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Negative durations count as zero.
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn total_millis(&self) -> i64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }

    pub fn value(&self, field: CountdownField) -> i64 {
        match field {
            CountdownField::Days => self.days,
            CountdownField::Hours => self.hours,
            CountdownField::Minutes => self.minutes,
            CountdownField::Seconds => self.seconds,
        }
    }

    /// Zero-padded to at least two digits.
    pub fn formatted(&self, field: CountdownField) -> String {
        format!("{:02}", self.value(field))
    }
}

/// Fields whose formatted value differs from what is currently shown.
pub fn changed_fields<F>(left: &TimeLeft, mut shown: F) -> Vec<(CountdownField, String)>
where
    F: FnMut(CountdownField) -> Option<String>,
{
    CountdownField::ALL
        .into_iter()
        .filter_map(|field| {
            let value = left.formatted(field);
            match shown(field) {
                Some(current) if current == value => None,
                _ => Some((field, value)),
            }
        })
        .collect()
}

/// Local midnight on January 1st of `year` in `tz`.
pub fn new_year<Tz: TimeZone>(tz: &Tz, year: i32) -> Option<DateTime<Tz>> {
    let midnight = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
}

/// Counts down to the next New Year, rolling forward once it has passed.
#[derive(Clone, Debug)]
pub struct NewYearCountdown<Tz: TimeZone> {
    target: DateTime<Tz>,
}

impl<Tz: TimeZone> NewYearCountdown<Tz> {
    /// Targets January 1st of the year after `now`.
    pub fn starting_at(now: &DateTime<Tz>) -> Option<Self> {
        let target = new_year(&now.timezone(), now.year() + 1)?;
        Some(Self { target })
    }

    pub fn target(&self) -> &DateTime<Tz> {
        &self.target
    }

    pub fn target_year(&self) -> i32 {
        self.target.year()
    }

    /// Milliseconds until the target, rolling the target forward a year at a
    /// time while it is not in the future.
    pub fn remaining_millis(&mut self, now: &DateTime<Tz>) -> i64 {
        loop {
            let diff = self
                .target
                .clone()
                .signed_duration_since(now.clone())
                .num_milliseconds();
            if diff > 0 {
                return diff;
            }
            let Some(next) = new_year(&self.target.timezone(), self.target.year() + 1) else {
                log::warn!("countdown target could not roll past {}", self.target.year());
                return 0;
            };
            log::info!("new year reached, counting down to {}", next.year());
            self.target = next;
        }
    }

    pub fn tick(&mut self, now: &DateTime<Tz>) -> TimeLeft {
        TimeLeft::from_millis(self.remaining_millis(now))
    }
}
