use std::{fmt, str::FromStr};

use thiserror::Error;
pub use time::Weekday;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// The set of weekdays on which an experienced route is ridden.
///
/// Stored as a bit mask with Monday in the least significant bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weekdays(u8);

impl Weekdays {
    const MASK: u8 = 0b0111_1111;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    const fn bit(day: Weekday) -> u8 {
        1 << day.number_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        ALL_DAYS.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Self::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let names: Vec<_> = self.iter().map(weekday_name).collect();
        f.write_str(&names.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown weekday '{0}'")]
pub struct ParseWeekdayError(pub String);

/// Case-insensitive English day name, e.g. `friday` or `Friday`.
pub fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let lower = s.trim().to_lowercase();
    ALL_DAYS
        .into_iter()
        .find(|day| weekday_name(*day) == lower)
        .ok_or_else(|| ParseWeekdayError(s.to_owned()))
}

pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

impl FromStr for Weekdays {
    type Err = ParseWeekdayError;

    /// Comma separated list of day names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(parse_weekday)
            .collect()
    }
}
