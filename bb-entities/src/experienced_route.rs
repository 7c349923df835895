use time::{Duration, Time};

use crate::{
    geo::{Distance, LineString},
    id::*,
    weekday::Weekdays,
};

/// A recurring ride along a fixed path that the owner knows well.
///
/// The path, its end points and its length never change after
/// creation. Only the schedule and the name may be edited.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ExperiencedRoute {
    pub id               : Id,
    pub owner            : Id,
    pub route            : LineString,
    pub departure_time   : Time,
    pub arrival_time     : Time,
    pub days             : Weekdays,
    pub start_point_name : String,
    pub end_point_name   : String,
    pub name             : String,
    pub length           : Distance,
    pub deleted          : bool,
}

impl ExperiencedRoute {
    pub fn duration(&self) -> Duration {
        self.arrival_time - self.departure_time
    }

    /// Average speed in meters per second, 0 for a degenerate schedule.
    pub fn average_speed(&self) -> f64 {
        let secs = self.duration().as_seconds_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.length.to_meters() / secs
    }

    /// The time at the given fractional position along the path,
    /// assuming a constant speed between departure and arrival.
    pub fn time_at(&self, fraction: f64) -> Time {
        self.departure_time + self.duration() * fraction.clamp(0.0, 1.0)
    }
}
