use crate::{geo::Distance, id::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id          : Id,
    pub name        : String,
    // Private, never part of the public profile
    pub email       : Option<String>,
    pub bio         : String,
    // Key of the profile photo in the object storage
    pub photo       : Option<String>,
    pub joined      : Timestamp,
    pub statistics  : UserStatistics,
    pub preferences : Preferences,
}

/// Running totals that are updated whenever a buddy request
/// is reviewed.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct UserStatistics {
    /// Accumulated length of all completed rides in meters
    pub distance     : f64,
    /// Number of rides on which this user has been helped
    pub helped_count : u32,
    /// Number of rides on which this user has helped others
    pub users_helped : u32,
    /// Sum of all review scores received as the experienced user
    pub rating_sum   : i64,
}

impl UserStatistics {
    /// Average review score, 0 if nobody has been helped yet.
    pub fn rating(&self) -> f64 {
        if self.users_helped == 0 {
            return 0.0;
        }
        self.rating_sum as f64 / f64::from(self.users_helped)
    }

    pub fn distance(&self) -> Distance {
        Distance::from_meters(self.distance)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub notify: bool,
}

/// The view of a user that is visible to everybody.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct PublicProfile {
    pub id           : Id,
    pub name         : String,
    pub bio          : String,
    pub photo        : Option<String>,
    pub joined       : Timestamp,
    pub distance     : f64,
    pub helped_count : u32,
    pub users_helped : u32,
    pub rating       : f64,
}

impl From<&User> for PublicProfile {
    fn from(from: &User) -> Self {
        let User {
            id,
            name,
            bio,
            photo,
            joined,
            statistics,
            ..
        } = from;
        Self {
            id: id.clone(),
            name: name.clone(),
            bio: bio.clone(),
            photo: photo.clone(),
            joined: *joined,
            distance: statistics.distance,
            helped_count: statistics.helped_count,
            users_helped: statistics.users_helped,
            rating: statistics.rating(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_without_helped_users_is_zero() {
        let stats = UserStatistics {
            rating_sum: 7,
            ..Default::default()
        };
        assert_eq!(stats.rating(), 0.0);
    }

    #[test]
    fn rating_is_average_of_running_sum() {
        let stats = UserStatistics {
            users_helped: 4,
            rating_sum: 14,
            ..Default::default()
        };
        assert_eq!(stats.rating(), 3.5);
    }
}
