use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;
use time::OffsetDateTime;

use crate::{
    geo::{Distance, LineString, MapPoint},
    id::*,
    time::*,
};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BuddyRequestStatus {
    Pending,
    Accepted,
    Rejected,
    Canceled,
    Completed,
}

impl BuddyRequestStatus {
    /// Requests in a terminal status are never touched by cascading
    /// cancellations.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Canceled | Self::Completed)
    }

    /// Only while pending or accepted the details of a
    /// request may be edited.
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid review score: {0}")]
pub struct InvalidReviewScore(pub i64);

/// Review given by the owner of a request: 0 while unset, 1 to 5 otherwise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReviewScore(u8);

impl ReviewScore {
    pub const fn unset() -> Self {
        Self(0)
    }

    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn is_set(self) -> bool {
        self >= Self::min()
    }

    /// A score that may be submitted as a review, i.e. 1 to 5.
    pub fn try_new_submitted(score: i64) -> Result<Self, InvalidReviewScore> {
        let score = Self::try_from(score)?;
        if !score.is_set() {
            return Err(InvalidReviewScore(0));
        }
        Ok(score)
    }
}

impl TryFrom<i64> for ReviewScore {
    type Error = InvalidReviewScore;

    fn try_from(from: i64) -> Result<Self, Self::Error> {
        u8::try_from(from)
            .ok()
            .map(Self)
            .filter(|score| *score <= Self::max())
            .ok_or(InvalidReviewScore(from))
    }
}

impl From<ReviewScore> for i64 {
    fn from(from: ReviewScore) -> Self {
        i64::from(from.0)
    }
}

/// A proposed ride along, pairing one inexperienced route with the
/// segment of one experienced route between the meeting and the
/// divorce point.
///
/// The references to users and routes may be invalid (empty) for
/// canceled requests whose counterpart has been deleted.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct BuddyRequest {
    pub id                       : Id,
    /// The inexperienced user
    pub owner                    : Id,
    pub experienced_user         : Id,
    pub experienced_route        : Id,
    pub experienced_route_name   : String,
    pub inexperienced_route      : Id,
    pub inexperienced_route_name : String,
    pub meeting_point            : MapPoint,
    pub meeting_point_name       : String,
    pub meeting_time             : OffsetDateTime,
    pub divorce_point            : MapPoint,
    pub divorce_point_name       : String,
    pub divorce_time             : OffsetDateTime,
    pub route                    : LineString,
    pub length                   : Distance,
    /// km/h rounded to one decimal
    pub average_speed            : f64,
    pub reason                   : String,
    pub review                   : ReviewScore,
    pub status                   : BuddyRequestStatus,
    pub created                  : Timestamp,
    pub updated                  : Timestamp,
}

impl BuddyRequest {
    pub fn is_party(&self, user_id: &Id) -> bool {
        user_id.is_valid() && (&self.owner == user_id || &self.experienced_user == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_status_ignoring_case() {
        assert_eq!(
            "Accepted".parse::<BuddyRequestStatus>().unwrap(),
            BuddyRequestStatus::Accepted
        );
        assert!("done".parse::<BuddyRequestStatus>().is_err());
        for status in BuddyRequestStatus::iter() {
            assert_eq!(status.to_string().parse::<BuddyRequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn terminal_and_editable_status_are_disjoint() {
        for status in BuddyRequestStatus::iter() {
            assert_ne!(status.is_terminal(), status.is_editable());
        }
    }

    #[test]
    fn review_score_ranges() {
        assert_eq!(ReviewScore::try_from(0).unwrap(), ReviewScore::unset());
        assert_eq!(i64::from(ReviewScore::try_from(5).unwrap()), 5);
        assert!(ReviewScore::try_from(6).is_err());
        assert!(ReviewScore::try_from(-1).is_err());
        assert!(ReviewScore::try_new_submitted(0).is_err());
        assert!(ReviewScore::try_new_submitted(1).is_ok());
    }
}
