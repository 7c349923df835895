//! Construction of entities from loosely-typed input records.
//!
//! Every record has only optional fields. Converting a record into
//! an entity either yields a value that satisfies all invariants or
//! fails with the first violation that has been found.

use crate::entities::*;
use thiserror::Error;
use time::OffsetDateTime;

pub trait Validate {
    type Error;
    fn validate(&self) -> std::result::Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field '{0}'")]
    Missing(&'static str),
    #[error("Invalid field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("The arrival time must be after the departure time")]
    ArrivalBeforeDeparture,
    #[error("The divorce time must not be before the meeting time")]
    DivorceBeforeMeeting,
    #[error("The radius must be between 1 and 2000 meters, got {0}")]
    RadiusOutOfBounds(f64),
    #[error("The review must be a number between {min} and 5, got {score}")]
    ReviewOutOfRange { score: i64, min: i64 },
    #[error("Invalid status '{0}'")]
    Status(String),
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(ValidationError::Missing(field))
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String> {
    let text = required(value, field)?;
    if text.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(text)
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn required_id(value: Option<String>, field: &'static str) -> Result<Id> {
    required_text(value, field).map(Id::from)
}

/// Required unless `exempt` is set, in which case an empty id is returned.
fn required_id_unless(value: Option<String>, field: &'static str, exempt: bool) -> Result<Id> {
    if exempt {
        return Ok(optional_text(value).map(Id::from).unwrap_or_default());
    }
    required_id(value, field)
}

pub fn point(coords: &[f64], field: &'static str) -> Result<MapPoint> {
    MapPoint::try_from_coords(coords).map_err(|err| ValidationError::invalid(field, err))
}

pub fn line<C: AsRef<[f64]>>(coords: &[C], field: &'static str) -> Result<LineString> {
    LineString::try_from_coords(coords).map_err(|err| ValidationError::invalid(field, err))
}

pub fn time_of_day(s: &str, field: &'static str) -> Result<time::Time> {
    parse_time_of_day(s).map_err(|err| ValidationError::invalid(field, err))
}

pub fn date_time(s: &str, field: &'static str) -> Result<OffsetDateTime> {
    parse_date_time(s).map_err(|err| ValidationError::invalid(field, err))
}

pub fn weekdays<S: AsRef<str>>(names: &[S], field: &'static str) -> Result<Weekdays> {
    let days = names
        .iter()
        .map(|name| parse_weekday(name.as_ref()))
        .collect::<std::result::Result<Weekdays, _>>()
        .map_err(|err| ValidationError::invalid(field, err))?;
    if days.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(days)
}

pub fn length(meters: f64, field: &'static str) -> Result<Distance> {
    if !meters.is_finite() || meters < 0.0 {
        return Err(ValidationError::invalid(field, "must be a positive number of meters"));
    }
    Ok(Distance::from_meters(meters))
}

pub fn search_radius(radius: f64) -> Result<f64> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ValidationError::invalid("radius", "must be greater than 0"));
    }
    Ok(radius)
}

pub fn review_score(score: i64) -> Result<ReviewScore> {
    ReviewScore::try_from(score).map_err(|_| ValidationError::ReviewOutOfRange { score, min: 0 })
}

pub fn status(s: &str) -> Result<BuddyRequestStatus> {
    s.parse()
        .map_err(|_| ValidationError::Status(s.to_owned()))
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewUser {
    pub id     : Option<String>,
    pub name   : Option<String>,
    pub email  : Option<String>,
    pub bio    : Option<String>,
    pub photo  : Option<String>,
    pub notify : Option<bool>,
}

impl TryFrom<NewUser> for User {
    type Error = ValidationError;

    fn try_from(from: NewUser) -> Result<Self> {
        let NewUser {
            id,
            name,
            email,
            bio,
            photo,
            notify,
        } = from;
        let id = required_id(id, "id")?;
        let name = required_text(name, "name")?;
        let email = optional_text(email);
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(ValidationError::invalid("email", "not an email address"));
            }
        }
        Ok(User {
            id,
            name,
            email,
            bio: bio.unwrap_or_default(),
            photo: optional_text(photo),
            joined: Timestamp::now(),
            statistics: Default::default(),
            preferences: Preferences {
                notify: notify.unwrap_or_default(),
            },
        })
    }
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewExperiencedRoute {
    pub id               : Option<String>,
    pub owner            : Option<String>,
    /// `[lat, lng]` pairs
    pub route            : Option<Vec<Vec<f64>>>,
    pub departure_time   : Option<String>,
    pub arrival_time     : Option<String>,
    pub days             : Option<Vec<String>>,
    pub start_point_name : Option<String>,
    pub end_point_name   : Option<String>,
    pub name             : Option<String>,
    pub deleted          : Option<bool>,
}

impl TryFrom<NewExperiencedRoute> for ExperiencedRoute {
    type Error = ValidationError;

    fn try_from(from: NewExperiencedRoute) -> Result<Self> {
        let NewExperiencedRoute {
            id,
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
            deleted,
        } = from;
        let id = optional_text(id).map(Id::from).unwrap_or_else(Id::new);
        let owner = required_id(owner, "owner")?;
        let route = line(&required(route, "route")?, "route")?;
        let departure_time = time_of_day(&required(departure_time, "departureTime")?, "departureTime")?;
        let arrival_time = time_of_day(&required(arrival_time, "arrivalTime")?, "arrivalTime")?;
        if arrival_time <= departure_time {
            return Err(ValidationError::ArrivalBeforeDeparture);
        }
        let days = weekdays(&required(days, "days")?, "days")?;
        let start_point_name = required_text(start_point_name, "startPointName")?;
        let end_point_name = required_text(end_point_name, "endPointName")?;
        let name = optional_text(name)
            .unwrap_or_else(|| derive_route_name(&start_point_name, &end_point_name));
        let length = route.length();
        Ok(ExperiencedRoute {
            id,
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
            length,
            deleted: deleted.unwrap_or_default(),
        })
    }
}

impl Validate for ExperiencedRoute {
    type Error = ValidationError;
    fn validate(&self) -> Result<()> {
        if self.arrival_time <= self.departure_time {
            return Err(ValidationError::ArrivalBeforeDeparture);
        }
        if self.days.is_empty() {
            return Err(ValidationError::Missing("days"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        Ok(())
    }
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewInexperiencedRoute {
    pub id               : Option<String>,
    pub owner            : Option<String>,
    pub start_point      : Option<Vec<f64>>,
    pub start_point_name : Option<String>,
    pub end_point        : Option<Vec<f64>>,
    pub end_point_name   : Option<String>,
    /// RFC 3339
    pub arrival_datetime : Option<String>,
    pub radius           : Option<f64>,
    pub notify_owner     : Option<bool>,
    pub reusable         : Option<bool>,
    pub name             : Option<String>,
    pub deleted          : Option<bool>,
}

impl TryFrom<NewInexperiencedRoute> for InexperiencedRoute {
    type Error = ValidationError;

    fn try_from(from: NewInexperiencedRoute) -> Result<Self> {
        let NewInexperiencedRoute {
            id,
            owner,
            start_point,
            start_point_name,
            end_point,
            end_point_name,
            arrival_datetime,
            radius,
            notify_owner,
            reusable,
            name,
            deleted,
        } = from;
        let id = optional_text(id).map(Id::from).unwrap_or_else(Id::new);
        let owner = required_id(owner, "owner")?;
        let start_point = point(&required(start_point, "startPoint")?, "startPoint")?;
        let start_point_name = required_text(start_point_name, "startPointName")?;
        let end_point = point(&required(end_point, "endPoint")?, "endPoint")?;
        let end_point_name = required_text(end_point_name, "endPointName")?;
        let arrival_datetime =
            date_time(&required(arrival_datetime, "arrivalDateTime")?, "arrivalDateTime")?;
        let radius = search_radius(required(radius, "radius")?)?;
        let name = optional_text(name)
            .unwrap_or_else(|| derive_route_name(&start_point_name, &end_point_name));
        Ok(InexperiencedRoute {
            id,
            owner,
            start_point,
            start_point_name,
            end_point,
            end_point_name,
            arrival_datetime,
            radius,
            notify_owner: notify_owner.unwrap_or_default(),
            reusable: reusable.unwrap_or_default(),
            name,
            deleted: deleted.unwrap_or_default(),
        })
    }
}

impl Validate for InexperiencedRoute {
    type Error = ValidationError;
    fn validate(&self) -> Result<()> {
        search_radius(self.radius)?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        Ok(())
    }
}

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewBuddyRequest {
    pub id                       : Option<String>,
    pub owner                    : Option<String>,
    pub experienced_user         : Option<String>,
    pub experienced_route        : Option<String>,
    pub experienced_route_name   : Option<String>,
    pub inexperienced_route      : Option<String>,
    pub inexperienced_route_name : Option<String>,
    pub meeting_point            : Option<Vec<f64>>,
    pub meeting_point_name       : Option<String>,
    pub meeting_time             : Option<String>,
    pub divorce_point            : Option<Vec<f64>>,
    pub divorce_point_name       : Option<String>,
    pub divorce_time             : Option<String>,
    pub route                    : Option<Vec<Vec<f64>>>,
    pub length                   : Option<f64>,
    /// km/h
    pub average_speed            : Option<f64>,
    pub reason                   : Option<String>,
    pub review                   : Option<i64>,
    pub status                   : Option<String>,
}

impl TryFrom<NewBuddyRequest> for BuddyRequest {
    type Error = ValidationError;

    fn try_from(from: NewBuddyRequest) -> Result<Self> {
        let NewBuddyRequest {
            id,
            owner,
            experienced_user,
            experienced_route,
            experienced_route_name,
            inexperienced_route,
            inexperienced_route_name,
            meeting_point,
            meeting_point_name,
            meeting_time,
            divorce_point,
            divorce_point_name,
            divorce_time,
            route,
            length: route_length,
            average_speed,
            reason,
            review,
            status: status_name,
        } = from;
        let status = match status_name {
            Some(name) => status(&name)?,
            None => BuddyRequestStatus::Pending,
        };
        // Canceled requests may refer to entities that no longer exist
        let exempt = status == BuddyRequestStatus::Canceled;
        let id = optional_text(id).map(Id::from).unwrap_or_else(Id::new);
        let owner = required_id_unless(owner, "owner", exempt)?;
        let experienced_user = required_id_unless(experienced_user, "experiencedUser", exempt)?;
        let experienced_route =
            required_id_unless(experienced_route, "experiencedRoute", exempt)?;
        let inexperienced_route =
            required_id_unless(inexperienced_route, "inexperiencedRoute", exempt)?;
        let meeting_point = point(&required(meeting_point, "meetingPoint")?, "meetingPoint")?;
        let meeting_time = date_time(&required(meeting_time, "meetingTime")?, "meetingTime")?;
        let divorce_point = point(&required(divorce_point, "divorcePoint")?, "divorcePoint")?;
        let divorce_time = date_time(&required(divorce_time, "divorceTime")?, "divorceTime")?;
        if divorce_time < meeting_time {
            return Err(ValidationError::DivorceBeforeMeeting);
        }
        let route = line(&required(route, "route")?, "route")?;
        let length = match route_length {
            Some(meters) => length(meters, "length")?,
            None => route.length(),
        };
        let average_speed = average_speed.unwrap_or_default();
        if !average_speed.is_finite() || average_speed < 0.0 {
            return Err(ValidationError::invalid(
                "averageSpeed",
                "must be a positive number",
            ));
        }
        let review = review_score(review.unwrap_or_default())?;
        let now = Timestamp::now();
        Ok(BuddyRequest {
            id,
            owner,
            experienced_user,
            experienced_route,
            experienced_route_name: experienced_route_name.unwrap_or_default(),
            inexperienced_route,
            inexperienced_route_name: inexperienced_route_name.unwrap_or_default(),
            meeting_point,
            meeting_point_name: meeting_point_name.unwrap_or_default(),
            meeting_time,
            divorce_point,
            divorce_point_name: divorce_point_name.unwrap_or_default(),
            divorce_time,
            route,
            length,
            average_speed,
            reason: reason.unwrap_or_default(),
            review,
            status,
            created: now,
            updated: now,
        })
    }
}

impl Validate for BuddyRequest {
    type Error = ValidationError;
    fn validate(&self) -> Result<()> {
        if self.divorce_time < self.meeting_time {
            return Err(ValidationError::DivorceBeforeMeeting);
        }
        if !self.length.is_valid() {
            return Err(ValidationError::invalid("length", "must not be negative"));
        }
        if !self.meeting_point.is_valid() {
            return Err(ValidationError::invalid("meetingPoint", "out of range"));
        }
        if !self.divorce_point.is_valid() {
            return Err(ValidationError::invalid("divorcePoint", "out of range"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_experienced_route() -> NewExperiencedRoute {
        NewExperiencedRoute {
            owner: Some("owner".into()),
            route: Some(vec![vec![0.0, 0.0], vec![0.0, 1.0]]),
            departure_time: Some("12:15".into()),
            arrival_time: Some("13:15".into()),
            days: Some(vec!["tuesday".into(), "Friday".into()]),
            start_point_name: Some("Home".into()),
            end_point_name: Some("Work".into()),
            ..Default::default()
        }
    }

    fn new_buddy_request() -> NewBuddyRequest {
        NewBuddyRequest {
            owner: Some("a".into()),
            experienced_user: Some("b".into()),
            experienced_route: Some("er".into()),
            inexperienced_route: Some("ir".into()),
            meeting_point: Some(vec![0.0, 0.0]),
            meeting_time: Some("2026-10-16T12:15:00Z".into()),
            divorce_point: Some(vec![0.0, 1.0]),
            divorce_time: Some("2026-10-16T12:45:00Z".into()),
            route: Some(vec![vec![0.0, 0.0], vec![0.0, 1.0]]),
            ..Default::default()
        }
    }

    #[test]
    fn derive_missing_route_name_and_length() {
        let route = ExperiencedRoute::try_from(new_experienced_route()).unwrap();
        assert_eq!(route.name, "Home to Work");
        assert_eq!(route.length, route.route.length());
        assert!(route.id.is_valid());
        assert!(route.days.contains(Weekday::Friday));
    }

    #[test]
    fn length_of_experienced_route_follows_its_path() {
        let route = ExperiencedRoute::try_from(NewExperiencedRoute {
            route: Some((0..=6).map(|lng| vec![0.0, f64::from(lng)]).collect()),
            ..new_experienced_route()
        })
        .unwrap();
        assert!(route.length.to_meters() > 600_000.0);
        assert_eq!(route.length, route.route.length());
    }

    #[test]
    fn reject_arrival_before_departure() {
        let new_route = NewExperiencedRoute {
            arrival_time: Some("12:15".into()),
            ..new_experienced_route()
        };
        assert_eq!(
            ExperiencedRoute::try_from(new_route).unwrap_err(),
            ValidationError::ArrivalBeforeDeparture
        );
    }

    #[test]
    fn reject_coordinates_with_wrong_dimension() {
        let new_route = NewExperiencedRoute {
            route: Some(vec![vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]),
            ..new_experienced_route()
        };
        assert!(matches!(
            ExperiencedRoute::try_from(new_route),
            Err(ValidationError::Invalid { field: "route", .. })
        ));
        let new_route = NewExperiencedRoute {
            route: Some(vec![vec![0.0], vec![1.0]]),
            ..new_experienced_route()
        };
        assert!(ExperiencedRoute::try_from(new_route).is_err());
    }

    #[test]
    fn reject_route_with_a_single_point() {
        let new_route = NewExperiencedRoute {
            route: Some(vec![vec![0.0, 0.0]]),
            ..new_experienced_route()
        };
        assert!(matches!(
            ExperiencedRoute::try_from(new_route),
            Err(ValidationError::Invalid { field: "route", .. })
        ));
    }

    #[test]
    fn report_the_first_missing_field() {
        let new_route = NewExperiencedRoute {
            owner: None,
            route: None,
            ..new_experienced_route()
        };
        assert_eq!(
            ExperiencedRoute::try_from(new_route).unwrap_err(),
            ValidationError::Missing("owner")
        );
    }

    #[test]
    fn inexperienced_route_needs_positive_radius() {
        let new_route = NewInexperiencedRoute {
            owner: Some("owner".into()),
            start_point: Some(vec![51.5, -0.12]),
            start_point_name: Some("Station".into()),
            end_point: Some(vec![51.51, -0.11]),
            end_point_name: Some("Office".into()),
            arrival_datetime: Some("2026-10-16T09:00:00+01:00".into()),
            radius: Some(0.0),
            ..Default::default()
        };
        assert!(InexperiencedRoute::try_from(new_route.clone()).is_err());
        let route = InexperiencedRoute::try_from(NewInexperiencedRoute {
            radius: Some(250.0),
            ..new_route
        })
        .unwrap();
        assert_eq!(route.name, "Station to Office");
        assert!(!route.reusable);
    }

    #[test]
    fn buddy_request_defaults() {
        let request = BuddyRequest::try_from(new_buddy_request()).unwrap();
        assert_eq!(request.status, BuddyRequestStatus::Pending);
        assert_eq!(request.review, ReviewScore::unset());
        assert_eq!(request.created, request.updated);
    }

    #[test]
    fn buddy_request_divorce_before_meeting() {
        let new_request = NewBuddyRequest {
            divorce_time: Some("2026-10-16T12:00:00Z".into()),
            ..new_buddy_request()
        };
        assert_eq!(
            BuddyRequest::try_from(new_request).unwrap_err(),
            ValidationError::DivorceBeforeMeeting
        );
    }

    #[test]
    fn buddy_request_review_out_of_range() {
        let new_request = NewBuddyRequest {
            review: Some(6),
            ..new_buddy_request()
        };
        assert!(matches!(
            BuddyRequest::try_from(new_request),
            Err(ValidationError::ReviewOutOfRange { score: 6, .. })
        ));
    }

    #[test]
    fn buddy_request_unknown_status() {
        let new_request = NewBuddyRequest {
            status: Some("done".into()),
            ..new_buddy_request()
        };
        assert_eq!(
            BuddyRequest::try_from(new_request).unwrap_err(),
            ValidationError::Status("done".into())
        );
    }

    #[test]
    fn canceled_buddy_request_without_references() {
        let new_request = NewBuddyRequest {
            owner: None,
            experienced_user: None,
            experienced_route: None,
            inexperienced_route: None,
            ..new_buddy_request()
        };
        assert_eq!(
            BuddyRequest::try_from(new_request.clone()).unwrap_err(),
            ValidationError::Missing("owner")
        );
        let request = BuddyRequest::try_from(NewBuddyRequest {
            status: Some("canceled".into()),
            ..new_request
        })
        .unwrap();
        assert!(!request.owner.is_valid());
        assert!(!request.experienced_route.is_valid());
    }

    #[test]
    fn user_needs_name() {
        let new_user = NewUser {
            id: Some("u".into()),
            ..Default::default()
        };
        assert_eq!(
            User::try_from(new_user).unwrap_err(),
            ValidationError::Missing("name")
        );
    }
}
