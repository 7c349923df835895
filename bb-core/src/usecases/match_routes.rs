use super::prelude::*;
use time::{Duration, OffsetDateTime, Time};

pub const MIN_SEARCH_RADIUS: f64 = 1.0;
pub const MAX_SEARCH_RADIUS: f64 = 2_000.0;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewMatchQuery {
    pub start_point : Option<Vec<f64>>,
    pub end_point   : Option<Vec<f64>>,
    pub radius      : Option<f64>,
    /// RFC 3339
    pub arrival     : Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub start_point: MapPoint,
    pub end_point: MapPoint,
    /// Meters
    pub radius: f64,
    pub arrival: OffsetDateTime,
}

impl TryFrom<NewMatchQuery> for MatchQuery {
    type Error = ValidationError;

    fn try_from(from: NewMatchQuery) -> std::result::Result<Self, Self::Error> {
        let NewMatchQuery {
            start_point,
            end_point,
            radius,
            arrival,
        } = from;
        let start_point = validate::point(
            &start_point.ok_or(ValidationError::Missing("startPoint"))?,
            "startPoint",
        )?;
        let end_point = validate::point(
            &end_point.ok_or(ValidationError::Missing("endPoint"))?,
            "endPoint",
        )?;
        let radius = radius.ok_or(ValidationError::Missing("radius"))?;
        let arrival = validate::date_time(
            &arrival.ok_or(ValidationError::Missing("arrival"))?,
            "arrival",
        )?;
        Ok(Self {
            start_point,
            end_point,
            radius,
            arrival,
        })
    }
}

impl From<&InexperiencedRoute> for MatchQuery {
    fn from(from: &InexperiencedRoute) -> Self {
        Self {
            start_point: from.start_point,
            end_point: from.end_point,
            radius: from.radius,
            arrival: from.arrival_datetime,
        }
    }
}

/// The part of an experienced route that can be ridden together.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMatch {
    pub experienced_route      : Id,
    pub experienced_route_name : String,
    pub owner                  : PublicProfile,
    pub meeting_point          : MapPoint,
    pub meeting_time           : OffsetDateTime,
    pub divorce_point          : MapPoint,
    pub divorce_time           : OffsetDateTime,
    pub route                  : LineString,
    pub length                 : Distance,
    /// km/h rounded to one decimal
    pub average_speed          : f64,
    pub time_to_meeting_point  : Duration,
    pub time_from_divorce_point: Duration,
}

pub fn check_search_radius(radius: f64) -> std::result::Result<f64, ValidationError> {
    if !(MIN_SEARCH_RADIUS..=MAX_SEARCH_RADIUS).contains(&radius) {
        return Err(ValidationError::RadiusOutOfBounds(radius));
    }
    Ok(radius)
}

/// Speed in km/h as displayed, rounded to one decimal.
pub fn display_speed(meters_per_second: f64) -> f64 {
    (meters_per_second * 36.0).round() / 10.0
}

/// `None` if the duration is not representable.
fn travel_time(distance: Distance, meters_per_second: f64) -> Option<Duration> {
    if meters_per_second <= 0.0 {
        return Some(Duration::ZERO);
    }
    Duration::checked_seconds_f64(distance.to_meters() / meters_per_second)
}

/// Keeps date and offset of `day`.
fn on_day_of(day: OffsetDateTime, time_of_day: Time) -> OffsetDateTime {
    day.replace_time(time_of_day)
}

/// Projects the query onto a single route. The result lacks the owner
/// profile which has to be loaded separately.
fn project_onto_route(
    route: &ExperiencedRoute,
    query: &MatchQuery,
    arrival: OffsetDateTime,
) -> Option<(Projection, Duration)> {
    let path = &route.route;
    let start_fraction = path.locate(query.start_point);
    let end_fraction = path.locate(query.end_point);
    if start_fraction >= end_fraction {
        log::debug!(
            "Skipping route {} in opposite direction ({start_fraction:.3} >= {end_fraction:.3})",
            route.id
        );
        return None;
    }
    if path.distance_to(query.start_point).to_meters() > query.radius
        || path.distance_to(query.end_point).to_meters() > query.radius
    {
        log::debug!("Skipping route {} out of the search radius", route.id);
        return None;
    }
    let sub_route = path.substring(start_fraction, end_fraction);
    let meeting_point = sub_route.first();
    let divorce_point = sub_route.last();
    let speed = route.average_speed();
    let divorce_time = on_day_of(arrival, route.time_at(end_fraction));
    let (Some(time_to_meeting_point), Some(time_from_divorce_point)) = (
        travel_time(MapPoint::distance(query.start_point, meeting_point), speed),
        travel_time(MapPoint::distance(divorce_point, query.end_point), speed),
    ) else {
        log::warn!("Skipping route {} with unrealistic speed {speed} m/s", route.id);
        return None;
    };
    let Some(destination_reached) = divorce_time.checked_add(time_from_divorce_point) else {
        log::warn!("Skipping route {} with unrealistic speed {speed} m/s", route.id);
        return None;
    };
    let projection = Projection {
        meeting_point,
        meeting_time: on_day_of(arrival, route.time_at(start_fraction)),
        divorce_point,
        divorce_time,
        length: sub_route.length(),
        route: sub_route,
        average_speed: display_speed(speed),
        time_to_meeting_point,
        time_from_divorce_point,
    };
    let rank = destination_reached - arrival;
    Some((projection, rank))
}

struct Projection {
    meeting_point: MapPoint,
    meeting_time: OffsetDateTime,
    divorce_point: MapPoint,
    divorce_time: OffsetDateTime,
    route: LineString,
    length: Distance,
    average_speed: f64,
    time_to_meeting_point: Duration,
    time_from_divorce_point: Duration,
}

/// Finds all experienced routes that the requester could join.
///
/// Matches are sorted by the time at which the requester would
/// reach the destination, earliest first. The weekday of the
/// `override_arrival` takes precedence over the one of the query.
pub fn match_routes<R>(
    repo: &R,
    requester: &str,
    query: &MatchQuery,
    override_arrival: Option<OffsetDateTime>,
) -> Result<Vec<ProjectedMatch>>
where
    R: ExperiencedRouteRepo + UserRepo,
{
    check_search_radius(query.radius)?;
    let arrival = override_arrival.unwrap_or(query.arrival);
    let candidates = repo.experienced_route_candidates(requester, arrival.weekday())?;
    log::debug!(
        "Matching against {} candidate routes on {}",
        candidates.len(),
        arrival.weekday()
    );
    let mut ranked = Vec::new();
    for route in candidates {
        debug_assert!(!route.deleted);
        debug_assert!(route.owner.as_str() != requester);
        let Some((projection, rank)) = project_onto_route(&route, query, arrival) else {
            continue;
        };
        let Some(owner) = repo.try_get_user(route.owner.as_str())? else {
            log::warn!("Skipping route {} of missing user {}", route.id, route.owner);
            continue;
        };
        let Projection {
            meeting_point,
            meeting_time,
            divorce_point,
            divorce_time,
            route: sub_route,
            length,
            average_speed,
            time_to_meeting_point,
            time_from_divorce_point,
        } = projection;
        let projected = ProjectedMatch {
            experienced_route: route.id,
            experienced_route_name: route.name,
            owner: PublicProfile::from(&owner),
            meeting_point,
            meeting_time,
            divorce_point,
            divorce_time,
            route: sub_route,
            length,
            average_speed,
            time_to_meeting_point,
            time_from_divorce_point,
        };
        ranked.push((rank, projected));
    }
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, projected)| projected).collect())
}

/// Matches a stored inexperienced route of the requester.
pub fn match_inexperienced_route<R>(
    repo: &R,
    requester: &str,
    route_id: &str,
    override_arrival: Option<OffsetDateTime>,
) -> Result<Vec<ProjectedMatch>>
where
    R: ExperiencedRouteRepo + InexperiencedRouteRepo + UserRepo,
{
    let route = super::get_inexperienced_route(repo, requester, route_id)?;
    match_routes(repo, requester, &MatchQuery::from(&route), override_arrival)
}
