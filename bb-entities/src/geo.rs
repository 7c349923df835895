//! Geographical points, line strings and the geometric primitives
//! used for matching routes.
//!
//! Coordinates are exchanged as `[lat, lng]` pairs in degrees. The textual
//! representation for storage is WKT with the usual `lng lat` axis order,
//! e.g. `POINT(-0.12 51.5)` or `LINESTRING(-0.12 51.5,-0.11 51.51)`.

use std::{fmt, iter::Sum, ops::Add, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Coordinates must have exactly 2 dimensions, got {0}")]
    Dimension(usize),
    #[error("A line string needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("Coordinates out of range: lat = {lat}, lng = {lng}")]
    OutOfRange { lat: f64, lng: f64 },
    #[error("Malformed WKT: {0}")]
    Wkt(String),
}

/// A geographical location given in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    const LAT_DEG_MAX: f64 = 90.0;
    const LNG_DEG_MAX: f64 = 180.0;

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pos = Self { lat, lng };
        pos.is_valid().then_some(pos)
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        let pos = Self {
            lat: lat.into(),
            lng: lng.into(),
        };
        debug_assert!(pos.is_valid());
        pos
    }

    /// Expects a `[lat, lng]` pair.
    pub fn try_from_coords(coords: &[f64]) -> Result<Self, GeoError> {
        let [lat, lng] = coords else {
            return Err(GeoError::Dimension(coords.len()));
        };
        Self::try_from_lat_lng_deg(*lat, *lng).ok_or(GeoError::OutOfRange {
            lat: *lat,
            lng: *lng,
        })
    }

    pub const fn to_coords(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= Self::LAT_DEG_MAX
            && self.lng.abs() <= Self::LNG_DEG_MAX
    }

    fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    /// Linear interpolation in degrees, only meaningful for short distances.
    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }

    pub fn to_wkt(self) -> String {
        format!("POINT({} {})", self.lng, self.lat)
    }

    pub fn from_wkt(wkt: &str) -> Result<Self, GeoError> {
        let body = strip_wkt_tag(wkt, "POINT")?;
        parse_wkt_position(body)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using a special case of the Vincenty
    /// formula for numerical accuracy.
    /// Reference: https://en.wikipedia.org/wiki/Great-circle_distance
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Distance {
        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = lat1_rad.sin_cos();
        let (lat2_sin, lat2_cos) = lat2_rad.sin_cos();

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = dlng.sin_cos();

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom))
    }
}

/// Projection of a point onto a single segment.
#[derive(Clone, Copy, Debug)]
struct SegmentProjection {
    /// Relative position on the segment in `[0, 1]`
    t: f64,
    distance: Distance,
}

fn project_onto_segment(pos: MapPoint, a: MapPoint, b: MapPoint) -> SegmentProjection {
    // Equirectangular frame around the projected point
    let scale = pos.lat.to_radians().cos();
    let (ax, ay) = (a.lng * scale, a.lat);
    let (bx, by) = (b.lng * scale, b.lat);
    let (px, py) = (pos.lng * scale, pos.lat);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a.lerp(b, t);
    SegmentProjection {
        t,
        distance: MapPoint::distance(pos, closest),
    }
}

/// An ordered path of at least 2 points.
#[derive(Clone, Debug, PartialEq)]
pub struct LineString(Vec<MapPoint>);

impl LineString {
    pub fn try_new(points: Vec<MapPoint>) -> Result<Self, GeoError> {
        if points.len() < 2 {
            return Err(GeoError::TooFewPoints(points.len()));
        }
        Ok(Self(points))
    }

    /// Expects a sequence of `[lat, lng]` pairs.
    pub fn try_from_coords<C: AsRef<[f64]>>(coords: &[C]) -> Result<Self, GeoError> {
        let points = coords
            .iter()
            .map(|c| MapPoint::try_from_coords(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(points)
    }

    pub fn to_coords(&self) -> Vec<[f64; 2]> {
        self.0.iter().copied().map(MapPoint::to_coords).collect()
    }

    pub fn points(&self) -> &[MapPoint] {
        &self.0
    }

    pub fn first(&self) -> MapPoint {
        self.0[0]
    }

    pub fn last(&self) -> MapPoint {
        self.0[self.0.len() - 1]
    }

    fn segment_lengths(&self) -> impl Iterator<Item = Distance> + '_ {
        self.0
            .iter()
            .tuple_windows()
            .map(|(a, b)| MapPoint::distance(*a, *b))
    }

    /// Physical length along the path.
    pub fn length(&self) -> Distance {
        self.segment_lengths().sum()
    }

    /// Shortest distance between the point and any position on the path.
    pub fn distance_to(&self, pos: MapPoint) -> Distance {
        self.0
            .iter()
            .tuple_windows()
            .map(|(a, b)| project_onto_segment(pos, *a, *b).distance)
            .fold(Distance::from_meters(f64::INFINITY), |min, d| {
                if d < min {
                    d
                } else {
                    min
                }
            })
    }

    /// Fractional position in `[0, 1]` of the path location that is
    /// nearest to the given point, measured by length along the path.
    pub fn locate(&self, pos: MapPoint) -> f64 {
        let total = self.length().to_meters();
        if total <= 0.0 {
            return 0.0;
        }
        let mut offset = 0.0;
        let mut best: Option<(Distance, f64)> = None;
        for ((a, b), seg_len) in self
            .0
            .iter()
            .tuple_windows()
            .zip(self.segment_lengths())
        {
            let proj = project_onto_segment(pos, *a, *b);
            let at = offset + proj.t * seg_len.to_meters();
            if best.map_or(true, |(d, _)| proj.distance < d) {
                best = Some((proj.distance, at));
            }
            offset += seg_len.to_meters();
        }
        best.map_or(0.0, |(_, at)| (at / total).clamp(0.0, 1.0))
    }

    /// The point at the given fractional position along the path.
    pub fn interpolate(&self, fraction: f64) -> MapPoint {
        let fraction = fraction.clamp(0.0, 1.0);
        let target = fraction * self.length().to_meters();
        let mut offset = 0.0;
        for ((a, b), seg_len) in self
            .0
            .iter()
            .tuple_windows()
            .zip(self.segment_lengths())
        {
            let seg_len = seg_len.to_meters();
            if seg_len > 0.0 && offset + seg_len >= target {
                return a.lerp(*b, ((target - offset) / seg_len).clamp(0.0, 1.0));
            }
            offset += seg_len;
        }
        self.last()
    }

    /// The part of the path between two fractional positions, including
    /// the interpolated end points and all vertices strictly in between.
    pub fn substring(&self, from: f64, to: f64) -> LineString {
        const EPSILON: f64 = 1e-12;
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let total = self.length().to_meters();
        let mut points = vec![self.interpolate(from)];
        if total > 0.0 {
            let mut offset = 0.0;
            for (vertex, seg_len) in self.0.iter().skip(1).zip(self.segment_lengths()) {
                offset += seg_len.to_meters();
                let at = offset / total;
                if at > from + EPSILON && at < to - EPSILON {
                    points.push(*vertex);
                }
            }
        }
        points.push(self.interpolate(to));
        Self(points)
    }

    pub fn to_wkt(&self) -> String {
        let positions = self
            .0
            .iter()
            .map(|p| format!("{} {}", p.lng, p.lat))
            .join(",");
        format!("LINESTRING({positions})")
    }

    pub fn from_wkt(wkt: &str) -> Result<Self, GeoError> {
        let body = strip_wkt_tag(wkt, "LINESTRING")?;
        let points = body
            .split(',')
            .map(parse_wkt_position)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(points)
    }
}

impl FromStr for LineString {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wkt(s)
    }
}

fn strip_wkt_tag<'a>(wkt: &'a str, tag: &str) -> Result<&'a str, GeoError> {
    let trimmed = wkt.trim();
    let malformed = || GeoError::Wkt(wkt.to_owned());
    let head = trimmed.get(..tag.len()).ok_or_else(malformed)?;
    if !head.eq_ignore_ascii_case(tag) {
        return Err(malformed());
    }
    trimmed[tag.len()..]
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)
}

fn parse_wkt_position(s: &str) -> Result<MapPoint, GeoError> {
    let values = s
        .split_whitespace()
        .map(|v| v.parse::<f64>().map_err(|_| GeoError::Wkt(s.to_owned())))
        .collect::<Result<Vec<_>, _>>()?;
    let [lng, lat] = values[..] else {
        return Err(GeoError::Dimension(values.len()));
    };
    MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(GeoError::OutOfRange { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line() -> LineString {
        LineString::try_from_coords(&[
            [0.0, 0.0],
            [0.0, 1.0],
            [0.0, 2.0],
            [0.0, 3.0],
            [0.0, 4.0],
            [0.0, 5.0],
            [0.0, 6.0],
        ])
        .unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn real_distance() {
        let stuttgart = MapPoint::from_lat_lng_deg(48.7755, 9.1827);
        let mannheim = MapPoint::from_lat_lng_deg(49.4836, 8.4630);
        let d = MapPoint::distance(stuttgart, mannheim);
        assert!(d.to_meters() > 93_000.0);
        assert!(d.to_meters() < 97_000.0);
        assert_eq!(
            MapPoint::distance(stuttgart, stuttgart),
            Distance::from_meters(0.0)
        );
    }

    #[test]
    fn reject_wrong_dimensions() {
        assert_eq!(
            MapPoint::try_from_coords(&[1.0]),
            Err(GeoError::Dimension(1))
        );
        assert_eq!(
            MapPoint::try_from_coords(&[1.0, 2.0, 3.0]),
            Err(GeoError::Dimension(3))
        );
        assert!(MapPoint::try_from_coords(&[91.0, 0.0]).is_err());
        assert_eq!(
            LineString::try_from_coords(&[[0.0, 0.0]]),
            Err(GeoError::TooFewPoints(1))
        );
    }

    #[test]
    fn locate_points_on_a_line() {
        let line = straight_line();
        assert_close(line.locate(MapPoint::from_lat_lng_deg(0.0, 0.0)), 0.0);
        assert_close(line.locate(MapPoint::from_lat_lng_deg(0.0, 3.0)), 0.5);
        assert_close(line.locate(MapPoint::from_lat_lng_deg(0.0, 1.4)), 1.4 / 6.0);
        // Off the line, but still projected perpendicular onto it
        assert_close(line.locate(MapPoint::from_lat_lng_deg(0.001, 4.6)), 4.6 / 6.0);
        // Beyond the end
        assert_close(line.locate(MapPoint::from_lat_lng_deg(0.0, 7.0)), 1.0);
    }

    #[test]
    fn distance_to_line_is_not_distance_to_nearest_vertex() {
        let line = straight_line();
        let pos = MapPoint::from_lat_lng_deg(0.0, 2.5);
        assert!(line.distance_to(pos).to_meters() < 1e-6);
        let off = MapPoint::from_lat_lng_deg(0.001, 2.5);
        let d = line.distance_to(off).to_meters();
        assert!(d > 110.0 && d < 112.0, "{d}");
    }

    #[test]
    fn extract_sub_route() {
        let line = straight_line();
        let sub = line.substring(1.4 / 6.0, 4.6 / 6.0);
        let coords = sub.to_coords();
        assert_eq!(coords.len(), 5);
        let expected = [[0.0, 1.4], [0.0, 2.0], [0.0, 3.0], [0.0, 4.0], [0.0, 4.6]];
        for (actual, expected) in coords.iter().zip(expected.iter()) {
            assert_close(actual[0], expected[0]);
            assert_close(actual[1], expected[1]);
        }
        let expected_len = LineString::try_from_coords(&expected).unwrap().length();
        assert_close(sub.length().to_meters(), expected_len.to_meters());
    }

    #[test]
    fn sub_route_starting_on_a_vertex_has_no_duplicate() {
        let line = straight_line();
        let sub = line.substring(2.0 / 6.0, 3.0 / 6.0);
        assert_eq!(sub.points().len(), 2);
    }

    #[test]
    fn wkt_conversion() {
        let line = LineString::try_from_coords(&[[51.5, -0.12], [51.51, -0.11]]).unwrap();
        let wkt = line.to_wkt();
        assert_eq!(wkt, "LINESTRING(-0.12 51.5,-0.11 51.51)");
        assert_eq!(LineString::from_wkt(&wkt).unwrap(), line);
        let pos = MapPoint::from_lat_lng_deg(51.5, -0.12);
        assert_eq!(pos.to_wkt(), "POINT(-0.12 51.5)");
        assert_eq!(MapPoint::from_wkt(" point ( -0.12 51.5 ) ").unwrap(), pos);
        assert!(MapPoint::from_wkt("POINT(1 2 3)").is_err());
        assert!(LineString::from_wkt("POINT(1 2)").is_err());
        assert!(LineString::from_wkt("LINESTRING(1 2)").is_err());
    }
}
