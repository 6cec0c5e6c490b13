//! Integer polygon points and the PAGE `points` attribute parser.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Page2OsdError;

/// A single polygon vertex in image pixel space.
///
/// Coordinates are signed: PAGE exports occasionally contain slightly
/// negative or out-of-bounds values, and those are passed through unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// An ordered polygon boundary (implicitly closed).
pub type Polygon = Vec<Point>;

impl Point {
    /// Creates a new point.
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Serialized as a bare `[x, y]` pair, which is what the viewer overlay expects.
impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y] = <[i64; 2]>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

/// Parse a whitespace-separated list of `x,y` tokens.
///
/// Order is preserved. Fails on the first token that is not a comma-separated
/// pair of integers. No range checks are applied.
pub fn parse_points(raw: &str) -> Result<Polygon, Page2OsdError> {
    raw.split_whitespace().map(parse_point_token).collect()
}

fn parse_point_token(token: &str) -> Result<Point, Page2OsdError> {
    let (raw_x, raw_y) = token
        .split_once(',')
        .ok_or_else(|| Page2OsdError::PointsParse {
            token: token.to_string(),
            message: "expected 'x,y'".to_string(),
        })?;

    let x = parse_coordinate(raw_x, token)?;
    let y = parse_coordinate(raw_y, token)?;
    Ok(Point::new(x, y))
}

fn parse_coordinate(raw: &str, token: &str) -> Result<i64, Page2OsdError> {
    raw.parse::<i64>().map_err(|source| Page2OsdError::PointsParse {
        token: token.to_string(),
        message: format!("'{raw}' is not an integer ({source})"),
    })
}
