//! Geometric types: decimal-degree points, closed rings and polygon sets.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A position in decimal degrees.
///
/// Stored and serialized in `(lon, lat)` order to match the geometry
/// interchange convention; flip to `(lat, lon)` only at rendering boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        GeoPoint { lon, lat }
    }

    /// True when the point lies within valid latitude/longitude bounds.
    pub fn in_bounds(&self) -> bool {
        self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }
}

/// A closed polygon boundary.
///
/// Invariants: at least 4 points, first equals last, at least 3 distinct.
/// Immutable once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring(Vec<GeoPoint>);

impl Ring {
    /// Assembles a ring from a point sequence, appending the first point when
    /// the sequence is not already closed.
    ///
    /// Interior duplicates are kept and self-intersection is not checked;
    /// callers needing topological rigor must validate downstream.
    pub fn close(points: Vec<GeoPoint>) -> Result<Ring, ParseError> {
        let mut distinct: Vec<GeoPoint> = Vec::new();
        for point in &points {
            if !distinct.contains(point) {
                distinct.push(*point);
            }
        }
        if distinct.len() < 3 {
            return Err(ParseError::InsufficientPoints {
                distinct: distinct.len(),
            });
        }
        let mut points = points;
        if points.first() != points.last() {
            let first = points[0];
            points.push(first);
        }
        Ok(Ring(points))
    }

    /// The closed point sequence, first point repeated at the end.
    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }
}

/// An ordered collection of independently valid rings.
///
/// No invariant couples the rings to each other; multi-polygon file inputs
/// simply contribute one ring each.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonSet {
    rings: Vec<Ring>,
}

impl PolygonSet {
    pub fn new() -> Self {
        PolygonSet::default()
    }

    pub fn push(&mut self, ring: Ring) {
        self.rings.push(ring);
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

impl From<Ring> for PolygonSet {
    fn from(ring: Ring) -> Self {
        PolygonSet { rings: vec![ring] }
    }
}
