//! GeoJSON input/output for polygon sets.

use ::geojson::{Feature, FeatureCollection, GeoJson, Geometry, PolygonType, Value};

use crate::error::{FormatError, SkipReason, Skipped};
use crate::geometry::{GeoPoint, PolygonSet, Ring};
use crate::ParseOutcome;

/// Serializes every ring as one `Feature` with a `Polygon` geometry,
/// positions in `[lon, lat]` order and empty `properties`.
pub fn write_geojson(polygons: &PolygonSet) -> String {
    let features = polygons
        .rings()
        .iter()
        .map(|ring| Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring
                .points()
                .iter()
                .map(|point| vec![point.lon, point.lat])
                .collect()]))),
            id: None,
            properties: Some(serde_json::Map::new()),
            foreign_members: None,
        })
        .collect();
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
    .to_string()
}

/// Reads polygons back from a GeoJSON string.
///
/// Accepts a FeatureCollection, a single Feature or a bare geometry; only
/// `Polygon` and `MultiPolygon` values contribute rings. Every ring goes
/// through the assembler again, so an unclosed ring is closed and a
/// degenerate one is recorded as skipped rather than failing the batch.
pub fn read_geojson(input: &str) -> Result<ParseOutcome, FormatError> {
    let parsed: GeoJson = input.parse()?;
    let mut polygons = PolygonSet::new();
    let mut skipped = Vec::new();
    collect_geojson(&parsed, &mut polygons, &mut skipped);
    if polygons.is_empty() {
        return Err(FormatError::NoPolygons);
    }
    Ok(ParseOutcome {
        polygons,
        notation: None,
        skipped,
    })
}

fn collect_geojson(geojson: &GeoJson, polygons: &mut PolygonSet, skipped: &mut Vec<Skipped>) {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                if let Some(geometry) = &feature.geometry {
                    collect_geometry(geometry, polygons, skipped);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_geometry(geometry, polygons, skipped);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry(geometry, polygons, skipped),
    }
}

fn collect_geometry(geometry: &Geometry, polygons: &mut PolygonSet, skipped: &mut Vec<Skipped>) {
    match &geometry.value {
        Value::Polygon(polygon) => collect_polygon(polygon, polygons, skipped),
        Value::MultiPolygon(multi) => {
            for polygon in multi {
                collect_polygon(polygon, polygons, skipped);
            }
        }
        Value::GeometryCollection(geometries) => {
            for inner in geometries {
                collect_geometry(inner, polygons, skipped);
            }
        }
        _ => {}
    }
}

fn collect_polygon(polygon: &PolygonType, polygons: &mut PolygonSet, skipped: &mut Vec<Skipped>) {
    for ring_coords in polygon {
        let mut points = Vec::with_capacity(ring_coords.len());
        let mut malformed = false;
        for position in ring_coords {
            if position.len() < 2 {
                malformed = true;
                break;
            }
            points.push(GeoPoint::new(position[0], position[1]));
        }
        if malformed {
            skipped.push(Skipped::new(
                "position with fewer than 2 values",
                SkipReason::MalformedToken,
            ));
            continue;
        }
        match Ring::close(points) {
            Ok(ring) => polygons.push(ring),
            Err(e) => skipped.push(Skipped::new(
                format!("ring of {} position(s)", ring_coords.len()),
                SkipReason::InvalidRing(e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PolygonSet {
        let ring = Ring::close(vec![
            GeoPoint::new(-80.7, 40.3),
            GeoPoint::new(-80.5, 40.3),
            GeoPoint::new(-80.5, 40.5),
            GeoPoint::new(-80.7, 40.5),
        ])
        .unwrap();
        PolygonSet::from(ring)
    }

    #[test]
    fn write_emits_feature_collection_with_closed_ring() {
        let encoded = write_geojson(&square());
        let value: serde_json::Value = encoded.parse().unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(value["features"][0]["properties"], serde_json::json!({}));
        let coords = &value["features"][0]["geometry"]["coordinates"][0];
        assert_eq!(coords.as_array().unwrap().len(), 5);
        assert_eq!(coords[0], coords[4]);
        assert_eq!(coords[0][0], -80.7);
        assert_eq!(coords[0][1], 40.3);
    }

    #[test]
    fn read_round_trips() {
        let polygons = square();
        let reread = read_geojson(&write_geojson(&polygons)).unwrap();
        assert_eq!(reread.polygons, polygons);
    }

    #[test]
    fn read_closes_unclosed_ring() {
        let input = r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0]]]}"#;
        let outcome = read_geojson(input).unwrap();
        let ring = &outcome.polygons.rings()[0];
        assert_eq!(ring.points().len(), 4);
        assert_eq!(ring.points().first(), ring.points().last());
    }

    #[test]
    fn read_multi_polygon_yields_one_ring_each() {
        let input = r#"{"type":"MultiPolygon","coordinates":[
            [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]],
            [[[2.0,2.0],[3.0,2.0],[3.0,3.0],[2.0,2.0]]]
        ]}"#;
        let outcome = read_geojson(input).unwrap();
        assert_eq!(outcome.polygons.rings().len(), 2);
    }

    #[test]
    fn read_skips_degenerate_ring_keeps_rest() {
        let input = r#"{"type":"MultiPolygon","coordinates":[
            [[[0.0,0.0],[0.0,0.0],[0.0,0.0]]],
            [[[2.0,2.0],[3.0,2.0],[3.0,3.0],[2.0,2.0]]]
        ]}"#;
        let outcome = read_geojson(input).unwrap();
        assert_eq!(outcome.polygons.rings().len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::InvalidRing(_)
        ));
    }

    #[test]
    fn read_without_polygons_fails() {
        let input = r#"{"type":"Point","coordinates":[0.0,0.0]}"#;
        assert!(matches!(
            read_geojson(input),
            Err(FormatError::NoPolygons)
        ));
    }

    #[test]
    fn read_rejects_invalid_json() {
        assert!(matches!(
            read_geojson("{not geojson"),
            Err(FormatError::GeoJson(_))
        ));
    }
}
