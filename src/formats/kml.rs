//! KML input/output for polygon sets.
//!
//! The writer emits one Placemark per ring. The reader walks the parsed
//! document tree and assembles a ring from every `<coordinates>` element,
//! wherever it sits; comments and CDATA are handled by the XML parser.

use std::fmt::Write as _;

use roxmltree::Document;

use crate::error::{FormatError, SkipReason, Skipped};
use crate::geometry::{GeoPoint, PolygonSet, Ring};
use crate::ParseOutcome;

const KML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n";
const KML_FOOTER: &str = "</Document>\n</kml>\n";

/// Serializes every ring as one `<Placemark>` with a polygon outer boundary,
/// coordinates as comma-joined `lon,lat` tuples.
pub fn write_kml(polygons: &PolygonSet) -> String {
    let mut out = String::from(KML_HEADER);
    for ring in polygons.rings() {
        out.push_str(
            "<Placemark>\n<Polygon>\n<outerBoundaryIs>\n<LinearRing>\n<coordinates>\n",
        );
        for point in ring.points() {
            let _ = writeln!(out, "{},{}", point.lon, point.lat);
        }
        out.push_str(
            "</coordinates>\n</LinearRing>\n</outerBoundaryIs>\n</Polygon>\n</Placemark>\n",
        );
    }
    out.push_str(KML_FOOTER);
    out
}

/// Assembles a ring from every `<coordinates>` element in the document.
///
/// Tuples that do not parse as `lon,lat[,alt]` are recorded as skipped;
/// an element that cannot form a ring is skipped too. Only an input with no
/// usable element at all is an error.
pub fn read_kml(input: &str) -> Result<ParseOutcome, FormatError> {
    let document = Document::parse(input)?;
    let mut polygons = PolygonSet::new();
    let mut skipped = Vec::new();
    let mut found_element = false;
    for node in document.descendants() {
        if !node.is_element() || node.tag_name().name() != "coordinates" {
            continue;
        }
        found_element = true;
        let body = node.text().unwrap_or("");
        let points = parse_coordinate_tuples(body, &mut skipped);
        match Ring::close(points) {
            Ok(ring) => polygons.push(ring),
            Err(e) => skipped.push(Skipped::new(
                "<coordinates> element",
                SkipReason::InvalidRing(e),
            )),
        }
    }
    if !found_element {
        return Err(FormatError::MissingKmlCoordinates);
    }
    if polygons.is_empty() {
        return Err(FormatError::NoPolygons);
    }
    Ok(ParseOutcome {
        polygons,
        notation: None,
        skipped,
    })
}

fn parse_coordinate_tuples(body: &str, skipped: &mut Vec<Skipped>) -> Vec<GeoPoint> {
    let mut points = Vec::new();
    for tuple in body.split_whitespace() {
        let mut parts = tuple.split(',');
        let lon = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
        let lat = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
        match (lon, lat) {
            (Some(lon), Some(lat)) => points.push(GeoPoint::new(lon, lat)),
            _ => skipped.push(Skipped::new(tuple, SkipReason::MalformedToken)),
        }
    }
    points
}
