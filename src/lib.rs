//! # latlon-polygon
//!
//! Parses free-form textual geographic coordinate listings into closed
//! polygon rings, and reads/writes those rings as GeoJSON or KML.
//!
//! The core problem is ambiguous-format parsing: the same digit stream can be
//! decimal degrees, degrees with two implied decimal digits, or packed
//! degrees-minutes, with no format declaration from the caller. A
//! fixed-priority list of notation classifiers settles the ambiguity (see
//! [`Notation`]); the first one that produces a usable (lat, lon) pair wins.
//!
//! Each parse is a pure function of its input text: no state survives a call
//! and concurrent callers need no locking.
//!
//! ```
//! use latlon_polygon::parse_text;
//!
//! let outcome = parse_text("4019 8042 4035 8035 4035 8027 4043 8013").unwrap();
//! let ring = &outcome.polygons.rings()[0];
//! assert_eq!(ring.points().first(), ring.points().last());
//! ```

pub mod convert;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod notation;
pub mod tokenize;

pub use error::{ConvertError, FormatError, ParseError, SkipReason, Skipped};
pub use geometry::{GeoPoint, PolygonSet, Ring};
pub use notation::Notation;

use notation::ClassifierInput;

/// Result of one parse: the assembled polygons, which notation matched (text
/// input only; `None` for pre-parsed geometry), and every fragment discarded
/// along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub polygons: PolygonSet,
    pub notation: Option<Notation>,
    pub skipped: Vec<Skipped>,
}

/// Parses a free-form coordinate listing into a single closed ring.
///
/// Bad pairs are skipped and recorded, never fatal on their own; only an
/// input from which no ring at all can be assembled returns an error.
pub fn parse_text(text: &str) -> Result<ParseOutcome, ParseError> {
    let normalized = tokenize::normalize(text);
    let (tokens, mut skipped) = tokenize::tokenize(&normalized);
    let classification = notation::classify(&ClassifierInput {
        normalized: &normalized,
        tokens: &tokens,
    })
    .ok_or(ParseError::NoNotationMatched)?;
    skipped.extend(classification.skipped);
    let ring = Ring::close(classification.points)?;
    Ok(ParseOutcome {
        polygons: PolygonSet::from(ring),
        notation: Some(classification.notation),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::geojson::{read_geojson, write_geojson};
    use approx::assert_abs_diff_eq;

    #[test]
    fn dm_listing_end_to_end() {
        let outcome = parse_text("4019 8042 4035 8035 4035 8027 4043 8013").unwrap();
        assert_eq!(outcome.notation, Some(Notation::DegreeMinuteInt));
        assert!(outcome.skipped.is_empty());

        let ring = &outcome.polygons.rings()[0];
        let expected = [
            (-80.7, 40.0 + 19.0 / 60.0),
            (-(80.0 + 35.0 / 60.0), 40.0 + 35.0 / 60.0),
            (-(80.0 + 27.0 / 60.0), 40.0 + 35.0 / 60.0),
            (-(80.0 + 13.0 / 60.0), 40.0 + 43.0 / 60.0),
            (-80.7, 40.0 + 19.0 / 60.0),
        ];
        assert_eq!(ring.points().len(), expected.len());
        for (point, (lon, lat)) in ring.points().iter().zip(expected) {
            assert_abs_diff_eq!(point.lon, lon, epsilon = 1e-9);
            assert_abs_diff_eq!(point.lat, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn multi_row_listing_with_labels() {
        let text = "LAT LON\n4019, 8042; 4035, 8035\n4035, 8027; 4043, 8013\n";
        let outcome = parse_text(text).unwrap();
        assert_eq!(outcome.notation, Some(Notation::DegreeMinuteInt));
        assert_eq!(outcome.polygons.rings()[0].points().len(), 5);
    }

    #[test]
    fn dms_listing_selects_dms() {
        let text = "40°19'00\"N 80°42'00\"W 40°35'00\"N 80°35'00\"W 40°43'00\"N 80°13'00\"W";
        let outcome = parse_text(text).unwrap();
        assert_eq!(outcome.notation, Some(Notation::Dms));
        let ring = &outcome.polygons.rings()[0];
        assert_abs_diff_eq!(ring.points()[0].lon, -80.7, epsilon = 1e-9);
        assert_abs_diff_eq!(ring.points()[0].lat, 40.0 + 19.0 / 60.0, epsilon = 1e-9);
    }

    #[test]
    fn unlabeled_longitudes_are_west() {
        let outcome = parse_text("40.5 80.2 40.6 80.1 40.7 80.3").unwrap();
        for point in outcome.polygons.rings()[0].points() {
            assert!(point.lon <= 0.0);
        }
    }

    #[test]
    fn prose_is_no_notation() {
        assert_eq!(
            parse_text("just some words").unwrap_err(),
            ParseError::NoNotationMatched
        );
    }

    #[test]
    fn two_points_are_insufficient() {
        assert_eq!(
            parse_text("4019 8042 4035 8035").unwrap_err(),
            ParseError::InsufficientPoints { distinct: 2 }
        );
    }

    #[test]
    fn bad_pair_is_skipped_not_fatal() {
        let outcome = parse_text("4019 8042 4075 8035 4035 8027 4043 8013").unwrap();
        assert_eq!(outcome.polygons.rings()[0].points().len(), 4);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::RangeViolation(_)
        ));
    }

    #[test]
    fn geojson_round_trip_is_idempotent() {
        let outcome = parse_text("4019 8042 4035 8035 4035 8027 4043 8013").unwrap();
        let encoded = write_geojson(&outcome.polygons);
        let reread = read_geojson(&encoded).unwrap();
        assert_eq!(reread.polygons, outcome.polygons);
        assert_eq!(reread.notation, None);
        assert!(reread.skipped.is_empty());
    }
}
