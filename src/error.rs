//! Error taxonomy for the coordinate pipeline.
//!
//! The parser never aborts a whole listing because of one bad pair: range
//! violations and malformed tokens are accumulated as [`Skipped`] records and
//! returned alongside the surviving points. Only a totally empty result is a
//! terminal [`ParseError`].

use thiserror::Error;

/// Terminal failures: no ring at all could be produced from the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// None of the notation classifiers produced a usable (lat, lon) pair.
    #[error("no coordinate notation matched the input")]
    NoNotationMatched,
    /// Fewer than 3 distinct points survived conversion.
    #[error("only {distinct} distinct point(s); a polygon ring needs at least 3")]
    InsufficientPoints { distinct: usize },
}

/// Range failures raised by the unit converters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvertError {
    #[error("minutes component {0} must be below 60")]
    MinutesOutOfRange(f64),
    #[error("seconds component {0} must be below 60")]
    SecondsOutOfRange(f64),
    /// The sign of a DMS/DDM value comes from the hemisphere letter; a
    /// negative degree literal would double-negate.
    #[error("degrees component {0} must not be negative; the sign comes from the hemisphere letter")]
    NegativeDegrees(f64),
}

/// Why a fragment of the input was discarded without failing the parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    /// A substring looked numeric but did not parse as a number.
    #[error("malformed numeric token")]
    MalformedToken,
    /// A minute or second component out of range, or a negative degree
    /// literal where the sign belongs to the hemisphere letter.
    #[error("{0}")]
    RangeViolation(#[from] ConvertError),
    /// The converted pair landed outside valid latitude/longitude bounds.
    #[error("latitude {lat} or longitude {lon} outside valid bounds")]
    OutOfBounds { lat: f64, lon: f64 },
    /// A trailing value with no partner to form a (lat, lon) pair.
    #[error("value has no partner to form a (lat, lon) pair")]
    UnpairedValue,
    /// A ring from a pre-parsed geometry failed assembly.
    #[error("ring discarded: {0}")]
    InvalidRing(#[from] ParseError),
}

/// One non-fatal discard: the offending fragment and why it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub fragment: String,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(fragment: impl Into<String>, reason: impl Into<SkipReason>) -> Self {
        Skipped {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}

/// Failures specific to the file-format adapters.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("invalid KML: {0}")]
    Kml(#[from] roxmltree::Error),
    #[error("no <coordinates> element found in KML input")]
    MissingKmlCoordinates,
    #[error("no usable polygon rings in the input")]
    NoPolygons,
}
