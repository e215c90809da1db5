//! Notation classifiers: an ordered strategy list that decides which
//! convention a coordinate listing uses.
//!
//! The same digit stream can be read several ways (`4019 8042` could be
//! decimal degrees, degrees with two implied decimal digits, or packed
//! degrees-minutes), so the classifiers run in a strict priority order:
//! notations that carry disambiguating syntax (degree marks, hemisphere
//! letters) first, bare-integer heuristics last. The first classifier that
//! produces a usable pair wins and its output entirely replaces anything a
//! lower-priority classifier might have said about the same input.
//!
//! Adding a notation means adding one capture parser and one entry to
//! [`CLASSIFIERS`], not forking the pipeline.

use nom::character::complete::{char as nom_char, multispace0};
use nom::combinator::{map, opt};
use nom::error::{Error as NomError, ErrorKind};
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

use crate::convert::{ddm_to_decimal_degrees, dm_to_decimal_degrees, dms_to_decimal_degrees};
use crate::error::{ConvertError, SkipReason, Skipped};
use crate::geometry::GeoPoint;
use crate::tokenize::{Hemisphere, Token};

/// Which classifier produced the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Degrees-minutes-seconds with hemisphere letters: `40°19'30"N`.
    Dms,
    /// Degrees-decimal-minutes with hemisphere letters: `40° 19.5' N`.
    Ddm,
    /// Consecutive signed decimal-degree values.
    DecimalDegreePair,
    /// Packed degrees-minutes integers: `4019` is 40°19'.
    DegreeMinuteInt,
    /// Last resort: integers read as hundredths of a degree.
    ScaledInt,
}

/// Output of the winning classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub notation: Notation,
    pub points: Vec<GeoPoint>,
    pub skipped: Vec<Skipped>,
}

/// The classifiers' shared view of one input: the normalized full text for
/// the mark-carrying notations, the flat token list for the numeric ones.
pub struct ClassifierInput<'a> {
    pub normalized: &'a str,
    pub tokens: &'a [Token],
}

type Candidate = (Vec<GeoPoint>, Vec<Skipped>);

struct Classifier {
    notation: Notation,
    run: fn(&ClassifierInput) -> Option<Candidate>,
}

/// Strict priority order; first confident match wins.
static CLASSIFIERS: &[Classifier] = &[
    Classifier {
        notation: Notation::Dms,
        run: classify_dms,
    },
    Classifier {
        notation: Notation::Ddm,
        run: classify_ddm,
    },
    Classifier {
        notation: Notation::DecimalDegreePair,
        run: classify_decimal,
    },
    Classifier {
        notation: Notation::DegreeMinuteInt,
        run: classify_dm,
    },
    Classifier {
        notation: Notation::ScaledInt,
        run: classify_scaled,
    },
];

/// Runs the classifiers in priority order and returns the first match.
pub fn classify(input: &ClassifierInput) -> Option<Classification> {
    for classifier in CLASSIFIERS {
        if let Some((points, skipped)) = (classifier.run)(input) {
            log::debug!(
                "{:?} classifier matched: {} point(s), {} skipped",
                classifier.notation,
                points.len(),
                skipped.len()
            );
            return Some(Classification {
                notation: classifier.notation,
                points,
                skipped,
            });
        }
    }
    None
}

// --- Capture parsers for the mark-carrying notations ---

type Res<'a, O> = IResult<&'a str, O, NomError<&'a str>>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DmsCapture {
    deg: f64,
    min: f64,
    sec: f64,
    dir: Hemisphere,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DdmCapture {
    deg: f64,
    min: f64,
    dir: Hemisphere,
}

/// A single hemisphere letter not embedded in a longer word.
fn hemisphere_letter(input: &str) -> Res<'_, Hemisphere> {
    let mut chars = input.chars();
    match chars.next().and_then(Hemisphere::from_char) {
        Some(h) if !matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) => {
            Ok((&input[1..], h))
        }
        _ => Err(nom::Err::Error(NomError::new(input, ErrorKind::OneOf))),
    }
}

/// `<deg>° <min>' <sec>["]? <dir>` with optional whitespace between parts.
fn dms_capture(input: &str) -> Res<'_, DmsCapture> {
    map(
        tuple((
            double,
            preceded(multispace0, nom_char('°')),
            preceded(multispace0, double),
            preceded(multispace0, nom_char('\'')),
            preceded(multispace0, double),
            opt(preceded(multispace0, nom_char('"'))),
            preceded(multispace0, hemisphere_letter),
        )),
        |(deg, _, min, _, sec, _, dir)| DmsCapture { deg, min, sec, dir },
    )(input)
}

/// `<deg>° <min>['] <dir>` with optional whitespace between parts.
fn ddm_capture(input: &str) -> Res<'_, DdmCapture> {
    map(
        tuple((
            double,
            preceded(multispace0, nom_char('°')),
            preceded(multispace0, double),
            opt(preceded(multispace0, nom_char('\''))),
            preceded(multispace0, hemisphere_letter),
        )),
        |(deg, _, min, _, dir)| DdmCapture { deg, min, dir },
    )(input)
}

/// Runs `parser` at every position of `text`, collecting all matches.
fn scan_all<'a, O>(mut parser: impl FnMut(&'a str) -> Res<'a, O>, text: &'a str) -> Vec<O> {
    let mut matches = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match parser(rest) {
            Ok((next, found)) => {
                matches.push(found);
                rest = next;
            }
            Err(_) => {
                let step = rest.chars().next().map_or(1, char::len_utf8);
                rest = &rest[step..];
            }
        }
    }
    matches
}

/// Pairs captures of a letter-carrying notation in reading order, letting the
/// letters decide which member is the latitude. Pairs that fail conversion
/// are recorded as skips carrying both members' text, so the valid partner of
/// a bad capture is visible in the record; the classifier still counts as
/// matched because the notation syntax was unambiguously present.
fn pair_captures<C: Copy>(
    captures: &[C],
    dir_of: impl Fn(&C) -> Hemisphere,
    describe: impl Fn(&C) -> String,
    convert: impl Fn(&C) -> Result<f64, ConvertError>,
) -> Candidate {
    let mut points = Vec::new();
    let mut skipped = Vec::new();
    for pair in captures.chunks(2) {
        let (first, second) = (pair[0], pair[1]);
        let fragment = || format!("{} {}", describe(&first), describe(&second));
        let (lat_capture, lon_capture) =
            if !dir_of(&first).is_latitudinal() && dir_of(&second).is_latitudinal() {
                (second, first)
            } else {
                (first, second)
            };
        let lat = match convert(&lat_capture) {
            Ok(v) => v,
            Err(e) => {
                record_skip(&mut skipped, Skipped::new(fragment(), e));
                continue;
            }
        };
        let lon = match convert(&lon_capture) {
            Ok(v) => v,
            Err(e) => {
                record_skip(&mut skipped, Skipped::new(fragment(), e));
                continue;
            }
        };
        push_point(&mut points, &mut skipped, lat, lon);
    }
    (points, skipped)
}

fn record_skip(skipped: &mut Vec<Skipped>, skip: Skipped) {
    log::debug!("skipping `{}`: {}", skip.fragment, skip.reason);
    skipped.push(skip);
}

fn push_point(points: &mut Vec<GeoPoint>, skipped: &mut Vec<Skipped>, lat: f64, lon: f64) {
    let point = GeoPoint::new(lon, lat);
    if point.in_bounds() {
        points.push(point);
    } else {
        record_skip(
            skipped,
            Skipped::new(format!("{lat} {lon}"), SkipReason::OutOfBounds { lat, lon }),
        );
    }
}

fn classify_dms(input: &ClassifierInput) -> Option<Candidate> {
    let captures = scan_all(dms_capture, input.normalized);
    if captures.len() < 2 || captures.len() % 2 != 0 {
        return None;
    }
    Some(pair_captures(
        &captures,
        |c| c.dir,
        |c| format!("{}°{}'{}\"", c.deg, c.min, c.sec),
        |c| dms_to_decimal_degrees(c.deg, c.min, c.sec, c.dir),
    ))
}

fn classify_ddm(input: &ClassifierInput) -> Option<Candidate> {
    let captures = scan_all(ddm_capture, input.normalized);
    if captures.len() < 2 || captures.len() % 2 != 0 {
        return None;
    }
    Some(pair_captures(
        &captures,
        |c| c.dir,
        |c| format!("{}°{}'", c.deg, c.min),
        |c| ddm_to_decimal_degrees(c.deg, c.min, c.dir),
    ))
}

// --- Numeric classifiers over the token list ---

/// A numeric token with the hemisphere letter that immediately followed it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueItem {
    value: f64,
    bare_int: bool,
    letter: Option<Hemisphere>,
}

fn value_items(tokens: &[Token]) -> Vec<ValueItem> {
    let mut items: Vec<ValueItem> = Vec::new();
    for token in tokens {
        match *token {
            Token::Number { value, bare_int } => items.push(ValueItem {
                value,
                bare_int,
                letter: None,
            }),
            Token::Hemisphere(h) => {
                if let Some(last) = items.last_mut() {
                    if last.letter.is_none() {
                        last.letter = Some(h);
                    }
                }
            }
        }
    }
    items
}

/// Letters decide which member of a pair is the latitude; without letters the
/// listing reads latitude first.
fn orient_pair(first: ValueItem, second: ValueItem) -> (ValueItem, ValueItem) {
    let first_is_lat = match (first.letter, second.letter) {
        (Some(a), _) if !a.is_latitudinal() => false,
        (_, Some(b)) if b.is_latitudinal() => false,
        _ => true,
    };
    if first_is_lat {
        (first, second)
    } else {
        (second, first)
    }
}

fn signed_lat(item: ValueItem, magnitude: f64) -> f64 {
    match item.letter {
        Some(h) => h.sign() * magnitude,
        None => item.value.signum() * magnitude,
    }
}

/// Unlabeled longitudes are forced west (negative): the source data is North
/// American and omits the hemisphere letter.
fn signed_lon(item: ValueItem, magnitude: f64) -> f64 {
    match item.letter {
        Some(h) => h.sign() * magnitude,
        None => -magnitude,
    }
}

/// Resolves the magnitude of one decimal-pair member. Out-of-range values
/// with a decimal point or explicit sign are reinterpreted as degrees with
/// two implied decimal digits (the source data historically packs degrees as
/// `DDMM` without a decimal point). An out-of-range bare integer is not
/// reinterpreted here: it belongs to the DM classifier, so the whole
/// classifier declines.
fn decimal_magnitude(item: ValueItem, bound: f64) -> Option<f64> {
    let magnitude = item.value.abs();
    if magnitude <= bound {
        return Some(magnitude);
    }
    if item.bare_int {
        return None;
    }
    Some(magnitude / 100.0)
}

fn classify_decimal(input: &ClassifierInput) -> Option<Candidate> {
    let items = value_items(input.tokens);
    if items.len() < 2 {
        return None;
    }
    let mut points = Vec::new();
    let mut skipped = Vec::new();
    for pair in items.chunks(2) {
        if pair.len() < 2 {
            record_skip(
                &mut skipped,
                Skipped::new(pair[0].value.to_string(), SkipReason::UnpairedValue),
            );
            continue;
        }
        let (lat_item, lon_item) = orient_pair(pair[0], pair[1]);
        let lat_magnitude = decimal_magnitude(lat_item, 90.0)?;
        let lon_magnitude = decimal_magnitude(lon_item, 180.0)?;
        let lat = signed_lat(lat_item, lat_magnitude);
        let lon = signed_lon(lon_item, lon_magnitude);
        push_point(&mut points, &mut skipped, lat, lon);
    }
    if points.is_empty() {
        None
    } else {
        Some((points, skipped))
    }
}

/// Packed degrees-minutes integers. Only bare unsigned integers participate;
/// a pair whose minute part is 60 or more is recorded as a range violation,
/// and if no pair at all converts the classifier declines so the
/// scaled-integer fallback gets its chance.
fn classify_dm(input: &ClassifierInput) -> Option<Candidate> {
    let items: Vec<ValueItem> = value_items(input.tokens)
        .into_iter()
        .filter(|item| item.bare_int)
        .collect();
    if items.len() < 2 {
        return None;
    }
    let mut points = Vec::new();
    let mut skipped = Vec::new();
    for pair in items.chunks(2) {
        if pair.len() < 2 {
            record_skip(
                &mut skipped,
                Skipped::new(pair[0].value.to_string(), SkipReason::UnpairedValue),
            );
            continue;
        }
        let (lat_item, lon_item) = orient_pair(pair[0], pair[1]);
        let fragment = || format!("{} {}", pair[0].value, pair[1].value);
        let lat_magnitude = match dm_to_decimal_degrees(lat_item.value) {
            Ok(v) => v,
            Err(e) => {
                record_skip(&mut skipped, Skipped::new(fragment(), e));
                continue;
            }
        };
        let lon_magnitude = match dm_to_decimal_degrees(lon_item.value) {
            Ok(v) => v,
            Err(e) => {
                record_skip(&mut skipped, Skipped::new(fragment(), e));
                continue;
            }
        };
        let lat = signed_lat(lat_item, lat_magnitude);
        let lon = signed_lon(lon_item, lon_magnitude);
        push_point(&mut points, &mut skipped, lat, lon);
    }
    if points.is_empty() {
        None
    } else {
        Some((points, skipped))
    }
}

/// Last resort: consecutive integer pairs read as hundredths of a degree.
fn classify_scaled(input: &ClassifierInput) -> Option<Candidate> {
    let items: Vec<ValueItem> = value_items(input.tokens)
        .into_iter()
        .filter(|item| item.value.fract() == 0.0)
        .collect();
    if items.len() < 2 {
        return None;
    }
    let mut points = Vec::new();
    let mut skipped = Vec::new();
    for pair in items.chunks(2) {
        if pair.len() < 2 {
            record_skip(
                &mut skipped,
                Skipped::new(pair[0].value.to_string(), SkipReason::UnpairedValue),
            );
            continue;
        }
        let (lat_item, lon_item) = orient_pair(pair[0], pair[1]);
        let lat = signed_lat(lat_item, lat_item.value.abs() / 100.0);
        let lon = signed_lon(lon_item, lon_item.value.abs() / 100.0);
        push_point(&mut points, &mut skipped, lat, lon);
    }
    if points.is_empty() {
        None
    } else {
        Some((points, skipped))
    }
}
