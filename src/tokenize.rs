//! Input normalization and raw token extraction.
//!
//! The tokenizer is a pure function of the input text: it folds unicode
//! variants of the degree/minute/second marks to ASCII, then extracts numeric
//! literals and standalone hemisphere letters in reading order, discarding
//! labels and stray punctuation.

use crate::error::{SkipReason, Skipped};

/// A hemisphere letter following a coordinate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and west negate the converted value.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    /// True for N/S, which mark a latitude.
    pub fn is_latitudinal(self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }

    pub fn sign(self) -> f64 {
        if self.is_negative() {
            -1.0
        } else {
            1.0
        }
    }
}

/// One token extracted from the normalized input text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A numeric literal. `bare_int` is true when the literal carried no
    /// decimal point and no explicit sign; the DM/decimal-degree boundary
    /// heuristic keys on it.
    Number { value: f64, bare_int: bool },
    /// A standalone hemisphere letter.
    Hemisphere(Hemisphere),
}

/// Folds unicode prime/quote marks to ASCII `'`/`"`, degree-sign variants to
/// `°`, comma/semicolon separators to spaces, and inserts a space between a
/// digit and an immediately following letter so numeric extraction does not
/// swallow a hemisphere letter (`34.5N` becomes `34.5 N`).
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_numeric = false;
    for c in text.chars() {
        let mapped = match c {
            '\u{2032}' | '\u{2019}' | '\u{2018}' => '\'',
            '\u{2033}' | '\u{201c}' | '\u{201d}' => '"',
            '\u{00ba}' | '\u{02da}' => '°',
            ',' | ';' => ' ',
            other => other,
        };
        if prev_numeric && mapped.is_ascii_alphabetic() {
            out.push(' ');
        }
        prev_numeric = mapped.is_ascii_digit() || mapped == '.';
        out.push(mapped);
    }
    out
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '+' || c == '-'
}

/// Extracts numeric literals and standalone hemisphere letters from
/// normalized text. Numeric-looking runs that fail to parse are recorded as
/// [`SkipReason::MalformedToken`]; everything else is silently discarded.
pub fn tokenize(normalized: &str) -> (Vec<Token>, Vec<Skipped>) {
    let mut tokens = Vec::new();
    let mut skipped = Vec::new();
    let chars: Vec<(usize, char)> = normalized.char_indices().collect();
    let mut i = 0;
    while i < chars.len() {
        let (start, c) = chars[i];
        if is_numeric_char(c) {
            let mut j = i;
            while j < chars.len() && is_numeric_char(chars[j].1) {
                j += 1;
            }
            let end = chars.get(j).map_or(normalized.len(), |&(offset, _)| offset);
            let run = &normalized[start..end];
            i = j;
            if !run.bytes().any(|b| b.is_ascii_digit()) {
                // Punctuation-only run, e.g. a stray dash between labels.
                continue;
            }
            match run.parse::<f64>() {
                Ok(value) => {
                    let bare_int =
                        !run.contains('.') && !run.starts_with('+') && !run.starts_with('-');
                    tokens.push(Token::Number { value, bare_int });
                }
                Err(_) => skipped.push(Skipped::new(run, SkipReason::MalformedToken)),
            }
        } else if let Some(hemisphere) = Hemisphere::from_char(c) {
            // Only standalone letters count; the W in "LOWER" does not.
            let prev_alpha = i > 0 && chars[i - 1].1.is_ascii_alphabetic();
            let next_alpha = i + 1 < chars.len() && chars[i + 1].1.is_ascii_alphabetic();
            if !prev_alpha && !next_alpha {
                tokens.push(Token::Hemisphere(hemisphere));
            }
            i += 1;
        } else {
            i += 1;
        }
    }
    (tokens, skipped)
}
