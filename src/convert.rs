//! Pure notation-to-decimal-degree conversions.
//!
//! All converters return an error rather than panicking when a minute or
//! second component is 60 or more, or when a degree literal is negative where
//! the sign must come from the hemisphere letter.

use crate::error::ConvertError;
use crate::tokenize::Hemisphere;

/// Converts a packed degrees-minutes integer: `4019` means 40°19'.
///
/// The sign of the input carries through: `-4019` becomes -40.3166...
pub fn dm_to_decimal_degrees(value: f64) -> Result<f64, ConvertError> {
    let magnitude = value.abs();
    let degrees = (magnitude / 100.0).trunc();
    let minutes = magnitude % 100.0;
    if minutes >= 60.0 {
        return Err(ConvertError::MinutesOutOfRange(minutes));
    }
    Ok(value.signum() * (degrees + minutes / 60.0))
}

/// Converts degrees-minutes-seconds with a hemisphere letter.
pub fn dms_to_decimal_degrees(
    deg: f64,
    min: f64,
    sec: f64,
    dir: Hemisphere,
) -> Result<f64, ConvertError> {
    if deg < 0.0 {
        return Err(ConvertError::NegativeDegrees(deg));
    }
    if min >= 60.0 {
        return Err(ConvertError::MinutesOutOfRange(min));
    }
    if sec >= 60.0 {
        return Err(ConvertError::SecondsOutOfRange(sec));
    }
    Ok(dir.sign() * (deg + min / 60.0 + sec / 3600.0))
}

/// Converts degrees-decimal-minutes with a hemisphere letter.
pub fn ddm_to_decimal_degrees(deg: f64, min: f64, dir: Hemisphere) -> Result<f64, ConvertError> {
    if deg < 0.0 {
        return Err(ConvertError::NegativeDegrees(deg));
    }
    if min >= 60.0 {
        return Err(ConvertError::MinutesOutOfRange(min));
    }
    Ok(dir.sign() * (deg + min / 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dm_conversion() {
        assert_abs_diff_eq!(
            dm_to_decimal_degrees(4019.0).unwrap(),
            40.0 + 19.0 / 60.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(dm_to_decimal_degrees(8042.0).unwrap(), 80.7, epsilon = 1e-9);
    }

    #[test]
    fn dm_keeps_sign() {
        assert_abs_diff_eq!(
            dm_to_decimal_degrees(-4019.0).unwrap(),
            -(40.0 + 19.0 / 60.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn dm_rejects_minutes_at_60_or_more() {
        assert_eq!(
            dm_to_decimal_degrees(4075.0).unwrap_err(),
            ConvertError::MinutesOutOfRange(75.0)
        );
    }

    #[test]
    fn dms_conversion_and_sign() {
        assert_abs_diff_eq!(
            dms_to_decimal_degrees(40.0, 19.0, 30.0, Hemisphere::North).unwrap(),
            40.0 + 19.0 / 60.0 + 30.0 / 3600.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            dms_to_decimal_degrees(80.0, 42.0, 0.0, Hemisphere::West).unwrap(),
            -80.7,
            epsilon = 1e-9
        );
    }

    #[test]
    fn dms_rejects_out_of_range_components() {
        assert_eq!(
            dms_to_decimal_degrees(40.0, 75.0, 0.0, Hemisphere::North).unwrap_err(),
            ConvertError::MinutesOutOfRange(75.0)
        );
        assert_eq!(
            dms_to_decimal_degrees(40.0, 19.0, 61.0, Hemisphere::North).unwrap_err(),
            ConvertError::SecondsOutOfRange(61.0)
        );
        assert_eq!(
            dms_to_decimal_degrees(-40.0, 19.0, 0.0, Hemisphere::South).unwrap_err(),
            ConvertError::NegativeDegrees(-40.0)
        );
    }

    #[test]
    fn ddm_conversion_and_sign() {
        assert_abs_diff_eq!(
            ddm_to_decimal_degrees(40.0, 19.5, Hemisphere::North).unwrap(),
            40.325,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            ddm_to_decimal_degrees(80.0, 30.0, Hemisphere::West).unwrap(),
            -80.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn ddm_rejects_out_of_range_components() {
        assert_eq!(
            ddm_to_decimal_degrees(40.0, 60.0, Hemisphere::North).unwrap_err(),
            ConvertError::MinutesOutOfRange(60.0)
        );
        assert_eq!(
            ddm_to_decimal_degrees(-1.0, 10.0, Hemisphere::East).unwrap_err(),
            ConvertError::NegativeDegrees(-1.0)
        );
    }
}
