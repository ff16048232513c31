//! Target dimension calculation for aspect-preserving resizes.
//!
//! A negative width or height is a sentinel meaning "derive this side from
//! the other one and the aspect ratio of the source image". Derived sides are
//! rounded with [`f64::round`] (half away from zero), so a height of 75 at an
//! aspect of 4/3 gives a width of exactly 100, and 2.5 becomes 3.

use crate::{EditorError, Result};

/// Calculate the pixel size a resize request resolves to.
///
/// # Arguments
/// * `width` - Target width, or negative to derive it from `height`
/// * `height` - Target height, or negative to derive it from `width`
/// * `aspect` - Source image width divided by its height
///
/// # Returns
/// `(width, height)` in pixels. Fails with [`EditorError::InvalidDimensions`]
/// when both sides are negative, or when a side is zero or does not fit in
/// a `u32` after rounding.
///
/// # Example
/// ```
/// use imgscale_editor::target_dimensions;
///
/// // 4000x3000 source, 800 wide
/// assert_eq!(target_dimensions(800, -1, 4000.0 / 3000.0).unwrap(), (800, 600));
///
/// // Same source, 300 high
/// assert_eq!(target_dimensions(-1, 300, 4000.0 / 3000.0).unwrap(), (400, 300));
/// ```
pub fn target_dimensions(width: i64, height: i64, aspect: f64) -> Result<(u32, u32)> {
    let (w, h) = match (width < 0, height < 0) {
        (true, true) => {
            return Err(EditorError::InvalidDimensions {
                width: width as f64,
                height: height as f64,
            })
        }
        (true, false) => ((height as f64 * aspect).round(), height as f64),
        (false, true) => (width as f64, (width as f64 / aspect).round()),
        (false, false) => (width as f64, height as f64),
    };

    match (to_pixels(w), to_pixels(h)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(EditorError::InvalidDimensions { width: w, height: h }),
    }
}

fn to_pixels(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_THIRDS: f64 = 4.0 / 3.0;

    #[test]
    fn test_explicit_dimensions() {
        assert_eq!(target_dimensions(640, 480, FOUR_THIRDS).unwrap(), (640, 480));
        // Explicit sizes ignore the aspect ratio
        assert_eq!(target_dimensions(100, 100, FOUR_THIRDS).unwrap(), (100, 100));
    }

    #[test]
    fn test_derive_width() {
        assert_eq!(target_dimensions(-1, 75, FOUR_THIRDS).unwrap(), (100, 75));
    }

    #[test]
    fn test_derive_height() {
        assert_eq!(target_dimensions(100, -1, FOUR_THIRDS).unwrap(), (100, 75));
    }

    #[test]
    fn test_any_negative_is_sentinel() {
        assert_eq!(target_dimensions(-42, 75, FOUR_THIRDS).unwrap(), (100, 75));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 5 * 0.5 = 2.5 -> 3
        assert_eq!(target_dimensions(-1, 5, 0.5).unwrap(), (3, 5));
        // 3 / 2.0 = 1.5 -> 2
        assert_eq!(target_dimensions(3, -1, 2.0).unwrap(), (3, 2));
        // 10 * (1/3) = 3.33 -> 3
        assert_eq!(target_dimensions(-1, 10, 1.0 / 3.0).unwrap(), (3, 10));
    }

    #[test]
    fn test_both_negative_rejected() {
        let err = target_dimensions(-1, -1, FOUR_THIRDS).unwrap_err();
        assert!(matches!(err, EditorError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(target_dimensions(0, 100, FOUR_THIRDS).is_err());
        assert!(target_dimensions(100, 0, FOUR_THIRDS).is_err());
        // Derived side rounds to zero
        assert!(target_dimensions(1, -1, 10.0).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(target_dimensions(i64::from(u32::MAX) + 1, 10, 1.0).is_err());
        assert!(target_dimensions(-1, i64::from(u32::MAX), 2.0).is_err());
    }
}
