//! Display scale ratio: logical units → surface pixels.

use super::error::ScaleError;

/// A validated, strictly positive scale ratio.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    pub fn new(ratio: f64) -> Result<Self, ScaleError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(ScaleError::Invalid(ratio))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Scale a logical length to surface units.
    pub fn apply(self, logical: f64) -> f64 {
        logical * self.0
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Pick the ratio that fits the whole logical play field inside the
/// viewport, letterboxing along whichever axis has slack.
pub fn compute_scale_ratio(
    viewport_width: f64,
    viewport_height: f64,
    game_width: f64,
    game_height: f64,
) -> f64 {
    if viewport_width / viewport_height < game_width / game_height {
        viewport_width / game_width
    } else {
        viewport_height / game_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert_eq!(ScaleRatio::new(0.0), Err(ScaleError::Invalid(0.0)));
        assert_eq!(ScaleRatio::new(-2.0), Err(ScaleError::Invalid(-2.0)));
        assert!(ScaleRatio::new(f64::NAN).is_err());
        assert!(ScaleRatio::new(f64::INFINITY).is_err());
        assert_eq!(ScaleRatio::new(1.5).map(ScaleRatio::get), Ok(1.5));
    }

    #[test]
    fn test_narrow_viewport_scales_by_width() {
        // 400x400 is narrower than 4:1, so width limits
        assert_eq!(compute_scale_ratio(400.0, 400.0, 800.0, 200.0), 0.5);
    }

    #[test]
    fn test_wide_viewport_scales_by_height() {
        // 2000x100 is wider than 4:1, so height limits
        assert_eq!(compute_scale_ratio(2000.0, 100.0, 800.0, 200.0), 0.5);
    }

    #[test]
    fn test_degenerate_viewport_is_rejected_downstream() {
        let ratio = compute_scale_ratio(0.0, 50.0, 800.0, 200.0);
        assert!(ScaleRatio::new(ratio).is_err());
    }

    #[test]
    fn test_apply() {
        let scale = ScaleRatio::new(2.0).unwrap();
        assert_eq!(scale.apply(24.0), 48.0);
    }
}
