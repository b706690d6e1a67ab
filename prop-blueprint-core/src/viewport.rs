//! Fitting generated geometry into the drawing surface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_VIEWPORT_H, DEFAULT_VIEWPORT_W};
use crate::error::{BlueprintError, Result};
use crate::geometry::{Bounds, Point};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        ViewportSize {
            width: DEFAULT_VIEWPORT_W,
            height: DEFAULT_VIEWPORT_H,
        }
    }
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        ViewportSize { width, height }
    }

    /// The drawing origin every builder works around.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BlueprintError::InvalidLayout { field, value })
    }
}

/// Scale that makes `b` fill `fraction` of the viewport height, capped at
/// `max_scale`. Zero, negative or non-finite heights are rejected, as are
/// viewport heights and factors that would give such a scale.
pub fn fit_scale(b: &Bounds, viewport: ViewportSize, fraction: f64, max_scale: f64) -> Result<f64> {
    positive("viewport.height", viewport.height)?;
    positive("fill_fraction", fraction)?;
    positive("max_scale", max_scale)?;
    let height = b.height();
    if !(height.is_finite() && height > 0.0) {
        return Err(BlueprintError::DegenerateGeometry { height });
    }
    let scale = (viewport.height * fraction) / height;
    let applied = scale.min(max_scale);
    debug!(natural = scale, applied, "fitted prop to viewport");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(h: f64) -> Bounds {
        Bounds {
            left: 0.0,
            top: 0.0,
            right: 100.0,
            bottom: h,
        }
    }

    #[test]
    fn large_props_shrink_to_fraction() {
        let s = fit_scale(&bounds(660.0), ViewportSize::new(800.0, 550.0), 0.6, 1.2).unwrap();
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn small_props_clamp_at_max_scale() {
        // 550 * 0.6 / 1.2 = 275: anything shorter would upscale past the cap.
        let s = fit_scale(&bounds(100.0), ViewportSize::default(), 0.6, 1.2).unwrap();
        assert_eq!(s, 1.2);
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = fit_scale(&bounds(0.0), ViewportSize::default(), 0.6, 1.2).unwrap_err();
        assert!(matches!(err, BlueprintError::DegenerateGeometry { .. }));
        assert!(fit_scale(&bounds(-3.0), ViewportSize::default(), 0.6, 1.2).is_err());
    }

    #[test]
    fn unusable_viewport_or_factors_are_rejected() {
        let b = bounds(100.0);
        for (vp, fraction, max) in [
            (ViewportSize::new(800.0, -550.0), 0.6, 1.2),
            (ViewportSize::new(800.0, 0.0), 0.6, 1.2),
            (ViewportSize::new(800.0, f64::NAN), 0.6, 1.2),
            (ViewportSize::default(), 0.0, 1.2),
            (ViewportSize::default(), -0.6, 1.2),
            (ViewportSize::default(), 0.6, 0.0),
            (ViewportSize::default(), 0.6, f64::INFINITY),
        ] {
            let err = fit_scale(&b, vp, fraction, max).unwrap_err();
            assert!(
                matches!(err, BlueprintError::InvalidLayout { .. }),
                "{vp:?} {fraction} {max} gave {err:?}"
            );
        }
    }
}
