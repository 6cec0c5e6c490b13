//! Declared-vs-actual image dimension reconciliation.

use super::point::Point;

/// Multiplicative scale from declared PAGE coordinates to actual image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    pub sx: f64,
    pub sy: f64,
}

impl ScaleFactor {
    /// The identity scale, used when actual dimensions are unknown.
    pub const IDENTITY: ScaleFactor = ScaleFactor { sx: 1.0, sy: 1.0 };

    /// Creates a scale factor from explicit ratios.
    #[inline]
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }

    /// Returns true when both axes are unscaled.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.sx == 1.0 && self.sy == 1.0
    }

    /// Map a point into the scaled space, flooring each axis.
    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }
        Point::new(
            (point.x as f64 * self.sx).floor() as i64,
            (point.y as f64 * self.sy).floor() as i64,
        )
    }
}

/// Dimensions declared in the PAGE XML plus, when readable, the real image's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageImageMeta {
    pub declared_width: u32,
    pub declared_height: u32,
    pub actual: Option<(u32, u32)>,
}

impl PageImageMeta {
    /// Creates image metadata. Declared dimensions must be non-zero.
    pub fn new(declared_width: u32, declared_height: u32, actual: Option<(u32, u32)>) -> Self {
        Self {
            declared_width,
            declared_height,
            actual,
        }
    }

    /// `(actual / declared)` per axis, or identity when actual is unknown.
    pub fn scale(&self) -> ScaleFactor {
        match self.actual {
            Some((width, height)) => ScaleFactor::new(
                f64::from(width) / f64::from(self.declared_width),
                f64::from(height) / f64::from(self.declared_height),
            ),
            None => ScaleFactor::IDENTITY,
        }
    }

    /// The dimensions a page reports: actual if known, declared otherwise.
    pub fn output_dimensions(&self) -> (u32, u32) {
        self.actual
            .unwrap_or((self.declared_width, self.declared_height))
    }
}
