//! Geometry primitives.
//!
//! A [`Point`] is a value type: coordinates are normalized to a fixed
//! number of decimal places when the point is materialized, never during
//! intermediate arithmetic. This keeps repeated copy and save/load cycles
//! idempotent and makes the serialized text identical across platforms.

/// Number of decimal places every stored coordinate is rounded to.
///
/// Matches the fixed-precision decimal format used by the markup writer,
/// so a parsed coordinate re-serializes to the same text.
pub const DECIMAL_PLACES: i32 = 8;

/// Round a value to [`DECIMAL_PLACES`] decimal places.
///
/// Idempotent: applying it to an already-rounded value is a no-op.
#[must_use]
pub fn set_precision(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMAL_PLACES);
    (value * factor).round() / factor
}

/// A single point of a stroke path.
///
/// `z` carries an optional pressure reading; [`Point::NO_PRESSURE`] marks
/// a point recorded without one. Pressure takes part in precision
/// normalization but is excluded from position comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Sentinel pressure value for points recorded without pressure.
    pub const NO_PRESSURE: f64 = -1.0;

    /// Create a point without pressure.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: set_precision(x),
            y: set_precision(y),
            z: Self::NO_PRESSURE,
        }
    }

    /// Create a point with a pressure reading.
    #[must_use]
    pub fn with_pressure(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: set_precision(x),
            y: set_precision(y),
            z: set_precision(z),
        }
    }

    /// Whether this point carries a pressure reading.
    #[must_use]
    pub fn has_pressure(&self) -> bool {
        self.z != Self::NO_PRESSURE
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the segment toward `other`.
    ///
    /// The argument order `atan2(dx, dy)` is deliberate and must not be
    /// changed: existing saved geometry was produced with this
    /// convention.
    #[must_use]
    pub fn direction_to(&self, other: &Point) -> f64 {
        (self.x - other.x).atan2(self.y - other.y)
    }

    /// The point on the ray from `self` through `toward` at `length`
    /// from `self`.
    ///
    /// Not clamped to the segment. Degenerate when `self` and `toward`
    /// coincide (the division by a zero distance produces non-finite
    /// coordinates); callers must guard that case.
    #[must_use]
    pub fn point_at_distance(&self, toward: &Point, length: f64) -> Point {
        let factor = length / self.distance_to(toward);
        Point::new(
            self.x + (toward.x - self.x) * factor,
            self.y + (toward.y - self.y) * factor,
        )
    }

    /// Whether two points share a position, ignoring pressure.
    #[must_use]
    pub fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}
