#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in viewport space (CSS pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading in degrees from `self` toward `other` (0° = +x, 90° = +y).
    #[must_use]
    pub fn heading_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// The point `distance` pixels away along `heading_deg`.
    #[must_use]
    pub fn advanced(self, heading_deg: f64, distance: f64) -> Point {
        let rad = heading_deg.to_radians();
        Point { x: self.x + distance * rad.cos(), y: self.y + distance * rad.sin() }
    }
}

/// Visible area the flies live in, in CSS pixels.
///
/// A zero-sized viewport is valid; it happens before the first layout and
/// when the canvas is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0) }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `p` is more than `buffer` pixels outside the viewport on any side.
    #[must_use]
    pub fn is_beyond(&self, p: Point, buffer: f64) -> bool {
        p.x < -buffer || p.x > self.width + buffer || p.y < -buffer || p.y > self.height + buffer
    }
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
#[must_use]
pub fn angle_delta_deg(from: f64, to: f64) -> f64 {
    let d = normalize_deg(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unsigned angular distance between two headings, in `[0, 180]`.
#[must_use]
pub fn angle_between_deg(a: f64, b: f64) -> f64 {
    angle_delta_deg(a, b).abs()
}
