//! Pan, pinch and momentum math shared by the carousel.
//!
//! Every function here is pure. Non-finite or degenerate input never
//! propagates NaN/Infinity; callers get a clamped default instead.

/// A point or offset in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Container size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Clamp `v` into `[min, max]`. NaN collapses to `min`; never panics on
/// inverted bounds (the upper bound wins).
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    v.max(min).min(max)
}

// -0.0 compares equal to 0.0 but leaks into formatted CSS as "-0px".
fn positive_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Largest translate on one axis that keeps the scaled content covering the
/// container. Content is assumed to fill the container at scale 1 and grow
/// symmetrically around its center.
pub fn max_pan_offset(dimension: f64, scale: f64) -> f64 {
    let content = dimension * scale.max(1.0);
    ((content - dimension) / 2.0).max(0.0)
}

/// Clamp a pan translate so the scaled image never reveals blank space.
/// At `scale <= 1` the result is exactly `(0, 0)`.
pub fn clamp_pan(translate: Vec2, container: Size, scale: f64) -> Vec2 {
    let max_x = max_pan_offset(container.width, scale);
    let max_y = max_pan_offset(container.height, scale);
    Vec2::new(
        positive_zero(clamp(translate.x, -max_x, max_x)),
        positive_zero(clamp(translate.y, -max_y, max_y)),
    )
}

/// Extra travel implied by a release velocity (px/ms) over `duration_ms`,
/// using a half-distance ease-out approximation, clamped to `±max_magnitude`.
///
/// A non-positive or non-finite `max_magnitude` disables clamping.
pub fn project_momentum(velocity: f64, duration_ms: f64, max_magnitude: f64) -> f64 {
    if !velocity.is_finite() || !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 0.0;
    }
    let raw = velocity * duration_ms * 0.5;
    if !max_magnitude.is_finite() || max_magnitude <= 0.0 {
        return raw;
    }
    clamp(raw, -max_magnitude, max_magnitude)
}

/// Scale for a pinch that started `start_distance` apart at `base_scale` and
/// is now `current_distance` apart, clamped to `[min, max]`.
pub fn pinch_scale(
    start_distance: f64,
    current_distance: f64,
    base_scale: f64,
    min: f64,
    max: f64,
) -> f64 {
    let base = if base_scale.is_finite() && base_scale != 0.0 {
        base_scale
    } else {
        1.0
    };
    if !start_distance.is_finite() || start_distance <= 0.0 || !current_distance.is_finite() {
        return clamp(base, min, max);
    }
    clamp(base * current_distance / start_distance, min, max)
}

pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Cubic ease-out on `t` in `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
