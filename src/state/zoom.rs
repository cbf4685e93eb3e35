// Zoom/pan of the active image, plus the visual spring back to identity.
use crate::gesture::{Vec2, ease_out_cubic, lerp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub scale: f64,
    pub translate: Vec2,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomState {
    pub const IDENTITY: ZoomState = ZoomState {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0 + 1e-6
    }

    pub fn css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// Eases a released zoom back to identity. The logical [`ZoomState`] is
/// already identity while this plays; only the rendered value lags behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSpring {
    from: ZoomState,
    start_ms: f64,
    duration_ms: f64,
}

impl ZoomSpring {
    pub fn new(from: ZoomState, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            start_ms,
            duration_ms,
        }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms - self.start_ms >= self.duration_ms
    }

    pub fn sample(&self, now_ms: f64) -> ZoomState {
        if self.is_done(now_ms) {
            return ZoomState::IDENTITY;
        }
        let t = ease_out_cubic((now_ms - self.start_ms) / self.duration_ms);
        ZoomState {
            scale: lerp(self.from.scale, 1.0, t),
            translate: Vec2::new(
                lerp(self.from.translate.x, 0.0, t),
                lerp(self.from.translate.y, 0.0, t),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_ends_at_exact_identity() {
        let from = ZoomState {
            scale: 2.7,
            translate: Vec2::new(40.0, -12.0),
        };
        let spring = ZoomSpring::new(from, 1000.0, 200.0);
        let mid = spring.sample(1100.0);
        assert!(mid.scale > 1.0 && mid.scale < 2.7);
        assert_eq!(spring.sample(1200.0), ZoomState::IDENTITY);
        assert!(spring.is_done(1200.0));
    }

    #[test]
    fn zero_duration_spring_is_immediate() {
        let spring = ZoomSpring::new(
            ZoomState {
                scale: 3.0,
                translate: Vec2::ZERO,
            },
            0.0,
            0.0,
        );
        assert_eq!(spring.sample(0.0), ZoomState::IDENTITY);
    }
}
