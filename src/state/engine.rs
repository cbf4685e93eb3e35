//! Turns raw pointer sequences into swipe, pan and pinch gestures.
//!
//! The engine owns the per-interaction [`GestureState`] and mutates the
//! carousel's [`ZoomState`] while panning or pinching. It never touches the
//! slide index; a finished swipe is reported as [`EngineOutput::Swipe`] and
//! the decision is made by [`decide_swipe`].

use crate::config::CarouselConfig;
use crate::gesture::{Size, Vec2, clamp_pan, distance, midpoint, pinch_scale, project_momentum};
use crate::state::pointer::{GestureState, PointerId, PointerSample};
use crate::state::zoom::ZoomState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    /// One pointer down, direction not decided yet.
    Pending,
    /// Claimed as a horizontal swipe.
    Swiping,
    /// Handed to the page for vertical scrolling.
    Scrolling,
    /// One pointer moving a zoomed image.
    Panning,
    Pinching {
        start_distance: f64,
        base_scale: f64,
        base_translate: Vec2,
        start_center: Vec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineOutput {
    /// Not ours (unknown pointer, extra finger, released gesture).
    Ignored,
    /// Tracked, nothing to show yet.
    Tracking,
    /// The interaction was given up in favour of page scrolling.
    Released,
    /// Live horizontal drag, raw delta from the origin.
    Drag(f64),
    /// A pinch began; any live drag must be abandoned.
    PinchStarted,
    /// The zoom state changed.
    Zoomed,
    /// A claimed swipe ended.
    Swipe { distance: f64, velocity: f64 },
    /// A zoom gesture ended; reset zoom after the configured delay unless a
    /// newer token has been issued by then.
    SpringBack { token: u64 },
}

#[derive(Debug, Clone)]
pub struct GestureEngine {
    gesture: GestureState,
    phase: Phase,
    zoomed_this_interaction: bool,
    spring_token: u64,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self {
            gesture: GestureState::default(),
            phase: Phase::Idle,
            zoomed_this_interaction: false,
            spring_token: 0,
        }
    }
}

impl GestureEngine {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.gesture.is_idle()
    }

    pub fn spring_token(&self) -> u64 {
        self.spring_token
    }

    /// Invalidate any scheduled spring-back.
    pub fn cancel_spring_back(&mut self) -> u64 {
        self.spring_token = self.spring_token.wrapping_add(1);
        self.spring_token
    }

    pub fn pointer_down(&mut self, sample: PointerSample, zoom: &ZoomState) -> EngineOutput {
        let first = self.gesture.is_idle();
        if !self.gesture.insert(sample) {
            return EngineOutput::Ignored;
        }
        if first {
            self.cancel_spring_back();
            self.zoomed_this_interaction = zoom.is_zoomed();
            self.phase = if zoom.is_zoomed() {
                Phase::Panning
            } else {
                Phase::Pending
            };
            return EngineOutput::Tracking;
        }
        match self.gesture.pair() {
            Some((a, b)) => {
                self.phase = Phase::Pinching {
                    start_distance: distance(a, b),
                    base_scale: zoom.scale,
                    base_translate: zoom.translate,
                    start_center: midpoint(a, b),
                };
                self.zoomed_this_interaction = true;
                EngineOutput::PinchStarted
            }
            None => EngineOutput::Tracking,
        }
    }

    pub fn pointer_move(
        &mut self,
        sample: PointerSample,
        zoom: &mut ZoomState,
        container: Size,
        config: &CarouselConfig,
    ) -> EngineOutput {
        let Some(previous) = self.gesture.update(sample) else {
            return EngineOutput::Ignored;
        };
        match self.phase {
            Phase::Idle | Phase::Scrolling => EngineOutput::Ignored,
            Phase::Pending => {
                let Some(p) = self.gesture.single() else {
                    return EngineOutput::Tracking;
                };
                let d = p.current - p.origin;
                if d.x.hypot(d.y) <= config.jitter_px {
                    return EngineOutput::Tracking;
                }
                // Ties go to the page so vertical scrolling is never trapped.
                if d.x.abs() > d.y.abs() {
                    self.phase = Phase::Swiping;
                    EngineOutput::Drag(d.x)
                } else {
                    self.phase = Phase::Scrolling;
                    EngineOutput::Released
                }
            }
            Phase::Swiping => match self.gesture.single() {
                Some(p) => EngineOutput::Drag(p.current.x - p.origin.x),
                None => EngineOutput::Tracking,
            },
            Phase::Panning => {
                let delta = sample.position - previous;
                zoom.translate = clamp_pan(zoom.translate + delta, container, zoom.scale);
                EngineOutput::Zoomed
            }
            Phase::Pinching {
                start_distance,
                base_scale,
                base_translate,
                start_center,
            } => {
                let Some((a, b)) = self.gesture.pair() else {
                    return EngineOutput::Tracking;
                };
                let scale = pinch_scale(
                    start_distance,
                    distance(a, b),
                    base_scale,
                    config.min_scale,
                    config.max_scale,
                );
                // Keep the content point that sat under the starting center
                // under the current center.
                let c0 = container.center();
                let anchor = (start_center - c0 - base_translate) * (1.0 / base_scale.max(1e-6));
                let translate = (midpoint(a, b) - c0) - anchor * scale;
                zoom.scale = scale;
                zoom.translate = clamp_pan(translate, container, scale);
                EngineOutput::Zoomed
            }
        }
    }

    pub fn pointer_up(
        &mut self,
        id: PointerId,
        time_ms: f64,
        zoom: &ZoomState,
        config: &CarouselConfig,
    ) -> EngineOutput {
        let Some(released) = self.gesture.remove(id) else {
            return EngineOutput::Ignored;
        };
        if !self.gesture.is_idle() {
            // Pinch lost a finger: the survivor continues from where it is.
            self.gesture.rebase(time_ms);
            self.phase = if zoom.is_zoomed() {
                Phase::Panning
            } else {
                Phase::Pending
            };
            return EngineOutput::Tracking;
        }
        let velocity = self.gesture.release_velocity(time_ms, config.velocity_stale_ms);
        let phase = self.phase;
        let zoomed = self.zoomed_this_interaction || zoom.is_zoomed();
        self.gesture.reset();
        self.phase = Phase::Idle;
        self.zoomed_this_interaction = false;

        if zoomed {
            return EngineOutput::SpringBack {
                token: self.spring_token,
            };
        }
        match phase {
            Phase::Swiping => EngineOutput::Swipe {
                distance: released.current.x - released.origin.x,
                velocity,
            },
            Phase::Scrolling => EngineOutput::Ignored,
            _ => EngineOutput::Tracking,
        }
    }
}

/// Where a finished swipe lands.
///
/// Navigates one slide toward the drag when the distance or the velocity
/// crosses its threshold; otherwise stays on `index`. A velocity-triggered
/// flick takes its direction from the drag plus the projected momentum.
/// Never wraps past either end.
pub fn decide_swipe(
    index: usize,
    len: usize,
    distance: f64,
    velocity: f64,
    width: f64,
    config: &CarouselConfig,
) -> usize {
    if len == 0 {
        return 0;
    }
    let distance = if distance.is_finite() { distance } else { 0.0 };
    let velocity = if velocity.is_finite() { velocity } else { 0.0 };
    let by_distance = distance.abs() > config.swipe_distance_px;
    let by_velocity = velocity.abs() > config.swipe_velocity_px_per_ms;
    if !by_distance && !by_velocity {
        return index;
    }
    let heading = if by_distance {
        distance
    } else {
        distance + project_momentum(velocity, config.momentum_window_ms, width)
    };
    if heading < 0.0 && index + 1 < len {
        index + 1
    } else if heading > 0.0 && index > 0 {
        index - 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CarouselConfig {
        CarouselConfig::default()
    }

    const BOX: Size = Size {
        width: 300.0,
        height: 400.0,
    };

    #[test]
    fn distance_over_threshold_navigates() {
        assert_eq!(decide_swipe(0, 3, -60.0, -0.1, 300.0, &cfg()), 1);
        assert_eq!(decide_swipe(2, 3, 60.0, 0.1, 300.0, &cfg()), 1);
    }

    #[test]
    fn small_slow_drag_stays() {
        assert_eq!(decide_swipe(1, 3, -20.0, -0.1, 300.0, &cfg()), 1);
        assert_eq!(decide_swipe(1, 3, 20.0, 0.1, 300.0, &cfg()), 1);
    }

    #[test]
    fn fast_flick_navigates_on_velocity_alone() {
        assert_eq!(decide_swipe(0, 3, -10.0, -0.8, 300.0, &cfg()), 1);
        assert_eq!(decide_swipe(1, 3, 10.0, 0.8, 300.0, &cfg()), 0);
    }

    #[test]
    fn flick_direction_follows_momentum() {
        // Dragged right a little, then flicked left hard.
        assert_eq!(decide_swipe(1, 3, 30.0, -0.9, 300.0, &cfg()), 2);
    }

    #[test]
    fn ends_do_not_wrap() {
        assert_eq!(decide_swipe(0, 3, 200.0, 2.0, 300.0, &cfg()), 0);
        assert_eq!(decide_swipe(2, 3, -200.0, -2.0, 300.0, &cfg()), 2);
        assert_eq!(decide_swipe(0, 0, -200.0, -2.0, 300.0, &cfg()), 0);
    }

    #[test]
    fn horizontal_move_claims_swipe() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 100.0, 0.0), &zoom);
        let out = e.pointer_move(PointerSample::new(1, 70.0, 104.0, 16.0), &mut zoom, BOX, &cfg());
        assert_eq!(out, EngineOutput::Drag(-30.0));
        assert_eq!(e.phase(), Phase::Swiping);
    }

    #[test]
    fn jitter_is_not_claimed() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 100.0, 0.0), &zoom);
        let out = e.pointer_move(PointerSample::new(1, 103.0, 101.0, 16.0), &mut zoom, BOX, &cfg());
        assert_eq!(out, EngineOutput::Tracking);
        assert_eq!(e.phase(), Phase::Pending);
    }

    #[test]
    fn diagonal_tie_releases_to_page() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 100.0, 0.0), &zoom);
        let out = e.pointer_move(PointerSample::new(1, 120.0, 120.0, 16.0), &mut zoom, BOX, &cfg());
        assert_eq!(out, EngineOutput::Released);
        let out = e.pointer_move(PointerSample::new(1, 220.0, 125.0, 32.0), &mut zoom, BOX, &cfg());
        assert_eq!(out, EngineOutput::Ignored);
        assert_eq!(e.pointer_up(1, 40.0, &zoom, &cfg()), EngineOutput::Ignored);
        assert!(e.is_idle());
    }

    #[test]
    fn swipe_reports_distance_and_velocity() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 300.0, 50.0, 0.0), &zoom);
        e.pointer_move(PointerSample::new(1, 200.0, 50.0, 16.0), &mut zoom, BOX, &cfg());
        let out = e.pointer_up(1, 16.0, &zoom, &cfg());
        assert_eq!(
            out,
            EngineOutput::Swipe {
                distance: -100.0,
                velocity: -6.25
            }
        );
    }

    #[test]
    fn pinch_zooms_within_bounds() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0), &zoom);
        let out = e.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0), &zoom);
        assert_eq!(out, EngineOutput::PinchStarted);
        e.pointer_move(PointerSample::new(2, 300.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        assert!((zoom.scale - 2.0).abs() < 1e-9);
        e.pointer_move(PointerSample::new(2, 900.0, 200.0, 32.0), &mut zoom, BOX, &cfg());
        assert_eq!(zoom.scale, 3.0);
        let max_x = crate::gesture::max_pan_offset(BOX.width, zoom.scale);
        assert!(zoom.translate.x.abs() <= max_x);
    }

    #[test]
    fn centered_pinch_keeps_center_anchored() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0), &zoom);
        e.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0), &zoom);
        e.pointer_move(PointerSample::new(1, 50.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        e.pointer_move(PointerSample::new(2, 250.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        assert!((zoom.scale - 2.0).abs() < 1e-9);
        assert_eq!(zoom.translate, Vec2::ZERO);
    }

    #[test]
    fn pinch_release_hands_off_then_springs_back() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0), &zoom);
        e.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0), &zoom);
        e.pointer_move(PointerSample::new(2, 300.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        let before = zoom;
        assert_eq!(e.pointer_up(2, 20.0, &zoom, &cfg()), EngineOutput::Tracking);
        assert_eq!(e.phase(), Phase::Panning);
        assert_eq!(zoom, before);
        // Survivor moves from its own position: no jump.
        e.pointer_move(PointerSample::new(1, 110.0, 200.0, 30.0), &mut zoom, BOX, &cfg());
        assert!((zoom.translate.x - (before.translate.x + 10.0)).abs() < 1e-9);
        let out = e.pointer_up(1, 40.0, &zoom, &cfg());
        assert_eq!(
            out,
            EngineOutput::SpringBack {
                token: e.spring_token()
            }
        );
    }

    #[test]
    fn unzoomed_pinch_release_hands_off_as_swipe_candidate() {
        let mut e = GestureEngine::default();
        let mut zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0), &zoom);
        e.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0), &zoom);
        // Pinching inward clamps at scale 1.
        e.pointer_move(PointerSample::new(1, 120.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        e.pointer_move(PointerSample::new(2, 150.0, 200.0, 16.0), &mut zoom, BOX, &cfg());
        assert_eq!(zoom, ZoomState::IDENTITY);
        assert_eq!(e.pointer_up(2, 20.0, &zoom, &cfg()), EngineOutput::Tracking);
        assert_eq!(e.phase(), Phase::Pending);
        // Offset starts at zero from where the survivor was lifted onto.
        let out = e.pointer_move(PointerSample::new(1, 200.0, 200.0, 30.0), &mut zoom, BOX, &cfg());
        assert_eq!(out, EngineOutput::Drag(80.0));
        assert_eq!(e.phase(), Phase::Swiping);
        let out = e.pointer_up(1, 40.0, &zoom, &cfg());
        assert_eq!(
            out,
            EngineOutput::SpringBack {
                token: e.spring_token()
            }
        );
    }

    #[test]
    fn new_gesture_invalidates_spring_token() {
        let mut e = GestureEngine::default();
        let zoom = ZoomState {
            scale: 2.0,
            translate: Vec2::ZERO,
        };
        let old = e.spring_token();
        e.pointer_down(PointerSample::new(1, 10.0, 10.0, 0.0), &zoom);
        assert_ne!(e.spring_token(), old);
        assert_eq!(e.phase(), Phase::Panning);
    }

    #[test]
    fn third_pointer_is_ignored() {
        let mut e = GestureEngine::default();
        let zoom = ZoomState::IDENTITY;
        e.pointer_down(PointerSample::new(1, 0.0, 0.0, 0.0), &zoom);
        e.pointer_down(PointerSample::new(2, 10.0, 0.0, 0.0), &zoom);
        assert_eq!(
            e.pointer_down(PointerSample::new(3, 20.0, 0.0, 0.0), &zoom),
            EngineOutput::Ignored
        );
        assert_eq!(e.pointer_up(3, 5.0, &zoom, &cfg()), EngineOutput::Ignored);
    }
}
