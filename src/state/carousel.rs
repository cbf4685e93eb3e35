//! Everything one carousel instance knows between frames.
//!
//! Input handlers call the `pointer_*`, `key` and `select` methods and act on
//! the returned [`InputResponse`]; the animation frame loop calls
//! [`CarouselState::frame`] and writes the result to the DOM.

use crate::config::CarouselConfig;
use crate::gesture::Size;
use crate::state::engine::{EngineOutput, GestureEngine, decide_swipe};
use crate::state::pointer::{PointerId, PointerSample};
use crate::state::track::Track;
use crate::state::zoom::{ZoomSpring, ZoomState};

/// A spring-back the caller must schedule with a timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringBack {
    pub token: u64,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputResponse {
    /// The carousel used the event; suppress the browser default.
    pub consumed: bool,
    /// Drop any pending spring-back timer.
    pub cancel_spring_back: bool,
    pub spring_back: Option<SpringBack>,
    /// Set when a commit changed the visible image.
    pub navigated_to: Option<usize>,
}

impl InputResponse {
    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Default::default()
        }
    }
}

/// What to paint this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub index: usize,
    pub track_offset: f64,
    pub zoom: ZoomState,
}

impl FrameTransform {
    pub fn track_css(&self) -> String {
        format!("translate3d({}px, 0, 0)", self.track_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKey {
    Previous,
    Next,
    First,
    Last,
    ResetZoom,
}

impl CarouselKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::Previous),
            "ArrowRight" | "Right" => Some(Self::Next),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            "Escape" | "Esc" => Some(Self::ResetZoom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarouselState {
    config: CarouselConfig,
    engine: GestureEngine,
    track: Track,
    zoom: ZoomState,
    zoom_spring: Option<ZoomSpring>,
    container: Size,
    reduced_motion: bool,
}

impl CarouselState {
    pub fn new(len: usize, config: CarouselConfig) -> Self {
        let config = config.sanitized();
        Self {
            track: Track::new(len, config.edge_resistance),
            config,
            engine: GestureEngine::default(),
            zoom: ZoomState::IDENTITY,
            zoom_spring: None,
            container: Size::default(),
            reduced_motion: false,
        }
    }

    pub fn index(&self) -> usize {
        self.track.index()
    }

    pub fn len(&self) -> usize {
        self.track.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn set_container(&mut self, size: Size) {
        self.container = size;
        self.track.set_width(size.width);
    }

    pub fn set_len(&mut self, len: usize) {
        let before = self.track.index();
        self.track.set_len(len);
        if self.track.index() != before {
            self.reset_zoom();
        }
    }

    fn settle_ms(&self) -> f64 {
        if self.reduced_motion {
            self.config.reduced_motion_settle_ms
        } else {
            self.config.settle_duration_ms
        }
    }

    fn reset_zoom(&mut self) {
        self.engine.cancel_spring_back();
        self.zoom = ZoomState::IDENTITY;
        self.zoom_spring = None;
    }

    /// Commit path shared by swipes, dots, arrows and keys.
    pub fn select(&mut self, target: usize, now_ms: f64) -> InputResponse {
        if self.track.is_empty() {
            return InputResponse::default();
        }
        let before = self.track.index();
        let index = self.track.commit(target, now_ms, self.settle_ms());
        let mut response = InputResponse::consumed();
        if index != before {
            self.reset_zoom();
            response.cancel_spring_back = true;
            response.navigated_to = Some(index);
            log::debug!("carousel: {} -> {}", before, index);
        }
        response
    }

    pub fn pointer_down(&mut self, sample: PointerSample) -> InputResponse {
        if self.track.is_empty() {
            return InputResponse::default();
        }
        // Grab a zoom that is still visually springing back.
        if let Some(spring) = self.zoom_spring.take() {
            if self.engine.is_idle() {
                self.zoom = spring.sample(sample.time_ms);
            }
        }
        let was_idle = self.engine.is_idle();
        match self.engine.pointer_down(sample, &self.zoom) {
            EngineOutput::Ignored => InputResponse::default(),
            EngineOutput::PinchStarted => {
                if self.track.is_dragging() {
                    let index = self.track.index();
                    self.track.commit(index, sample.time_ms, self.settle_ms());
                }
                InputResponse::consumed()
            }
            _ => InputResponse {
                cancel_spring_back: was_idle,
                ..InputResponse::consumed()
            },
        }
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> InputResponse {
        let output =
            self.engine
                .pointer_move(sample, &mut self.zoom, self.container, &self.config);
        match output {
            EngineOutput::Drag(dx) => {
                if !self.track.is_dragging() {
                    self.track.begin_drag(sample.time_ms);
                }
                self.track.set_drag(dx);
                InputResponse::consumed()
            }
            EngineOutput::Zoomed => InputResponse::consumed(),
            _ => InputResponse::default(),
        }
    }

    pub fn pointer_up(&mut self, id: PointerId, time_ms: f64) -> InputResponse {
        let output = self.engine.pointer_up(id, time_ms, &self.zoom, &self.config);
        match output {
            EngineOutput::Swipe { distance, velocity } => {
                let target = decide_swipe(
                    self.track.index(),
                    self.track.len(),
                    distance,
                    velocity,
                    self.container.width,
                    &self.config,
                );
                self.select(target, time_ms)
            }
            EngineOutput::SpringBack { token } => {
                if self.track.is_dragging() {
                    let index = self.track.index();
                    self.track.commit(index, time_ms, self.settle_ms());
                }
                InputResponse {
                    spring_back: Some(SpringBack {
                        token,
                        delay_ms: self.config.spring_back_delay_ms,
                    }),
                    ..InputResponse::consumed()
                }
            }
            EngineOutput::Ignored => InputResponse::default(),
            _ => InputResponse::consumed(),
        }
    }

    /// Fired by the spring-back timer. Stale tokens and timers that land
    /// mid-gesture do nothing.
    pub fn spring_back(&mut self, token: u64, now_ms: f64) -> bool {
        if token != self.engine.spring_token() || !self.engine.is_idle() {
            return false;
        }
        if !self.zoom.is_identity() {
            let duration = if self.reduced_motion {
                0.0
            } else {
                self.config.spring_back_duration_ms
            };
            self.zoom_spring = Some(ZoomSpring::new(self.zoom, now_ms, duration));
        }
        self.zoom = ZoomState::IDENTITY;
        true
    }

    pub fn key(&mut self, key: CarouselKey, now_ms: f64) -> InputResponse {
        if self.track.is_empty() || !self.engine.is_idle() {
            return InputResponse::default();
        }
        let index = self.track.index();
        match key {
            CarouselKey::Previous => self.select(index.saturating_sub(1), now_ms),
            CarouselKey::Next => self.select(index + 1, now_ms),
            CarouselKey::First => self.select(0, now_ms),
            CarouselKey::Last => self.select(self.track.len() - 1, now_ms),
            CarouselKey::ResetZoom => {
                self.reset_zoom();
                InputResponse {
                    cancel_spring_back: true,
                    ..InputResponse::consumed()
                }
            }
        }
    }

    pub fn frame(&mut self, now_ms: f64) -> FrameTransform {
        let track_offset = self.track.tick(now_ms);
        let zoom = match self.zoom_spring {
            Some(spring) if !spring.is_done(now_ms) => spring.sample(now_ms),
            Some(_) => {
                self.zoom_spring = None;
                self.zoom
            }
            None => self.zoom,
        };
        FrameTransform {
            index: self.track.index(),
            track_offset,
            zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Vec2;

    fn carousel(len: usize) -> CarouselState {
        let mut c = CarouselState::new(len, CarouselConfig::default());
        c.set_container(Size::new(300.0, 400.0));
        c
    }

    fn pinch_to_double(c: &mut CarouselState) -> SpringBack {
        c.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0));
        c.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0));
        c.pointer_move(PointerSample::new(2, 300.0, 200.0, 16.0));
        c.pointer_up(2, 30.0);
        c.pointer_up(1, 32.0).spring_back.unwrap()
    }

    #[test]
    fn flick_advances_and_animates_to_next_slide() {
        let mut c = carousel(3);
        c.pointer_down(PointerSample::new(1, 300.0, 100.0, 0.0));
        c.pointer_move(PointerSample::new(1, 200.0, 100.0, 16.0));
        let r = c.pointer_up(1, 16.0);
        assert_eq!(r.navigated_to, Some(1));
        assert_eq!(c.index(), 1);
        let start = c.frame(16.0);
        assert_eq!(start.track_offset, -100.0);
        let end = c.frame(16.0 + 280.0);
        assert_eq!(end.track_offset, -300.0);
    }

    #[test]
    fn slow_short_drag_snaps_back() {
        let mut c = carousel(3);
        c.pointer_down(PointerSample::new(1, 150.0, 100.0, 0.0));
        c.pointer_move(PointerSample::new(1, 140.0, 100.0, 100.0));
        c.pointer_move(PointerSample::new(1, 130.0, 100.0, 200.0));
        let r = c.pointer_up(1, 210.0);
        assert_eq!(r.navigated_to, None);
        assert_eq!(c.index(), 0);
        assert_eq!(c.frame(1000.0).track_offset, 0.0);
    }

    #[test]
    fn rightward_drag_at_first_slide_only_rubber_bands() {
        let mut c = carousel(3);
        c.pointer_down(PointerSample::new(1, 100.0, 100.0, 0.0));
        c.pointer_move(PointerSample::new(1, 300.0, 100.0, 16.0));
        let live = c.frame(16.0).track_offset;
        assert!((live - 60.0).abs() < 1e-9);
        let r = c.pointer_up(1, 16.0);
        assert_eq!(r.navigated_to, None);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn pinch_always_springs_back_to_identity() {
        let mut c = carousel(3);
        let sb = pinch_to_double(&mut c);
        assert_eq!(sb.delay_ms, 80);
        assert!(c.zoom().is_zoomed());
        assert!(c.spring_back(sb.token, 112.0));
        assert_eq!(c.zoom(), ZoomState::IDENTITY);
        assert_eq!(c.zoom().scale, 1.0);
        assert_eq!(c.zoom().translate, Vec2::ZERO);
        assert_eq!(c.frame(112.0 + 200.0).zoom, ZoomState::IDENTITY);
    }

    #[test]
    fn oversized_max_scale_override_still_caps_zoom_at_three() {
        let config = CarouselConfig {
            max_scale: 6.0,
            ..Default::default()
        };
        let mut c = CarouselState::new(3, config);
        c.set_container(Size::new(300.0, 400.0));
        c.pointer_down(PointerSample::new(1, 100.0, 200.0, 0.0));
        c.pointer_down(PointerSample::new(2, 200.0, 200.0, 1.0));
        c.pointer_move(PointerSample::new(2, 900.0, 200.0, 16.0));
        assert_eq!(c.zoom().scale, 3.0);
    }

    #[test]
    fn late_container_size_moves_rest_offset() {
        let mut c = CarouselState::new(3, CarouselConfig::default());
        c.select(1, 0.0);
        assert_eq!(c.frame(1000.0).track_offset, 0.0);
        c.set_container(Size::new(300.0, 400.0));
        assert_eq!(c.frame(1000.0).track_offset, -300.0);
        c.set_container(Size::new(250.0, 400.0));
        assert_eq!(c.frame(1000.0).track_offset, -250.0);
    }

    #[test]
    fn new_gesture_cancels_pending_spring_back() {
        let mut c = carousel(3);
        let sb = pinch_to_double(&mut c);
        let r = c.pointer_down(PointerSample::new(5, 150.0, 200.0, 60.0));
        assert!(r.cancel_spring_back);
        assert!(!c.spring_back(sb.token, 112.0));
        assert!(c.zoom().is_zoomed());
        let again = c.pointer_up(5, 90.0).spring_back.unwrap();
        assert!(c.spring_back(again.token, 170.0));
        assert_eq!(c.zoom(), ZoomState::IDENTITY);
    }

    #[test]
    fn keys_navigate_and_clamp() {
        let mut c = carousel(3);
        assert_eq!(c.key(CarouselKey::Previous, 0.0).navigated_to, None);
        assert_eq!(c.key(CarouselKey::Next, 0.0).navigated_to, Some(1));
        assert_eq!(c.key(CarouselKey::Last, 0.0).navigated_to, Some(2));
        assert_eq!(c.key(CarouselKey::Next, 0.0).navigated_to, None);
        assert_eq!(c.key(CarouselKey::First, 0.0).navigated_to, Some(0));
    }

    #[test]
    fn escape_resets_zoom() {
        let mut c = carousel(3);
        pinch_to_double(&mut c);
        let r = c.key(CarouselKey::ResetZoom, 40.0);
        assert!(r.cancel_spring_back);
        assert_eq!(c.zoom(), ZoomState::IDENTITY);
    }

    #[test]
    fn navigation_resets_zoom() {
        let mut c = carousel(3);
        pinch_to_double(&mut c);
        c.select(2, 40.0);
        assert_eq!(c.zoom(), ZoomState::IDENTITY);
    }

    #[test]
    fn reduced_motion_jumps() {
        let mut c = carousel(3);
        c.set_reduced_motion(true);
        c.select(1, 0.0);
        assert_eq!(c.frame(0.0).track_offset, -300.0);
    }

    #[test]
    fn empty_carousel_ignores_input() {
        let mut c = carousel(0);
        assert!(!c.pointer_down(PointerSample::new(1, 0.0, 0.0, 0.0)).consumed);
        assert_eq!(c.key(CarouselKey::Next, 0.0), InputResponse::default());
        assert_eq!(c.frame(0.0).track_offset, 0.0);
    }

    #[test]
    fn key_parsing() {
        assert_eq!(CarouselKey::from_key("ArrowLeft"), Some(CarouselKey::Previous));
        assert_eq!(CarouselKey::from_key("End"), Some(CarouselKey::Last));
        assert_eq!(CarouselKey::from_key("Escape"), Some(CarouselKey::ResetZoom));
        assert_eq!(CarouselKey::from_key("a"), None);
    }
}
