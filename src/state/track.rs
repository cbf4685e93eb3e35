//! Horizontal offset of the slide track.
//!
//! Slides sit edge to edge, so the resting offset for slide `i` is
//! `-i * width`. A live drag adds to that (with rubber-band resistance past
//! either end) and a commit eases from wherever the track is toward the new
//! rest position.

use crate::gesture::{ease_out_cubic, lerp};

pub fn rest_offset(index: usize, width: f64) -> f64 {
    if width > 0.0 { 0.0 - index as f64 * width } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Settle {
    from: f64,
    start_ms: f64,
    duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    index: usize,
    len: usize,
    width: f64,
    resistance: f64,
    /// Raw drag delta of the claimed swipe, before resistance.
    drag: Option<f64>,
    /// Offset relative to rest captured when a drag interrupted a settle.
    carry: f64,
    settle: Option<Settle>,
}

impl Track {
    pub fn new(len: usize, resistance: f64) -> Self {
        Self {
            index: 0,
            len,
            width: 0.0,
            resistance,
            drag: None,
            carry: 0.0,
            settle: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// A new container width invalidates pixel-based animations.
    pub fn set_width(&mut self, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width != self.width {
            self.width = width;
            self.settle = None;
            self.carry = 0.0;
        }
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
            self.settle = None;
        }
    }

    /// Drag delta after rubber-band resistance at the ends.
    pub fn resisted(&self, dx: f64) -> f64 {
        let past_first = self.index == 0 && dx > 0.0;
        let past_last = self.index + 1 >= self.len && dx < 0.0;
        if past_first || past_last {
            dx * self.resistance
        } else {
            dx
        }
    }

    pub fn begin_drag(&mut self, now_ms: f64) {
        self.carry = self.offset(now_ms) - rest_offset(self.index, self.width);
        self.settle = None;
        self.drag = Some(0.0);
    }

    pub fn set_drag(&mut self, dx: f64) {
        if self.drag.is_some() {
            self.drag = Some(dx);
        }
    }

    /// Commit to `target` (clamped into range), easing from the current
    /// offset over `duration_ms`. Returns the committed index.
    pub fn commit(&mut self, target: usize, now_ms: f64, duration_ms: f64) -> usize {
        let from = self.offset(now_ms);
        self.drag = None;
        self.carry = 0.0;
        self.index = target.min(self.len.saturating_sub(1));
        let to = rest_offset(self.index, self.width);
        self.settle = if duration_ms > 0.0 && (from - to).abs() > 0.5 {
            Some(Settle {
                from,
                start_ms: now_ms,
                duration_ms,
            })
        } else {
            None
        };
        self.index
    }

    /// Offset to render at `now_ms`. Pure: finished settles are dropped by
    /// [`Track::tick`].
    pub fn offset(&self, now_ms: f64) -> f64 {
        let rest = rest_offset(self.index, self.width);
        if let Some(dx) = self.drag {
            return rest + self.carry + self.resisted(dx);
        }
        match self.settle {
            Some(s) if now_ms - s.start_ms < s.duration_ms => {
                let t = ease_out_cubic((now_ms - s.start_ms) / s.duration_ms);
                lerp(s.from, rest, t)
            }
            _ => rest,
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let offset = self.offset(now_ms);
        if let Some(s) = self.settle {
            if now_ms - s.start_ms >= s.duration_ms {
                self.settle = None;
            }
        }
        offset
    }
}
