//! Runtime configuration.
//!
//! Defaults are compiled in. A JSON override can be stored in local storage
//! under [`AppConfig::STORAGE_KEY`]; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VinlyError};

/// Gesture thresholds and animation timings for one carousel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Movement (px) a pointer may jitter before a swipe direction is decided.
    pub jitter_px: f64,
    pub swipe_distance_px: f64,
    pub swipe_velocity_px_per_ms: f64,
    /// Drag multiplier applied when dragging past the first or last image.
    pub edge_resistance: f64,
    pub momentum_window_ms: f64,
    /// A pointer resting longer than this before release has zero velocity.
    pub velocity_stale_ms: f64,
    pub spring_back_delay_ms: u32,
    pub spring_back_duration_ms: f64,
    pub settle_duration_ms: f64,
    pub reduced_motion_settle_ms: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            jitter_px: 6.0,
            swipe_distance_px: 50.0,
            swipe_velocity_px_per_ms: 0.5,
            edge_resistance: 0.3,
            momentum_window_ms: 250.0,
            velocity_stale_ms: 100.0,
            spring_back_delay_ms: 80,
            spring_back_duration_ms: 200.0,
            settle_duration_ms: 280.0,
            reduced_motion_settle_ms: 0.0,
            min_scale: 1.0,
            max_scale: 3.0,
        }
    }
}

pub const MAX_ZOOM: f64 = 3.0;

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

impl CarouselConfig {
    /// Pull every value back into a range the gesture engine can work with.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        // Zoom never leaves [1, 3], whatever the override says.
        let min_scale = finite_or(self.min_scale, d.min_scale).clamp(1.0, MAX_ZOOM);
        let max_scale = finite_or(self.max_scale, d.max_scale).clamp(min_scale, MAX_ZOOM);
        Self {
            jitter_px: finite_or(self.jitter_px, d.jitter_px).max(0.0),
            swipe_distance_px: finite_or(self.swipe_distance_px, d.swipe_distance_px).max(0.0),
            swipe_velocity_px_per_ms: finite_or(
                self.swipe_velocity_px_per_ms,
                d.swipe_velocity_px_per_ms,
            )
            .max(0.0),
            edge_resistance: finite_or(self.edge_resistance, d.edge_resistance).clamp(0.0, 1.0),
            momentum_window_ms: finite_or(self.momentum_window_ms, d.momentum_window_ms).max(0.0),
            velocity_stale_ms: finite_or(self.velocity_stale_ms, d.velocity_stale_ms).max(0.0),
            spring_back_delay_ms: self.spring_back_delay_ms.clamp(50, 100),
            spring_back_duration_ms: finite_or(
                self.spring_back_duration_ms,
                d.spring_back_duration_ms,
            )
            .max(0.0),
            settle_duration_ms: finite_or(self.settle_duration_ms, d.settle_duration_ms).max(0.0),
            reduced_motion_settle_ms: finite_or(
                self.reduced_motion_settle_ms,
                d.reduced_motion_settle_ms,
            )
            .max(0.0),
            min_scale,
            max_scale,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    pub carousel: CarouselConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            carousel: CarouselConfig::default(),
        }
    }
}

impl AppConfig {
    pub const STORAGE_KEY: &'static str = "vinly_config";

    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: AppConfig = serde_json::from_str(raw).map_err(VinlyError::Config)?;
        Ok(cfg.sanitized())
    }

    pub fn sanitized(self) -> Self {
        Self {
            log_level: self.log_level,
            carousel: self.carousel.sanitized(),
        }
    }

    /// Read the override from local storage. A missing key yields the defaults.
    pub fn load() -> Result<Self> {
        let store = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or(VinlyError::StorageUnavailable)?;
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = AppConfig::from_json(r#"{"carousel":{"swipe_distance_px":80}}"#).unwrap();
        assert_eq!(cfg.carousel.swipe_distance_px, 80.0);
        assert_eq!(cfg.carousel.edge_resistance, 0.3);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = AppConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, VinlyError::Config(_)));
    }

    #[test]
    fn sanitize_fixes_scale_bounds_and_delay() {
        let cfg = CarouselConfig {
            min_scale: 0.5,
            max_scale: 0.8,
            spring_back_delay_ms: 500,
            edge_resistance: 4.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.min_scale, 1.0);
        assert_eq!(cfg.max_scale, 1.0);
        assert_eq!(cfg.spring_back_delay_ms, 100);
        assert_eq!(cfg.edge_resistance, 1.0);

        let cfg = CarouselConfig {
            min_scale: 4.0,
            max_scale: 6.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.min_scale, 3.0);
        assert_eq!(cfg.max_scale, 3.0);
        let cfg = CarouselConfig {
            max_scale: 6.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.max_scale, 3.0);
    }

    #[test]
    fn log_level_falls_back_to_info() {
        let cfg = AppConfig {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(cfg.log_level(), log::Level::Info);
        let cfg = AppConfig {
            log_level: "debug".into(),
            ..Default::default()
        };
        assert_eq!(cfg.log_level(), log::Level::Debug);
    }
}
