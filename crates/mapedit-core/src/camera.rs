//! Camera target and zoom.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Zoom multiplier applied per wheel notch when zooming in.
pub const ZOOM_STEP: f64 = 4.0 / 5.0;

/// Zoom level after `notches` wheel steps from `zoom`. Positive values zoom in.
pub fn zoom_after_notches(zoom: f64, notches: i32) -> f64 {
    zoom * ZOOM_STEP.powi(notches)
}

/// Camera state shared by all modes.
///
/// `zoom` is measured in scene units per screen unit: zooming in makes it
/// smaller, so a fixed screen-space distance covers less of the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Scene point the view is centred on.
    pub target: Point,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Point::ZERO,
            zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 64.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `min_zoom..=max_zoom` is a usable zoom range.
    pub fn valid_limits(min_zoom: f64, max_zoom: f64) -> bool {
        min_zoom.is_finite() && max_zoom.is_finite() && 0.0 < min_zoom && min_zoom <= max_zoom
    }

    /// Replace the zoom limits and re-clamp the current zoom.
    ///
    /// Returns false, leaving the camera untouched, for an unusable range.
    pub fn set_limits(&mut self, min_zoom: f64, max_zoom: f64) -> bool {
        if !Self::valid_limits(min_zoom, max_zoom) {
            log::warn!("Rejecting zoom limits {min_zoom}..{max_zoom}");
            return false;
        }
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.max(min_zoom).min(max_zoom);
        true
    }

    /// Set the zoom level, clamped to the camera limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            log::warn!("Rejecting invalid zoom {zoom}");
            return;
        }
        // Not `f64::clamp`: the limit fields are public and may hold a bad range.
        self.zoom = zoom.max(self.min_zoom).min(self.max_zoom);
    }

    /// Apply `notches` wheel steps. Positive values zoom in.
    pub fn zoom_by_notches(&mut self, notches: i32) {
        self.set_zoom(zoom_after_notches(self.zoom, notches));
    }

    /// Centre the view on a scene point.
    pub fn pan_to(&mut self, target: Point) {
        self.target = target;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.target = Point::ZERO;
        self.zoom = 1.0;
    }
}
