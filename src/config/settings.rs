//! Plot settings
//!
//! These control how a function is sampled and how the view reacts to input.
//! They are stored in the app state file and can be edited there by hand;
//! missing fields fall back to their defaults.
//!
//! # Fields
//!
//! - Slider bounds and number of ticks shared by every parameter slider
//! - Samples per pixel column when evaluating the function
//! - Zoom factor applied per mouse wheel notch
//! - The domain and range shown on startup and after "Reset view"

use crate::params::SliderRange;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Zoom factor per wheel notch
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

/// Accepted range for samples per pixel column
pub const SAMPLES_PER_PIXEL_RANGE: (f64, f64) = (0.25, 16.0);

/// Sampling and navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    /// Lower bound of every parameter slider
    #[serde(default = "default_slider_min")]
    pub slider_min: f64,

    /// Upper bound of every parameter slider
    #[serde(default = "default_slider_max")]
    pub slider_max: f64,

    /// Number of slider positions, both ends included
    #[serde(default = "default_slider_ticks")]
    pub slider_ticks: u32,

    /// Function evaluations per horizontal pixel
    #[serde(default = "default_samples_per_pixel")]
    pub samples_per_pixel: f64,

    /// Zoom factor per wheel notch
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Domain shown on startup and on reset
    #[serde(default = "default_x_range")]
    pub default_x_range: (f64, f64),

    /// Range shown on startup and on reset
    #[serde(default = "default_y_range")]
    pub default_y_range: (f64, f64),
}

fn default_slider_min() -> f64 {
    -10.0
}

fn default_slider_max() -> f64 {
    10.0
}

fn default_slider_ticks() -> u32 {
    201
}

fn default_samples_per_pixel() -> f64 {
    1.0
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_x_range() -> (f64, f64) {
    (-PI, PI)
}

fn default_y_range() -> (f64, f64) {
    (-1.5, 1.5)
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            slider_min: default_slider_min(),
            slider_max: default_slider_max(),
            slider_ticks: default_slider_ticks(),
            samples_per_pixel: default_samples_per_pixel(),
            zoom_step: default_zoom_step(),
            default_x_range: default_x_range(),
            default_y_range: default_y_range(),
        }
    }
}

impl PlotSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slider range given to every new parameter
    pub fn slider_range(&self) -> SliderRange {
        SliderRange::from_ticks(self.slider_min, self.slider_max, self.slider_ticks)
    }

    /// Zoom factor per notch, falling back to the default if the stored one is unusable
    pub fn effective_zoom_step(&self) -> f64 {
        if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            DEFAULT_ZOOM_STEP
        }
    }

    /// Samples per pixel column, clamped to [`SAMPLES_PER_PIXEL_RANGE`]
    pub fn effective_samples_per_pixel(&self) -> f64 {
        let (min, max) = SAMPLES_PER_PIXEL_RANGE;
        if self.samples_per_pixel.is_finite() {
            self.samples_per_pixel.clamp(min, max)
        } else {
            default_samples_per_pixel()
        }
    }

    /// The startup view for a drawing area of the given pixel size
    pub fn default_viewport(&self, size: (f64, f64)) -> Viewport {
        let view = Viewport::new(self.default_x_range, self.default_y_range, size);
        if view.is_valid() {
            view
        } else {
            tracing::warn!(
                "Configured default view {:?} x {:?} is unusable, using built-in",
                self.default_x_range,
                self.default_y_range
            );
            Viewport::new(default_x_range(), default_y_range(), size)
        }
    }
}
