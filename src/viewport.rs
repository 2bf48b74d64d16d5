//! Data-space to screen-space mapping with pan and zoom
//!
//! Screen coordinates are pixels relative to the top-left corner of the plot
//! area, with `y` growing downwards. Data coordinates have `y` growing
//! upwards.

use serde::{Deserialize, Serialize};

/// Smallest span either axis may be zoomed down to
pub const MIN_SPAN: f64 = 1e-9;

/// Largest span either axis may be zoomed out to
pub const MAX_SPAN: f64 = 1e12;

/// Visible data rectangle and the pixel size of the area it is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Width of the drawing area in pixels
    #[serde(default = "default_width")]
    pub width: f64,
    /// Height of the drawing area in pixels
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            (-std::f64::consts::PI, std::f64::consts::PI),
            (-1.5, 1.5),
            (default_width(), default_height()),
        )
    }
}

impl Viewport {
    /// Create a viewport; reversed ranges are swapped and the pixel size is at least 1x1
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), size: (f64, f64)) -> Self {
        let (x_min, x_max) = ordered(x_range);
        let (y_min, y_max) = ordered(y_range);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width: size.0.max(1.0),
            height: size.1.max(1.0),
        }
    }

    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Data units per horizontal pixel
    pub fn scale_x(&self) -> f64 {
        self.x_span() / self.width
    }

    /// Data units per vertical pixel
    pub fn scale_y(&self) -> f64 {
        self.y_span() / self.height
    }

    /// Resize the drawing area, keeping the visible data rectangle
    pub fn set_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() {
            self.width = width.max(1.0);
            self.height = height.max(1.0);
        }
    }

    /// Whether the data rectangle is usable for sampling and drawing
    pub fn is_valid(&self) -> bool {
        let spans_ok = |span: f64| span.is_finite() && (MIN_SPAN..=MAX_SPAN).contains(&span);
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && spans_ok(self.x_span())
            && spans_ok(self.y_span())
    }

    /// Map a data point to screen pixels
    pub fn to_screen(&self, point: [f64; 2]) -> [f64; 2] {
        [
            (point[0] - self.x_min) / self.scale_x(),
            (self.y_max - point[1]) / self.scale_y(),
        ]
    }

    /// Map screen pixels to a data point
    pub fn to_data(&self, pixel: [f64; 2]) -> [f64; 2] {
        [
            self.x_min + pixel[0] * self.scale_x(),
            self.y_max - pixel[1] * self.scale_y(),
        ]
    }

    /// Translate the visible rectangle by a data-space offset
    pub fn pan_data(&mut self, dx: f64, dy: f64) {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }

    /// Drag the content by a pixel offset, as if grabbing the plot.
    ///
    /// Dragging right reveals smaller `x`; dragging down reveals larger `y`.
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        self.pan_data(-dx * sx, dy * sy);
    }

    /// Copy of this viewport dragged by a pixel offset
    pub fn panned_by_pixels(&self, dx: f64, dy: f64) -> Self {
        let mut moved = *self;
        moved.pan_pixels(dx, dy);
        moved
    }

    /// Scale both spans by `scale` keeping the data point under `anchor`
    /// (in pixels) fixed. `scale > 1` zooms out.
    ///
    /// Returns `false` and leaves the viewport untouched if the scale is not
    /// a positive finite number or the result would leave the span limits.
    pub fn zoom_at(&mut self, scale: f64, anchor: [f64; 2]) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        let new_x_span = self.x_span() * scale;
        let new_y_span = self.y_span() * scale;
        if !(MIN_SPAN..=MAX_SPAN).contains(&new_x_span) || !(MIN_SPAN..=MAX_SPAN).contains(&new_y_span) {
            return false;
        }

        let [ax, ay] = self.to_data(anchor);
        self.x_min = ax - (ax - self.x_min) * scale;
        self.x_max = ax + (self.x_max - ax) * scale;
        self.y_min = ay - (ay - self.y_min) * scale;
        self.y_max = ay + (self.y_max - ay) * scale;
        true
    }

    /// Zoom in by `factor` around `anchor`: spans shrink to `1/factor`
    pub fn zoom_in(&mut self, factor: f64, anchor: [f64; 2]) -> bool {
        self.zoom_at(1.0 / factor, anchor)
    }

    /// Zoom out by `factor` around `anchor`: spans grow by `factor`
    pub fn zoom_out(&mut self, factor: f64, anchor: [f64; 2]) -> bool {
        self.zoom_at(factor, anchor)
    }

    /// Pixel position of the centre of the drawing area
    pub fn center_pixel(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    /// Whether every bound is within `tolerance` of `other`'s
    pub fn approx_eq(&self, other: &Viewport, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0);
        close(self.x_min, other.x_min)
            && close(self.x_max, other.x_max)
            && close(self.y_min, other.y_min)
            && close(self.y_max, other.y_max)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
