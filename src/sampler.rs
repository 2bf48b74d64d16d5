//! Sampling an expression across the visible domain
//!
//! [`Sampler`] describes a pixel-aligned grid over the viewport's `x` range
//! and lazily evaluates the expression on it; calling [`Sampler::iter`] again
//! restarts the sequence. [`SampleBuffer`] holds the evaluated points that are
//! currently drawn.

use crate::expr::{Expression, ParameterLookup, Undefined};
use crate::viewport::Viewport;

/// Upper bound on the points in one pass, whatever the width and density
pub const MAX_SAMPLES: usize = 1 << 16;

/// Buffers longer than this are sketched with a wider brush
const WIDE_SKETCH_THRESHOLD: usize = 100;

/// Neighbours on each side overwritten by a wide sketch
const SKETCH_RADIUS: usize = 2;

/// One evaluated grid point. `y` is `None` where the function is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

/// A pixel-aligned sampling grid bound to an expression and its parameters
#[derive(Clone, Copy)]
pub struct Sampler<'a> {
    expr: &'a Expression,
    params: &'a dyn ParameterLookup,
    x_min: f64,
    step: f64,
    count: usize,
}

impl<'a> Sampler<'a> {
    /// Grid with `samples_per_pixel` samples per pixel column of `viewport`
    /// (at least two and at most [`MAX_SAMPLES`] samples, spanning
    /// `x_min..=x_max`).
    pub fn new(
        expr: &'a Expression,
        params: &'a dyn ParameterLookup,
        viewport: &Viewport,
        samples_per_pixel: f64,
    ) -> Self {
        let density = if samples_per_pixel.is_finite() && samples_per_pixel > 0.0 {
            samples_per_pixel
        } else {
            1.0
        };
        let count = ((viewport.width * density).round() as usize).clamp(2, MAX_SAMPLES);
        Self {
            expr,
            params,
            x_min: viewport.x_min,
            step: viewport.x_span() / (count - 1) as f64,
            count,
        }
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Why the function has no value at `x`, if it has none
    pub fn undefined_at(&self, x: f64) -> Option<Undefined> {
        self.expr.eval(x, self.params).err()
    }

    /// Lazily evaluate the grid from its first point
    pub fn iter(&self) -> Samples<'a> {
        Samples {
            sampler: *self,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &Sampler<'a> {
    type Item = Sample;
    type IntoIter = Samples<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`Sampler`]
#[derive(Clone)]
pub struct Samples<'a> {
    sampler: Sampler<'a>,
    index: usize,
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index >= self.sampler.count {
            return None;
        }
        let x = self.sampler.x_min + self.index as f64 * self.sampler.step;
        self.index += 1;
        let y = self.sampler.expr.eval(x, self.sampler.params).ok();
        Some(Sample { x, y })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

/// The evaluated points currently on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    /// Reason for the leftmost undefined point of the last pass
    first_undefined: Option<Undefined>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh pass over `sampler`
    pub fn refill(&mut self, sampler: &Sampler<'_>) {
        self.samples.clear();
        self.samples.extend(sampler.iter());
        self.first_undefined = self
            .samples
            .iter()
            .find(|s| s.y.is_none())
            .and_then(|s| sampler.undefined_at(s.x));
    }

    /// Why the leftmost undefined point of the last pass has no value
    pub fn first_undefined(&self) -> Option<&Undefined> {
        self.first_undefined.as_ref()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of points where the function is defined
    pub fn defined_count(&self) -> usize {
        self.samples.iter().filter(|s| s.y.is_some()).count()
    }

    /// Runs of consecutive defined points, ready to draw as separate lines
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for sample in &self.samples {
            match sample.y {
                Some(y) => current.push([sample.x, y]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Smallest and largest defined `y`
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(|s| s.y)
            .fold(None, |range, y| match range {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }

    /// Overwrite the sample closest to `x` with `y`.
    ///
    /// Buffers longer than 100 samples also overwrite two neighbours on
    /// each side. Returns `false` if `x` lies outside the sampled domain.
    pub fn sketch(&mut self, x: f64, y: f64) -> bool {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return false;
        };
        if !x.is_finite() || !y.is_finite() || x < first.x || x > last.x {
            return false;
        }

        let closest = self
            .samples
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0);

        let radius = if self.samples.len() > WIDE_SKETCH_THRESHOLD {
            SKETCH_RADIUS
        } else {
            0
        };
        let start = closest.saturating_sub(radius);
        let end = (closest + radius).min(self.samples.len() - 1);
        for sample in &mut self.samples[start..=end] {
            sample.y = Some(y);
        }
        true
    }
}
