//! Slider-controlled parameters
//!
//! Every identifier of an expression other than `x` and the named constants
//! is a parameter. Each one gets a slider whose range and step come from
//! [`SliderRange`]; values set through the slider are clamped to the range
//! and snapped to its tick grid.

use crate::expr::{defaults, Expression, ParameterLookup};
use serde::{Deserialize, Serialize};

/// Slider bounds and step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::from_ticks(-10.0, 10.0, 201)
    }
}

impl SliderRange {
    /// Range with `ticks` evenly spaced positions including both ends
    pub fn from_ticks(min: f64, max: f64, ticks: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let intervals = ticks.saturating_sub(1).max(1) as f64;
        Self {
            min,
            max,
            step: (max - min) / intervals,
        }
    }

    /// Number of slider positions
    pub fn ticks(&self) -> u32 {
        if self.step <= 0.0 {
            return 1;
        }
        ((self.max - self.min) / self.step).round() as u32 + 1
    }

    /// Clamp `value` into range and move it onto the nearest tick
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let tick = ((clamped - self.min) / self.step).round();
        round_to_step_precision(self.min + tick * self.step, self.step).clamp(self.min, self.max)
    }
}

/// Strip floating point noise like `0.30000000000000004` from a snapped value
fn round_to_step_precision(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10()).ceil().clamp(0.0, 12.0) as i32;
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// A named parameter with its current value
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub range: SliderRange,
}

/// Ordered set of parameters, in the order they appear in the expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of `expr` initialized to their suggested defaults
    pub fn for_expression(expr: &Expression, range: SliderRange) -> Self {
        let entries = defaults::suggested_defaults(expr)
            .into_iter()
            .map(|(name, value)| Parameter {
                name,
                value,
                range,
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64, range: SliderRange) {
        let name = name.into();
        match self.entries.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.range = range;
            }
            None => self.entries.push(Parameter { name, value, range }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|p| p.value)
    }

    /// Set a parameter from its slider, snapping to the slider grid.
    ///
    /// Returns the stored value, or `None` if there is no such parameter.
    pub fn set(&mut self, name: &str, value: f64) -> Option<f64> {
        let entry = self.entries.iter_mut().find(|p| p.name == name)?;
        entry.value = entry.range.snap(value);
        Some(entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParameterLookup for ParameterSet {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.value(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let range = SliderRange::default();
        assert_eq!(range.min, -10.0);
        assert_eq!(range.max, 10.0);
        assert!((range.step - 0.1).abs() < 1e-12);
        assert_eq!(range.ticks(), 201);
    }

    #[test]
    fn test_snap_clamps_and_rounds() {
        let range = SliderRange::default();
        assert_eq!(range.snap(42.0), 10.0);
        assert_eq!(range.snap(-42.0), -10.0);
        assert_eq!(range.snap(0.34), 0.3);
        assert_eq!(range.snap(0.36), 0.4);
        assert_eq!(range.snap(f64::NAN), -10.0);
    }

    #[test]
    fn test_snap_has_no_float_noise() {
        let range = SliderRange::default();
        for tick in 0..range.ticks() {
            let raw = range.min + tick as f64 * range.step;
            let snapped = range.snap(raw);
            let text = format!("{}", snapped);
            assert!(text.len() <= 5, "{} rendered as {}", raw, text);
        }
    }

    #[test]
    fn test_reversed_bounds() {
        let range = SliderRange::from_ticks(5.0, -5.0, 11);
        assert_eq!(range.min, -5.0);
        assert_eq!(range.max, 5.0);
        assert_eq!(range.step, 1.0);
    }

    #[test]
    fn test_for_expression_uses_defaults() {
        let expr = Expression::parse("a*sin(k*(x - phi)) + c").unwrap();
        let params = ParameterSet::for_expression(&expr, SliderRange::default());
        assert_eq!(params.names().collect::<Vec<_>>(), ["a", "k", "phi", "c"]);
        assert_eq!(params.value("a"), Some(1.0));
        assert_eq!(params.value("phi"), Some(0.0));
    }

    #[test]
    fn test_set_unknown_parameter() {
        let mut params = ParameterSet::new();
        assert_eq!(params.set("a", 1.0), None);
    }

    #[test]
    fn test_set_snaps_value() {
        let mut params = ParameterSet::new();
        params.insert("a", 0.0, SliderRange::default());
        assert_eq!(params.set("a", 2.04), Some(2.0));
        assert_eq!(params.value_of("a"), Some(2.0));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut params = ParameterSet::new();
        params.insert("a", 1.0, SliderRange::default());
        params.insert("a", 3.0, SliderRange::from_ticks(0.0, 5.0, 6));
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a").map(|p| p.range.max), Some(5.0));
        assert_eq!(params.value("a"), Some(3.0));
    }
}
