//! Interaction controller
//!
//! The controller owns everything that is drawn: the current expression, its
//! parameters, the viewport and the sampled curve. The frontend translates
//! egui input into [`InputEvent`]s and feeds them to [`Controller::handle`],
//! which updates the model, resamples when needed and reports whether the
//! plot has to be redrawn.
//!
//! # States
//!
//! ```text
//!            pointer down (move mode)           pointer up
//!   Idle ----------------------------> Panning ----------> Idle
//!   Idle ----------------------------> Sketching --------> Idle
//!            pointer down (edit mode)
//!   any  -- slider grab --> EditingSlider -- slider release --> Idle
//! ```
//!
//! Wheel zoom is ignored while a slider is held. Text submissions and preset
//! selections are accepted in every state.

use crate::config::PlotSettings;
use crate::expr::{Expression, ParseError, BLANK_EXPRESSION};
use crate::params::ParameterSet;
use crate::sampler::{SampleBuffer, Sampler};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// What a primary-button drag on the plot does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseMode {
    /// Drag the view around
    #[default]
    MovePlot,
    /// Draw over the sampled curve
    EditFunction,
}

impl MouseMode {
    pub const ALL: [MouseMode; 2] = [MouseMode::MovePlot, MouseMode::EditFunction];

    pub fn label(self) -> &'static str {
        match self {
            MouseMode::MovePlot => "Move plot view",
            MouseMode::EditFunction => "Edit function",
        }
    }
}

/// Current interaction
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Dragging the view. `anchor` is the pixel where the drag started and
    /// `origin` the viewport at that moment.
    Panning { anchor: [f64; 2], origin: Viewport },
    /// A parameter slider is held
    EditingSlider(String),
    /// Drawing over the curve in edit mode
    Sketching,
}

/// Input understood by the controller.
///
/// Pointer positions are pixels relative to the top-left corner of the plot
/// area.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: [f64; 2] },
    PointerMove { pos: [f64; 2] },
    PointerUp,
    /// Wheel turned by `notches` (positive away from the user) over `pos`
    Wheel { notches: f64, pos: [f64; 2] },
    SliderGrab(String),
    SliderChange { name: String, value: f64 },
    SliderRelease,
    /// The entry box was submitted
    SubmitText(String),
    SelectPreset { name: String, expression: String },
    SetMouseMode(MouseMode),
    ResetView,
    /// The plot area changed size, in pixels
    Resize { width: f64, height: f64 },
}

/// Model and state machine behind the plot window
#[derive(Debug, Clone)]
pub struct Controller {
    expression: Expression,
    params: ParameterSet,
    viewport: Viewport,
    buffer: SampleBuffer,
    state: InteractionState,
    mouse_mode: MouseMode,
    settings: PlotSettings,
    /// Last rejected submission and why it was rejected
    rejected: Option<(String, ParseError)>,
}

impl Controller {
    /// Controller plotting `zero(x)` in `viewport`
    pub fn new(settings: PlotSettings, viewport: Viewport) -> Self {
        let mut controller = Self {
            expression: Expression::zero(),
            params: ParameterSet::new(),
            viewport,
            buffer: SampleBuffer::new(),
            state: InteractionState::Idle,
            mouse_mode: MouseMode::default(),
            settings,
            rejected: None,
        };
        controller.resample();
        controller
    }

    /// Controller plotting `source`, or `zero(x)` with the error kept if it does not parse
    pub fn with_expression(settings: PlotSettings, viewport: Viewport, source: &str) -> Self {
        let mut controller = Self::new(settings, viewport);
        controller.submit(source);
        controller
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mouse_mode(&self) -> MouseMode {
        self.mouse_mode
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    /// Error of the last rejected submission, cleared by the next accepted one
    pub fn last_error(&self) -> Option<&ParseError> {
        self.rejected.as_ref().map(|(_, error)| error)
    }

    /// Text of the last rejected submission
    pub fn rejected_text(&self) -> Option<&str> {
        self.rejected.as_ref().map(|(text, _)| text.as_str())
    }

    /// Message for the entry box when nothing in the visible domain can be drawn
    pub fn evaluation_warning(&self) -> Option<String> {
        if self.buffer.is_empty() || self.buffer.defined_count() > 0 {
            return None;
        }
        Some(match self.buffer.first_undefined() {
            Some(reason) => format!("Undefined across the visible domain: {}", reason),
            None => "Undefined across the visible domain".to_string(),
        })
    }

    /// Plot title, optionally with parameter values written in
    pub fn title(&self, with_values: bool) -> String {
        if with_values {
            self.expression.substitute(&self.params).title()
        } else {
            self.expression.title()
        }
    }

    /// Apply one input event. Returns whether the plot needs a redraw.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { pos } => self.pointer_down(pos),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Wheel { notches, pos } => self.wheel(notches, pos),
            InputEvent::SliderGrab(name) => self.slider_grab(name),
            InputEvent::SliderChange { name, value } => self.slider_change(&name, value),
            InputEvent::SliderRelease => self.slider_release(),
            InputEvent::SubmitText(text) => self.submit(&text),
            InputEvent::SelectPreset { name, expression } => {
                tracing::debug!("Preset selected: {}", name);
                self.submit(&expression)
            }
            InputEvent::SetMouseMode(mode) => self.set_mouse_mode(mode),
            InputEvent::ResetView => self.reset_view(),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    // ==================== Pointer ====================

    fn pointer_down(&mut self, pos: [f64; 2]) -> bool {
        if self.state != InteractionState::Idle {
            return false;
        }
        match self.mouse_mode {
            MouseMode::MovePlot => {
                self.state = InteractionState::Panning {
                    anchor: pos,
                    origin: self.viewport,
                };
                false
            }
            MouseMode::EditFunction => {
                self.state = InteractionState::Sketching;
                self.sketch_at(pos)
            }
        }
    }

    fn pointer_move(&mut self, pos: [f64; 2]) -> bool {
        match self.state {
            InteractionState::Panning { anchor, origin } => {
                let mut moved = origin.panned_by_pixels(pos[0] - anchor[0], pos[1] - anchor[1]);
                moved.set_size(self.viewport.width, self.viewport.height);
                if moved == self.viewport || !moved.is_valid() {
                    return false;
                }
                self.viewport = moved;
                self.resample();
                true
            }
            InteractionState::Sketching => self.sketch_at(pos),
            InteractionState::Idle | InteractionState::EditingSlider(_) => false,
        }
    }

    fn pointer_up(&mut self) -> bool {
        if matches!(
            self.state,
            InteractionState::Panning { .. } | InteractionState::Sketching
        ) {
            self.state = InteractionState::Idle;
        }
        false
    }

    fn sketch_at(&mut self, pos: [f64; 2]) -> bool {
        let [x, y] = self.viewport.to_data(pos);
        self.buffer.sketch(x, y)
    }

    fn wheel(&mut self, notches: f64, pos: [f64; 2]) -> bool {
        if matches!(self.state, InteractionState::EditingSlider(_))
            || !notches.is_finite()
            || notches == 0.0
        {
            return false;
        }

        let factor = self.settings.effective_zoom_step().powf(notches.abs());
        let zoomed = if notches > 0.0 {
            self.viewport.zoom_in(factor, pos)
        } else {
            self.viewport.zoom_out(factor, pos)
        };
        if !zoomed {
            tracing::debug!("Zoom limit reached");
            return false;
        }

        // Keep an ongoing drag consistent with the new scale
        if let InteractionState::Panning { .. } = self.state {
            self.state = InteractionState::Panning {
                anchor: pos,
                origin: self.viewport,
            };
        }
        self.resample();
        true
    }

    // ==================== Sliders ====================

    fn slider_grab(&mut self, name: String) -> bool {
        if self.params.get(&name).is_none() {
            tracing::warn!("Slider grabbed for unknown parameter `{}`", name);
            return false;
        }
        self.state = InteractionState::EditingSlider(name);
        false
    }

    fn slider_change(&mut self, name: &str, value: f64) -> bool {
        let previous = self.params.value(name);
        match self.params.set(name, value) {
            Some(stored) if Some(stored) != previous => {
                self.resample();
                true
            }
            Some(_) => false,
            None => {
                tracing::warn!("Slider changed for unknown parameter `{}`", name);
                false
            }
        }
    }

    fn slider_release(&mut self) -> bool {
        if matches!(self.state, InteractionState::EditingSlider(_)) {
            self.state = InteractionState::Idle;
        }
        false
    }

    // ==================== Expression ====================

    /// Parse `text` and plot it. A blank entry plots `zero(x)`.
    ///
    /// On failure the current plot is kept and the error stored.
    fn submit(&mut self, text: &str) -> bool {
        let text = match text.trim() {
            "" => BLANK_EXPRESSION,
            trimmed => trimmed,
        };

        match Expression::parse(text) {
            Ok(expression) => {
                tracing::debug!(
                    "Plotting `{}` with parameters {:?}",
                    expression,
                    expression.parameters()
                );
                self.params = ParameterSet::for_expression(&expression, self.settings.slider_range());
                self.expression = expression;
                self.rejected = None;
                if matches!(self.state, InteractionState::EditingSlider(_)) {
                    self.state = InteractionState::Idle;
                }
                self.resample();
            }
            Err(e) => {
                tracing::warn!("Rejected function `{}`: {}", text, e);
                self.rejected = Some((text.to_string(), e));
            }
        }
        true
    }

    // ==================== View ====================

    fn set_mouse_mode(&mut self, mode: MouseMode) -> bool {
        if mode == self.mouse_mode {
            return false;
        }
        tracing::debug!("Mouse mode: {}", mode.label());
        self.mouse_mode = mode;
        self.state = InteractionState::Idle;
        // Sketches do not survive a mode change
        self.resample();
        true
    }

    fn reset_view(&mut self) -> bool {
        self.viewport = self
            .settings
            .default_viewport((self.viewport.width, self.viewport.height));
        if let InteractionState::Panning { .. } = self.state {
            self.state = InteractionState::Idle;
        }
        self.resample();
        true
    }

    fn resize(&mut self, width: f64, height: f64) -> bool {
        let mut resized = self.viewport;
        resized.set_size(width, height);
        if resized == self.viewport {
            return false;
        }
        self.viewport = resized;
        self.resample();
        true
    }

    fn resample(&mut self) {
        let sampler = Sampler::new(
            &self.expression,
            &self.params,
            &self.viewport,
            self.settings.effective_samples_per_pixel(),
        );
        self.buffer.refill(&sampler);
        tracing::trace!(
            "Resampled {} points ({} defined) over [{}, {}]",
            self.buffer.len(),
            self.buffer.defined_count(),
            self.viewport.x_min,
            self.viewport.x_max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(source: &str) -> Controller {
        let view = Viewport::new((-1.0, 1.0), (-1.0, 1.0), (200.0, 100.0));
        Controller::with_expression(PlotSettings::default(), view, source)
    }

    #[test]
    fn test_starts_idle_and_sampled() {
        let c = controller("x^2");
        assert_eq!(c.state(), &InteractionState::Idle);
        assert_eq!(c.buffer().len(), 200);
        assert!(c.last_error().is_none());
    }

    #[test]
    fn test_invalid_startup_expression_falls_back_to_zero() {
        let c = controller("sin(");
        assert_eq!(c.expression(), &Expression::zero());
        assert!(c.last_error().is_some());
    }

    #[test]
    fn test_pan_cycle() {
        let mut c = controller("x");
        let before = *c.viewport();

        assert!(!c.handle(InputEvent::PointerDown { pos: [100.0, 50.0] }));
        assert!(matches!(c.state(), InteractionState::Panning { .. }));

        assert!(c.handle(InputEvent::PointerMove { pos: [120.0, 50.0] }));
        // 20px right at 0.01 units per pixel
        assert!((c.viewport().x_min - (before.x_min - 0.2)).abs() < 1e-12);

        // Moving back to the anchor restores the view exactly
        assert!(c.handle(InputEvent::PointerMove { pos: [100.0, 50.0] }));
        assert_eq!(c.viewport(), &before);

        c.handle(InputEvent::PointerUp);
        assert_eq!(c.state(), &InteractionState::Idle);
        assert!(!c.handle(InputEvent::PointerMove { pos: [0.0, 0.0] }));
    }

    #[test]
    fn test_wheel_zooms_around_cursor() {
        let mut c = controller("x");
        let pos = [50.0, 25.0];
        let fixed = c.viewport().to_data(pos);

        assert!(c.handle(InputEvent::Wheel { notches: 1.0, pos }));
        assert!(c.viewport().x_span() < 2.0);
        let after = c.viewport().to_data(pos);
        assert!((fixed[0] - after[0]).abs() < 1e-12);
        assert!((fixed[1] - after[1]).abs() < 1e-12);

        assert!(c.handle(InputEvent::Wheel { notches: -1.0, pos }));
        assert!((c.viewport().x_span() - 2.0).abs() < 1e-12);
        assert!(!c.handle(InputEvent::Wheel { notches: 0.0, pos }));
    }

    #[test]
    fn test_slider_cycle() {
        let mut c = controller("a*x");
        assert_eq!(c.parameters().value("a"), Some(1.0));

        assert!(!c.handle(InputEvent::SliderGrab("a".to_string())));
        assert_eq!(c.state(), &InteractionState::EditingSlider("a".to_string()));

        assert!(c.handle(InputEvent::SliderChange {
            name: "a".to_string(),
            value: 2.0,
        }));
        let last = c.buffer().samples().last().copied().unwrap();
        assert!((last.y.unwrap() - 2.0).abs() < 1e-12);

        // Same value again needs no redraw
        assert!(!c.handle(InputEvent::SliderChange {
            name: "a".to_string(),
            value: 2.0,
        }));

        // Zoom is ignored while the slider is held
        let view = *c.viewport();
        assert!(!c.handle(InputEvent::Wheel { notches: 1.0, pos: [0.0, 0.0] }));
        assert_eq!(c.viewport(), &view);

        c.handle(InputEvent::SliderRelease);
        assert_eq!(c.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_grab_unknown_slider() {
        let mut c = controller("x");
        assert!(!c.handle(InputEvent::SliderGrab("a".to_string())));
        assert_eq!(c.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_failed_submit_keeps_plot() {
        let mut c = controller("a*x");
        c.handle(InputEvent::SliderChange {
            name: "a".to_string(),
            value: 3.0,
        });
        let expression = c.expression().clone();
        let buffer = c.buffer().clone();

        assert!(c.handle(InputEvent::SubmitText("a*x +".to_string())));
        assert_eq!(c.expression(), &expression);
        assert_eq!(c.buffer(), &buffer);
        assert_eq!(c.parameters().value("a"), Some(3.0));
        assert!(c.last_error().is_some());
        assert_eq!(c.rejected_text(), Some("a*x +"));

        c.handle(InputEvent::SubmitText("x".to_string()));
        assert!(c.last_error().is_none());
        assert!(c.parameters().is_empty());
    }

    #[test]
    fn test_blank_submit_plots_zero() {
        let mut c = controller("x");
        c.handle(InputEvent::SubmitText("   ".to_string()));
        assert_eq!(c.expression().source(), "zero(x)");
        assert!(c.buffer().samples().iter().all(|s| s.y == Some(0.0)));
    }

    #[test]
    fn test_evaluation_warning_when_nothing_is_defined() {
        let mut c = controller("x^2");
        assert_eq!(c.evaluation_warning(), None);

        assert!(c.handle(InputEvent::SubmitText("sqrt(-1 - x^2)".to_string())));
        assert!(c.last_error().is_none());
        assert_eq!(c.buffer().defined_count(), 0);
        assert_eq!(
            c.evaluation_warning().as_deref(),
            Some("Undefined across the visible domain: sqrt is undefined for this argument")
        );

        // Partly defined functions draw without a warning
        assert!(c.handle(InputEvent::SubmitText("sqrt(x)".to_string())));
        assert_eq!(c.evaluation_warning(), None);
    }

    #[test]
    fn test_stored_sample_density_is_bounded() {
        let settings = PlotSettings {
            samples_per_pixel: 1e7,
            ..PlotSettings::default()
        };
        let view = Viewport::new((-1.0, 1.0), (-1.0, 1.0), (800.0, 600.0));
        let c = Controller::with_expression(settings, view, "x");
        assert_eq!(c.buffer().len(), 800 * 16);
    }

    #[test]
    fn test_sketching() {
        let mut c = controller("zero(x)");
        assert!(c.handle(InputEvent::SetMouseMode(MouseMode::EditFunction)));

        // Top edge of the plot area is y = 1
        assert!(c.handle(InputEvent::PointerDown { pos: [100.0, 0.0] }));
        assert_eq!(c.state(), &InteractionState::Sketching);
        assert_eq!(c.buffer().samples().iter().filter(|s| s.y == Some(1.0)).count(), 5);

        c.handle(InputEvent::PointerUp);
        assert_eq!(c.state(), &InteractionState::Idle);

        // Any resample drops the sketch
        c.handle(InputEvent::ResetView);
        assert!(c.buffer().samples().iter().all(|s| s.y == Some(0.0)));
    }

    #[test]
    fn test_reset_view_and_resize() {
        let mut c = controller("x");
        c.handle(InputEvent::Wheel { notches: 3.0, pos: [10.0, 10.0] });
        assert!(c.handle(InputEvent::ResetView));
        assert_eq!(c.viewport().x_min, -std::f64::consts::PI);
        assert_eq!(c.viewport().width, 200.0);

        assert!(c.handle(InputEvent::Resize { width: 300.0, height: 100.0 }));
        assert_eq!(c.buffer().len(), 300);
        assert!(!c.handle(InputEvent::Resize { width: 300.0, height: 100.0 }));
    }

    #[test]
    fn test_title_with_values() {
        let c = controller("a*sin(x)");
        assert_eq!(c.title(false), "f(x) = a * sin(x)");
        assert_eq!(c.title(true), "f(x) = 1 * sin(x)");
    }
}
