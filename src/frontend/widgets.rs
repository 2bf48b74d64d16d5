//! Custom widgets for the plotty-rs UI
//!
//! # Widgets
//!
//! - [`ParameterSlider`] - Labelled slider for one expression parameter
//! - [`ParseErrorLabel`] - Function text with the offending part highlighted
//! - [`LabeledSeparator`] - Horizontal separator with centered label

use crate::expr::ParseError;
use crate::params::Parameter;
use egui::text::LayoutJob;
use egui::{Color32, FontId, Response, RichText, TextFormat, Ui, Widget};

/// Slider label, e.g. `a = 1.00`
pub fn slider_label(name: &str, value: f64) -> String {
    format!("{} = {:.2}", name, value)
}

/// What happened to a [`ParameterSlider`] this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliderOutcome {
    /// The user started dragging the handle
    pub grabbed: bool,
    /// New value, if it was moved
    pub changed: Option<f64>,
    /// The user let go of the handle
    pub released: bool,
}

/// A slider bound to a parameter's range and step
pub struct ParameterSlider<'a> {
    parameter: &'a Parameter,
    width: Option<f32>,
}

impl<'a> ParameterSlider<'a> {
    pub fn new(parameter: &'a Parameter) -> Self {
        Self {
            parameter,
            width: None,
        }
    }

    /// Width of the slider rail in points
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Show the label and slider. The parameter itself is not modified.
    pub fn show(self, ui: &mut Ui) -> SliderOutcome {
        let range = self.parameter.range;
        let mut value = self.parameter.value;

        let response = ui
            .vertical(|ui| {
                ui.label(RichText::new(slider_label(&self.parameter.name, value)).monospace());
                if let Some(width) = self.width {
                    ui.spacing_mut().slider_width = width;
                }
                ui.add(
                    egui::Slider::new(&mut value, range.min..=range.max)
                        .step_by(range.step)
                        .show_value(false),
                )
            })
            .inner;

        SliderOutcome {
            grabbed: response.drag_started(),
            changed: response.changed().then_some(value),
            released: response.drag_stopped(),
        }
    }
}

/// Inline display of a rejected function
pub struct ParseErrorLabel<'a> {
    source: &'a str,
    error: &'a ParseError,
}

impl<'a> ParseErrorLabel<'a> {
    pub fn new(source: &'a str, error: &'a ParseError) -> Self {
        Self { source, error }
    }

    fn highlighted(&self, ui: &Ui) -> LayoutJob {
        let font = FontId::monospace(12.0);
        let normal = TextFormat {
            font_id: font.clone(),
            color: ui.visuals().text_color(),
            ..Default::default()
        };
        let marked = TextFormat {
            font_id: font,
            color: Color32::WHITE,
            background: Color32::from_rgb(160, 40, 40),
            ..Default::default()
        };

        let (before, offending, after) = split_at_span(self.source, &self.error.span);
        let mut job = LayoutJob::default();
        job.append(before, 0.0, normal.clone());
        // Errors at the end of input point past the text
        job.append(if offending.is_empty() { " " } else { offending }, 0.0, marked);
        job.append(after, 0.0, normal);
        job
    }
}

impl Widget for ParseErrorLabel<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            let job = self.highlighted(ui);
            ui.label(job);
            ui.colored_label(Color32::LIGHT_RED, RichText::new(self.error.to_string()).small());
        })
        .response
    }
}

/// Split `source` around `span`, tolerating spans that do not fit the text
fn split_at_span<'s>(source: &'s str, span: &std::ops::Range<usize>) -> (&'s str, &'s str, &'s str) {
    let start = span.start.min(source.len());
    let end = span.end.clamp(start, source.len());
    match (source.get(..start), source.get(start..end), source.get(end..)) {
        (Some(before), Some(offending), Some(after)) => (before, offending, after),
        _ => (source, "", ""),
    }
}

/// A horizontal separator with a label
pub struct LabeledSeparator {
    label: String,
}

impl LabeledSeparator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Widget for LabeledSeparator {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.separator();
            ui.label(&self.label);
            ui.separator();
        })
        .response
    }
}
