//! Plot canvas using egui_plot
//!
//! egui_plot's own drag, zoom and scroll handling is switched off. The canvas
//! forces the plot bounds to the controller's viewport every frame and turns
//! pointer and wheel input into [`InputEvent`]s, so all view changes go
//! through the same state machine.

use crate::config::UiPreferences;
use crate::controller::{Controller, InputEvent};
use egui::{Color32, PointerButton, Pos2, Rect, RichText, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

/// Scroll distance in points reported by egui for one wheel notch
const POINTS_PER_NOTCH: f64 = 50.0;

/// Curve color
const CURVE_COLOR: Color32 = Color32::from_rgb(80, 160, 255);

/// What the canvas collected this frame
#[derive(Debug, Default)]
pub struct CanvasOutput {
    pub events: Vec<InputEvent>,
    /// Data coordinates under the pointer
    pub cursor: Option<[f64; 2]>,
}

/// Plot canvas configuration
#[derive(Debug, Clone)]
pub struct PlotCanvas {
    pub show_grid: bool,
    pub line_width: f32,
    pub color: Color32,
}

impl Default for PlotCanvas {
    fn default() -> Self {
        Self {
            show_grid: true,
            line_width: 2.0,
            color: CURVE_COLOR,
        }
    }
}

impl PlotCanvas {
    pub fn from_preferences(prefs: &UiPreferences) -> Self {
        Self {
            show_grid: prefs.show_grid,
            line_width: prefs.line_width,
            ..Default::default()
        }
    }

    /// Draw the title and the curve, and collect input.
    ///
    /// `show_values` backs the context menu toggle for parameter values in
    /// the title.
    pub fn render(&self, ui: &mut Ui, controller: &Controller, show_values: &mut bool) -> CanvasOutput {
        let mut output = CanvasOutput::default();

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(controller.title(*show_values)).heading().monospace());
        });

        let view = *controller.viewport();
        let segments = controller.buffer().segments();

        let plot = Plot::new("function_plot")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .auto_bounds([false, false])
            .show_axes(true)
            .show_grid(self.show_grid)
            .x_axis_label("x")
            .y_axis_label("f(x)");

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.x_min, view.y_min],
                [view.x_max, view.y_max],
            ));

            for segment in segments {
                let line = Line::new("f(x)", PlotPoints::from(segment))
                    .color(self.color)
                    .width(self.line_width);
                plot_ui.line(line);
            }
        });

        let frame = *response.transform.frame();
        let plot_response = &response.response;

        let size = [frame.width() as f64, frame.height() as f64];
        if size[0] > 0.0 && size[1] > 0.0 && (size[0] != view.width || size[1] != view.height) {
            output.events.push(InputEvent::Resize {
                width: size[0],
                height: size[1],
            });
        }

        // Primary drag
        if plot_response.drag_started_by(PointerButton::Primary) {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| plot_response.interact_pointer_pos());
            if let Some(pos) = origin {
                output.events.push(InputEvent::PointerDown {
                    pos: to_local(frame, pos),
                });
            }
        }
        if plot_response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = plot_response.interact_pointer_pos() {
                output.events.push(InputEvent::PointerMove {
                    pos: to_local(frame, pos),
                });
            }
        }
        if plot_response.drag_stopped_by(PointerButton::Primary) {
            output.events.push(InputEvent::PointerUp);
        }

        // Wheel zoom around the cursor
        if let Some(hover) = plot_response.hover_pos() {
            let local = to_local(frame, hover);
            output.cursor = Some(view.to_data(local));

            let scroll = ui.input(|i| i.raw_scroll_delta);
            if scroll.y != 0.0 {
                output.events.push(InputEvent::Wheel {
                    notches: scroll.y as f64 / POINTS_PER_NOTCH,
                    pos: local,
                });
            }
        }

        plot_response.context_menu(|ui| {
            if ui.button("Reset view").clicked() {
                output.events.push(InputEvent::ResetView);
                ui.close();
            }
            ui.checkbox(show_values, "Show parameter values in title");
        });

        output
    }
}

/// Pixel position relative to the top-left corner of the plot area
fn to_local(frame: Rect, pos: Pos2) -> [f64; 2] {
    [(pos.x - frame.min.x) as f64, (pos.y - frame.min.y) as f64]
}
