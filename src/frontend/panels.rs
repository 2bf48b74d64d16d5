//! Panel components for the frontend UI
//!
//! Panels draw part of the window and report what the user did as
//! [`InputEvent`]s; they never change the model directly.
//!
//! # Panels
//!
//! - [`FunctionPanel`] - Mouse mode, presets and the function entry box
//! - [`ParameterPanel`] - One slider per parameter

use crate::controller::{Controller, InputEvent, MouseMode};
use crate::frontend::widgets::{LabeledSeparator, ParameterSlider, ParseErrorLabel};
use crate::params::ParameterSet;
use crate::presets::PresetCatalog;
use egui::{Key, RichText, Ui};

/// Renders the function entry controls
pub struct FunctionPanel;

impl FunctionPanel {
    /// Render the panel. `entry` is the text box contents, kept by the caller
    /// between frames.
    pub fn render(
        ui: &mut Ui,
        controller: &Controller,
        presets: &PresetCatalog,
        entry: &mut String,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        egui::Grid::new("function_panel_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Mouse:");
                let mut mode = controller.mouse_mode();
                egui::ComboBox::from_id_salt("function_panel_mouse_mode")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        for option in MouseMode::ALL {
                            ui.selectable_value(&mut mode, option, option.label());
                        }
                    });
                if mode != controller.mouse_mode() {
                    events.push(InputEvent::SetMouseMode(mode));
                }
                ui.end_row();

                ui.label("Preset:");
                egui::ComboBox::from_id_salt("function_panel_preset")
                    .selected_text("Choose…")
                    .show_ui(ui, |ui| {
                        for preset in presets.iter() {
                            if ui
                                .selectable_label(false, preset.name.as_str())
                                .on_hover_text(preset.expression.as_str())
                                .clicked()
                            {
                                entry.clone_from(&preset.expression);
                                events.push(InputEvent::SelectPreset {
                                    name: preset.name.clone(),
                                    expression: preset.expression.clone(),
                                });
                            }
                        }
                    });
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.label("f(x) =");
        ui.horizontal(|ui| {
            let submit_clicked = ui.button("OK").clicked();
            let response = ui.add(
                egui::TextEdit::singleline(entry)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace)
                    .hint_text("e.g. a*sin(k*x) + c"),
            );
            let enter_pressed = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if submit_clicked || enter_pressed {
                events.push(InputEvent::SubmitText(entry.clone()));
            }
        });

        if let (Some(text), Some(error)) = (controller.rejected_text(), controller.last_error()) {
            ui.add_space(2.0);
            ui.add(ParseErrorLabel::new(text, error));
        }
        if let Some(warning) = controller.evaluation_warning() {
            ui.add_space(2.0);
            ui.label(RichText::new(warning).color(ui.visuals().warn_fg_color).small());
        }

        events
    }
}

/// Renders the parameter sliders
pub struct ParameterPanel;

impl ParameterPanel {
    pub fn render(ui: &mut Ui, params: &ParameterSet, slider_width: f32) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ui.add(LabeledSeparator::new("Parameters"));
        if params.is_empty() {
            ui.label(RichText::new("No parameters").weak().italics());
            return events;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for parameter in params.iter() {
                    let outcome = ParameterSlider::new(parameter)
                        .with_width(slider_width)
                        .show(ui);
                    if outcome.grabbed {
                        events.push(InputEvent::SliderGrab(parameter.name.clone()));
                    }
                    if let Some(value) = outcome.changed {
                        events.push(InputEvent::SliderChange {
                            name: parameter.name.clone(),
                            value,
                        });
                    }
                    if outcome.released {
                        events.push(InputEvent::SliderRelease);
                    }
                    ui.add_space(4.0);
                }
            });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotSettings;
    use crate::viewport::Viewport;

    fn run_panel<R>(mut add_contents: impl FnMut(&mut Ui) -> R) -> R {
        let ctx = egui::Context::default();
        let mut result = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                result = Some(add_contents(ui));
            });
        });
        result.unwrap()
    }

    #[test]
    fn test_function_panel_idle_frame_emits_nothing() {
        let controller = Controller::with_expression(PlotSettings::default(), Viewport::default(), "sin(");
        let presets = PresetCatalog::builtin();
        let mut entry = "sin(".to_string();
        let events = run_panel(|ui| FunctionPanel::render(ui, &controller, &presets, &mut entry));
        assert!(events.is_empty());
        assert_eq!(entry, "sin(");
    }

    #[test]
    fn test_function_panel_with_undefined_plot() {
        let controller =
            Controller::with_expression(PlotSettings::default(), Viewport::default(), "log(-1 - x^2)");
        assert!(controller.evaluation_warning().is_some());
        let presets = PresetCatalog::builtin();
        let mut entry = "log(-1 - x^2)".to_string();
        let events = run_panel(|ui| FunctionPanel::render(ui, &controller, &presets, &mut entry));
        assert!(events.is_empty());
    }

    #[test]
    fn test_parameter_panel_idle_frame_emits_nothing() {
        let controller =
            Controller::with_expression(PlotSettings::default(), Viewport::default(), "a*x + b");
        let events = run_panel(|ui| ParameterPanel::render(ui, controller.parameters(), 200.0));
        assert!(events.is_empty());
    }
}
