//! Frontend module for egui UI
//!
//! The window has a side panel with the function controls and sliders, the
//! plot canvas in the centre and a status bar at the bottom. Every panel
//! reports user input as [`InputEvent`]s which [`PlottyApp`] forwards to the
//! [`Controller`] once per frame.
//!
//! # Main Types
//!
//! - [`PlottyApp`] - Main application state implementing [`eframe::App`]
//! - [`PlotCanvas`] - Plot rendering with egui_plot
//!
//! # Submodules
//!
//! - `panels` - Function entry and parameter sliders
//! - `plot` - Plot canvas
//! - `status_bar` - Cursor, domain and sample statistics
//! - `widgets` - Custom UI widgets

mod panels;
mod plot;
pub mod status_bar;
pub mod widgets;

pub use panels::*;
pub use plot::{CanvasOutput, PlotCanvas};
pub use widgets::*;

use crate::config::AppState;
use crate::controller::{Controller, InputEvent};
use crate::presets::PresetCatalog;
use egui::Key;
use status_bar::{render_status_bar, StatusBarContext};

/// Main application state
pub struct PlottyApp {
    controller: Controller,
    presets: PresetCatalog,
    app_state: AppState,
    canvas: PlotCanvas,
    /// Contents of the function entry box
    entry: String,
    /// Data coordinates under the pointer in the last frame
    cursor: Option<[f64; 2]>,
}

impl PlottyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, app_state: AppState, presets: PresetCatalog) -> Self {
        let fonts = egui::FontDefinitions::default();
        cc.egui_ctx.set_fonts(fonts);

        let app = Self::from_state(app_state, presets);
        tracing::info!("Plotting `{}`", app.controller.expression());
        app
    }

    /// Build the application without a window
    pub fn from_state(app_state: AppState, presets: PresetCatalog) -> Self {
        let settings = app_state.plot.clone();
        let viewport = app_state
            .startup_viewport()
            .unwrap_or_else(|| settings.default_viewport((800.0, 600.0)));
        let entry = app_state.startup_expression().to_string();

        let mut controller = Controller::with_expression(settings, viewport, &entry);
        controller.handle(InputEvent::SetMouseMode(app_state.mouse_mode));

        Self {
            controller,
            presets,
            canvas: PlotCanvas::from_preferences(&app_state.ui_preferences),
            app_state,
            entry,
            cursor: None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Forward events to the controller. Returns whether anything needs redrawing.
    pub fn dispatch(&mut self, events: impl IntoIterator<Item = InputEvent>) -> bool {
        let mut redraw = false;
        for event in events {
            redraw |= self.controller.handle(event);
        }
        redraw
    }

    /// Copy the session into the persisted state
    fn sync_app_state(&mut self) {
        self.app_state.last_expression = Some(self.controller.expression().source().to_string());
        self.app_state.last_viewport = Some(*self.controller.viewport());
        self.app_state.mouse_mode = self.controller.mouse_mode();
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if ctx.wants_keyboard_input() {
            return events;
        }
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                events.push(InputEvent::ResetView);
            }
        });
        events
    }
}

impl eframe::App for PlottyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = self.handle_keyboard_shortcuts(ctx);

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("View", |ui| {
                    if ui.button("Reset view").clicked() {
                        events.push(InputEvent::ResetView);
                        ui.close();
                    }
                    ui.checkbox(
                        &mut self.app_state.ui_preferences.show_parameter_values,
                        "Show parameter values in title",
                    );
                    ui.checkbox(&mut self.app_state.ui_preferences.show_grid, "Show grid");
                    if ui
                        .checkbox(&mut self.app_state.ui_preferences.dark_mode, "Dark mode")
                        .changed()
                    {
                        if self.app_state.ui_preferences.dark_mode {
                            ctx.set_visuals(egui::Visuals::dark());
                        } else {
                            ctx.set_visuals(egui::Visuals::light());
                        }
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(
                ui,
                &StatusBarContext {
                    controller: &self.controller,
                    cursor: self.cursor,
                },
            );
        });

        // Controls
        let panel_width = self.app_state.ui_preferences.control_panel_width;
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(panel_width)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                events.extend(FunctionPanel::render(
                    ui,
                    &self.controller,
                    &self.presets,
                    &mut self.entry,
                ));
                ui.add_space(8.0);
                let slider_width = (ui.available_width() - 16.0).max(80.0);
                events.extend(ParameterPanel::render(
                    ui,
                    self.controller.parameters(),
                    slider_width,
                ));
            });

        // Plot
        self.canvas.show_grid = self.app_state.ui_preferences.show_grid;
        egui::CentralPanel::default().show(ctx, |ui| {
            let output = self.canvas.render(
                ui,
                &self.controller,
                &mut self.app_state.ui_preferences.show_parameter_values,
            );
            self.cursor = output.cursor;
            events.extend(output.events);
        });

        if self.dispatch(events) {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.sync_app_state();

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
        tracing::info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MouseMode;

    #[test]
    fn test_from_default_state() {
        let app = PlottyApp::from_state(AppState::default(), PresetCatalog::builtin());
        assert_eq!(app.entry, crate::config::DEFAULT_EXPRESSION);
        assert_eq!(app.controller().parameters().len(), 4);
        assert!(app.controller().last_error().is_none());
    }

    #[test]
    fn test_restores_session() {
        let mut state = AppState::default();
        state.last_expression = Some("x^3".to_string());
        state.mouse_mode = MouseMode::EditFunction;
        let app = PlottyApp::from_state(state, PresetCatalog::builtin());
        assert_eq!(app.controller().expression().source(), "x^3");
        assert_eq!(app.controller().mouse_mode(), MouseMode::EditFunction);
    }

    #[test]
    fn test_sync_app_state() {
        let mut app = PlottyApp::from_state(AppState::default(), PresetCatalog::builtin());
        assert!(app.dispatch([
            InputEvent::SubmitText("cos(x)".to_string()),
            InputEvent::Wheel {
                notches: 1.0,
                pos: [0.0, 0.0],
            },
        ]));
        app.sync_app_state();
        assert_eq!(app.app_state.last_expression.as_deref(), Some("cos(x)"));
        assert_eq!(app.app_state.last_viewport, Some(*app.controller().viewport()));
    }
}
