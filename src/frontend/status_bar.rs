//! Status bar panel: bottom bar showing cursor position, visible domain and
//! sample statistics.

use egui::{Color32, RichText, Ui};

use crate::controller::{Controller, InteractionState, MouseMode};

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub controller: &'a Controller,
    /// Data coordinates under the pointer, if it is over the plot
    pub cursor: Option<[f64; 2]>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    let controller = ctx.controller;
    let view = controller.viewport();
    let buffer = controller.buffer();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Mouse mode ===
        let mode_color = match controller.mouse_mode() {
            MouseMode::MovePlot => Color32::GRAY,
            MouseMode::EditFunction => Color32::from_rgb(255, 180, 80),
        };
        ui.colored_label(mode_color, "●");
        ui.label(RichText::new(controller.mouse_mode().label()).small());

        ui.separator();

        // === Cursor ===
        let cursor_text = match ctx.cursor {
            Some([x, y]) => format!("x = {:.4}, y = {:.4}", x, y),
            None => "x = -, y = -".to_string(),
        };
        ui.label(RichText::new(cursor_text).small().monospace());

        ui.separator();

        // === Visible domain ===
        ui.label(
            RichText::new(format!("Domain: [{:.3}, {:.3}]", view.x_min, view.x_max)).small(),
        );

        ui.separator();

        // === Samples ===
        let undefined = buffer.len() - buffer.defined_count();
        ui.label(RichText::new(format!("Samples: {}", buffer.len())).small());
        if undefined > 0 {
            ui.colored_label(
                Color32::LIGHT_RED,
                RichText::new(format!("Undefined: {}", undefined)).small(),
            );
        }

        // === Interaction (right-aligned) ===
        let activity = match controller.state() {
            InteractionState::Idle => None,
            InteractionState::Panning { .. } => Some("Panning".to_string()),
            InteractionState::EditingSlider(name) => Some(format!("Adjusting {}", name)),
            InteractionState::Sketching => Some("Sketching".to_string()),
        };
        if let Some(activity) = activity {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(activity).small().weak());
            });
        }
    });
}
