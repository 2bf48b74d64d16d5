//! Test data builders for creating test objects

use plotty_rs::{Controller, PlotSettings, Viewport};

/// Builder for creating test Controllers
pub struct ControllerBuilder {
    expression: String,
    x_range: (f64, f64),
    y_range: (f64, f64),
    size: (f64, f64),
    settings: PlotSettings,
}

impl ControllerBuilder {
    pub fn new(expression: &str) -> Self {
        Self {
            expression: expression.to_string(),
            x_range: (-1.0, 1.0),
            y_range: (-1.0, 1.0),
            size: (200.0, 100.0),
            settings: PlotSettings::default(),
        }
    }

    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    pub fn samples_per_pixel(mut self, density: f64) -> Self {
        self.settings.samples_per_pixel = density;
        self
    }

    pub fn build(self) -> Controller {
        let view = Viewport::new(self.x_range, self.y_range, self.size);
        Controller::with_expression(self.settings, view, &self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_builder() {
        let controller = ControllerBuilder::new("a*x")
            .x_range(0.0, 4.0)
            .size(400.0, 300.0)
            .samples_per_pixel(0.5)
            .build();

        assert_eq!(controller.viewport().x_max, 4.0);
        assert_eq!(controller.buffer().len(), 200);
        assert_eq!(controller.parameters().len(), 1);
    }
}
