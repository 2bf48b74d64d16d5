//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use plotty_rs::Viewport;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert every bound of two viewports is approximately equal
pub fn assert_viewport_eq(a: &Viewport, b: &Viewport, epsilon: f64) {
    assert!(
        a.approx_eq(b, epsilon),
        "Expected {:?} to be approximately equal to {:?} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
