//! # plotty-rs: Interactive Function Plotter
//!
//! Plots a function of `x` typed by the user, with one slider per parameter
//! and pan/zoom on the plot.
//!
//! ## Architecture
//!
//! - **Expressions** (`expr`): a pure parser producing an immutable tree,
//!   and an evaluator that reports undefined points instead of failing
//! - **Parameters** (`params`): slider-controlled values of every identifier
//!   other than `x`
//! - **Sampling** (`sampler`): pixel-aligned evaluation over the visible domain
//! - **View** (`viewport`): data to pixel mapping with pan and zoom
//! - **Controller** (`controller`): state machine turning input events into
//!   model updates and resampling
//! - **Frontend**: eframe/egui window with egui_plot for the curve
//!
//! Everything runs on the UI thread; a state change resamples synchronously.
//!
//! ## Configuration
//!
//! Application state (last function, view, preferences) and optional user
//! presets are stored in the platform-appropriate data directory under
//! `dev.plotty.plotty-rs`:
//!
//! - **Linux**: `~/.local/share/dev.plotty.plotty-rs/`
//! - **macOS**: `~/Library/Application Support/dev.plotty.plotty-rs/`
//! - **Windows**: `%APPDATA%\dev.plotty.plotty-rs\`
//!
//! ## Example
//!
//! ```
//! use plotty_rs::{Expression, Undefined};
//!
//! let expr = Expression::parse("x^2").unwrap();
//! assert_eq!(expr.eval(3.0, &()), Ok(9.0));
//!
//! let expr = Expression::parse("1/x").unwrap();
//! assert_eq!(expr.eval(0.0, &()), Err(Undefined::DivisionByZero));
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod expr;
pub mod frontend;
pub mod params;
pub mod presets;
pub mod sampler;
pub mod viewport;

// Re-export commonly used types
pub use app::PlottyApp;
pub use config::{AppState, PlotSettings};
pub use controller::{Controller, InputEvent, InteractionState, MouseMode};
pub use error::{PlottyError, Result};
pub use expr::{Expression, ParseError, ParseErrorKind, Undefined};
pub use params::{ParameterSet, SliderRange};
pub use presets::{Preset, PresetCatalog};
pub use sampler::{Sample, SampleBuffer, Sampler};
pub use viewport::Viewport;
