//! Function presets offered in the preset dropdown
//!
//! The built-in list covers the usual families (trigonometric, hyperbolic,
//! exponential, polynomial, gaussian). Users can add their own or override a
//! built-in one by name in `presets.toml` in the app data directory:
//!
//! ```toml
//! [[preset]]
//! name = "damped"
//! expression = "a*exp(-g*x)*cos(k*x)"
//! ```

use crate::error::{PlottyError, Result, ResultExt};
use crate::expr;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A preset compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPreset {
    pub name: &'static str,
    pub expression: &'static str,
}

pub const BUILTIN_PRESETS: &[BuiltinPreset] = &[
    BuiltinPreset { name: "sin", expression: "a*sin(k*(x - phi)) + c" },
    BuiltinPreset { name: "cos", expression: "a*cos(k*(x - phi)) + c" },
    BuiltinPreset { name: "tan", expression: "a*tan(k*(x - phi)) + c" },
    BuiltinPreset { name: "arcsin", expression: "a*arcsin(k*(x - phi)) + c" },
    BuiltinPreset { name: "arccos", expression: "a*arccos(k*(x - phi)) + c" },
    BuiltinPreset { name: "arctan", expression: "a*arctan(k*(x - phi)) + c" },
    BuiltinPreset { name: "sinh", expression: "a*sinh(k*(x - b)) + c" },
    BuiltinPreset { name: "cosh", expression: "a*cosh(k*(x - b)) + c" },
    BuiltinPreset { name: "tanh", expression: "a*tanh(k*x) + c" },
    BuiltinPreset { name: "exp", expression: "c1*exp(-x*k1) + c2*exp(x*k2) + c" },
    BuiltinPreset { name: "log", expression: "a*log(k*(x - b)) + c" },
    BuiltinPreset { name: "power", expression: "a**x + c" },
    BuiltinPreset { name: "quadratic", expression: "a*x**2 + b*x + c" },
    BuiltinPreset {
        name: "gaussian",
        expression: "a*exp(-((x-u)/sigma)**2/2)/(sqrt(pi*sigma**2))",
    },
    BuiltinPreset {
        name: "wavepacket",
        expression: "a*sin(2*pi*k*x)*exp(-((x-mu)/sigma)**2/2)/(sqrt(pi*sigma**2))",
    },
];

/// A named function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub expression: String,
}

impl From<&BuiltinPreset> for Preset {
    fn from(preset: &BuiltinPreset) -> Self {
        Self {
            name: preset.name.to_string(),
            expression: preset.expression.to_string(),
        }
    }
}

/// On-disk layout of `presets.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(default, rename = "preset")]
    presets: Vec<Preset>,
}

/// Parse the contents of a presets file
pub fn parse_presets(content: &str) -> Result<Vec<Preset>> {
    let file: PresetFile = toml::from_str(content)?;
    Ok(file.presets)
}

/// Ordered list of presets shown in the dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    pub fn builtin() -> Self {
        Self {
            presets: BUILTIN_PRESETS.iter().map(Preset::from).collect(),
        }
    }

    /// Built-in presets extended with those in `path`, if it exists
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut catalog = Self::builtin();
        if !path.exists() {
            return Ok(catalog);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presets file {:?}", path))?;
        let user = parse_presets(&content)
            .with_context(|| format!("Failed to parse presets file {:?}", path))?;
        let added = catalog.merge(user);
        tracing::info!("Loaded {} user preset(s) from {:?}", added, path);
        Ok(catalog)
    }

    /// Load user presets from the app data directory, falling back to the built-ins
    pub fn load_or_builtin() -> Self {
        let Some(path) = crate::config::presets_path() else {
            return Self::builtin();
        };
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring user presets: {}", e);
            Self::builtin()
        })
    }

    /// Add user presets, replacing built-ins with the same name.
    ///
    /// Presets whose expression does not parse are skipped. Returns the
    /// number of presets taken.
    pub fn merge(&mut self, presets: Vec<Preset>) -> usize {
        let mut taken = 0;
        for preset in presets {
            if let Err(e) = validate(&preset) {
                tracing::warn!("{}", e);
                continue;
            }
            match self.presets.iter_mut().find(|p| p.name == preset.name) {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
            taken += 1;
        }
        taken
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn validate(preset: &Preset) -> Result<()> {
    if preset.name.trim().is_empty() {
        return Err(PlottyError::Preset("preset with an empty name".to_string()));
    }
    expr::parse(&preset.expression)
        .map(|_| ())
        .with_context(|| format!("Preset `{}` is invalid", preset.name))
}
