//! Pipeline configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file,
//! then command-line overrides. [`IconConfig::validate`] runs last.

use crate::color::{parse_color, ORANGE, WHITE};
use crate::compose::OutputTarget;
use crate::error::{IconError, Result};
use crate::gradient::GradientSpec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SIZE: u32 = 1080;
pub const DEFAULT_STOP: f64 = 0.7;
pub const DEFAULT_FOREGROUND: &str = "zazaki_academy.icon/Assets/Logo-compact.png";

/// Everything one run of the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct IconConfig {
    /// Directory that relative foreground and output paths resolve against.
    pub root: PathBuf,
    pub gradient: GradientSpec,
    pub foreground: PathBuf,
    pub outputs: Vec<OutputTarget>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            gradient: GradientSpec {
                width: DEFAULT_SIZE,
                height: DEFAULT_SIZE,
                start: WHITE,
                end: ORANGE,
                stop: DEFAULT_STOP,
            },
            foreground: PathBuf::from(DEFAULT_FOREGROUND),
            outputs: default_outputs(),
        }
    }
}

pub fn default_outputs() -> Vec<OutputTarget> {
    vec![
        OutputTarget::new("src/app/icon.png"),
        OutputTarget::new("src/app/apple-icon.png"),
        OutputTarget::new("public/icon-512x512.png"),
        OutputTarget::new("public/icon-192x192.png").with_size(192),
        OutputTarget::new("public/apple-icon.png"),
    ]
}

/// On-disk JSON layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub gradient: Option<GradientFile>,
    pub foreground: Option<PathBuf>,
    pub outputs: Option<Vec<OutputFile>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientFile {
    pub start: Option<String>,
    pub end: Option<String>,
    pub stop: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputFile {
    pub path: PathBuf,
    pub size: Option<u32>,
}

/// Command-line overrides, applied after the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub foreground: Option<PathBuf>,
    pub start_color: Option<String>,
    pub end_color: Option<String>,
    pub stop: Option<f64>,
    pub size: Option<u32>,
}

impl ConfigFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| IconError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            IconError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
            .map_err(|e| IconError::Config(format!("{}: {e}", path.display())))
    }
}

impl IconConfig {
    pub fn apply_file(mut self, file: ConfigFile) -> Result<Self> {
        if let Some(width) = file.width {
            self.gradient.width = width;
        }
        if let Some(height) = file.height {
            self.gradient.height = height;
        }
        if let Some(gradient) = file.gradient {
            if let Some(start) = gradient.start {
                self.gradient.start = parse_color(&start)?;
            }
            if let Some(end) = gradient.end {
                self.gradient.end = parse_color(&end)?;
            }
            if let Some(stop) = gradient.stop {
                self.gradient.stop = stop;
            }
        }
        if let Some(foreground) = file.foreground {
            self.foreground = foreground;
        }
        if let Some(outputs) = file.outputs {
            self.outputs = outputs
                .into_iter()
                .map(|o| OutputTarget {
                    path: o.path,
                    size: o.size,
                })
                .collect();
        }
        Ok(self)
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(root) = overrides.root {
            self.root = root;
        }
        if let Some(foreground) = overrides.foreground {
            self.foreground = foreground;
        }
        if let Some(start) = overrides.start_color {
            self.gradient.start = parse_color(&start)?;
        }
        if let Some(end) = overrides.end_color {
            self.gradient.end = parse_color(&end)?;
        }
        if let Some(stop) = overrides.stop {
            self.gradient.stop = stop;
        }
        if let Some(size) = overrides.size {
            self.gradient.width = size;
            self.gradient.height = size;
        }
        Ok(self)
    }

    pub fn validate(self) -> Result<Self> {
        let gradient = &self.gradient;
        if gradient.width == 0 || gradient.height == 0 {
            return Err(IconError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                gradient.width, gradient.height
            )));
        }
        if !(gradient.stop > 0.0 && gradient.stop <= 1.0) {
            return Err(IconError::Config(format!(
                "gradient stop must be in (0, 1], got {}",
                gradient.stop
            )));
        }
        if self.outputs.is_empty() {
            return Err(IconError::Config("no output targets".to_string()));
        }
        if let Some(target) = self.outputs.iter().find(|t| t.size == Some(0)) {
            return Err(IconError::Config(format!(
                "output {} has a zero size",
                target.path.display()
            )));
        }
        Ok(self)
    }

    /// Foreground path with `root` applied.
    pub fn foreground_path(&self) -> PathBuf {
        self.root.join(&self.foreground)
    }
}
