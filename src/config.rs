//! Camera and animation parameters, loadable from TOML.

use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_Z: f32 = 2.0;

/// Projection, zoom and spin parameters for a [`Viewer`](crate::state::Viewer).
///
/// Every field has a default, so a partial TOML file only overrides what it
/// names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Projection angle in radians; its cotangent scales X.
    pub fov: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Closest allowed camera distance.
    pub zoom_min: f32,
    /// Farthest allowed camera distance.
    pub zoom_max: f32,
    /// Camera distance change per zoom step.
    pub zoom_step: f32,
    /// Camera distance at startup. When unset, 2.0 pulled into the zoom range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_z: Option<f32>,
    /// Spin angle added on every rendered frame, in radians.
    pub spin_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov: 0.7,
            near: 0.5,
            far: 6.0,
            zoom_min: 1.5,
            zoom_max: 5.0,
            zoom_step: 0.1,
            initial_z: None,
            spin_step: 0.01,
        }
    }
}

impl ViewerConfig {
    /// Load a config from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Camera distance to start from: `initial_z` if set, otherwise the
    /// default distance clamped into `[zoom_min, zoom_max]`.
    ///
    /// Only meaningful on a config that passed [`ViewerConfig::validate`].
    pub fn start_z(&self) -> f32 {
        self.initial_z
            .unwrap_or_else(|| DEFAULT_Z.max(self.zoom_min).min(self.zoom_max))
    }

    /// Checks the preconditions the projection and zoom code rely on.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("fov", self.fov),
            ("near", self.near),
            ("far", self.far),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("zoom_step", self.zoom_step),
            ("initial_z", self.initial_z.unwrap_or(DEFAULT_Z)),
            ("spin_step", self.spin_step),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ViewerError::config(format!("{name} must be finite, got {value}")));
        }

        if self.near <= 0.0 {
            return Err(ViewerError::config(format!(
                "near must be positive, got {}",
                self.near
            )));
        }
        if self.far <= self.near {
            return Err(ViewerError::config(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }

        // cot(fov) must be finite and non-zero
        let (sin, cos) = self.fov.sin_cos();
        if sin.abs() < 1e-6 || cos.abs() < 1e-6 {
            return Err(ViewerError::config(format!(
                "fov {} has no usable cotangent",
                self.fov
            )));
        }

        if self.zoom_step <= 0.0 {
            return Err(ViewerError::config(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        if self.zoom_min > self.zoom_max {
            return Err(ViewerError::config(format!(
                "zoom_min ({}) exceeds zoom_max ({})",
                self.zoom_min, self.zoom_max
            )));
        }
        if let Some(z) = self.initial_z {
            if !(self.zoom_min..=self.zoom_max).contains(&z) {
                return Err(ViewerError::config(format!(
                    "initial_z {z} outside zoom range [{}, {}]",
                    self.zoom_min, self.zoom_max
                )));
            }
        }

        Ok(())
    }
}
