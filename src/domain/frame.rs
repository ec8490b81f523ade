use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::Vec3;

/// Viewport dimensionality selected in the editor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "2D")]
    D2,
    #[default]
    #[serde(rename = "3D")]
    D3,
    #[serde(rename = "4D")]
    D4,
}

impl Dimension {
    pub fn is_4d(self) -> bool {
        self == Dimension::D4
    }
}

fn default_w_fov() -> f32 {
    90.0
}

/// Editor camera starts at (8, 8, 8) looking at the origin
fn default_camera_forward() -> [f32; 3] {
    let inv = 1.0 / 3.0f32.sqrt();
    [-inv, -inv, -inv]
}

/// Per-frame inputs supplied by the editor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInput {
    /// Elapsed seconds, already clamped by the caller
    pub dt: f32,
    #[serde(default)]
    pub is_simulating: bool,
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default)]
    pub w_position: f32,
    #[serde(default = "default_w_fov")]
    pub w_fov: f32,
    /// Lower-case key names currently held
    #[serde(default)]
    pub keys_pressed: HashSet<String>,
    #[serde(default = "default_camera_forward")]
    pub camera_forward: [f32; 3],
}

impl FrameInput {
    pub fn simulating(dt: f32) -> Self {
        Self {
            dt,
            is_simulating: true,
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_slice(mut self, w_position: f32, w_fov: f32) -> Self {
        self.w_position = w_position;
        self.w_fov = w_fov;
        self
    }

    pub fn with_keys<'a>(mut self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        self.keys_pressed = keys.into_iter().map(str::to_lowercase).collect();
        self
    }

    #[inline]
    pub fn key(&self, name: &str) -> bool {
        self.keys_pressed.contains(name)
    }

    pub fn camera_forward(&self) -> Vec3 {
        Vec3::from_array(self.camera_forward)
    }
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 0.0,
            is_simulating: false,
            dimension: Dimension::default(),
            w_position: 0.0,
            w_fov: default_w_fov(),
            keys_pressed: HashSet::new(),
            camera_forward: default_camera_forward(),
        }
    }
}
