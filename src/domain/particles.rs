use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::EngineError;

/// Linear RGB color parsed from the editor's `#rrggbb` strings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(s: &str) -> Result<Self, EngineError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| EngineError::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    #[inline]
    pub fn lerp(&self, other: &Color, t: f32) -> [f32; 3] {
        [
            self.r * (1.0 - t) + other.r * t,
            self.g * (1.0 - t) + other.g * t,
            self.b * (1.0 - t) + other.b * t,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(c.r), byte(c.g), byte(c.b))
    }
}

/// Emitter configuration carried by particle-system entities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticleConfig {
    pub count: usize,
    pub life: f32,
    pub speed: f32,
    pub size: f32,
    pub spread: [f32; 3],
    pub color_start: Color,
    pub color_end: Color,
    pub w_spread: f32,
    pub w_velocity: f32,
    /// Per-second velocity decay
    pub drag: f32,
    /// Acceleration along -W
    pub hyper_gravity: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            life: 2.0,
            speed: 1.0,
            size: 0.1,
            spread: [1.0, 1.0, 1.0],
            color_start: Color::new(1.0, 94.0 / 255.0, 58.0 / 255.0),
            color_end: Color::new(0.0, 0.0, 0.0),
            w_spread: 2.0,
            w_velocity: 0.1,
            drag: 0.0,
            hyper_gravity: 0.0,
            extra: Map::new(),
        }
    }
}
