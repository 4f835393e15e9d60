//! Temperature → color mapping over a fixed °C domain.

use serde::{Deserialize, Serialize};

/// Coldest temperature of the scale, drawn blue.
pub const DOMAIN_COLD: f64 = 0.0;
/// Hottest temperature of the scale, drawn red.
pub const DOMAIN_HOT: f64 = 40.0;

/// Diverging red/yellow/blue ramp, cold to hot.
const RAMP: [Color; 11] = [
    Color::rgb(0x31, 0x36, 0x95),
    Color::rgb(0x45, 0x75, 0xb4),
    Color::rgb(0x74, 0xad, 0xd1),
    Color::rgb(0xab, 0xd9, 0xe9),
    Color::rgb(0xe0, 0xf3, 0xf8),
    Color::rgb(0xff, 0xff, 0xbf),
    Color::rgb(0xfe, 0xe0, 0x90),
    Color::rgb(0xfd, 0xae, 0x61),
    Color::rgb(0xf4, 0x6d, 0x43),
    Color::rgb(0xd7, 0x30, 0x27),
    Color::rgb(0xa5, 0x00, 0x26),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Continuous scale from °C to color, clamped to [`DOMAIN_COLD`, `DOMAIN_HOT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureScale {
    cold: f64,
    hot: f64,
}

impl Default for TemperatureScale {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureScale {
    pub fn new() -> Self {
        Self {
            cold: DOMAIN_COLD,
            hot: DOMAIN_HOT,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.cold, self.hot)
    }

    /// Position on the ramp, 0.0 at the cold end and 1.0 at the hot end.
    pub fn normalize(&self, celsius: f64) -> f64 {
        ((celsius - self.cold) / (self.hot - self.cold)).clamp(0.0, 1.0)
    }

    pub fn color(&self, celsius: f64) -> Color {
        let position = self.normalize(celsius) * (RAMP.len() - 1) as f64;
        let lower = (position.floor() as usize).min(RAMP.len() - 2);
        RAMP[lower].lerp(RAMP[lower + 1], position - lower as f64)
    }

    pub fn coldest(&self) -> Color {
        RAMP[0]
    }

    pub fn hottest(&self) -> Color {
        RAMP[RAMP.len() - 1]
    }
}
