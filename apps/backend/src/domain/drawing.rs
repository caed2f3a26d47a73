//! Drawing payload value objects.
//!
//! Stored as JSON in `turns.drawing`; `serde_json` is built with
//! `float_roundtrip` so every `f64` reads back bit-for-bit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub alpha: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub color: Color,
    pub size: f64,
    #[serde(default)]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    pub background_color: Color,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Color {
    fn is_finite(&self) -> bool {
        [self.alpha, self.red, self.green, self.blue]
            .iter()
            .all(|c| c.is_finite())
    }
}

impl Drawing {
    /// False if any channel, size or coordinate is NaN or infinite. JSON has
    /// no encoding for those, so such a drawing cannot be stored.
    pub fn is_finite(&self) -> bool {
        self.background_color.is_finite()
            && self.lines.iter().all(|line| {
                line.size.is_finite()
                    && line.color.is_finite()
                    && line.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
            })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
