use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Returns the color with its alpha channel replaced.
    #[must_use]
    pub const fn with_opacity(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Source-over composite of `self` on an opaque `background`.
    #[must_use]
    pub fn blend_over(self, background: Self) -> Self {
        let a = self.alpha;
        Self::rgb(
            self.red * a + background.red * (1.0 - a),
            self.green * a + background.green * (1.0 - a),
            self.blue * a + background.blue * (1.0 - a),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Font selection for canvas text calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFont {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl ChartFont {
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for ChartFont {
    fn default() -> Self {
        Self::new("Sans", 12.0)
    }
}

/// Stroke settings for outline draw calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub dash: Option<Vec<f64>>,
}

impl Stroke {
    #[must_use]
    pub const fn solid(width: f64) -> Self {
        Self { width, dash: None }
    }

    #[must_use]
    pub fn dashed(width: f64, dash: Vec<f64>) -> Self {
        Self {
            width,
            dash: Some(dash),
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

/// Axis-aligned screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    #[must_use]
    pub fn contains_rect(self, other: Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Self::new(x, y, right - x, bottom - y)
    }
}

/// Compass anchor for text placement relative to the call's (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    West,
    East,
    North,
    South,
    Center,
}

/// Repaint request severity: `Full` rebuilds chart structure, `Light`
/// redraws from existing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaintKind {
    Full,
    Light,
}

/// Pointer shape requested by interactive regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorKind {
    Normal,
    Click,
}
