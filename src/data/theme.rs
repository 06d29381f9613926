use serde::{Deserialize, Serialize};

use crate::render::{ChartFont, Color, Symbol};

/// Default colors, symbols and font applied when a chart or legend carries
/// no explicit override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub series_colors: Vec<Color>,
    pub symbols: Vec<Symbol>,
    pub font: ChartFont,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            foreground: Color::rgb(0.13, 0.13, 0.13),
            series_colors: vec![
                Color::rgb(0.22, 0.49, 0.72),
                Color::rgb(0.89, 0.47, 0.16),
                Color::rgb(0.30, 0.69, 0.29),
                Color::rgb(0.84, 0.19, 0.19),
                Color::rgb(0.58, 0.40, 0.74),
                Color::rgb(0.55, 0.34, 0.29),
            ],
            symbols: vec![Symbol::Circle, Symbol::Square, Symbol::Plus, Symbol::Cross],
            font: ChartFont::default(),
        }
    }
}

impl Theme {
    /// Default series color for one (dimension, sample) pair; the palette
    /// cycles, offset per dimension so sibling dimensions differ.
    #[must_use]
    pub fn series_color(&self, dimension: usize, index: usize) -> Color {
        if self.series_colors.is_empty() {
            return self.foreground;
        }
        self.series_colors[(dimension + index) % self.series_colors.len()]
    }

    #[must_use]
    pub fn symbol(&self, index: usize) -> Symbol {
        if self.symbols.is_empty() {
            return Symbol::Circle;
        }
        self.symbols[index % self.symbols.len()]
    }
}
