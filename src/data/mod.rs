mod cube;
mod theme;

pub use cube::{Cube, CubeState};
pub use theme::Theme;

use crate::render::{Color, Symbol};

/// The external data model as seen by the render pipeline: the mutable
/// cube state plus the theme used to resolve per-series defaults.
#[derive(Debug, Clone, Default)]
pub struct Data {
    cube: Cube,
    theme: Theme,
}

impl Data {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            cube: Cube::new(),
            theme,
        }
    }

    #[must_use]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn color(&self, dimension: usize, index: usize) -> Color {
        self.theme.series_color(dimension, index)
    }

    #[must_use]
    pub fn symbol(&self, index: usize) -> Symbol {
        self.theme.symbol(index)
    }
}
