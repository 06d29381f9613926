mod line;
mod scatter;

pub use line::LineContent;
pub use scatter::ScatterContent;

use crate::core::ValueAxis;
use crate::data::Data;
use crate::error::ChartResult;
use crate::render::{Canvas, ChartFont, Color};

/// Per-layer render parameters threaded through one content draw pass.
#[derive(Debug, Clone, Copy)]
pub struct ContentContext<'a> {
    /// Animation progress in `[0, 1]`: 0 = pre-animation, 1 = settled.
    pub progress: f64,
    pub data: &'a Data,
    /// Layer-local canvas origin.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub x_axis: &'a ValueAxis,
    pub y_axis: &'a ValueAxis,
    pub font: &'a ChartFont,
    pub background: Color,
    /// Cube dimension holding one sample per content layer.
    pub series_dimension: usize,
    /// This layer's sample index within the series dimension.
    pub series_index: usize,
}

impl ContentContext<'_> {
    /// Whether this layer's series is currently visible in the cube.
    #[must_use]
    pub fn series_visible(&self) -> bool {
        self.data
            .cube()
            .is_visible(self.series_dimension, self.series_index)
    }
}

/// One visual series drawn against the chart's shared axes.
///
/// Layers are stateless between render calls: they register measures
/// during every structure pass and draw themselves from resolved axis
/// scales. Rendering must not mutate the cube.
pub trait ContentLayer {
    /// Label identifying this series in the cube and the legend.
    fn series_label(&self) -> &str;

    /// Registers this layer's measures on the axes it uses. Called once
    /// per structure pass, after both axes have been cleared.
    fn add_measures_to_axes(&self, x_axis: &mut ValueAxis, y_axis: &mut ValueAxis);

    /// Draws the layer for one progress step.
    fn render(&self, canvas: &mut dyn Canvas, ctx: &ContentContext<'_>) -> ChartResult<()>;
}
