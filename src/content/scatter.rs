use crate::content::{ContentContext, ContentLayer};
use crate::core::{DataPoint, Measure, ValueAxis};
use crate::error::ChartResult;
use crate::render::{Canvas, Color, Symbol};

const DEFAULT_SYMBOL_SIZE: f64 = 8.0;

/// Value-vs-value point series drawn as symbols.
///
/// During animation each point travels from the baseline of the content
/// area to its settled position.
#[derive(Debug, Clone)]
pub struct ScatterContent {
    label: String,
    points: Vec<DataPoint>,
    symbol: Option<Symbol>,
    color: Option<Color>,
    symbol_size: f64,
}

impl ScatterContent {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            label: label.into(),
            points,
            symbol: None,
            color: None,
            symbol_size: DEFAULT_SYMBOL_SIZE,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_symbol_size(mut self, size: f64) -> Self {
        self.symbol_size = size;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }
}

impl ContentLayer for ScatterContent {
    fn series_label(&self) -> &str {
        &self.label
    }

    fn add_measures_to_axes(&self, x_axis: &mut ValueAxis, y_axis: &mut ValueAxis) {
        let xs: Vec<f64> = self.points.iter().map(|point| point.x).collect();
        let ys: Vec<f64> = self.points.iter().map(|point| point.y).collect();
        x_axis.add_measure(Measure::new(self.label.clone(), xs));
        y_axis.add_measure(Measure::new(self.label.clone(), ys));
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &ContentContext<'_>) -> ChartResult<()> {
        if !ctx.series_visible() {
            return Ok(());
        }

        let x_scale = ctx.x_axis.scale()?;
        let y_scale = ctx.y_axis.scale()?;
        let color = self
            .color
            .unwrap_or_else(|| ctx.data.color(ctx.series_dimension, ctx.series_index));
        let symbol = self
            .symbol
            .unwrap_or_else(|| ctx.data.symbol(ctx.series_index));
        let baseline = ctx.y + ctx.height;

        for point in self.points.iter().filter(|point| point.is_finite()) {
            let px = ctx.x + x_scale.domain_to_pixel(point.x, ctx.width)?;
            // Canvas y grows downward; flip the y projection.
            let settled = ctx.y + ctx.height - y_scale.domain_to_pixel(point.y, ctx.height)?;
            let py = baseline + (settled - baseline) * ctx.progress;
            symbol.draw(canvas, px, py, self.symbol_size, color, color, ctx.background)?;
        }
        Ok(())
    }
}
