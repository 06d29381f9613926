use crate::content::{ContentContext, ContentLayer};
use crate::core::{DataPoint, Measure, ValueAxis};
use crate::error::ChartResult;
use crate::render::{Canvas, Color, Stroke};

/// Polyline through value pairs.
///
/// Animation reveals the line front-to-back: at progress `p` the first
/// `p`-th fraction of the path is drawn, with the frontier segment
/// interpolated.
#[derive(Debug, Clone)]
pub struct LineContent {
    label: String,
    points: Vec<DataPoint>,
    color: Option<Color>,
    stroke_width: f64,
}

impl LineContent {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            label: label.into(),
            points,
            color: None,
            stroke_width: 1.5,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }
}

impl ContentLayer for LineContent {
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
        if !ctx.series_visible() || self.points.len() < 2 {
            return Ok(());
        }

        let x_scale = ctx.x_axis.scale()?;
        let y_scale = ctx.y_axis.scale()?;

        let mut projected = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if !point.is_finite() {
                continue;
            }
            let px = ctx.x + x_scale.domain_to_pixel(point.x, ctx.width)?;
            let py = ctx.y + ctx.height - y_scale.domain_to_pixel(point.y, ctx.height)?;
            projected.push((px, py));
        }
        if projected.len() < 2 {
            return Ok(());
        }

        let color = self
            .color
            .unwrap_or_else(|| ctx.data.color(ctx.series_dimension, ctx.series_index));
        canvas.set_color(color);
        canvas.set_stroke(Stroke::solid(self.stroke_width));

        // Frontier position in segment units.
        let span = (projected.len() - 1) as f64 * ctx.progress.clamp(0.0, 1.0);
        let full_segments = span.floor() as usize;
        let fraction = span - full_segments as f64;

        let result = (|| -> ChartResult<()> {
            for pair in projected.windows(2).take(full_segments) {
                canvas.draw_line(pair[0].0, pair[0].1, pair[1].0, pair[1].1)?;
            }
            if fraction > 0.0 && full_segments < projected.len() - 1 {
                let (x1, y1) = projected[full_segments];
                let (x2, y2) = projected[full_segments + 1];
                canvas.draw_line(
                    x1,
                    y1,
                    x1 + (x2 - x1) * fraction,
                    y1 + (y2 - y1) * fraction,
                )?;
            }
            Ok(())
        })();
        canvas.reset_stroke();
        result
    }
}
