use tracing::{debug, trace};

use crate::api::{ChartConfig, LegendPosition};
use crate::content::{ContentContext, ContentLayer};
use crate::core::ValueAxis;
use crate::data::Data;
use crate::error::{ChartError, ChartResult};
use crate::legend::{Legend, LegendFlow};
use crate::render::{Canvas, ChartFont, Color, TextAnchor};

/// Cube dimension holding one sample per content layer.
const SERIES_DIMENSION: &str = "series";

/// Two-axis chart composing heterogeneous content layers over shared
/// value axes.
///
/// `XYChart` is the orchestration facade consumed by host panels: it owns
/// the axes, the content layers, the legend and the bound data model, and
/// exposes the progress-driven redraw protocol the animation scheduler
/// drives.
pub struct XYChart {
    config: ChartConfig,
    data: Data,
    x_axis: ValueAxis,
    y_axis: ValueAxis,
    contents: Vec<Box<dyn ContentLayer>>,
    legend: Legend,
    series_dimension: usize,
}

impl XYChart {
    #[must_use]
    pub fn new(data: Data) -> Self {
        let mut x_axis = ValueAxis::new();
        let mut y_axis = ValueAxis::new();
        x_axis.set_title_rotation(0.0);
        y_axis.set_title_rotation(270.0);

        let series_dimension = data.cube().add_dimension(SERIES_DIMENSION, Vec::<String>::new());
        let mut legend = Legend::default();
        legend.config_mut().dimension = series_dimension;

        Self {
            config: ChartConfig::default(),
            data,
            x_axis,
            y_axis,
            contents: Vec::new(),
            legend,
            series_dimension,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    #[must_use]
    pub fn data(&self) -> &Data {
        &self.data
    }

    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn legend_mut(&mut self) -> &mut Legend {
        &mut self.legend
    }

    #[must_use]
    pub fn x_axis(&self) -> &ValueAxis {
        &self.x_axis
    }

    pub fn x_axis_mut(&mut self) -> &mut ValueAxis {
        &mut self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &ValueAxis {
        &self.y_axis
    }

    pub fn y_axis_mut(&mut self) -> &mut ValueAxis {
        &mut self.y_axis
    }

    /// Cube dimension index the legend and content layers are keyed by.
    #[must_use]
    pub fn series_dimension(&self) -> usize {
        self.series_dimension
    }

    pub fn add_content(&mut self, content: Box<dyn ContentLayer>) {
        self.contents.push(content);
    }

    #[must_use]
    pub fn content_count(&self) -> usize {
        self.contents.len()
    }

    #[must_use]
    pub fn is_animation_enabled(&self) -> bool {
        self.config.animation_enabled
    }

    /// Rebuilds chart structure after a data or layer change.
    ///
    /// Refreshes the series dimension from the current layer labels, then
    /// clears both axes' measure sets and lets every content layer
    /// re-register its measures in insertion order. Runs before any layer
    /// renders, every structure pass, so the axes can never hold measures
    /// of a removed layer.
    pub fn build_cubes(&mut self) -> ChartResult<()> {
        let labels: Vec<String> = self
            .contents
            .iter()
            .map(|content| content.series_label().to_owned())
            .collect();
        self.data.cube().ensure_dimension(SERIES_DIMENSION, labels);

        self.x_axis.clear_measures();
        self.y_axis.clear_measures();
        for content in &self.contents {
            content.add_measures_to_axes(&mut self.x_axis, &mut self.y_axis);
        }
        debug!(
            layers = self.contents.len(),
            x_measures = self.x_axis.measure_count(),
            y_measures = self.y_axis.measure_count(),
            "rebuilt cube structure"
        );
        Ok(())
    }

    /// Full render pass: structure rebuild followed by a settled redraw.
    pub fn render(
        &mut self,
        canvas: &mut dyn Canvas,
        width: f64,
        height: f64,
    ) -> ChartResult<()> {
        self.build_cubes()?;
        self.render_at(1.0, canvas, width, height)
    }

    /// Redraw-only pass at one animation progress step.
    pub fn render_at(
        &mut self,
        progress: f64,
        canvas: &mut dyn Canvas,
        width: f64,
        height: f64,
    ) -> ChartResult<()> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        let progress = progress.clamp(0.0, 1.0);
        trace!(progress, width, height, "render pass");

        // Regions of the previous pass are superseded by this one.
        canvas.popups_mut().begin_pass();

        let theme = self.data.theme();
        let background = self.config.background.unwrap_or(theme.background);
        let foreground = self.config.foreground.unwrap_or(theme.foreground);
        let font = self
            .config
            .font
            .clone()
            .unwrap_or_else(|| theme.font.clone());

        canvas.set_color(background);
        canvas.fill_rect(0.0, 0.0, width, height)?;

        let padding = self.config.padding;
        let content_x = padding;
        let content_y = padding;
        let mut content_width = (width - 2.0 * padding).max(1.0);
        let mut content_height = (height - 2.0 * padding).max(1.0);

        let legend_area = match self.config.legend_position {
            LegendPosition::None => None,
            LegendPosition::Right => {
                let max_extent = match self.legend.config().flow {
                    LegendFlow::Row => content_width,
                    LegendFlow::Column => content_height,
                };
                let (legend_width, legend_height) =
                    self.legend
                        .needed_size(canvas, &self.data, max_extent, &font)?;
                let legend_x = width - padding - legend_width;
                content_width = (content_width - legend_width - self.config.legend_gap).max(1.0);
                Some((legend_x, padding, legend_width, legend_height, max_extent))
            }
            LegendPosition::Bottom => {
                let max_extent = match self.legend.config().flow {
                    LegendFlow::Row => content_width,
                    LegendFlow::Column => content_height,
                };
                let (legend_width, legend_height) =
                    self.legend
                        .needed_size(canvas, &self.data, max_extent, &font)?;
                let legend_y = height - padding - legend_height;
                content_height = (content_height - legend_height - self.config.legend_gap).max(1.0);
                Some((padding, legend_y, legend_width, legend_height, max_extent))
            }
        };

        self.render_axes(
            canvas,
            content_x,
            content_y,
            content_width,
            content_height,
            foreground,
            &font,
        )?;
        self.render_content(
            progress,
            canvas,
            content_width,
            content_height,
            &font,
            content_x,
            content_y,
        )?;

        if let Some((legend_x, legend_y, legend_width, legend_height, max_extent)) = legend_area {
            let (total_width, total_height) = match self.legend.config().flow {
                LegendFlow::Row => (max_extent, legend_height),
                LegendFlow::Column => (legend_width, max_extent),
            };
            self.legend.render(
                progress,
                canvas,
                &self.data,
                legend_x,
                legend_y,
                total_width,
                total_height,
                foreground,
                background,
                &font,
            )?;
        }

        Ok(())
    }

    /// Draws every content layer for one progress step, in insertion
    /// order. The first failing layer aborts the pass; earlier layers'
    /// output stays on the canvas since the next pass repaints fully.
    #[allow(clippy::too_many_arguments)]
    pub fn render_content(
        &self,
        progress: f64,
        canvas: &mut dyn Canvas,
        width: f64,
        height: f64,
        font: &ChartFont,
        origin_x: f64,
        origin_y: f64,
    ) -> ChartResult<()> {
        let background = self
            .config
            .background
            .unwrap_or(self.data.theme().background);

        for (index, content) in self.contents.iter().enumerate() {
            let ctx = ContentContext {
                progress,
                data: &self.data,
                x: origin_x,
                y: origin_y,
                width,
                height,
                x_axis: &self.x_axis,
                y_axis: &self.y_axis,
                font,
                background,
                series_dimension: self.series_dimension,
                series_index: index,
            };
            content.render(canvas, &ctx).map_err(|err| {
                ChartError::Render(format!(
                    "content layer `{}` failed: {err}",
                    content.series_label()
                ))
            })?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_axes(
        &self,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        foreground: Color,
        font: &ChartFont,
    ) -> ChartResult<()> {
        canvas.set_color(foreground);
        canvas.draw_line(x, y + height, x + width, y + height)?;
        canvas.draw_line(x, y, x, y + height)?;

        canvas.set_font(font);
        if let Some(title) = self.x_axis.title() {
            canvas.draw_text(
                x + width / 2.0,
                y + height - 2.0,
                title,
                self.x_axis.title_rotation(),
                TextAnchor::South,
                false,
            )?;
        }
        if let Some(title) = self.y_axis.title() {
            canvas.draw_text(
                x + font.size,
                y + height / 2.0,
                title,
                self.y_axis.title_rotation(),
                TextAnchor::Center,
                true,
            )?;
        }
        Ok(())
    }
}
