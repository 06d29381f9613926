//! Legend flow layout and interactive rendering.
//!
//! Sizing and drawing both consume the output of one shared placement
//! routine, so the bounding box returned by [`Legend::needed_size`] always
//! contains the geometry produced by [`Legend::render`] for the same
//! inputs.

use serde::{Deserialize, Serialize};

use crate::data::{Cube, Data};
use crate::error::ChartResult;
use crate::interaction::{InteractionEffect, Popup, PopupCallback};
use crate::render::{Canvas, ChartFont, Color, CursorKind, Rect, RepaintKind, Stroke, TextAnchor};

/// Gap between an entry's symbol box and its label.
const SYMBOL_GAP: f64 = 4.0;
/// Opacity applied to entries whose sample is hidden.
const HIDDEN_OPACITY: f64 = 0.33;

/// Direction entries accumulate in before wrapping.
///
/// `Row` flow fills rows left-to-right and wraps into new rows when the
/// maximum width is exceeded; `Column` flow fills columns top-to-bottom and
/// wraps into new columns against the maximum height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendFlow {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    pub flow: LegendFlow,
    pub padding: f64,
    pub spacing: f64,
    /// Reverses the entry order end-to-end; label and sample index flip
    /// together.
    pub reverse: bool,
    /// Cube dimension the legend is bound to.
    pub dimension: usize,
    /// Label overrides by sample index; missing entries fall back to the
    /// cube's sample labels.
    pub labels: Option<Vec<String>>,
    /// Explicit per-series colors by sample index.
    pub colors: Option<Vec<Color>>,
    pub font: Option<ChartFont>,
    pub text_color: Option<Color>,
    pub background: Option<Color>,
    pub border: Option<Color>,
    pub border_stroke: Stroke,
    pub shadow: Option<Color>,
    pub shadow_x_offset: f64,
    pub shadow_y_offset: f64,
    pub rounded_corner: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            flow: LegendFlow::Row,
            padding: 6.0,
            spacing: 4.0,
            reverse: false,
            dimension: 0,
            labels: None,
            colors: None,
            font: None,
            text_color: None,
            background: None,
            border: None,
            border_stroke: Stroke::default(),
            shadow: None,
            shadow_x_offset: 3.0,
            shadow_y_offset: 3.0,
            rounded_corner: 4.0,
        }
    }
}

/// One legend entry, derived per pass from the bound cube dimension.
#[derive(Debug, Clone, PartialEq)]
struct LegendEntry {
    label: String,
    sample: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedEntry {
    entry: LegendEntry,
    /// Position relative to the padded content origin.
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct FlowLayout {
    placed: Vec<PlacedEntry>,
    content_width: f64,
    content_height: f64,
}

/// Legend bound to one cube dimension.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    config: LegendConfig,
}

impl Legend {
    #[must_use]
    pub fn new(config: LegendConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LegendConfig {
        &mut self.config
    }

    /// Minimum bounding size for the legend when wrapped against
    /// `max_extent` along the wrap axis (width for row flow, height for
    /// column flow). Pure function of its inputs.
    pub fn needed_size(
        &self,
        canvas: &mut dyn Canvas,
        data: &Data,
        max_extent: f64,
        font: &ChartFont,
    ) -> ChartResult<(f64, f64)> {
        let layout = self.layout(canvas, data, max_extent, font)?;
        let padding = self.config.padding;
        Ok((
            layout.content_width + 2.0 * padding,
            layout.content_height + 2.0 * padding,
        ))
    }

    /// Draws the legend into the given area and registers one interactive
    /// region per entry.
    ///
    /// `total_width`/`total_height` bound the area available to the
    /// legend; the extent along the wrap axis is the same constraint
    /// `needed_size` wraps against.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        _progress: f64,
        canvas: &mut dyn Canvas,
        data: &Data,
        x: f64,
        y: f64,
        total_width: f64,
        total_height: f64,
        foreground: Color,
        background: Color,
        font: &ChartFont,
    ) -> ChartResult<()> {
        let max_extent = match self.config.flow {
            LegendFlow::Row => total_width,
            LegendFlow::Column => total_height,
        };
        let layout = self.layout(canvas, data, max_extent, font)?;
        let padding = self.config.padding;
        let width = layout.content_width + 2.0 * padding;
        let height = layout.content_height + 2.0 * padding;
        let corner = self.config.rounded_corner;

        if let Some(legend_background) = self.config.background {
            if let Some(shadow) = self.config.shadow {
                canvas.set_color(shadow);
                canvas.fill_rounded_rect(
                    x + self.config.shadow_x_offset,
                    y + self.config.shadow_y_offset,
                    width,
                    height,
                    corner,
                )?;
            }
            canvas.set_color(legend_background);
            canvas.fill_rounded_rect(x, y, width, height, corner)?;
        }

        if let Some(border) = self.config.border {
            canvas.set_color(border);
            canvas.set_stroke(self.config.border_stroke.clone());
            canvas.draw_rounded_rect(x, y, width, height, corner)?;
            canvas.reset_stroke();
        }

        let cube = data.cube();
        let dimension = self.config.dimension;
        let selected = cube.selected_sample(dimension);
        let origin_x = x + padding;
        let origin_y = y + padding;

        for placed in &layout.placed {
            let sample = placed.entry.sample;
            let entry_x = origin_x + placed.x;
            let entry_y = origin_y + placed.y;
            let symbol_box = placed.height;
            let is_visible = cube.is_visible(dimension, sample);

            let mut series_color = match self
                .config
                .colors
                .as_ref()
                .and_then(|colors| colors.get(sample))
            {
                Some(color) => *color,
                None => data.color(dimension, sample),
            };
            if !is_visible {
                series_color = series_color.with_opacity(HIDDEN_OPACITY);
            }

            data.symbol(sample).draw(
                canvas,
                entry_x + symbol_box / 2.0,
                entry_y + symbol_box / 2.0,
                symbol_box,
                series_color,
                series_color,
                background,
            )?;

            let mut text_color = self.config.text_color.unwrap_or(foreground);
            if !is_visible {
                text_color = text_color.with_opacity(HIDDEN_OPACITY);
            }
            canvas.set_color(text_color);
            canvas.draw_text(
                entry_x + symbol_box + SYMBOL_GAP,
                entry_y + symbol_box / 2.0,
                &placed.entry.label,
                0.0,
                TextAnchor::West,
                false,
            )?;

            let region = Rect::new(entry_x, entry_y, placed.width, placed.height);
            let popup = Popup::new(region, 0, TextAnchor::East)
                .on_enter(highlight_behavior(cube.clone(), dimension, sample, is_visible))
                .on_exit(unhighlight_behavior(cube.clone(), dimension))
                .on_click(toggle_behavior(cube.clone(), dimension, sample));
            let id = canvas.add_popup(popup);

            if selected == Some(sample) {
                canvas.set_current_popup(Some(id));
            }
        }

        Ok(())
    }

    /// Ordered (label, sample) pairs for the bound dimension, with label
    /// overrides and the `reverse` flip applied before any layout.
    fn entries(&self, data: &Data) -> ChartResult<Vec<LegendEntry>> {
        let cube = data.cube();
        let dimension = self.config.dimension;
        let count = cube.sample_count(dimension);

        let mut entries = Vec::with_capacity(count);
        for sample in 0..count {
            let label = match self
                .config
                .labels
                .as_ref()
                .and_then(|labels| labels.get(sample))
            {
                Some(label) => label.clone(),
                None => cube.sample(dimension, sample)?,
            };
            entries.push(LegendEntry { label, sample });
        }
        if self.config.reverse {
            entries.reverse();
        }
        Ok(entries)
    }

    fn layout(
        &self,
        canvas: &mut dyn Canvas,
        data: &Data,
        max_extent: f64,
        font: &ChartFont,
    ) -> ChartResult<FlowLayout> {
        let used_font = self.config.font.as_ref().unwrap_or(font);
        canvas.set_font(used_font);

        let entries = self.entries(data)?;
        let measured: Vec<(LegendEntry, f64, f64)> = entries
            .into_iter()
            .map(|entry| {
                let text_height = canvas.text_height(&entry.label);
                // Entry extent includes the symbol box and its gap.
                let width = canvas.text_width(&entry.label) + SYMBOL_GAP + text_height;
                (entry, width, text_height)
            })
            .collect();

        Ok(flow_layout(
            measured,
            self.config.flow,
            max_extent,
            self.config.spacing,
        ))
    }
}

/// Shared wrapping routine for the sizing and draw passes.
///
/// Entries accumulate along the flow axis; when an entry (plus spacing,
/// unless it is first in its line) would exceed `max_extent`, a new line is
/// started and the entry placed at its head without leading spacing. An
/// entry wider than the whole extent stays on its own line rather than
/// opening an empty one.
fn flow_layout(
    measured: Vec<(LegendEntry, f64, f64)>,
    flow: LegendFlow,
    max_extent: f64,
    spacing: f64,
) -> FlowLayout {
    let mut placed = Vec::with_capacity(measured.len());
    let mut along = 0.0_f64;
    let mut across = 0.0_f64;
    let mut line_cross_max = 0.0_f64;
    let mut along_max = 0.0_f64;
    let mut first_in_line = true;

    for (entry, width, height) in measured {
        let (entry_along, entry_cross) = match flow {
            LegendFlow::Row => (width, height),
            LegendFlow::Column => (height, width),
        };

        let mut start = if first_in_line { along } else { along + spacing };
        if !first_in_line && start + entry_along > max_extent {
            across += line_cross_max + spacing;
            line_cross_max = 0.0;
            start = 0.0;
        }

        let (x, y) = match flow {
            LegendFlow::Row => (start, across),
            LegendFlow::Column => (across, start),
        };
        placed.push(PlacedEntry {
            entry,
            x,
            y,
            width,
            height,
        });

        along = start + entry_along;
        along_max = along_max.max(along);
        line_cross_max = line_cross_max.max(entry_cross);
        first_in_line = false;
    }

    let (content_width, content_height) = if placed.is_empty() {
        (0.0, 0.0)
    } else {
        match flow {
            LegendFlow::Row => (along_max, across + line_cross_max),
            LegendFlow::Column => (across + line_cross_max, along_max),
        }
    };

    FlowLayout {
        placed,
        content_width,
        content_height,
    }
}

fn highlight_behavior(
    cube: Cube,
    dimension: usize,
    sample: usize,
    is_visible: bool,
) -> PopupCallback {
    Box::new(move || {
        if !is_visible {
            return Ok(InteractionEffect::NONE);
        }
        if cube.selected_sample(dimension) == Some(sample) {
            return Ok(InteractionEffect::NONE);
        }
        cube.set_selected_sample(dimension, Some(sample))?;
        Ok(InteractionEffect::NONE
            .with_cursor(CursorKind::Click)
            .with_repaint(RepaintKind::Light))
    })
}

fn unhighlight_behavior(cube: Cube, dimension: usize) -> PopupCallback {
    Box::new(move || {
        if cube.selected_sample(dimension).is_none() {
            return Ok(InteractionEffect::NONE);
        }
        cube.set_selected_sample(dimension, None)?;
        Ok(InteractionEffect::NONE
            .with_cursor(CursorKind::Normal)
            .with_repaint(RepaintKind::Light))
    })
}

fn toggle_behavior(cube: Cube, dimension: usize, sample: usize) -> PopupCallback {
    Box::new(move || {
        cube.toggle_visible(dimension, sample)?;
        Ok(InteractionEffect::NONE.with_repaint(RepaintKind::Light))
    })
}

#[cfg(test)]
mod tests {
    use super::{flow_layout, LegendEntry, LegendFlow};

    fn entry(label: &str) -> LegendEntry {
        LegendEntry {
            label: label.to_owned(),
            sample: 0,
        }
    }

    #[test]
    fn single_oversized_entry_stays_on_its_line() {
        let layout = flow_layout(
            vec![(entry("wide"), 200.0, 20.0)],
            LegendFlow::Row,
            100.0,
            4.0,
        );
        assert_eq!(layout.placed.len(), 1);
        assert_eq!(layout.placed[0].x, 0.0);
        assert_eq!(layout.content_width, 200.0);
        assert_eq!(layout.content_height, 20.0);
    }

    #[test]
    fn column_flow_wraps_on_height() {
        let entries = vec![
            (entry("a"), 30.0, 20.0),
            (entry("b"), 40.0, 20.0),
            (entry("c"), 35.0, 20.0),
        ];
        let layout = flow_layout(entries, LegendFlow::Column, 45.0, 4.0);
        // 20 + 4 + 20 = 44 fits; the third entry opens a second column.
        assert_eq!(layout.placed[2].x, 40.0 + 4.0);
        assert_eq!(layout.placed[2].y, 0.0);
        assert_eq!(layout.content_height, 44.0);
        assert_eq!(layout.content_width, 44.0 + 35.0);
    }
}
