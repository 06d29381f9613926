use serde::{Deserialize, Serialize};

use crate::render::{ChartFont, Color};

/// Placement of the legend within the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    Right,
    Bottom,
    None,
}

/// Chart-level presentation and animation settings.
///
/// `None` overrides fall back to the theme of the bound data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub font: Option<ChartFont>,
    pub legend_position: LegendPosition,
    pub animation_enabled: bool,
    pub animation_duration_ms: u64,
    /// Outer padding between the canvas edge and chart content.
    pub padding: f64,
    /// Gap between the content area and the legend.
    pub legend_gap: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            background: None,
            foreground: None,
            font: None,
            legend_position: LegendPosition::Right,
            animation_enabled: true,
            animation_duration_ms: 600,
            padding: 8.0,
            legend_gap: 8.0,
        }
    }
}
