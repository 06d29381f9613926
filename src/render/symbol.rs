use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::{Canvas, Color, Stroke};

/// Marker shapes for point-like series and legend swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Circle,
    Square,
    Plus,
    Cross,
}

impl Symbol {
    /// Draws the symbol centered at `(cx, cy)` with `size` as diameter/side.
    ///
    /// Translucent fills are composited against `background` first so
    /// symbols stay opaque over already-drawn content.
    pub fn draw(
        self,
        canvas: &mut dyn Canvas,
        cx: f64,
        cy: f64,
        size: f64,
        fill: Color,
        outline: Color,
        background: Color,
    ) -> ChartResult<()> {
        let half = size * 0.5;
        let body = fill.blend_over(background);

        match self {
            Self::Circle => {
                canvas.set_color(body);
                canvas.fill_oval(cx - half, cy - half, size, size)?;
                canvas.set_color(outline);
                canvas.draw_oval(cx - half, cy - half, size, size)?;
            }
            Self::Square => {
                canvas.set_color(body);
                canvas.fill_rect(cx - half, cy - half, size, size)?;
                canvas.set_color(outline);
                canvas.draw_rect(cx - half, cy - half, size, size)?;
            }
            Self::Plus => {
                canvas.set_color(outline);
                canvas.set_stroke(Stroke::solid((size / 4.0).max(1.0)));
                canvas.draw_line(cx - half, cy, cx + half, cy)?;
                canvas.draw_line(cx, cy - half, cx, cy + half)?;
                canvas.reset_stroke();
            }
            Self::Cross => {
                canvas.set_color(outline);
                canvas.set_stroke(Stroke::solid((size / 4.0).max(1.0)));
                canvas.draw_line(cx - half, cy - half, cx + half, cy + half)?;
                canvas.draw_line(cx - half, cy + half, cx + half, cy - half)?;
                canvas.reset_stroke();
            }
        }
        Ok(())
    }
}
