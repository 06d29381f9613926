mod primitives;
mod recording;
mod symbol;

pub use primitives::{ChartFont, Color, CursorKind, Rect, RepaintKind, Stroke, TextAnchor};
pub use recording::{DrawOp, RecordingCanvas};
pub use symbol::Symbol;

use crate::error::{ChartError, ChartResult};
use crate::interaction::{Popup, PopupId, PopupRegistry};

/// Contract implemented by any drawing backend.
///
/// The engine draws through this trait only, so chart, legend and content
/// code stay isolated from backend specifics. Besides drawing and text
/// metrics it carries the interactive surface of the host: per-pass region
/// registration, cursor control, error display and repaint triggering.
///
/// Draw calls return `Err` on backend failure; a failing call aborts the
/// current render pass without rolling back earlier output.
pub trait Canvas {
    fn set_color(&mut self, color: Color);
    fn set_font(&mut self, font: &ChartFont);
    fn set_stroke(&mut self, stroke: Stroke);
    fn reset_stroke(&mut self);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()>;
    fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()>;
    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn text_width(&self, text: &str) -> f64;
    fn text_height(&self, text: &str) -> f64;

    /// Draws `text` anchored at `(x, y)`. `angle` (degrees, clockwise) is
    /// applied around the anchor point only when `rotated` is set.
    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        angle: f64,
        anchor: TextAnchor,
        rotated: bool,
    ) -> ChartResult<()>;

    fn popups(&self) -> &PopupRegistry;
    fn popups_mut(&mut self) -> &mut PopupRegistry;

    fn add_popup(&mut self, popup: Popup) -> PopupId {
        self.popups_mut().add(popup)
    }

    fn set_current_popup(&mut self, id: Option<PopupId>) {
        self.popups_mut().set_current(id);
    }

    fn show_click_pointer(&mut self);
    fn show_normal_pointer(&mut self);
    fn show_error(&mut self, error: &ChartError);
    fn fire_repaint(&mut self, kind: RepaintKind);
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
