use crate::error::{ChartError, ChartResult};
use crate::interaction::PopupRegistry;
use crate::render::{Canvas, ChartFont, Color, CursorKind, Rect, RepaintKind, Stroke, TextAnchor};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        stroke: Stroke,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    DrawRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    DrawRoundedRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    FillOval {
        rect: Rect,
        color: Color,
    },
    DrawOval {
        rect: Rect,
        color: Color,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        angle: f64,
        anchor: TextAnchor,
        rotated: bool,
        color: Color,
        font_size: f64,
    },
}

/// Deterministic headless canvas used by tests and size measurement.
///
/// It records every draw call, region and host signal, and still validates
/// geometry and colors so tests catch invalid output before a real backend
/// is involved. Text metrics are a pure function of the current font size
/// and a configurable per-character em width.
pub struct RecordingCanvas {
    char_width_em: f64,
    font: ChartFont,
    color: Color,
    stroke: Stroke,
    pub ops: Vec<DrawOp>,
    pub repaints: Vec<RepaintKind>,
    pub cursor_log: Vec<CursorKind>,
    pub errors: Vec<String>,
    popups: PopupRegistry,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self {
            char_width_em: 0.6,
            font: ChartFont::default(),
            color: Color::rgb(0.0, 0.0, 0.0),
            stroke: Stroke::default(),
            ops: Vec::new(),
            repaints: Vec::new(),
            cursor_log: Vec::new(),
            errors: Vec::new(),
            popups: PopupRegistry::new(),
        }
    }

    /// Overrides the assumed glyph width as a fraction of the font size.
    #[must_use]
    pub fn with_char_width_em(mut self, char_width_em: f64) -> Self {
        self.char_width_em = char_width_em;
        self
    }

    #[must_use]
    pub fn font(&self) -> &ChartFont {
        &self.font
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    /// Bounding box of everything drawn so far, including text extents
    /// resolved through the recorded anchor.
    #[must_use]
    pub fn drawn_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for op in &self.ops {
            let rect = match op {
                DrawOp::Line { x1, y1, x2, y2, .. } => Rect::new(
                    x1.min(*x2),
                    y1.min(*y2),
                    (x2 - x1).abs(),
                    (y2 - y1).abs(),
                ),
                DrawOp::FillRect { rect, .. }
                | DrawOp::DrawRect { rect, .. }
                | DrawOp::FillRoundedRect { rect, .. }
                | DrawOp::DrawRoundedRect { rect, .. }
                | DrawOp::FillOval { rect, .. }
                | DrawOp::DrawOval { rect, .. } => *rect,
                DrawOp::Text {
                    x,
                    y,
                    text,
                    anchor,
                    font_size,
                    ..
                } => {
                    let width = self.char_width_em * font_size * text.chars().count() as f64;
                    let height = *font_size;
                    anchored_text_rect(*x, *y, width, height, *anchor)
                }
            };
            bounds = Some(match bounds {
                None => rect,
                Some(current) => current.union(rect),
            });
        }
        bounds
    }

    fn record(&mut self, op: DrawOp) -> ChartResult<()> {
        self.color.validate()?;
        self.validate_op(&op)?;
        self.ops.push(op);
        Ok(())
    }

    fn validate_op(&self, op: &DrawOp) -> ChartResult<()> {
        let finite = match op {
            DrawOp::Line { x1, y1, x2, y2, .. } => {
                x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()
            }
            DrawOp::FillRect { rect, .. }
            | DrawOp::DrawRect { rect, .. }
            | DrawOp::FillOval { rect, .. }
            | DrawOp::DrawOval { rect, .. } => rect_is_finite(*rect),
            DrawOp::FillRoundedRect { rect, radius, .. }
            | DrawOp::DrawRoundedRect { rect, radius, .. } => {
                rect_is_finite(*rect) && radius.is_finite()
            }
            DrawOp::Text { x, y, .. } => x.is_finite() && y.is_finite(),
        };
        if !finite {
            return Err(ChartError::InvalidData(
                "draw call coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_font(&mut self, font: &ChartFont) {
        self.font = font.clone();
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    fn reset_stroke(&mut self) {
        self.stroke = Stroke::default();
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ChartResult<()> {
        let (color, stroke) = (self.color, self.stroke.clone());
        self.record(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            stroke,
        })
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::FillRect {
            rect: Rect::new(x, y, width, height),
            color,
        })
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::DrawRect {
            rect: Rect::new(x, y, width, height),
            color,
        })
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::FillRoundedRect {
            rect: Rect::new(x, y, width, height),
            radius,
            color,
        })
    }

    fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::DrawRoundedRect {
            rect: Rect::new(x, y, width, height),
            radius,
            color,
        })
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::FillOval {
            rect: Rect::new(x, y, width, height),
            color,
        })
    }

    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let color = self.color;
        self.record(DrawOp::DrawOval {
            rect: Rect::new(x, y, width, height),
            color,
        })
    }

    fn text_width(&self, text: &str) -> f64 {
        self.char_width_em * self.font.size * text.chars().count() as f64
    }

    fn text_height(&self, _text: &str) -> f64 {
        self.font.size
    }

    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        angle: f64,
        anchor: TextAnchor,
        rotated: bool,
    ) -> ChartResult<()> {
        let (color, font_size) = (self.color, self.font.size);
        self.record(DrawOp::Text {
            x,
            y,
            text: text.to_owned(),
            angle,
            anchor,
            rotated,
            color,
            font_size,
        })
    }

    fn popups(&self) -> &PopupRegistry {
        &self.popups
    }

    fn popups_mut(&mut self) -> &mut PopupRegistry {
        &mut self.popups
    }

    fn show_click_pointer(&mut self) {
        self.cursor_log.push(CursorKind::Click);
    }

    fn show_normal_pointer(&mut self) {
        self.cursor_log.push(CursorKind::Normal);
    }

    fn show_error(&mut self, error: &ChartError) {
        self.errors.push(error.to_string());
    }

    fn fire_repaint(&mut self, kind: RepaintKind) {
        self.repaints.push(kind);
    }
}

fn rect_is_finite(rect: Rect) -> bool {
    rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite()
}

fn anchored_text_rect(x: f64, y: f64, width: f64, height: f64, anchor: TextAnchor) -> Rect {
    match anchor {
        TextAnchor::West => Rect::new(x, y - height / 2.0, width, height),
        TextAnchor::East => Rect::new(x - width, y - height / 2.0, width, height),
        TextAnchor::North => Rect::new(x - width / 2.0, y, width, height),
        TextAnchor::South => Rect::new(x - width / 2.0, y - height, width, height),
        TextAnchor::Center => Rect::new(x - width / 2.0, y - height / 2.0, width, height),
    }
}
