use std::f64::consts::{FRAC_PI_2, PI};

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::interaction::PopupRegistry;
use crate::render::{Canvas, ChartFont, Color, CursorKind, RepaintKind, Stroke, TextAnchor};

/// Cairo + Pango + PangoCairo canvas backend.
///
/// Drawing happens immediately on the wrapped context. Host-facing signals
/// (cursor shape, repaint requests, errors) are latched on the canvas for
/// the embedding widget to poll after dispatching events, which keeps this
/// backend free of any GUI-toolkit dependency.
pub struct CairoCanvas {
    context: Context,
    surface: Option<ImageSurface>,
    font: ChartFont,
    stroke: Stroke,
    cursor: CursorKind,
    pending_repaint: Option<RepaintKind>,
    last_error: Option<String>,
    popups: PopupRegistry,
}

impl CairoCanvas {
    /// Creates a canvas over an offscreen image surface.
    pub fn offscreen(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self::from_parts(context, Some(surface)))
    }

    /// Wraps an external context, e.g. one handed to a widget draw callback.
    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self::from_parts(context, None)
    }

    fn from_parts(context: Context, surface: Option<ImageSurface>) -> Self {
        Self {
            context,
            surface,
            font: ChartFont::default(),
            stroke: Stroke::default(),
            cursor: CursorKind::Normal,
            pending_repaint: None,
            last_error: None,
            popups: PopupRegistry::new(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    /// Cursor shape most recently requested by interaction dispatch.
    #[must_use]
    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    /// Takes the strongest repaint request latched since the last call.
    pub fn take_pending_repaint(&mut self) -> Option<RepaintKind> {
        self.pending_repaint.take()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn layout_for(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&pango_font_string(&self.font));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);
        layout
    }

    fn apply_stroke(&self) {
        self.context.set_line_width(self.stroke.width);
        match &self.stroke.dash {
            Some(dash) => self.context.set_dash(dash, 0.0),
            None => self.context.set_dash(&[], 0.0),
        }
    }

    fn stroke_path(&self, what: &str) -> ChartResult<()> {
        self.apply_stroke();
        self.context
            .stroke()
            .map_err(|err| map_backend_error(what, err))
    }

    fn fill_path(&self, what: &str) -> ChartResult<()> {
        self.context
            .fill()
            .map_err(|err| map_backend_error(what, err))
    }

    fn append_rounded_rect_path(&self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        if radius <= 0.0 {
            self.context.rectangle(x, y, width, height);
            return;
        }

        let radius = radius.min(width * 0.5).min(height * 0.5);
        let (left, top, right, bottom) = (x, y, x + width, y + height);

        self.context.new_sub_path();
        self.context
            .arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
        self.context
            .arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        self.context
            .arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
        self.context
            .arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
        self.context.close_path();
    }

    fn append_oval_path(&self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context
            .translate(x + width * 0.5, y + height * 0.5);
        self.context.scale(width * 0.5, height * 0.5);
        self.context.new_sub_path();
        self.context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }
}

impl Canvas for CairoCanvas {
    fn set_color(&mut self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
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
        self.context.move_to(x1, y1);
        self.context.line_to(x2, y2);
        self.stroke_path("failed to stroke line")
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context.rectangle(x, y, width, height);
        self.fill_path("failed to fill rectangle")
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context.rectangle(x, y, width, height);
        self.stroke_path("failed to stroke rectangle")
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        self.append_rounded_rect_path(x, y, width, height, radius);
        self.fill_path("failed to fill rounded rectangle")
    }

    fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> ChartResult<()> {
        self.append_rounded_rect_path(x, y, width, height, radius);
        self.stroke_path("failed to stroke rounded rectangle")
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.append_oval_path(x, y, width, height)?;
        self.fill_path("failed to fill oval")
    }

    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.append_oval_path(x, y, width, height)?;
        self.stroke_path("failed to stroke oval")
    }

    fn text_width(&self, text: &str) -> f64 {
        let (width, _height) = self.layout_for(text).pixel_size();
        f64::from(width)
    }

    fn text_height(&self, text: &str) -> f64 {
        let (_width, height) = self.layout_for(text).pixel_size();
        f64::from(height)
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
        let layout = self.layout_for(text);
        let (width, height) = layout.pixel_size();
        let (dx, dy) = anchor_offset(f64::from(width), f64::from(height), anchor);

        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.translate(x, y);
        if rotated {
            self.context.rotate(angle.to_radians());
        }
        self.context.move_to(dx, dy);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }

    fn popups(&self) -> &PopupRegistry {
        &self.popups
    }

    fn popups_mut(&mut self) -> &mut PopupRegistry {
        &mut self.popups
    }

    fn show_click_pointer(&mut self) {
        self.cursor = CursorKind::Click;
    }

    fn show_normal_pointer(&mut self) {
        self.cursor = CursorKind::Normal;
    }

    fn show_error(&mut self, error: &ChartError) {
        tracing::warn!(error = %error, "chart error reported to cairo canvas");
        self.last_error = Some(error.to_string());
    }

    fn fire_repaint(&mut self, kind: RepaintKind) {
        // Full supersedes Light and is never downgraded.
        self.pending_repaint = match (self.pending_repaint, kind) {
            (Some(RepaintKind::Full), _) => Some(RepaintKind::Full),
            (_, requested) => Some(requested),
        };
    }
}

fn pango_font_string(font: &ChartFont) -> String {
    if font.bold {
        format!("{} Bold {}", font.family, font.size)
    } else {
        format!("{} {}", font.family, font.size)
    }
}

fn anchor_offset(width: f64, height: f64, anchor: TextAnchor) -> (f64, f64) {
    match anchor {
        TextAnchor::West => (0.0, -height * 0.5),
        TextAnchor::East => (-width, -height * 0.5),
        TextAnchor::North => (-width * 0.5, 0.0),
        TextAnchor::South => (-width * 0.5, -height),
        TextAnchor::Center => (-width * 0.5, -height * 0.5),
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Render(format!("{prefix}: {err}"))
}
