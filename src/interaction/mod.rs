//! Interactive region registry and event-to-data-state dispatch.
//!
//! Regions are registered fresh on every render pass and superseded
//! wholesale by the next pass. Callbacks mutate data state and *return*
//! their cursor/repaint signals as an [`InteractionEffect`]; the dispatcher
//! applies the signals only when the callback succeeds, which keeps
//! mutation and signal atomic from the callback's perspective.

use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, CursorKind, Rect, RepaintKind, TextAnchor};

/// Cursor/repaint signals produced by a region callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionEffect {
    pub cursor: Option<CursorKind>,
    pub repaint: Option<RepaintKind>,
}

impl InteractionEffect {
    pub const NONE: Self = Self {
        cursor: None,
        repaint: None,
    };

    #[must_use]
    pub const fn with_cursor(mut self, cursor: CursorKind) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub const fn with_repaint(mut self, repaint: RepaintKind) -> Self {
        self.repaint = Some(repaint);
        self
    }
}

pub type PopupCallback = Box<dyn FnMut() -> ChartResult<InteractionEffect>>;

/// Identifier of a registered region. Ids are never reused within a canvas
/// lifetime, so a stale id from a superseded pass can never alias a fresh
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(u64);

/// An interactive screen region with hover-enter, hover-exit and click
/// behaviors.
pub struct Popup {
    pub rect: Rect,
    pub priority: i32,
    pub anchor: TextAnchor,
    on_enter: Option<PopupCallback>,
    on_exit: Option<PopupCallback>,
    on_click: Option<PopupCallback>,
}

impl Popup {
    #[must_use]
    pub fn new(rect: Rect, priority: i32, anchor: TextAnchor) -> Self {
        Self {
            rect,
            priority,
            anchor,
            on_enter: None,
            on_exit: None,
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_enter(mut self, callback: PopupCallback) -> Self {
        self.on_enter = Some(callback);
        self
    }

    #[must_use]
    pub fn on_exit(mut self, callback: PopupCallback) -> Self {
        self.on_exit = Some(callback);
        self
    }

    #[must_use]
    pub fn on_click(mut self, callback: PopupCallback) -> Self {
        self.on_click = Some(callback);
        self
    }
}

/// Per-pass store of interactive regions with hover-state tracking.
#[derive(Default)]
pub struct PopupRegistry {
    popups: Vec<(PopupId, Popup)>,
    next_id: u64,
    current: Option<PopupId>,
}

impl PopupRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all regions of the previous pass. The open-region marker is
    /// kept; render code re-marks it (or not) while re-registering.
    pub fn begin_pass(&mut self) {
        self.popups.clear();
    }

    pub fn add(&mut self, popup: Popup) -> PopupId {
        let id = PopupId(self.next_id);
        self.next_id += 1;
        self.popups.push((id, popup));
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.popups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    /// Marks a region as already open, so hovering it does not re-fire its
    /// enter behavior.
    pub fn set_current(&mut self, id: Option<PopupId>) {
        self.current = id;
    }

    #[must_use]
    pub fn current(&self) -> Option<PopupId> {
        self.current
    }

    /// Rectangles of all registered regions, in registration order.
    pub fn regions(&self) -> impl Iterator<Item = Rect> + '_ {
        self.popups.iter().map(|(_, popup)| popup.rect)
    }

    #[must_use]
    pub fn region(&self, id: PopupId) -> Option<Rect> {
        self.popups
            .iter()
            .find(|(popup_id, _)| *popup_id == id)
            .map(|(_, popup)| popup.rect)
    }

    /// Topmost region under the pointer: highest priority wins, later
    /// registration breaks ties.
    #[must_use]
    pub fn hit(&self, x: f64, y: f64) -> Option<PopupId> {
        self.popups
            .iter()
            .filter(|(_, popup)| popup.rect.contains(x, y))
            .max_by_key(|(id, popup)| (popup.priority, id.0))
            .map(|(id, _)| *id)
    }

    /// True when the region under the pointer reacts to clicks.
    #[must_use]
    pub fn is_clickable(&self, x: f64, y: f64) -> bool {
        self.hit(x, y)
            .and_then(|id| self.popups.iter().find(|(popup_id, _)| *popup_id == id))
            .is_some_and(|(_, popup)| popup.on_click.is_some())
    }

    /// Fires exit/enter behaviors for a pointer move and returns their
    /// outcomes in firing order.
    pub fn mouse_move(&mut self, x: f64, y: f64) -> Vec<ChartResult<InteractionEffect>> {
        let hit = self.hit(x, y);
        if hit == self.current {
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(2);
        if let Some(previous) = self.current.take() {
            if let Some(outcome) = self.fire(previous, Behavior::Exit) {
                outcomes.push(outcome);
            }
        }
        if let Some(next) = hit {
            if let Some(outcome) = self.fire(next, Behavior::Enter) {
                outcomes.push(outcome);
            }
            self.current = Some(next);
        }
        outcomes
    }

    /// Fires the exit behavior of the open region, if any.
    pub fn mouse_out(&mut self) -> Vec<ChartResult<InteractionEffect>> {
        let Some(previous) = self.current.take() else {
            return Vec::new();
        };
        self.fire(previous, Behavior::Exit).into_iter().collect()
    }

    /// Fires the click behavior of the region under the pointer, if any.
    pub fn mouse_click(&mut self, x: f64, y: f64) -> Vec<ChartResult<InteractionEffect>> {
        let Some(id) = self.hit(x, y) else {
            return Vec::new();
        };
        self.fire(id, Behavior::Click).into_iter().collect()
    }

    fn fire(&mut self, id: PopupId, behavior: Behavior) -> Option<ChartResult<InteractionEffect>> {
        let (_, popup) = self
            .popups
            .iter_mut()
            .find(|(popup_id, _)| *popup_id == id)?;
        let callback = match behavior {
            Behavior::Enter => popup.on_enter.as_mut(),
            Behavior::Exit => popup.on_exit.as_mut(),
            Behavior::Click => popup.on_click.as_mut(),
        }?;
        Some(callback().map_err(|err| ChartError::Interaction(err.to_string())))
    }
}

#[derive(Clone, Copy)]
enum Behavior {
    Enter,
    Exit,
    Click,
}

/// Routes a pointer move through the canvas's region registry and applies
/// the resulting signals.
pub fn fire_mouse_move(canvas: &mut dyn Canvas, x: f64, y: f64) {
    let outcomes = canvas.popups_mut().mouse_move(x, y);
    apply_outcomes(canvas, outcomes);
}

/// Routes a pointer-left event through the canvas's region registry.
pub fn fire_mouse_out(canvas: &mut dyn Canvas) {
    let outcomes = canvas.popups_mut().mouse_out();
    apply_outcomes(canvas, outcomes);
}

/// Routes a click through the canvas's region registry and applies the
/// resulting signals.
pub fn fire_mouse_click(canvas: &mut dyn Canvas, x: f64, y: f64) {
    let outcomes = canvas.popups_mut().mouse_click(x, y);
    apply_outcomes(canvas, outcomes);
}

fn apply_outcomes(canvas: &mut dyn Canvas, outcomes: Vec<ChartResult<InteractionEffect>>) {
    for outcome in outcomes {
        match outcome {
            Ok(effect) => {
                match effect.cursor {
                    Some(CursorKind::Click) => canvas.show_click_pointer(),
                    Some(CursorKind::Normal) => canvas.show_normal_pointer(),
                    None => {}
                }
                if let Some(kind) = effect.repaint {
                    canvas.fire_repaint(kind);
                }
            }
            Err(err) => canvas.show_error(&err),
        }
    }
}
