//! Frame layout.
//!
//! The [`LayoutEngine`] turns a [`WindowState`] snapshot, the two configured
//! [`ButtonSpec`]s and the font height into a [`Geometry`]: where the borders,
//! title bar, buttons and caption go. The layout is recomputed from scratch on
//! every relevant change and never patched incrementally, so two calls with the
//! same inputs always produce the same `Geometry`.
//!
//! # Coordinates
//!
//! The frame is anchored at (0, 0). From top to bottom it consists of the
//! title bar, the client area (absent while shaded), and the bottom border.
//! The left and right borders run alongside the client area.
//!
//! ```text
//! +---+--------+----------------------+---------+---+
//! |   | left   |       caption        |  right  |   |  title bar
//! +---+--------+----------------------+---------+---+
//! |   |                                         |   |
//! | L |               client area               | R |
//! |   |                                         |   |
//! +---+-----------------------------------------+---+
//! |  grab  |            grab            |  grab    |  bottom border
//! +--------+----------------------------+----------+
//! ```

mod damage;

pub use damage::Damage;

use crate::button::{ButtonKind, ButtonSpec};
use crate::config::ThemeConfig;
use crate::state::WindowState;
use crate::types::{Logical, Pos, Rect, Size};

/// A button positioned within the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedButton {
    /// What the button does.
    pub kind: ButtonKind,
    /// The button's hit region, in frame coordinates.
    pub rect: Rect,
}

/// A laid out group of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ButtonGroup {
    /// The top-left corner of the group.
    pub origin: Pos,
    /// The size of the group. Zero-width if it has no visible buttons.
    pub size: Size<i32, Logical>,
    /// The visible buttons, left to right.
    pub buttons: Vec<PlacedButton>,
}

impl ButtonGroup {
    /// The bounding rectangle of the group.
    pub fn rect(&self) -> Rect {
        Rect { point: self.origin, size: self.size }
    }

    /// The kinds of the visible buttons, left to right.
    pub fn kinds(&self) -> impl Iterator<Item = ButtonKind> + '_ {
        self.buttons.iter().map(|b| b.kind)
    }

    /// The number of visible buttons.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Whether the group shows no buttons.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// The three resize handles partitioning the bottom border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabHandles {
    /// The bottom-left corner handle.
    pub left: Rect,
    /// The stretch between the two corner handles.
    pub center: Rect,
    /// The bottom-right corner handle.
    pub right: Rect,
}

/// The complete layout of a decorated frame.
///
/// When the window is too narrow for both button groups, the right group is
/// pushed past the frame's right edge rather than over the left group. The
/// group rects keep their full extent, but [`button_rect`](Geometry::button_rect),
/// [`button_at`](Geometry::button_at) and the damage from
/// [`LayoutEngine::invalidate`] only ever cover the part inside the frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// The whole frame, anchored at (0, 0).
    pub frame_rect: Rect,
    /// Height of the title bar.
    pub title_bar_height: i32,
    /// Width of the left border.
    pub border_left: i32,
    /// Width of the right border.
    pub border_right: i32,
    /// Height of the bottom border.
    pub border_bottom: i32,
    /// Edge length of a (square) button.
    pub button_size: i32,
    /// The buttons anchored to the left of the title bar.
    pub left_group: ButtonGroup,
    /// The buttons anchored to the right of the title bar.
    pub right_group: ButtonGroup,
    /// Where the window title goes, between the two groups.
    pub caption_rect: Rect,
    /// The resize handles in the bottom border. None while maximized.
    pub grab_handles: Option<GrabHandles>,
}

impl Geometry {
    /// The title bar strip across the full frame width.
    pub fn title_rect(&self) -> Rect {
        let (title, _) = self.frame_rect.split_at_height(self.title_bar_height);
        title
    }

    /// The bottom border strip across the full frame width.
    pub fn bottom_rect(&self) -> Rect {
        let (_, bottom) = self.frame_rect
            .split_at_height(self.frame_rect.size.height - self.border_bottom);
        bottom
    }

    /// The area left for the window contents.
    pub fn client_rect(&self) -> Rect {
        Rect::from_edges(
            self.frame_rect.left() + self.border_left,
            self.frame_rect.top() + self.title_bar_height,
            self.frame_rect.right() - self.border_right,
            self.frame_rect.bottom() - self.border_bottom,
        )
    }

    /// The strips the decoration paints: title bar, bottom border, then the
    /// left and right borders.
    ///
    /// Together with [`client_rect`](Geometry::client_rect) they tile the
    /// frame. Without a client area (shaded, or no room) this is the whole
    /// frame in one piece.
    pub fn decoration_strips(&self) -> Vec<Rect> {
        self.frame_rect.subtract(self.client_rect())
    }

    /// Every visible button, left group first.
    pub fn buttons(&self) -> impl Iterator<Item = &PlacedButton> {
        self.left_group.buttons.iter().chain(self.right_group.buttons.iter())
    }

    /// The hit region of a visible button, clipped to the frame.
    ///
    /// A button pushed entirely outside the frame has an empty region.
    pub fn button_rect(&self, kind: ButtonKind) -> Option<Rect> {
        self.buttons()
            .find(|b| b.kind == kind)
            .map(|b| b.rect.intersect(self.frame_rect))
    }

    /// The button under a point, if any.
    ///
    /// Spacers and points outside the frame are never hit.
    pub fn button_at(&self, pos: Pos) -> Option<&PlacedButton> {
        if !self.frame_rect.contains_point(pos) {
            return None
        }

        self.buttons()
            .filter(|b| b.kind != ButtonKind::Spacer)
            .find(|b| b.rect.contains_point(pos))
    }
}

/// Computes decoration geometry from window state.
///
/// A `LayoutEngine` holds nothing but its [`ThemeConfig`]; each computation
/// is a pure function of its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    config: ThemeConfig,
}

impl LayoutEngine {
    /// Creates a new engine laying out with `config`.
    pub fn new(config: ThemeConfig) -> Self {
        Self { config }
    }

    /// The layout constants in use.
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// The title bar height for a given font height.
    ///
    /// Never below the theme's `min_title_height`, and non-decreasing
    /// in `font_height`.
    pub fn title_bar_height(&self, font_height: i32) -> i32 {
        let font_height = checked_font_height(font_height);
        let scaled = (self.config.title_scale * font_height as f64).round() as i32;

        scaled.max(self.config.min_title_height)
    }

    /// The edge length of a button in a title bar of the given height.
    pub fn button_size(&self, title_bar_height: i32) -> i32 {
        title_bar_height
            .saturating_sub(2 * self.config.button_margin)
            .max(self.config.min_button_size)
    }

    /// The configured buttons of `spec` that `state` currently permits,
    /// in configured order.
    pub fn visible_buttons(spec: &ButtonSpec, state: &WindowState) -> Vec<ButtonKind> {
        spec.visible(state.capabilities).collect()
    }

    /// Lays out the frame.
    ///
    /// `font_height` is the line height (ascent + descent) of the title font in
    /// device units and must be positive; the client size in `state` must not be
    /// negative. Violations panic in debug builds and are clamped otherwise.
    pub fn compute_geometry(
        &self,
        state: &WindowState,
        left: &ButtonSpec,
        right: &ButtonSpec,
        font_height: i32,
    ) -> Geometry {
        let cfg = &self.config;

        let width = checked_dimension("width", state.width);
        let height = checked_dimension("height", state.height);

        let title_bar_height = self.title_bar_height(font_height);
        let button_size = self.button_size(title_bar_height);

        let side = cfg.border_width;
        let border_bottom = if state.is_maximized {
            side
        } else {
            side + cfg.grab_extra_height
        };
        let client_height = if state.is_shaded { 0 } else { height };

        let frame_rect = Rect::new(
            0, 0,
            width.saturating_add(2 * side),
            title_bar_height.saturating_add(client_height).saturating_add(border_bottom),
        );

        let button_y = (title_bar_height - button_size) / 2;

        let left_kinds = Self::visible_buttons(left, state);
        let left_group = self.place_group(&left_kinds, side, button_y, button_size);

        // the right group hangs off the right border and grows leftward,
        // but never into the left group
        let right_kinds = Self::visible_buttons(right, state);
        let right_width = self.group_width(&right_kinds, button_size);
        let right_x = (frame_rect.right() - side - right_width).max(left_group.rect().right());
        let right_group = self.place_group(&right_kinds, right_x, button_y, button_size);

        let caption_left = left_group.rect().right();
        let caption_right = right_group.origin.x;
        let caption_rect = Rect::new(
            caption_left,
            0,
            (caption_right - caption_left).max(0),
            title_bar_height,
        );

        let grab_handles = (!state.is_maximized).then(|| {
            let strip = Rect::new(0, frame_rect.bottom() - border_bottom, frame_rect.size.width, border_bottom);
            let (left, center, right) = strip.split_columns(cfg.grab_handle_width, cfg.grab_handle_width);

            GrabHandles { left, center, right }
        });

        trace!(
            "layout: frame {}x{}, title {}, buttons {}px ({} + {})",
            frame_rect.size.width, frame_rect.size.height, title_bar_height,
            button_size, left_group.len(), right_group.len()
        );

        Geometry {
            frame_rect,
            title_bar_height,
            border_left: side,
            border_right: side,
            border_bottom,
            button_size,
            left_group,
            right_group,
            caption_rect,
            grab_handles,
        }
    }

    /// Returns the regions that must be repainted to go from `old` to `new`.
    ///
    /// If the frame or any border moved, that is the whole new frame.
    /// Otherwise it covers the old and new extent of every button group and
    /// of the caption that changed, clipped to the frame.
    pub fn invalidate(old: &Geometry, new: &Geometry) -> Damage {
        let frame_moved = old.frame_rect != new.frame_rect
            || old.title_bar_height != new.title_bar_height
            || old.border_left != new.border_left
            || old.border_right != new.border_right
            || old.border_bottom != new.border_bottom;

        if frame_moved {
            return Damage::full(new.frame_rect)
        }

        let mut damage = Damage::new();
        let mut add = |a: Rect, b: Rect| damage.add(a.union(b).intersect(new.frame_rect));

        if old.left_group != new.left_group {
            add(old.left_group.rect(), new.left_group.rect());
        }
        if old.right_group != new.right_group {
            add(old.right_group.rect(), new.right_group.rect());
        }
        if old.caption_rect != new.caption_rect {
            add(old.caption_rect, new.caption_rect);
        }

        damage
    }

    fn button_width(&self, kind: ButtonKind, button_size: i32) -> i32 {
        match kind {
            ButtonKind::Spacer => self.config.spacer_width,
            _ => button_size,
        }
    }

    fn group_width(&self, kinds: &[ButtonKind], button_size: i32) -> i32 {
        let buttons = kinds.iter()
            .map(|k| self.button_width(*k, button_size))
            .fold(0i32, i32::saturating_add);
        let gaps = (kinds.len() as i32 - 1).max(0).saturating_mul(self.config.button_spacing);

        buttons.saturating_add(gaps)
    }

    fn place_group(&self, kinds: &[ButtonKind], x: i32, y: i32, button_size: i32) -> ButtonGroup {
        let mut buttons = Vec::with_capacity(kinds.len());
        let mut cursor = x;

        for &kind in kinds {
            let width = self.button_width(kind, button_size);
            buttons.push(PlacedButton {
                kind,
                rect: Rect::new(cursor, y, width, button_size),
            });
            cursor = cursor.saturating_add(width).saturating_add(self.config.button_spacing);
        }

        let size = if buttons.is_empty() {
            Size::new(0, button_size)
        } else {
            Size::new(self.group_width(kinds, button_size), button_size)
        };

        ButtonGroup {
            origin: Pos::new(x, y),
            size,
            buttons,
        }
    }
}

fn checked_font_height(font_height: i32) -> i32 {
    if font_height < 1 {
        precondition_failed!("font height must be positive, got {}", font_height);
        return 1
    }
    font_height
}

fn checked_dimension(name: &str, value: i32) -> i32 {
    if value < 0 {
        precondition_failed!("client {} must not be negative, got {}", name, value);
        return 0
    }
    value
}

#[cfg(test)]
mod tests;
