//! The decoration of a single window.
//!
//! A [`Decoration`] is what the host compositor talks to. It keeps the last
//! [`Geometry`] it computed together with the window state that geometry was
//! computed from, and turns every notification into the [`Damage`] the painter
//! has to repaint.

use std::time::Instant;

use custom_debug_derive::Debug;
use tracing::{debug, instrument};

use crate::button::{ButtonKind, ButtonSpec, Glyph};
use crate::config::ThemeConfig;
use crate::hover::ButtonHover;
use crate::layout::{Damage, Geometry, LayoutEngine};
use crate::state::{StateField, WindowState};
use crate::types::{Color, Pos};

/// Code run with every non-empty [`Damage`] a decoration produces.
///
/// A `DamageHook` is just a boxed closure; hosts typically use one to
/// schedule a repaint.
pub type DamageHook = Box<dyn FnMut(&Damage)>;

/// The interface the host invokes whenever a field of the window state changes.
pub trait StateObserver {
    /// Notifies the observer that `field` has changed. `state` is the window
    /// state after the change.
    ///
    /// Returns the regions that must be repainted.
    fn on_state_changed(&mut self, field: StateField, state: &WindowState) -> Damage;
}

/// A decorated window frame.
///
/// Each change recomputes the whole [`Geometry`] and diffs it against the
/// cached one. On top of what moved, some changes repaint regions whose layout
/// stays the same:
///
/// - focus changes repaint the caption and the frame tint, which covers every
///   decoration strip but never the client area;
/// - caption changes repaint the caption;
/// - toggles repaint the buttons showing them.
#[derive(Debug)]
pub struct Decoration {
    engine: LayoutEngine,
    left: ButtonSpec,
    right: ButtonSpec,
    font_height: i32,
    geometry: Geometry,
    state: WindowState,
    hover: ButtonHover,
    #[debug(skip)]
    hooks: Vec<DamageHook>,
}

impl Decoration {
    /// Creates a decoration for a window currently in `state`.
    ///
    /// The button specs are expected to have been validated when the
    /// configuration was loaded, see [`validate_groups`](crate::button::validate_groups).
    pub fn new(
        config: ThemeConfig,
        left: ButtonSpec,
        right: ButtonSpec,
        font_height: i32,
        state: &WindowState,
    ) -> Self {
        let hover = ButtonHover::from_config(&config);
        let engine = LayoutEngine::new(config);
        let geometry = engine.compute_geometry(state, &left, &right, font_height);

        Self {
            engine,
            left,
            right,
            font_height,
            geometry,
            state: state.clone(),
            hover,
            hooks: Vec::new(),
        }
    }

    /// The current layout.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The window state the current layout was computed from.
    pub fn state(&self) -> &WindowState {
        &self.state
    }

    /// The theme in use.
    pub fn config(&self) -> &ThemeConfig {
        self.engine.config()
    }

    /// The configured left and right button groups.
    pub fn buttons(&self) -> (&ButtonSpec, &ButtonSpec) {
        (&self.left, &self.right)
    }

    /// The tint of the frame, depending on whether the window has focus.
    pub fn frame_tint(&self) -> Color {
        let palette = &self.engine.config().palette;

        if self.state.is_active {
            palette.active_tint
        } else {
            palette.inactive_tint
        }
    }

    /// The background of a button at `now`: the frame tint, blended towards
    /// the palette's hover tint by the button's hover intensity.
    pub fn button_tint(&self, kind: ButtonKind, now: Instant) -> Color {
        let hover_tint = self.engine.config().palette.hover_tint;

        self.frame_tint().mix(hover_tint, self.hover.intensity(kind, now))
    }

    /// The glyph a button currently shows.
    pub fn glyph(&self, kind: ButtonKind) -> Glyph {
        kind.glyph(&self.state)
    }

    /// The hover state of the buttons.
    pub fn hover(&self) -> &ButtonHover {
        &self.hover
    }

    /// Registers a hook to run with every non-empty damage.
    pub fn add_damage_hook(&mut self, hook: DamageHook) {
        self.hooks.push(hook);
    }

    /// Replaces the button groups.
    pub fn set_buttons(&mut self, left: ButtonSpec, right: ButtonSpec) -> Damage {
        self.left = left;
        self.right = right;

        let damage = self.relayout();
        self.emit(damage)
    }

    /// Changes the title font height.
    pub fn set_font_height(&mut self, font_height: i32) -> Damage {
        if font_height == self.font_height {
            return Damage::new()
        }
        self.font_height = font_height;

        let damage = self.relayout();
        self.emit(damage)
    }

    /// Switches to a new theme.
    ///
    /// The hovered button stays hovered. A palette change repaints the whole
    /// frame.
    pub fn reconfigure(&mut self, config: ThemeConfig) -> Damage {
        let repaint = config.palette != self.engine.config().palette;

        self.engine = LayoutEngine::new(config);

        let mut damage = self.relayout();
        damage.merge(self.hover.reconfigure(self.engine.config(), &self.geometry));
        if repaint {
            damage.merge(Damage::full(self.geometry.frame_rect));
        }
        self.emit(damage)
    }

    /// Re-reads the whole window state, as if every field that differs
    /// from the cached state had been reported.
    pub fn sync(&mut self, state: &WindowState) -> Damage {
        let changed = self.state.changed_fields(state);
        if changed.is_empty() {
            return Damage::new()
        }

        let old = std::mem::replace(&mut self.state, state.clone());
        let mut damage = self.relayout();

        for field in changed {
            damage.merge(self.field_damage(field, &old));
        }
        self.emit(damage)
    }

    /// Updates the hovered button from a pointer position in frame
    /// coordinates. `None` means the pointer left the frame.
    pub fn pointer_moved(&mut self, pos: Option<Pos>, now: Instant) -> Damage {
        let damage = self.hover.pointer_moved(&self.geometry, pos, now);
        self.emit(damage)
    }

    /// Advances the hover fades. Call this from the frame clock while
    /// [`ButtonHover::is_animating`] is true.
    pub fn animate(&mut self, now: Instant) -> Damage {
        let damage = self.hover.tick(&self.geometry, now);
        self.emit(damage)
    }

    fn relayout(&mut self) -> Damage {
        let geometry = self.engine
            .compute_geometry(&self.state, &self.left, &self.right, self.font_height);
        let damage = LayoutEngine::invalidate(&self.geometry, &geometry);

        self.hover.forget_hidden(&geometry);

        debug!(
            "relayout: {} regions{}",
            damage.len(),
            if damage.is_full() { " (full)" } else { "" }
        );
        self.geometry = geometry;
        damage
    }

    /// Repaint caused by `field` changing from its value in `old`, beyond
    /// what the relayout already covers.
    fn field_damage(&self, field: StateField, old: &WindowState) -> Damage {
        let mut damage = Damage::new();
        // frame changes are already repainted in full by the relayout
        if field.affects_frame() || field.equal_in(old, &self.state) {
            return damage
        }

        let geom = &self.geometry;
        match field {
            StateField::Active => {
                damage.add(geom.caption_rect);
                damage.extend(geom.decoration_strips());
            }
            StateField::Caption => damage.add(geom.caption_rect),
            StateField::OnAllDesktops | StateField::KeepAbove | StateField::KeepBelow => {
                damage.extend(
                    geom.buttons()
                        .filter(|b| b.kind.is_engaged(old) != b.kind.is_engaged(&self.state))
                        .map(|b| b.rect.intersect(geom.frame_rect)),
                );
            }
            // capabilities move the buttons
            _ => {}
        }
        damage
    }

    fn emit(&mut self, damage: Damage) -> Damage {
        if !damage.is_empty() {
            for hook in self.hooks.iter_mut() {
                hook(&damage);
            }
        }
        damage
    }
}

impl StateObserver for Decoration {
    #[instrument(level = "trace", skip(self, state))]
    fn on_state_changed(&mut self, field: StateField, state: &WindowState) -> Damage {
        let old = std::mem::replace(&mut self.state, state.clone());

        let mut damage = self.relayout();
        damage.merge(self.field_damage(field, &old));

        self.emit(damage)
    }
}
