//! Button hover fades.
//!
//! When the pointer enters a button, its background fades in over a short
//! duration, and fades out again when the pointer leaves. The fade is purely
//! cosmetic: it never changes the layout, it only produces [`Damage`] for the
//! buttons whose intensity changed.
//!
//! A fade always runs at the same speed: reversing a half-finished fade takes
//! half as long as a full one. Durations below [`INSTANT_BELOW`] are not
//! animated at all.
//!
//! Nothing here owns a timer. Every method takes the current [`Instant`], and
//! the host calls [`ButtonHover::tick`] from its own frame clock for as long
//! as [`ButtonHover::is_animating`] returns true.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use strum::*;

use crate::button::ButtonKind;
use crate::config::ThemeConfig;
use crate::layout::{Damage, Geometry};
use crate::types::{Pos, Rect};

/// Fades configured shorter than this snap straight to their target.
pub const INSTANT_BELOW: Duration = Duration::from_millis(10);

/// The curve a hover fade follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow at both ends.
    EaseInOut,
    /// Decelerating, quadratic.
    #[default]
    EaseOutQuad,
    /// Decelerating, cubic.
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the curve.
    ///
    /// Input outside the range is clamped. Every curve is non-decreasing,
    /// starts at 0 and ends at 1.
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    (1.0 - f64::sqrt(1.0 - f64::powi(2.0 * t, 2))) / 2.0
                } else {
                    (f64::sqrt(1.0 - f64::powi(-2.0 * t + 2.0, 2)) + 1.0) / 2.0
                }
            }
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - f64::powi(1.0 - t, 3),
        }
    }
}

/// A single fade of a value from one intensity to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverAnimation {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    /// How long a fade across the whole `[0, 1]` range takes.
    full: Duration,
    easing: Easing,
}

impl HoverAnimation {
    /// Creates a fade from `from` to `to` starting at `start` and lasting
    /// exactly `duration`.
    ///
    /// Later retargets are timed as if `duration` were the length of a
    /// full-range fade.
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self { from, to, start, duration, full: duration, easing }
    }

    /// Creates a fade from `from` to `to` whose length is the share of `full`
    /// matching the distance it covers.
    pub fn towards(from: f64, to: f64, start: Instant, full: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration: scaled_duration(full, (to - from).abs()),
            full,
            easing,
        }
    }

    /// The value the fade started from.
    pub fn start_value(&self) -> f64 {
        self.from
    }

    /// The value the fade ends on.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// How long this fade lasts.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress through the fade at `now`, in `[0, 1]`.
    ///
    /// Instants before the start count as the start. A zero-length
    /// fade is always complete.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0
        }

        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64).min(1.0)
    }

    /// The interpolated value at `now`.
    ///
    /// Moves monotonically from the start value to the target, and is exactly
    /// the target once the duration has passed.
    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to
        }

        self.from + (self.to - self.from) * self.easing.ease(progress)
    }

    /// Whether the fade has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Restarts the fade at `now` towards a new target, starting from
    /// wherever it currently is.
    ///
    /// The new fade covers a shorter distance and takes proportionally less
    /// time. Retargeting to the current target changes nothing.
    pub fn retarget(&mut self, to: f64, now: Instant) {
        if to == self.to {
            return
        }

        let current = self.value_at(now);
        *self = Self::towards(current, to, now, self.full, self.easing);
    }
}

/// One millisecond plus `full` scaled by `distance`, rounded to the millisecond.
fn scaled_duration(full: Duration, distance: f64) -> Duration {
    if full < INSTANT_BELOW {
        return Duration::ZERO
    }

    let millis = (full.as_millis() as f64 * distance.clamp(0.0, 1.0)).round();
    Duration::from_millis(1 + millis as u64)
}

/// Tracks which button is hovered and the fade of each button.
///
/// At most one button is hovered at a time. Buttons that are neither hovered
/// nor fading have an intensity of zero.
///
/// The hover highlight may be painted `bleed` pixels beyond a button's hit
/// region, so damage for a button covers that margin too, clipped to the frame.
#[derive(Debug, Clone)]
pub struct ButtonHover {
    duration: Duration,
    easing: Easing,
    bleed: i32,
    hovered: Option<ButtonKind>,
    fades: IndexMap<ButtonKind, HoverAnimation>,
}

impl ButtonHover {
    /// Creates a tracker whose full-range fades take `duration`.
    ///
    /// With a duration below [`INSTANT_BELOW`], hover changes take effect
    /// immediately.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            bleed: 0,
            hovered: None,
            fades: IndexMap::new(),
        }
    }

    /// Sets how far the highlight reaches beyond the button.
    pub fn with_bleed(mut self, bleed: i32) -> Self {
        self.bleed = bleed;
        self
    }

    /// Creates a tracker using the theme's hover duration and bleed.
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self::new(Duration::from_millis(config.hover_duration_ms), Easing::default())
            .with_bleed(config.hover_bleed)
    }

    /// The button under the pointer.
    pub fn hovered(&self) -> Option<ButtonKind> {
        self.hovered
    }

    /// Whether hover changes skip the fade.
    pub fn is_instant(&self) -> bool {
        self.duration < INSTANT_BELOW
    }

    /// Whether any fade is still running.
    pub fn is_animating(&self) -> bool {
        !self.fades.is_empty()
    }

    /// The hover intensity of a button at `now`, from 0 to 1.
    pub fn intensity(&self, kind: ButtonKind, now: Instant) -> f64 {
        match self.fades.get(&kind) {
            Some(fade) => fade.value_at(now),
            None if self.hovered == Some(kind) => 1.0,
            None => 0.0,
        }
    }

    /// Moves the hover to `kind`, fading the previous button out and the new
    /// one in.
    ///
    /// Returns the buttons whose intensity is now changing.
    pub fn set_hovered(&mut self, kind: Option<ButtonKind>, now: Instant) -> Vec<ButtonKind> {
        if kind == self.hovered {
            return Vec::new()
        }

        let previous = std::mem::replace(&mut self.hovered, kind);
        let changed: Vec<_> = previous.into_iter().chain(kind).collect();

        if self.is_instant() {
            return changed
        }

        if let Some(prev) = previous {
            self.fade(prev, 0.0, now);
        }
        if let Some(next) = kind {
            self.fade(next, 1.0, now);
        }

        changed
    }

    /// Updates the hover from a pointer position, in frame coordinates.
    ///
    /// `None` means the pointer left the frame. Returns the regions of the
    /// buttons whose hover changed.
    pub fn pointer_moved(&mut self, geometry: &Geometry, pos: Option<Pos>, now: Instant) -> Damage {
        let kind = pos.and_then(|p| geometry.button_at(p)).map(|b| b.kind);
        let changed = self.set_hovered(kind, now);

        self.damage_for(geometry, changed, self.bleed)
    }

    /// Advances the fades to `now`.
    ///
    /// Returns the region of every button that was fading. Fades that
    /// completed are reported one last time and then dropped.
    pub fn tick(&mut self, geometry: &Geometry, now: Instant) -> Damage {
        let fading: Vec<_> = self.fades.keys().copied().collect();
        self.fades.retain(|_, fade| !fade.is_finished(now));

        self.damage_for(geometry, fading, self.bleed)
    }

    /// Applies a new theme, keeping the hovered button.
    ///
    /// Running fades finish as they started, unless the theme turns fading
    /// off, in which case they snap to their targets. Returns the regions
    /// that look different under the new theme.
    pub fn reconfigure(&mut self, config: &ThemeConfig, geometry: &Geometry) -> Damage {
        let bleed = self.bleed.max(config.hover_bleed);
        let bleed_changed = self.bleed != config.hover_bleed;

        self.duration = Duration::from_millis(config.hover_duration_ms);
        self.bleed = config.hover_bleed;

        let mut changed = Vec::new();
        if self.is_instant() {
            changed.extend(self.fades.drain(..).map(|(kind, _)| kind));
        }
        if bleed_changed {
            changed.extend(self.hovered);
            changed.extend(self.fades.keys().copied());
        }

        self.damage_for(geometry, changed, bleed)
    }

    /// Forgets the hover and fades of buttons `geometry` no longer shows.
    pub fn forget_hidden(&mut self, geometry: &Geometry) {
        if self.hovered.is_some_and(|k| geometry.button_rect(k).is_none()) {
            self.hovered = None;
        }
        self.fades.retain(|kind, _| geometry.button_rect(*kind).is_some());
    }

    fn fade(&mut self, kind: ButtonKind, to: f64, now: Instant) {
        let from = if to > 0.0 { 0.0 } else { 1.0 };
        let (duration, easing) = (self.duration, self.easing);

        self.fades
            .entry(kind)
            .and_modify(|fade| fade.retarget(to, now))
            .or_insert_with(|| HoverAnimation::towards(from, to, now, duration, easing));
    }

    fn damage_for<I>(&self, geometry: &Geometry, kinds: I, bleed: i32) -> Damage
    where
        I: IntoIterator<Item = ButtonKind>,
    {
        let region = |rect: Rect| rect.inflate(bleed).intersect(geometry.frame_rect);

        let mut damage = Damage::new();
        damage.extend(kinds.into_iter().filter_map(|k| geometry.button_rect(k)).map(region));
        damage
    }
}
