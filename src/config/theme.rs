//! The layout constants of the theme.

use lacquer_macro::ConfigSection;

use crate::types::Color;
use crate::{lacquererr, Result};

use super::ConfigSection;

/// The two shipped sets of layout constants.
///
/// The theme has historically come in a plain flavour and a richer one with
/// button backgrounds and pin icons. Their spacing constants differ, and they
/// are kept as alternatives rather than reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThemePreset {
    /// Thin borders and tightly packed buttons.
    Minimal,
    /// Wider borders, larger buttons and more generous spacing.
    #[default]
    Themed,
}

/// Frame colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigSection)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    /// Frame tint of the focused window.
    #[key]
    pub active_tint: Color,
    /// Frame tint of unfocused windows.
    #[key]
    pub inactive_tint: Color,
    /// Button background at full hover intensity.
    #[key]
    pub hover_tint: Color,
}

/// All the constants the layout engine works from.
///
/// A `ThemeConfig` is immutable once handed to a
/// [`LayoutEngine`](crate::LayoutEngine); to change the layout, build a new one and
/// pass it to [`Decoration::reconfigure`](crate::Decoration::reconfigure).
///
/// # Construction
///
/// Start from a preset with [`ThemeConfig::preset`], or adjust one with
/// [`ThemeConfig::builder`]:
///
/// ```rust
/// use lacquer::config::{ThemeConfig, ThemePreset, no_checks};
///
/// let config = ThemeConfig::builder(ThemePreset::Minimal)
///     .border_width(3)
///     .finish(no_checks)
///     .expect("invalid config");
///
/// assert_eq!(config.border_width, 3);
/// ```
#[derive(Debug, Clone, PartialEq, ConfigSection)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeConfig {
    /// Width of the left and right borders. The bottom border is this
    /// wide when the window is maximized.
    #[key]
    pub border_width: i32,
    /// Height added to the bottom border for the resize grab
    /// when the window is not maximized.
    #[key]
    pub grab_extra_height: i32,
    /// Width of each of the two fixed grab handles at the bottom corners.
    #[key]
    pub grab_handle_width: i32,
    /// The smallest title bar height, whatever the font.
    #[key]
    pub min_title_height: i32,
    /// Title bar height as a multiple of the font height.
    #[key]
    pub title_scale: f64,
    /// The smallest button size.
    #[key]
    pub min_button_size: i32,
    /// Space kept free above and below buttons in the title bar.
    #[key]
    pub button_margin: i32,
    /// Horizontal space between adjacent buttons of a group.
    #[key]
    pub button_spacing: i32,
    /// Width of a spacer button.
    #[key]
    pub spacer_width: i32,
    /// How long a hover fade across the full range takes, in milliseconds.
    /// Below 10, hover changes are not animated.
    #[key]
    pub hover_duration_ms: u64,
    /// How far the hover highlight reaches beyond a button's hit region.
    #[key]
    pub hover_bleed: i32,
    /// Frame colors.
    #[subsection]
    pub palette: Palette,
}

//* passing an Option<F> instead would cause type inference issues at call sites.
/// A const function that simply returns Ok. Pass this into validate if you have no
/// additional checks to run.
pub const fn no_checks(_: &ThemeConfig) -> Result<()> {
    Ok(())
}

impl ThemeConfig {
    /// Returns the constants of the given preset.
    pub fn preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Minimal => ThemeConfig {
                border_width: 2,
                grab_extra_height: 4,
                grab_handle_width: 20,
                min_title_height: 16,
                title_scale: 1.25,
                min_button_size: 12,
                button_margin: 2,
                button_spacing: 1,
                spacer_width: 8,
                hover_duration_ms: 0,
                hover_bleed: 1,
                palette: Palette {
                    active_tint: Color::from_hex(0x3c6eb4ff),
                    inactive_tint: Color::from_hex(0x9a9a9aff),
                    hover_tint: Color::from_hex(0xffffffff),
                },
            },
            ThemePreset::Themed => ThemeConfig {
                border_width: 4,
                grab_extra_height: 6,
                grab_handle_width: 24,
                min_title_height: 22,
                title_scale: 1.25,
                min_button_size: 16,
                button_margin: 3,
                button_spacing: 2,
                spacer_width: 10,
                hover_duration_ms: 150,
                hover_bleed: 1,
                palette: Palette {
                    active_tint: Color::from_hex(0x2e5a8cff),
                    inactive_tint: Color::from_hex(0xb4b4b4ff),
                    hover_tint: Color::from_hex(0xdce8f5ff),
                },
            },
        }
    }

    /// Returns a [`ThemeConfigBuilder`] starting from the given preset.
    pub fn builder(preset: ThemePreset) -> ThemeConfigBuilder {
        ThemeConfigBuilder::new(preset)
    }

    /// Checks the configuration to verify that all invariants are upheld.
    ///
    /// If you have no additional checks to run, pass in [`no_checks`] as a
    /// function pointer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lacquer::config::{ThemeConfig, ThemePreset};
    /// use lacquer::LacquerError::InvalidConfig;
    ///
    /// let config = ThemeConfig::preset(ThemePreset::Themed);
    ///
    /// // a host that wants square frames
    /// let res = config.validate(|cfg: &ThemeConfig| {
    ///     if cfg.grab_extra_height == 0 {
    ///         Ok(())
    ///     } else {
    ///         Err(InvalidConfig("grab handles are not supported".into()))
    ///     }
    /// });
    ///
    /// assert!(res.is_err());
    /// ```
    pub fn validate<F>(&self, checks: F) -> Result<()>
    where
        F: FnOnce(&ThemeConfig) -> Result<()>,
    {
        if self.min_title_height < 1 {
            return Err(lacquererr!(invalidcfg: "min_title_height must be positive"));
        }
        if self.min_button_size < 1 {
            return Err(lacquererr!(invalidcfg: "min_button_size must be positive"));
        }
        if !self.title_scale.is_finite() || self.title_scale <= 0.0 {
            return Err(lacquererr!(invalidcfg: format!(
                "title_scale must be a positive number, got {}", self.title_scale
            )));
        }

        let lengths = [
            ("border_width", self.border_width),
            ("grab_extra_height", self.grab_extra_height),
            ("grab_handle_width", self.grab_handle_width),
            ("button_margin", self.button_margin),
            ("button_spacing", self.button_spacing),
            ("spacer_width", self.spacer_width),
            ("hover_bleed", self.hover_bleed),
        ];
        if let Some((name, _)) = lengths.iter().find(|(_, v)| *v < 0) {
            return Err(lacquererr!(invalidcfg: format!("{name} must not be negative")));
        }

        if self.min_button_size + 2 * self.button_margin > self.min_title_height {
            return Err(lacquererr!(invalidcfg: format!(
                "buttons of {} px with {} px margins do not fit a {} px title bar",
                self.min_button_size, self.button_margin, self.min_title_height
            )));
        }

        checks(self)?;
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> ThemeConfig {
        ThemeConfig::preset(ThemePreset::default())
    }
}

/// A helper type to construct a [`ThemeConfig`].
#[derive(Debug, Clone)]
pub struct ThemeConfigBuilder {
    inner: ThemeConfig,
}

impl ThemeConfigBuilder {
    /// Creates a new builder from the constants of `preset`.
    pub fn new(preset: ThemePreset) -> Self {
        Self {
            inner: ThemeConfig::preset(preset),
        }
    }

    /// Sets the side border width.
    pub fn border_width(mut self, border_width: i32) -> Self {
        self.inner.border_width = border_width;
        self
    }

    /// Sets the extra bottom border height reserved for the resize grab.
    pub fn grab_extra_height(mut self, grab_extra_height: i32) -> Self {
        self.inner.grab_extra_height = grab_extra_height;
        self
    }

    /// Sets the width of the corner grab handles.
    pub fn grab_handle_width(mut self, grab_handle_width: i32) -> Self {
        self.inner.grab_handle_width = grab_handle_width;
        self
    }

    /// Sets the title bar height floor.
    pub fn min_title_height(mut self, min_title_height: i32) -> Self {
        self.inner.min_title_height = min_title_height;
        self
    }

    /// Sets the title bar height as a multiple of the font height.
    pub fn title_scale(mut self, title_scale: f64) -> Self {
        self.inner.title_scale = title_scale;
        self
    }

    /// Sets the button size floor.
    pub fn min_button_size(mut self, min_button_size: i32) -> Self {
        self.inner.min_button_size = min_button_size;
        self
    }

    /// Sets the vertical margin around buttons.
    pub fn button_margin(mut self, button_margin: i32) -> Self {
        self.inner.button_margin = button_margin;
        self
    }

    /// Sets the space between buttons.
    pub fn button_spacing(mut self, button_spacing: i32) -> Self {
        self.inner.button_spacing = button_spacing;
        self
    }

    /// Sets the width of spacer buttons.
    pub fn spacer_width(mut self, spacer_width: i32) -> Self {
        self.inner.spacer_width = spacer_width;
        self
    }

    /// Sets the hover fade duration in milliseconds.
    pub fn hover_duration_ms(mut self, hover_duration_ms: u64) -> Self {
        self.inner.hover_duration_ms = hover_duration_ms;
        self
    }

    /// Sets how far the hover highlight reaches beyond a button.
    pub fn hover_bleed(mut self, hover_bleed: i32) -> Self {
        self.inner.hover_bleed = hover_bleed;
        self
    }

    /// Sets the frame colors.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.inner.palette = palette;
        self
    }

    /// Finishes construction, validates the config and returns
    /// it if validation is successful.
    ///
    /// You can supply an additional `check` to run
    /// additional code to validate your config.
    pub fn finish<F>(self, check: F) -> Result<ThemeConfig>
    where
        F: FnOnce(&ThemeConfig) -> Result<()>,
    {
        let config = self.inner;
        config.validate(check)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LacquerError;

    #[test]
    fn test_presets_are_valid() {
        for preset in [ThemePreset::Minimal, ThemePreset::Themed] {
            ThemeConfig::preset(preset).validate(no_checks).expect("invalid preset");
        }
    }

    #[test]
    fn test_presets_differ() {
        let minimal = ThemeConfig::preset(ThemePreset::Minimal);
        let themed = ThemeConfig::preset(ThemePreset::Themed);

        assert_ne!(minimal, themed);
        assert_eq!(ThemeConfig::default(), themed);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_title = ThemeConfig::builder(ThemePreset::Themed).min_title_height(0).finish(no_checks);
        assert!(matches!(zero_title, Err(LacquerError::InvalidConfig(_))));

        let nan_scale = ThemeConfig::builder(ThemePreset::Themed).title_scale(f64::NAN).finish(no_checks);
        assert!(nan_scale.is_err());

        let negative = ThemeConfig::builder(ThemePreset::Minimal).button_spacing(-1).finish(no_checks);
        assert_eq!(
            negative,
            Err(LacquerError::InvalidConfig("button_spacing must not be negative".into()))
        );

        let bleed = ThemeConfig::builder(ThemePreset::Themed).hover_bleed(-1).finish(no_checks);
        assert!(bleed.is_err());

        let oversized = ThemeConfig::builder(ThemePreset::Minimal).min_button_size(40).finish(no_checks);
        assert!(oversized.is_err());
    }

    #[test]
    fn test_section_keys() {
        let config = ThemeConfig::default();

        assert_eq!(config.get_key_static::<i32>("border_width"), Some(&4));
        assert_eq!(config.get_key_static::<f64>("title_scale"), Some(&1.25));
        assert!(config.get_key("palette").is_none());
        assert!(config.get_key_static::<u32>("border_width").is_none());

        assert!(config.keys().contains(&"spacer_width"));
        assert_eq!(config.keys().len(), 11);

        let palette = config.subsection("palette").expect("no palette");
        let tint = palette.get_key("active_tint").and_then(|v| v.downcast_ref::<Color>());
        assert_eq!(tint, Some(&config.palette.active_tint));
    }
}
