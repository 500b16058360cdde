//! Decoration buttons and the configured button groups.
//!
//! Every [`ButtonKind`] maps to the [`Capabilities`] flag that controls whether
//! it is shown, to the code character used in configuration strings, and to the
//! [`Glyph`] it is drawn with. The mapping is a single static table rather than
//! per-kind behaviour, so adding a button is a matter of adding a row.

use std::ops::Deref;
use std::str::FromStr;

use bitflags::bitflags;
use indexmap::set::IndexSet;
use strum::*;

use crate::state::WindowState;
use crate::{lacquererr, Result};

bitflags! {

/// The window actions currently permitted by the host.
///
/// A button is only shown if the capability it maps to is set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities: u16 {
    /// The window can be minimized.
    const MINIMIZEABLE          = 1 << 0;
    /// The window can be maximized.
    const MAXIMIZEABLE          = 1 << 1;
    /// The window can be closed.
    const CLOSEABLE             = 1 << 2;
    /// The window can be shaded (rolled up into its title bar).
    const SHADEABLE             = 1 << 3;
    /// The window offers context help.
    const PROVIDES_CONTEXT_HELP = 1 << 4;
    /// The window can be kept above others.
    const KEEP_ABOVE            = 1 << 5;
    /// The window can be kept below others.
    const KEEP_BELOW            = 1 << 6;
    /// The window can be placed on all desktops.
    const ON_ALL_DESKTOPS       = 1 << 7;
}
}

/// The kinds of button a decoration can show.
///
/// Names are kebab-case when displayed or parsed (`"keep-above"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ButtonKind {
    /// The window menu.
    Menu,
    /// Toggles whether the window is on all desktops.
    OnAllDesktops,
    /// Enters context help mode.
    ContextHelp,
    /// Minimizes the window.
    Minimize,
    /// Maximizes or restores the window.
    Maximize,
    /// Closes the window.
    Close,
    /// Shades or unshades the window.
    Shade,
    /// Toggles keeping the window above others.
    KeepAbove,
    /// Toggles keeping the window below others.
    KeepBelow,
    /// Empty space between buttons.
    Spacer,
}

/// The icon a button is drawn with.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Menu,
    Pin,
    Unpin,
    Help,
    Minimize,
    Maximize,
    Restore,
    Close,
    Shade,
    Unshade,
    KeepAbove,
    KeepBelow,
    /// Nothing is drawn.
    Blank,
}

struct ButtonInfo {
    kind: ButtonKind,
    code: char,
    capability: Option<Capabilities>,
    glyph: Glyph,
    /// The glyph shown while the button's toggle is engaged.
    engaged: Glyph,
}

macro_rules! button_table {
    ($($kind:ident => $code:literal, $cap:expr, $glyph:ident / $engaged:ident;)+) => {
        [$(
            ButtonInfo {
                kind: ButtonKind::$kind,
                code: $code,
                capability: $cap,
                glyph: Glyph::$glyph,
                engaged: Glyph::$engaged,
            },
        )+]
    };
}

// rows must follow the declaration order of ButtonKind
static BUTTON_TABLE: [ButtonInfo; 10] = button_table! {
    Menu          => 'M', None,                                      Menu / Menu;
    OnAllDesktops => 'S', Some(Capabilities::ON_ALL_DESKTOPS),       Pin / Unpin;
    ContextHelp   => 'H', Some(Capabilities::PROVIDES_CONTEXT_HELP), Help / Help;
    Minimize      => 'I', Some(Capabilities::MINIMIZEABLE),          Minimize / Minimize;
    Maximize      => 'A', Some(Capabilities::MAXIMIZEABLE),          Maximize / Restore;
    Close         => 'X', Some(Capabilities::CLOSEABLE),             Close / Close;
    Shade         => 'L', Some(Capabilities::SHADEABLE),             Shade / Unshade;
    KeepAbove     => 'F', Some(Capabilities::KEEP_ABOVE),            KeepAbove / KeepAbove;
    KeepBelow     => 'B', Some(Capabilities::KEEP_BELOW),            KeepBelow / KeepBelow;
    Spacer        => '_', None,                                      Blank / Blank;
};

impl ButtonKind {
    fn info(self) -> &'static ButtonInfo {
        &BUTTON_TABLE[self as usize]
    }

    /// Looks up a button kind by its configuration code.
    pub fn from_code(code: char) -> Option<ButtonKind> {
        BUTTON_TABLE.iter().find(|i| i.code == code).map(|i| i.kind)
    }

    /// The character representing this kind in configuration strings.
    pub fn code(self) -> char {
        self.info().code
    }

    /// The capability that must be set for this button to be shown.
    ///
    /// Returns None for kinds that are always shown.
    pub fn capability(self) -> Option<Capabilities> {
        self.info().capability
    }

    /// Whether this button is shown given the permitted actions.
    pub fn is_available(self, caps: Capabilities) -> bool {
        self.capability().is_none_or(|c| caps.contains(c))
    }

    /// Whether the toggle behind this button is currently engaged.
    ///
    /// Always false for buttons that do not toggle.
    pub fn is_engaged(self, state: &WindowState) -> bool {
        match self {
            ButtonKind::OnAllDesktops => state.is_on_all_desktops,
            ButtonKind::Maximize => state.is_maximized,
            ButtonKind::Shade => state.is_shaded,
            ButtonKind::KeepAbove => state.is_keep_above,
            ButtonKind::KeepBelow => state.is_keep_below,
            _ => false,
        }
    }

    /// The glyph this button shows in the given window state.
    pub fn glyph(self, state: &WindowState) -> Glyph {
        let info = self.info();
        if self.is_engaged(state) {
            info.engaged
        } else {
            info.glyph
        }
    }

    /// Whether this kind may appear more than once in the button groups.
    pub fn is_repeatable(self) -> bool {
        matches!(self, ButtonKind::Spacer)
    }
}

/// An ordered group of configured buttons.
///
/// Order is left-to-right for both groups. A `ButtonSpec` never contains the
/// same kind twice, [`Spacer`](ButtonKind::Spacer) excepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ButtonSpec {
    kinds: Vec<ButtonKind>,
}

impl ButtonSpec {
    /// Creates a spec with no buttons.
    pub fn empty() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Creates a spec from a sequence of kinds, rejecting duplicates.
    pub fn new<I>(kinds: I) -> Result<Self>
    where
        I: IntoIterator<Item = ButtonKind>
    {
        let kinds: Vec<ButtonKind> = kinds.into_iter().collect();
        check_duplicates(kinds.iter().copied())?;

        Ok(Self { kinds })
    }

    /// Parses a configuration string of button codes, such as `"MS"` or `"HIAX"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lacquer::button::{ButtonSpec, ButtonKind};
    ///
    /// let spec = ButtonSpec::parse("IAX").unwrap();
    ///
    /// assert_eq!(&spec[..], &[ButtonKind::Minimize, ButtonKind::Maximize, ButtonKind::Close]);
    /// assert!(ButtonSpec::parse("IAXX").is_err());
    /// ```
    pub fn parse(codes: &str) -> Result<Self> {
        let kinds = codes.chars()
            .map(|c| ButtonKind::from_code(c).ok_or_else(|| lacquererr!(unknownbtn: c.to_string())))
            .collect::<Result<Vec<_>>>()?;

        Self::new(kinds)
    }

    /// Creates a spec from button names, such as `["minimize", "close"]`.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = names.into_iter()
            .map(|n| {
                let n = n.as_ref();
                ButtonKind::from_str(n).map_err(|_| lacquererr!(unknownbtn: n))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(kinds)
    }

    /// Renders the spec back into its configuration string.
    pub fn to_codes(&self) -> String {
        self.kinds.iter().map(|k| k.code()).collect()
    }

    /// The configured kinds whose capability is set, in configured order.
    pub fn visible(&self, caps: Capabilities) -> impl Iterator<Item = ButtonKind> + '_ {
        self.kinds.iter().copied().filter(move |k| k.is_available(caps))
    }
}

impl Deref for ButtonSpec {
    type Target = [ButtonKind];

    fn deref(&self) -> &Self::Target {
        self.kinds.as_slice()
    }
}

impl FromStr for ButtonSpec {
    type Err = crate::LacquerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ButtonSpec {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        let kinds = Vec::<ButtonKind>::deserialize(de)?;
        ButtonSpec::new(kinds).map_err(serde::de::Error::custom)
    }
}

/// Checks that no kind appears in both groups, or twice in either.
pub fn validate_groups(left: &ButtonSpec, right: &ButtonSpec) -> Result<()> {
    check_duplicates(left.iter().chain(right.iter()).copied())
}

fn check_duplicates<I>(kinds: I) -> Result<()>
where
    I: IntoIterator<Item = ButtonKind>
{
    let mut seen = IndexSet::new();

    for kind in kinds.into_iter().filter(|k| !k.is_repeatable()) {
        if !seen.insert(kind) {
            return Err(lacquererr!(dupbtn: kind))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LacquerError;

    #[test]
    fn test_table_follows_declaration_order() {
        for kind in ButtonKind::iter() {
            assert_eq!(kind.info().kind, kind);
            assert_eq!(ButtonKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_parse_codes() {
        let spec = ButtonSpec::parse("MS_HIAX").unwrap();

        assert_eq!(spec.len(), 7);
        assert_eq!(spec[2], ButtonKind::Spacer);
        assert_eq!(spec.to_codes(), "MS_HIAX");

        assert_eq!(ButtonSpec::parse("").unwrap(), ButtonSpec::empty());
    }

    #[test]
    fn test_parse_rejects_unknown_and_duplicates() {
        assert_eq!(ButtonSpec::parse("IQ"), Err(LacquerError::UnknownButton("Q".into())));
        assert_eq!(ButtonSpec::parse("XIX"), Err(LacquerError::DuplicateButton(ButtonKind::Close)));

        // spacers can repeat
        assert!(ButtonSpec::parse("I__X").is_ok());
    }

    #[test]
    fn test_from_names() {
        let spec = ButtonSpec::from_names(["keep-above", "close"]).unwrap();
        assert_eq!(&spec[..], &[ButtonKind::KeepAbove, ButtonKind::Close]);

        assert!(matches!(
            ButtonSpec::from_names(["close", "explode"]),
            Err(LacquerError::UnknownButton(n)) if n == "explode"
        ));
    }

    #[test]
    fn test_validate_groups_across_sides() {
        let left = ButtonSpec::parse("MX").unwrap();
        let right = ButtonSpec::parse("IAX").unwrap();

        assert_eq!(validate_groups(&left, &right), Err(LacquerError::DuplicateButton(ButtonKind::Close)));
        assert!(validate_groups(&ButtonSpec::parse("M_").unwrap(), &ButtonSpec::parse("_X").unwrap()).is_ok());
    }

    #[test]
    fn test_visibility_follows_capabilities() {
        let spec = ButtonSpec::parse("MIAX").unwrap();
        let caps = Capabilities::MINIMIZEABLE | Capabilities::CLOSEABLE;

        let visible: Vec<_> = spec.visible(caps).collect();
        assert_eq!(visible, vec![ButtonKind::Menu, ButtonKind::Minimize, ButtonKind::Close]);
    }

    #[test]
    fn test_glyph_follows_toggle_state() {
        let mut state = WindowState::new(100, 100);

        assert_eq!(ButtonKind::Maximize.glyph(&state), Glyph::Maximize);
        assert_eq!(ButtonKind::OnAllDesktops.glyph(&state), Glyph::Pin);

        state.is_maximized = true;
        state.is_on_all_desktops = true;

        assert_eq!(ButtonKind::Maximize.glyph(&state), Glyph::Restore);
        assert_eq!(ButtonKind::OnAllDesktops.glyph(&state), Glyph::Unpin);
        assert_eq!(ButtonKind::Close.glyph(&state), Glyph::Close);
    }
}
