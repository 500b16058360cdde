//! The window state a decoration is laid out from.

use strum::*;

use crate::button::Capabilities;

/// A read-only snapshot of the decorated window, as reported by the host.
///
/// `width` and `height` are the size of the client area, not the frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    /// Width of the client area.
    pub width: i32,
    /// Height of the client area.
    pub height: i32,
    /// Whether the window is maximized.
    pub is_maximized: bool,
    /// Whether the window is shaded (rolled up into its title bar).
    pub is_shaded: bool,
    /// Whether the window has focus.
    pub is_active: bool,
    /// Whether the window is on all desktops.
    pub is_on_all_desktops: bool,
    /// Whether the window is kept above others.
    pub is_keep_above: bool,
    /// Whether the window is kept below others.
    pub is_keep_below: bool,
    /// The window title.
    pub caption: String,
    /// The actions currently permitted on the window.
    pub capabilities: Capabilities,
}

impl WindowState {
    /// An active, unmaximized window of the given client size that permits
    /// every action.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            is_maximized: false,
            is_shaded: false,
            is_active: true,
            is_on_all_desktops: false,
            is_keep_above: false,
            is_keep_below: false,
            caption: String::new(),
            capabilities: Capabilities::all(),
        }
    }

    /// Sets the window title.
    pub fn with_caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.caption = caption.into();
        self
    }

    /// Sets or clears a capability.
    pub fn set_capability(&mut self, cap: Capabilities, on: bool) {
        self.capabilities.set(cap, on);
    }

    /// Lists every field that differs between `self` and `other`.
    pub fn changed_fields(&self, other: &WindowState) -> Vec<StateField> {
        StateField::iter().filter(|f| !f.equal_in(self, other)).collect()
    }
}

/// A field of [`WindowState`] the host can report as changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StateField {
    /// The client width.
    Width,
    /// The client height.
    Height,
    /// The maximized flag.
    Maximized,
    /// The shaded flag.
    Shaded,
    /// The active (focused) flag.
    Active,
    /// The on-all-desktops (pinned) flag.
    OnAllDesktops,
    /// The keep-above flag.
    KeepAbove,
    /// The keep-below flag.
    KeepBelow,
    /// The window title.
    Caption,
    /// Any capability flag.
    Capabilities,
}

impl StateField {
    /// Whether a change to this field can move or resize the frame.
    ///
    /// Such changes always invalidate the whole frame.
    pub fn affects_frame(self) -> bool {
        matches!(self, StateField::Width | StateField::Height | StateField::Maximized | StateField::Shaded)
    }

    pub(crate) fn equal_in(self, a: &WindowState, b: &WindowState) -> bool {
        match self {
            StateField::Width => a.width == b.width,
            StateField::Height => a.height == b.height,
            StateField::Maximized => a.is_maximized == b.is_maximized,
            StateField::Shaded => a.is_shaded == b.is_shaded,
            StateField::Active => a.is_active == b.is_active,
            StateField::OnAllDesktops => a.is_on_all_desktops == b.is_on_all_desktops,
            StateField::KeepAbove => a.is_keep_above == b.is_keep_above,
            StateField::KeepBelow => a.is_keep_below == b.is_keep_below,
            StateField::Caption => a.caption == b.caption,
            StateField::Capabilities => a.capabilities == b.capabilities,
        }
    }
}
