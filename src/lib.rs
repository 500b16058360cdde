//! # Lacquer - a window decoration theme
//!
//! Lacquer draws title bars, borders and buttons around application windows for
//! a compositor's pluggable decoration framework. This crate holds the part of the
//! theme that does not depend on any particular painter: the layout of the frame
//! and the policy deciding which regions have to be repainted when the window
//! changes.
//!
//! ## Design
//!
//! The host compositor owns the window and notifies the decoration whenever
//! something about it changes. Everything in this crate revolves around three pieces:
//!
//! - [`LayoutEngine`], a pure function from a [`WindowState`] snapshot, the configured
//!   [`ButtonSpec`]s and the font height to a [`Geometry`], plus the diffing of two
//!   geometries into [`Damage`].
//! - [`Decoration`], which caches the last computed `Geometry` and implements
//!   [`StateObserver`], the interface the host invokes on every state change.
//! - [`ThemeConfig`], one immutable set of layout constants, with two presets.
//!
//! A cosmetic hover animation for the buttons lives in [`hover`]. It is driven by the
//! host's timer and never touches the layout.
//!
//! ### A Basic Example
//!
//! ```rust
//! use lacquer::{Decoration, ButtonSpec, StateField, StateObserver, ThemeConfig, WindowState};
//!
//! let left = ButtonSpec::parse("M").unwrap();
//! let right = ButtonSpec::parse("IAX").unwrap();
//!
//! let mut state = WindowState::new(800, 600);
//! let mut deco = Decoration::new(ThemeConfig::default(), left, right, 12, &state);
//!
//! state.is_active = false;
//! let damage = deco.on_state_changed(StateField::Active, &state);
//!
//! assert!(!damage.is_full());
//! ```
//!
//! ## Threading
//!
//! All of this crate is meant to be driven from the host's UI thread. Nothing blocks,
//! nothing is locked, and every recomputation completes before the notification
//! handler returns.

#![warn(
    missing_debug_implementations,
    missing_docs
)]

#[macro_use]
mod log;

pub mod button;
pub mod config;
pub mod decoration;
pub mod hover;
pub mod layout;
pub mod state;
pub mod types;

#[doc(inline)]
pub use crate::button::{ButtonKind, ButtonSpec, Capabilities, Glyph};
#[doc(inline)]
pub use crate::config::{ConfigSection, ThemeConfig, ThemePreset};
#[doc(inline)]
pub use crate::decoration::{Decoration, StateObserver};
#[doc(inline)]
pub use crate::layout::{Damage, Geometry, LayoutEngine};
#[doc(inline)]
pub use crate::state::{StateField, WindowState};

use thiserror::Error;

/// Everything that could go wrong while loading a decoration configuration.
///
/// Layout itself never fails; these errors are raised when user configuration
/// is turned into a [`ThemeConfig`] or a [`ButtonSpec`].
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LacquerError {
    /// One or more configuration invariants was not upheld.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A button code or name that does not name any button kind.
    #[error("Unknown button {0:?}")]
    UnknownButton(String),

    /// A button kind listed more than once across the button groups.
    #[error("Button {0} configured more than once")]
    DuplicateButton(ButtonKind),
}

/// Quickly construct a LacquerError.
#[macro_export]
macro_rules! lacquererr {
    // InvalidConfig
    (invalidcfg: $t:expr) => {
        $crate::LacquerError::InvalidConfig($t.into())
    };
    // UnknownButton
    (unknownbtn: $t:expr) => {
        $crate::LacquerError::UnknownButton($t.into())
    };
    // DuplicateButton
    (dupbtn: $t:expr) => {
        $crate::LacquerError::DuplicateButton($t)
    };
}

/// The general result type used by Lacquer.
pub type Result<T> = ::core::result::Result<T, LacquerError>;
