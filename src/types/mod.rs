//! Basic core types used throughout this crate at a high level.
//!
//! All decoration geometry is expressed in integer [`Logical`] units,
//! relative to the top-left corner of the frame.

pub mod geometry;

pub use geometry::*;

/// A rectangle in logical decoration coordinates.
pub type Rect = Rectangle<i32, Logical>;

/// A point in logical decoration coordinates.
pub type Pos = Point<i32, Logical>;

/// A representation of a color, following the RGBA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Creates the Color from a 32-bit integer.
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex)
    }

    /// Returns the (R, G, B, A) values of the Color
    /// as bytes.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = u32::to_be_bytes(self.0);
        (r, g, b, a)
    }

    /// Blends `self` towards `other` by `t`, clamped to `[0, 1]`.
    ///
    /// [`Decoration::button_tint`](crate::Decoration::button_tint) uses this to
    /// blend a button background by its hover intensity.
    pub fn mix(&self, other: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let a = u32::to_be_bytes(self.0);
        let b = u32::to_be_bytes(other.0);

        let mut out = [0u8; 4];
        for i in 0..4 {
            let v = a[i] as f64 + (b[i] as f64 - a[i] as f64) * t;
            out[i] = v.round() as u8;
        }

        Color(u32::from_be_bytes(out))
    }

    /// Returns the color as a u32.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(from: u32) -> Self {
        Self::from_hex(from)
    }
}
