//! Types and helpers for configuring a Lacquer decoration.

mod section;
mod theme;

#[doc(inline)]
pub use section::ConfigSection;
#[doc(inline)]
pub use theme::*;
