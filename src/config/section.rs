//! Configuration sections.

use std::any::Any;

/// An object that can act as a section in a decoration configuration.
///
/// Hosts usually load theme settings from some key/value store of their own.
/// `ConfigSection` lets them read the current values back out by name without
/// knowing the concrete configuration type, for example to populate a settings
/// dialog or to diff a reloaded configuration.
///
/// # Retrieving Arbitrary Values
///
/// `get_key` returns a dynamically typed trait object (i.e. `&dyn Any`).
/// It is up to the caller to see if this object is of the
/// needed type, by calling [`downcast_ref`][1] on it:
///
/// ```rust
/// use lacquer::config::{ConfigSection, ThemeConfig};
///
/// let config = ThemeConfig::default();
///
/// let Some(val) = config.get_key("border_width") else {
///     panic!("no border_width");
/// };
/// assert!(val.downcast_ref::<i32>().is_some());
/// ```
///
/// A provided method, `get_key_static`, does this call for you,
/// but the trade-off is that it cannot be called on a trait object.
///
/// This trait is usually derived with `#[derive(ConfigSection)]`.
///
/// [1]: https://doc.rust-lang.org/std/any/trait.Any.html#method.downcast_ref
pub trait ConfigSection {
    /// Retrieve arbitrary key value pairs from storage.
    ///
    /// Should return None if the key does not exist in storage.
    fn get_key(&self, key: &str) -> Option<&dyn Any>;

    /// Retrieve a subsection for this section.
    ///
    /// Should return None if the subsection does not exist.
    fn subsection(&self, name: &str) -> Option<&dyn ConfigSection>;

    /// The names of every key this section exposes.
    fn keys(&self) -> &'static [&'static str];

    /// A monomorphizable, easier-to-use version of `get_key`.
    ///
    /// Unfortunately, this method cannot be called on a trait object.
    fn get_key_static<V: Any>(&self, key: &str) -> Option<&V>
    where
        Self: Sized,
    {
        self.get_key(key).and_then(|v| v.downcast_ref::<V>())
    }
}
