//! Geometry primitives.
//!
//! [`Point`], [`Size`] and [`Rectangle`] are generic over a [`Scalar`]
//! (only `i32` for now) and over a [`GeometryKind`] marker that
//! records which coordinate space they live in.
//!
//! ## Logical and Physical Space
//!
//! The layout engine works exclusively in [`Logical`] space, in units of the
//! host's font metrics. A host that tracks damage per output converts the
//! result into [`Physical`] device pixels with the output's [`Scale`], and the
//! type system keeps the two from being mixed up.

use std::marker::PhantomData;

pub mod marker {
    //! The [`Scalar`] and [`GeometryKind`] sealed traits and the two
    //! coordinate space markers, [`Logical`] and [`Physical`].

    use core::fmt::Debug;
    use core::hash::Hash;
    use core::ops::{Add, Sub};

    mod private {
        pub trait Sealed {}
    }

    /// A number that can be used as a coordinate.
    pub trait Scalar:
        Copy
        + Ord
        + Hash
        + Debug
        + Default
        + Add<Output = Self>
        + Sub<Output = Self>
        + private::Sealed
    {
        /// Zero.
        const ZERO: Self;

        /// Multiplies by a scale factor, saturating at the bounds.
        fn scale_up(self, factor: Self) -> Self;

        /// Divides by a scale factor, saturating at the bounds.
        fn scale_down(self, factor: Self) -> Self;
    }

    macro_rules! impl_scalar {
        ($($ty:ty),+) => {$(
            impl private::Sealed for $ty {}

            impl Scalar for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn scale_up(self, factor: Self) -> Self {
                    self.saturating_mul(factor)
                }

                #[inline]
                fn scale_down(self, factor: Self) -> Self {
                    self.saturating_div(factor)
                }
            }
        )+};
    }

    impl_scalar!(i32);

    /// Marks which coordinate space a geometry is in.
    pub trait GeometryKind: Copy + Eq + Hash + Debug + Default + private::Sealed {}

    /// Output-independent coordinates.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Logical;

    /// Device pixels of a particular output.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Physical;

    impl private::Sealed for Logical {}
    impl GeometryKind for Logical {}

    impl private::Sealed for Physical {}
    impl GeometryKind for Physical {}
}

pub use marker::{GeometryKind, Logical, Physical, Scalar};

/// Per-axis factors converting [`Logical`] geometry to [`Physical`] geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale<N: Scalar> {
    /// The horizontal factor.
    pub x: N,
    /// The vertical factor.
    pub y: N,
}

impl<N: Scalar> Scale<N> {
    /// A scale with different horizontal and vertical factors.
    pub const fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// A scale with the same factor on both axes.
    pub const fn uniform(factor: N) -> Self {
        Self { x: factor, y: factor }
    }
}

/// A position, relative to the top-left corner of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<N: Scalar, Kind: GeometryKind> {
    /// Horizontal position, growing rightward.
    pub x: N,
    /// Vertical position, growing downward.
    pub y: N,
    #[cfg_attr(feature = "serde", serde(skip))]
    _kind: PhantomData<Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Point<N, Kind> {
    /// Creates a new Point.
    pub const fn new(x: N, y: N) -> Self {
        Point { x, y, _kind: PhantomData }
    }

    /// The point (0, 0).
    pub const fn zeroed() -> Self {
        Self::new(N::ZERO, N::ZERO)
    }

    fn rescale<K: GeometryKind>(self, f: impl Fn(N, N) -> N, scale: Scale<N>) -> Point<N, K> {
        Point::new(f(self.x, scale.x), f(self.y, scale.y))
    }
}

impl<N: Scalar> Point<N, Logical> {
    /// Converts into device pixels.
    pub fn as_physical(self, scale: Scale<N>) -> Point<N, Physical> {
        self.rescale(N::scale_up, scale)
    }
}

impl<N: Scalar> Point<N, Physical> {
    /// Converts back from device pixels, rounding towards zero.
    pub fn as_logical(self, scale: Scale<N>) -> Point<N, Logical> {
        self.rescale(N::scale_down, scale)
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<N: Scalar, Kind: GeometryKind> {
    /// Horizontal extent.
    pub width: N,
    /// Vertical extent.
    pub height: N,
    #[cfg_attr(feature = "serde", serde(skip))]
    _kind: PhantomData<Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Size<N, Kind> {
    /// Creates a new Size.
    pub const fn new(width: N, height: N) -> Self {
        Size { width, height, _kind: PhantomData }
    }

    /// A size of zero in both dimensions.
    pub const fn zeroed() -> Self {
        Self::new(N::ZERO, N::ZERO)
    }

    /// Whether this size covers no area. Negative extents count as empty.
    pub fn is_empty(&self) -> bool {
        self.width <= N::ZERO || self.height <= N::ZERO
    }

    fn rescale<K: GeometryKind>(self, f: impl Fn(N, N) -> N, scale: Scale<N>) -> Size<N, K> {
        Size::new(f(self.width, scale.x), f(self.height, scale.y))
    }
}

/// An axis-aligned rectangle.
///
/// The `point` is the top-left corner. The right and bottom edges are
/// exclusive, so two rectangles sharing an edge touch but do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle<N: Scalar, Kind: GeometryKind> {
    /// The top-left corner.
    pub point: Point<N, Kind>,
    /// The extent from `point`.
    pub size: Size<N, Kind>,
}

impl<N: Scalar, Kind: GeometryKind> Rectangle<N, Kind> {
    /// Creates a Rectangle at (`x`, `y`) of the given `width` and `height`.
    pub const fn new(x: N, y: N, width: N, height: N) -> Self {
        Rectangle {
            point: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a Rectangle from its edges. `right` and `bottom` are exclusive.
    pub fn from_edges(left: N, top: N, right: N, bottom: N) -> Self {
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// The empty Rectangle at the origin.
    pub const fn zeroed() -> Self {
        Rectangle::new(N::ZERO, N::ZERO, N::ZERO, N::ZERO)
    }

    /// Whether the Rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// The left edge.
    #[inline]
    pub fn left(&self) -> N {
        self.point.x
    }

    /// One past the right edge.
    #[inline]
    pub fn right(&self) -> N {
        self.point.x + self.size.width
    }

    /// The top edge.
    #[inline]
    pub fn top(&self) -> N {
        self.point.y
    }

    /// One past the bottom edge.
    #[inline]
    pub fn bottom(&self) -> N {
        self.point.y + self.size.height
    }

    /// Whether `other` lies entirely within this Rectangle.
    ///
    /// ```rust
    /// use lacquer::types::Rect;
    ///
    /// let title = Rect::new(0, 0, 200, 22);
    ///
    /// assert!(title.contains(&Rect::new(180, 3, 16, 16)));
    /// assert!(!title.contains(&Rect::new(190, 3, 16, 16)));
    /// ```
    pub fn contains(&self, other: &Self) -> bool {
        self.left() <= other.left()
            && other.right() <= self.right()
            && self.top() <= other.top()
            && other.bottom() <= self.bottom()
    }

    /// Whether `pt` lies within this Rectangle.
    pub fn contains_point(&self, pt: Point<N, Kind>) -> bool {
        (self.left()..self.right()).contains(&pt.x)
            && (self.top()..self.bottom()).contains(&pt.y)
    }

    /// Whether the two Rectangles share any area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps_with(&self, other: Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The area common to both Rectangles.
    ///
    /// Returns an empty Rectangle if they do not overlap.
    pub fn intersect(&self, other: Self) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return Rectangle::new(left, top, N::ZERO, N::ZERO)
        }
        Rectangle::from_edges(left, top, right, bottom)
    }

    /// The smallest Rectangle enclosing both.
    ///
    /// Empty Rectangles are ignored, wherever they are.
    pub fn union(&self, other: Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (_, true) => *self,
            (true, false) => other,
            (false, false) => Rectangle::from_edges(
                self.left().min(other.left()),
                self.top().min(other.top()),
                self.right().max(other.right()),
                self.bottom().max(other.bottom()),
            ),
        }
    }

    /// The parts of this Rectangle outside `other`, as up to four
    /// non-overlapping pieces: the bands above and below `other`, then
    /// the pieces to its left and right.
    ///
    /// ```rust
    /// use lacquer::types::Rect;
    ///
    /// let title = Rect::new(0, 0, 100, 10);
    /// let buttons = Rect::new(60, 0, 40, 10);
    ///
    /// assert_eq!(title.subtract(buttons), vec![Rect::new(0, 0, 60, 10)]);
    /// ```
    pub fn subtract(&self, other: Self) -> Vec<Self> {
        let hole = self.intersect(other);
        if hole.is_empty() {
            return Some(*self).filter(|r| !r.is_empty()).into_iter().collect()
        }

        [
            Rectangle::from_edges(self.left(), self.top(), self.right(), hole.top()),
            Rectangle::from_edges(self.left(), hole.bottom(), self.right(), self.bottom()),
            Rectangle::from_edges(self.left(), hole.top(), hole.left(), hole.bottom()),
            Rectangle::from_edges(hole.right(), hole.top(), self.right(), hole.bottom()),
        ]
        .into_iter()
        .filter(|r| !r.is_empty())
        .collect()
    }
}

impl<N: Scalar> Rectangle<N, Logical> {
    /// Converts into device pixels. The position scales along with the size.
    pub fn as_physical(self, scale: Scale<N>) -> Rectangle<N, Physical> {
        Rectangle {
            point: self.point.as_physical(scale),
            size: self.size.rescale(N::scale_up, scale),
        }
    }
}

impl<N: Scalar> Rectangle<N, Physical> {
    /// Converts back from device pixels, rounding towards zero.
    pub fn as_logical(self, scale: Scale<N>) -> Rectangle<N, Logical> {
        Rectangle {
            point: self.point.as_logical(scale),
            size: self.size.rescale(N::scale_down, scale),
        }
    }
}

impl<Kind: GeometryKind> Rectangle<i32, Kind> {
    /// Grows the Rectangle by `by` on every side. A negative `by` shrinks it.
    ///
    /// Edges saturate at the bounds of `i32`.
    #[must_use]
    pub fn inflate(&self, by: i32) -> Self {
        Rectangle::from_edges(
            self.left().saturating_sub(by),
            self.top().saturating_sub(by),
            self.right().saturating_add(by),
            self.bottom().saturating_add(by),
        )
    }

    /// Cuts the Rectangle into a top part `height` tall and the rest below it.
    ///
    /// `height` is clamped to the Rectangle's own height.
    #[must_use]
    pub fn split_at_height(&self, height: i32) -> (Self, Self) {
        let height = height.clamp(0, self.size.height.max(0));
        let Rectangle { point, size } = *self;

        (
            Rectangle::new(point.x, point.y, size.width, height),
            Rectangle::new(point.x, point.y + height, size.width, size.height - height),
        )
    }

    /// Cuts the Rectangle into a left part `width` wide and the rest beside it.
    ///
    /// `width` is clamped to the Rectangle's own width.
    #[must_use]
    pub fn split_at_width(&self, width: i32) -> (Self, Self) {
        let width = width.clamp(0, self.size.width.max(0));
        let Rectangle { point, size } = *self;

        (
            Rectangle::new(point.x, point.y, width, size.height),
            Rectangle::new(point.x + width, point.y, size.width - width, size.height),
        )
    }

    /// Cuts the Rectangle into three columns: `left` wide, `right` wide, and
    /// whatever remains between them.
    ///
    /// When the Rectangle is too narrow for both outer columns, the left one
    /// takes at most the larger half, the right one the rest, and the middle
    /// column is empty. The columns always tile the Rectangle exactly.
    ///
    /// ```rust
    /// use lacquer::types::Rect;
    ///
    /// let border = Rect::new(0, 90, 100, 10);
    /// let (l, c, r) = border.split_columns(20, 20);
    ///
    /// assert_eq!(l, Rect::new(0, 90, 20, 10));
    /// assert_eq!(c, Rect::new(20, 90, 60, 10));
    /// assert_eq!(r, Rect::new(80, 90, 20, 10));
    /// ```
    #[must_use]
    pub fn split_columns(&self, left: i32, right: i32) -> (Self, Self, Self) {
        let width = self.size.width.max(0);

        let left = left.clamp(0, width - width / 2);
        let right = right.clamp(0, width - left);

        let (l, rest) = self.split_at_width(left);
        let (c, r) = rest.split_at_width(rest.size.width - right);

        (l, c, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Rect = Rectangle<i32, Logical>;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);

        assert_eq!((rect.left(), rect.right()), (10, 40));
        assert_eq!((rect.top(), rect.bottom()), (20, 60));
        assert_eq!(Rect::from_edges(10, 20, 40, 60), rect);
    }

    #[test]
    fn test_rect_touching_do_not_overlap() {
        let a = Rect::new(0, 0, 50, 20);
        let b = Rect::new(50, 0, 50, 20);

        assert!(!a.overlaps_with(b));
        assert!(a.overlaps_with(Rect::new(49, 0, 2, 2)));
        assert!(a.intersect(b).is_empty());
        assert!(!a.contains_point(b.point));
    }

    #[test]
    fn test_rect_union_ignores_empty() {
        let a = Rect::new(10, 10, 10, 10);

        assert_eq!(a.union(Rect::zeroed()), a);
        assert_eq!(Rect::zeroed().union(a), a);
        assert_eq!(a.union(Rect::new(30, 0, 5, 5)), Rect::new(10, 0, 25, 20));
    }

    #[test]
    fn test_rect_subtract_partitions() {
        let a = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(25, 25, 50, 50);

        let pieces = a.subtract(hole);
        assert_eq!(pieces.len(), 4);

        let area: i32 = pieces.iter().map(|r| r.size.width * r.size.height).sum();
        assert_eq!(area, 100 * 100 - 50 * 50);

        for (i, p) in pieces.iter().enumerate() {
            assert!(!p.overlaps_with(hole));
            for q in pieces.iter().skip(i + 1) {
                assert!(!p.overlaps_with(*q));
            }
        }

        assert!(a.subtract(a).is_empty());
        assert_eq!(a.subtract(Rect::new(200, 200, 5, 5)), vec![a]);
    }

    #[test]
    fn test_inflate() {
        let rect = Rect::new(10, 10, 4, 4);

        assert_eq!(rect.inflate(1), Rect::new(9, 9, 6, 6));
        assert_eq!(rect.inflate(-2), Rect::new(12, 12, 0, 0));
        assert_eq!(rect.inflate(0), rect);
    }

    #[test]
    fn test_split_columns_narrow() {
        let strip = Rect::new(0, 0, 25, 4);
        let (l, c, r) = strip.split_columns(20, 20);

        assert_eq!((l.size.width, c.size.width, r.size.width), (13, 0, 12));
        assert_eq!(l.right(), c.left());
        assert_eq!(c.right(), r.left());
    }

    #[test]
    fn test_physical_conversion() {
        let rect = Rect::new(2, 4, 10, 20);
        let phys = rect.as_physical(Scale::uniform(2));

        assert_eq!(phys, Rectangle::<i32, Physical>::new(4, 8, 20, 40));
        assert_eq!(phys.as_logical(Scale::uniform(2)), rect);
        assert_eq!(rect.as_physical(Scale::new(1, 3)).size, Size::new(10, 60));
    }
}
