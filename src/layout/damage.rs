//! Dirty regions.

use std::ops::Deref;

use crate::types::{Physical, Rect, Rectangle, Scale};

/// A set of regions that must be repainted.
///
/// A `Damage` is either *full*, holding only the frame rectangle, or
/// *partial*, holding any number of rectangles. Rectangles added to a partial
/// damage are coalesced: one that is already covered is dropped, and two that
/// combine into a rectangle without covering any extra area are merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Damage {
    regions: Vec<Rect>,
    full: bool,
}

impl Damage {
    /// Creates an empty damage set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a damage set covering the whole frame.
    pub fn full(frame: Rect) -> Self {
        Self {
            regions: vec![frame],
            full: true,
        }
    }

    /// Whether the whole frame must be repainted.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Whether nothing must be repainted.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Adds a region to a partial damage set.
    ///
    /// Does nothing if the set is already full or `rect` is empty.
    pub fn add(&mut self, rect: Rect) {
        if self.full || rect.is_empty() {
            return
        }
        if self.regions.iter().any(|r| r.contains(&rect)) {
            return
        }

        let mut rect = rect;
        // merging can make a rectangle mergeable with one already checked
        while let Some(idx) = self.regions.iter().position(|r| merges_exactly(*r, rect)) {
            rect = rect.union(self.regions.swap_remove(idx));
        }

        self.regions.retain(|r| !rect.contains(r));
        self.regions.push(rect);
    }

    /// Merges `other` into `self`. If either is full, the result is full.
    pub fn merge(&mut self, other: Damage) {
        if self.full {
            return
        }
        if other.full {
            *self = other;
            return
        }
        for rect in other.regions {
            self.add(rect);
        }
    }

    /// The smallest rectangle covering every region.
    pub fn bounding_rect(&self) -> Rect {
        self.regions.iter().fold(Rect::zeroed(), |acc, r| acc.union(*r))
    }

    /// The regions, scaled into an output's physical pixels.
    pub fn as_physical(&self, scale: Scale<i32>) -> Vec<Rectangle<i32, Physical>> {
        self.regions.iter().map(|r| r.as_physical(scale)).collect()
    }
}

impl Deref for Damage {
    type Target = [Rect];

    fn deref(&self) -> &Self::Target {
        self.regions.as_slice()
    }
}

impl Extend<Rect> for Damage {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        for rect in iter {
            self.add(rect);
        }
    }
}

/// Whether the union of `a` and `b` covers exactly the area of `a` and `b`.
fn merges_exactly(a: Rect, b: Rect) -> bool {
    let area = |r: Rect| r.size.width as i64 * r.size.height as i64;
    let overlap = a.intersect(b);

    area(a.union(b)) == area(a) + area(b) - area(overlap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_drops_covered() {
        let mut damage = Damage::new();

        damage.add(Rect::new(0, 0, 100, 20));
        damage.add(Rect::new(10, 5, 10, 10));

        assert_eq!(&damage[..], &[Rect::new(0, 0, 100, 20)]);
    }

    #[test]
    fn test_add_merges_adjacent() {
        let mut damage = Damage::new();

        damage.add(Rect::new(0, 0, 50, 20));
        damage.add(Rect::new(100, 0, 50, 20));
        assert_eq!(damage.len(), 2);

        // bridges the two, so all three collapse into one strip
        damage.add(Rect::new(50, 0, 50, 20));
        assert_eq!(&damage[..], &[Rect::new(0, 0, 150, 20)]);
    }

    #[test]
    fn test_add_keeps_misaligned_apart() {
        let mut damage = Damage::new();

        damage.add(Rect::new(0, 0, 50, 20));
        damage.add(Rect::new(50, 3, 16, 16));

        assert_eq!(damage.len(), 2);
        assert_eq!(damage.bounding_rect(), Rect::new(0, 0, 66, 20));
    }

    #[test]
    fn test_full_absorbs_everything() {
        let frame = Rect::new(0, 0, 800, 600);
        let mut damage = Damage::new();
        damage.add(Rect::new(0, 0, 10, 10));

        damage.merge(Damage::full(frame));
        assert!(damage.is_full());

        damage.add(Rect::new(900, 900, 10, 10));
        assert_eq!(&damage[..], &[frame]);
    }

    #[test]
    fn test_empty_rects_ignored() {
        let mut damage = Damage::new();
        damage.extend([Rect::new(5, 5, 0, 10), Rect::zeroed()]);

        assert!(damage.is_empty());
    }
}
