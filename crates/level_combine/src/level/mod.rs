//! Levels: named, ordered collections of placed objects, and the geometric
//! transforms the combination runner applies to them.
use std::collections::HashSet;

use rand::{Rng, RngCore};

use crate::geometry::{Offset, Rect};
use crate::level::field::Field;
use crate::level::object::LevelObject;

pub mod field;
pub mod object;

/// Per-object removal probabilities for [`Level::explode`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodeChances {
    /// Type category whose objects use the `hazard` probability.
    pub hazard_category: String,
    /// Removal probability for objects in `hazard_category`.
    pub hazard: f64,
    /// Removal probability for every other object.
    pub other: f64,
}

impl Default for ExplodeChances {
    fn default() -> Self {
        Self {
            hazard_category: "death".into(),
            hazard: 0.9,
            other: 0.3,
        }
    }
}

impl ExplodeChances {
    pub fn new(hazard: f64, other: f64) -> Self {
        Self {
            hazard,
            other,
            ..Default::default()
        }
    }

    pub fn with_hazard_category(mut self, category: impl Into<String>) -> Self {
        self.hazard_category = category.into();
        self
    }

    pub fn chance_for(&self, object: &LevelObject) -> f64 {
        if object.category() == self.hazard_category {
            self.hazard
        } else {
            self.other
        }
    }
}

/// One placeable unit of content: a source level, a rotated variant of one,
/// or the composite being assembled.
///
/// Object order is insertion order and survives cloning. `Clone` deep-copies
/// every object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Level {
    pub name: String,
    pub objects: Vec<LevelObject>,
}

impl Level {
    pub fn new(name: impl Into<String>, objects: Vec<LevelObject>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Rotate 90° clockwise about the origin, then [`align`](Self::align).
    ///
    /// Each object with both coordinates goes from `(x, y)` to `(y, -x)`;
    /// objects missing either coordinate keep their position, as do objects
    /// at `x == i64::MIN`, whose negation does not fit. A present `rotation`
    /// advances by 90 modulo 360.
    pub fn rotate(&mut self) {
        for o in &mut self.objects {
            if let Field::Present((x, y)) = o.x().zip(o.y()) {
                if let Some(neg_x) = x.checked_neg() {
                    o.set_data("x", Field::Present(y));
                    o.set_data("y", Field::Present(neg_x));
                }
            }
            let rotation = o.rotation().map(|r| (r.rem_euclid(360) + 90) % 360);
            o.set_data("rotation", rotation);
        }
        self.align();
    }

    /// Numeric `x` of every object that has one, in object order.
    pub fn xs(&self) -> Vec<i64> {
        self.objects.iter().filter_map(|o| o.x().into_option()).collect()
    }

    /// Numeric `y` of every object that has one, in object order.
    pub fn ys(&self) -> Vec<i64> {
        self.objects.iter().filter_map(|o| o.y().into_option()).collect()
    }

    fn min_corner(&self) -> Option<(i64, i64)> {
        let min_x = self.objects.iter().filter_map(|o| o.x().into_option()).min()?;
        let min_y = self.objects.iter().filter_map(|o| o.y().into_option()).min()?;
        Some((min_x, min_y))
    }

    /// Translate so the smallest present `x` and `y` both become zero.
    /// Does nothing unless at least one object has each coordinate. An axis
    /// whose distance from the minimum overflows `i64` is left unchanged.
    pub fn align(&mut self) {
        let Some((min_x, min_y)) = self.min_corner() else {
            return;
        };
        for o in &mut self.objects {
            o.update_axis("x", |v| v.checked_sub(min_x));
            o.update_axis("y", |v| v.checked_sub(min_y));
        }
    }

    /// Bounding box of the level as it would be after [`align`](Self::align):
    /// origin at `(0, 0)`, extent from the smallest to the largest coordinate.
    /// Object-free levels, or levels with no numeric `x` or no numeric `y`,
    /// yield [`Rect::ZERO`]. Extents too wide for `i64` saturate at
    /// `i64::MAX`. The receiver is not modified.
    pub fn rect(&self) -> Rect {
        let Some((min_x, min_y)) = self.min_corner() else {
            return Rect::ZERO;
        };
        let max_x = self.xs().into_iter().max().unwrap_or(min_x);
        let max_y = self.ys().into_iter().max().unwrap_or(min_y);
        Rect::new(0, 0, max_x.saturating_sub(min_x), max_y.saturating_sub(min_y))
    }

    /// Cells occupied by objects that carry both coordinates.
    fn occupied(&self) -> HashSet<Offset> {
        self.objects.iter().filter_map(LevelObject::position).collect()
    }

    /// True iff some object of `other`, shifted by `offset`, lands on exactly
    /// the same `(x, y)` cell as some object of `self`.
    ///
    /// This is cell equality, not area overlap: two levels whose bounding
    /// boxes intersect but share no cell do not collide.
    pub fn collides(&self, other: &Level, offset: Offset) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let occupied = self.occupied();
        other
            .objects
            .iter()
            .filter_map(LevelObject::position)
            .filter_map(|p| {
                let x = p.x.checked_add(offset.x)?;
                let y = p.y.checked_add(offset.y)?;
                Some(Offset::new(x, y))
            })
            .any(|p| occupied.contains(&p))
    }

    /// Append copies of `other`'s objects, each translated by `offset` (see
    /// [`LevelObject::move_by`] for overflowing axes).
    pub fn blit(&mut self, other: &Level, offset: Offset) {
        self.objects.reserve(other.objects.len());
        for o in &other.objects {
            let mut copy = o.clone();
            copy.move_by(offset.x, offset.y);
            self.objects.push(copy);
        }
    }

    /// Remove each object independently with the probability `chances` gives
    /// its type. One uniform draw per object, in object order.
    ///
    /// Returns the number of objects removed.
    pub fn explode<R: RngCore + ?Sized>(&mut self, chances: &ExplodeChances, rng: &mut R) -> usize {
        let before = self.objects.len();
        self.objects
            .retain(|o| rng.random::<f64>() >= chances.chance_for(o));
        before - self.objects.len()
    }

    pub fn coin_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_coin()).count()
    }
}
