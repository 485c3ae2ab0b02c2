//! Integer geometry shared by levels and the combination runner.
use glam::I64Vec2;

/// Translation applied to a level's objects when it is merged into another.
pub type Offset = I64Vec2;

/// Axis-aligned integer bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True iff the boxes overlap on both axes. Half-open intervals: touching
    /// edges do not collide.
    pub fn collides_with(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}
