use {
    super::GenericCoord,
    serde::{Deserialize, Serialize},
};

/// An axis-aligned rectangle in canvas pixels, top-left origin.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Rect {
    pub dims: GenericCoord<u32>,
    pub pos: GenericCoord<u32>,
}

impl Rect {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            dims: GenericCoord {
                x: width,
                y: height,
            },
            pos: GenericCoord { x, y },
        }
    }

    /// One past the right-most column, widened so it cannot overflow.
    pub const fn right(&self) -> u64 {
        self.pos.x as u64 + self.dims.x as u64
    }

    /// One past the bottom-most row, widened so it cannot overflow.
    pub const fn bottom(&self) -> u64 {
        self.pos.y as u64 + self.dims.y as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.dims.x == 0 || self.dims.y == 0
    }

    /// Returns `true` if this rectangle lies entirely within an extent anchored at the origin.
    pub const fn fits_within(&self, extent: GenericCoord<u32>) -> bool {
        self.right() <= extent.x as u64 && self.bottom() <= extent.y as u64
    }

    /// Returns `true` if the two rectangles share at least one pixel. Empty rectangles never
    /// intersect anything.
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.pos.x as u64) < other.right()
            && (other.pos.x as u64) < self.right()
            && (self.pos.y as u64) < other.bottom()
            && (other.pos.y as u64) < self.bottom()
    }
}
