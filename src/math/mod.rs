mod coord;
mod rect;

pub use self::rect::Rect;

use self::coord::Coord as GenericCoord;

/// A signed pixel offset, such as a glyph bearing.
pub type Coord = GenericCoord<i32>;

/// Unsigned pixel dimensions or canvas positions.
pub type Extent = GenericCoord<u32>;
