use {
    serde::{Deserialize, Serialize},
    std::ops::{Add, Mul},
};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Coord<T>
where
    T: Sized,
{
    pub x: T,
    pub y: T,
}

impl<T> Coord<T>
where
    T: Sized,
{
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Coord<i32> {
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

impl Coord<u32> {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Returns the number of pixels covered by an extent of these dimensions.
    pub const fn area(self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Returns `true` if either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.x == 0 || self.y == 0
    }
}

impl<T> Add for Coord<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> Mul for Coord<T>
where
    T: Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
        }
    }
}

impl<T> From<(T, T)> for Coord<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Coord<T>> for (T, T) {
    fn from(coord: Coord<T>) -> Self {
        (coord.x, coord.y)
    }
}

impl<T> From<[T; 2]> for Coord<T>
where
    T: Copy,
{
    fn from(val: [T; 2]) -> Self {
        Self {
            x: val[0],
            y: val[1],
        }
    }
}

impl<T> From<Coord<T>> for [T; 2] {
    fn from(coord: Coord<T>) -> Self {
        [coord.x, coord.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_area() {
        assert_eq!(Coord::<u32>::new(3, 4).area(), 12);
        assert!(Coord::<u32>::new(0, 4).is_empty());
        assert!(!Coord::<u32>::new(1, 1).is_empty());
    }

    #[test]
    fn grid_cell_offset() {
        let cell = Coord::new(9u32, 13);
        let index = Coord::new(2u32, 1);

        assert_eq!(cell * index, Coord::new(18, 13));
        assert_eq!(cell * index + cell, Coord::new(27, 26));
    }
}
