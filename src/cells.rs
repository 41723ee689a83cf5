use std::convert::From;

/// Wall bitmask bit for each cardinal direction. A set bit is an open passage.
pub const TOP: u8 = 1;
pub const RIGHT: u8 = 1 << 1;
pub const BOTTOM: u8 = 1 << 2;
pub const LEFT: u8 = 1 << 3;

/// Every bit a cell's wall bitmask may legitimately carry.
pub const ALL_PASSAGES: u8 = TOP | RIGHT | BOTTOM | LEFT;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (moving off the top or left edge).
    /// There is no upper bound check, that depends upon the grid.
    pub fn offset(self, direction: Direction) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match direction {
            Direction::Top => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Direction::Right => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            Direction::Bottom => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Direction::Left => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Clockwise from the top. The generator shuffles a copy of this for every cell it visits.
    pub const ALL: [Direction; 4] = [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left];

    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Direction::Top => TOP,
            Direction::Right => RIGHT,
            Direction::Bottom => BOTTOM,
            Direction::Left => LEFT,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Is the passage in this direction open in the wall bitmask?
    #[inline]
    pub fn is_open_in(self, wall_mask: u8) -> bool {
        wall_mask & self.bit() != 0
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn direction_bits_are_distinct() {
        let combined = Direction::ALL.iter().fold(0u8, |acc, dir| {
            assert_eq!(acc & dir.bit(), 0);
            acc | dir.bit()
        });
        assert_eq!(combined, ALL_PASSAGES);
        assert_eq!(combined, 0x0F);
    }

    #[test]
    fn opposites() {
        for dir in Direction::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn offset_coordinates() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(gc(0, 0).offset(Direction::Top), None);
        assert_eq!(gc(0, 0).offset(Direction::Left), None);
        assert_eq!(gc(0, 0).offset(Direction::Right), Some(gc(1, 0)));
        assert_eq!(gc(0, 0).offset(Direction::Bottom), Some(gc(0, 1)));
        assert_eq!(gc(3, 3).offset(Direction::Top), Some(gc(3, 2)));
        assert_eq!(gc(3, 3).offset(Direction::Left), Some(gc(2, 3)));
        assert_eq!(gc(u32::MAX, 0).offset(Direction::Right), None);
    }

    #[test]
    fn open_in_mask() {
        let mask = RIGHT | BOTTOM;
        assert!(!Direction::Top.is_open_in(mask));
        assert!(Direction::Right.is_open_in(mask));
        assert!(Direction::Bottom.is_open_in(mask));
        assert!(!Direction::Left.is_open_in(mask));
    }
}
