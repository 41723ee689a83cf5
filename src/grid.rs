use rand::Rng;
use smallvec::SmallVec;
use std::convert::TryFrom;

use crate::cells::{Cartesian2DCoordinate, Direction, ALL_PASSAGES};
use crate::errors::*;
use crate::units::{Height, Width};

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

/// Largest number of cells a grid may hold, one byte each.
pub const MAX_CELLS: usize = 1 << 26;

/// Rectangular maze grid storing one wall bitmask per cell in row-major order.
///
/// Openings are always mutual: if a cell is open towards a neighbour the neighbour is
/// open back towards the cell. Nothing outside this crate can mutate a grid, so once the
/// generator or the codec has produced one it is read-only.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl MazeGrid {
    /// A grid with every wall closed.
    pub fn new(width: Width, height: Height) -> Result<MazeGrid> {
        let size = MazeGrid::checked_size(width, height)?;
        let (Width(w), Height(h)) = (width, height);

        Ok(MazeGrid {
            width: w,
            height: h,
            cells: vec![0; size],
        })
    }

    /// Build a grid from raw wall bitmasks, checking every invariant the generator would
    /// have established.
    pub(crate) fn from_raw_cells(width: Width, height: Height, cells: Vec<u8>) -> Result<MazeGrid> {
        let mut grid = MazeGrid::new(width, height)?;
        if cells.len() != grid.cells.len() {
            bail!(ErrorKind::CorruptData(format!("expected {} cells, found {}",
                                                 grid.cells.len(),
                                                 cells.len())));
        }
        grid.cells = cells;

        for coord in grid.iter() {
            let mask = grid.cells[grid.index(coord)];
            if mask & !ALL_PASSAGES != 0 {
                bail!(ErrorKind::CorruptData(format!("cell ({}, {}) has unknown wall bits {:#04x}",
                                                     coord.x,
                                                     coord.y,
                                                     mask)));
            }

            for dir in Direction::ALL.iter().filter(|dir| dir.is_open_in(mask)) {
                let mutual = grid.neighbour_at_direction(coord, *dir)
                    .map_or(false, |neighbour| grid.is_open(neighbour, dir.opposite()));
                if !mutual {
                    bail!(ErrorKind::CorruptData(format!("cell ({}, {}) is open {:?} without a matching opening",
                                                         coord.x,
                                                         coord.y,
                                                         dir)));
                }
            }
        }

        Ok(grid)
    }

    /// Number of cells a grid of these dimensions would hold, without allocating it.
    ///
    /// Both sides must be non-zero and fit in an `i32`, and the grid may hold at most
    /// `MAX_CELLS` cells. Anything else is `InvalidDimensions`.
    pub fn checked_size(width: Width, height: Height) -> Result<usize> {
        let (Width(w), Height(h)) = (width, height);
        // Persisted dimensions are 32 bit signed integers.
        let representable = |n: usize| n > 0 && i32::try_from(n).is_ok();
        if !representable(w) || !representable(h) {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        w.checked_mul(h)
            .filter(|size| *size <= MAX_CELLS)
            .ok_or_else(|| ErrorKind::InvalidDimensions(w, h).into())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The raw wall bitmasks, row-major.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The wall bitmask of a cell.
    pub fn at(&self, coord: Cartesian2DCoordinate) -> Result<u8> {
        self.grid_coordinate_to_index(coord)
            .map(|index| self.cells[index])
            .ok_or_else(|| ErrorKind::OutOfBounds(coord.x, coord.y).into())
    }

    /// Is there a passage from the cell in the given direction?
    /// Invalid coordinates have no passages.
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: Direction) -> bool {
        self.at(coord).map_or(false, |mask| direction.is_open_in(mask))
    }

    pub fn open_directions(&self, coord: Cartesian2DCoordinate) -> Result<DirectionSmallVec> {
        let mask = self.at(coord)?;
        Ok(Direction::ALL.iter().cloned().filter(|dir| dir.is_open_in(mask)).collect())
    }

    /// The cell 1 step away in `direction`, if that is still inside the grid.
    /// The neighbour is returned whether or not a wall separates the two cells.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: Direction)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Number of open passages. Each passage is shared by two cells but counted once.
    pub fn passages_count(&self) -> usize {
        self.cells
            .iter()
            .map(|mask| {
                Direction::Right.is_open_in(*mask) as usize + Direction::Bottom.is_open_in(*mask) as usize
            })
            .sum()
    }

    /// True when every wall in the grid is still closed.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|mask| *mask == 0)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let x = rng.gen_range(0..self.width) as u32;
        let y = rng.gen_range(0..self.height) as u32;
        Cartesian2DCoordinate::new(x, y)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_length: self.width,
            cells_count: self.cells.len(),
        }
    }

    /// Open the passage bit for one direction of one cell only.
    pub(crate) fn set_open(&mut self, coord: Cartesian2DCoordinate, direction: Direction) -> Result<()> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(coord.x, coord.y)))?;
        self.cells[index] |= direction.bit();
        Ok(())
    }

    /// Carve a passage between a cell and its neighbour, opening both sides.
    /// Returns the neighbour's coordinate.
    pub(crate) fn open_passage(&mut self,
                               coord: Cartesian2DCoordinate,
                               direction: Direction)
                               -> Result<Cartesian2DCoordinate> {
        self.at(coord)?;
        // The passage would lead off the grid edge.
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(coord.x, coord.y)))?;

        self.set_open(coord, direction)?;
        self.set_open(neighbour, direction.opposite())?;
        Ok(neighbour)
    }

    #[inline]
    pub(crate) fn index(&self, coord: Cartesian2DCoordinate) -> usize {
        coord.x as usize + self.width * coord.y as usize
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_length: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.row_length;
            let y = self.current_cell_number / self.row_length;
            self.current_cell_number += 1;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a MazeGrid {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
