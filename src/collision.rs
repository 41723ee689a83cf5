//! Turns free 2D movement into movement through the maze's corridors.
//!
//! Every cell owns a `cell_size` square of the plane. A move is checked one axis at a
//! time against the wall bitmask of the cell the player is in before moving: leaving
//! the cell through a closed wall pins the player to that cell's edge, leaving through
//! an open passage moves the player into the neighbouring cell. Walls are always
//! axis-aligned on cell boundaries so no geometric intersection tests are needed.
//!
//! Both axes are resolved against the same starting cell. A diagonal move that crosses
//! a horizontal and a vertical boundary in one step can therefore slip past a wall
//! corner that a swept collision check would stop.

use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::grid::MazeGrid;

/// Margin kept between the player and the outer edge of the maze.
pub const WALL_THICKNESS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionGeometry {
    pub cell_size: f32,
    pub wall_thickness: f32,
}

impl CollisionGeometry {
    pub fn new(cell_size: u32) -> CollisionGeometry {
        CollisionGeometry {
            cell_size: cell_size as f32,
            wall_thickness: WALL_THICKNESS,
        }
    }

    /// Size of the plane covered by the grid, `(width, height)`.
    pub fn world_size(&self, grid: &MazeGrid) -> (f32, f32) {
        (grid.width() as f32 * self.cell_size, grid.height() as f32 * self.cell_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub cell_x: u32,
    pub cell_y: u32,
}

impl Player {
    /// A player standing in the middle of `cell`.
    pub fn at_cell_centre(cell: Cartesian2DCoordinate, geometry: &CollisionGeometry) -> Player {
        Player {
            x: geometry.cell_size * (cell.x as f32 + 0.5),
            y: geometry.cell_size * (cell.y as f32 + 0.5),
            cell_x: cell.x,
            cell_y: cell.y,
        }
    }

    #[inline]
    pub fn cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.cell_x, self.cell_y)
    }
}

/// Move the player by `(dx, dy)`, stopping at walls and at the edge of the world.
///
/// Never fails: anything that cannot be honoured leaves the player at the nearest legal
/// position. A single call moves the player at most one cell along each axis.
pub fn resolve_move(grid: &MazeGrid, geometry: &CollisionGeometry, player: &mut Player, dx: f32, dy: f32) {
    // An unreadable cell behaves as if fully walled in.
    let walls = grid.at(player.cell()).unwrap_or(0);

    let (x, cell_x) = resolve_axis(AxisMove {
        position: player.x,
        delta: dx,
        cell: player.cell_x,
        cells_count: grid.width(),
        backward_open: Direction::Left.is_open_in(walls),
        forward_open: Direction::Right.is_open_in(walls),
    }, geometry);

    let (y, cell_y) = resolve_axis(AxisMove {
        position: player.y,
        delta: dy,
        cell: player.cell_y,
        cells_count: grid.height(),
        backward_open: Direction::Top.is_open_in(walls),
        forward_open: Direction::Bottom.is_open_in(walls),
    }, geometry);

    player.x = x;
    player.y = y;
    player.cell_x = cell_x;
    player.cell_y = cell_y;
}

#[derive(Debug, Clone, Copy)]
struct AxisMove {
    position: f32,
    delta: f32,
    cell: u32,
    cells_count: usize,
    backward_open: bool,
    forward_open: bool,
}

fn resolve_axis(axis: AxisMove, geometry: &CollisionGeometry) -> (f32, u32) {
    let size = geometry.cell_size;
    let extent = axis.cells_count as f32 * size;
    let delta = if axis.delta.is_finite() { axis.delta } else { 0.0 };

    // World bounds first, independent of any maze wall.
    let target = (axis.position + delta)
        .max(geometry.wall_thickness)
        .min(extent - geometry.wall_thickness);

    let target_cell = (target / size).floor();
    let current_cell = axis.cell as f32;
    let cell_start = current_cell * size;
    let cell_end = cell_start + (size - 1.0);

    if target_cell < current_cell {
        if axis.backward_open && axis.cell > 0 {
            (target.max(cell_start - size), axis.cell - 1)
        } else {
            (cell_start, axis.cell)
        }
    } else if target_cell > current_cell {
        if axis.forward_open && (axis.cell as usize + 1) < axis.cells_count {
            (target.min(cell_end + size), axis.cell + 1)
        } else {
            (cell_end, axis.cell)
        }
    } else {
        (target, axis.cell)
    }
}
