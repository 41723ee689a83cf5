use bit_set::BitSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::errors::*;
use crate::grid::MazeGrid;

/// Grids with more cells than this are carved with an explicit stack instead of recursion.
/// A long corridor maze recurses once per cell, so the limit bounds the call stack depth.
pub const DEFAULT_RECURSION_LIMIT: usize = 4096;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Starting from `start` (or a random cell) it walks to a random unvisited neighbour,
/// carving a passage as it goes. When a cell has no unvisited neighbours left it
/// backtracks to the most recent cell that still has some. Every cell gets visited
/// exactly once and each visit carves exactly one passage, so the result is a spanning
/// tree over the grid: a perfect maze with a single path between any two cells.
///
/// At each cell the four directions are tried in a fresh uniformly shuffled order.
/// Given the same random number stream the maze is always the same.
///
/// Grids with at most `recursion_limit` cells use plain recursion, larger grids an
/// explicit stack of frames. Both consume the random stream identically.
///
/// The grid must not have any passages yet. Returns the start cell used.
pub fn recursive_backtracker<R>(grid: &mut MazeGrid,
                                start: Option<Cartesian2DCoordinate>,
                                rng: &mut R,
                                recursion_limit: usize)
                                -> Result<Cartesian2DCoordinate>
    where R: Rng + ?Sized
{
    if !grid.is_blank() {
        bail!(ErrorKind::GridAlreadyCarved);
    }

    let start = match start {
        Some(coord) => coord,
        None => grid.random_cell(rng),
    };
    let start_index = grid.grid_coordinate_to_index(start)
        .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(start.x, start.y)))?;

    // The start counts as visited even though it has no passages yet.
    let mut visited = BitSet::with_capacity(grid.size());
    visited.insert(start_index);

    if grid.size() <= recursion_limit {
        carve_recursive(grid, start, rng, &mut visited)?;
    } else {
        carve_with_stack(grid, start, rng, &mut visited)?;
    }

    Ok(start)
}

/// Open a passage to `direction` if it leads to an unvisited cell.
/// Returns the newly visited cell.
fn visit_neighbour(grid: &mut MazeGrid,
                   coord: Cartesian2DCoordinate,
                   direction: Direction,
                   visited: &mut BitSet)
                   -> Result<Option<Cartesian2DCoordinate>> {
    let unvisited = grid.neighbour_at_direction(coord, direction)
        .filter(|neighbour| !visited.contains(grid.index(*neighbour)));

    match unvisited {
        Some(neighbour) => {
            visited.insert(grid.index(neighbour));
            grid.open_passage(coord, direction)?;
            Ok(Some(neighbour))
        }
        None => Ok(None),
    }
}

fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
}

fn carve_recursive<R>(grid: &mut MazeGrid,
                      coord: Cartesian2DCoordinate,
                      rng: &mut R,
                      visited: &mut BitSet)
                      -> Result<()>
    where R: Rng + ?Sized
{
    for direction in shuffled_directions(rng).iter() {
        if let Some(neighbour) = visit_neighbour(grid, coord, *direction, visited)? {
            carve_recursive(grid, neighbour, rng, visited)?;
        }
    }
    Ok(())
}

/// One suspended visit of the backtracker: the cell and the directions it has left to try.
#[derive(Debug)]
struct Frame {
    coord: Cartesian2DCoordinate,
    directions: [Direction; 4],
    next_direction: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(coord: Cartesian2DCoordinate, rng: &mut R) -> Frame {
        Frame {
            coord,
            directions: shuffled_directions(rng),
            next_direction: 0,
        }
    }
}

fn carve_with_stack<R>(grid: &mut MazeGrid,
                       start: Cartesian2DCoordinate,
                       rng: &mut R,
                       visited: &mut BitSet)
                       -> Result<()>
    where R: Rng + ?Sized
{
    let mut stack = Vec::with_capacity(grid.size());
    stack.push(Frame::enter(start, rng));

    while let Some(frame) = stack.last_mut() {
        if frame.next_direction == frame.directions.len() {
            // backtrack
            stack.pop();
            continue;
        }

        let coord = frame.coord;
        let direction = frame.directions[frame.next_direction];
        frame.next_direction += 1;

        if let Some(neighbour) = visit_neighbour(grid, coord, direction, visited)? {
            stack.push(Frame::enter(neighbour, rng));
        }
    }

    Ok(())
}
