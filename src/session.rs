use image::RgbaImage;
use log::{debug, error, info, warn};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::path::Path;

use crate::cells::Cartesian2DCoordinate;
use crate::codec::MazeStore;
use crate::collision::{resolve_move, CollisionGeometry, Player, WALL_THICKNESS};
use crate::errors::*;
use crate::generators::{recursive_backtracker, DEFAULT_RECURSION_LIMIT};
use crate::grid::MazeGrid;
use crate::renderers::save_maze_image;
use crate::settings::Settings;
use crate::units::{Height, Width};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub width: Width,
    pub height: Height,
    pub cell_size: u32,
    pub wall_thickness: f32,
    /// Load the saved maze instead of generating a new one.
    pub fixed_maze: bool,
    pub seed: Option<u64>,
    pub recursion_limit: usize,
}

impl SessionConfig {
    pub fn new(width: Width, height: Height, cell_size: u32) -> SessionConfig {
        SessionConfig {
            width,
            height,
            cell_size,
            wall_thickness: WALL_THICKNESS,
            fixed_maze: false,
            seed: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn from_settings(settings: &Settings) -> SessionConfig {
        SessionConfig {
            fixed_maze: settings.const_maze,
            seed: settings.seed,
            ..SessionConfig::new(Width(settings.maze_width), Height(settings.maze_height), settings.cell_size)
        }
    }
}

/// How the session's maze came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeOrigin {
    Generated,
    Loaded,
    /// Generating or loading failed, every wall is closed.
    Fallback,
}

/// One play-through of a maze: the grid, the player and the rules connecting them.
#[derive(Debug)]
pub struct GameSession {
    grid: MazeGrid,
    player: Player,
    geometry: CollisionGeometry,
    origin: MazeOrigin,
    seed: Option<u64>,
}

impl GameSession {
    /// Generate a new maze and save it to `store`, or load the maze kept in `store` when
    /// the configuration asks for a fixed maze.
    ///
    /// Failing to generate, load or save is logged and does not stop the session; a maze
    /// that could not be produced is replaced by a grid with every wall closed. Only an
    /// unusable configuration is an error.
    pub fn start<S: MazeStore + ?Sized>(config: &SessionConfig, store: &mut S) -> Result<GameSession> {
        if config.cell_size == 0 {
            bail!(ErrorKind::InvalidSetting("CELL_SIZE".to_string(), "0".to_string()));
        }
        MazeGrid::checked_size(config.width, config.height)?;
        let closed_grid = || MazeGrid::new(config.width, config.height);

        let (grid, origin, seed) = if config.fixed_maze {
            match store.load() {
                Ok(grid) => {
                    if (Width(grid.width()), Height(grid.height())) != (config.width, config.height) {
                        warn!("Loaded maze is {}x{}, settings ask for {}x{}; using the loaded size",
                              grid.width(),
                              grid.height(),
                              config.width.0,
                              config.height.0);
                    }
                    (grid, MazeOrigin::Loaded, None)
                }
                Err(e) => {
                    error!("Failed to load maze: {}", e);
                    (closed_grid()?, MazeOrigin::Fallback, None)
                }
            }
        } else {
            let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
            let mut grid = closed_grid()?;
            let mut rng = XorShiftRng::seed_from_u64(seed);
            match recursive_backtracker(&mut grid, None, &mut rng, config.recursion_limit) {
                Ok(start) => {
                    info!("Generated {}x{} maze from ({}, {}) with seed {}",
                          grid.width(),
                          grid.height(),
                          start.x,
                          start.y,
                          seed);
                    if let Err(e) = store.save(&grid) {
                        error!("Failed to save maze: {}", e);
                    }
                    (grid, MazeOrigin::Generated, Some(seed))
                }
                Err(e) => {
                    error!("Failed to generate maze: {}", e);
                    (closed_grid()?, MazeOrigin::Fallback, Some(seed))
                }
            }
        };
        debug!("Maze:\n{}", grid);

        let geometry = CollisionGeometry {
            cell_size: config.cell_size as f32,
            wall_thickness: config.wall_thickness,
        };
        let player = Player::at_cell_centre(Cartesian2DCoordinate::new(0, 0), &geometry);

        Ok(GameSession {
            grid,
            player,
            geometry,
            origin,
            seed,
        })
    }

    /// Move the player by `(dx, dy)` plane units, respecting the maze walls.
    pub fn move_player(&mut self, dx: f32, dy: f32) {
        resolve_move(&self.grid, &self.geometry, &mut self.player, dx, dy);
    }

    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn geometry(&self) -> &CollisionGeometry {
        &self.geometry
    }

    #[inline]
    pub fn origin(&self) -> MazeOrigin {
        self.origin
    }

    /// The generator seed, when the maze was generated this session.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Size of the plane covered by the maze, `(width, height)`.
    pub fn world_size(&self) -> (f32, f32) {
        self.geometry.world_size(&self.grid)
    }

    /// Save a fully drawn image of the maze, but only for a maze generated this session.
    /// Returns whether the image was written.
    pub fn export_maze_image<P: AsRef<Path>>(&self, image: &RgbaImage, path: P) -> Result<bool> {
        if self.origin != MazeOrigin::Generated {
            return Ok(false);
        }
        save_maze_image(image, path.as_ref())?;
        info!("Maze image saved to: {}", path.as_ref().display());
        Ok(true)
    }
}

/// Movements for one frame of held arrow keys, applied one `move_player` call each.
pub type FrameMoves = SmallVec<[(f32, f32); 4]>;

/// Turn the pressed arrow keys into single axis moves of `speed`, in the order up, down,
/// left, right.
///
/// Each move is resolved against the cell the previous one left the player in. A single
/// diagonal move would check both axes against the starting cell and could cut through
/// a wall corner.
pub fn frame_moves(up: bool, down: bool, left: bool, right: bool, speed: f32) -> FrameMoves {
    let keys = [(up, (0.0, -speed)), (down, (0.0, speed)), (left, (-speed, 0.0)), (right, (speed, 0.0))];
    keys.iter().filter(|key| key.0).map(|key| key.1).collect()
}
