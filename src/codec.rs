//! Binary persistence of a generated maze.
//!
//! The layout is the width and height as 32 bit little endian signed integers followed
//! by one wall bitmask byte per cell in row-major order. There is no magic number,
//! version or checksum. Bytes after the cell data are ignored.

use log::info;
use std::convert::TryFrom;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::grid::MazeGrid;
use crate::units::{Height, Width};

/// Where a freshly generated maze is saved and where a fixed maze is loaded from.
pub const DEFAULT_MAZE_PATH: &str = "export/maze.bin";

const DIMENSION_BYTES: usize = 4;

/// Serialize a grid to a byte sink.
pub fn write_maze<W: Write>(grid: &MazeGrid, sink: &mut W) -> Result<()> {
    // MazeGrid guarantees both dimensions fit.
    let width = i32::try_from(grid.width()).chain_err(|| "maze width too large to persist")?;
    let height = i32::try_from(grid.height()).chain_err(|| "maze height too large to persist")?;

    sink.write_all(&width.to_le_bytes())?;
    sink.write_all(&height.to_le_bytes())?;
    sink.write_all(grid.cells())?;
    Ok(())
}

/// Deserialize a grid from a byte source.
pub fn read_maze<R: Read>(source: &mut R) -> Result<MazeGrid> {
    let width = read_dimension(source, "width")?;
    let height = read_dimension(source, "height")?;
    let declared_cells = MazeGrid::checked_size(Width(width), Height(height))
        .map_err(|_| corrupt(format!("dimensions {}x{} are too large", width, height)))?;

    // The header is not trusted with a large allocation before the body arrives.
    let mut cells = Vec::with_capacity(declared_cells.min(1 << 20));
    let read = source.by_ref().take(declared_cells as u64).read_to_end(&mut cells)?;
    if read < declared_cells {
        return Err(corrupt(format!("header declares {} cells but only {} bytes follow",
                                   declared_cells,
                                   read)));
    }

    MazeGrid::from_raw_cells(Width(width), Height(height), cells)
}

pub fn save_maze_to_file<P: AsRef<Path>>(grid: &MazeGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut blob = Vec::with_capacity(2 * DIMENSION_BYTES + grid.size());
    write_maze(grid, &mut blob)?;
    fs::write(path, &blob)?;

    info!("Maze saved to: {}", path.display());
    Ok(())
}

pub fn load_maze_from_file<P: AsRef<Path>>(path: P) -> Result<MazeGrid> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let grid = read_maze(&mut io::BufReader::new(file))?;

    info!("Maze loaded from: {} ({}x{})", path.display(), grid.width(), grid.height());
    Ok(grid)
}

/// Somewhere a maze can be kept between sessions.
pub trait MazeStore {
    fn load(&self) -> Result<MazeGrid>;
    fn save(&mut self, grid: &MazeGrid) -> Result<()>;
}

/// Stores the maze in a single binary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMazeStore {
    path: PathBuf,
}

impl FileMazeStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileMazeStore {
        FileMazeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileMazeStore {
    fn default() -> FileMazeStore {
        FileMazeStore::new(DEFAULT_MAZE_PATH)
    }
}

impl MazeStore for FileMazeStore {
    fn load(&self) -> Result<MazeGrid> {
        load_maze_from_file(&self.path)
    }

    fn save(&mut self, grid: &MazeGrid) -> Result<()> {
        save_maze_to_file(grid, &self.path)
    }
}

fn read_dimension<R: Read>(source: &mut R, name: &str) -> Result<usize> {
    let mut bytes = [0u8; DIMENSION_BYTES];
    source.read_exact(&mut bytes).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => corrupt(format!("truncated header reading the {}", name)),
        _ => e.into(),
    })?;

    let value = i32::from_le_bytes(bytes);
    if value <= 0 {
        return Err(corrupt(format!("{} must be positive, found {}", name, value)));
    }
    Ok(value as usize)
}

fn corrupt(reason: String) -> Error {
    ErrorKind::CorruptData(reason).into()
}
