use image::{Rgba, RgbaImage};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use crate::cells::Direction;
use crate::errors::*;
use crate::grid::MazeGrid;

/// Where the image of a freshly generated maze is exported.
pub const DEFAULT_IMAGE_PATH: &str = "export/maze.png";

/// 4 bytes per pixel, so at most 1 GiB of image.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

pub const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const WALL: Rgba<u8> = Rgba([0, 0, 0, 0xff]);

/// Draw every closed wall of the maze as a 1 pixel line on a white background.
///
/// The image is `width * cell_size` by `height * cell_size` pixels. Each cell draws its
/// own four walls from its top left corner at `(x * cell_size, y * cell_size)`, with the
/// line end points included. Right and bottom walls of the last column and row fall just
/// outside the image and are clipped, like a window of the same size would.
///
/// Fails with `InvalidDimensions` when the image would be too large to address.
pub fn render_maze_image(grid: &MazeGrid, cell_size: u32) -> Result<RgbaImage> {
    let too_large = || Error::from(ErrorKind::InvalidDimensions(grid.width(), grid.height()));
    let pixels = |cells: usize| {
        u32::try_from(cells).ok().and_then(|cells| cells.checked_mul(cell_size))
    };
    let image_width = pixels(grid.width()).ok_or_else(too_large)?;
    let image_height = pixels(grid.height()).ok_or_else(too_large)?;
    if u64::from(image_width) * u64::from(image_height) > MAX_IMAGE_PIXELS {
        return Err(too_large());
    }
    let mut image = RgbaImage::from_pixel(image_width, image_height, BACKGROUND);

    for cell in grid.iter() {
        let walls = grid.at(cell).unwrap_or(0);
        let (x1, y1) = (cell.x * cell_size, cell.y * cell_size);
        let (x2, y2) = (x1 + cell_size, y1 + cell_size);

        if !Direction::Top.is_open_in(walls) {
            draw_horizontal_line(&mut image, x1, x2, y1);
        }
        if !Direction::Right.is_open_in(walls) {
            draw_vertical_line(&mut image, x2, y1, y2);
        }
        if !Direction::Bottom.is_open_in(walls) {
            draw_horizontal_line(&mut image, x1, x2, y2);
        }
        if !Direction::Left.is_open_in(walls) {
            draw_vertical_line(&mut image, x1, y1, y2);
        }
    }

    Ok(image)
}

/// Write a rendered maze to a PNG file, creating its directory if needed.
pub fn save_maze_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn draw_horizontal_line(image: &mut RgbaImage, x1: u32, x2: u32, y: u32) {
    if y >= image.height() {
        return;
    }
    for x in x1..=x2.min(image.width().saturating_sub(1)) {
        image.put_pixel(x, y, WALL);
    }
}

fn draw_vertical_line(image: &mut RgbaImage, x: u32, y1: u32, y2: u32) {
    if x >= image.width() {
        return;
    }
    for y in y1..=y2.min(image.height().saturating_sub(1)) {
        image.put_pixel(x, y, WALL);
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{LEFT, RIGHT};
    use crate::units::{Height, Width};

    fn column_is_wall(image: &RgbaImage, x: u32) -> bool {
        (0..image.height()).all(|y| *image.get_pixel(x, y) == WALL)
    }

    #[test]
    fn image_dimensions() {
        let g = MazeGrid::new(Width(5), Height(3)).unwrap();
        let image = render_maze_image(&g, 8).unwrap();
        assert_eq!(image.dimensions(), (40, 24));
    }

    #[test]
    fn oversized_image_is_refused() {
        let g = MazeGrid::new(Width(3), Height(3)).unwrap();
        match render_maze_image(&g, u32::MAX) {
            Err(Error(ErrorKind::InvalidDimensions(3, 3), _)) => {}
            other => panic!("expected invalid dimensions, got {:?}", other.map(|i| i.dimensions())),
        }
        // The width alone overflows 32 bits of pixels.
        let wide = MazeGrid::new(Width(1 << 16), Height(1)).unwrap();
        assert!(render_maze_image(&wide, 1 << 16).is_err());
        // Each side fits but the pixel count does not.
        let square = MazeGrid::new(Width(1 << 10), Height(1 << 10)).unwrap();
        assert!(render_maze_image(&square, 1 << 5).is_err());
    }

    #[test]
    fn closed_walls_are_drawn() {
        let g = MazeGrid::new(Width(2), Height(1)).unwrap();
        let image = render_maze_image(&g, 10).unwrap();
        assert!(column_is_wall(&image, 0));
        assert!(column_is_wall(&image, 10));
        assert_eq!(*image.get_pixel(5, 0), WALL);
        assert_eq!(*image.get_pixel(5, 5), BACKGROUND);
        assert_eq!(*image.get_pixel(15, 5), BACKGROUND);
        // The outer right and bottom walls are one pixel outside the image.
        assert_eq!(*image.get_pixel(19, 5), BACKGROUND);
        assert_eq!(*image.get_pixel(5, 9), BACKGROUND);
    }

    #[test]
    fn open_passages_are_not_drawn() {
        let g = MazeGrid::from_raw_cells(Width(2), Height(1), vec![RIGHT, LEFT]).unwrap();
        let image = render_maze_image(&g, 10).unwrap();
        assert!(column_is_wall(&image, 0));
        assert_eq!(*image.get_pixel(10, 5), BACKGROUND);
        // The top wall still runs across the passage.
        assert_eq!(*image.get_pixel(10, 0), WALL);
    }

    #[test]
    fn saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export").join("maze.png");
        let g = MazeGrid::new(Width(3), Height(3)).unwrap();
        let image = render_maze_image(&g, 6).unwrap();
        save_maze_image(&image, &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
