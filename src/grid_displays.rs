use std::fmt;

use crate::cells::{Cartesian2DCoordinate, Direction};
use crate::grid::MazeGrid;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Text view of the maze using box drawing characters, 3 characters of floor per cell.
impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let columns_count = self.width() as u32;
        let rows_count = self.height() as u32;
        let gc = Cartesian2DCoordinate::new;

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for x in 0..columns_count {
            output.push_str(WALL_LR_3);
            if self.is_open(gc(x, 0), Direction::Right) {
                output.push_str(WALL_LR);
            } else if x == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for y in 0..rows_count {

            let is_last_row = y == rows_count - 1;

            // The west most boundary of the row is special cased, the top of each cell was
            // already drawn as the bottom of the previous row.
            let mut middle_section = String::from(WALL_UD);
            let mut bottom_section = String::new();

            for x in 0..columns_count {
                let coord = gc(x, y);
                let is_last_column = x == columns_count - 1;
                let east_open = self.is_open(coord, Direction::Right);
                let south_open = self.is_open(coord, Direction::Bottom);

                middle_section.push_str("   ");
                middle_section.push_str(if east_open { " " } else { WALL_UD });

                if x == 0 {
                    bottom_section.push_str(if is_last_row {
                        WALL_RU
                    } else if south_open {
                        WALL_UD
                    } else {
                        WALL_RUD
                    });
                }
                bottom_section.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        // The corner joins up to four wall segments, one from each of the
                        // cells sharing it.
                        let show_left = !south_open;
                        let show_up = !east_open;
                        let show_right = !self.is_open(gc(x + 1, y), Direction::Bottom);
                        let show_down = !self.is_open(gc(x, y + 1), Direction::Right);
                        corner_piece(show_left, show_right, show_up, show_down)
                    }
                };
                bottom_section.push_str(corner);
            }

            output.push_str(&middle_section);
            output.push('\n');
            output.push_str(&bottom_section);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

fn corner_piece(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}
