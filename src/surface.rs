//! The two collaborators the simulation talks to: something to draw on and something that
//! produces key presses.

use std::io;

use crate::ScreenSize;
use crate::engine::CellKind;
use crate::events::Key;

/// Each board column takes this many terminal columns, so cells look roughly square.
pub const COLS_PER_CELL: ScreenSize = 2;

/// Assumed font height in pixels.
const FONT_SIZE: usize = 8;

/// Largest board, regardless of how big the terminal is. Sized for a 1920x1080 screen.
pub const MAX_WIDTH: usize = 1920 / (FONT_SIZE / 2 * COLS_PER_CELL as usize);
pub const MAX_HEIGHT: usize = 1080 / FONT_SIZE;

/// Board dimensions that fit a terminal of `cols` columns and `rows` rows.
pub fn board_dimensions(cols: ScreenSize, rows: ScreenSize) -> (usize, usize) {
    let w = (cols / COLS_PER_CELL) as usize;
    let h = rows as usize;

    (w.min(MAX_WIDTH), h.min(MAX_HEIGHT))
}

/// A character grid the board is drawn on.
pub trait RenderSurface {
    /// Current size as `(columns, rows)`.
    fn size(&self) -> io::Result<(ScreenSize, ScreenSize)>;

    /// Draw one board cell whose top left corner is at `(row, col)`. A cell is
    /// [`COLS_PER_CELL`] columns wide.
    fn draw_cell(&mut self, row: ScreenSize, col: ScreenSize, kind: CellKind) -> io::Result<()>;

    /// Show the cursor at `(row, col)`, or hide it with `None`.
    fn set_cursor(&mut self, at: Option<(ScreenSize, ScreenSize)>) -> io::Result<()>;

    /// Push everything drawn so far to the screen.
    fn flush(&mut self) -> io::Result<()>;
}

/// Source of key presses.
pub trait KeySource {
    /// Return the next pending key, or `None` right away when nothing is pending.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn board_fits_terminal() {
        assert_eq!(board_dimensions(80, 24), (40, 24));
        assert_eq!(board_dimensions(81, 24), (40, 24));
        assert_eq!(board_dimensions(1, 1), (0, 1));
        assert_eq!(board_dimensions(0, 0), (0, 0));
    }

    #[test]
    fn board_is_capped() {
        assert_eq!((MAX_WIDTH, MAX_HEIGHT), (240, 135));
        assert_eq!(board_dimensions(ScreenSize::MAX, ScreenSize::MAX), (240, 135));
    }
}
