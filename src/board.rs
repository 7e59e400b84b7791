use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of cells packed into one storage word.
pub const WORD_BITS: usize = u8::BITS as usize;

/// Rounds `w` up to the next multiple of [`WORD_BITS`], so that every row starts on a word
/// boundary.
pub const fn aligned_width(w: usize) -> usize {
    w.div_ceil(WORD_BITS) * WORD_BITS
}

/// A packed grid of cells, one bit per cell.
///
/// # Layout
/// Rows are padded to [`aligned_width`] bits. The cell `(x, y)` lives at bit index
/// ```notrust
/// i = x + y * aligned_width(w)
/// ```
/// which is bit `i % WORD_BITS` of word `i / WORD_BITS`. For a board 10 cells wide, rows take
/// two words each:
/// ```notrust
/// row 0: 0000_0000 0000_0000
///        |-x 0..8-| |xx|-pad-|
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard {
    words: Vec<u8>,
    w: usize,
    h: usize,
}

impl BitBoard {
    /// Create a board with every cell dead.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            words: vec![0; Self::word_count(w, h)],
            w,
            h,
        }
    }

    fn word_count(w: usize, h: usize) -> usize {
        aligned_width(w) * h / WORD_BITS
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    fn index(&self, x: usize, y: usize) -> (usize, u8) {
        assert!(
            x < self.w && y < self.h,
            "cell ({x}, {y}) is out of bounds for a {}x{} board",
            self.w,
            self.h
        );

        let i = x + y * aligned_width(self.w);
        (i / WORD_BITS, 1 << (i % WORD_BITS))
    }

    /// Whether the cell at `(x, y)` is alive.
    ///
    /// # Panics
    /// If `(x, y)` is outside the board.
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (word, mask) = self.index(x, y);
        self.words[word] & mask == mask
    }

    /// Mark the cell at `(x, y)` as alive or dead.
    ///
    /// # Panics
    /// If `(x, y)` is outside the board.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if self.get(x, y) != alive {
            let (word, mask) = self.index(x, y);
            self.words[word] ^= mask;
        }
    }

    /// Reallocate the board at the new dimensions. The previous content is discarded.
    pub fn resize(&mut self, w: usize, h: usize) {
        self.words = vec![0; Self::word_count(w, h)];
        self.w = w;
        self.h = h;
    }

    /// Kill every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Overwrite this board with the content of `other`.
    ///
    /// # Panics
    /// If the boards have different dimensions.
    pub fn copy_from(&mut self, other: &BitBoard) {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "cannot copy between boards of different dimensions"
        );

        self.words.copy_from_slice(&other.words);
    }

    /// Iterator over `(x, y)` for every alive cell, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.h).flat_map(move |y| {
            (0..self.w)
                .filter(move |&x| self.get(x, y))
                .map(move |x| (x, y))
        })
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard {}x{}", self.w, self.h)?;
        fmt::Display::fmt(self, f)
    }
}

/// Plaintext form, `#` for alive and `.` for dead, one line per row.
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.h {
            for x in 0..self.w {
                let c = if self.get(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("Row {row} has {got} cells, expected {exp}")]
    RaggedRow { row: usize, exp: usize, got: usize },

    #[error("Invalid cell '{got}' in row {row}, expected '#' or '.'")]
    InvalidCell { row: usize, got: char },
}

impl FromStr for BitBoard {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let w = rows.first().map_or(0, |row| row.chars().count());
        let mut board = BitBoard::new(w, rows.len());

        for (y, row) in rows.iter().enumerate() {
            let got = row.chars().count();
            if got != w {
                return Err(BoardParseError::RaggedRow { row: y, exp: w, got });
            }

            for (x, c) in row.chars().enumerate() {
                match c {
                    '#' | 'o' | 'O' => board.set(x, y, true),
                    '.' => {}
                    got => return Err(BoardParseError::InvalidCell { row: y, got }),
                }
            }
        }

        Ok(board)
    }
}
