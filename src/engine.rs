use rand::Rng;
use tracing::debug;
use tracing::trace;

use crate::board::BitBoard;
use crate::rule_set::RuleSet;

/// Display category of a cell. Purely cosmetic: the transition rule never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Dead,

    /// Alive, and its neighbor count lets it survive.
    Survivor,

    /// Alive, with a neighbor count that would give birth but not keep it alive.
    Newborn,

    /// Alive, dying with fewer than 3 neighbors.
    Understarved,

    /// Alive, dying with 3 or more neighbors.
    Overpopulated,
}

/// Count the live cells around `(x, y)`. The board wraps around on both axes, so on a board
/// 1 or 2 cells wide the same physical cell can be counted more than once.
pub fn count_neighbors(board: &BitBoard, x: usize, y: usize) -> u8 {
    let (w, h) = (board.width() as isize, board.height() as isize);
    let (x, y) = (x as isize, y as isize);

    let mut n = 0;

    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let nx = (x + dx).rem_euclid(w) as usize;
            let ny = (y + dy).rem_euclid(h) as usize;

            if board.get(nx, ny) {
                n += 1;
            }
        }
    }

    n
}

/// The simulated world: the current generation plus a scratch board of the same size.
pub struct Automaton {
    active: BitBoard,

    /// Holds the previous generation during [`Automaton::step`] and the transferred cells during
    /// a resize. Always has the dimensions of `active` between calls.
    scratch: BitBoard,

    rules: RuleSet,

    generation: u64,
}

impl Automaton {
    /// Create an empty, zero sized world
    pub fn new(rules: RuleSet) -> Self {
        Self::with_size(rules, 0, 0)
    }

    pub fn with_size(rules: RuleSet, w: usize, h: usize) -> Self {
        Self {
            active: BitBoard::new(w, h),
            scratch: BitBoard::new(w, h),
            rules,
            generation: 0,
        }
    }

    /// Build a world around an existing board
    pub fn from_board(rules: RuleSet, board: BitBoard) -> Self {
        let (w, h) = board.dimensions();

        Self {
            active: board,
            scratch: BitBoard::new(w, h),
            rules,
            generation: 0,
        }
    }

    pub fn board(&self) -> &BitBoard {
        &self.active
    }

    pub fn board_mut(&mut self) -> &mut BitBoard {
        &mut self.active
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.active.dimensions()
    }

    /// Number of steps taken since the world was created or last cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.active.get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.active.set(x, y, alive);
    }

    /// Advance the world by one generation. Every cell is evaluated against a snapshot of the
    /// previous generation.
    pub fn step(&mut self) {
        self.scratch.copy_from(&self.active);

        let (w, h) = self.scratch.dimensions();
        for y in 0..h {
            for x in 0..w {
                let alive = self.scratch.get(x, y);
                let n = count_neighbors(&self.scratch, x, y);

                self.active.set(x, y, self.rules.next_state(alive, n));
            }
        }

        self.generation += 1;
        trace!(generation = self.generation, "stepped");
    }

    /// Set every cell to a uniformly random state
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (w, h) = self.active.dimensions();
        for y in 0..h {
            for x in 0..w {
                self.active.set(x, y, rng.random());
            }
        }
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.active.clear();
        self.generation = 0;
    }

    /// Resize the world, keeping the cells that lie in both the old and the new bounds at the
    /// same coordinates. Newly exposed cells are dead.
    pub fn resize_preserving(&mut self, w: usize, h: usize) {
        let (old_w, old_h) = self.active.dimensions();

        self.scratch.resize(w, h);
        for y in 0..h.min(old_h) {
            for x in 0..w.min(old_w) {
                self.scratch.set(x, y, self.active.get(x, y));
            }
        }

        std::mem::swap(&mut self.active, &mut self.scratch);
        self.scratch.resize(w, h);

        debug!(old_w, old_h, w, h, "resized world");
    }

    /// Resize only when the dimensions actually changed. Returns whether it did.
    pub fn resize_if_needed(&mut self, w: usize, h: usize) -> bool {
        if self.dimensions() == (w, h) {
            return false;
        }

        self.resize_preserving(w, h);
        true
    }

    /// Category used to color the cell at `(x, y)`
    pub fn classify(&self, x: usize, y: usize) -> CellKind {
        if !self.active.get(x, y) {
            return CellKind::Dead;
        }

        let n = count_neighbors(&self.active, x, y);

        if self.rules.is_survive(n) {
            CellKind::Survivor
        } else if self.rules.is_birth(n) {
            CellKind::Newborn
        } else if n < 3 {
            CellKind::Understarved
        } else {
            CellKind::Overpopulated
        }
    }
}
