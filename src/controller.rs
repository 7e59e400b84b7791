use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use rand::Rng;
use tracing::debug;
use tracing::info;

use crate::ScreenSize;
use crate::engine::Automaton;
use crate::events::Direction;
use crate::events::Key;
use crate::rule_set::RuleSet;
use crate::surface::COLS_PER_CELL;
use crate::surface::KeySource;
use crate::surface::RenderSurface;
use crate::surface::board_dimensions;

/// Delay between generations at startup, in milliseconds
pub const DEFAULT_SPEED: u64 = 200;

/// Fastest allowed delay
pub const MIN_SPEED: u64 = 1;

/// Slowest allowed delay
pub const MAX_SPEED: u64 = 5000;

/// How much one speed key changes the delay
pub const SPEED_STEP: u64 = 5;

/// How long the control loop sleeps when no key is pending
const IDLE_TIME: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Generations advance on a timer
    Playing,

    /// Edit mode: the timer is suspended and the cursor edits cells
    Paused,
}

/// What the control loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Edit cursor, in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    /// Move one cell in `dir`, staying inside a `w` by `h` board
    pub fn moved(self, dir: Direction, w: usize, h: usize) -> Self {
        let Cursor { x, y } = self;

        let (x, y) = match dir {
            Direction::Left => (x.saturating_sub(1), y),
            Direction::Right => (x + 1, y),
            Direction::Up => (x, y.saturating_sub(1)),
            Direction::Down => (x, y + 1),
        };

        Cursor { x, y }.clamped(w, h)
    }

    pub fn clamped(self, w: usize, h: usize) -> Self {
        Cursor {
            x: self.x.min(w.saturating_sub(1)),
            y: self.y.min(h.saturating_sub(1)),
        }
    }
}

/// Everything the control loop owns: the world, the interaction mode, the cursor and the
/// generation timer.
pub struct Simulation<R> {
    world: Automaton,
    mode: Mode,
    cursor: Cursor,

    /// Milliseconds between generations
    speed: u64,

    /// When the last timed generation ran. `None` makes the next tick step right away.
    last_step: Option<Instant>,

    rng: R,
}

impl<R: Rng> Simulation<R> {
    pub fn new(rules: RuleSet, rng: R) -> Self {
        Self::from_world(Automaton::new(rules), rng)
    }

    pub fn from_world(world: Automaton, rng: R) -> Self {
        Self {
            world,
            mode: Mode::Playing,
            cursor: Cursor::default(),
            speed: DEFAULT_SPEED,
            last_step: None,
            rng,
        }
    }

    pub fn world(&self) -> &Automaton {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut Automaton {
        &mut self.world
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn speed(&self) -> u64 {
        self.speed
    }

    /// Size the world to the surface, fill it with random cells and draw it.
    pub fn start<S: RenderSurface>(&mut self, surface: &mut S) -> io::Result<()> {
        self.sync_size(surface)?;
        self.world.randomize(&mut self.rng);

        let (w, h) = self.world.dimensions();
        info!(rules = %self.world.rules(), w, h, "starting simulation");

        self.render(surface)
    }

    /// Resize the world if the surface changed size since the last call.
    pub fn sync_size<S: RenderSurface>(&mut self, surface: &S) -> io::Result<bool> {
        let (cols, rows) = surface.size()?;
        let (w, h) = board_dimensions(cols, rows);

        let resized = self.world.resize_if_needed(w, h);
        if resized {
            self.cursor = self.cursor.clamped(w, h);
        }

        Ok(resized)
    }

    /// Run a timed generation if the simulation is playing and the delay has elapsed. Returns
    /// whether a generation ran.
    pub fn tick<S: RenderSurface>(&mut self, now: Instant, surface: &mut S) -> io::Result<bool> {
        if self.mode == Mode::Paused {
            return Ok(false);
        }

        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) <= Duration::from_millis(self.speed) {
                return Ok(false);
            }
        }

        self.last_step = Some(now);

        self.sync_size(surface)?;
        self.world.step();
        self.render(surface)?;

        Ok(true)
    }

    /// React to a single key press
    pub fn handle_key<S: RenderSurface>(&mut self, key: Key, surface: &mut S) -> io::Result<Flow> {
        match (self.mode, key) {
            (_, Key::Quit) => return Ok(Flow::Quit),

            (_, Key::Clear) => {
                self.world.clear();
                self.cursor = Cursor::default();
                self.speed = DEFAULT_SPEED;
                self.sync_size(surface)?;
                self.render(surface)?;
            }

            (_, Key::Randomize) => {
                self.world.randomize(&mut self.rng);
                self.world.step();
                self.render(surface)?;
            }

            (Mode::Playing, Key::Pause) => {
                debug!("paused");
                self.mode = Mode::Paused;
                self.render(surface)?;
            }

            (Mode::Paused, Key::Pause) => {
                debug!("resumed");
                self.mode = Mode::Playing;
                self.render(surface)?;
            }

            (Mode::Playing, Key::SpeedUp) => self.set_speed(self.speed.saturating_sub(SPEED_STEP)),
            (Mode::Playing, Key::SlowDown) => self.set_speed(self.speed + SPEED_STEP),

            (Mode::Paused, Key::Move(dir)) => {
                let (w, h) = self.world.dimensions();
                self.cursor = self.cursor.moved(dir, w, h);

                surface.set_cursor(Some(self.cursor_position()))?;
                surface.flush()?;
            }

            (Mode::Paused, Key::Add) => self.edit(true, surface)?,
            (Mode::Paused, Key::Delete) => self.edit(false, surface)?,

            // cursor keys while playing, speed keys while paused
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn set_speed(&mut self, speed: u64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        debug!(speed = self.speed, "changed speed");
    }

    fn edit<S: RenderSurface>(&mut self, alive: bool, surface: &mut S) -> io::Result<()> {
        let (w, h) = self.world.dimensions();
        let Cursor { x, y } = self.cursor;

        // a terminal too small for a single cell leaves nothing to edit
        if x < w && y < h {
            self.world.set(x, y, alive);
        }

        self.render(surface)
    }

    /// Screen position `(row, col)` of the cursor
    fn cursor_position(&self) -> (ScreenSize, ScreenSize) {
        (
            self.cursor.y as ScreenSize,
            self.cursor.x as ScreenSize * COLS_PER_CELL,
        )
    }

    /// Draw the whole board, with the cursor when in edit mode
    pub fn render<S: RenderSurface>(&self, surface: &mut S) -> io::Result<()> {
        let (w, h) = self.world.dimensions();

        for y in 0..h {
            for x in 0..w {
                let kind = self.world.classify(x, y);
                surface.draw_cell(y as ScreenSize, x as ScreenSize * COLS_PER_CELL, kind)?;
            }
        }

        let cursor = match self.mode {
            Mode::Paused => Some(self.cursor_position()),
            Mode::Playing => None,
        };
        surface.set_cursor(cursor)?;

        surface.flush()
    }

    /// Drive the simulation until a quit key arrives or `shutdown` is raised.
    pub fn run<S, K>(&mut self, surface: &mut S, keys: &mut K, shutdown: &AtomicBool) -> io::Result<()>
    where
        S: RenderSurface,
        K: KeySource,
    {
        self.start(surface)?;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("received termination signal, shutting down");
                return Ok(());
            }

            self.tick(Instant::now(), surface)?;

            match keys.poll_key()? {
                Some(key) => {
                    if self.handle_key(key, surface)? == Flow::Quit {
                        info!(generation = self.world.generation(), "quit");
                        return Ok(());
                    }
                }
                None => thread::sleep(IDLE_TIME),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_stays_on_board() {
        let mut cursor = Cursor::default();

        cursor = cursor.moved(Direction::Left, 3, 2);
        cursor = cursor.moved(Direction::Up, 3, 2);
        assert_eq!(cursor, Cursor { x: 0, y: 0 });

        for _ in 0..5 {
            cursor = cursor.moved(Direction::Right, 3, 2);
            cursor = cursor.moved(Direction::Down, 3, 2);
        }
        assert_eq!(cursor, Cursor { x: 2, y: 1 });
    }

    #[test]
    fn cursor_on_empty_board() {
        let cursor = Cursor { x: 4, y: 4 }.moved(Direction::Right, 0, 0);
        assert_eq!(cursor, Cursor { x: 0, y: 0 });
    }
}
