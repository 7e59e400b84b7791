use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;

use crate::ScreenSize;
use crate::engine::CellKind;
use crate::events::Direction;
use crate::events::Key;
use crate::surface::KeySource;
use crate::surface::RenderSurface;

/// What gets printed for one cell. Its color comes from the background.
const CELL: &str = "  ";

/// Background color of each kind of cell, as 256-color palette indices
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Dead => Color::AnsiValue(15),
        CellKind::Survivor => Color::AnsiValue(8),
        CellKind::Newborn => Color::AnsiValue(0),
        CellKind::Understarved => Color::AnsiValue(7),
        CellKind::Overpopulated => Color::AnsiValue(11),
    }
}

/// The terminal, in raw mode on the alternate screen for as long as this value lives.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
        )?;

        Ok(Self { stdout })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // nothing left to report errors to at this point
        let _ = execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl RenderSurface for Terminal {
    fn size(&self) -> io::Result<(ScreenSize, ScreenSize)> {
        terminal::size()
    }

    fn draw_cell(&mut self, row: ScreenSize, col: ScreenSize, kind: CellKind) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(cell_color(kind)),
            style::Print(CELL),
            style::ResetColor,
        )
    }

    fn set_cursor(&mut self, at: Option<(ScreenSize, ScreenSize)>) -> io::Result<()> {
        match at {
            Some((row, col)) => queue!(self.stdout, cursor::MoveTo(col, row), cursor::Show),
            None => queue!(self.stdout, cursor::Hide),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Key presses read from the terminal's event queue
#[derive(Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Some(key) = convert_event(event::read()?) {
                return Ok(Some(key));
            }
        }

        Ok(None)
    }
}

/// Converts a crossterm event into a key the simulation understands
pub fn convert_event(event: CrossTermEvent) -> Option<Key> {
    let CrossTermEvent::Key(key_event) = event else {
        return None;
    };

    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    match key_event {
        // raw mode delivers ctrl-c as a key instead of a signal
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Key::Quit),
        KeyEvent { code, .. } => convert_code(code),
    }
}

fn convert_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Char('c') => Key::Clear,
        KeyCode::Char('r') => Key::Randomize,
        KeyCode::Char('p') => Key::Pause,
        KeyCode::Char('m') => Key::SpeedUp,
        KeyCode::Char('n') => Key::SlowDown,
        KeyCode::Char('a') => Key::Add,
        KeyCode::Char('d') => Key::Delete,

        KeyCode::Char('h') | KeyCode::Left => Key::Move(Direction::Left),
        KeyCode::Char('j') | KeyCode::Down => Key::Move(Direction::Down),
        KeyCode::Char('k') | KeyCode::Up => Key::Move(Direction::Up),
        KeyCode::Char('l') | KeyCode::Right => Key::Move(Direction::Right),

        _ => return None,
    };

    Some(key)
}
