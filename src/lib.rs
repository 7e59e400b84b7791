pub mod board;
pub mod config;
pub mod controller;
pub mod engine;
pub mod events;
pub mod rule_set;
pub mod surface;
pub mod term;

/// Terminal coordinates and dimensions, as crossterm reports them
pub type ScreenSize = u16;
