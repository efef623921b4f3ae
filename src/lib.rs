//! Snake on a wrapping board, played in the terminal.
//!
//! [`engine::Game`] is the whole simulation and knows nothing about the
//! terminal; [`session::Session`] drives it from the keyboard and a fixed
//! tick, and [`render`] draws whatever the engine reports.

pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod input;
pub mod render;
pub mod session;
pub mod snake;
pub mod state;
pub mod term;

pub use engine::{Board, BoardError, Game, Observer, Snapshot, TickOutcome};
pub use snake::{Direction, Point};
pub use state::GameState;
