//! Puyo-style pair-drop simulation core.
//!
//! The library owns the grid, the falling pair, match detection, gravity and
//! the tick-driven controller. It never starts a timer and never draws: a
//! driver calls [`game::Game::tick`] on a fixed period, forwards player
//! intents via [`game::Game::apply_intent`], and consumes the returned
//! [`game::GameEvent`]s plus [`game::Game::snapshot`] for sound and display.

pub mod game;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod piece;

pub use game::{Game, GameEvent, Intent, Phase, Snapshot};
pub use grid::{Cell, Grid, PuyoColor, COLS, ROWS};
pub use piece::{Orientation, Pair, Piece};
