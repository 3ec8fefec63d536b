//! Board representation.
//!
//! Contains owner colors, territory records, and the ordered board that
//! holds them for the lifetime of a game.

pub mod color;
pub mod state;
pub mod territory;

pub use color::Color;
pub use state::{Board, BoardError};
pub use territory::{Territory, MAX_NAME_LEN};
