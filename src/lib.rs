//! Skirmish game library.
//!
//! Exposes the board model, combat resolver, missions, reporting, the game
//! loop, and batch simulation for use by integration tests and the binaries.

pub mod board;
pub mod combat;
pub mod game;
pub mod mission;
pub mod report;
pub mod simulate;
