//! Missions: the catalog of objectives, assignment, and evaluation.

pub mod catalog;
pub mod eval;

pub use catalog::{assign_mission, standard_catalog, Mission, MissionError, MissionKind};
pub use eval::is_mission_complete;
