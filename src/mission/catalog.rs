//! Mission catalog and assignment.
//!
//! The catalog lists every objective a player can be dealt. Each mission
//! pairs its display text with a `MissionKind` that carries the rule's
//! parameters, so evaluation never has to inspect the text.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Color;

/// Errors raised while dealing a mission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissionError {
    #[error("mission catalog is empty")]
    EmptyCatalog,
}

/// The rule behind a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    /// `length` index-adjacent territories share an owner.
    ConquerStreak { length: usize },
    /// No territory of this color still holds troops.
    EliminateColor(Color),
    /// Control at least `count` territories.
    ControlTerritories { count: usize },
    /// Keep `territories` territories above `min_troops` each.
    HoldGarrisons { territories: usize, min_troops: u32 },
    /// Take a territory currently held by this color.
    CaptureColor(Color),
}

impl MissionKind {
    /// Recognizes a mission from its description.
    ///
    /// The streak and elimination objectives are matched by phrase, so any
    /// text mentioning them qualifies. Other objectives must match their
    /// catalog text exactly.
    pub fn from_text(text: &str) -> Option<MissionKind> {
        if text.contains("Conquer 3 territories") {
            return Some(MissionKind::ConquerStreak { length: 3 });
        }
        if text.contains("Eliminate all red troops") {
            return Some(MissionKind::EliminateColor(Color::Red));
        }
        CATALOG
            .iter()
            .find(|(t, _)| *t == text)
            .map(|(_, kind)| *kind)
    }
}

/// An objective dealt to the player: what it says and how it is judged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mission {
    pub text: String,
    pub kind: MissionKind,
}

impl Mission {
    pub fn new(text: impl Into<String>, kind: MissionKind) -> Self {
        Mission { text: text.into(), kind }
    }
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

const CATALOG: [(&str, MissionKind); 5] = [
    ("Conquer 3 territories in a row", MissionKind::ConquerStreak { length: 3 }),
    ("Eliminate all red troops", MissionKind::EliminateColor(Color::Red)),
    ("Control at least 4 territories", MissionKind::ControlTerritories { count: 4 }),
    (
        "Hold 2 territories with more than 10 troops each",
        MissionKind::HoldGarrisons { territories: 2, min_troops: 10 },
    ),
    ("Conquer a blue territory", MissionKind::CaptureColor(Color::Blue)),
];

/// Returns the five standard missions in catalog order.
pub fn standard_catalog() -> Vec<Mission> {
    CATALOG
        .iter()
        .map(|&(text, kind)| Mission::new(text, kind))
        .collect()
}

/// Deals one mission from `catalog`, uniformly at random.
pub fn assign_mission(catalog: &[Mission], rng: &mut impl Rng) -> Result<Mission, MissionError> {
    if catalog.is_empty() {
        return Err(MissionError::EmptyCatalog);
    }
    let idx = rng.gen_range(0..catalog.len());
    Ok(catalog[idx].clone())
}
