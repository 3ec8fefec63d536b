//! Territory records.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Longest territory name accepted, in bytes.
pub const MAX_NAME_LEN: usize = 29;

/// A named unit of the board with an owner color and a troop count.
///
/// Troops are unsigned, so a loss can never drive the count below zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub color: Color,
    pub troops: u32,
}

impl Territory {
    /// Creates a territory. Name length is checked when the board is built.
    pub fn new(name: impl Into<String>, color: Color, troops: u32) -> Self {
        Territory {
            name: name.into(),
            color,
            troops,
        }
    }

    /// Returns true if both territories belong to the same army.
    pub fn same_owner(&self, other: &Territory) -> bool {
        self.color == other.color
    }
}
