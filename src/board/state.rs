//! Board state.
//!
//! Holds the ordered sequence of territories for one game. Order matters
//! only for streak missions: two territories are adjacent when their
//! indices differ by one.

use rand::Rng;
use thiserror::Error;

use super::color::Color;
use super::territory::{Territory, MAX_NAME_LEN};
use crate::combat::{resolve_attack, resolve_with_rolls, CombatOutcome, Rolls};

/// Errors raised while building or indexing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("a board needs at least 2 territories, got {0}")]
    TooFewTerritories(usize),

    #[error("territory name is empty")]
    EmptyName,

    #[error("territory name '{name}' is longer than {max} bytes")]
    NameTooLong { name: String, max: usize },

    #[error("territory index {index} is out of range for a board of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("territory {0} cannot attack itself")]
    SameTerritory(usize),
}

/// Seed data for the standard board: (name, color, troops).
const STANDARD_TERRITORIES: [(&str, Color, u32); 5] = [
    ("Brasil", Color::Red, 5),
    ("Argentina", Color::Blue, 4),
    ("Chile", Color::Green, 3),
    ("Peru", Color::Red, 2),
    ("Uruguai", Color::Blue, 6),
];

/// The ordered set of territories in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    territories: Vec<Territory>,
}

impl Board {
    /// Builds a board from the given territories, validating names and size.
    pub fn new(territories: Vec<Territory>) -> Result<Self, BoardError> {
        if territories.len() < 2 {
            return Err(BoardError::TooFewTerritories(territories.len()));
        }
        for t in &territories {
            if t.name.is_empty() {
                return Err(BoardError::EmptyName);
            }
            if t.name.len() > MAX_NAME_LEN {
                return Err(BoardError::NameTooLong {
                    name: t.name.clone(),
                    max: MAX_NAME_LEN,
                });
            }
        }
        Ok(Board { territories })
    }

    /// Returns the five-territory board every game starts from.
    pub fn standard() -> Self {
        Board {
            territories: STANDARD_TERRITORIES
                .iter()
                .map(|&(name, color, troops)| Territory::new(name, color, troops))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Territory> {
        self.territories.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// Borrows two distinct territories mutably, in the order requested.
    fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<(&mut Territory, &mut Territory), BoardError> {
        let len = self.territories.len();
        for index in [first, second] {
            if index >= len {
                return Err(BoardError::IndexOutOfRange { index, len });
            }
        }
        if first == second {
            return Err(BoardError::SameTerritory(first));
        }

        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            Ok((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            Ok((&mut tail[0], &mut head[second]))
        }
    }

    /// Resolves one attack between two board positions.
    pub fn attack(
        &mut self,
        attacker: usize,
        defender: usize,
        rng: &mut impl Rng,
    ) -> Result<CombatOutcome, BoardError> {
        let (att, def) = self.pair_mut(attacker, defender)?;
        Ok(resolve_attack(att, def, rng))
    }

    /// Resolves one attack between two board positions with known dice.
    pub fn attack_with_rolls(
        &mut self,
        attacker: usize,
        defender: usize,
        rolls: Rolls,
    ) -> Result<CombatOutcome, BoardError> {
        let (att, def) = self.pair_mut(attacker, defender)?;
        Ok(resolve_with_rolls(att, def, rolls))
    }

    /// Counts territories owned by the given color.
    pub fn count_owned(&self, color: Color) -> usize {
        self.territories.iter().filter(|t| t.color == color).count()
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Territory;
    type IntoIter = std::slice::Iter<'a, Territory>;

    fn into_iter(self) -> Self::IntoIter {
        self.territories.iter()
    }
}
