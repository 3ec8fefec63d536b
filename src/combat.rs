//! Combat resolution.
//!
//! One attack pits a single attacker die against a single defender die.
//! A strictly higher attacker roll takes the territory; anything else
//! costs the attacker one troop.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Territory;

/// Number of faces on a combat die.
pub const DIE_SIDES: u8 = 6;

/// The pair of dice rolled for one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rolls {
    pub attacker: u8,
    pub defender: u8,
}

impl Rolls {
    /// Rolls the attacker die, then the defender die.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let attacker = rng.gen_range(1..=DIE_SIDES);
        let defender = rng.gen_range(1..=DIE_SIDES);
        Rolls { attacker, defender }
    }

    pub fn attacker_wins(self) -> bool {
        self.attacker > self.defender
    }
}

/// What happened when one territory attacked another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombatOutcome {
    /// Both territories belong to the same army; nothing was rolled or changed.
    SameOwner,
    /// The defender changed hands.
    Conquest { rolls: Rolls },
    /// The defender held and the attacker lost a troop.
    Repelled { rolls: Rolls },
}

impl CombatOutcome {
    pub fn rolls(&self) -> Option<Rolls> {
        match *self {
            CombatOutcome::SameOwner => None,
            CombatOutcome::Conquest { rolls } | CombatOutcome::Repelled { rolls } => Some(rolls),
        }
    }

    pub fn is_conquest(&self) -> bool {
        matches!(self, CombatOutcome::Conquest { .. })
    }
}

/// Resolves an attack, rolling dice from `rng` unless the move is rejected.
pub fn resolve_attack(
    attacker: &mut Territory,
    defender: &mut Territory,
    rng: &mut impl Rng,
) -> CombatOutcome {
    if attacker.same_owner(defender) {
        debug!("{} and {} share an owner, attack rejected", attacker.name, defender.name);
        return CombatOutcome::SameOwner;
    }
    let rolls = Rolls::roll(rng);
    resolve_with_rolls(attacker, defender, rolls)
}

/// Applies a known pair of dice to an attack.
///
/// Both halvings on conquest use the attacker's troop count from before
/// this call.
pub fn resolve_with_rolls(
    attacker: &mut Territory,
    defender: &mut Territory,
    rolls: Rolls,
) -> CombatOutcome {
    if attacker.same_owner(defender) {
        return CombatOutcome::SameOwner;
    }

    debug!(
        "{} [{}] attacks {} [{}]",
        attacker.name, rolls.attacker, defender.name, rolls.defender
    );

    if rolls.attacker_wins() {
        let half = attacker.troops / 2;
        defender.color = attacker.color;
        defender.troops = half;
        attacker.troops = half;
        CombatOutcome::Conquest { rolls }
    } else {
        attacker.troops = attacker.troops.saturating_sub(1);
        CombatOutcome::Repelled { rolls }
    }
}
