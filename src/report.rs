//! Text rendering of game state.
//!
//! Every function here is pure: it formats a snapshot into a string and
//! leaves writing to the caller, so the board can be shown at any point
//! without touching it.

use std::fmt::Write;

use crate::board::Board;
use crate::combat::CombatOutcome;
use crate::mission::Mission;

pub const WELCOME: &str = "Welcome to the Strategic Missions System!";
pub const VICTORY: &str = "Mission accomplished! You won the game!";
pub const CLOSING: &str = "Game over. Board released.";
pub const SAME_OWNER: &str = "You cannot attack a territory of your own army!";
pub const REPELLED: &str = "The attack failed! The attacker lost one troop.";

/// Formats the active mission line.
pub fn render_mission(mission: &Mission) -> String {
    format!("Your mission: {}", mission.text)
}

/// Formats the board as a header followed by one 1-based line per territory.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("===== CURRENT MAP =====");
    for (i, t) in board.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n{}. {} | Color: {} | Troops: {}",
            i + 1,
            t.name,
            t.color,
            t.troops
        );
    }
    out
}

pub fn render_turn_header(turn: u32) -> String {
    format!("===== TURN {} =====", turn)
}

/// Formats a combat result. Names are taken from before the attack, since a
/// conquest does not rename anything.
pub fn render_combat(outcome: &CombatOutcome, attacker: &str, defender: &str) -> String {
    match outcome {
        CombatOutcome::SameOwner => SAME_OWNER.to_string(),
        CombatOutcome::Conquest { rolls } => format!(
            "Dice roll: attacker [{}] vs defender [{}]\nAttack succeeded! {} conquered {}!",
            rolls.attacker, rolls.defender, attacker, defender
        ),
        CombatOutcome::Repelled { rolls } => format!(
            "Dice roll: attacker [{}] vs defender [{}]\n{}",
            rolls.attacker, rolls.defender, REPELLED
        ),
    }
}
