//! Mission evaluation.
//!
//! Decides from a board snapshot whether the active mission is complete.
//! Evaluation never mutates the board.

use crate::board::{Board, Color};

use super::catalog::MissionKind;

/// Returns true if the board satisfies the mission.
///
/// Only streak and elimination missions are scored; the remaining
/// objectives are dealt and shown but never report completion.
pub fn is_mission_complete(mission: &MissionKind, board: &Board) -> bool {
    match *mission {
        MissionKind::ConquerStreak { length } => has_owner_streak(board, length),
        MissionKind::EliminateColor(color) => is_color_eliminated(board, color),
        MissionKind::ControlTerritories { .. }
        | MissionKind::HoldGarrisons { .. }
        | MissionKind::CaptureColor(_) => false,
    }
}

/// Scans index-adjacent pairs, counting consecutive same-owner transitions.
fn has_owner_streak(board: &Board, length: usize) -> bool {
    if length <= 1 {
        return !board.is_empty();
    }
    let needed = length - 1;
    let mut consecutive = 0;
    for pair in board.territories().windows(2) {
        if pair[0].same_owner(&pair[1]) {
            consecutive += 1;
            if consecutive >= needed {
                return true;
            }
        } else {
            consecutive = 0;
        }
    }
    false
}

/// A color is eliminated once none of its territories holds troops.
fn is_color_eliminated(board: &Board, color: Color) -> bool {
    !board.iter().any(|t| t.color == color && t.troops > 0)
}
