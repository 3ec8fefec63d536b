//! Game orchestration.
//!
//! Owns the board and the active mission for the whole game, drives the
//! turn loop, and writes the human-readable report. A game moves through
//! `Init -> Playing -> (Won | Exhausted)` exactly once.

use std::io::Write;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::combat::CombatOutcome;
use crate::mission::{assign_mission, is_mission_complete, standard_catalog, Mission, MissionError};
use crate::report;

/// Default number of turns before the game gives up.
pub const DEFAULT_MAX_TURNS: u32 = 5;

/// Errors that stop a game from being set up or played.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("cannot assign mission: {0}")]
    Mission(#[from] MissionError),

    #[error("turn limit must be at least 1")]
    ZeroTurnLimit,

    #[error("game has already been played")]
    AlreadyPlayed,

    #[error("failed to write game report: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for a single game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum number of turns to play.
    pub max_turns: u32,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_turns: DEFAULT_MAX_TURNS,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Builds the random source for this configuration.
    pub fn rng(&self) -> SmallRng {
        if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed)
        } else {
            SmallRng::from_entropy()
        }
    }
}

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    Init,
    Playing { turn: u32 },
    Won { turn: u32 },
    Exhausted,
}

impl GameStatus {
    pub fn is_won(self) -> bool {
        matches!(self, GameStatus::Won { .. })
    }
}

/// One attack as it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub attacker: usize,
    pub defender: usize,
    pub outcome: CombatOutcome,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub status: GameStatus,
    pub mission: Mission,
    pub turns: Vec<TurnRecord>,
}

impl GameReport {
    pub fn turns_played(&self) -> usize {
        self.turns.len()
    }
}

/// A single-player game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    mission: Mission,
    status: GameStatus,
}

impl Game {
    /// Sets up a game on the standard board with a mission dealt from the
    /// standard catalog.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Result<Self, GameError> {
        Self::with_catalog(config, Board::standard(), &standard_catalog(), rng)
    }

    /// Sets up a game on `board` with a mission dealt from `catalog`.
    pub fn with_catalog(
        config: GameConfig,
        board: Board,
        catalog: &[Mission],
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        let mission = assign_mission(catalog, rng)?;
        Self::with_mission(config, board, mission)
    }

    /// Sets up a game with a fixed mission.
    pub fn with_mission(
        config: GameConfig,
        board: Board,
        mission: Mission,
    ) -> Result<Self, GameError> {
        if config.max_turns == 0 {
            return Err(GameError::ZeroTurnLimit);
        }
        debug!("mission assigned: {}", mission.text);
        Ok(Game {
            config,
            board,
            mission,
            status: GameStatus::Init,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the board currently satisfies the mission.
    pub fn is_mission_complete(&self) -> bool {
        is_mission_complete(&self.mission.kind, &self.board)
    }

    /// Plays the game to completion, writing the report to `out`.
    ///
    /// Stops early on the first turn that completes the mission.
    pub fn run<W: Write>(
        &mut self,
        out: &mut W,
        rng: &mut impl Rng,
    ) -> Result<GameReport, GameError> {
        if self.status != GameStatus::Init {
            return Err(GameError::AlreadyPlayed);
        }

        writeln!(out, "{}", report::WELCOME)?;
        writeln!(out)?;
        writeln!(out, "{}", report::render_mission(&self.mission))?;
        writeln!(out)?;
        writeln!(out, "{}", report::render_board(&self.board))?;

        let mut turns = Vec::with_capacity(self.config.max_turns as usize);
        for turn in 1..=self.config.max_turns {
            self.status = GameStatus::Playing { turn };
            writeln!(out)?;
            writeln!(out, "{}", report::render_turn_header(turn))?;

            let record = self.play_turn(turn, rng)?;
            let attacker = &self.board.territories()[record.attacker].name;
            let defender = &self.board.territories()[record.defender].name;
            writeln!(out)?;
            writeln!(out, "{}", report::render_combat(&record.outcome, attacker, defender))?;
            writeln!(out)?;
            writeln!(out, "{}", report::render_board(&self.board))?;
            turns.push(record);

            if self.is_mission_complete() {
                self.status = GameStatus::Won { turn };
                writeln!(out)?;
                writeln!(out, "{}", report::VICTORY)?;
                break;
            }
        }

        if !self.status.is_won() {
            self.status = GameStatus::Exhausted;
        }
        info!(
            "game finished: {:?} after {} turns ({})",
            self.status,
            turns.len(),
            self.mission.text
        );

        writeln!(out)?;
        writeln!(out, "{}", report::CLOSING)?;
        out.flush()?;

        Ok(GameReport {
            status: self.status,
            mission: self.mission.clone(),
            turns,
        })
    }

    /// Picks two distinct territories and resolves an attack between them.
    fn play_turn(&mut self, turn: u32, rng: &mut impl Rng) -> Result<TurnRecord, GameError> {
        let (attacker, defender) = pick_combatants(self.board.len(), rng);
        debug!("turn {}: territory {} attacks territory {}", turn, attacker, defender);
        let outcome = self.board.attack(attacker, defender, rng)?;
        Ok(TurnRecord {
            turn,
            attacker,
            defender,
            outcome,
        })
    }
}

/// Draws an attacker index, then redraws the defender until it differs.
///
/// `len` must be at least 2.
pub fn pick_combatants(len: usize, rng: &mut impl Rng) -> (usize, usize) {
    let attacker = rng.gen_range(0..len);
    let mut defender = rng.gen_range(0..len);
    while defender == attacker {
        defender = rng.gen_range(0..len);
    }
    (attacker, defender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Territory};
    use crate::mission::MissionKind;

    fn seeded(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn unscored_mission() -> Mission {
        Mission::new("Control at least 4 territories", MissionKind::ControlTerritories { count: 4 })
    }

    #[test]
    fn default_config_plays_five_turns() {
        let config = GameConfig::default();
        assert_eq!(config.max_turns, 5);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn new_game_starts_in_init() {
        let mut rng = seeded(1);
        let game = Game::new(GameConfig::default(), &mut rng).unwrap();
        assert_eq!(game.status(), GameStatus::Init);
        assert_eq!(game.board(), &Board::standard());
        assert!(standard_catalog().contains(game.mission()));
    }

    #[test]
    fn empty_catalog_fails_setup() {
        let mut rng = seeded(1);
        let err = Game::with_catalog(GameConfig::default(), Board::standard(), &[], &mut rng)
            .unwrap_err();
        assert!(matches!(err, GameError::Mission(MissionError::EmptyCatalog)));
    }

    #[test]
    fn zero_turn_limit_fails_setup() {
        let config = GameConfig { max_turns: 0, seed: 0 };
        let err = Game::with_mission(config, Board::standard(), unscored_mission()).unwrap_err();
        assert!(matches!(err, GameError::ZeroTurnLimit));
    }

    #[test]
    fn pick_combatants_are_distinct_and_in_range() {
        let mut rng = seeded(9);
        for _ in 0..1000 {
            let (a, d) = pick_combatants(5, &mut rng);
            assert_ne!(a, d);
            assert!(a < 5 && d < 5);
        }
        for _ in 0..100 {
            let (a, d) = pick_combatants(2, &mut rng);
            assert_eq!(a + d, 1);
        }
    }

    #[test]
    fn unscored_mission_exhausts_turn_limit() {
        let mut rng = seeded(11);
        let config = GameConfig { max_turns: 5, seed: 0 };
        let mut game = Game::with_mission(config, Board::standard(), unscored_mission()).unwrap();
        let mut out = Vec::new();
        let report = game.run(&mut out, &mut rng).unwrap();

        assert_eq!(report.status, GameStatus::Exhausted);
        assert_eq!(report.turns_played(), 5);
        assert_eq!(game.status(), GameStatus::Exhausted);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains(report::VICTORY));
        assert_eq!(text.matches("===== TURN").count(), 5);
        assert!(text.trim_end().ends_with(report::CLOSING));
    }

    #[test]
    fn already_complete_mission_wins_on_first_turn() {
        // Every territory is green: any attack is rejected and the streak
        // mission is satisfied from the start.
        let board = Board::new(
            (0..4)
                .map(|i| Territory::new(format!("T{}", i), Color::Green, 3))
                .collect(),
        )
        .unwrap();
        let mission = Mission::new(
            "Conquer 3 territories in a row",
            MissionKind::ConquerStreak { length: 3 },
        );
        let mut game = Game::with_mission(GameConfig::default(), board.clone(), mission).unwrap();
        let mut rng = seeded(5);
        let mut out = Vec::new();
        let report = game.run(&mut out, &mut rng).unwrap();

        assert_eq!(report.status, GameStatus::Won { turn: 1 });
        assert_eq!(report.turns_played(), 1);
        assert_eq!(report.turns[0].outcome, CombatOutcome::SameOwner);
        assert_eq!(game.board(), &board);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(report::SAME_OWNER));
        assert!(text.contains(report::VICTORY));
        assert_eq!(text.matches("===== TURN").count(), 1);
    }

    #[test]
    fn run_twice_is_rejected() {
        let mut rng = seeded(3);
        let mut game =
            Game::with_mission(GameConfig::default(), Board::standard(), unscored_mission())
                .unwrap();
        game.run(&mut std::io::sink(), &mut rng).unwrap();
        let err = game.run(&mut std::io::sink(), &mut rng).unwrap_err();
        assert!(matches!(err, GameError::AlreadyPlayed));
    }

    #[test]
    fn troops_never_negative_across_many_games() {
        for seed in 1..200 {
            let mut rng = seeded(seed);
            let config = GameConfig { max_turns: 20, seed: 0 };
            let mut game = Game::new(config, &mut rng).unwrap();
            let report = game.run(&mut std::io::sink(), &mut rng).unwrap();
            assert!(report.turns_played() <= 20);
            assert!(matches!(report.status, GameStatus::Won { .. } | GameStatus::Exhausted));
            // Troops are unsigned; check the pool only shrinks or splits.
            let total: u32 = game.board().iter().map(|t| t.troops).sum();
            assert!(total <= 20);
        }
    }

    #[test]
    fn same_seed_gives_same_game() {
        let play = |seed| {
            let config = GameConfig { max_turns: 5, seed };
            let mut rng = config.rng();
            let mut game = Game::new(config, &mut rng).unwrap();
            let mut out = Vec::new();
            game.run(&mut out, &mut rng).unwrap();
            out
        };
        assert_eq!(play(1234), play(1234));
    }
}
