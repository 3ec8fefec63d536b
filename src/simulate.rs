//! Batch simulation.
//!
//! Plays many independent games and records a compact summary of each,
//! for checking how often each mission is won within the turn limit.
//! Each game stays single-threaded; the batch can spread games over a
//! rayon thread pool.

use std::fmt::Write as _;
use std::io::Write;
use std::time::Instant;

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Territory;
use crate::combat::CombatOutcome;
use crate::game::{Game, GameConfig, GameError, DEFAULT_MAX_TURNS};
use crate::mission::{standard_catalog, MissionKind};

/// Errors raised while running or writing a batch.
#[derive(Debug, Error)]
pub enum SimulateError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode game summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Turn limit for each game.
    pub max_turns: u32,
    /// Number of parallel threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        SimulateConfig {
            num_games: 100,
            max_turns: DEFAULT_MAX_TURNS,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: usize,
    pub mission: String,
    pub mission_kind: MissionKind,
    pub won: bool,
    pub turns_played: usize,
    pub conquests: usize,
    pub repelled: usize,
    pub rejected: usize,
    pub final_board: Vec<Territory>,
}

/// Plays one game with its report discarded.
pub fn play_game(
    max_turns: u32,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameSummary, GameError> {
    let config = GameConfig { max_turns, seed: 0 };
    let mut game = Game::new(config, rng)?;
    let report = game.run(&mut std::io::sink(), rng)?;

    let (mut conquests, mut repelled, mut rejected) = (0, 0, 0);
    for turn in &report.turns {
        match turn.outcome {
            CombatOutcome::Conquest { .. } => conquests += 1,
            CombatOutcome::Repelled { .. } => repelled += 1,
            CombatOutcome::SameOwner => rejected += 1,
        }
    }

    Ok(GameSummary {
        game_id,
        mission: report.mission.text.clone(),
        mission_kind: report.mission.kind,
        won: report.status.is_won(),
        turns_played: report.turns_played(),
        conquests,
        repelled,
        rejected,
        final_board: game.board().territories().to_vec(),
    })
}

/// Seeds the RNG for game `i`, so a fixed batch seed replays the same games
/// regardless of thread count.
fn game_rng(config: &SimulateConfig, i: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(i as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn play_logged(config: &SimulateConfig, i: usize) -> Result<GameSummary, GameError> {
    let start = Instant::now();
    let mut rng = game_rng(config, i);
    let summary = play_game(config.max_turns, i, &mut rng)?;
    if !config.quiet {
        info!(
            "Game {}/{}: {} in {} turns ({:.1}ms) - {}",
            i + 1,
            config.num_games,
            if summary.won { "won" } else { "exhausted" },
            summary.turns_played,
            start.elapsed().as_secs_f64() * 1000.0,
            summary.mission,
        );
    }
    Ok(summary)
}

/// Runs the batch, returning summaries in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_batch(config: &SimulateConfig) -> Result<Vec<GameSummary>, SimulateError> {
    if config.threads > 1 {
        run_parallel(config)
    } else {
        let games = (0..config.num_games)
            .map(|i| play_logged(config, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(games)
    }
}

fn run_parallel(config: &SimulateConfig) -> Result<Vec<GameSummary>, SimulateError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_logged(config, i))
            .collect::<Result<Vec<_>, _>>()
    })?;
    Ok(games)
}

/// Writes summaries as JSONL, one game per line.
pub fn write_jsonl<W: Write>(games: &[GameSummary], out: &mut W) -> Result<(), SimulateError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Formats win rates per mission across a batch.
pub fn format_summary(games: &[GameSummary]) -> String {
    let total = games.len();
    let won = games.iter().filter(|g| g.won).count();
    let total_turns: usize = games.iter().map(|g| g.turns_played).sum();

    let mut out = String::new();
    let _ = writeln!(out, "=== Simulation Summary ===");
    let _ = writeln!(out, "Games: {}", total);
    let _ = writeln!(
        out,
        "Won: {} ({:.1}%)",
        won,
        100.0 * won as f64 / total.max(1) as f64
    );
    let _ = writeln!(
        out,
        "Avg turns/game: {:.2}",
        total_turns as f64 / total.max(1) as f64
    );
    let _ = writeln!(out, "By mission:");
    for mission in standard_catalog() {
        let dealt: Vec<&GameSummary> = games
            .iter()
            .filter(|g| g.mission_kind == mission.kind)
            .collect();
        let wins = dealt.iter().filter(|g| g.won).count();
        let _ = writeln!(
            out,
            "  {:<50} {:>5} dealt, {:>5} won",
            mission.text,
            dealt.len(),
            wins
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(num_games: usize, threads: usize, seed: u64) -> SimulateConfig {
        SimulateConfig {
            num_games,
            threads,
            seed,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn play_single_game_respects_turn_limit() {
        let mut rng = SmallRng::seed_from_u64(42);
        let summary = play_game(5, 0, &mut rng).unwrap();
        assert!(summary.turns_played >= 1 && summary.turns_played <= 5);
        assert_eq!(
            summary.conquests + summary.repelled + summary.rejected,
            summary.turns_played
        );
        assert_eq!(summary.final_board.len(), 5);
        if !summary.won {
            assert_eq!(summary.turns_played, 5);
        }
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let games = run_batch(&config(6, 1, 99)).unwrap();
        assert_eq!(games.len(), 6);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn parallel_matches_sequential_with_fixed_seed() {
        let sequential = run_batch(&config(8, 1, 77)).unwrap();
        let parallel = run_batch(&config(8, 3, 77)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn unscored_missions_are_never_won() {
        let games = run_batch(&config(200, 1, 5)).unwrap();
        for g in &games {
            if matches!(
                g.mission_kind,
                MissionKind::ControlTerritories { .. }
                    | MissionKind::HoldGarrisons { .. }
                    | MissionKind::CaptureColor(_)
            ) {
                assert!(!g.won, "{} should not be scored", g.mission);
            }
        }
    }

    #[test]
    fn jsonl_output_parses_back() {
        let games = run_batch(&config(3, 1, 55)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        let parsed: Vec<GameSummary> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, games);
        assert!(output.lines().all(|l| l.contains("\"final_board\"")));
    }

    #[test]
    fn summary_lists_every_mission() {
        let games = run_batch(&config(20, 1, 8)).unwrap();
        let text = format_summary(&games);
        assert!(text.contains("Games: 20"));
        for mission in standard_catalog() {
            assert!(text.contains(&mission.text));
        }
    }

    #[test]
    fn summary_of_no_games() {
        let text = format_summary(&[]);
        assert!(text.contains("Games: 0"));
        assert!(text.contains("Won: 0 (0.0%)"));
    }
}
