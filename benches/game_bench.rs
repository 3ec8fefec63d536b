use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use skirmish::board::{Board, Color};
use skirmish::game::{Game, GameConfig};
use skirmish::mission::{is_mission_complete, MissionKind};
use skirmish::report::render_board;
use skirmish::simulate::{run_batch, SimulateConfig};

fn bench_evaluate(c: &mut Criterion) {
    let board = Board::standard();
    let streak = MissionKind::ConquerStreak { length: 3 };
    let no_red = MissionKind::EliminateColor(Color::Red);
    c.bench_function("evaluate_streak", |b| {
        b.iter(|| is_mission_complete(black_box(&streak), black_box(&board)))
    });
    c.bench_function("evaluate_eliminate", |b| {
        b.iter(|| is_mission_complete(black_box(&no_red), black_box(&board)))
    });
}

fn bench_render(c: &mut Criterion) {
    let board = Board::standard();
    c.bench_function("render_board", |b| b.iter(|| render_board(black_box(&board))));
}

fn bench_full_game(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    c.bench_function("play_game_5_turns", |b| {
        b.iter(|| {
            let mut game = Game::new(GameConfig::default(), &mut rng).unwrap();
            game.run(&mut std::io::sink(), &mut rng).unwrap()
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let config = SimulateConfig {
        num_games: 1000,
        threads: 1,
        seed: 7,
        quiet: true,
        ..Default::default()
    };
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);
    group.bench_function("sequential_1000_games", |b| {
        b.iter(|| run_batch(black_box(&config)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_render, bench_full_game, bench_batch);
criterion_main!(benches);
