//! Criterion benchmarks for the two hot paths: legal move generation and a
//! shallow search from tactical middlegame positions.

use criterion::{criterion_group, criterion_main, Criterion};
use sacrifice::chess::core::Player;
use sacrifice::chess::game::GameState;
use sacrifice::chess::movegen::legal_moves;
use sacrifice::chess::position::Position;
use sacrifice::evaluation::weights::Weights;

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
    "r2qkb1r/1pp1pp1p/p1np1np1/8/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7",
    "2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34",
];

fn movegen_bench(c: &mut Criterion) {
    let positions: Vec<Position> = POSITIONS
        .iter()
        .map(|fen| Position::from_fen(fen).expect("valid position").0)
        .collect();
    c.bench_function("legal_moves", |b| {
        b.iter(|| {
            for position in &positions {
                std::hint::black_box(legal_moves(position, Player::White));
            }
        });
    });
}

fn search_bench(c: &mut Criterion) {
    let (position, _) = Position::from_fen(POSITIONS[1]).expect("valid position");
    let mut state = GameState::from_position(position, Weights::baseline());
    c.bench_function("search_depth_2", |b| {
        b.iter(|| std::hint::black_box(state.search(2, Player::White)));
    });
}

criterion_group!(benches, movegen_bench, search_bench);
criterion_main!(benches);
