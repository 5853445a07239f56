//! Chess engine built around three pieces: a legal move generator over a
//! plain 8×8 board, a heavily parameterised static evaluator memoised
//! through a transposition table, and a negamax alpha-beta search that
//! returns the full principal variation. On top of those sits a trainer
//! that tunes the evaluator's weights against a corpus of Lichess tactics
//! puzzles with an elitist mutation loop.
//!
//! The engine plays full games through [`chess::game::GameState`] and
//! verifies tactical puzzles through [`training::puzzles`].

#![warn(missing_docs, variant_size_differences)]

pub mod chess;
pub mod evaluation;
pub mod search;
pub mod training;

shadow_rs::shadow!(build);

/// Prints the version banner reported by the binary on startup.
pub fn print_engine_info() {
    println!(
        "sacrifice {} ({}, rustc {})",
        build::PKG_VERSION,
        build::BUILD_TARGET,
        build::RUST_VERSION
    );
}
