//! Lichess tactics-puzzle corpus: on-demand CSV loading, single-puzzle
//! playback and the parallel scoring pool that the trainer uses to grade a
//! weight set.
//!
//! A weight set's score is simply how many puzzles the engine solves. A
//! puzzle counts as solved when every engine reply matches the reference
//! line — or delivers a checkmate of its own, since an alternative mate is
//! just as correct.

use std::path::Path;
use std::sync::Mutex;
use std::thread;

use anyhow::Context;

use crate::chess::game::GameState;
use crate::chess::movegen;
use crate::chess::position::Position;
use crate::evaluation::weights::Weights;
use crate::search::Depth;

/// Progress observer for a scoring pass: `(completed, total, passes)`.
/// Invoked on the first completion and every fifth one after that, plus
/// once at the very end.
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize, usize) + Sync);

/// One row of the Lichess puzzle database.
///
/// `moves` is the reference line: the first entry is the opponent's setup
/// move that creates the tactic, then engine replies alternate with the
/// opponent's canned responses.
#[derive(Clone, Debug)]
#[allow(missing_docs)]
pub struct Puzzle {
    pub id: String,
    pub fen: String,
    pub moves: Vec<String>,
    pub rating: i32,
    pub rating_deviation: i32,
    pub popularity: i32,
    pub nb_plays: i32,
    pub themes: String,
    pub game_url: String,
    pub opening_tags: String,
}

/// Reads the 0-indexed row `index` of the corpus file.
///
/// The file is opened fresh on every call, which keeps the loader
/// reentrant: trainer workers call it concurrently without coordination.
///
/// # Errors
///
/// Fails when the file cannot be read, the row does not exist, or a field
/// is missing or non-numeric. Callers treat any failure as a failed
/// puzzle, never as a fatal error.
pub fn load_puzzle(path: &Path, index: usize) -> anyhow::Result<Puzzle> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open puzzle corpus {}", path.display()))?;
    let record = reader
        .records()
        .nth(index)
        .with_context(|| format!("puzzle {index} is past the end of the corpus"))?
        .with_context(|| format!("puzzle {index} is not a readable CSV row"))?;

    let field = |column: usize, name: &str| -> anyhow::Result<String> {
        record
            .get(column)
            .map(str::to_owned)
            .with_context(|| format!("puzzle {index} is missing the {name} field"))
    };
    let numeric = |column: usize, name: &str| -> anyhow::Result<i32> {
        field(column, name)?
            .parse()
            .with_context(|| format!("puzzle {index} has a non-numeric {name} field"))
    };

    Ok(Puzzle {
        id: field(0, "puzzle id")?,
        fen: field(1, "FEN")?,
        moves: field(2, "moves")?
            .split_whitespace()
            .map(str::to_owned)
            .collect(),
        rating: numeric(3, "rating")?,
        rating_deviation: numeric(4, "rating deviation")?,
        popularity: numeric(5, "popularity")?,
        nb_plays: numeric(6, "play count")?,
        themes: field(7, "themes")?,
        game_url: field(8, "game url")?,
        // The trailing opening tags column is empty for most puzzles and
        // some exports drop it entirely.
        opening_tags: record.get(9).unwrap_or_default().to_owned(),
    })
}

/// Plays one puzzle against the engine and reports whether it passed.
///
/// The playback protocol: load the FEN, apply the setup move, then for
/// each reference reply ask the search for a move at `depth`. A mismatch
/// fails the puzzle unless the engine's own move mates. Malformed FEN or
/// reference moves fail the puzzle quietly.
#[must_use]
pub fn solve_puzzle(puzzle: &Puzzle, depth: Depth, weights: &Weights) -> bool {
    let Ok((position, fen_side)) = Position::from_fen(&puzzle.fen) else {
        return false;
    };
    let mut state = GameState::from_position(position, weights.clone());
    let mut side = fen_side;

    let mut moves = puzzle.moves.iter();
    // The first reference move is played by the opponent and creates the
    // tactic.
    let Some(setup) = moves.next() else {
        return false;
    };
    if state.play_reference_move(setup).is_err() {
        return false;
    }
    side = !side;

    while let Some(expected) = moves.next() {
        let result = state.search(depth, side);
        let Some(engine_move) = result.best() else {
            return false;
        };

        if engine_move.reference_notation() != *expected {
            // Not the reference move; accept it anyway if it checkmates.
            state.play(&engine_move);
            return movegen::is_checkmate(state.position(), !side);
        }
        // Play the reference form: it carries the promotion kind when the
        // line includes one.
        if state.play_reference_move(expected).is_err() {
            return false;
        }
        side = !side;

        if let Some(reply) = moves.next() {
            if state.play_reference_move(reply).is_err() {
                return false;
            }
            side = !side;
        }
    }
    true
}

/// Scores `weights` over the first `num_puzzles` rows of the corpus using
/// a pool of `num_threads` workers, returning the number of solved
/// puzzles.
///
/// Workers pull puzzle indices from a shared queue and solve each inside a
/// fresh [`GameState`], so transposition-table entries never leak between
/// puzzles or threads. The total is independent of the thread count and of
/// completion order.
#[must_use]
pub fn score_puzzles(
    corpus: &Path,
    depth: Depth,
    num_puzzles: usize,
    num_threads: usize,
    weights: &Weights,
    progress: Option<ProgressFn>,
) -> usize {
    let num_threads = num_threads.clamp(1, 256);

    let queue = Mutex::new(0usize);
    let results = Mutex::new(vec![false; num_puzzles]);
    let completed = Mutex::new(0usize);

    thread::scope(|scope| {
        for _ in 0..num_threads {
            scope.spawn(|| loop {
                let index = {
                    let mut next = queue.lock().expect("work queue mutex");
                    if *next >= num_puzzles {
                        break;
                    }
                    let index = *next;
                    *next += 1;
                    index
                };

                let passed = load_puzzle(corpus, index)
                    .map(|puzzle| solve_puzzle(&puzzle, depth, weights))
                    .unwrap_or(false);

                results.lock().expect("results mutex")[index] = passed;

                let done = {
                    let mut completed = completed.lock().expect("progress mutex");
                    *completed += 1;
                    *completed
                };
                if let Some(callback) = progress {
                    if done == 1 || done % 5 == 0 {
                        let passes = count_passes(&results);
                        callback(done, num_puzzles, passes);
                    }
                }
            });
        }
    });

    let passes = count_passes(&results);
    if let Some(callback) = progress {
        callback(num_puzzles, num_puzzles, passes);
    }
    passes
}

fn count_passes(results: &Mutex<Vec<bool>>) -> usize {
    results
        .lock()
        .expect("results mutex")
        .iter()
        .filter(|passed| **passed)
        .count()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    // Back-rank mate in one: after Black's setup shuffle, White mates with
    // Ra8. The second line is unsolvable: its reference reply starts on an
    // empty square, so no engine move can ever match it.
    const CORPUS: &str = "\
mate1,6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1,g8h8 a1a8,1203,75,94,5220,backRankMate mate mateIn1,https://lichess.org/abcdefgh#52,
corrupt,4k3/8/8/8/8/8/8/R3K3 b - - 0 1,e8d8 h1h2,1500,80,90,100,quietMove,https://lichess.org/ijklmnop#10,
";

    fn write_corpus() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("sacrifice-puzzles-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corpus.csv");
        fs::write(&path, CORPUS).unwrap();
        path
    }

    #[test]
    fn loads_rows_on_demand() {
        let path = write_corpus();
        let puzzle = load_puzzle(&path, 0).expect("row 0 exists");
        assert_eq!(puzzle.id, "mate1");
        assert_eq!(puzzle.moves, vec!["g8h8", "a1a8"]);
        assert_eq!(puzzle.rating, 1203);
        assert_eq!(puzzle.opening_tags, "");

        let second = load_puzzle(&path, 1).expect("row 1 exists");
        assert_eq!(second.id, "corrupt");
        assert!(load_puzzle(&path, 2).is_err());
    }

    #[test]
    fn solves_a_mate_in_one() {
        let path = write_corpus();
        let puzzle = load_puzzle(&path, 0).unwrap();
        assert!(solve_puzzle(&puzzle, 2, &Weights::baseline()));
    }

    #[test]
    fn corrupt_puzzles_fail_quietly() {
        let broken = Puzzle {
            id: "broken".to_owned(),
            fen: "not a fen".to_owned(),
            moves: vec!["e2e4".to_owned()],
            rating: 0,
            rating_deviation: 0,
            popularity: 0,
            nb_plays: 0,
            themes: String::new(),
            game_url: String::new(),
            opening_tags: String::new(),
        };
        assert!(!solve_puzzle(&broken, 1, &Weights::baseline()));

        let empty_line = Puzzle {
            fen: "6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1".to_owned(),
            moves: vec![],
            ..broken
        };
        assert!(!solve_puzzle(&empty_line, 1, &Weights::baseline()));
    }

    #[test]
    fn scoring_is_thread_count_invariant() {
        let path = write_corpus();
        let weights = Weights::baseline();
        let single = score_puzzles(&path, 2, 2, 1, &weights, None);
        let pooled = score_puzzles(&path, 2, 2, 4, &weights, None);
        assert_eq!(single, pooled);
        assert_eq!(single, 1);
    }

    #[test]
    fn missing_corpus_scores_zero() {
        let path = std::path::Path::new("/nonexistent/puzzles.csv");
        assert_eq!(score_puzzles(path, 1, 3, 2, &Weights::baseline(), None), 0);
    }

    #[test]
    fn progress_callback_fires_on_completion() {
        let path = write_corpus();
        let calls = Mutex::new(Vec::new());
        let callback = |done: usize, total: usize, passes: usize| {
            calls.lock().unwrap().push((done, total, passes));
        };
        let passes = score_puzzles(&path, 2, 2, 1, &Weights::baseline(), Some(&callback));
        let calls = calls.into_inner().unwrap();
        // At least the first-completion call and the final summary.
        assert!(calls.len() >= 2);
        assert_eq!(*calls.last().unwrap(), (2, 2, passes));
    }
}
