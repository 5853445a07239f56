//! Direct-mapped [transposition table] memoising the static evaluator.
//!
//! One table is owned by each [`crate::chess::game::GameState`] — tables
//! are never shared between threads, so no synchronisation is needed and a
//! trainer worker's stale scores cannot leak into another worker's run.
//!
//! [transposition table]: https://www.chessprogramming.org/Transposition_Table

use crate::chess::core::Player;
use crate::chess::position::Position;

/// Position hashes are 64-bit [FNV-1a] digests.
///
/// [FNV-1a]: https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function
pub(crate) type Key = u64;

const FNV_OFFSET: Key = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: Key = 0x0000_0100_0000_01b3;

const TABLE_BITS: u32 = 16;
const TABLE_SIZE: usize = 1 << TABLE_BITS;

/// `key == 0` marks an empty slot, so genuine zero hashes are stored under
/// this reserved key instead.
const ZERO_KEY_SENTINEL: Key = 1;

#[derive(Clone, Copy, Default)]
struct Entry {
    key: Key,
    score: f64,
}

/// Fixed-size cache from position hash to evaluation score. Collisions
/// simply overwrite: the table is a speedup, not a source of truth.
pub(crate) struct TranspositionTable {
    /// `None` when the backing allocation failed; every probe then misses
    /// and the engine keeps running without the cache.
    entries: Option<Box<[Entry]>>,
}

impl TranspositionTable {
    pub(crate) fn new() -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        if entries.try_reserve_exact(TABLE_SIZE).is_err() {
            eprintln!("warning: transposition table allocation failed, evaluation cache disabled");
            return Self { entries: None };
        }
        entries.resize(TABLE_SIZE, Entry::default());
        Self {
            entries: Some(entries.into_boxed_slice()),
        }
    }

    pub(crate) fn probe(&self, key: Key) -> Option<f64> {
        let entries = self.entries.as_ref()?;
        let entry = entries[index(key)];
        if entry.key == key && entry.key != 0 {
            Some(entry.score)
        } else {
            None
        }
    }

    pub(crate) fn store(&mut self, key: Key, score: f64) {
        let Some(entries) = self.entries.as_mut() else {
            return;
        };
        entries[index(key)] = Entry {
            key: if key == 0 { ZERO_KEY_SENTINEL } else { key },
            score,
        };
    }
}

fn index(key: Key) -> usize {
    (key & (TABLE_SIZE as Key - 1)) as usize
}

/// Hashes the position: 64 squares scanned file-major, three bytes each —
/// piece kind plus one (zero reserved for an empty square), side code, and
/// the `has_moved` flag. Two positions differing only in castling ability
/// therefore hash differently, matching the evaluator's king-safety terms.
pub(crate) fn position_key(position: &Position) -> Key {
    let mut key = FNV_OFFSET;
    let mut mix = |byte: u8| {
        key ^= Key::from(byte);
        key = key.wrapping_mul(FNV_PRIME);
    };
    for file in 0..8 {
        for rank in 0..8 {
            match position.piece_at(file, rank) {
                Some(piece) => {
                    mix(piece.kind as u8 + 1);
                    mix(match piece.side {
                        Player::White => 1,
                        Player::Black => 2,
                    });
                    mix(u8::from(piece.has_moved));
                }
                None => {
                    mix(0);
                    mix(0);
                    mix(0);
                }
            }
        }
    }
    key
}
