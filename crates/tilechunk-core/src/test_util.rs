//! Deterministic level generation for tests.

use crate::level::DenseLevel;
use crate::tile::{Tile, EMPTY_TILE};

const SYMBOLS: &[u8] = b"123456789ABCDEHPSTW";

/// xorshift64* stream; good enough to scatter tiles reproducibly.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// A `width` x `height` level where each tile is non-empty with probability `density`.
pub fn random_level(seed: u64, width: usize, height: usize, density: f64) -> DenseLevel {
    let mut rng = Rng::new(seed);
    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| {
                    if rng.unit() < density {
                        SYMBOLS[(rng.next() % SYMBOLS.len() as u64) as usize] as Tile
                    } else {
                        EMPTY_TILE
                    }
                })
                .collect()
        })
        .collect();
    DenseLevel::new(rows)
}
