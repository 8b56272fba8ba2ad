//! Sparse, lazily materialized tile grid.
//!
//! The world is an unbounded plane of square tiles. Nothing is generated up
//! front: a tile is classified the first time anything asks about it, and the
//! answer is cached for the lifetime of the grid. Two sampling modes exist:
//!
//!  - **Coordinate hash** -- each tile seeds its own RNG from the grid seed and
//!    its packed coordinate, so the result never depends on query order.
//!  - **Stream** -- one RNG shared by every tile, drawn in first-access order.
//!
//! There is no eviction. Memory grows with the set of distinct coordinates ever
//! queried, which is the accepted cost of an infinite world.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::collections::HashMap;

/// Integer tile coordinate (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column in the high 32 bits, row in the low 32 bits.
    pub fn packed(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Open,
    Blocked,
}

impl Tile {
    pub fn is_blocked(self) -> bool {
        matches!(self, Tile::Blocked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    #[default]
    CoordinateHash,
    Stream,
}

#[derive(Debug, Clone)]
enum Sampler {
    Hashed { seed: u64 },
    Stream(Box<ChaCha8Rng>),
}

#[derive(Debug, Clone)]
pub struct SparseGrid {
    tiles: HashMap<u64, Tile>,
    blocked_probability: f64,
    sampler: Sampler,
    draws: u64,
}

impl SparseGrid {
    pub fn new(blocked_probability: f64, seed: u64, generation: Generation) -> Self {
        let sampler = match generation {
            Generation::CoordinateHash => Sampler::Hashed { seed },
            Generation::Stream => Sampler::Stream(Box::new(ChaCha8Rng::seed_from_u64(seed))),
        };
        let blocked_probability = if blocked_probability.is_nan() {
            0.0
        } else {
            blocked_probability.clamp(0.0, 1.0)
        };
        Self {
            tiles: HashMap::new(),
            blocked_probability,
            sampler,
            draws: 0,
        }
    }

    /// Returns the tile at `coord`, generating and caching it on first access.
    pub fn classify(&mut self, coord: TileCoord) -> Tile {
        let key = coord.packed();
        if let Some(tile) = self.tiles.get(&key) {
            return *tile;
        }

        let blocked = match &mut self.sampler {
            Sampler::Hashed { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(mix_key(*seed, key));
                rng.gen_bool(self.blocked_probability)
            }
            Sampler::Stream(rng) => rng.gen_bool(self.blocked_probability),
        };
        self.draws += 1;

        let tile = if blocked { Tile::Blocked } else { Tile::Open };
        log::trace!("Materialized tile ({}, {}) as {:?}", coord.x, coord.y, tile);
        *self.tiles.entry(key).or_insert(tile)
    }

    /// Cached classification without materializing.
    pub fn peek(&self, coord: TileCoord) -> Option<Tile> {
        self.tiles.get(&coord.packed()).copied()
    }

    /// Records `tile` at `coord` unless it has already been materialized.
    /// Returns true if the value was recorded. Never draws.
    pub fn seed_tile(&mut self, coord: TileCoord, tile: Tile) -> bool {
        let mut inserted = false;
        self.tiles.entry(coord.packed()).or_insert_with(|| {
            inserted = true;
            tile
        });
        inserted
    }

    /// Classifies every tile of the `width` x `height` window starting at
    /// `origin`, row-major.
    pub fn enumerate_window(
        &mut self,
        origin: TileCoord,
        width: u32,
        height: u32,
    ) -> Vec<(TileCoord, Tile)> {
        let mut out = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                let coord = origin.offset(col as i32, row as i32);
                out.push((coord, self.classify(coord)));
            }
        }
        out
    }

    pub fn materialized_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of random samples taken so far.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

fn mix_key(seed: u64, key: u64) -> u64 {
    // splitmix64 finalizer so neighbouring keys land on unrelated seeds.
    let mut z = seed ^ key.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
