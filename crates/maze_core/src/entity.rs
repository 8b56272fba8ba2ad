//! The player-controlled box and its collision against the sparse grid.
//!
//! Movement is **axis-separated**: the X component of a displacement is tested
//! and committed (or dropped) first, then the Y component is tested against
//! the already-resolved X. A diagonal push into a wall therefore still slides
//! along the open axis.
//!
//! Admissibility is a four-corner test. Each corner's tile is the top-left
//! tile offset by `extent / tile_size` (integer quotient), so boxes whose
//! extent is not a multiple of the tile size are under-checked on their
//! right and bottom edges. Collision behaviour depends on that approximation.

use glam::IVec2;

use crate::config::EntityConfig;
use crate::grid::{SparseGrid, TileCoord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub position: IVec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileEntity {
    /// Top-left corner of the bounding box, in world units.
    pub position: IVec2,
    pub extent: i32,
    pub speed: i32,
    tile_size: i32,
}

impl MobileEntity {
    pub fn new(position: IVec2, extent: i32, speed: i32, tile_size: i32) -> Self {
        Self {
            position,
            extent,
            speed,
            tile_size: tile_size.max(1),
        }
    }

    pub fn from_config(config: &EntityConfig, tile_size: i32) -> Self {
        Self::new(
            IVec2::from_array(config.start),
            config.extent,
            config.speed,
            tile_size,
        )
    }

    /// Tiles under the top-left, top-right, bottom-left and bottom-right
    /// corners of a box placed at `position`.
    pub fn corner_tiles(&self, position: IVec2) -> [TileCoord; 4] {
        let origin = tile_of(position, self.tile_size);
        let reach = self.extent / self.tile_size;
        [
            origin,
            origin.offset(reach, 0),
            origin.offset(0, reach),
            origin.offset(reach, reach),
        ]
    }

    pub fn fits(&self, position: IVec2, grid: &mut SparseGrid) -> bool {
        self.corner_tiles(position)
            .into_iter()
            .all(|corner| !grid.classify(corner).is_blocked())
    }

    pub fn propose_move(&mut self, displacement: IVec2, grid: &mut SparseGrid) -> IVec2 {
        self.propose_move_detailed(displacement, grid).position
    }

    pub fn propose_move_detailed(
        &mut self,
        displacement: IVec2,
        grid: &mut SparseGrid,
    ) -> MoveResult {
        let candidate_x = IVec2::new(
            self.position.x.saturating_add(displacement.x),
            self.position.y,
        );
        let x_ok = self.fits(candidate_x, grid);
        if x_ok {
            self.position.x = candidate_x.x;
        } else {
            log::trace!(
                "X move to {} rejected at y={}",
                candidate_x.x,
                candidate_x.y
            );
        }

        // Y is tested against the resolved X, not the starting X.
        let candidate_y = IVec2::new(
            self.position.x,
            self.position.y.saturating_add(displacement.y),
        );
        let y_ok = self.fits(candidate_y, grid);
        if y_ok {
            self.position.y = candidate_y.y;
        } else {
            log::trace!(
                "Y move to {} rejected at x={}",
                candidate_y.y,
                candidate_y.x
            );
        }

        MoveResult {
            position: self.position,
            blocked_x: !x_ok && displacement.x != 0,
            blocked_y: !y_ok && displacement.y != 0,
        }
    }
}

/// Tile containing a world position, flooring toward negative infinity.
pub fn tile_of(position: IVec2, tile_size: i32) -> TileCoord {
    TileCoord::new(
        position.x.div_euclid(tile_size),
        position.y.div_euclid(tile_size),
    )
}
