//! Camera and visible tile window.
//!
//! The camera is the world position of the viewport's top-left corner. The
//! renderer asks for the tiles under the viewport plus one tile of padding on
//! every side, so no seam shows while the camera sits between tile boundaries.

use glam::IVec2;

use crate::config::ViewportConfig;
use crate::grid::{SparseGrid, Tile, TileCoord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTile {
    pub coord: TileCoord,
    pub tile: Tile,
    /// Top-left of the tile relative to the camera.
    pub screen: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub origin: TileCoord,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    pub position: IVec2,
}

impl Camera {
    /// Centres the viewport on `target`.
    pub fn follow(target: IVec2, viewport: ViewportConfig) -> Self {
        let half = IVec2::new((viewport.width / 2) as i32, (viewport.height / 2) as i32);
        Self {
            position: IVec2::new(
                target.x.saturating_sub(half.x),
                target.y.saturating_sub(half.y),
            ),
        }
    }

    pub fn tile_window(&self, viewport: ViewportConfig, tile_size: i32) -> TileWindow {
        let tile_size = tile_size.max(1);
        let origin = TileCoord::new(
            self.position.x.div_euclid(tile_size),
            self.position.y.div_euclid(tile_size),
        )
        .offset(-1, -1);
        TileWindow {
            origin,
            width: viewport.width / tile_size as u32 + 2,
            height: viewport.height / tile_size as u32 + 2,
        }
    }

    pub fn visible_tiles(
        &self,
        grid: &mut SparseGrid,
        viewport: ViewportConfig,
        tile_size: i32,
    ) -> Vec<VisibleTile> {
        let tile_size = tile_size.max(1);
        let window = self.tile_window(viewport, tile_size);
        grid.enumerate_window(window.origin, window.width, window.height)
            .into_iter()
            .map(|(coord, tile)| VisibleTile {
                coord,
                tile,
                screen: self.screen_position(IVec2::new(
                    coord.x.wrapping_mul(tile_size),
                    coord.y.wrapping_mul(tile_size),
                )),
            })
            .collect()
    }

    pub fn screen_position(&self, world: IVec2) -> IVec2 {
        IVec2::new(
            world.x.wrapping_sub(self.position.x),
            world.y.wrapping_sub(self.position.y),
        )
    }
}
