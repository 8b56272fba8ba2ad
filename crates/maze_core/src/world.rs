use glam::IVec2;

use crate::camera::{Camera, VisibleTile};
use crate::config::WorldConfig;
use crate::entity::{tile_of, MobileEntity, MoveResult};
use crate::grid::{SparseGrid, Tile};
use crate::input::InputState;

/// One running session: the grid, the player and the camera following it.
pub struct World {
    pub config: WorldConfig,
    pub grid: SparseGrid,
    pub player: MobileEntity,
    pub camera: Camera,
}

impl World {
    pub fn new(mut config: WorldConfig) -> Self {
        // Every component below reads this one value.
        if config.tile_size <= 0 {
            log::warn!("tile_size {} is not positive, using 1", config.tile_size);
            config.tile_size = 1;
        }
        let mut grid = config.grid.build_grid();
        let player = MobileEntity::from_config(&config.entity, config.tile_size);

        // The player never spawns inside a wall.
        for corner in player.corner_tiles(player.position) {
            grid.seed_tile(corner, Tile::Open);
        }
        let camera = Camera::follow(player.position, config.viewport);
        let spawn_tile = tile_of(player.position, config.tile_size);

        log::info!(
            "World created: tile_size={} p={} seed={} generation={:?}, player at ({}, {}) in tile ({}, {})",
            config.tile_size,
            config.grid.blocked_probability,
            config.grid.seed,
            config.grid.generation,
            player.position.x,
            player.position.y,
            spawn_tile.x,
            spawn_tile.y,
        );

        Self {
            config,
            grid,
            player,
            camera,
        }
    }

    /// Advances one simulation step from the currently held keys.
    pub fn step(&mut self, input: &InputState) -> MoveResult {
        let displacement = input.displacement(self.player.speed);
        let result = self.player.propose_move_detailed(displacement, &mut self.grid);
        self.camera = Camera::follow(self.player.position, self.config.viewport);
        log::debug!(
            "Step: requested ({}, {}) -> at ({}, {}) blocked_x={} blocked_y={}",
            displacement.x,
            displacement.y,
            result.position.x,
            result.position.y,
            result.blocked_x,
            result.blocked_y
        );
        result
    }

    pub fn visible_tiles(&mut self) -> Vec<VisibleTile> {
        self.camera
            .visible_tiles(&mut self.grid, self.config.viewport, self.config.tile_size)
    }

    pub fn player_screen_position(&self) -> IVec2 {
        self.camera.screen_position(self.player.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Generation;
    use crate::input::Key;

    fn walled_config() -> WorldConfig {
        let mut config = WorldConfig::default();
        config.grid.blocked_probability = 1.0;
        config.entity.start = [0, 0];
        config.entity.speed = config.tile_size;
        config
    }

    #[test]
    fn spawn_tiles_are_open_even_in_solid_world() {
        let mut world = World::new(walled_config());
        let position = world.player.position;
        assert!(world.player.fits(position, &mut world.grid));
        assert_eq!(world.grid.draw_count(), 0);
    }

    #[test]
    fn walled_in_player_stays_put() {
        let mut world = World::new(walled_config());
        for keys in [
            &[Key::Right][..],
            &[Key::Left][..],
            &[Key::Up][..],
            &[Key::Down][..],
            &[Key::Right, Key::Down][..],
        ] {
            let result = world.step(&InputState::with_held(keys));
            assert_eq!(result.position, IVec2::ZERO);
        }
    }

    #[test]
    fn camera_tracks_player() {
        let mut config = WorldConfig::default();
        config.grid.blocked_probability = 0.0;
        let mut world = World::new(config);
        world.step(&InputState::with_held(&[Key::Right, Key::Down]));
        assert_eq!(world.player.position, IVec2::new(405, 305));
        assert_eq!(world.camera.position, IVec2::new(5, 5));
        assert_eq!(world.player_screen_position(), IVec2::new(400, 300));
    }

    #[test]
    fn identical_configs_replay_identically() {
        let mut config = WorldConfig::default();
        config.grid.seed = 77;
        config.grid.generation = Generation::Stream;
        let mut a = World::new(config.clone());
        let mut b = World::new(config);

        let script = [
            &[Key::Right][..],
            &[Key::Right, Key::Down][..],
            &[Key::Down][..],
            &[Key::Left, Key::Down][..],
            &[Key::Up][..],
        ];
        for keys in script.iter().cycle().take(300) {
            let input = InputState::with_held(keys);
            a.step(&input);
            b.step(&input);
            a.visible_tiles();
            b.visible_tiles();
        }
        assert_eq!(a.player.position, b.player.position);
        assert_eq!(a.grid.materialized_count(), b.grid.materialized_count());
    }

    #[test]
    fn non_positive_tile_size_is_shared_by_all_parts() {
        let mut config = WorldConfig::default();
        config.tile_size = -40;
        config.grid.blocked_probability = 0.0;
        config.entity.start = [-3, -3];
        config.viewport.width = 4;
        config.viewport.height = 2;
        let mut world = World::new(config);
        assert_eq!(world.config.tile_size, 1);

        let tiles = world.visible_tiles();
        assert_eq!(tiles.len(), (4 + 2) * (2 + 2));
        for visible in &tiles {
            let world_pos = IVec2::new(visible.coord.x, visible.coord.y);
            assert_eq!(visible.screen, world.camera.screen_position(world_pos));
        }
        assert_eq!(
            world.player.corner_tiles(world.player.position)[0],
            tile_of(world.player.position, 1)
        );
    }

    #[test]
    fn visible_tiles_cover_padded_viewport() {
        let mut world = World::new(WorldConfig::default());
        let tiles = world.visible_tiles();
        assert_eq!(tiles.len(), 22 * 17);
    }
}
