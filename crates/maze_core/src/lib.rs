pub mod camera;
pub mod config;
pub mod entity;
pub mod grid;
pub mod input;
pub mod time;
pub mod world;

pub use camera::{Camera, TileWindow, VisibleTile};
pub use config::{load_config_from_path, WorldConfig};
pub use entity::{MobileEntity, MoveResult};
pub use grid::{Generation, SparseGrid, Tile, TileCoord};
pub use input::{InputState, Key};
pub use time::TimeState;
pub use world::World;
