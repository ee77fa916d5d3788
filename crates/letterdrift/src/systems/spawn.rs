use glam::Vec2;

use crate::api::config::{SpawnConfig, TileConfig, WallConfig};
use crate::core::backend::{BodyDesc, BoxShape};
use crate::core::rng::Rng;

/// Launch velocity for a new tile: uniform direction, speed in `[min_speed, max_speed]`.
pub fn launch_velocity(spawn: &SpawnConfig, rng: &mut Rng) -> Vec2 {
    let speed = rng.range(spawn.min_speed, spawn.max_speed);
    rng.unit_vec2() * speed
}

/// Body description for a letter tile leaving `anchor`.
/// Rotation is locked; steering keeps the angle pinned at zero as well.
pub fn tile_desc(tile: &TileConfig, anchor: Vec2, velocity: Vec2) -> BodyDesc {
    BodyDesc::dynamic(tile.shape())
        .with_position(anchor)
        .with_velocity(velocity)
        .with_fixed_rotation(true)
        .with_ccd(tile.ccd)
        .with_linear_damping(tile.air_friction)
}

/// Four static slabs just outside the viewport edges: top, bottom, left, right.
/// The side walls overlap the corners so nothing slips out diagonally.
pub fn wall_descs(walls: &WallConfig, viewport: Vec2) -> [BodyDesc; 4] {
    let t = walls.thickness;
    let half = viewport / 2.0;
    let horizontal = BoxShape::new(half.x + t, t / 2.0);
    let vertical = BoxShape::new(t / 2.0, half.y + t);
    [
        BodyDesc::fixed(horizontal).with_position(Vec2::new(half.x, -t / 2.0)),
        BodyDesc::fixed(horizontal).with_position(Vec2::new(half.x, viewport.y + t / 2.0)),
        BodyDesc::fixed(vertical).with_position(Vec2::new(-t / 2.0, half.y)),
        BodyDesc::fixed(vertical).with_position(Vec2::new(viewport.x + t / 2.0, half.y)),
    ]
}
