use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Unique identifier for a spawned letter. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LetterId(pub u32);

/// An event communicated from the scene to the renderer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    /// A tile left the spawn anchor: `a, b` = launch point, `c` = glyph code.
    pub const SPAWNED: f32 = 1.0;
    /// A tile was removed: `a, b` = last position, `c` = glyph code.
    pub const DESPAWNED: f32 = 2.0;
    /// A runaway tile was snapped home: `a, b` = new position, `c` = glyph code.
    pub const TELEPORTED: f32 = 3.0;

    fn with_kind(kind: f32, pos: Vec2, glyph: char) -> Self {
        Self {
            kind,
            a: pos.x,
            b: pos.y,
            c: glyph as u32 as f32,
        }
    }

    pub fn spawned(pos: Vec2, glyph: char) -> Self {
        Self::with_kind(Self::SPAWNED, pos, glyph)
    }

    pub fn despawned(pos: Vec2, glyph: char) -> Self {
        Self::with_kind(Self::DESPAWNED, pos, glyph)
    }

    pub fn teleported(pos: Vec2, glyph: char) -> Self {
        Self::with_kind(Self::TELEPORTED, pos, glyph)
    }
}
