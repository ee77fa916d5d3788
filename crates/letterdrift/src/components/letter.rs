use glam::Vec2;

use crate::api::types::LetterId;

/// One spawned tile: a glyph, a non-owning handle into the physics world, and
/// the text index it currently represents.
///
/// The glyph lives here rather than on the physics body so the engine's data
/// stays separate from the backend's representation.
#[derive(Debug, Clone)]
pub struct LetterBody<H> {
    pub id: LetterId,
    pub glyph: char,
    pub handle: H,
    /// Buffer index this tile stands for; `None` means unassigned.
    /// Written only by reconciliation.
    pub text_index: Option<usize>,
    /// Position cached from the last physics sync, for rendering.
    pub pos: Vec2,
    /// Rotation cached from the last physics sync.
    pub angle: f32,
}

impl<H> LetterBody<H> {
    pub fn new(id: LetterId, glyph: char, handle: H) -> Self {
        Self {
            id,
            glyph,
            handle,
            text_index: None,
            pos: Vec2::ZERO,
            angle: 0.0,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.text_index.is_some()
    }
}
