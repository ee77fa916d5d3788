use bytemuck::{Pod, Zeroable};

/// Per-tile render data shared with the JavaScript renderer.
/// 8 floats = 32 bytes stride; the JS side reads it straight from wasm memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphInstance {
    /// X position in viewport pixels.
    pub x: f32,
    /// Y position in viewport pixels.
    pub y: f32,
    /// Rotation in radians.
    pub angle: f32,
    /// Unicode scalar value of the glyph.
    pub code: f32,
    /// Layout slot the tile is heading for.
    pub target_x: f32,
    pub target_y: f32,
    /// Buffer index, or -1 while unassigned.
    pub text_index: f32,
    /// Distance left to the slot; drives the jet-flame trail.
    pub distance: f32,
}

impl GlyphInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Glyph instances for one frame, in spawn order.
pub struct GlyphBuffer {
    pub instances: Vec<GlyphInstance>,
}

impl GlyphBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: GlyphInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new()
    }
}
