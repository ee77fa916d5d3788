use crate::components::letter::LetterBody;
use crate::renderer::instance::{GlyphBuffer, GlyphInstance};
use crate::text::layout::Layout;

/// Build the glyph buffer from the registry, in spawn order.
/// Unassigned tiles (only visible between an edit and its despawn) target
/// their own position.
pub fn build_glyph_buffer<'a, H: 'a>(
    bodies: impl Iterator<Item = &'a LetterBody<H>>,
    layout: &Layout,
    buffer: &mut GlyphBuffer,
) {
    buffer.clear();

    for body in bodies {
        let target = match body.text_index {
            Some(index) => layout.position(index),
            None => body.pos,
        };
        buffer.push(GlyphInstance {
            x: body.pos.x,
            y: body.pos.y,
            angle: body.angle,
            code: body.glyph as u32 as f32,
            target_x: target.x,
            target_y: target.y,
            text_index: body.text_index.map_or(-1.0, |i| i as f32),
            distance: (target - body.pos).length(),
        });
    }
}
