//! Maps live letter bodies back onto buffer indices after an edit.

use std::collections::HashMap;

use crate::api::types::LetterId;
use crate::components::letter::LetterBody;

/// Recompute every body's `text_index` from scratch.
///
/// Bodies are visited in slice (spawn) order; each claims the lowest unclaimed
/// index holding its glyph. Returns the ids of bodies that found no slot, in
/// spawn order. The caller despawns them.
pub fn assign<H>(text: &[char], bodies: &mut [LetterBody<H>]) -> Vec<LetterId> {
    // Ascending slot list per glyph plus how many of them are already taken.
    let mut slots: HashMap<char, (Vec<usize>, usize)> = HashMap::new();
    for (index, &ch) in text.iter().enumerate() {
        slots.entry(ch).or_default().0.push(index);
    }

    let mut unassigned = Vec::new();
    for body in bodies.iter_mut() {
        body.text_index = None;
        if let Some((indices, taken)) = slots.get_mut(&body.glyph) {
            if let Some(&index) = indices.get(*taken) {
                *taken += 1;
                body.text_index = Some(index);
                continue;
            }
        }
        unassigned.push(body.id);
    }
    unassigned
}
