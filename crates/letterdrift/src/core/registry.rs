use crate::api::types::LetterId;
use crate::components::letter::LetterBody;

/// Live letter bodies in spawn order.
///
/// A flat Vec: scenes hold hundreds of tiles, not millions. Removal keeps the
/// remaining order intact because reconciliation breaks ties by spawn order.
pub struct BodyRegistry<H> {
    bodies: Vec<LetterBody<H>>,
}

impl<H> BodyRegistry<H> {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(256),
        }
    }

    /// Append a freshly spawned body.
    pub fn push(&mut self, body: LetterBody<H>) {
        self.bodies.push(body);
    }

    /// Remove a body by ID, preserving the order of the rest.
    /// Returns `None` if it was already removed.
    pub fn remove(&mut self, id: LetterId) -> Option<LetterBody<H>> {
        let idx = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(idx))
    }

    pub fn get(&self, id: LetterId) -> Option<&LetterBody<H>> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: LetterId) -> Option<&mut LetterBody<H>> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Body currently assigned to `index`, if any.
    pub fn at_index(&self, index: usize) -> Option<&LetterBody<H>> {
        self.bodies.iter().find(|b| b.text_index == Some(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LetterBody<H>> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LetterBody<H>> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[LetterBody<H>] {
        &self.bodies
    }

    /// Mutable slice for in-place index reassignment. Cannot add, remove or reorder.
    pub fn as_mut_slice(&mut self) -> &mut [LetterBody<H>] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl<H> Default for BodyRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
