//! Logical text and insertion point.

/// Ordered glyphs plus a cursor in `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splice `ch` in at the cursor and advance the cursor past it.
    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Remove the glyph before the cursor. No-op at the start of the buffer.
    pub fn delete_before_cursor(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.chars.remove(self.cursor))
    }

    /// Move the cursor by `delta`, clamped into `[0, len]`. Returns the new cursor.
    pub fn move_cursor(&mut self, delta: isize) -> usize {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.chars.len() as isize) as usize;
        self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}
