/// Input the scene understands, already stripped of browser detail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Type a glyph at the cursor.
    Char(char),
    /// Delete the glyph before the cursor.
    Backspace,
    /// Move the cursor by a signed number of glyphs.
    CursorMove(isize),
    /// A touch/click began at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Translate a `KeyboardEvent.key` value. Named keys other than the
    /// editing ones (Shift, Tab, F1, ...) map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" => Some(InputEvent::Backspace),
            "ArrowLeft" => Some(InputEvent::CursorMove(-1)),
            "ArrowRight" => Some(InputEvent::CursorMove(1)),
            "Enter" => Some(InputEvent::Char('\n')),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if is_supported_glyph(ch) => Some(InputEvent::Char(ch)),
                    _ => None,
                }
            }
        }
    }
}

/// Glyphs that get a tile. Newline counts; other control characters don't.
pub fn is_supported_glyph(ch: char) -> bool {
    ch == '\n' || !ch.is_control()
}
