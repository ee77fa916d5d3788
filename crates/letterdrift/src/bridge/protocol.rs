//! Frame buffer layout read by the JavaScript renderer.
//! Must stay in sync with the JS `protocol` reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Glyphs: max_glyphs × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame, so the reader can
//! compute offsets without a separate handshake.

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::SceneEvent;
use crate::renderer::instance::GlyphInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_GLYPH_COUNT: usize = 2;
pub const HEADER_EVENT_COUNT: usize = 3;
pub const HEADER_VIEWPORT_WIDTH: usize = 4;
pub const HEADER_VIEWPORT_HEIGHT: usize = 5;
pub const HEADER_CURSOR_X: usize = 6;
pub const HEADER_CURSOR_Y: usize = 7;
pub const HEADER_SPAWN_X: usize = 8;
pub const HEADER_SPAWN_Y: usize = 9;
pub const HEADER_MAX_GLYPHS: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_BUFFER_FLOATS: usize = 12;
pub const HEADER_CURSOR_INDEX: usize = 13;
pub const HEADER_TEXT_LENGTH: usize = 14;
pub const HEADER_DRAGGING: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per glyph instance (wire format, fixed).
pub const GLYPH_FLOATS: usize = GlyphInstance::FLOATS;

/// Floats per scene event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = SceneEvent::FLOATS;

/// Per-frame scalars that go into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub viewport: Vec2,
    pub cursor_anchor: Vec2,
    pub spawn_anchor: Vec2,
    pub cursor_index: usize,
    pub text_length: usize,
    pub dragging: bool,
}

/// Buffer layout computed from the configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_glyphs: usize,
    pub max_events: usize,

    /// Size of glyph data section in floats.
    pub glyph_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where glyph data begins.
    pub glyph_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_glyphs: usize, max_events: usize) -> Self {
        let glyph_data_floats = max_glyphs * GLYPH_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let glyph_data_offset = HEADER_FLOATS;
        let event_data_offset = glyph_data_offset + glyph_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_glyphs,
            max_events,
            glyph_data_floats,
            event_data_floats,
            glyph_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.max_glyphs, config.max_events)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Write one frame into `out`, truncating glyphs and events to capacity.
    /// `out` is resized to the layout's length if it doesn't match.
    pub fn write_frame(
        &self,
        out: &mut Vec<f32>,
        header: &FrameHeader,
        glyphs: &[GlyphInstance],
        events: &[SceneEvent],
    ) {
        if out.len() != self.buffer_total_floats {
            out.resize(self.buffer_total_floats, 0.0);
        }

        let glyphs = &glyphs[..glyphs.len().min(self.max_glyphs)];
        let events = &events[..events.len().min(self.max_events)];

        let h = &mut out[..HEADER_FLOATS];
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_FRAME_COUNTER] = header.frame_counter as f32;
        h[HEADER_GLYPH_COUNT] = glyphs.len() as f32;
        h[HEADER_EVENT_COUNT] = events.len() as f32;
        h[HEADER_VIEWPORT_WIDTH] = header.viewport.x;
        h[HEADER_VIEWPORT_HEIGHT] = header.viewport.y;
        h[HEADER_CURSOR_X] = header.cursor_anchor.x;
        h[HEADER_CURSOR_Y] = header.cursor_anchor.y;
        h[HEADER_SPAWN_X] = header.spawn_anchor.x;
        h[HEADER_SPAWN_Y] = header.spawn_anchor.y;
        h[HEADER_MAX_GLYPHS] = self.max_glyphs as f32;
        h[HEADER_MAX_EVENTS] = self.max_events as f32;
        h[HEADER_BUFFER_FLOATS] = self.buffer_total_floats as f32;
        h[HEADER_CURSOR_INDEX] = header.cursor_index as f32;
        h[HEADER_TEXT_LENGTH] = header.text_length as f32;
        h[HEADER_DRAGGING] = if header.dragging { 1.0 } else { 0.0 };

        let glyph_floats: &[f32] = bytemuck::cast_slice(glyphs);
        out[self.glyph_data_offset..self.glyph_data_offset + glyph_floats.len()]
            .copy_from_slice(glyph_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}
