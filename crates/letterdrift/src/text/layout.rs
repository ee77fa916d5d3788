//! Fixed-pitch mapping from buffer index to screen position.
//!
//! Every consumer (steering, cursor anchor, renderer targets) goes through
//! [`Layout::position`], so they can never disagree about where a glyph belongs.

use glam::Vec2;

use crate::api::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    glyph_width: f32,
    line_height: f32,
    margin_left: f32,
    margin_top: f32,
    columns: usize,
    rows: usize,
}

impl Layout {
    /// Derive the layout for a viewport. At least one cell always fits.
    pub fn for_viewport(config: &LayoutConfig, viewport: Vec2) -> Self {
        let columns = cells(viewport.x - 2.0 * config.margin_left, config.glyph_width);
        let rows = cells(viewport.y - config.margin_top, config.line_height);
        Self {
            glyph_width: config.glyph_width,
            line_height: config.line_height,
            margin_left: config.margin_left,
            margin_top: config.margin_top,
            columns,
            rows,
        }
    }

    /// Target position for a buffer index. Pure; wraps every `columns` glyphs.
    pub fn position(&self, index: usize) -> Vec2 {
        let line = index / self.columns;
        let column = index % self.columns;
        Vec2::new(
            self.margin_left + column as f32 * self.glyph_width,
            self.margin_top + line as f32 * self.line_height,
        )
    }

    /// Characters per line.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Glyphs whose slots lie inside the viewport: full columns times the
    /// lines that fit above its bottom edge.
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

fn cells(extent: f32, pitch: f32) -> usize {
    let n = (extent / pitch).floor();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}
