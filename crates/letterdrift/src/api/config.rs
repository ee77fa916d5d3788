use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::core::backend::{BoxShape, ColliderMaterial};

/// Scene configuration, loaded once at scene start.
/// Every section falls back to its defaults, so partial JSON is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed simulation step in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most ticks run for one browser frame.
    pub max_steps_per_frame: u32,
    /// Initial viewport size in pixels.
    pub viewport: [f32; 2],
    /// World gravity, Y-down, pixels/s². Zero leaves the magnet as the only pull.
    pub gravity: [f32; 2],
    /// Seed for launch directions and teleport jitter.
    pub seed: u64,
    /// Glyph slots in the frame buffer. The scene also refuses inserts once the
    /// layout's visible grid is full, whichever limit is lower.
    pub max_glyphs: usize,
    /// Scene events kept per frame.
    pub max_events: usize,
    pub layout: LayoutConfig,
    pub tile: TileConfig,
    pub spawn: SpawnConfig,
    pub steering: SteeringConfig,
    pub walls: WallConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport: [800.0, 600.0],
            gravity: [0.0, 0.0],
            seed: 42,
            max_glyphs: 512,
            max_events: 64,
            layout: LayoutConfig::default(),
            tile: TileConfig::default(),
            spawn: SpawnConfig::default(),
            steering: SteeringConfig::default(),
            walls: WallConfig::default(),
        }
    }
}

/// Glyph grid metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub glyph_width: f32,
    pub line_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            glyph_width: 36.0,
            line_height: 52.0,
            margin_left: 40.0,
            margin_top: 60.0,
        }
    }
}

/// Physical properties of a letter tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Full width and height of the tile rectangle.
    pub size: [f32; 2],
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    /// Linear damping applied by the physics engine.
    pub air_friction: f32,
    /// Continuous collision detection, so fast tiles don't tunnel through walls.
    pub ccd: bool,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            size: [30.0, 44.0],
            restitution: 0.4,
            friction: 0.3,
            density: 1.0,
            air_friction: 6.0,
            ccd: true,
        }
    }
}

impl TileConfig {
    pub fn shape(&self) -> BoxShape {
        BoxShape::from_size(Vec2::new(self.size[0], self.size[1]))
    }

    pub fn material(&self) -> ColliderMaterial {
        ColliderMaterial {
            restitution: self.restitution,
            friction: self.friction,
            density: self.density,
        }
    }
}

/// Where and how fast tiles launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Fixed anchor; `None` derives one from the viewport.
    pub anchor: Option<[f32; 2]>,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Pointer presses within this distance of the anchor start a drag.
    pub grab_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            anchor: None,
            min_speed: 250.0,
            max_speed: 600.0,
            grab_radius: 40.0,
        }
    }
}

impl SpawnConfig {
    /// The configured anchor, or a point a third of the way down the viewport.
    pub fn anchor_for(&self, viewport: Vec2) -> Vec2 {
        match self.anchor {
            Some([x, y]) => Vec2::new(x, y),
            None => Vec2::new(viewport.x * 0.5, viewport.y * 0.33),
        }
    }
}

/// One distance band of the steering curve: acceleration = min(gain × d, cap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceTier {
    pub gain: f32,
    pub cap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Upper distance bounds of the first two bands; the third is open-ended.
    pub band_edges: [f32; 2],
    pub tiers: [ForceTier; 3],
    /// No force is applied closer than this.
    pub near_threshold: f32,
    /// Velocity damping kicks in closer than this.
    pub settle_radius: f32,
    /// Per-tick velocity multiplier inside `settle_radius`.
    pub settle_damping: f32,
    /// Teleport when farther than this many viewport diagonals.
    pub teleport_factor: f32,
    /// Per-axis jitter added to a teleported tile's target.
    pub teleport_jitter: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            band_edges: [60.0, 300.0],
            tiers: [
                ForceTier { gain: 12.0, cap: 600.0 },
                ForceTier { gain: 14.0, cap: 3000.0 },
                ForceTier { gain: 16.0, cap: 6000.0 },
            ],
            near_threshold: 1.0,
            settle_radius: 24.0,
            settle_damping: 0.85,
            teleport_factor: 3.0,
            teleport_jitter: 4.0,
        }
    }
}

/// Static colliders framing the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub enabled: bool,
    pub thickness: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thickness: 10.0,
        }
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be a positive number, got {}", v)))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be zero or more, got {}", v)))
    }
}

impl SceneConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport[0], self.viewport[1])
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity[0], self.gravity[1])
    }

    /// Reject values that would break the layout or the steering guarantees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_dt", self.fixed_dt)?;
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::invalid("max_steps_per_frame", "must be at least 1"));
        }
        positive("viewport.width", self.viewport[0])?;
        positive("viewport.height", self.viewport[1])?;
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        if self.max_glyphs == 0 {
            return Err(ConfigError::invalid("max_glyphs", "must be at least 1"));
        }

        positive("layout.glyph_width", self.layout.glyph_width)?;
        positive("layout.line_height", self.layout.line_height)?;
        non_negative("layout.margin_left", self.layout.margin_left)?;
        non_negative("layout.margin_top", self.layout.margin_top)?;

        positive("tile.width", self.tile.size[0])?;
        positive("tile.height", self.tile.size[1])?;
        positive("tile.density", self.tile.density)?;
        non_negative("tile.restitution", self.tile.restitution)?;
        non_negative("tile.friction", self.tile.friction)?;
        non_negative("tile.air_friction", self.tile.air_friction)?;

        non_negative("spawn.min_speed", self.spawn.min_speed)?;
        non_negative("spawn.max_speed", self.spawn.max_speed)?;
        non_negative("spawn.grab_radius", self.spawn.grab_radius)?;
        if self.spawn.min_speed > self.spawn.max_speed {
            return Err(ConfigError::invalid("spawn.min_speed", "must not exceed spawn.max_speed"));
        }

        self.steering.validate()?;
        positive("walls.thickness", self.walls.thickness)?;
        Ok(())
    }
}

impl SteeringConfig {
    /// The force curve must be non-decreasing in distance: band edges strictly
    /// increasing, gains and caps non-decreasing from band to band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [near, far] = self.band_edges;
        positive("steering.band_edges", near)?;
        if !(far.is_finite() && far > near) {
            return Err(ConfigError::invalid("steering.band_edges", "must be strictly increasing"));
        }
        for tier in &self.tiers {
            positive("steering.tiers.gain", tier.gain)?;
            positive("steering.tiers.cap", tier.cap)?;
        }
        for pair in self.tiers.windows(2) {
            if pair[1].gain < pair[0].gain {
                return Err(ConfigError::invalid("steering.tiers.gain", "must not decrease with distance"));
            }
            if pair[1].cap < pair[0].cap {
                return Err(ConfigError::invalid("steering.tiers.cap", "must not decrease with distance"));
            }
        }
        non_negative("steering.near_threshold", self.near_threshold)?;
        non_negative("steering.settle_radius", self.settle_radius)?;
        if !(0.0..1.0).contains(&self.settle_damping) {
            return Err(ConfigError::invalid("steering.settle_damping", "must be in [0, 1)"));
        }
        positive("steering.teleport_factor", self.teleport_factor)?;
        non_negative("steering.teleport_jitter", self.teleport_jitter)?;
        Ok(())
    }
}
