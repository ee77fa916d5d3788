//! Magnetic pull from each tile toward its slot in the text layout.
//!
//! Runs once per tick, before the physics step. The force curve is piecewise
//! `mass × min(gain × d, cap)` over three distance bands; with non-decreasing
//! gains and caps the pull never weakens as a tile gets farther away, which
//! is what keeps the approach monotone from rest.

use glam::Vec2;

use crate::api::config::{ForceTier, SteeringConfig};
use crate::api::types::LetterId;
use crate::components::letter::LetterBody;
use crate::core::backend::PhysicsBackend;
use crate::core::rng::Rng;
use crate::text::layout::Layout;

/// A tile snapped back to its slot this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Teleport {
    pub id: LetterId,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteeringField {
    band_edges: [f32; 2],
    tiers: [ForceTier; 3],
    near_threshold: f32,
    settle_radius: f32,
    settle_damping: f32,
    teleport_factor: f32,
    teleport_jitter: f32,
}

impl SteeringField {
    pub fn from_config(config: &SteeringConfig) -> Self {
        Self {
            band_edges: config.band_edges,
            tiers: config.tiers,
            near_threshold: config.near_threshold,
            settle_radius: config.settle_radius,
            settle_damping: config.settle_damping,
            teleport_factor: config.teleport_factor,
            teleport_jitter: config.teleport_jitter,
        }
    }

    /// Pull per unit mass at distance `d`.
    pub fn acceleration(&self, d: f32) -> f32 {
        let tier = if d <= self.band_edges[0] {
            self.tiers[0]
        } else if d <= self.band_edges[1] {
            self.tiers[1]
        } else {
            self.tiers[2]
        };
        (tier.gain * d).min(tier.cap)
    }

    /// Distance past which a tile is considered lost for this viewport.
    pub fn teleport_distance(&self, viewport: Vec2) -> f32 {
        self.teleport_factor * viewport.length()
    }

    /// Steer every assigned body toward `layout.position(text_index)`.
    /// Unassigned bodies are left alone. Returns the tiles that were teleported:
    /// those farther than the teleport distance, and those stranded outside
    /// the viewport while their slot lies inside it.
    pub fn steer<P: PhysicsBackend>(
        &self,
        physics: &mut P,
        bodies: &[LetterBody<P::Handle>],
        layout: &Layout,
        viewport: Vec2,
        rng: &mut Rng,
    ) -> Vec<Teleport> {
        let teleport_distance = self.teleport_distance(viewport);
        let mut teleported = Vec::new();

        for body in bodies {
            let Some(index) = body.text_index else { continue };
            let Some(state) = physics.read_state(body.handle) else { continue };

            let target = layout.position(index);
            let offset = target - state.position;
            let d = offset.length();

            physics.set_angle(body.handle, 0.0);
            physics.set_angular_velocity(body.handle, 0.0);

            let stranded = !in_frame(state.position, viewport) && in_frame(target, viewport);
            if d > teleport_distance || stranded {
                teleported.push(self.snap_home(physics, body, target, rng));
                continue;
            }

            if d < self.settle_radius {
                physics.set_velocity(body.handle, state.velocity * self.settle_damping);
            }

            if d > self.near_threshold {
                let mass = physics.mass(body.handle);
                let force = offset / d * mass * self.acceleration(d);
                physics.apply_force(body.handle, state.position, force);
            }
        }

        teleported
    }

    /// Snap home the tiles a viewport change left behind: tiles outside the
    /// new viewport whose slot is inside it, and tiles whose slot moved out of
    /// it. Tiles already resting on an off-screen slot stay put.
    pub fn recall_strays<P: PhysicsBackend>(
        &self,
        physics: &mut P,
        bodies: &[LetterBody<P::Handle>],
        layout: &Layout,
        viewport: Vec2,
        rng: &mut Rng,
    ) -> Vec<Teleport> {
        let mut recalled = Vec::new();
        for body in bodies {
            let Some(index) = body.text_index else { continue };
            let Some(state) = physics.read_state(body.handle) else { continue };

            let target = layout.position(index);
            let stranded = if in_frame(target, viewport) {
                !in_frame(state.position, viewport)
            } else {
                state.position.distance(target) > self.settle_radius
            };
            if stranded {
                recalled.push(self.snap_home(physics, body, target, rng));
            }
        }
        recalled
    }

    fn snap_home<P: PhysicsBackend>(
        &self,
        physics: &mut P,
        body: &LetterBody<P::Handle>,
        target: Vec2,
        rng: &mut Rng,
    ) -> Teleport {
        let position = target + rng.jitter(self.teleport_jitter);
        physics.set_position(body.handle, position);
        physics.set_velocity(body.handle, Vec2::ZERO);
        physics.set_angle(body.handle, 0.0);
        physics.set_angular_velocity(body.handle, 0.0);
        Teleport { id: body.id, position }
    }
}

fn in_frame(point: Vec2, viewport: Vec2) -> bool {
    point.cmpge(Vec2::ZERO).all() && point.cmple(viewport).all()
}
