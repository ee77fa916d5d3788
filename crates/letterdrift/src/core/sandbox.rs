//! Contact-free physics backend for tests.
//!
//! Integrates like Rapier without collisions: force and gravity change the
//! velocity, linear damping scales it by `1 / (1 + dt * damping)`, then the
//! position advances. Fixed bodies never move.

use glam::Vec2;

use crate::core::backend::{BodyDesc, BodyState, BodyType, ColliderMaterial, PhysicsBackend};

#[derive(Debug, Clone)]
struct SandboxBody {
    fixed: bool,
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    angvel: f32,
    mass: f32,
    gravity_scale: f32,
    damping: f32,
    force: Vec2,
}

/// Handle into the sandbox: slot index plus a generation so stale handles stay stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxHandle {
    slot: usize,
    generation: u32,
}

pub struct SandboxPhysics {
    gravity: Vec2,
    dt: f32,
    slots: Vec<(u32, Option<SandboxBody>)>,
    pub destroy_calls: usize,
}

impl SandboxPhysics {
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        Self {
            gravity,
            dt,
            slots: Vec::new(),
            destroy_calls: 0,
        }
    }

    fn get(&self, handle: SandboxHandle) -> Option<&SandboxBody> {
        match self.slots.get(handle.slot) {
            Some((generation, Some(body))) if *generation == handle.generation => Some(body),
            _ => None,
        }
    }

    fn get_mut(&mut self, handle: SandboxHandle) -> Option<&mut SandboxBody> {
        match self.slots.get_mut(handle.slot) {
            Some((generation, Some(body))) if *generation == handle.generation => Some(body),
            _ => None,
        }
    }
}

impl PhysicsBackend for SandboxPhysics {
    type Handle = SandboxHandle;

    fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> SandboxHandle {
        let body = SandboxBody {
            fixed: desc.body_type == BodyType::Fixed,
            position: desc.position,
            velocity: desc.velocity,
            angle: 0.0,
            angvel: 0.0,
            mass: desc.shape.area() * material.density,
            gravity_scale: desc.gravity_scale,
            damping: desc.linear_damping,
            force: Vec2::ZERO,
        };
        if let Some(slot) = self.slots.iter().position(|(_, b)| b.is_none()) {
            let generation = self.slots[slot].0 + 1;
            self.slots[slot] = (generation, Some(body));
            SandboxHandle { slot, generation }
        } else {
            self.slots.push((0, Some(body)));
            SandboxHandle { slot: self.slots.len() - 1, generation: 0 }
        }
    }

    fn destroy_body(&mut self, handle: SandboxHandle) -> bool {
        self.destroy_calls += 1;
        match self.slots.get_mut(handle.slot) {
            Some((generation, body)) if *generation == handle.generation && body.is_some() => {
                *body = None;
                true
            }
            _ => false,
        }
    }

    fn apply_force(&mut self, handle: SandboxHandle, _point: Vec2, force: Vec2) {
        if let Some(b) = self.get_mut(handle) {
            b.force += force;
        }
    }

    fn set_velocity(&mut self, handle: SandboxHandle, velocity: Vec2) {
        if let Some(b) = self.get_mut(handle) {
            b.velocity = velocity;
        }
    }

    fn set_position(&mut self, handle: SandboxHandle, position: Vec2) {
        if let Some(b) = self.get_mut(handle) {
            b.position = position;
        }
    }

    fn set_angle(&mut self, handle: SandboxHandle, angle: f32) {
        if let Some(b) = self.get_mut(handle) {
            b.angle = angle;
        }
    }

    fn set_angular_velocity(&mut self, handle: SandboxHandle, angvel: f32) {
        if let Some(b) = self.get_mut(handle) {
            b.angvel = angvel;
        }
    }

    fn read_state(&self, handle: SandboxHandle) -> Option<BodyState> {
        self.get(handle).map(|b| BodyState {
            position: b.position,
            velocity: b.velocity,
            angle: b.angle,
        })
    }

    fn mass(&self, handle: SandboxHandle) -> f32 {
        self.get(handle).map(|b| b.mass).unwrap_or(0.0)
    }

    fn step(&mut self) {
        let dt = self.dt;
        let gravity = self.gravity;
        for (_, slot) in self.slots.iter_mut() {
            let Some(b) = slot else { continue };
            if b.fixed {
                b.force = Vec2::ZERO;
                continue;
            }
            let accel = if b.mass > 0.0 { b.force / b.mass } else { Vec2::ZERO };
            b.velocity += (accel + gravity * b.gravity_scale) * dt;
            b.velocity *= 1.0 / (1.0 + dt * b.damping);
            b.position += b.velocity * dt;
            b.angle += b.angvel * dt;
            b.force = Vec2::ZERO;
        }
    }

    fn body_count(&self) -> usize {
        self.slots.iter().filter(|(_, b)| b.is_some()).count()
    }
}
