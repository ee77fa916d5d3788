//! The seam between the letter engine and a rigid-body simulation.

use glam::Vec2;

/// Whether the simulation moves the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

/// Box collider given by half extents. Tiles and walls are both boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub half_width: f32,
    pub half_height: f32,
}

impl BoxShape {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self { half_width, half_height }
    }

    /// Box with the given full width and height.
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x / 2.0, size.y / 2.0)
    }

    /// Mass per unit density.
    pub fn area(&self) -> f32 {
        4.0 * self.half_width * self.half_height
    }
}

/// Which bodies a collider touches. Tiles pass through each other and only
/// meet walls, so every tile can always reach its own slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    Tile,
    Wall,
}

impl CollisionLayer {
    pub fn collides_with(self, other: CollisionLayer) -> bool {
        self != other
    }
}

/// Surface and bulk properties of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

/// What to create: body kind, initial motion, collider and damping.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    /// Lock rotation entirely ("infinite inertia").
    pub fixed_rotation: bool,
    pub ccd: bool,
    pub shape: BoxShape,
    pub layer: CollisionLayer,
    /// Air friction: velocity decays by `1 / (1 + dt * linear_damping)` per step.
    pub linear_damping: f32,
}

impl BodyDesc {
    pub fn dynamic(shape: BoxShape) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            gravity_scale: 1.0,
            fixed_rotation: false,
            layer: CollisionLayer::Tile,
            ..Self::fixed(shape)
        }
    }

    /// Static body: no gravity, never rotates.
    pub fn fixed(shape: BoxShape) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 0.0,
            fixed_rotation: true,
            ccd: false,
            shape,
            layer: CollisionLayer::Wall,
            linear_damping: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_fixed_rotation(mut self, locked: bool) -> Self {
        self.fixed_rotation = locked;
        self
    }

    pub fn with_ccd(mut self, ccd: bool) -> Self {
        self.ccd = ccd;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }
}

/// Pose and motion read back after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
}

/// Everything the letter engine needs from a rigid-body simulation.
///
/// Handles are opaque and owned by the backend; the engine only keeps copies
/// to address bodies. Calls with a handle that no longer exists are no-ops.
pub trait PhysicsBackend {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Create a rigid body with one collider and start simulating it.
    fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> Self::Handle;

    /// Remove a body from the simulation. Returns `false` if it was already gone.
    fn destroy_body(&mut self, handle: Self::Handle) -> bool;

    /// Apply a force at a world-space point for the next step only.
    /// Forces accumulate within a tick and are cleared after `step`.
    fn apply_force(&mut self, handle: Self::Handle, point: Vec2, force: Vec2);

    fn set_velocity(&mut self, handle: Self::Handle, velocity: Vec2);

    fn set_position(&mut self, handle: Self::Handle, position: Vec2);

    fn set_angle(&mut self, handle: Self::Handle, angle: f32);

    fn set_angular_velocity(&mut self, handle: Self::Handle, angvel: f32);

    /// Current position, velocity and angle, or `None` for a stale handle.
    fn read_state(&self, handle: Self::Handle) -> Option<BodyState>;

    /// Mass of the body (0.0 for a stale handle).
    fn mass(&self, handle: Self::Handle) -> f32;

    /// Advance the simulation by one fixed step.
    fn step(&mut self);

    /// Number of live bodies, static ones included.
    fn body_count(&self) -> usize;
}
