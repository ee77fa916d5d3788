//! Rapier2D implementation of [`PhysicsBackend`].

use glam::Vec2;
use rapier2d::prelude::*;

use crate::core::backend::{
    BodyDesc, BodyState, BodyType, BoxShape, ColliderMaterial, CollisionLayer, PhysicsBackend,
};

type NaVec = nalgebra::Vector2<f32>;

fn to_na(v: Vec2) -> NaVec {
    NaVec::new(v.x, v.y)
}

fn from_na(v: &NaVec) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn rigid_body_type(kind: BodyType) -> RigidBodyType {
    match kind {
        BodyType::Dynamic => RigidBodyType::Dynamic,
        BodyType::Fixed => RigidBodyType::Fixed,
    }
}

fn layer_group(layer: CollisionLayer) -> Group {
    match layer {
        CollisionLayer::Tile => Group::GROUP_1,
        CollisionLayer::Wall => Group::GROUP_2,
    }
}

fn interaction_groups(layer: CollisionLayer) -> InteractionGroups {
    let filter = [CollisionLayer::Tile, CollisionLayer::Wall]
        .into_iter()
        .filter(|other| layer.collides_with(*other))
        .fold(Group::empty(), |groups, other| groups | layer_group(other));
    InteractionGroups::new(layer_group(layer), filter)
}

fn collider_for(shape: BoxShape, layer: CollisionLayer, material: ColliderMaterial) -> Collider {
    ColliderBuilder::cuboid(shape.half_width, shape.half_height)
        .collision_groups(interaction_groups(layer))
        .restitution(material.restitution)
        .friction(material.friction)
        .density(material.density)
        .build()
}

/// Rapier handles for one tile or wall. Copied freely; the world owns the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// The full Rapier pipeline, stepped at a fixed `dt`.
pub struct PhysicsWorld {
    gravity: NaVec,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Gravity is Y-down in pixels/s²; `dt` is the fixed step in seconds.
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;
        Self {
            gravity: to_na(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    fn body_mut(&mut self, handle: PhysicsBody) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.body_handle)
    }
}

impl PhysicsBackend for PhysicsWorld {
    type Handle = PhysicsBody;

    fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let locked = if desc.fixed_rotation {
            LockedAxes::ROTATION_LOCKED
        } else {
            LockedAxes::empty()
        };
        let rb = RigidBodyBuilder::new(rigid_body_type(desc.body_type))
            .translation(to_na(desc.position))
            .linvel(to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(locked)
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .build();

        let body_handle = self.bodies.insert(rb);
        let collider_handle = self.colliders.insert_with_parent(
            collider_for(desc.shape, desc.layer, material),
            body_handle,
            &mut self.bodies,
        );

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    fn destroy_body(&mut self, handle: PhysicsBody) -> bool {
        // Removing the body takes its attached collider with it.
        self.bodies
            .remove(
                handle.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn apply_force(&mut self, handle: PhysicsBody, at: Vec2, force: Vec2) {
        if let Some(rb) = self.body_mut(handle) {
            rb.add_force_at_point(to_na(force), nalgebra::Point2::new(at.x, at.y), true);
        }
    }

    fn set_velocity(&mut self, handle: PhysicsBody, velocity: Vec2) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_linvel(to_na(velocity), true);
        }
    }

    fn set_position(&mut self, handle: PhysicsBody, position: Vec2) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_translation(to_na(position), true);
        }
    }

    fn set_angle(&mut self, handle: PhysicsBody, angle: f32) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_rotation(nalgebra::UnitComplex::new(angle), true);
        }
    }

    fn set_angular_velocity(&mut self, handle: PhysicsBody, angvel: f32) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_angvel(angvel, true);
        }
    }

    fn read_state(&self, handle: PhysicsBody) -> Option<BodyState> {
        let rb = self.bodies.get(handle.body_handle)?;
        Some(BodyState {
            position: from_na(rb.translation()),
            velocity: from_na(rb.linvel()),
            angle: rb.rotation().angle(),
        })
    }

    fn mass(&self, handle: PhysicsBody) -> f32 {
        // The collider's own mass is valid immediately; the rigid body only
        // aggregates it during the next step.
        if !self.bodies.contains(handle.body_handle) {
            return 0.0;
        }
        self.colliders
            .get(handle.collider_handle)
            .map_or(0.0, |c| c.mass())
    }

    fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        // Rapier keeps user forces until reset; steering re-applies them every tick.
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
