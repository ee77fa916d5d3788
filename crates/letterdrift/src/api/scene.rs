use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::error::ConfigError;
use crate::api::types::{LetterId, SceneEvent};
use crate::components::letter::LetterBody;
use crate::core::backend::PhysicsBackend;
use crate::core::registry::BodyRegistry;
use crate::core::rng::Rng;
use crate::input::event::{is_supported_glyph, InputEvent};
use crate::systems::reconcile;
use crate::systems::spawn::{launch_velocity, tile_desc, wall_descs};
use crate::systems::steering::{SteeringField, Teleport};
use crate::text::buffer::TextBuffer;
use crate::text::layout::Layout;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsWorld;

/// One typing scene: the text buffer, its letter tiles, and the physics world
/// they live in. Owned by whoever drives the frame loop.
///
/// Every edit reconciles tiles against the buffer before returning, so between
/// calls each live tile sits on a slot holding its own glyph.
pub struct TypingScene<P: PhysicsBackend> {
    config: SceneConfig,
    physics: P,
    buffer: TextBuffer,
    registry: BodyRegistry<P::Handle>,
    layout: Layout,
    steering: SteeringField,
    rng: Rng,
    viewport: Vec2,
    spawn_anchor: Vec2,
    anchor_moved: bool,
    dragging: bool,
    walls: Vec<P::Handle>,
    events: Vec<SceneEvent>,
    next_id: u32,
}

#[cfg(feature = "physics")]
impl TypingScene<PhysicsWorld> {
    /// Scene backed by a Rapier world built from the config's gravity and step.
    pub fn with_rapier(config: SceneConfig) -> Result<Self, ConfigError> {
        let physics = PhysicsWorld::new(config.gravity(), config.fixed_dt);
        Self::new(config, physics)
    }
}

impl<P: PhysicsBackend> TypingScene<P> {
    pub fn new(config: SceneConfig, physics: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let viewport = config.viewport();
        let steering = SteeringField::from_config(&config.steering);
        let mut scene = Self {
            layout: Layout::for_viewport(&config.layout, viewport),
            spawn_anchor: config.spawn.anchor_for(viewport).clamp(Vec2::ZERO, viewport),
            rng: Rng::new(config.seed),
            steering,
            physics,
            buffer: TextBuffer::new(),
            registry: BodyRegistry::new(),
            viewport,
            anchor_moved: false,
            dragging: false,
            walls: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            config,
        };
        scene.build_walls();

        log::info!(
            "typing scene ready: {}x{} viewport, {} columns",
            viewport.x,
            viewport.y,
            scene.layout.columns()
        );
        Ok(scene)
    }

    // -- Editing --

    /// Type `ch` at the cursor: launch a tile from the spawn anchor and splice
    /// the glyph into the buffer. Returns `None` for unsupported glyphs or when
    /// the buffer is full. The buffer is full once the next slot would fall
    /// outside the viewport, or at `max_glyphs`.
    pub fn insert_char(&mut self, ch: char) -> Option<LetterId> {
        if !is_supported_glyph(ch) {
            log::debug!("ignoring unsupported glyph {:?}", ch);
            return None;
        }
        let capacity = self.capacity();
        if self.buffer.len() >= capacity {
            log::warn!("buffer full ({} glyphs), dropping {:?}", capacity, ch);
            return None;
        }

        let velocity = launch_velocity(&self.config.spawn, &mut self.rng);
        let desc = tile_desc(&self.config.tile, self.spawn_anchor, velocity);
        let handle = self.physics.create_body(&desc, self.config.tile.material());

        let id = LetterId(self.next_id);
        self.next_id += 1;
        self.registry
            .push(LetterBody::new(id, ch, handle).with_pos(self.spawn_anchor));
        self.buffer.insert(ch);
        self.emit(SceneEvent::spawned(self.spawn_anchor, ch));
        log::debug!("spawned {:?} as {:?}", ch, id);

        self.reconcile();
        Some(id)
    }

    /// Delete the glyph before the cursor; its tile is despawned by the
    /// reconciliation that follows. `None` at the start of the buffer.
    pub fn delete_backward(&mut self) -> Option<char> {
        let ch = self.buffer.delete_before_cursor()?;
        self.reconcile();
        Some(ch)
    }

    /// Move the cursor, clamped to the buffer. Returns the new cursor.
    pub fn move_cursor(&mut self, delta: isize) -> usize {
        let cursor = self.buffer.move_cursor(delta);
        self.reconcile();
        cursor
    }

    /// Reassign every tile to a buffer index and despawn the leftovers.
    pub fn reconcile(&mut self) {
        let unassigned = reconcile::assign(self.buffer.chars(), self.registry.as_mut_slice());
        for id in unassigned {
            self.despawn(id);
        }
    }

    /// Remove a tile from the registry and the physics world.
    /// Returns `false` if it was already gone.
    pub(crate) fn despawn(&mut self, id: LetterId) -> bool {
        let Some(body) = self.registry.remove(id) else {
            return false;
        };
        self.physics.destroy_body(body.handle);
        self.emit(SceneEvent::despawned(body.pos, body.glyph));
        log::debug!("despawned {:?} ({:?})", body.glyph, id);
        true
    }

    // -- Simulation --

    /// One fixed step: steer, advance physics, then copy poses back to tiles.
    pub fn tick(&mut self) {
        let teleported = self.steering.steer(
            &mut self.physics,
            self.registry.as_slice(),
            &self.layout,
            self.viewport,
            &mut self.rng,
        );
        self.record_teleports(teleported);

        self.physics.step();

        for body in self.registry.iter_mut() {
            if let Some(state) = self.physics.read_state(body.handle) {
                body.pos = state.position;
                body.angle = state.angle;
            }
        }
    }

    // -- Input --

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(ch) => {
                self.insert_char(ch);
            }
            InputEvent::Backspace => {
                self.delete_backward();
            }
            InputEvent::CursorMove(delta) => {
                self.move_cursor(delta);
            }
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Start dragging the spawn anchor if `point` is within grab range.
    pub fn pointer_down(&mut self, point: Vec2) -> bool {
        self.dragging = point.distance(self.spawn_anchor) <= self.config.spawn.grab_radius;
        self.dragging
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        if self.dragging {
            self.spawn_anchor = point.clamp(Vec2::ZERO, self.viewport);
            self.anchor_moved = true;
        }
    }

    pub fn pointer_up(&mut self, point: Vec2) {
        self.pointer_move(point);
        self.dragging = false;
    }

    /// Re-derive everything that depends on the viewport size.
    /// Non-positive or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }

        self.viewport = Vec2::new(width, height);
        self.layout = Layout::for_viewport(&self.config.layout, self.viewport);
        let anchor = if self.anchor_moved {
            self.spawn_anchor
        } else {
            self.config.spawn.anchor_for(self.viewport)
        };
        self.spawn_anchor = anchor.clamp(Vec2::ZERO, self.viewport);

        for handle in self.walls.drain(..) {
            self.physics.destroy_body(handle);
        }
        self.build_walls();

        let recalled = self.steering.recall_strays(
            &mut self.physics,
            self.registry.as_slice(),
            &self.layout,
            self.viewport,
            &mut self.rng,
        );
        self.record_teleports(recalled);

        if self.buffer.len() > self.layout.capacity() {
            log::warn!(
                "{} glyphs no longer fit the {}-slot grid",
                self.buffer.len(),
                self.layout.capacity()
            );
        }
        log::info!(
            "resized to {}x{}, {} columns",
            width,
            height,
            self.layout.columns()
        );
    }

    fn build_walls(&mut self) {
        if !self.config.walls.enabled {
            return;
        }
        let material = self.config.tile.material();
        for desc in wall_descs(&self.config.walls, self.viewport) {
            let handle = self.physics.create_body(&desc, material);
            self.walls.push(handle);
        }
    }

    fn record_teleports(&mut self, teleports: Vec<Teleport>) {
        for t in teleports {
            if let Some(body) = self.registry.get_mut(t.id) {
                body.pos = t.position;
                let glyph = body.glyph;
                log::debug!("teleported stray {:?} ({:?}) home", glyph, t.id);
                self.emit(SceneEvent::teleported(t.position, glyph));
            }
        }
    }

    fn emit(&mut self, event: SceneEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }

    // -- Accessors --

    pub fn text(&self) -> String {
        self.buffer.as_string()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Where the cursor portal is drawn: the slot the next glyph will take.
    pub fn cursor_anchor(&self) -> Vec2 {
        self.layout.position(self.buffer.cursor())
    }

    pub fn spawn_anchor(&self) -> Vec2 {
        self.spawn_anchor
    }

    /// How many glyphs the buffer accepts at the current viewport.
    pub fn capacity(&self) -> usize {
        self.config.max_glyphs.min(self.layout.capacity())
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Live tiles in spawn order.
    pub fn letters(&self) -> &[LetterBody<P::Handle>] {
        self.registry.as_slice()
    }

    pub fn letter(&self, id: LetterId) -> Option<&LetterBody<P::Handle>> {
        self.registry.get(id)
    }

    /// The tile currently standing for buffer index `index`.
    pub fn letter_at(&self, index: usize) -> Option<&LetterBody<P::Handle>> {
        self.registry.at_index(index)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Events raised since the last `clear_frame_data`.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sandbox::SandboxPhysics;

    const WALLS: usize = 4;

    fn scene_with(config: SceneConfig) -> TypingScene<SandboxPhysics> {
        let physics = SandboxPhysics::new(config.gravity(), config.fixed_dt);
        TypingScene::new(config, physics).unwrap()
    }

    fn scene() -> TypingScene<SandboxPhysics> {
        scene_with(SceneConfig::default())
    }

    fn type_str(scene: &mut TypingScene<SandboxPhysics>, s: &str) -> Vec<LetterId> {
        s.chars().filter_map(|c| scene.insert_char(c)).collect()
    }

    fn assert_reconciled(scene: &TypingScene<SandboxPhysics>) {
        let text = scene.buffer().chars();
        let mut seen = vec![false; text.len()];
        for body in scene.letters() {
            let index = body.text_index.expect("live tile without a slot");
            assert_eq!(text[index], body.glyph);
            assert!(!seen[index]);
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s), "slot without a tile");
    }

    #[test]
    fn typing_hi_assigns_in_order() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "Hi");
        assert_eq!(scene.text(), "Hi");
        assert_eq!(scene.letter(ids[0]).unwrap().text_index, Some(0));
        assert_eq!(scene.letter(ids[1]).unwrap().text_index, Some(1));
        assert_eq!(scene.physics().body_count(), WALLS + 2);
        assert_reconciled(&scene);
    }

    #[test]
    fn backspace_despawns_the_deleted_tile() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "Hi");
        let destroys_before = scene.physics().destroy_calls;

        assert_eq!(scene.delete_backward(), Some('i'));
        assert_eq!(scene.text(), "H");
        assert_eq!(scene.letters().len(), 1);
        assert_eq!(scene.letter(ids[0]).unwrap().text_index, Some(0));
        assert!(scene.letter(ids[1]).is_none());
        assert_eq!(scene.physics().body_count(), WALLS + 1);
        assert_eq!(scene.physics().destroy_calls, destroys_before + 1);
        assert!(scene.events().iter().any(|e| e.kind == SceneEvent::DESPAWNED));
    }

    #[test]
    fn duplicates_keep_spawn_order() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "aaa");
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(scene.letter(*id).unwrap().text_index, Some(i));
        }
    }

    #[test]
    fn delete_on_empty_buffer_is_noop() {
        let mut scene = scene();
        assert_eq!(scene.delete_backward(), None);
        assert!(scene.letters().is_empty());
        assert_eq!(scene.physics().body_count(), WALLS);
    }

    #[test]
    fn unsupported_glyph_spawns_nothing() {
        let mut scene = scene();
        assert_eq!(scene.insert_char('\t'), None);
        assert!(scene.letters().is_empty());
        assert_eq!(scene.text(), "");
    }

    #[test]
    fn newline_and_space_get_tiles() {
        let mut scene = scene();
        type_str(&mut scene, "a b\nc");
        assert_eq!(scene.letters().len(), 5);
        assert_reconciled(&scene);
    }

    #[test]
    fn inserts_past_capacity_are_dropped() {
        let mut scene = scene_with(SceneConfig {
            max_glyphs: 3,
            ..SceneConfig::default()
        });
        let ids = type_str(&mut scene, "abcd");
        assert_eq!(ids.len(), 3);
        assert_eq!(scene.text(), "abc");
    }

    #[test]
    fn inserts_stop_at_the_visible_grid() {
        let mut scene = scene();
        assert_eq!(scene.capacity(), 200);
        let ids = type_str(&mut scene, &"x".repeat(205));
        assert_eq!(ids.len(), 200);
        assert_eq!(scene.buffer().len(), 200);

        let viewport = scene.viewport();
        for i in 0..scene.buffer().len() {
            let target = scene.layout().position(i);
            assert!(target.y < viewport.y && target.x < viewport.x, "slot {} off screen", i);
        }
    }

    #[test]
    fn runaway_tile_is_teleported_by_tick() {
        let mut scene = scene();
        let id = scene.insert_char('a').unwrap();
        let handle = scene.letter(id).unwrap().handle;
        scene.physics.set_position(handle, Vec2::new(9000.0, 9000.0));
        scene.clear_frame_data();

        scene.tick();
        let target = scene.layout().position(0);
        let body = scene.letter(id).unwrap();
        let off = body.pos - target;
        assert!(off.x.abs() <= 4.0 && off.y.abs() <= 4.0, "tile at {:?}", body.pos);

        let event = scene.events()[0];
        assert_eq!(event.kind, SceneEvent::TELEPORTED);
        assert_eq!((event.a, event.b), (body.pos.x, body.pos.y));
        assert_eq!(event.c, 'a' as u32 as f32);
    }

    #[test]
    fn shrinking_recalls_tiles_left_outside() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "abc");
        let handle = scene.letter(ids[2]).unwrap().handle;
        scene.physics.set_position(handle, Vec2::new(600.0, 200.0));
        scene.clear_frame_data();

        scene.resize(400.0, 300.0);
        let events: Vec<_> = scene
            .events()
            .iter()
            .filter(|e| e.kind == SceneEvent::TELEPORTED)
            .collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].c, 'c' as u32 as f32);

        let body = scene.letter(ids[2]).unwrap();
        assert!((body.pos - scene.layout().position(2)).length() <= 6.0);
        let state = scene.physics().read_state(handle).unwrap();
        assert_eq!(state.position, body.pos);
        assert_eq!(state.velocity, Vec2::ZERO);
    }

    #[test]
    fn shrinking_below_the_text_parks_the_overflow() {
        let mut scene = scene();
        let text = format!("{}{}", "a".repeat(20), "b".repeat(20));
        let ids = type_str(&mut scene, &text);
        scene.clear_frame_data();

        // One 20-column line fits in 100 px.
        scene.resize(800.0, 100.0);
        assert_eq!(scene.capacity(), 20);
        assert_eq!(scene.insert_char('z'), None);
        assert_eq!(scene.buffer().len(), 40);

        for (i, id) in ids.iter().enumerate() {
            let body = scene.letter(*id).unwrap();
            assert_eq!(body.text_index, Some(i));
            assert!((body.pos - scene.layout().position(i)).length() <= 6.0);
        }

        // Deleting the first line moves the parked 'b' tiles onto visible
        // slots; the next tick brings them in from below the frame.
        scene.move_cursor(-20);
        for _ in 0..20 {
            scene.delete_backward();
        }
        assert_eq!(scene.text(), "b".repeat(20));
        scene.clear_frame_data();
        scene.tick();

        assert_eq!(scene.letters().len(), 20);
        assert_eq!(scene.events().len(), 20);
        for body in scene.letters() {
            assert_eq!(body.glyph, 'b');
            assert!(body.pos.y <= 100.0, "tile {:?} left below the frame", body.id);
        }
    }

    #[test]
    fn insert_at_head_reassigns_everything() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "bc");
        assert_eq!(scene.move_cursor(-5), 0);
        let a = scene.insert_char('a').unwrap();

        assert_eq!(scene.text(), "abc");
        assert_eq!(scene.cursor(), 1);
        assert_eq!(scene.letter(a).unwrap().text_index, Some(0));
        assert_eq!(scene.letter(ids[0]).unwrap().text_index, Some(1));
        assert_eq!(scene.letter(ids[1]).unwrap().text_index, Some(2));
        assert_eq!(scene.letter_at(0).unwrap().id, a);
    }

    #[test]
    fn delete_in_the_middle() {
        let mut scene = scene();
        type_str(&mut scene, "abc");
        scene.move_cursor(-1);
        assert_eq!(scene.delete_backward(), Some('b'));
        assert_eq!(scene.text(), "ac");
        assert_eq!(scene.letters().len(), 2);
        assert_reconciled(&scene);
    }

    #[test]
    fn despawn_is_idempotent() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "x");
        assert!(scene.despawn(ids[0]));
        assert!(!scene.despawn(ids[0]));
        assert_eq!(scene.physics().body_count(), WALLS);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut scene = scene();
        let first = scene.insert_char('a').unwrap();
        scene.delete_backward();
        let second = scene.insert_char('a').unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn cursor_anchor_follows_layout() {
        let mut scene = scene();
        assert_eq!(scene.cursor_anchor(), scene.layout().position(0));
        type_str(&mut scene, "ab");
        assert_eq!(scene.cursor_anchor(), scene.layout().position(2));
    }

    #[test]
    fn handle_input_dispatches_edits() {
        let mut scene = scene();
        for key in ["H", "e", "y", "Backspace", "ArrowLeft", "Enter", "Shift"] {
            if let Some(event) = InputEvent::from_key(key) {
                scene.handle_input(event);
            }
        }
        assert_eq!(scene.text(), "H\ne");
        assert_eq!(scene.cursor(), 2);
        assert_reconciled(&scene);
    }

    #[test]
    fn tiles_fly_home() {
        let mut scene = scene();
        let ids = type_str(&mut scene, "Hi");
        for _ in 0..600 {
            scene.tick();
        }
        for (i, id) in ids.iter().enumerate() {
            let body = scene.letter(*id).unwrap();
            let d = (body.pos - scene.layout().position(i)).length();
            assert!(d < 1.5, "tile {} still {} px away", i, d);
            assert_eq!(body.angle, 0.0);
        }
    }

    #[test]
    fn spawn_events_carry_the_anchor() {
        let mut scene = scene();
        scene.insert_char('Q');
        let anchor = scene.spawn_anchor();
        let event = scene.events()[0];
        assert_eq!(event.kind, SceneEvent::SPAWNED);
        assert_eq!((event.a, event.b), (anchor.x, anchor.y));
        scene.clear_frame_data();
        assert!(scene.events().is_empty());
    }

    #[test]
    fn events_are_capped_per_frame() {
        let mut scene = scene_with(SceneConfig {
            max_events: 2,
            ..SceneConfig::default()
        });
        type_str(&mut scene, "abcd");
        assert_eq!(scene.events().len(), 2);
    }

    #[test]
    fn dragging_moves_the_spawn_anchor() {
        let mut scene = scene();
        let anchor = scene.spawn_anchor();

        assert!(!scene.pointer_down(anchor + Vec2::new(200.0, 0.0)));
        scene.pointer_move(Vec2::new(10.0, 10.0));
        assert_eq!(scene.spawn_anchor(), anchor);

        assert!(scene.pointer_down(anchor + Vec2::new(5.0, 5.0)));
        scene.pointer_move(Vec2::new(120.0, 300.0));
        assert_eq!(scene.spawn_anchor(), Vec2::new(120.0, 300.0));
        scene.pointer_up(Vec2::new(2000.0, 300.0));
        assert!(!scene.is_dragging());
        assert_eq!(scene.spawn_anchor(), Vec2::new(800.0, 300.0));

        let id = scene.insert_char('z').unwrap();
        assert_eq!(scene.letter(id).unwrap().pos, Vec2::new(800.0, 300.0));
    }

    #[test]
    fn resize_rebuilds_layout_and_walls() {
        let mut scene = scene();
        type_str(&mut scene, "abc");
        let destroys = scene.physics().destroy_calls;

        scene.resize(400.0, 300.0);
        assert_eq!(scene.viewport(), Vec2::new(400.0, 300.0));
        assert_eq!(scene.layout().columns(), 8);
        assert_eq!(scene.physics().destroy_calls, destroys + WALLS);
        assert_eq!(scene.physics().body_count(), WALLS + 3);
        assert!((scene.spawn_anchor() - Vec2::new(200.0, 99.0)).length() < 1e-3);
        assert_reconciled(&scene);
    }

    #[test]
    fn resize_clamps_a_dragged_anchor() {
        let mut scene = scene();
        let anchor = scene.spawn_anchor();
        scene.pointer_down(anchor);
        scene.pointer_up(Vec2::new(700.0, 500.0));
        scene.resize(300.0, 200.0);
        assert_eq!(scene.spawn_anchor(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut scene = scene();
        scene.resize(0.0, f32::NAN);
        assert_eq!(scene.viewport(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn walls_can_be_disabled() {
        let mut config = SceneConfig::default();
        config.walls.enabled = false;
        let scene = scene_with(config);
        assert_eq!(scene.physics().body_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SceneConfig::default();
        config.fixed_dt = 0.0;
        let physics = SandboxPhysics::new(Vec2::ZERO, 1.0 / 60.0);
        assert!(TypingScene::new(config, physics).is_err());
    }

    #[test]
    fn same_seed_same_launches() {
        let mut a = scene();
        let mut b = scene();
        type_str(&mut a, "seed");
        type_str(&mut b, "seed");
        for _ in 0..5 {
            a.tick();
            b.tick();
        }
        for (x, y) in a.letters().iter().zip(b.letters()) {
            assert_eq!(x.pos, y.pos);
        }
    }
}
