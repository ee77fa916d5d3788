use letterdrift::{
    build_glyph_buffer, ConfigError, FixedTimestep, FrameHeader, GlyphBuffer, InputEvent, PhysicsWorld,
    ProtocolLayout, SceneConfig, TypingScene,
};

/// Drives a typing scene from browser callbacks.
///
/// Input is applied as it arrives; `tick` turns frame time into fixed steps
/// and packs the frame buffer the renderer reads from wasm memory.
pub struct SceneRunner {
    scene: TypingScene<PhysicsWorld>,
    timestep: FixedTimestep,
    glyphs: GlyphBuffer,
    layout: ProtocolLayout,
    frame: Vec<f32>,
    frame_counter: u32,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);
        let frame = layout.allocate();
        let scene = TypingScene::with_rapier(config)?;

        Ok(Self {
            scene,
            timestep,
            glyphs: GlyphBuffer::new(),
            layout,
            frame,
            frame_counter: 0,
        })
    }

    /// Build a runner from page-supplied JSON. A config that fails to parse
    /// or validate is logged and replaced by the defaults. A positive
    /// `width`/`height` overrides the configured viewport.
    pub fn from_json(config_json: &str, width: f32, height: f32) -> Result<Self, ConfigError> {
        let mut config = match SceneConfig::from_json(config_json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}; falling back to default config", err);
                SceneConfig::default()
            }
        };
        if width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0 {
            config.viewport = [width, height];
        }
        Self::new(config)
    }

    /// Apply a `KeyboardEvent.key` value. Returns whether the key was used.
    pub fn key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.scene.handle_input(event);
                true
            }
            None => false,
        }
    }

    pub fn input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { .. } = event {
            self.timestep.reset();
        }
        self.scene.handle_input(event);
    }

    /// Run one browser frame: fixed steps, then pack the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.scene.tick();
        }

        build_glyph_buffer(self.scene.letters().iter(), self.scene.layout(), &mut self.glyphs);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        let header = FrameHeader {
            frame_counter: self.frame_counter,
            viewport: self.scene.viewport(),
            cursor_anchor: self.scene.cursor_anchor(),
            spawn_anchor: self.scene.spawn_anchor(),
            cursor_index: self.scene.cursor(),
            text_length: self.scene.buffer().len(),
            dragging: self.scene.is_dragging(),
        };
        self.layout.write_frame(
            &mut self.frame,
            &header,
            &self.glyphs.instances,
            self.scene.events(),
        );

        // Events raised by input since the last frame went out with this one.
        self.scene.clear_frame_data();
    }

    pub fn scene(&self) -> &TypingScene<PhysicsWorld> {
        &self.scene
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn text(&self) -> String {
        self.scene.text()
    }
}
