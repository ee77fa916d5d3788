pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod text;

// Re-export key types at crate root for convenience
pub use api::config::{
    ForceTier, LayoutConfig, SceneConfig, SpawnConfig, SteeringConfig, TileConfig, WallConfig,
};
pub use api::error::ConfigError;
pub use api::scene::TypingScene;
pub use api::types::{LetterId, SceneEvent};
pub use components::letter::LetterBody;
pub use core::backend::{
    BodyDesc, BodyState, BodyType, BoxShape, ColliderMaterial, PhysicsBackend,
};
pub use core::registry::BodyRegistry;
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use input::event::InputEvent;
pub use renderer::instance::{GlyphBuffer, GlyphInstance};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use systems::render::build_glyph_buffer;
pub use systems::steering::SteeringField;
pub use text::buffer::TextBuffer;
pub use text::layout::Layout;

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsBody, PhysicsWorld};
