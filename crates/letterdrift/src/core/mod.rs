pub mod backend;
#[cfg(feature = "physics")]
pub mod physics;
pub mod registry;
pub mod rng;
#[cfg(test)]
pub(crate) mod sandbox;
pub mod time;
