pub mod reconcile;
pub mod render;
pub mod spawn;
pub mod steering;
