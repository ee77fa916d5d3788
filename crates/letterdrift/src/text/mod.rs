pub mod buffer;
pub mod layout;
