pub mod actions;
pub mod keyboard;
pub mod mouse;
