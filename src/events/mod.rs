pub mod keyboard;
pub mod pointer;

pub(crate) use keyboard::wire_global_keydown;
pub use pointer::wire_orbit_controls;
