//! Rendering module
//!
//! Backend-agnostic: the simulation draws into a `Surface`, hosts turn the
//! recorded calls into pixels.

pub mod frame;
pub mod instance;
pub mod sprite;
pub mod surface;

pub use frame::{draw_frame, draw_health_bar};
pub use instance::{SpriteInstance, instance_bytes, sprite_instances};
pub use sprite::{Sprite, SpriteCache, SpriteKey};
pub use surface::{DrawCommand, DrawList, Rgba, Surface, rgb};
