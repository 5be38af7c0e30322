//! GPU-ready sprite instances
//!
//! Hosts with an instanced sprite pipeline can upload a recorded frame as a
//! flat `[SpriteInstance]` buffer via `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};

use super::sprite::Sprite;
use super::surface::DrawList;

/// One sprite instance, laid out for a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 2],
    /// On-screen size before rotation
    pub size: [f32; 2],
    /// Clockwise rotation in radians
    pub rotation: f32,
    /// 1.0 = mirrored top-to-bottom
    pub flip_y: f32,
    pub alpha: f32,
    pub image: u32,
}

impl SpriteInstance {
    pub fn from_sprite(sprite: &Sprite) -> Self {
        let size = sprite.scaled_size();
        Self {
            center: sprite.center.to_array(),
            size: size.to_array(),
            rotation: sprite.key.angle_deg().to_radians(),
            flip_y: if sprite.key.flip_y { 1.0 } else { 0.0 },
            alpha: sprite.alpha as f32 / 255.0,
            image: sprite.key.image,
        }
    }
}

/// Pack every sprite of a recorded frame, in draw order
pub fn sprite_instances(list: &DrawList) -> Vec<SpriteInstance> {
    list.sprites().map(SpriteInstance::from_sprite).collect()
}

/// Raw bytes for upload
pub fn instance_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
