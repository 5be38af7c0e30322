//! Sprite variants and their cache keys
//!
//! Rotating or scaling an image every frame is expensive for most hosts. Every
//! sprite the core draws is therefore described by a hashable `SpriteKey`:
//! rotation is quantized into fixed angle buckets so a host can build each
//! rotated/flipped/scaled variant once and reuse it from a `SpriteCache`.

use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::ImageHandle;
use crate::normalize_degrees;

/// Width of one rotation bucket (degrees)
pub const ANGLE_BUCKET_DEG: f32 = 5.0;
/// Number of rotation buckets in a full turn
pub const ANGLE_BUCKETS: u16 = (360.0 / ANGLE_BUCKET_DEG) as u16;

/// Quantize a clockwise rotation (degrees) into a bucket index
pub fn angle_bucket(angle_deg: f32) -> u16 {
    let bucket = (normalize_degrees(angle_deg) / ANGLE_BUCKET_DEG).round() as u16;
    bucket % ANGLE_BUCKETS
}

/// Identifies one pre-transformed variant of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey {
    pub image: u32,
    /// Clockwise rotation bucket (see `ANGLE_BUCKET_DEG`)
    pub angle_bucket: u16,
    /// Mirrored top-to-bottom before rotating
    pub flip_y: bool,
    /// Scale in thousandths (1000 = source size)
    pub scale_milli: u32,
}

impl SpriteKey {
    pub fn new(image: &ImageHandle) -> Self {
        Self {
            image: image.id,
            angle_bucket: 0,
            flip_y: false,
            scale_milli: 1000,
        }
    }

    pub fn rotated(mut self, angle_deg: f32) -> Self {
        self.angle_bucket = angle_bucket(angle_deg);
        self
    }

    pub fn flipped(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale_milli = (scale * 1000.0).round().max(0.0) as u32;
        self
    }

    /// Bucket rotation in degrees (clockwise)
    pub fn angle_deg(&self) -> f32 {
        self.angle_bucket as f32 * ANGLE_BUCKET_DEG
    }

    pub fn scale(&self) -> f32 {
        self.scale_milli as f32 / 1000.0
    }
}

/// One sprite placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub key: SpriteKey,
    /// Unrotated source size before `key`'s scale
    pub size: Vec2,
    pub center: Vec2,
    pub alpha: u8,
}

impl Sprite {
    pub fn new(key: SpriteKey, size: Vec2, center: Vec2) -> Self {
        Self {
            key,
            size,
            center,
            alpha: 255,
        }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// On-screen size before rotation
    pub fn scaled_size(&self) -> Vec2 {
        self.size * self.key.scale()
    }
}

/// Host-side cache of transformed sprite variants
#[derive(Debug)]
pub struct SpriteCache<T> {
    entries: HashMap<SpriteKey, T>,
    hits: u64,
    misses: u64,
}

impl<T> Default for SpriteCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> SpriteCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a variant, building it on first use
    pub fn get_or_insert_with<F>(&mut self, key: SpriteKey, build: F) -> &T
    where
        F: FnOnce(&SpriteKey) -> T,
    {
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.entries.entry(key).or_insert_with(|| build(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
