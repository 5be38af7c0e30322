//! Image handle registry
//!
//! The host loads images and registers them under logical names. The core never
//! touches pixels: it only needs a stable id to hand back to the `Surface` and
//! the image size for hitboxes and layout.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Logical asset names
pub mod keys {
    pub const GUN: &str = "gun_img";
    pub const BULLET: &str = "bullet_img";
    pub const GRENADE: &str = "grenade_img";
    pub const EXPLOSION: &str = "explosion_img";
    pub const SWORD: &str = "sword_img";
    pub const SLASH: &str = "slash_img";
    pub const PEN: &str = "pen_img";
    pub const PLAYER: &str = "player_img";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("missing asset `{0}`")]
    Missing(String),
}

/// Opaque handle to a host-loaded image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub id: u32,
    /// Pixel size after the host's load-time scaling
    pub size: Vec2,
}

impl ImageHandle {
    pub const fn new(id: u32, width: f32, height: f32) -> Self {
        Self {
            id,
            size: Vec2::new(width, height),
        }
    }
}

/// Keyed mapping from logical names to image handles
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    images: HashMap<String, ImageHandle>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle with every standard key at its standard size, ids assigned in order.
    ///
    /// Used by headless runs and tests where no real images exist.
    pub fn with_standard_sizes() -> Self {
        let mut bundle = Self::new();
        let entries = [
            (keys::GUN, GUN_SIZE, GUN_SIZE),
            (keys::BULLET, BULLET_SIZE, BULLET_SIZE),
            (keys::GRENADE, GRENADE_SIZE, GRENADE_SIZE),
            (keys::EXPLOSION, EXPLOSION_SIZE, EXPLOSION_SIZE),
            (keys::SWORD, SWORD_SIZE, SWORD_SIZE),
            (keys::SLASH, SLASH_WIDTH, SLASH_HEIGHT),
            (keys::PEN, PEN_SIZE, PEN_SIZE),
            (keys::PLAYER, PLAYER_SIZE, PLAYER_SIZE),
        ];
        for (id, (name, w, h)) in entries.into_iter().enumerate() {
            bundle.insert(name, ImageHandle::new(id as u32, w, h));
        }
        bundle
    }

    pub fn insert(&mut self, name: &str, handle: ImageHandle) {
        self.images.insert(name.to_string(), handle);
    }

    pub fn get(&self, name: &str) -> Option<ImageHandle> {
        self.images.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<ImageHandle, AssetError> {
        self.get(name).ok_or_else(|| AssetError::Missing(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Typed view of the bundle, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackAssets {
    pub gun: ImageHandle,
    pub bullet: ImageHandle,
    pub grenade: ImageHandle,
    pub explosion: ImageHandle,
    pub sword: ImageHandle,
    pub slash: ImageHandle,
    pub pen: ImageHandle,
    pub player: ImageHandle,
}

impl AttackAssets {
    /// Resolve every required key; the first missing key is an error
    pub fn resolve(bundle: &AssetBundle) -> Result<Self, AssetError> {
        Ok(Self {
            gun: bundle.require(keys::GUN)?,
            bullet: bundle.require(keys::BULLET)?,
            grenade: bundle.require(keys::GRENADE)?,
            explosion: bundle.require(keys::EXPLOSION)?,
            sword: bundle.require(keys::SWORD)?,
            slash: bundle.require(keys::SLASH)?,
            pen: bundle.require(keys::PEN)?,
            player: bundle.require(keys::PLAYER)?,
        })
    }

    /// Standard-size placeholder assets
    pub fn standard() -> Self {
        let bundle = AssetBundle::with_standard_sizes();
        // Every key is present in the standard bundle
        Self {
            gun: bundle.images[keys::GUN],
            bullet: bundle.images[keys::BULLET],
            grenade: bundle.images[keys::GRENADE],
            explosion: bundle.images[keys::EXPLOSION],
            sword: bundle.images[keys::SWORD],
            slash: bundle.images[keys::SLASH],
            pen: bundle.images[keys::PEN],
            player: bundle.images[keys::PLAYER],
        }
    }
}
