//! Drawing surface abstraction
//!
//! The core never rasterizes anything. It issues draw calls against a
//! `Surface`; the host implements it on top of its own renderer. `DrawList`
//! records the calls for hosts that batch a frame, and for tests.

use glam::Vec2;

use super::sprite::Sprite;
use crate::sim::Rect;

/// 8-bit RGBA color
pub type Rgba = [u8; 4];

/// Opaque color from RGB
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r, g, b, 255]
}

pub trait Surface {
    /// Clear the whole frame
    fn fill(&mut self, color: Rgba);
    /// Rectangle; `outline` = Some(width) draws only the border
    fn rect(&mut self, rect: Rect, color: Rgba, outline: Option<f32>);
    /// Filled circle (alpha in `color`)
    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn sprite(&mut self, sprite: &Sprite);
    /// Text with its top-left corner at `pos`
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgba),
    Rect {
        rect: Rect,
        color: Rgba,
        outline: Option<f32>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Sprite(Sprite),
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Rgba,
    },
}

/// Surface that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite placements in draw order
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn rect(&mut self, rect: Rect, color: Rgba, outline: Option<f32>) {
        self.commands.push(DrawCommand::Rect { rect, color, outline });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite(*sprite));
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
