use image::RgbaImage;

use crate::render::bounds::ContentRect;

/// Mirroring applied to a layer's cropped region, decoded from a 2-bit code
/// (bit 0 = flip X, bit 1 = flip Y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    None,
    FlipX,
    FlipY,
    FlipBoth,
}

impl Orientation {
    /// Decode an orientation code. Returns `None` for codes outside `0..=3`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::FlipX),
            2 => Some(Self::FlipY),
            3 => Some(Self::FlipBoth),
            _ => None,
        }
    }

    pub fn flip_x(self) -> bool {
        matches!(self, Self::FlipX | Self::FlipBoth)
    }

    pub fn flip_y(self) -> bool {
        matches!(self, Self::FlipY | Self::FlipBoth)
    }
}

/// Rectangle in spritesheet pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    /// `true` when the rectangle lies entirely within a `width`×`height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }
}

/// One transform-and-crop instruction within a sprite definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerDescriptor {
    /// Offset of the region's center from the canvas center.
    pub x_pos: i32,
    pub y_pos: i32,
    pub orientation: Orientation,
    /// `0` disables the blend transform; any other value enables it.
    pub blend_mode: i32,
    /// Percentage in `0..=100`.
    pub opacity: u8,
    pub rotate_degrees: i32,
    pub source_rect: SourceRect,
    /// Carried through from the table; the pipeline does not consume it.
    pub page_id: i32,
}

impl LayerDescriptor {
    pub fn blends(&self) -> bool {
        self.blend_mode != 0
    }
}

/// A sprite as decoded from one geometry-table row.
///
/// `layers` keeps decode order. Drawing walks it back to front: the last decoded layer sits at
/// the bottom of the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteDefinition {
    pub anchor: i32,
    /// Position of this definition in decode order.
    pub index: usize,
    pub layers: Vec<LayerDescriptor>,
}

impl SpriteDefinition {
    /// Layers in drawing order (bottom of the stack first).
    pub fn layers_in_draw_order(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter().rev()
    }
}

/// A sprite definition rendered onto its canvas, with the content bounds of that canvas.
#[derive(Clone, Debug)]
pub struct ComposedSprite {
    pub definition: SpriteDefinition,
    /// Straight-alpha RGBA8 canvas.
    pub image: RgbaImage,
    pub bounds: ContentRect,
}

#[cfg(test)]
#[path = "../../tests/unit/model/sprite.rs"]
mod tests;
