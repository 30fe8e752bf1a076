use image::RgbaImage;

use crate::foundation::error::{ReelError, ReelResult};
use crate::model::animation::Animation;
use crate::model::sprite::ComposedSprite;

/// Tight rectangle around the non-transparent pixels of an image.
///
/// `right` and `bottom` are the coordinates of the last opaque column and row, so a single
/// opaque pixel at `(x, y)` has `left == right == x` and `top == bottom == y`. A rectangle with
/// `left > right` or `top > bottom` is degenerate and means "no content".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentRect {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl ContentRect {
    /// Identity for [`ContentRect::union`]; degenerate on both axes.
    pub const EMPTY: ContentRect = ContentRect {
        left: i64::MAX,
        right: i64::MIN,
        top: i64::MAX,
        bottom: i64::MIN,
    };

    pub fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn union(self, other: ContentRect) -> ContentRect {
        ContentRect {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Pixel window `(x, y, width, height)` covering the rectangle, both edges inclusive.
    ///
    /// Returns `None` for degenerate rectangles and rectangles reaching into negative space.
    pub fn crop_window(&self) -> Option<(u32, u32, u32, u32)> {
        if self.is_empty() {
            return None;
        }
        let x = u32::try_from(self.left).ok()?;
        let y = u32::try_from(self.top).ok()?;
        let w = u32::try_from(self.width().checked_add(1)?).ok()?;
        let h = u32::try_from(self.height().checked_add(1)?).ok()?;
        Some((x, y, w, h))
    }
}

/// Scan every pixel's alpha and return the tight content rectangle.
///
/// Seeds at `left = width, right = 0, top = height, bottom = 0`; an image with no pixel of
/// alpha > 0 therefore comes back degenerate.
pub fn image_bounds(image: &RgbaImage) -> ContentRect {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return ContentRect::EMPTY;
    }

    let mut rect = ContentRect {
        left: i64::from(width),
        right: 0,
        top: i64::from(height),
        bottom: 0,
    };

    let stride = width as usize * 4;
    for (y, row) in image.as_raw().chunks_exact(stride).enumerate() {
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] > 0 {
                let (x, y) = (x as i64, y as i64);
                rect.left = rect.left.min(x);
                rect.right = rect.right.max(x);
                rect.top = rect.top.min(y);
                rect.bottom = rect.bottom.max(y);
            }
        }
    }
    rect
}

/// Union of the bounds of every sprite the animation references.
///
/// Works from each sprite's precomputed `bounds`, never from pixels. Sprites with no content
/// contribute nothing, so the result is degenerate when every referenced sprite is empty or the
/// animation has no frames.
pub fn animation_bounds(
    animation: &Animation,
    sprites: &[ComposedSprite],
) -> ReelResult<ContentRect> {
    let mut rect = ContentRect::EMPTY;
    for (pos, frame) in animation.frames.iter().enumerate() {
        let sprite = sprites.get(frame.sprite_index).ok_or_else(|| {
            ReelError::malformed(
                pos,
                format!(
                    "frame references sprite {} but only {} sprites exist",
                    frame.sprite_index,
                    sprites.len()
                ),
            )
        })?;
        if sprite.bounds.is_empty() {
            tracing::debug!(
                animation = %animation.name,
                sprite = frame.sprite_index,
                "frame references a sprite with no content"
            );
            continue;
        }
        rect = rect.union(sprite.bounds);
    }
    Ok(rect)
}

#[cfg(test)]
#[path = "../../tests/unit/render/bounds.rs"]
mod tests;
