use image::{RgbaImage, imageops};

use crate::foundation::error::{ReelError, ReelResult};
use crate::model::sprite::{ComposedSprite, LayerDescriptor, SpriteDefinition};
use crate::render::blend::{blend_in_place, scale_alpha_in_place};
use crate::render::bounds::image_bounds;
use crate::render::transform::{apply_orientation, rotate_expand};

pub type Rgba8 = [u8; 4];

/// Side of the square working canvas every sprite is drawn onto.
pub const DEFAULT_CANVAS_SIZE: u32 = 2000;

/// Straight-alpha source-over.
///
/// A transparent destination takes the source unchanged and a transparent source leaves the
/// destination unchanged.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }

    let sa = f32::from(src[3]) / 255.0;
    let dw = f32::from(dst[3]) / 255.0 * (1.0 - sa);
    let a = sa + dw;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * dw) / a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ReelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Renders sprite definitions onto a square canvas whose origin is its center.
///
/// The compositor itself holds no pixels; each [`LayerCompositor::compose`] call owns its canvas,
/// so one compositor can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct LayerCompositor {
    canvas_size: u32,
}

impl Default for LayerCompositor {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl LayerCompositor {
    pub fn new(canvas_size: u32) -> ReelResult<Self> {
        if canvas_size == 0 {
            return Err(ReelError::validation("canvas size must be > 0"));
        }
        Ok(Self { canvas_size })
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Draw every layer of `def` (bottom of the stack first) and measure the result.
    pub fn compose(&self, sheet: &RgbaImage, def: &SpriteDefinition) -> ReelResult<ComposedSprite> {
        let size = self.canvas_size as usize;
        let mut canvas = vec![0u8; size * size * 4];
        let center = i64::from(self.canvas_size / 2);

        for layer in def.layers_in_draw_order() {
            let region = prepare_layer(sheet, layer, def.index)?;
            let (rw, rh) = region.dimensions();
            let left = center + i64::from(layer.x_pos) - i64::from(rw / 2);
            let top = center + i64::from(layer.y_pos) - i64::from(rh / 2);
            blit_over(&mut canvas, self.canvas_size, region.as_raw(), rw, left, top)?;
        }

        let image = RgbaImage::from_raw(self.canvas_size, self.canvas_size, canvas)
            .ok_or_else(|| ReelError::validation("canvas buffer does not match canvas size"))?;
        let bounds = image_bounds(&image);
        tracing::debug!(
            sprite = def.index,
            layers = def.layers.len(),
            empty = bounds.is_empty(),
            "composed sprite"
        );

        Ok(ComposedSprite {
            definition: def.clone(),
            image,
            bounds,
        })
    }
}

/// Crop, blend, flip, rotate and fade one layer's region. Returns straight RGBA8.
fn prepare_layer(
    sheet: &RgbaImage,
    layer: &LayerDescriptor,
    sprite_index: usize,
) -> ReelResult<RgbaImage> {
    let r = layer.source_rect;
    if !r.fits_within(sheet.width(), sheet.height()) {
        return Err(ReelError::malformed(
            sprite_index,
            format!(
                "layer source rect {}x{}+{}+{} exceeds spritesheet {}x{}",
                r.width,
                r.height,
                r.x,
                r.y,
                sheet.width(),
                sheet.height()
            ),
        ));
    }

    let mut region = imageops::crop_imm(sheet, r.x, r.y, r.width, r.height).to_image();
    if layer.blends() {
        blend_in_place(&mut region);
    }
    apply_orientation(&mut region, layer.orientation);
    let mut region = rotate_expand(&region, layer.rotate_degrees.saturating_neg());
    scale_alpha_in_place(&mut region, layer.opacity);
    Ok(region)
}

/// Source-over `src` (straight RGBA8, `src_w` wide) onto `canvas` with its top-left at
/// `(left, top)`, clipping whatever falls outside the canvas.
fn blit_over(
    canvas: &mut [u8],
    canvas_size: u32,
    src: &[u8],
    src_w: u32,
    left: i64,
    top: i64,
) -> ReelResult<()> {
    if src_w == 0 || src.is_empty() {
        return Ok(());
    }
    let size = i64::from(canvas_size);
    let src_stride = src_w as usize * 4;
    let x0 = left.max(0);
    let x1 = (left + i64::from(src_w)).min(size);
    if x0 >= x1 {
        return Ok(());
    }

    for (ry, src_row) in src.chunks_exact(src_stride).enumerate() {
        let cy = top + ry as i64;
        if cy < 0 {
            continue;
        }
        if cy >= size {
            break;
        }
        let dst_start = ((cy * size + x0) * 4) as usize;
        let dst_end = ((cy * size + x1) * 4) as usize;
        let src_start = ((x0 - left) * 4) as usize;
        let src_end = ((x1 - left) * 4) as usize;
        over_in_place(&mut canvas[dst_start..dst_end], &src_row[src_start..src_end])?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
