use image::{RgbaImage, imageops};
use kurbo::{Affine, Point, Rect};

use crate::model::sprite::Orientation;

/// Mirror `image` in place according to `orientation`.
pub fn apply_orientation(image: &mut RgbaImage, orientation: Orientation) {
    if orientation.flip_x() {
        imageops::flip_horizontal_in_place(image);
    }
    if orientation.flip_y() {
        imageops::flip_vertical_in_place(image);
    }
}

/// Rotate `image` about its center by `degrees`, clockwise on screen (y grows downward).
///
/// The output is sized to the bounding box of the rotated content so no pixel is clipped.
/// Quarter turns are exact; other angles use nearest-neighbour inverse mapping.
pub fn rotate_expand(image: &RgbaImage, degrees: i32) -> RgbaImage {
    match degrees.rem_euclid(360) {
        0 => image.clone(),
        90 => imageops::rotate90(image),
        180 => imageops::rotate180(image),
        270 => imageops::rotate270(image),
        d => rotate_arbitrary(image, f64::from(d)),
    }
}

fn rotate_arbitrary(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return src.clone();
    }
    let (half_sw, half_sh) = (f64::from(sw) / 2.0, f64::from(sh) / 2.0);

    let rot = Affine::rotate(degrees.to_radians());
    let bbox = rot.transform_rect_bbox(Rect::new(-half_sw, -half_sh, half_sw, half_sh));
    // Trim float noise so an exact edge does not grow by a whole pixel.
    let dw = (bbox.width() - 1e-6).ceil().max(1.0) as u32;
    let dh = (bbox.height() - 1e-6).ceil().max(1.0) as u32;
    let (half_dw, half_dh) = (f64::from(dw) / 2.0, f64::from(dh) / 2.0);

    let inv = rot.inverse();
    let mut out = RgbaImage::new(dw, dh);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let p = inv * Point::new(f64::from(x) + 0.5 - half_dw, f64::from(y) + 0.5 - half_dh);
        let (sx, sy) = ((p.x + half_sw).floor(), (p.y + half_sh).floor());
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(sw) || sy >= f64::from(sh) {
            continue;
        }
        *px = *src.get_pixel(sx as u32, sy as u32);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;
