use image::RgbaImage;

/// Brightness-as-alpha transform used by layers with a non-zero blend mode.
///
/// For every pixel with alpha > 0, color channels are multiplied by alpha and alpha is replaced
/// by the mean of the original (straight) color channels. Fully transparent pixels are left
/// untouched. All results are floored.
pub fn blend_in_place(image: &mut RgbaImage) {
    for px in image.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            continue;
        }
        let (r, g, b) = (u32::from(px[0]), u32::from(px[1]), u32::from(px[2]));
        px[0] = (r * a / 255) as u8;
        px[1] = (g * a / 255) as u8;
        px[2] = (b * a / 255) as u8;
        px[3] = ((r + g + b) / 3) as u8;
    }
}

/// Multiply every alpha by `opacity / 100`, flooring.
pub fn scale_alpha_in_place(image: &mut RgbaImage, opacity: u8) {
    let opacity = u32::from(opacity.min(100));
    if opacity == 100 {
        return;
    }
    for px in image.chunks_exact_mut(4) {
        px[3] = (u32::from(px[3]) * opacity / 100) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
