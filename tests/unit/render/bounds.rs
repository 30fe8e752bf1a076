use image::Rgba;

use super::*;
use crate::model::animation::{AnimationFrameRef, AnimationName};
use crate::model::sprite::SpriteDefinition;

fn sprite(index: usize, bounds: ContentRect) -> ComposedSprite {
    ComposedSprite {
        definition: SpriteDefinition {
            anchor: 0,
            index,
            layers: Vec::new(),
        },
        image: RgbaImage::new(1, 1),
        bounds,
    }
}

fn rect(left: i64, right: i64, top: i64, bottom: i64) -> ContentRect {
    ContentRect {
        left,
        right,
        top,
        bottom,
    }
}

fn anim(indices: &[usize]) -> Animation {
    Animation {
        name: AnimationName::Idle,
        frames: indices
            .iter()
            .map(|&sprite_index| AnimationFrameRef {
                sprite_index,
                offset_x: 0,
                offset_y: 0,
                duration: 1,
            })
            .collect(),
    }
}

#[test]
fn transparent_image_is_degenerate() {
    let img = RgbaImage::new(8, 5);
    let b = image_bounds(&img);
    assert!(b.is_empty());
    assert!(b.left > b.right);
    assert_eq!(b, rect(8, 0, 5, 0));
    assert_eq!(b.crop_window(), None);
}

#[test]
fn zero_sized_image_is_degenerate() {
    assert!(image_bounds(&RgbaImage::new(0, 0)).is_empty());
}

#[test]
fn single_pixel_bounds_collapse_to_that_pixel() {
    let mut img = RgbaImage::new(10, 10);
    img.put_pixel(3, 7, Rgba([0, 0, 0, 1]));
    let b = image_bounds(&img);
    assert_eq!(b, rect(3, 3, 7, 7));
    assert_eq!((b.width(), b.height()), (0, 0));
    assert_eq!(b.crop_window(), Some((3, 7, 1, 1)));
}

#[test]
fn bounds_ignore_color_of_transparent_pixels() {
    let mut img = RgbaImage::new(6, 6);
    img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
    img.put_pixel(1, 2, Rgba([9, 9, 9, 255]));
    img.put_pixel(4, 3, Rgba([9, 9, 9, 10]));
    assert_eq!(image_bounds(&img), rect(1, 4, 2, 3));
}

#[test]
fn animation_bounds_is_a_union_independent_of_frame_order() {
    let sprites = vec![
        sprite(0, rect(10, 20, 30, 40)),
        sprite(1, rect(5, 12, 35, 50)),
        sprite(2, rect(18, 25, 28, 33)),
    ];
    let forward = animation_bounds(&anim(&[0, 1, 2]), &sprites).unwrap();
    let shuffled = animation_bounds(&anim(&[2, 0, 1, 0]), &sprites).unwrap();
    assert_eq!(forward, rect(5, 25, 28, 50));
    assert_eq!(forward, shuffled);
}

#[test]
fn empty_sprites_do_not_widen_the_union() {
    let sprites = vec![sprite(0, rect(10, 20, 30, 40)), sprite(1, ContentRect::EMPTY)];
    let b = animation_bounds(&anim(&[1, 0]), &sprites).unwrap();
    assert_eq!(b, rect(10, 20, 30, 40));
}

#[test]
fn zero_frames_or_all_empty_is_degenerate() {
    let sprites = vec![sprite(0, rect(8, 0, 8, 0))];
    assert!(animation_bounds(&anim(&[]), &sprites).unwrap().is_empty());
    assert!(animation_bounds(&anim(&[0]), &sprites).unwrap().is_empty());
}

#[test]
fn out_of_range_sprite_index_is_malformed() {
    let sprites = vec![sprite(0, rect(0, 1, 0, 1))];
    let err = animation_bounds(&anim(&[0, 3]), &sprites).unwrap_err();
    assert!(matches!(err, ReelError::MalformedRecord { row: 1, .. }));
}
