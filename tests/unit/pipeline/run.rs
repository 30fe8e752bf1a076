use image::Rgba;

use super::*;
use crate::model::sprite::{LayerDescriptor, Orientation, SourceRect};

fn sheet() -> RgbaImage {
    RgbaImage::from_fn(40, 10, |x, _| Rgba([(x * 6) as u8, 0, 0, 255]))
}

fn def(index: usize, src_x: u32, x_pos: i32) -> SpriteDefinition {
    SpriteDefinition {
        anchor: 0,
        index,
        layers: vec![LayerDescriptor {
            x_pos,
            y_pos: 0,
            orientation: Orientation::None,
            blend_mode: 0,
            opacity: 100,
            rotate_degrees: (index as i32) * 17,
            source_rect: SourceRect {
                x: src_x,
                y: 0,
                width: 10,
                height: 10,
            },
            page_id: 0,
        }],
    }
}

fn defs() -> Vec<SpriteDefinition> {
    (0..12)
        .map(|i| def(i, (i as u32 % 4) * 10, i as i32 - 6))
        .collect()
}

#[test]
fn parallel_composition_keeps_decode_order() {
    let compositor = LayerCompositor::new(48).unwrap();
    let pool = build_thread_pool(Some(4)).unwrap();
    let defs = defs();

    let parallel = compose_sprites(&sheet(), &defs, &compositor, Some(&pool)).unwrap();
    let sequential = compose_sprites(&sheet(), &defs, &compositor, None).unwrap();

    assert_eq!(parallel.len(), defs.len());
    for (i, (p, s)) in parallel.iter().zip(&sequential).enumerate() {
        assert_eq!(p.definition.index, i);
        assert_eq!(p.definition, defs[i]);
        assert_eq!(p.image, s.image);
        assert_eq!(p.bounds, s.bounds);
    }
}

#[test]
fn one_bad_definition_fails_the_batch() {
    let compositor = LayerCompositor::new(48).unwrap();
    let mut defs = defs();
    defs[5].layers[0].source_rect.x = 35;
    let pool = build_thread_pool(Some(2)).unwrap();
    assert!(compose_sprites(&sheet(), &defs, &compositor, Some(&pool)).is_err());
}

#[test]
fn resolve_animations_rejects_unknown_names() {
    assert_eq!(
        resolve_animations(&["idle", "limit_atk"]).unwrap(),
        vec![AnimationName::Idle, AnimationName::LimitAtk]
    );
    let err = resolve_animations(&["idle", "backflip"]).unwrap_err();
    assert!(matches!(err, ReelError::UnknownAnimation(ref n) if n == "backflip"));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(None).is_ok());
}
