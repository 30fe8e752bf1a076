use super::*;

fn layer_tokens(fields: [i64; LAYER_FIELDS], stride: usize) -> Vec<String> {
    let mut out: Vec<String> = fields.iter().map(i64::to_string).collect();
    out.resize(stride, "0".to_string());
    out
}

fn sprite_line(anchor: i64, layers: &[[i64; LAYER_FIELDS]], stride: usize) -> String {
    let mut tokens = vec![anchor.to_string(), layers.len().to_string()];
    for l in layers {
        tokens.extend(layer_tokens(*l, stride));
    }
    tokens.join(",")
}

const LAYER_A: [i64; LAYER_FIELDS] = [-12, 30, 1, 0, 80, 45, 4, 8, 16, 24, 0];
const LAYER_B: [i64; LAYER_FIELDS] = [5, -6, 3, 1, 100, -90, 0, 0, 10, 10, 2];

#[test]
fn sprite_row_decodes_every_field() {
    let text = sprite_line(7, &[LAYER_A], DEFAULT_LAYER_STRIDE);
    let defs = decode_sprite_table(&text, DecodeOptions::default()).unwrap();
    assert_eq!(defs.len(), 1);

    let def = &defs[0];
    assert_eq!(def.anchor, 7);
    assert_eq!(def.index, 0);
    let l = &def.layers[0];
    assert_eq!((l.x_pos, l.y_pos), (-12, 30));
    assert_eq!(l.orientation, Orientation::FlipX);
    assert!(!l.blends());
    assert_eq!(l.opacity, 80);
    assert_eq!(l.rotate_degrees, 45);
    assert_eq!(
        l.source_rect,
        SourceRect {
            x: 4,
            y: 8,
            width: 16,
            height: 24
        }
    );
    assert_eq!(l.page_id, 0);
}

#[test]
fn layer_count_matches_declared_and_consumes_full_stride() {
    let text = sprite_line(0, &[LAYER_A, LAYER_B, LAYER_A], DEFAULT_LAYER_STRIDE);
    let row = &tokenize(&text)[0];
    assert_eq!(row.tokens.len(), 2 + 3 * DEFAULT_LAYER_STRIDE);

    let def = decode_sprite_row(row, 4, DecodeOptions::default()).unwrap();
    assert_eq!(def.index, 4);
    assert_eq!(def.layers.len(), 3);
    assert_eq!(def.layers[1].orientation, Orientation::FlipBoth);
    assert!(def.layers[1].blends());
    assert_eq!(def.layers[1].page_id, 2);
    assert_eq!(def.layers[2].x_pos, -12);
}

#[test]
fn short_row_is_malformed() {
    let mut text = sprite_line(0, &[LAYER_A, LAYER_B], DEFAULT_LAYER_STRIDE);
    let cut = text.rfind(',').unwrap();
    text.truncate(cut);
    let err = decode_sprite_table(&text, DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, ReelError::MalformedRecord { row: 0, .. }));
}

#[test]
fn trailing_tokens_are_malformed() {
    let text = format!("{},9", sprite_line(0, &[LAYER_A], DEFAULT_LAYER_STRIDE));
    assert!(decode_sprite_table(&text, DecodeOptions::default()).is_err());
}

#[test]
fn eleven_token_stride_is_supported() {
    let opts = DecodeOptions {
        layer_stride: LAYER_FIELDS,
    };
    let text = sprite_line(1, &[LAYER_A, LAYER_B], LAYER_FIELDS);
    let defs = decode_sprite_table(&text, opts).unwrap();
    assert_eq!(defs[0].layers.len(), 2);
    assert_eq!(defs[0].layers[1].source_rect.width, 10);
}

#[test]
fn stride_below_field_count_is_rejected() {
    let opts = DecodeOptions { layer_stride: 10 };
    assert!(matches!(
        decode_sprite_table("0,0", opts),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn value_constraints_are_enforced() {
    let mut bad_opacity = LAYER_A;
    bad_opacity[4] = 101;
    let text = sprite_line(0, &[bad_opacity], DEFAULT_LAYER_STRIDE);
    assert!(decode_sprite_table(&text, DecodeOptions::default()).is_err());

    let mut bad_orientation = LAYER_A;
    bad_orientation[2] = 4;
    let text = sprite_line(0, &[bad_orientation], DEFAULT_LAYER_STRIDE);
    assert!(decode_sprite_table(&text, DecodeOptions::default()).is_err());

    let mut negative_width = LAYER_A;
    negative_width[8] = -1;
    let text = sprite_line(0, &[negative_width], DEFAULT_LAYER_STRIDE);
    assert!(decode_sprite_table(&text, DecodeOptions::default()).is_err());
}

#[test]
fn sprite_indices_follow_decode_order_across_blank_lines() {
    let text = format!(
        "{}\n\n{}\n",
        sprite_line(1, &[LAYER_A], DEFAULT_LAYER_STRIDE),
        sprite_line(2, &[], DEFAULT_LAYER_STRIDE)
    );
    let defs = decode_sprite_table(&text, DecodeOptions::default()).unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!((defs[0].index, defs[0].anchor), (0, 1));
    assert_eq!((defs[1].index, defs[1].anchor), (1, 2));
    assert!(defs[1].layers.is_empty());
}

#[test]
fn frame_rows_decode_with_inert_offsets() {
    let anim = decode_animation_table(AnimationName::Atk, "0,5,-3,2\n1,0,0,1\n").unwrap();
    assert_eq!(anim.name, AnimationName::Atk);
    assert_eq!(
        anim.frames[0],
        AnimationFrameRef {
            sprite_index: 0,
            offset_x: 5,
            offset_y: -3,
            duration: 2
        }
    );
    assert_eq!(anim.frames[1].sprite_index, 1);
}

#[test]
fn frame_row_needs_exactly_four_tokens() {
    assert!(decode_animation_table(AnimationName::Idle, "0,0,0").is_err());
    assert!(decode_animation_table(AnimationName::Idle, "0,0,0,1,9").is_err());
}

#[test]
fn zero_or_negative_duration_is_malformed() {
    let err = decode_animation_table(AnimationName::Idle, "0,0,0,1\n0,0,0,0").unwrap_err();
    assert!(matches!(err, ReelError::MalformedRecord { row: 1, .. }));
    assert!(decode_animation_table(AnimationName::Idle, "0,0,0,-2").is_err());
}

#[test]
fn empty_interior_field_is_named_instead_of_shifting() {
    let err = decode_animation_table(AnimationName::Idle, "0,,0,1").unwrap_err();
    assert!(matches!(err, ReelError::MalformedRecord { row: 0, .. }));
    assert!(err.to_string().contains("'offsetX' is empty"), "{err}");

    let line = sprite_line(0, &[LAYER_A], DEFAULT_LAYER_STRIDE);
    let mut tokens: Vec<&str> = line.split(',').collect();
    tokens[6] = "";
    let err = decode_sprite_table(&tokens.join(","), DecodeOptions::default()).unwrap_err();
    assert!(err.to_string().contains("'opacity' is empty"), "{err}");
}
