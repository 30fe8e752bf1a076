use crate::foundation::error::{ReelError, ReelResult};
use crate::model::animation::{Animation, AnimationFrameRef, AnimationName};
use crate::model::sprite::{LayerDescriptor, Orientation, SourceRect, SpriteDefinition};
use crate::records::tokens::{TokenCursor, TokenRow, tokenize};

/// Named fields at the head of every layer group.
pub const LAYER_FIELDS: usize = 11;
/// Tokens per layer group in the geometry table; fields past [`LAYER_FIELDS`] are reserved.
pub const DEFAULT_LAYER_STRIDE: usize = 13;
/// Tokens in one animation frame row.
pub const FRAME_FIELDS: usize = 4;

/// Knobs for the geometry-table decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Tokens consumed per layer group. Must be at least [`LAYER_FIELDS`].
    pub layer_stride: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            layer_stride: DEFAULT_LAYER_STRIDE,
        }
    }
}

impl DecodeOptions {
    pub fn validate(&self) -> ReelResult<()> {
        if self.layer_stride < LAYER_FIELDS {
            return Err(ReelError::validation(format!(
                "layer_stride must be >= {LAYER_FIELDS}, got {}",
                self.layer_stride
            )));
        }
        Ok(())
    }
}

/// Decode a whole sprite-geometry table. Definition `index` is the position in decode order.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn decode_sprite_table(text: &str, opts: DecodeOptions) -> ReelResult<Vec<SpriteDefinition>> {
    opts.validate()?;
    tokenize(text)
        .iter()
        .enumerate()
        .map(|(index, row)| decode_sprite_row(row, index, opts))
        .collect()
}

/// Decode one geometry row: `anchor, count, count × layer group`.
pub fn decode_sprite_row(
    row: &TokenRow<'_>,
    index: usize,
    opts: DecodeOptions,
) -> ReelResult<SpriteDefinition> {
    let mut cur = TokenCursor::new(row);
    let anchor = cur.next_int::<i32>("anchor")?;
    let count = cur.next_int::<usize>("layer count")?;

    let needed = count.checked_mul(opts.layer_stride).ok_or_else(|| {
        ReelError::malformed(row.row, format!("layer count {count} is too large"))
    })?;
    if cur.remaining() < needed {
        return Err(ReelError::malformed(
            row.row,
            format!(
                "declared {count} layers ({needed} tokens) but only {} tokens remain",
                cur.remaining()
            ),
        ));
    }
    if cur.remaining() > needed {
        return Err(ReelError::malformed(
            row.row,
            format!(
                "{} trailing tokens after {count} declared layers",
                cur.remaining() - needed
            ),
        ));
    }

    let mut layers = Vec::with_capacity(count);
    for _ in 0..count {
        layers.push(decode_layer(&mut cur, row.row)?);
        cur.skip(opts.layer_stride - LAYER_FIELDS);
    }

    Ok(SpriteDefinition {
        anchor,
        index,
        layers,
    })
}

fn decode_layer(cur: &mut TokenCursor<'_, '_>, row: usize) -> ReelResult<LayerDescriptor> {
    let x_pos = cur.next_int("xPos")?;
    let y_pos = cur.next_int("yPos")?;
    let code = cur.next_int::<i64>("orientation")?;
    let orientation = Orientation::from_code(code)
        .ok_or_else(|| ReelError::malformed(row, format!("orientation code {code} not in 0..=3")))?;
    let blend_mode = cur.next_int("blendMode")?;
    let opacity = cur.next_int::<u8>("opacity")?;
    if opacity > 100 {
        return Err(ReelError::malformed(
            row,
            format!("opacity {opacity} not in 0..=100"),
        ));
    }
    let rotate_degrees = cur.next_int("rotate")?;
    let source_rect = SourceRect {
        x: cur.next_int("imgX")?,
        y: cur.next_int("imgY")?,
        width: cur.next_int("imgWidth")?,
        height: cur.next_int("imgHeight")?,
    };
    let page_id = cur.next_int("pageId")?;

    Ok(LayerDescriptor {
        x_pos,
        y_pos,
        orientation,
        blend_mode,
        opacity,
        rotate_degrees,
        source_rect,
        page_id,
    })
}

/// Decode one frame row: exactly `spriteIndex, offsetX, offsetY, duration`.
pub fn decode_frame_row(row: &TokenRow<'_>) -> ReelResult<AnimationFrameRef> {
    if row.tokens.len() != FRAME_FIELDS {
        return Err(ReelError::malformed(
            row.row,
            format!(
                "frame row needs exactly {FRAME_FIELDS} tokens, got {}",
                row.tokens.len()
            ),
        ));
    }
    let mut cur = TokenCursor::new(row);
    let sprite_index = cur.next_int("spriteIndex")?;
    let offset_x = cur.next_int("offsetX")?;
    let offset_y = cur.next_int("offsetY")?;
    let duration = cur.next_int::<u32>("duration")?;
    if duration == 0 {
        return Err(ReelError::malformed(row.row, "duration must be >= 1"));
    }
    Ok(AnimationFrameRef {
        sprite_index,
        offset_x,
        offset_y,
        duration,
    })
}

/// Decode a per-animation frame table.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn decode_animation_table(name: AnimationName, text: &str) -> ReelResult<Animation> {
    let frames = tokenize(text)
        .iter()
        .map(decode_frame_row)
        .collect::<ReelResult<Vec<_>>>()?;
    Ok(Animation { name, frames })
}

#[cfg(test)]
#[path = "../../tests/unit/records/decode.rs"]
mod tests;
