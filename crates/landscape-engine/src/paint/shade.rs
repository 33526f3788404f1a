/// Fraction of brightness lost between the left and the right canvas edge.
pub const BRIGHTNESS_FALLOFF: f32 = 0.2;

/// Brightness multiplier at horizontal pixel position `x` on a canvas `width` wide.
///
/// Mirrors the vertex stage: `1 - 0.2 * (x / width)`. The factor is linear in
/// `x`, so evaluating it per pixel gives the same result as interpolating the
/// per-vertex value across a primitive.
#[inline]
pub fn brightness(x: f32, width: f32) -> f32 {
    1.0 - (x / width.max(1.0)) * BRIGHTNESS_FALLOFF
}
