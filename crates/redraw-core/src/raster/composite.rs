//! Per-pixel compositing rules over 8-bit coverage and RGBA values.
//!
//! Coverage is the alpha channel of the paint layer: 0 is untouched,
//! anything above 0 counts as masked when the layer is exported.

/// How a stamp's alpha combines with the coverage already on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeOp {
    /// Paint on top: `a' = a_src + a_dst * (1 - a_src)`.
    SourceOver,
    /// Cut away: `a' = a_dst * (1 - a_src)`, independent of what is drawn.
    DestinationOut,
}

impl CompositeOp {
    pub fn apply(self, dst: u8, src: u8) -> u8 {
        match self {
            Self::SourceOver => source_over(dst, src),
            Self::DestinationOut => destination_out(dst, src),
        }
    }
}

pub fn source_over(dst: u8, src: u8) -> u8 {
    let s = src as u32;
    let d = dst as u32;
    (s + mul_div_255(d, 255 - s)) as u8
}

pub fn destination_out(dst: u8, src: u8) -> u8 {
    mul_div_255(dst as u32, 255 - src as u32) as u8
}

/// Blend a straight-alpha RGBA colour onto an opaque-or-not destination pixel.
pub fn blend_rgba(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let da = dst[3] as u32;
    let out_a = sa + mul_div_255(da, 255 - sa);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let premul = src[c] as u32 * sa + mul_div_255(dst[c] as u32 * da, 255 - sa);
        out[c] = ((premul + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a as u8;
    out
}

/// `round(a * b / 255)` for `a <= 255 * 255` and `b <= 255`.
fn mul_div_255(a: u32, b: u32) -> u32 {
    (a * b + 127) / 255
}
