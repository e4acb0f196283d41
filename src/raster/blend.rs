use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

/// How a covered pixel combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint on top (`source-over`).
    #[default]
    SourceOver,
    /// Remove destination alpha where the source covers (`destination-out`).
    DestinationOut,
}

/// Source-over with the source scaled by `coverage` (0..=255).
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255_u8(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), cov);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Destination-out: keeps `dst * (1 - src_alpha * coverage)`.
pub fn destination_out(dst: PremulRgba8, src_alpha: u8, coverage: u8) -> PremulRgba8 {
    let ea = mul_div255_u8(u16::from(src_alpha), u16::from(coverage));
    if ea == 0 {
        return dst;
    }
    let keep = 255u16 - u16::from(ea);
    [
        mul_div255_u8(u16::from(dst[0]), keep),
        mul_div255_u8(u16::from(dst[1]), keep),
        mul_div255_u8(u16::from(dst[2]), keep),
        mul_div255_u8(u16::from(dst[3]), keep),
    ]
}

pub fn blend(dst: PremulRgba8, src: PremulRgba8, coverage: u8, mode: BlendMode) -> PremulRgba8 {
    match mode {
        BlendMode::SourceOver => over(dst, src, coverage),
        BlendMode::DestinationOut => destination_out(dst, src[3], coverage),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
