use crate::foundation::core::{Point, Rgba8};
use crate::raster::surface::RasterSurface;

/// 4-connected region fill seeded at `at`.
///
/// The seed pixel's exact premultiplied RGBA is the region color; no tolerance is applied.
/// Uses an explicit stack so large regions cannot overflow the call stack. Returns `true`
/// when any pixel changed.
pub fn flood_fill(surface: &mut RasterSurface, at: Point, color: Rgba8) -> bool {
    let (sx, sy) = (at.x.floor() as i64, at.y.floor() as i64);
    let Some(target) = surface.pixel(sx, sy) else {
        return false;
    };
    let fill = color.to_premul();
    if target == fill {
        return false;
    }

    let mut stack = vec![(sx, sy)];
    while let Some((x, y)) = stack.pop() {
        // Off-surface and already-filled pixels both fail this check.
        if surface.pixel(x, y) != Some(target) {
            continue;
        }
        surface.set_pixel(x, y, fill);
        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/tools/fill.rs"]
mod tests;
