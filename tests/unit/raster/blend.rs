use super::*;

#[test]
fn over_coverage_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 255), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn destination_out_full_coverage_clears_pixel() {
    let dst = [255, 255, 255, 255];
    assert_eq!(destination_out(dst, 255, 255), [0, 0, 0, 0]);
}

#[test]
fn destination_out_never_paints() {
    let dst = [0, 0, 0, 0];
    assert_eq!(
        blend(dst, [255, 255, 255, 255], 255, BlendMode::DestinationOut),
        [0, 0, 0, 0]
    );
}

#[test]
fn destination_out_partial_alpha_keeps_remainder() {
    let dst = [200, 100, 0, 200];
    let out = destination_out(dst, 128, 255);
    assert_eq!(out, [100, 50, 0, 100]);
}
