use super::*;
use rand::Rng as _;

#[test]
fn fade_scales_alpha_and_clamps() {
    let c = Rgba8::rgb(10, 20, 30);
    assert_eq!(c.fade(0.5).a, 128);
    assert_eq!(c.fade(2.0).a, 255);
    assert_eq!(c.fade(-1.0).a, 0);
    assert_eq!(c.fade(0.5).r, 10);
}

#[test]
fn premultiplied_matches_alpha() {
    assert_eq!(Rgba8::rgba(255, 255, 255, 0).premultiplied(), [0, 0, 0, 0]);
    assert_eq!(
        Rgba8::rgba(255, 128, 0, 255).premultiplied(),
        [255, 128, 0, 255]
    );
    assert_eq!(Rgba8::rgba(255, 0, 0, 128).premultiplied()[0], 128);
}

#[test]
fn css_formats_alpha_as_fraction() {
    assert_eq!(Rgba8::rgba(1, 2, 3, 255).css(), "rgba(1,2,3,1.000)");
}

#[test]
fn seeded_rng_is_reproducible() {
    let mut a = seeded_rng(7);
    let mut b = seeded_rng(7);
    let xs: Vec<u64> = (0..4).map(|_| a.r#gen()).collect();
    let ys: Vec<u64> = (0..4).map(|_| b.r#gen()).collect();
    assert_eq!(xs, ys);
}
