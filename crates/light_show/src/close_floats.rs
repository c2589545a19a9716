//! Threshold-based float asserts for the color conversions.

#[track_caller]
pub(crate) fn close_floats32(a: f32, b: f32, threshold: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < threshold,
        "{} vs {}, difference {} is greater than threshold {}",
        a,
        b,
        diff,
        threshold
    );
}
