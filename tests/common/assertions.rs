//! Assertion helpers for tests.

use duotone::Pixel;
use pretty_assertions::assert_eq;
use punkdither::rendering::{decode_png, Frame};
use std::collections::BTreeSet;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Assert bytes are a PNG that decodes, and return the frame
pub fn assert_png(bytes: &[u8]) -> Frame {
    assert!(
        bytes.starts_with(PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes).expect("output PNG should decode")
}

/// Distinct RGB values of a frame
pub fn distinct_colors(frame: &Frame) -> BTreeSet<[u8; 3]> {
    frame
        .data()
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Assert every pixel is exactly `dark` or `bright`
pub fn assert_two_colors(frame: &Frame, dark: Pixel, bright: Pixel) {
    let allowed: BTreeSet<[u8; 3]> = [dark.rgb_bytes(), bright.rgb_bytes()].into();
    let found = distinct_colors(frame);
    assert!(
        found.is_subset(&allowed),
        "Expected only {dark} and {bright}, found {found:?}"
    );
}

/// Assert the alpha channel of `output` equals that of `source`
pub fn assert_alpha_preserved(source: &Frame, output: &Frame) {
    let alpha = |f: &Frame| f.data().chunks_exact(4).map(|px| px[3]).collect::<Vec<_>>();
    assert_eq!(alpha(source), alpha(output), "alpha channel changed");
}
