use numlabel::renderer::pixels::*;

// ── premultiply / unpremultiply ──────────────────────────────────────────────

#[test]
fn zero_alpha_always_yields_transparent_black() {
    for rgb in [0x00_00_00, 0x12_34_56, 0xFF_FF_FF] {
        assert_eq!(unpremultiply(rgb), [0, 0, 0, 0]);
    }
}

#[test]
fn opaque_colours_round_trip_exactly() {
    for c in 0..=255u8 {
        let back = unpremultiply(premultiply([c, 255 - c, c / 2, 255]));
        assert_eq!(back, [c, 255 - c, c / 2, 255]);
    }
}

#[test]
fn high_alpha_round_trip_is_within_one() {
    for a in 128..=255u8 {
        for c in 0..=255u8 {
            let [r, _, _, alpha] = unpremultiply(premultiply([c, 0, 0, a]));
            assert_eq!(alpha, a);
            assert!(
                (r as i32 - c as i32).abs() <= 1,
                "c = {c}, a = {a}: got {r}"
            );
        }
    }
}

#[test]
fn low_alpha_round_trip_error_is_bounded_by_quantisation() {
    // An 8-bit premultiplied channel only has `a + 1` levels, so the
    // recoverable precision shrinks with alpha.
    for a in 1..=255u8 {
        let bound = 127.5 / a as f32 + 1.0;
        for c in 0..=255u8 {
            let [r, ..] = unpremultiply(premultiply([c, 0, 0, a]));
            assert!(
                ((r as f32) - (c as f32)).abs() <= bound,
                "c = {c}, a = {a}: got {r}"
            );
        }
    }
}

#[test]
fn unpremultiply_never_exceeds_255() {
    // Premultiplied channel larger than alpha is malformed but must not wrap.
    assert_eq!(unpremultiply(0x10_FF_FF_FF), [255, 255, 255, 0x10]);
}

// ── unpremultiply_in_place ───────────────────────────────────────────────────

#[test]
fn in_place_reorders_bytes_to_rgba() {
    // ARGB word 0x80_40_20_10 stored little-endian: B, G, R, A.
    let mut data = 0x80_40_20_10u32.to_le_bytes().to_vec();
    unpremultiply_in_place(&mut data, 1, 1, 4);
    assert_eq!(data, vec![127, 63, 31, 128]);
}

#[test]
fn in_place_leaves_row_padding_untouched() {
    let (width, height, stride) = (3usize, 2usize, 16usize);
    let mut data = vec![0xAB; stride * height];
    for y in 0..height {
        for x in 0..width {
            let i = y * stride + x * BYTES_PER_PIXEL;
            data[i..i + 4].copy_from_slice(&0xFF_11_22_33u32.to_le_bytes());
        }
    }

    unpremultiply_in_place(&mut data, width, height, stride);

    for y in 0..height {
        let row = &data[y * stride..(y + 1) * stride];
        for px in row[..width * BYTES_PER_PIXEL].chunks_exact(BYTES_PER_PIXEL) {
            assert_eq!(px, [0x11, 0x22, 0x33, 0xFF]);
        }
        assert!(row[width * BYTES_PER_PIXEL..].iter().all(|&b| b == 0xAB));
    }
}

#[test]
fn in_place_tolerates_short_buffer() {
    // Two full rows are promised but only one and a half are present.
    let mut data = vec![0u8; 12 + 8];
    unpremultiply_in_place(&mut data, 3, 2, 12);
    assert!(data.iter().all(|&b| b == 0));
}

// ── Surface ──────────────────────────────────────────────────────────────────

#[test]
fn surface_conversion_keeps_its_stride() {
    let mut s = Surface::new(5, 3);
    assert_eq!(s.stride(), 32);
    s.set_pixel(4, 2, premultiply([200, 100, 50, 255]));

    let (bytes, stride) = s.into_straight_rgba();
    assert_eq!(stride, 32);
    assert_eq!(bytes.len(), 32 * 3);
    let i = 2 * stride + 4 * BYTES_PER_PIXEL;
    assert_eq!(&bytes[i..i + 4], &[200, 100, 50, 255]);
}

#[test]
fn blending_opaque_over_opaque_replaces() {
    let mut s = Surface::new(2, 2);
    s.blend(0, 0, [0, 0, 0], 255);
    s.blend(0, 0, [10, 20, 30], 255);
    assert_eq!(s.pixel(0, 0).map(unpremultiply), Some([10, 20, 30, 255]));
}

#[test]
fn partial_coverage_accumulates_alpha() {
    let mut s = Surface::new(1, 1);
    s.blend(0, 0, [255, 255, 255], 128);
    s.blend(0, 0, [255, 255, 255], 128);
    let [r, g, b, a] = unpremultiply(s.pixel(0, 0).unwrap());
    assert!(a > 128 && a < 255, "alpha {a}");
    assert!(r >= 254 && g >= 254 && b >= 254, "colour {r} {g} {b}");
}

#[test]
fn in_place_short_stride_is_treated_as_tightly_packed() {
    // Stride of one pixel for a two-pixel row: both pixels of both rows convert.
    let mut data = Vec::new();
    for _ in 0..4 {
        data.extend_from_slice(&0xFF_11_22_33u32.to_le_bytes());
    }
    unpremultiply_in_place(&mut data, 2, 2, 4);
    for px in data.chunks_exact(BYTES_PER_PIXEL) {
        assert_eq!(px, [0x11, 0x22, 0x33, 0xFF]);
    }
}
