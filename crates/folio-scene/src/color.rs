//! Colour conversion

/// Convert hue (degrees), saturation and lightness to linear RGB in `[0, 1]`
///
/// Hue wraps into `[0, 360)`; saturation and lightness are clamped to `[0, 1]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
    let s = clamp_unit(saturation);
    let l = clamp_unit(lightness);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [clamp_unit(r + m), clamp_unit(g + m), clamp_unit(b + m)]
}

/// Convert `0xRRGGBB` to RGB in `[0, 1]`
#[must_use]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
    [channel(16), channel(8), channel(0)]
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(approx(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(approx(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(approx(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps() {
        assert!(approx(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5)));
        assert!(approx(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5)));
    }

    #[test]
    fn grey_when_unsaturated() {
        assert!(approx(hsl_to_rgb(200.0, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn hex_channels() {
        assert!(approx(rgb_from_hex(0xff_00_80), [1.0, 0.0, 128.0 / 255.0]));
    }
}
