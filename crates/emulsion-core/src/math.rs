//! Scalar and color math helpers shared across the pipeline.

/// Clamps a value to [0, 1].
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` by `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smooth Hermite ramp: 0 below `e0`, 1 above `e1`.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, v: f32) -> f32 {
    if e0 >= e1 {
        return if v < e0 { 0.0 } else { 1.0 };
    }
    let t = ((v - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Rec.709 relative luminance of a normalized RGB triple.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Converts HSV to RGB.
///
/// Hue is in degrees (wrapped into [0, 360)), saturation and value in
/// [0, 1]. Standard sector decomposition.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let s = clamp01(s);
    let v = clamp01(v);
    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as i32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_endpoints() {
        assert_relative_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_relative_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn smoothstep_saturates() {
        assert_relative_eq!(smoothstep(0.2, 0.8, 0.0), 0.0);
        assert_relative_eq!(smoothstep(0.2, 0.8, 1.0), 1.0);
        assert_relative_eq!(smoothstep(0.2, 0.8, 0.5), 0.5);
    }

    #[test]
    fn luminance_weights_sum_to_one() {
        assert_relative_eq!(luminance(1.0, 1.0, 1.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn hsv_primaries() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_relative_eq!(red[0], 1.0);
        assert_relative_eq!(red[1], 0.0);
        assert_relative_eq!(red[2], 0.0);

        let green = hsv_to_rgb(120.0, 1.0, 1.0);
        assert_relative_eq!(green[1], 1.0);

        let blue = hsv_to_rgb(240.0, 1.0, 1.0);
        assert_relative_eq!(blue[2], 1.0);
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        let gray = hsv_to_rgb(200.0, 0.0, 0.6);
        assert_relative_eq!(gray[0], 0.6);
        assert_relative_eq!(gray[1], 0.6);
        assert_relative_eq!(gray[2], 0.6);
    }

    #[test]
    fn hsv_hue_wraps() {
        let a = hsv_to_rgb(30.0, 0.8, 0.9);
        let b = hsv_to_rgb(390.0, 0.8, 0.9);
        assert_relative_eq!(a[0], b[0], epsilon = 1e-5);
        assert_relative_eq!(a[1], b[1], epsilon = 1e-5);
        assert_relative_eq!(a[2], b[2], epsilon = 1e-5);
    }
}
