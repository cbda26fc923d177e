//! Sequential blue colormap for the layer bands.
//! Light at the surface, dark at the floor; denser layers read darker.

use refindex_core::math::linspace;

/// Anchor colors of the Blues colormap, evenly spaced over [0, 1].
const BLUES: [[f32; 3]; 9] = [
    [0.969, 0.984, 1.000],
    [0.871, 0.922, 0.969],
    [0.776, 0.859, 0.937],
    [0.620, 0.792, 0.882],
    [0.420, 0.682, 0.839],
    [0.259, 0.573, 0.776],
    [0.129, 0.443, 0.710],
    [0.031, 0.318, 0.612],
    [0.031, 0.188, 0.420],
];

/// Lightest sample used for bands, white is too faint against the background.
pub const BAND_GRADIENT_START: f64 = 0.3;

/// Darkest sample used for bands.
pub const BAND_GRADIENT_END: f64 = 1.0;

/// Sample the colormap at `t`, clamped to [0, 1]. Returns opaque RGBA.
pub fn blues(t: f64) -> [f32; 4] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (BLUES.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    if lo >= BLUES.len() - 1 {
        let [r, g, b] = BLUES[BLUES.len() - 1];
        return [r, g, b, 1.0];
    }
    let frac = (scaled - lo as f64) as f32;
    let a = BLUES[lo];
    let b = BLUES[lo + 1];
    [
        a[0] + (b[0] - a[0]) * frac,
        a[1] + (b[1] - a[1]) * frac,
        a[2] + (b[2] - a[2]) * frac,
        1.0,
    ]
}

/// One color per layer, layer 0 (top) lightest.
pub fn band_colors(n_layers: usize) -> Vec<[f32; 4]> {
    linspace(BAND_GRADIENT_START, BAND_GRADIENT_END, n_layers)
        .into_iter()
        .map(blues)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(color: [f32; 4]) -> f32 {
        0.2126 * color[0] + 0.7152 * color[1] + 0.0722 * color[2]
    }

    #[test]
    fn test_blues_endpoints() {
        assert_eq!(blues(0.0), [0.969, 0.984, 1.000, 1.0]);
        assert_eq!(blues(1.0), [0.031, 0.188, 0.420, 1.0]);
        assert_eq!(blues(-4.0), blues(0.0));
        assert_eq!(blues(7.0), blues(1.0));
    }

    #[test]
    fn test_blues_channels_in_range() {
        for i in 0..=100 {
            let c = blues(i as f64 / 100.0);
            for channel in c {
                assert!((0.0..=1.0).contains(&channel), "{c:?}");
            }
        }
    }

    #[test]
    fn test_band_colors_darken_downward() {
        let colors = band_colors(15);
        assert_eq!(colors.len(), 15);
        for pair in colors.windows(2) {
            assert!(luminance(pair[1]) < luminance(pair[0]));
        }
        assert_eq!(colors[14], blues(1.0));
    }

    #[test]
    fn test_single_band_uses_start() {
        assert_eq!(band_colors(1), vec![blues(BAND_GRADIENT_START)]);
    }
}
