use serde::Serialize;

use crate::decode::config::ColorFormat;

/// Flattened vertex colors in the configured encoding.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum ColorArray {
    /// Floating point components, `width` per vertex.
    Float(Vec<f32>),
    /// One `0xAARRGGBB` value per vertex.
    Packed(Vec<u32>),
}

impl ColorArray {
    /// Number of values in the array (components for `Float`, vertices for `Packed`).
    pub fn len(&self) -> usize {
        match self {
            ColorArray::Float(v) => v.len(),
            ColorArray::Packed(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[enum_dispatch::enum_dispatch(ColorEncoderImpl)]
pub enum ColorEncoder {
    Float(FloatColors),
    FloatRgba(FloatRgbaColors),
    PackedArgb(PackedArgbColors),
}

impl ColorEncoder {
    pub fn new(format: ColorFormat) -> Self {
        match format {
            ColorFormat::Float => ColorEncoder::Float(FloatColors),
            ColorFormat::FloatRgba => ColorEncoder::FloatRgba(FloatRgbaColors),
            ColorFormat::PackedArgb => ColorEncoder::PackedArgb(PackedArgbColors),
        }
    }
}

#[enum_dispatch::enum_dispatch]
pub trait ColorEncoderImpl {
    /// Encodes color tuples of `width` components (3 or 4) laid out flat.
    fn encode(&self, colors: &[f32], width: usize) -> ColorArray;
}

/// Passes tuples through at their authored width.
pub struct FloatColors;

impl ColorEncoderImpl for FloatColors {
    fn encode(&self, colors: &[f32], _width: usize) -> ColorArray {
        ColorArray::Float(colors.to_vec())
    }
}

/// Widens RGB tuples to RGBA with alpha 1.0.
pub struct FloatRgbaColors;

impl ColorEncoderImpl for FloatRgbaColors {
    fn encode(&self, colors: &[f32], width: usize) -> ColorArray {
        if width == 4 {
            return ColorArray::Float(colors.to_vec());
        }
        let out = colors.chunks_exact(width)
            .flat_map(|c| [c[0], c[1], c[2], 1.0])
            .collect();
        ColorArray::Float(out)
    }
}

/// Packs every tuple into a `u32`. Alpha is always opaque.
pub struct PackedArgbColors;

impl ColorEncoderImpl for PackedArgbColors {
    fn encode(&self, colors: &[f32], width: usize) -> ColorArray {
        let out = colors.chunks_exact(width)
            .map(|c| pack_argb(c[0], c[1], c[2], 1.0))
            .collect();
        ColorArray::Packed(out)
    }
}

/// Scales a [0, 1] component to a byte, rounding to the nearest integer and
/// clamping to [0, 255].
pub fn to_channel(c: f32) -> u8 {
    if c.is_nan() {
        return 0;
    }
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Packs a color as `0xAARRGGBB`.
pub fn pack_argb(r: f32, g: f32, b: f32, a: f32) -> u32 {
    (to_channel(a) as u32) << 24
        | (to_channel(r) as u32) << 16
        | (to_channel(g) as u32) << 8
        | to_channel(b) as u32
}

/// Converts color tuples to `[r, g, b, a]` bytes. RGB tuples get alpha 255.
pub fn to_rgba8(colors: &[f32], width: usize) -> Vec<[u8; 4]> {
    colors.chunks_exact(width)
        .map(|c| {
            let a = if width >= 4 { to_channel(c[3]) } else { 255 };
            [to_channel(c[0]), to_channel(c[1]), to_channel(c[2]), a]
        })
        .collect()
}

/// Re-lays RGB tuples as RGBA so streams of different widths can be concatenated.
pub(crate) fn widen_to_rgba(colors: &[f32], width: usize) -> Vec<f32> {
    if width == 4 {
        return colors.to_vec();
    }
    colors.chunks_exact(width)
        .flat_map(|c| [c[0], c[1], c[2], 1.0])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pack_clamps_each_channel() {
        assert_eq!(pack_argb(1.5, -0.2, 0.5, 1.0), 0xFFFF0080);
        assert_eq!(pack_argb(0.0, 0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn encoders_follow_format() {
        let rgb = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let packed = ColorEncoder::new(ColorFormat::PackedArgb).encode(&rgb, 3);
        assert_eq!(packed, ColorArray::Packed(vec![0xFFFF0000, 0xFF00FF00]));

        let rgba = ColorEncoder::new(ColorFormat::FloatRgba).encode(&rgb, 3);
        assert_eq!(rgba, ColorArray::Float(vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]));

        let float = ColorEncoder::new(ColorFormat::Float).encode(&rgb, 3);
        assert_eq!(float.len(), 6);
    }

    #[test]
    fn rgba8_keeps_authored_alpha() {
        assert_eq!(to_rgba8(&[0.0, 1.0, 0.5, 0.0], 4), vec![[0, 255, 128, 0]]);
        assert_eq!(to_rgba8(&[0.0, 1.0, 0.5], 3), vec![[0, 255, 128, 255]]);
    }

    proptest! {
        #[test]
        fn channels_stay_in_range(r in -10.0f32..10.0, g in -10.0f32..10.0, b in -10.0f32..10.0) {
            let packed = pack_argb(r, g, b, 1.0);
            prop_assert_eq!(packed >> 24, 0xFF);
            let expect = |c: f32| if c <= 0.0 { 0 } else if c >= 1.0 { 255 } else { (c * 255.0).round() as u32 };
            prop_assert_eq!((packed >> 16) & 0xFF, expect(r));
            prop_assert_eq!((packed >> 8) & 0xFF, expect(g));
            prop_assert_eq!(packed & 0xFF, expect(b));
        }
    }
}
