/*
 * // Copyright (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use num_traits::AsPrimitive;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl<T> CbCrInverseTransform<T> {
    pub fn new(
        y_coef: T,
        cr_coef: T,
        cb_coef: T,
        g_coeff_1: T,
        g_coeff_2: T,
    ) -> CbCrInverseTransform<T> {
        CbCrInverseTransform {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1,
            g_coeff_2,
        }
    }
}

impl<T: Copy + 'static> CbCrInverseTransform<T> {
    pub fn cast<V: Copy + 'static>(&self) -> CbCrInverseTransform<V>
    where
        T: AsPrimitive<V>,
    {
        CbCrInverseTransform {
            y_coef: self.y_coef.as_(),
            cr_coef: self.cr_coef.as_(),
            cb_coef: self.cb_coef.as_(),
            g_coeff_1: self.g_coeff_1.as_(),
            g_coeff_2: self.g_coeff_2.as_(),
        }
    }
}

impl CbCrInverseTransform<f32> {
    fn scaled(&self, scale: f32) -> CbCrInverseTransform<f32> {
        CbCrInverseTransform {
            y_coef: (self.y_coef * scale).round(),
            cr_coef: (self.cr_coef * scale).round(),
            cb_coef: (self.cb_coef * scale).round(),
            g_coeff_1: (self.g_coeff_1 * scale).round(),
            g_coeff_2: (self.g_coeff_2 * scale).round(),
        }
    }

    /// Integral transformation adds an error not less than 1%
    pub fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        self.scaled((1i32 << precision) as f32).cast::<i32>()
    }
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_inverse_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> CbCrInverseTransform<f32> {
    let range_uv = range_rgba as f32 / range_uv as f32;
    let y_coef = range_rgba as f32 / range_y as f32;
    let cr_coeff = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coeff = (2f32 * (1f32 - kb)) * range_uv;
    let kg = 1.0f32 - kr - kb;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    CbCrInverseTransform::new(y_coef, cr_coeff, cb_coeff, g_coeff_1, g_coeff_2)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

impl<T: Copy + 'static> CbCrForwardTransform<T> {
    pub fn cast<V: Copy + 'static>(&self) -> CbCrForwardTransform<V>
    where
        T: AsPrimitive<V>,
    {
        CbCrForwardTransform {
            yr: self.yr.as_(),
            yg: self.yg.as_(),
            yb: self.yb.as_(),
            cb_r: self.cb_r.as_(),
            cb_g: self.cb_g.as_(),
            cb_b: self.cb_b.as_(),
            cr_r: self.cr_r.as_(),
            cr_g: self.cr_g.as_(),
            cr_b: self.cr_b.as_(),
        }
    }
}

pub trait ToIntegerTransform {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32>;
}

impl ToIntegerTransform for CbCrForwardTransform<f32> {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32> {
        let scale = (1 << precision) as f32;
        CbCrForwardTransform {
            yr: (self.yr * scale).round(),
            yg: (self.yg * scale).round(),
            yb: (self.yb * scale).round(),
            cb_r: (self.cb_r * scale).round(),
            cb_g: (self.cb_g * scale).round(),
            cb_b: (self.cb_b * scale).round(),
            cr_r: (self.cr_r * scale).round(),
            cr_g: (self.cr_g * scale).round(),
            cr_b: (self.cr_b * scale).round(),
        }
        .cast::<i32>()
    }
}

/// Transformation RGB to YUV with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_forward_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> CbCrForwardTransform<f32> {
    let kg = 1.0f32 - kr - kb;

    let yr = kr * range_y as f32 / range_rgba as f32;
    let yg = kg * range_y as f32 / range_rgba as f32;
    let yb = kb * range_y as f32 / range_rgba as f32;

    let cb_r = -0.5f32 * kr / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_g = -0.5f32 * kg / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_b = 0.5f32 * range_uv as f32 / range_rgba as f32;

    let cr_r = 0.5f32 * range_uv as f32 / range_rgba as f32;
    let cr_g = -0.5f32 * kg / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    let cr_b = -0.5f32 * kb / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    CbCrForwardTransform {
        yr,
        yg,
        yb,
        cb_r,
        cb_g,
        cb_b,
        cr_r,
        cr_g,
        cr_b,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
/// Declares YUV range TV (limited) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16, 235], UV ∈ [16, 240]
    Limited,
    /// Full range Y, UV ∈ [0, 255]
    #[default]
    Full,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
}

pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
        },
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
/// Declares standard prebuilt YUV conversion matrices, check [ITU-R](https://www.itu.int/rec/T-REC-H.273/en) information for more info
pub enum YuvStandardMatrix {
    #[default]
    Bt601,
    Bt709,
    Bt2020,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

impl YuvStandardMatrix {
    pub const fn get_kr_kb(self) -> YuvBias {
        match self {
            YuvStandardMatrix::Bt601 => YuvBias {
                kr: 0.299f32,
                kb: 0.114f32,
            },
            YuvStandardMatrix::Bt709 => YuvBias {
                kr: 0.2126f32,
                kb: 0.0722f32,
            },
            YuvStandardMatrix::Bt2020 => YuvBias {
                kr: 0.2627f32,
                kb: 0.0593f32,
            },
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum YuvNVOrder {
    UV = 0,
    VU = 1,
}

impl YuvNVOrder {
    #[inline]
    pub const fn get_u_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 0,
            YuvNVOrder::VU => 1,
        }
    }
    #[inline]
    pub const fn get_v_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 1,
            YuvNVOrder::VU => 0,
        }
    }
}

impl From<u8> for YuvNVOrder {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvNVOrder::UV,
            1 => YuvNVOrder::VU,
            _ => {
                unreachable!("Unknown value {}", value)
            }
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvChromaSubsampling {
    Yuv420 = 0,
    Yuv422 = 1,
    Yuv444 = 2,
}

impl YuvChromaSubsampling {
    /// Chroma plane width in samples for an image `width` luma samples wide.
    #[inline]
    pub const fn chroma_width(&self, width: usize) -> usize {
        match self {
            YuvChromaSubsampling::Yuv420 | YuvChromaSubsampling::Yuv422 => width.div_ceil(2),
            YuvChromaSubsampling::Yuv444 => width,
        }
    }

    /// Chroma plane height in rows for an image `height` luma rows tall.
    #[inline]
    pub const fn chroma_height(&self, height: usize) -> usize {
        match self {
            YuvChromaSubsampling::Yuv420 => height.div_ceil(2),
            YuvChromaSubsampling::Yuv422 | YuvChromaSubsampling::Yuv444 => height,
        }
    }
}

impl From<u8> for YuvChromaSubsampling {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvChromaSubsampling::Yuv420,
            1 => YuvChromaSubsampling::Yuv422,
            2 => YuvChromaSubsampling::Yuv444,
            _ => {
                unreachable!("Unknown value {}", value)
            }
        }
    }
}

/// Memory byte order of a packed pixel.
///
/// `Bgra` is what video libraries call little-endian ARGB: the 32-bit word `0xAARRGGBB`
/// stored as B, G, R, A.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum YuvSourceChannels {
    Rgb = 0,
    Bgra = 1,
}

impl From<u8> for YuvSourceChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvSourceChannels::Rgb,
            1 => YuvSourceChannels::Bgra,
            _ => {
                unreachable!("Unknown value {}", value)
            }
        }
    }
}

impl YuvSourceChannels {
    #[inline(always)]
    pub const fn get_channels_count(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 3,
            YuvSourceChannels::Bgra => 4,
        }
    }

    #[inline(always)]
    pub const fn has_alpha(&self) -> bool {
        match self {
            YuvSourceChannels::Rgb => false,
            YuvSourceChannels::Bgra => true,
        }
    }

    #[inline(always)]
    pub const fn get_r_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 0,
            YuvSourceChannels::Bgra => 2,
        }
    }

    #[inline(always)]
    pub const fn get_g_channel_offset(&self) -> usize {
        1
    }

    #[inline(always)]
    pub const fn get_b_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 2,
            YuvSourceChannels::Bgra => 0,
        }
    }

    #[inline(always)]
    pub const fn get_a_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 0,
            YuvSourceChannels::Bgra => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bt601_full_forward_rows_sum_to_unity() {
        let kr_kb = YuvStandardMatrix::Bt601.get_kr_kb();
        let range = get_yuv_range(8, YuvRange::Full);
        let transform =
            get_forward_transform(255, range.range_y, range.range_uv, kr_kb.kr, kr_kb.kb)
                .to_integers(13);
        assert_eq!(transform.yr + transform.yg + transform.yb, 1 << 13);
        assert_eq!(transform.cb_r + transform.cb_g + transform.cb_b, 0);
        assert_eq!(transform.cr_r + transform.cr_g + transform.cr_b, 0);
    }

    #[test]
    fn bt601_full_inverse_luma_is_identity() {
        let kr_kb = YuvStandardMatrix::Bt601.get_kr_kb();
        let range = get_yuv_range(8, YuvRange::Full);
        let transform =
            get_inverse_transform(255, range.range_y, range.range_uv, kr_kb.kr, kr_kb.kb)
                .to_integers(12);
        assert_eq!(transform.y_coef, 1 << 12);
        assert_eq!(transform.cr_coef, 5743);
        assert_eq!(transform.cb_coef, 7258);
    }

    #[test]
    fn limited_range_biases() {
        let range = get_yuv_range(8, YuvRange::Limited);
        assert_eq!(range.bias_y, 16);
        assert_eq!(range.bias_uv, 128);
        assert_eq!(range.range_y + range.bias_y, 235);
        assert_eq!(range.range_uv + range.bias_y, 240);
    }

    #[test]
    fn chroma_plane_dimensions_round_up() {
        assert_eq!(YuvChromaSubsampling::Yuv420.chroma_width(3), 2);
        assert_eq!(YuvChromaSubsampling::Yuv420.chroma_height(3), 2);
        assert_eq!(YuvChromaSubsampling::Yuv422.chroma_height(3), 3);
        assert_eq!(YuvChromaSubsampling::Yuv444.chroma_width(3), 3);
    }

    #[test]
    fn nv_order_positions() {
        assert_eq!(YuvNVOrder::UV.get_u_position(), 0);
        assert_eq!(YuvNVOrder::VU.get_u_position(), 1);
        assert_eq!(YuvNVOrder::VU.get_v_position(), 0);
    }

    #[test]
    fn integer_transforms_match_rounded_coefficients() {
        let kr_kb = YuvStandardMatrix::Bt709.get_kr_kb();
        let range = get_yuv_range(8, YuvRange::Limited);
        let forward =
            get_forward_transform(255, range.range_y, range.range_uv, kr_kb.kr, kr_kb.kb);
        let integers = forward.to_integers(13);
        let scale = (1 << 13) as f32;
        assert_eq!(integers.cb_g, (forward.cb_g * scale).round() as i32);
        assert!(integers.cb_g < 0);
        assert_eq!(integers.cr_b, (forward.cr_b * scale).round() as i32);

        let inverse =
            get_inverse_transform(255, range.range_y, range.range_uv, kr_kb.kr, kr_kb.kb);
        let wide = inverse.cast::<f64>();
        assert_eq!(wide.g_coeff_1, inverse.g_coeff_1 as f64);
        let narrow = inverse.to_integers(12).cast::<i16>();
        assert_eq!(narrow.y_coef as f32, (inverse.y_coef * 4096.).round());
    }
}
