/*
 * // Copyright (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use crate::numerics::{qrshr, qrshr_sum};
use crate::yuv_support::{
    get_forward_transform, get_inverse_transform, get_yuv_range, CbCrForwardTransform,
    CbCrInverseTransform, ToIntegerTransform, YuvRange, YuvSourceChannels, YuvStandardMatrix,
};

/// Fixed point RGB to YCbCr row kernel shared by planar and semi-planar writers.
///
/// Chroma is computed per pixel and then averaged over the subsampling block,
/// blocks cut by an odd frame edge average only the pixels they contain.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ForwardKernel<const PRECISION: i32> {
    transform: CbCrForwardTransform<i32>,
    bias_y: i32,
    bias_uv: i32,
    i_bias_y: i32,
    i_cap_y: i32,
    i_cap_uv: i32,
    channels: YuvSourceChannels,
}

#[derive(Debug, Copy, Clone)]
struct Sample {
    luma: u8,
    cb: i32,
    cr: i32,
}

impl<const PRECISION: i32> ForwardKernel<PRECISION> {
    pub(crate) fn new(
        channels: YuvSourceChannels,
        range: YuvRange,
        matrix: YuvStandardMatrix,
    ) -> Self {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let max_range_p8 = (1u32 << 8u32) - 1;
        let transform = get_forward_transform(
            max_range_p8,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )
        .to_integers(PRECISION as u32);
        let rounding_const_bias: i32 = (1 << (PRECISION - 1)) - 1;
        let i_bias_y = chroma_range.bias_y as i32;
        ForwardKernel {
            transform,
            bias_y: chroma_range.bias_y as i32 * (1 << PRECISION) + rounding_const_bias,
            bias_uv: chroma_range.bias_uv as i32 * (1 << PRECISION) + rounding_const_bias,
            i_bias_y,
            i_cap_y: chroma_range.range_y as i32 + i_bias_y,
            i_cap_uv: chroma_range.range_uv as i32 + i_bias_y,
            channels,
        }
    }

    #[inline(always)]
    fn sample(&self, px: &[u8]) -> Sample {
        let r = px[self.channels.get_r_channel_offset()] as i32;
        let g = px[self.channels.get_g_channel_offset()] as i32;
        let b = px[self.channels.get_b_channel_offset()] as i32;
        let t = &self.transform;
        let y = (r * t.yr + g * t.yg + b * t.yb + self.bias_y) >> PRECISION;
        Sample {
            luma: y.max(self.i_bias_y).min(self.i_cap_y) as u8,
            cb: r * t.cb_r + g * t.cb_g + b * t.cb_b,
            cr: r * t.cr_r + g * t.cr_g + b * t.cr_b,
        }
    }

    /// Finishes a chroma sum of `1 << count_shift` pixels.
    #[inline(always)]
    fn chroma(&self, acc: i32, count_shift: i32) -> u8 {
        qrshr_sum::<PRECISION>(acc, self.bias_uv, count_shift)
            .max(self.i_bias_y)
            .min(self.i_cap_uv) as u8
    }

    /// 4:4:4 row, `store_uv(index, cb, cr)` receives one chroma pair per pixel.
    pub(crate) fn row_444(
        &self,
        y_dst: &mut [u8],
        rgba: &[u8],
        mut store_uv: impl FnMut(usize, u8, u8),
    ) {
        let channels = self.channels.get_channels_count();
        for (x, (y_dst, px)) in y_dst
            .iter_mut()
            .zip(rgba.chunks_exact(channels))
            .enumerate()
        {
            let s = self.sample(px);
            *y_dst = s.luma;
            store_uv(x, self.chroma(s.cb, 0), self.chroma(s.cr, 0));
        }
    }

    /// Horizontally halved row, one chroma pair per two pixels.
    pub(crate) fn row_halved(
        &self,
        y_dst: &mut [u8],
        rgba: &[u8],
        mut store_uv: impl FnMut(usize, u8, u8),
    ) {
        let channels = self.channels.get_channels_count();
        let mut y_iter = y_dst.chunks_exact_mut(2);
        let mut rgba_iter = rgba.chunks_exact(channels * 2);
        let mut ux = 0usize;
        for (y_dst, px) in y_iter.by_ref().zip(rgba_iter.by_ref()) {
            let s0 = self.sample(&px[..channels]);
            let s1 = self.sample(&px[channels..]);
            y_dst[0] = s0.luma;
            y_dst[1] = s1.luma;
            store_uv(
                ux,
                self.chroma(s0.cb + s1.cb, 1),
                self.chroma(s0.cr + s1.cr, 1),
            );
            ux += 1;
        }
        let y_rem = y_iter.into_remainder();
        let rgba_rem = rgba_iter.remainder();
        if !y_rem.is_empty() && rgba_rem.len() >= channels {
            let s = self.sample(&rgba_rem[..channels]);
            y_rem[0] = s.luma;
            store_uv(ux, self.chroma(s.cb, 0), self.chroma(s.cr, 0));
        }
    }

    /// Pair of rows sharing one chroma row, one chroma pair per 2x2 block.
    pub(crate) fn row_double(
        &self,
        y_dst0: &mut [u8],
        y_dst1: &mut [u8],
        rgba0: &[u8],
        rgba1: &[u8],
        mut store_uv: impl FnMut(usize, u8, u8),
    ) {
        let channels = self.channels.get_channels_count();
        let mut y_iter0 = y_dst0.chunks_exact_mut(2);
        let mut y_iter1 = y_dst1.chunks_exact_mut(2);
        let mut rgba_iter0 = rgba0.chunks_exact(channels * 2);
        let mut rgba_iter1 = rgba1.chunks_exact(channels * 2);
        let mut ux = 0usize;
        for (((y_dst0, y_dst1), px0), px1) in y_iter0
            .by_ref()
            .zip(y_iter1.by_ref())
            .zip(rgba_iter0.by_ref())
            .zip(rgba_iter1.by_ref())
        {
            let s00 = self.sample(&px0[..channels]);
            let s01 = self.sample(&px0[channels..]);
            let s10 = self.sample(&px1[..channels]);
            let s11 = self.sample(&px1[channels..]);
            y_dst0[0] = s00.luma;
            y_dst0[1] = s01.luma;
            y_dst1[0] = s10.luma;
            y_dst1[1] = s11.luma;
            store_uv(
                ux,
                self.chroma(s00.cb + s01.cb + s10.cb + s11.cb, 2),
                self.chroma(s00.cr + s01.cr + s10.cr + s11.cr, 2),
            );
            ux += 1;
        }
        let y_rem0 = y_iter0.into_remainder();
        let y_rem1 = y_iter1.into_remainder();
        let rgba_rem0 = rgba_iter0.remainder();
        let rgba_rem1 = rgba_iter1.remainder();
        if !y_rem0.is_empty() && !y_rem1.is_empty() && rgba_rem0.len() >= channels {
            let s0 = self.sample(&rgba_rem0[..channels]);
            let s1 = self.sample(&rgba_rem1[..channels]);
            y_rem0[0] = s0.luma;
            y_rem1[0] = s1.luma;
            store_uv(
                ux,
                self.chroma(s0.cb + s1.cb, 1),
                self.chroma(s0.cr + s1.cr, 1),
            );
        }
    }
}

/// Fixed point YCbCr to RGB row kernel, chroma is upsampled by replication.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InverseKernel<const PRECISION: i32> {
    transform: CbCrInverseTransform<i32>,
    bias_y: i32,
    bias_uv: i32,
    channels: YuvSourceChannels,
}

impl<const PRECISION: i32> InverseKernel<PRECISION> {
    pub(crate) fn new(
        channels: YuvSourceChannels,
        range: YuvRange,
        matrix: YuvStandardMatrix,
    ) -> Self {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let transform = get_inverse_transform(
            255,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )
        .to_integers(PRECISION as u32);
        InverseKernel {
            transform,
            bias_y: chroma_range.bias_y as i32,
            bias_uv: chroma_range.bias_uv as i32,
            channels,
        }
    }

    #[inline(always)]
    fn store(&self, dst: &mut [u8], y_src: u8, u_src: u8, v_src: u8) {
        let t = &self.transform;
        let y_value = (y_src as i32 - self.bias_y) * t.y_coef;
        let cb_value = u_src as i32 - self.bias_uv;
        let cr_value = v_src as i32 - self.bias_uv;

        let r = qrshr::<PRECISION, 8>(y_value + t.cr_coef * cr_value);
        let b = qrshr::<PRECISION, 8>(y_value + t.cb_coef * cb_value);
        let g = qrshr::<PRECISION, 8>(y_value - t.g_coeff_1 * cr_value - t.g_coeff_2 * cb_value);

        dst[self.channels.get_r_channel_offset()] = r as u8;
        dst[self.channels.get_g_channel_offset()] = g as u8;
        dst[self.channels.get_b_channel_offset()] = b as u8;
        if self.channels.has_alpha() {
            dst[self.channels.get_a_channel_offset()] = 255;
        }
    }

    /// Converts one row, `chroma(cx)` returns the (U, V) pair of chroma column `cx`.
    ///
    /// When `halved` is set every chroma column covers two luma samples.
    pub(crate) fn row(
        &self,
        rgba: &mut [u8],
        y_plane: &[u8],
        halved: bool,
        chroma: impl Fn(usize) -> (u8, u8),
    ) {
        let channels = self.channels.get_channels_count();
        if !halved {
            for (cx, (dst, &y_src)) in rgba
                .chunks_exact_mut(channels)
                .zip(y_plane.iter())
                .enumerate()
            {
                let (u_src, v_src) = chroma(cx);
                self.store(dst, y_src, u_src, v_src);
            }
            return;
        }

        let mut rgba_iter = rgba.chunks_exact_mut(channels * 2);
        let mut y_iter = y_plane.chunks_exact(2);
        let mut cx = 0usize;
        for (dst, y_src) in rgba_iter.by_ref().zip(y_iter.by_ref()) {
            let (u_src, v_src) = chroma(cx);
            let (dst0, dst1) = dst.split_at_mut(channels);
            self.store(dst0, y_src[0], u_src, v_src);
            self.store(dst1, y_src[1], u_src, v_src);
            cx += 1;
        }
        let dst = rgba_iter.into_remainder();
        if let (Some(&y_src), true) = (y_iter.remainder().first(), dst.len() >= channels) {
            let (u_src, v_src) = chroma(cx);
            self.store(dst, y_src, u_src, v_src);
        }
    }
}
