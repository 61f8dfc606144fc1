/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::converter::ConversionOptions;
use crate::images::{FrameBuffer, FrameBufferMut, PackedImage, YuvBiPlanarImageMut};
use crate::internals::ForwardKernel;
use crate::pixel_error::{BufferRole, PixelError};
use crate::pixel_format::PixelFormat;
use crate::yuv_support::{YuvNVOrder, YuvRange, YuvSourceChannels, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Writes 4:2:0 semi-planar output, chroma pairs are stored in `UV_ORDER`.
fn rgbx_to_nv<const ORIGIN_CHANNELS: u8, const UV_ORDER: u8>(
    image: &mut YuvBiPlanarImageMut<'_>,
    src: &PackedImage<'_>,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) {
    let order: YuvNVOrder = UV_ORDER.into();
    let src_chans: YuvSourceChannels = ORIGIN_CHANNELS.into();

    if image.width == 0 || image.height == 0 {
        return;
    }

    const PRECISION: i32 = 13;
    let kernel = ForwardKernel::<PRECISION>::new(src_chans, range, matrix);
    let u_pos = order.get_u_position();
    let v_pos = order.get_v_position();

    let rgba = src.data;
    let rgba_stride = src.stride;
    let y_stride = image.y_stride;
    let uv_stride = image.uv_stride;
    let y_plane = &mut *image.y_plane;
    let uv_plane = &mut *image.uv_plane;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_plane
            .par_chunks_exact_mut(y_stride * 2)
            .zip(uv_plane.par_chunks_exact_mut(uv_stride))
            .zip(rgba.par_chunks_exact(rgba_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_plane
            .chunks_exact_mut(y_stride * 2)
            .zip(uv_plane.chunks_exact_mut(uv_stride))
            .zip(rgba.chunks_exact(rgba_stride * 2));
    }
    iter.for_each(|((y_dst, uv_dst), rgba)| {
        let (y_dst0, y_dst1) = y_dst.split_at_mut(y_stride);
        let (rgba0, rgba1) = rgba.split_at(rgba_stride);
        kernel.row_double(y_dst0, y_dst1, rgba0, rgba1, |x, u, v| {
            uv_dst[x * 2 + u_pos] = u;
            uv_dst[x * 2 + v_pos] = v;
        });
    });

    if image.height & 1 != 0 {
        let y_dst = y_plane.chunks_exact_mut(y_stride * 2).into_remainder();
        let rgba = rgba.chunks_exact(rgba_stride * 2).remainder();
        if let Some(uv_dst) = uv_plane.chunks_exact_mut(uv_stride).last() {
            kernel.row_halved(y_dst, rgba, |x, u, v| {
                uv_dst[x * 2 + u_pos] = u;
                uv_dst[x * 2 + v_pos] = v;
            });
        }
    }
}

fn argb_to_nv_launch<const UV_ORDER: u8>(
    argb: &[u8],
    dst: &mut [u8],
    dst_format: PixelFormat,
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    let source = FrameBuffer::new(argb, PixelFormat::Argb, width, height);
    let packed = source.packed(BufferRole::Input)?;
    let mut target = FrameBufferMut::new(dst, dst_format, width, height);
    let mut bi_planar = target.bi_planar_mut(BufferRole::Output)?;
    rgbx_to_nv::<{ YuvSourceChannels::Bgra as u8 }, UV_ORDER>(
        &mut bi_planar,
        &packed,
        options.range,
        options.matrix,
    );
    Ok(())
}

/// Converts packed ARGB to semi-planar NV12, chroma plane interleaved as U,V.
///
/// # Arguments
///
/// * `argb` - Source bytes in B, G, R, A order, at least `width * height * 4` long.
/// * `dst` - Target NV12 buffer, full Y plane followed by the interleaved chroma plane.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `options` - The YUV range and matrix.
///
pub fn argb_to_nv12(
    argb: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    argb_to_nv_launch::<{ YuvNVOrder::UV as u8 }>(
        argb,
        dst,
        PixelFormat::Nv12,
        width,
        height,
        options,
    )
}

/// Converts packed ARGB to semi-planar NV21, chroma plane interleaved as V,U.
///
/// # Arguments
///
/// * `argb` - Source bytes in B, G, R, A order, at least `width * height * 4` long.
/// * `dst` - Target NV21 buffer, full Y plane followed by the interleaved chroma plane.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `options` - The YUV range and matrix.
///
pub fn argb_to_nv21(
    argb: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    argb_to_nv_launch::<{ YuvNVOrder::VU as u8 }>(
        argb,
        dst,
        PixelFormat::Nv21,
        width,
        height,
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argb_to_i420;
    use rand::Rng;

    #[test]
    fn nv12_matches_i420_planes() {
        let mut rng = rand::rng();
        for (width, height) in [(8usize, 6usize), (5, 3), (1, 2)] {
            let argb: Vec<u8> = (0..width * height * 4).map(|_| rng.random()).collect();
            let size = PixelFormat::I420
                .required_bytes(width as u32, height as u32)
                .unwrap();
            let mut i420 = vec![0u8; size];
            let mut nv12 = vec![0u8; size];
            let mut nv21 = vec![0u8; size];
            let options = ConversionOptions::default();
            argb_to_i420(&argb, &mut i420, width as u32, height as u32, options).unwrap();
            argb_to_nv12(&argb, &mut nv12, width as u32, height as u32, options).unwrap();
            argb_to_nv21(&argb, &mut nv21, width as u32, height as u32, options).unwrap();

            let luma = width * height;
            let chroma = width.div_ceil(2) * height.div_ceil(2);
            assert_eq!(&nv12[..luma], &i420[..luma]);
            assert_eq!(&nv21[..luma], &i420[..luma]);
            for i in 0..chroma {
                let u = i420[luma + i];
                let v = i420[luma + chroma + i];
                assert_eq!((nv12[luma + i * 2], nv12[luma + i * 2 + 1]), (u, v));
                assert_eq!((nv21[luma + i * 2], nv21[luma + i * 2 + 1]), (v, u));
            }
        }
    }

    #[test]
    fn solid_color_gives_uniform_nv21() {
        let width = 6usize;
        let height = 4usize;
        // B, G, R, A of an orange tone
        let argb = [40u8, 140, 230, 255].repeat(width * height);
        let mut nv21 = vec![0u8; width * height * 3 / 2];
        argb_to_nv21(
            &argb,
            &mut nv21,
            width as u32,
            height as u32,
            ConversionOptions::default(),
        )
        .unwrap();
        let luma = width * height;
        assert!(nv21[..luma].iter().all(|&y| y == nv21[0]));
        let (v, u) = (nv21[luma], nv21[luma + 1]);
        assert!(v > 128 && u < 128);
        for pair in nv21[luma..].chunks_exact(2) {
            assert_eq!(pair, &[v, u]);
        }
    }

    #[test]
    fn zero_sized_frame_is_a_no_op() {
        let mut nv12: Vec<u8> = Vec::new();
        argb_to_nv12(&[], &mut nv12, 0, 4, ConversionOptions::default()).unwrap();
        argb_to_nv12(&[], &mut nv12, 4, 0, ConversionOptions::default()).unwrap();
    }
}
