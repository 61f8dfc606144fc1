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
use crate::images::{FrameBuffer, FrameBufferMut, PackedImageMut, YuvBiPlanarImage};
use crate::internals::InverseKernel;
use crate::pixel_error::{BufferRole, PixelError};
use crate::pixel_format::PixelFormat;
use crate::yuv_support::{YuvNVOrder, YuvRange, YuvSourceChannels, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Reads 4:2:0 semi-planar input, chroma pairs are stored in `UV_ORDER`.
fn yuv_nv_to_rgbx<const UV_ORDER: u8, const DESTINATION_CHANNELS: u8>(
    image: &YuvBiPlanarImage<'_>,
    dst: &mut PackedImageMut<'_>,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) {
    let order: YuvNVOrder = UV_ORDER.into();
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();

    if image.width == 0 || image.height == 0 {
        return;
    }

    const PRECISION: i32 = 12;
    let kernel = InverseKernel::<PRECISION>::new(dst_chans, range, matrix);
    let u_pos = order.get_u_position();
    let v_pos = order.get_v_position();

    let rgba_stride = dst.stride;
    let y_stride = image.y_stride;
    let uv_stride = image.uv_stride;
    let uv_plane = image.uv_plane;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst
            .data
            .par_chunks_exact_mut(rgba_stride)
            .zip(image.y_plane.par_chunks_exact(y_stride))
            .enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst
            .data
            .chunks_exact_mut(rgba_stride)
            .zip(image.y_plane.chunks_exact(y_stride))
            .enumerate();
    }
    iter.for_each(|(y, (rgba, y_src))| {
        let cy = y >> 1;
        let uv_src = &uv_plane[cy * uv_stride..(cy + 1) * uv_stride];
        kernel.row(rgba, y_src, true, |cx| {
            (uv_src[cx * 2 + u_pos], uv_src[cx * 2 + v_pos])
        });
    });
}

fn nv_to_rgb_launch<const UV_ORDER: u8>(
    src: &[u8],
    src_format: PixelFormat,
    rgb: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    let source = FrameBuffer::new(src, src_format, width, height);
    let bi_planar = source.bi_planar(BufferRole::Input)?;
    let mut target = FrameBufferMut::new(rgb, PixelFormat::Rgb, width, height);
    let mut packed = target.packed_mut(BufferRole::Output)?;
    yuv_nv_to_rgbx::<UV_ORDER, { YuvSourceChannels::Rgb as u8 }>(
        &bi_planar,
        &mut packed,
        options.range,
        options.matrix,
    );
    Ok(())
}

/// Converts semi-planar NV12 (interleaved U,V) to packed RGB.
///
/// # Arguments
///
/// * `src` - Source NV12 buffer, Y plane followed by the interleaved chroma plane.
/// * `rgb` - Target RGB buffer, at least `width * height * 3` long.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `options` - The YUV range and matrix the source was encoded with.
///
pub fn nv12_to_rgb(
    src: &[u8],
    rgb: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    nv_to_rgb_launch::<{ YuvNVOrder::UV as u8 }>(
        src,
        PixelFormat::Nv12,
        rgb,
        width,
        height,
        options,
    )
}

/// Converts semi-planar NV21 (interleaved V,U) to packed RGB.
///
/// # Arguments
///
/// * `src` - Source NV21 buffer, Y plane followed by the interleaved chroma plane.
/// * `rgb` - Target RGB buffer, at least `width * height * 3` long.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
/// * `options` - The YUV range and matrix the source was encoded with.
///
pub fn nv21_to_rgb(
    src: &[u8],
    rgb: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    nv_to_rgb_launch::<{ YuvNVOrder::VU as u8 }>(
        src,
        PixelFormat::Nv21,
        rgb,
        width,
        height,
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i420_to_rgb;
    use rand::Rng;

    fn interleave(u: &[u8], v: &[u8]) -> Vec<u8> {
        u.iter().zip(v.iter()).flat_map(|(&u, &v)| [u, v]).collect()
    }

    #[test]
    fn nv_sources_match_i420() {
        let mut rng = rand::rng();
        let options = ConversionOptions::default();
        for (width, height) in [(6usize, 4usize), (5, 5), (1, 1)] {
            let luma = width * height;
            let chroma = width.div_ceil(2) * height.div_ceil(2);
            let i420: Vec<u8> = (0..luma + chroma * 2).map(|_| rng.random()).collect();
            let (y, planes) = i420.split_at(luma);
            let (u, v) = planes.split_at(chroma);
            let nv12 = [y, interleave(u, v).as_slice()].concat();
            let nv21 = [y, interleave(v, u).as_slice()].concat();

            let mut expected = vec![0u8; luma * 3];
            let mut from_nv12 = vec![0u8; luma * 3];
            let mut from_nv21 = vec![0u8; luma * 3];
            i420_to_rgb(&i420, &mut expected, width as u32, height as u32, options).unwrap();
            nv12_to_rgb(&nv12, &mut from_nv12, width as u32, height as u32, options).unwrap();
            nv21_to_rgb(&nv21, &mut from_nv21, width as u32, height as u32, options).unwrap();
            assert_eq!(expected, from_nv12);
            assert_eq!(expected, from_nv21);
        }
    }

    #[test]
    fn chroma_is_replicated_over_block() {
        // 2x2 gray luma, one strongly red chroma sample
        let nv12 = [100u8, 100, 100, 100, 90, 220];
        let mut rgb = [0u8; 12];
        nv12_to_rgb(&nv12, &mut rgb, 2, 2, ConversionOptions::default()).unwrap();
        for px in rgb.chunks_exact(3) {
            assert_eq!(px, &rgb[0..3]);
        }
        assert!(rgb[0] > rgb[1] && rgb[0] > rgb[2]);
    }

    #[test]
    fn trailing_output_bytes_are_preserved() {
        let nv21 = [128u8; 6];
        let mut rgb = [9u8; 15];
        nv21_to_rgb(&nv21, &mut rgb, 2, 2, ConversionOptions::default()).unwrap();
        assert_eq!(&rgb[..12], &[128u8; 12]);
        assert_eq!(&rgb[12..], &[9u8; 3]);
    }
}
