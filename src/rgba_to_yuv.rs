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
use crate::images::{FrameBuffer, FrameBufferMut, PackedImage, YuvPlanarImageMut};
use crate::internals::ForwardKernel;
use crate::pixel_error::{BufferRole, PixelError};
use crate::pixel_format::PixelFormat;
use crate::yuv_support::{YuvChromaSubsampling, YuvRange, YuvSourceChannels, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn rgbx_to_yuv8<const ORIGIN_CHANNELS: u8, const SAMPLING: u8>(
    image: &mut YuvPlanarImageMut<'_>,
    src: &PackedImage<'_>,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) {
    let chroma_subsampling: YuvChromaSubsampling = SAMPLING.into();
    let src_chans: YuvSourceChannels = ORIGIN_CHANNELS.into();

    if image.width == 0 || image.height == 0 {
        return;
    }

    const PRECISION: i32 = 13;
    let kernel = ForwardKernel::<PRECISION>::new(src_chans, range, matrix);

    let rgba = src.data;
    let rgba_stride = src.stride;
    let y_stride = image.y_stride;
    let u_stride = image.u_stride;
    let v_stride = image.v_stride;
    let y_plane = &mut *image.y_plane;
    let u_plane = &mut *image.u_plane;
    let v_plane = &mut *image.v_plane;

    if chroma_subsampling == YuvChromaSubsampling::Yuv420 {
        let iter;
        #[cfg(feature = "rayon")]
        {
            iter = y_plane
                .par_chunks_exact_mut(y_stride * 2)
                .zip(u_plane.par_chunks_exact_mut(u_stride))
                .zip(v_plane.par_chunks_exact_mut(v_stride))
                .zip(rgba.par_chunks_exact(rgba_stride * 2));
        }
        #[cfg(not(feature = "rayon"))]
        {
            iter = y_plane
                .chunks_exact_mut(y_stride * 2)
                .zip(u_plane.chunks_exact_mut(u_stride))
                .zip(v_plane.chunks_exact_mut(v_stride))
                .zip(rgba.chunks_exact(rgba_stride * 2));
        }
        iter.for_each(|(((y_dst, u_dst), v_dst), rgba)| {
            let (y_dst0, y_dst1) = y_dst.split_at_mut(y_stride);
            let (rgba0, rgba1) = rgba.split_at(rgba_stride);
            kernel.row_double(y_dst0, y_dst1, rgba0, rgba1, |x, u, v| {
                u_dst[x] = u;
                v_dst[x] = v;
            });
        });

        if image.height & 1 != 0 {
            let y_dst = y_plane.chunks_exact_mut(y_stride * 2).into_remainder();
            let rgba = rgba.chunks_exact(rgba_stride * 2).remainder();
            if let (Some(u_dst), Some(v_dst)) = (
                u_plane.chunks_exact_mut(u_stride).last(),
                v_plane.chunks_exact_mut(v_stride).last(),
            ) {
                kernel.row_halved(y_dst, rgba, |x, u, v| {
                    u_dst[x] = u;
                    v_dst[x] = v;
                });
            }
        }
        return;
    }

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_plane
            .par_chunks_exact_mut(y_stride)
            .zip(u_plane.par_chunks_exact_mut(u_stride))
            .zip(v_plane.par_chunks_exact_mut(v_stride))
            .zip(rgba.par_chunks_exact(rgba_stride));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_plane
            .chunks_exact_mut(y_stride)
            .zip(u_plane.chunks_exact_mut(u_stride))
            .zip(v_plane.chunks_exact_mut(v_stride))
            .zip(rgba.chunks_exact(rgba_stride));
    }
    iter.for_each(|(((y_dst, u_dst), v_dst), rgba)| {
        let store_uv = |x: usize, u: u8, v: u8| {
            u_dst[x] = u;
            v_dst[x] = v;
        };
        match chroma_subsampling {
            YuvChromaSubsampling::Yuv444 => kernel.row_444(y_dst, rgba, store_uv),
            _ => kernel.row_halved(y_dst, rgba, store_uv),
        }
    });
}

fn argb_to_yuv_launch<const SAMPLING: u8>(
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
    let mut planar = target.planar_mut(BufferRole::Output)?;
    rgbx_to_yuv8::<{ YuvSourceChannels::Bgra as u8 }, SAMPLING>(
        &mut planar,
        &packed,
        options.range,
        options.matrix,
    );
    Ok(())
}

macro_rules! d_cnv {
    ($method: ident, $sampling: expr, $format: expr, $to_fmt: expr) => {
        #[doc = concat!("Converts packed ARGB to planar ", $to_fmt, ".")]
        ///
        /// `argb` must hold at least `width * height * 4` bytes and `dst` at least
        /// the size reported by [`crate::required_buffer_size`] for the target format.
        /// Both buffers are checked before anything is written.
        pub fn $method(
            argb: &[u8],
            dst: &mut [u8],
            width: u32,
            height: u32,
            options: ConversionOptions,
        ) -> Result<(), PixelError> {
            argb_to_yuv_launch::<{ $sampling as u8 }>(argb, dst, $format, width, height, options)
        }
    };
}

d_cnv!(
    argb_to_i420,
    YuvChromaSubsampling::Yuv420,
    PixelFormat::I420,
    "I420"
);
d_cnv!(
    argb_to_i422,
    YuvChromaSubsampling::Yuv422,
    PixelFormat::I422,
    "I422"
);
d_cnv!(
    argb_to_i444,
    YuvChromaSubsampling::Yuv444,
    PixelFormat::I444,
    "I444"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_error::BufferTooSmall;
    use rand::Rng;

    fn solid_argb(width: usize, height: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
        [b, g, r, 255].repeat(width * height)
    }

    #[test]
    fn white_2x2_to_i420() {
        let argb = solid_argb(2, 2, 255, 255, 255);
        let mut i420 = vec![0u8; 6];
        argb_to_i420(&argb, &mut i420, 2, 2, ConversionOptions::default()).unwrap();
        assert_eq!(i420, [255, 255, 255, 255, 128, 128]);
    }

    #[test]
    fn solid_color_gives_uniform_planes() {
        let mut rng = rand::rng();
        for (width, height) in [(16usize, 16usize), (7, 5), (1, 1), (3, 8)] {
            let (r, g, b) = (rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>());
            let argb = solid_argb(width, height, r, g, b);
            let mut reference_444 = vec![0u8; width * height * 3];
            argb_to_i444(
                &argb,
                &mut reference_444,
                width as u32,
                height as u32,
                ConversionOptions::default(),
            )
            .unwrap();
            let (y, u, v) = (reference_444[0], reference_444[width * height], reference_444[width * height * 2]);
            assert!(reference_444[..width * height].iter().all(|&s| s == y));
            assert!(reference_444[width * height..width * height * 2].iter().all(|&s| s == u));
            assert!(reference_444[width * height * 2..].iter().all(|&s| s == v));

            let chroma_w = width.div_ceil(2);
            for (format, chroma_h) in [
                (PixelFormat::I420, height.div_ceil(2)),
                (PixelFormat::I422, height),
            ] {
                let size = format.required_bytes(width as u32, height as u32).unwrap();
                let mut dst = vec![0u8; size];
                match format {
                    PixelFormat::I420 => argb_to_i420(
                        &argb,
                        &mut dst,
                        width as u32,
                        height as u32,
                        ConversionOptions::default(),
                    ),
                    _ => argb_to_i422(
                        &argb,
                        &mut dst,
                        width as u32,
                        height as u32,
                        ConversionOptions::default(),
                    ),
                }
                .unwrap();
                let luma = width * height;
                let chroma = chroma_w * chroma_h;
                assert!(dst[..luma].iter().all(|&s| s == y), "{} luma", format);
                assert!(dst[luma..luma + chroma].iter().all(|&s| s == u), "{} u", format);
                assert!(dst[luma + chroma..].iter().all(|&s| s == v), "{} v", format);
            }
        }
    }

    #[test]
    fn chroma_is_block_average() {
        // left column red, right column blue, every 2x2 block averages both
        let width = 2usize;
        let height = 2usize;
        let mut argb = Vec::new();
        for _ in 0..height {
            argb.extend_from_slice(&[0, 0, 255, 255]);
            argb.extend_from_slice(&[255, 0, 0, 255]);
        }
        let mut i444 = vec![0u8; width * height * 3];
        argb_to_i444(&argb, &mut i444, 2, 2, ConversionOptions::default()).unwrap();
        let mut i420 = vec![0u8; 6];
        argb_to_i420(&argb, &mut i420, 2, 2, ConversionOptions::default()).unwrap();
        let u_avg = (i444[4] as i32 + i444[5] as i32) as f32 / 2.;
        let v_avg = (i444[8] as i32 + i444[9] as i32) as f32 / 2.;
        assert!((i420[4] as f32 - u_avg).abs() <= 1.);
        assert!((i420[5] as f32 - v_avg).abs() <= 1.);
        assert_eq!(&i420[..4], &i444[..4]);
    }

    #[test]
    fn limited_range_white() {
        let argb = solid_argb(4, 2, 255, 255, 255);
        let mut i422 = vec![0u8; 16];
        argb_to_i422(
            &argb,
            &mut i422,
            4,
            2,
            ConversionOptions {
                range: YuvRange::Limited,
                matrix: YuvStandardMatrix::Bt601,
            },
        )
        .unwrap();
        assert!(i422[..8].iter().all(|&y| y == 235));
        assert!(i422[8..].iter().all(|&c| c == 128));
    }

    #[test]
    fn undersized_output_is_untouched() {
        let argb = solid_argb(4, 4, 10, 20, 30);
        let mut i420 = vec![7u8; 23];
        let err = argb_to_i420(&argb, &mut i420, 4, 4, ConversionOptions::default()).unwrap_err();
        assert_eq!(
            err,
            PixelError::BufferTooSmall(BufferTooSmall {
                role: BufferRole::Output,
                required: 24,
                actual: 23,
            })
        );
        assert!(i420.iter().all(|&v| v == 7));
    }

    #[test]
    fn trailing_output_bytes_are_preserved() {
        let argb = solid_argb(2, 2, 0, 0, 0);
        let mut i444 = vec![9u8; 14];
        argb_to_i444(&argb, &mut i444, 2, 2, ConversionOptions::default()).unwrap();
        assert_eq!(&i444[12..], &[9, 9]);
        assert_eq!(&i444[..4], &[0, 0, 0, 0]);
    }
}
