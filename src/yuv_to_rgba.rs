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
use crate::images::{FrameBuffer, FrameBufferMut, PackedImageMut, YuvPlanarImage};
use crate::internals::InverseKernel;
use crate::pixel_error::{BufferRole, PixelError};
use crate::pixel_format::PixelFormat;
use crate::shuffle::shuffle_image;
use crate::yuv_support::{YuvChromaSubsampling, YuvRange, YuvSourceChannels, YuvStandardMatrix};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn yuv_to_rgbx<const DESTINATION_CHANNELS: u8, const SAMPLING: u8>(
    planar_image: &YuvPlanarImage<'_>,
    dst: &mut PackedImageMut<'_>,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) {
    let chroma_subsampling: YuvChromaSubsampling = SAMPLING.into();
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();

    if planar_image.width == 0 || planar_image.height == 0 {
        return;
    }

    const PRECISION: i32 = 12;
    let kernel = InverseKernel::<PRECISION>::new(dst_chans, range, matrix);
    let halved = chroma_subsampling != YuvChromaSubsampling::Yuv444;

    let rgba_stride = dst.stride;
    let y_stride = planar_image.y_stride;
    let u_stride = planar_image.u_stride;
    let v_stride = planar_image.v_stride;
    let u_plane = planar_image.u_plane;
    let v_plane = planar_image.v_plane;

    let process_row = |y: usize, rgba: &mut [u8], y_plane: &[u8]| {
        let cy = if chroma_subsampling == YuvChromaSubsampling::Yuv420 {
            y >> 1
        } else {
            y
        };
        let u_row = &u_plane[cy * u_stride..(cy + 1) * u_stride];
        let v_row = &v_plane[cy * v_stride..(cy + 1) * v_stride];
        kernel.row(rgba, y_plane, halved, |cx| (u_row[cx], v_row[cx]));
    };

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst
            .data
            .par_chunks_exact_mut(rgba_stride)
            .zip(planar_image.y_plane.par_chunks_exact(y_stride))
            .enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst
            .data
            .chunks_exact_mut(rgba_stride)
            .zip(planar_image.y_plane.chunks_exact(y_stride))
            .enumerate();
    }
    iter.for_each(|(y, (rgba, y_plane))| {
        process_row(y, rgba, y_plane);
    });
}

/// Converts planar YUV straight into the packed RGB destination.
fn yuv_to_rgb_direct<const SAMPLING: u8>(
    src: &[u8],
    src_format: PixelFormat,
    dst: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    let source = FrameBuffer::new(src, src_format, width, height);
    let planar = source.planar(BufferRole::Input)?;
    let mut target = FrameBufferMut::new(dst, PixelFormat::Rgb, width, height);
    let mut rgb = target.packed_mut(BufferRole::Output)?;
    yuv_to_rgbx::<{ YuvSourceChannels::Rgb as u8 }, SAMPLING>(
        &planar,
        &mut rgb,
        options.range,
        options.matrix,
    );
    Ok(())
}

/// Converts planar YUV into an ARGB scratch frame, then drops alpha into packed RGB.
fn yuv_to_rgb_two_step<const SAMPLING: u8>(
    src: &[u8],
    src_format: PixelFormat,
    dst: &mut [u8],
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    let source = FrameBuffer::new(src, src_format, width, height);
    let planar = source.planar(BufferRole::Input)?;
    let mut target = FrameBufferMut::new(dst, PixelFormat::Rgb, width, height);
    let mut rgb = target.packed_mut(BufferRole::Output)?;

    let scratch_size = PixelFormat::Argb.required_bytes(width, height)?;
    let mut scratch = vec![0u8; scratch_size];
    let mut scratch_frame = FrameBufferMut::new(&mut scratch, PixelFormat::Argb, width, height);
    let mut argb = scratch_frame.packed_mut(BufferRole::Output)?;
    yuv_to_rgbx::<{ YuvSourceChannels::Bgra as u8 }, SAMPLING>(
        &planar,
        &mut argb,
        options.range,
        options.matrix,
    );

    let scratch_frame = FrameBuffer::new(&scratch, PixelFormat::Argb, width, height);
    let argb = scratch_frame.packed(BufferRole::Input)?;
    shuffle_image::<{ YuvSourceChannels::Bgra as u8 }, { YuvSourceChannels::Rgb as u8 }>(
        &argb, &mut rgb,
    );
    Ok(())
}

macro_rules! d_cnv {
    ($method: ident, $launcher: ident, $sampling: expr, $yuv_name: expr, $src_format: expr) => {
        #[doc = concat!("Converts ", $yuv_name, " planar YUV to packed RGB (R, G, B byte order).

Chroma is upsampled by replicating each sample across its block.

# Arguments

* `src` - Source ", $yuv_name, " buffer, Y plane followed by the U and V planes.
* `rgb` - Target RGB buffer, at least `width * height * 3` long.
* `width` - Image width in pixels.
* `height` - Image height in pixels.
* `options` - The YUV range and matrix the source was encoded with.
")]
        pub fn $method(
            src: &[u8],
            rgb: &mut [u8],
            width: u32,
            height: u32,
            options: ConversionOptions,
        ) -> Result<(), PixelError> {
            $launcher::<{ $sampling as u8 }>(src, $src_format, rgb, width, height, options)
        }
    };
}

d_cnv!(
    i420_to_rgb,
    yuv_to_rgb_direct,
    YuvChromaSubsampling::Yuv420,
    "I420",
    PixelFormat::I420
);
d_cnv!(
    i422_to_rgb,
    yuv_to_rgb_two_step,
    YuvChromaSubsampling::Yuv422,
    "I422",
    PixelFormat::I422
);
d_cnv!(
    i444_to_rgb,
    yuv_to_rgb_two_step,
    YuvChromaSubsampling::Yuv444,
    "I444",
    PixelFormat::I444
);
