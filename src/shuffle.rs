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
use crate::images::{PackedImage, PackedImageMut};
use crate::yuv_support::YuvSourceChannels;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

pub(crate) trait ShuffleConverter<const SRC: u8, const DST: u8> {
    fn convert(&self, src: &[u8], dst: &mut [u8]);
}

#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Rgba8DefaultConverter<const SRC: u8, const DST: u8> {}

impl<const SRC: u8, const DST: u8> ShuffleConverter<SRC, DST> for Rgba8DefaultConverter<SRC, DST> {
    fn convert(&self, src: &[u8], dst: &mut [u8]) {
        let src_channels: YuvSourceChannels = SRC.into();
        let dst_channels: YuvSourceChannels = DST.into();
        for (dst, src) in dst
            .chunks_exact_mut(dst_channels.get_channels_count())
            .zip(src.chunks_exact(src_channels.get_channels_count()))
        {
            dst[dst_channels.get_r_channel_offset()] = src[src_channels.get_r_channel_offset()];
            dst[dst_channels.get_g_channel_offset()] = src[src_channels.get_g_channel_offset()];
            dst[dst_channels.get_b_channel_offset()] = src[src_channels.get_b_channel_offset()];
            if dst_channels.has_alpha() {
                let a = if src_channels.has_alpha() {
                    src[src_channels.get_a_channel_offset()]
                } else {
                    255
                };
                dst[dst_channels.get_a_channel_offset()] = a;
            }
        }
    }
}

/// Reorders channels of a validated packed image into another packed image of equal size.
pub(crate) fn shuffle_image<const SRC: u8, const DST: u8>(
    src: &PackedImage<'_>,
    dst: &mut PackedImageMut<'_>,
) {
    debug_assert_eq!((src.width, src.height), (dst.width, dst.height));
    if dst.width == 0 || dst.height == 0 {
        return;
    }
    let converter = Rgba8DefaultConverter::<SRC, DST>::default();
    let src_stride = src.stride;
    let dst_stride = dst.stride;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst
            .data
            .par_chunks_exact_mut(dst_stride)
            .zip(src.data.par_chunks_exact(src_stride));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst
            .data
            .chunks_exact_mut(dst_stride)
            .zip(src.data.chunks_exact(src_stride));
    }
    iter.for_each(|(dst, src)| {
        converter.convert(src, dst);
    });
}
