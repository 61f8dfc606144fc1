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
//! In-memory pixel format conversion between packed RGB and planar or semi-planar YUV frames.
//!
//! Supported pairs are ARGB to I420, I422, I444, NV12, NV21 and each of those back to RGB.
//! ARGB is stored B, G, R, A in memory, RGB is stored R, G, B.
mod converter;
mod images;
mod internals;
mod numerics;
mod pixel_error;
mod pixel_format;
mod rgba_to_nv;
mod rgba_to_yuv;
mod shuffle;
mod yuv_nv_to_rgba;
mod yuv_support;
mod yuv_to_rgba;

pub use converter::{
    convert, convert_with_options, is_conversion_supported, required_buffer_size,
    required_buffer_size_for_code, supported_outputs, ConversionOptions, ConversionRequest,
};
pub use images::{FrameBuffer, FrameBufferMut};
pub use pixel_error::{validate_buffer, BufferRole, BufferTooSmall, PixelError, UnsupportedConversion};
pub use pixel_format::{format_name, PixelFormat, PlaneLayout, PlaneSpan, UNKNOWN_FORMAT_NAME};

pub use rgba_to_nv::{argb_to_nv12, argb_to_nv21};
pub use rgba_to_yuv::{argb_to_i420, argb_to_i422, argb_to_i444};
pub use yuv_nv_to_rgba::{nv12_to_rgb, nv21_to_rgb};
pub use yuv_to_rgba::{i420_to_rgb, i422_to_rgb, i444_to_rgb};

pub use yuv_support::{
    get_forward_transform, get_inverse_transform, get_yuv_range, CbCrForwardTransform,
    CbCrInverseTransform, ToIntegerTransform, YuvBias, YuvChromaRange, YuvChromaSubsampling,
    YuvRange, YuvStandardMatrix,
};
