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
use crate::pixel_error::{PixelError, UnsupportedConversion};
use crate::pixel_format::PixelFormat;
use crate::rgba_to_nv::{argb_to_nv12, argb_to_nv21};
use crate::rgba_to_yuv::{argb_to_i420, argb_to_i422, argb_to_i444};
use crate::yuv_nv_to_rgba::{nv12_to_rgb, nv21_to_rgb};
use crate::yuv_support::{YuvRange, YuvStandardMatrix};
use crate::yuv_to_rgba::{i420_to_rgb, i422_to_rgb, i444_to_rgb};

/// Range and matrix used by the RGB <-> YCbCr transforms.
///
/// Defaults to full range BT.601, where white maps to Y = 255 and any gray maps back to itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ConversionOptions {
    pub range: YuvRange,
    pub matrix: YuvStandardMatrix,
}

impl ConversionOptions {
    pub const fn new(range: YuvRange, matrix: YuvStandardMatrix) -> Self {
        ConversionOptions { range, matrix }
    }
}

pub(crate) type ConversionRoutine =
    fn(&[u8], &mut [u8], u32, u32, ConversionOptions) -> Result<(), PixelError>;

fn resolve(input: PixelFormat, output: PixelFormat) -> Result<ConversionRoutine, PixelError> {
    let routine: ConversionRoutine = match (input, output) {
        (PixelFormat::Argb, PixelFormat::I420) => argb_to_i420,
        (PixelFormat::Argb, PixelFormat::I422) => argb_to_i422,
        (PixelFormat::Argb, PixelFormat::I444) => argb_to_i444,
        (PixelFormat::Argb, PixelFormat::Nv12) => argb_to_nv12,
        (PixelFormat::Argb, PixelFormat::Nv21) => argb_to_nv21,
        (PixelFormat::I420, PixelFormat::Rgb) => i420_to_rgb,
        (PixelFormat::I422, PixelFormat::Rgb) => i422_to_rgb,
        (PixelFormat::I444, PixelFormat::Rgb) => i444_to_rgb,
        (PixelFormat::Nv12, PixelFormat::Rgb) => nv12_to_rgb,
        (PixelFormat::Nv21, PixelFormat::Rgb) => nv21_to_rgb,
        _ => {
            return Err(PixelError::UnsupportedConversion(UnsupportedConversion {
                input,
                output,
            }))
        }
    };
    Ok(routine)
}

/// Returns true when `input` can be converted to `output`.
pub fn is_conversion_supported(input: PixelFormat, output: PixelFormat) -> bool {
    resolve(input, output).is_ok()
}

/// Lists every format `input` can be converted to, in format code order.
pub fn supported_outputs(input: PixelFormat) -> Vec<PixelFormat> {
    PixelFormat::ALL
        .iter()
        .copied()
        .filter(|&output| is_conversion_supported(input, output))
        .collect()
}

/// Exact byte count of a `width` x `height` frame in `format`.
pub fn required_buffer_size(
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<usize, PixelError> {
    format.required_bytes(width, height)
}

/// Same as [`required_buffer_size`] for a raw format code.
///
/// Fails with [`PixelError::UnknownFormat`] when `code` does not name a known format.
pub fn required_buffer_size_for_code(
    code: u32,
    width: u32,
    height: u32,
) -> Result<usize, PixelError> {
    PixelFormat::try_from(code)?.required_bytes(width, height)
}

/// Converts `input` of `input_format` into `output` of `output_format` with default options.
///
/// The pair is checked first, then the input buffer, then the output buffer.
/// Nothing is written unless every check passes.
pub fn convert(
    input: &[u8],
    input_format: PixelFormat,
    output: &mut [u8],
    output_format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<(), PixelError> {
    convert_with_options(
        input,
        input_format,
        output,
        output_format,
        width,
        height,
        ConversionOptions::default(),
    )
}

/// Same as [`convert`] with an explicit range and matrix.
pub fn convert_with_options(
    input: &[u8],
    input_format: PixelFormat,
    output: &mut [u8],
    output_format: PixelFormat,
    width: u32,
    height: u32,
    options: ConversionOptions,
) -> Result<(), PixelError> {
    let result = resolve(input_format, output_format).and_then(|routine| {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            input = %input_format,
            output = %output_format,
            width,
            height,
            range = ?options.range,
            matrix = ?options.matrix,
            "converting frame"
        );
        routine(input, output, width, height, options)
    });
    #[cfg(feature = "tracing")]
    if let Err(error) = &result {
        tracing::debug!(
            input = %input_format,
            output = %output_format,
            width,
            height,
            %error,
            "conversion rejected"
        );
    }
    result
}

/// A single conversion call, bundled as a value.
#[derive(Debug)]
pub struct ConversionRequest<'a, 'b> {
    pub input: &'a [u8],
    pub input_format: PixelFormat,
    pub output: &'b mut [u8],
    pub output_format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub options: ConversionOptions,
}

impl<'a, 'b> ConversionRequest<'a, 'b> {
    pub fn new(
        input: &'a [u8],
        input_format: PixelFormat,
        output: &'b mut [u8],
        output_format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Self {
        ConversionRequest {
            input,
            input_format,
            output,
            output_format,
            width,
            height,
            options: ConversionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn execute(self) -> Result<(), PixelError> {
        convert_with_options(
            self.input,
            self.input_format,
            self.output,
            self.output_format,
            self.width,
            self.height,
            self.options,
        )
    }
}
