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
use crate::pixel_format::PixelFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which side of a conversion a buffer belongs to.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum BufferRole {
    Input,
    Output,
}

impl Display for BufferRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferRole::Input => f.write_str("input"),
            BufferRole::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct BufferTooSmall {
    pub role: BufferRole,
    pub required: usize,
    pub actual: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnsupportedConversion {
    pub input: PixelFormat,
    pub output: PixelFormat,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PixelError {
    /// Raw format code outside of the known formats
    UnknownFormat(u32),
    /// Format name that does not match any known format
    UnknownFormatName(String),
    BufferTooSmall(BufferTooSmall),
    UnsupportedConversion(UnsupportedConversion),
    PointerOverflow,
}

impl Display for PixelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelError::UnknownFormat(code) => {
                f.write_fmt(format_args!("Invalid pixel format: unknown ({})", code))
            }
            PixelError::UnknownFormatName(name) => {
                f.write_fmt(format_args!("Invalid pixel format name: {:?}", name))
            }
            PixelError::BufferTooSmall(size) => f.write_fmt(format_args!(
                "{} buffer is smaller than required, expected: {}, actual: {}",
                size.role, size.required, size.actual
            )),
            PixelError::UnsupportedConversion(pair) => f.write_fmt(format_args!(
                "Conversion from {} to {} is not supported",
                pair.input, pair.output
            )),
            PixelError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
        }
    }
}

impl Error for PixelError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, PixelError> {
    v0.checked_mul(v1).ok_or(PixelError::PointerOverflow)
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<usize, PixelError> {
    check_overflow_v2(check_overflow_v2(v0, v1)?, v2)
}

/// Checks that `buffer` can hold a `width` x `height` frame of `format`.
///
/// Buffers longer than required are accepted, trailing bytes are never touched by a conversion.
pub fn validate_buffer(
    buffer: &[u8],
    format: PixelFormat,
    width: u32,
    height: u32,
    role: BufferRole,
) -> Result<(), PixelError> {
    let required = format.required_bytes(width, height)?;
    if buffer.len() < required {
        return Err(PixelError::BufferTooSmall(BufferTooSmall {
            role,
            required,
            actual: buffer.len(),
        }));
    }
    Ok(())
}
