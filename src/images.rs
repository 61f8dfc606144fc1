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
use crate::pixel_error::{validate_buffer, BufferRole, PixelError};
use crate::pixel_format::{PixelFormat, PlaneLayout, PlaneSpan};

/// Caller owned frame buffer together with the format and dimensions it holds.
#[derive(Debug, Copy, Clone)]
pub struct FrameBuffer<'a> {
    pub data: &'a [u8],
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

/// Mutable counterpart of [`FrameBuffer`], conversions write into it in place.
#[derive(Debug)]
pub struct FrameBufferMut<'a> {
    pub data: &'a mut [u8],
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
/// Non-mutable representation of a packed RGB image
pub(crate) struct PackedImage<'a> {
    pub data: &'a [u8],
    /// Stride here always means bytes per row.
    pub stride: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
/// Mutable representation of a packed RGB image
pub(crate) struct PackedImageMut<'a> {
    pub data: &'a mut [u8],
    /// Stride here always means bytes per row.
    pub stride: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Planar YUV image
pub(crate) struct YuvPlanarImage<'a> {
    pub y_plane: &'a [u8],
    pub y_stride: usize,
    pub u_plane: &'a [u8],
    pub u_stride: usize,
    pub v_plane: &'a [u8],
    pub v_stride: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
/// Mutable representation of Planar YUV image
pub(crate) struct YuvPlanarImageMut<'a> {
    pub y_plane: &'a mut [u8],
    pub y_stride: usize,
    pub u_plane: &'a mut [u8],
    pub u_stride: usize,
    pub v_plane: &'a mut [u8],
    pub v_stride: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Bi-Planar YUV image
pub(crate) struct YuvBiPlanarImage<'a> {
    pub y_plane: &'a [u8],
    pub y_stride: usize,
    pub uv_plane: &'a [u8],
    pub uv_stride: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
/// Mutable representation of Bi-Planar YUV image
pub(crate) struct YuvBiPlanarImageMut<'a> {
    pub y_plane: &'a mut [u8],
    pub y_stride: usize,
    pub uv_plane: &'a mut [u8],
    pub uv_stride: usize,
    pub width: u32,
    pub height: u32,
}

#[inline]
fn plane(data: &[u8], span: PlaneSpan) -> &[u8] {
    &data[span.offset..span.offset + span.len()]
}

/// Splits `data` at the start of `second`, `first` must lie entirely before it.
#[inline]
fn split_planes_mut(
    data: &mut [u8],
    first: PlaneSpan,
    second: PlaneSpan,
) -> (&mut [u8], &mut [u8]) {
    let (head, tail) = data.split_at_mut(second.offset);
    (
        &mut head[first.offset..first.offset + first.len()],
        &mut tail[..second.len()],
    )
}

impl<'a> FrameBuffer<'a> {
    pub fn new(data: &'a [u8], format: PixelFormat, width: u32, height: u32) -> Self {
        FrameBuffer {
            data,
            format,
            width,
            height,
        }
    }

    /// Fails with [`PixelError::BufferTooSmall`] when the data cannot hold the frame.
    pub fn check_constraints(&self, role: BufferRole) -> Result<PlaneLayout, PixelError> {
        validate_buffer(self.data, self.format, self.width, self.height, role)?;
        self.format.plane_layout(self.width, self.height)
    }

    pub(crate) fn packed(&self, role: BufferRole) -> Result<PackedImage<'a>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::Packed(span) => Ok(PackedImage {
                data: plane(self.data, span),
                stride: span.stride,
                width: self.width,
                height: self.height,
            }),
            _ => unreachable!("{} is not a packed format", self.format),
        }
    }

    pub(crate) fn planar(&self, role: BufferRole) -> Result<YuvPlanarImage<'a>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::Planar { y, u, v } => Ok(YuvPlanarImage {
                y_plane: plane(self.data, y),
                y_stride: y.stride,
                u_plane: plane(self.data, u),
                u_stride: u.stride,
                v_plane: plane(self.data, v),
                v_stride: v.stride,
                width: self.width,
                height: self.height,
            }),
            _ => unreachable!("{} is not a planar format", self.format),
        }
    }

    pub(crate) fn bi_planar(&self, role: BufferRole) -> Result<YuvBiPlanarImage<'a>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::BiPlanar { y, uv } => Ok(YuvBiPlanarImage {
                y_plane: plane(self.data, y),
                y_stride: y.stride,
                uv_plane: plane(self.data, uv),
                uv_stride: uv.stride,
                width: self.width,
                height: self.height,
            }),
            _ => unreachable!("{} is not a semi-planar format", self.format),
        }
    }
}

impl<'a> FrameBufferMut<'a> {
    pub fn new(data: &'a mut [u8], format: PixelFormat, width: u32, height: u32) -> Self {
        FrameBufferMut {
            data,
            format,
            width,
            height,
        }
    }

    /// Fails with [`PixelError::BufferTooSmall`] when the data cannot hold the frame.
    pub fn check_constraints(&self, role: BufferRole) -> Result<PlaneLayout, PixelError> {
        validate_buffer(self.data, self.format, self.width, self.height, role)?;
        self.format.plane_layout(self.width, self.height)
    }

    pub(crate) fn packed_mut(&mut self, role: BufferRole) -> Result<PackedImageMut<'_>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::Packed(span) => Ok(PackedImageMut {
                data: &mut self.data[span.offset..span.offset + span.len()],
                stride: span.stride,
                width: self.width,
                height: self.height,
            }),
            _ => unreachable!("{} is not a packed format", self.format),
        }
    }

    pub(crate) fn planar_mut(
        &mut self,
        role: BufferRole,
    ) -> Result<YuvPlanarImageMut<'_>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::Planar { y, u, v } => {
                let (head, tail) = self.data.split_at_mut(v.offset);
                let v_plane = &mut tail[..v.len()];
                let (y_plane, u_plane) = split_planes_mut(head, y, u);
                Ok(YuvPlanarImageMut {
                    y_plane,
                    y_stride: y.stride,
                    u_plane,
                    u_stride: u.stride,
                    v_plane,
                    v_stride: v.stride,
                    width: self.width,
                    height: self.height,
                })
            }
            _ => unreachable!("{} is not a planar format", self.format),
        }
    }

    pub(crate) fn bi_planar_mut(
        &mut self,
        role: BufferRole,
    ) -> Result<YuvBiPlanarImageMut<'_>, PixelError> {
        match self.check_constraints(role)? {
            PlaneLayout::BiPlanar { y, uv } => {
                let (y_plane, uv_plane) = split_planes_mut(self.data, y, uv);
                Ok(YuvBiPlanarImageMut {
                    y_plane,
                    y_stride: y.stride,
                    uv_plane,
                    uv_stride: uv.stride,
                    width: self.width,
                    height: self.height,
                })
            }
            _ => unreachable!("{} is not a semi-planar format", self.format),
        }
    }
}
