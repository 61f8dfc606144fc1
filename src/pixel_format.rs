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
use crate::pixel_error::{check_overflow_v2, check_overflow_v3, PixelError};
use crate::yuv_support::{YuvChromaSubsampling, YuvNVOrder, YuvSourceChannels};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Pixel formats understood by the converter.
///
/// Discriminants are stable format codes, see [`PixelFormat::try_from`] and [`format_name`].
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PixelFormat {
    /// Packed 32-bit ARGB, bytes are laid out as B, G, R, A
    Argb = 0,
    /// Packed 24-bit RGB, bytes are laid out as R, G, B
    Rgb = 1,
    /// Planar 4:2:0, Y then U then V
    I420 = 2,
    /// Planar 4:2:2, Y then U then V
    I422 = 3,
    /// Planar 4:4:4, Y then U then V
    I444 = 4,
    /// Semi-planar 4:2:0, Y then interleaved U,V
    Nv12 = 5,
    /// Semi-planar 4:2:0, Y then interleaved V,U
    Nv21 = 6,
}

/// Returned by [`format_name`] for codes that do not name a format.
pub const UNKNOWN_FORMAT_NAME: &str = "unknown";

/// Diagnostic name of a raw format code, never fails.
pub fn format_name(code: u32) -> &'static str {
    PixelFormat::try_from(code)
        .map(|format| format.name())
        .unwrap_or(UNKNOWN_FORMAT_NAME)
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::Argb,
        PixelFormat::Rgb,
        PixelFormat::I420,
        PixelFormat::I422,
        PixelFormat::I444,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            PixelFormat::Argb => "ARGB",
            PixelFormat::Rgb => "RGB",
            PixelFormat::I420 => "I420",
            PixelFormat::I422 => "I422",
            PixelFormat::I444 => "I444",
            PixelFormat::Nv12 => "NV12",
            PixelFormat::Nv21 => "NV21",
        }
    }

    pub const fn code(&self) -> u32 {
        *self as u32
    }

    pub const fn plane_count(&self) -> usize {
        match self {
            PixelFormat::Argb | PixelFormat::Rgb => 1,
            PixelFormat::Nv12 | PixelFormat::Nv21 => 2,
            PixelFormat::I420 | PixelFormat::I422 | PixelFormat::I444 => 3,
        }
    }

    pub const fn is_packed(&self) -> bool {
        matches!(self, PixelFormat::Argb | PixelFormat::Rgb)
    }

    /// Chroma subsampling of YUV formats, `None` for packed RGB formats.
    pub const fn chroma_subsampling(&self) -> Option<YuvChromaSubsampling> {
        match self {
            PixelFormat::Argb | PixelFormat::Rgb => None,
            PixelFormat::I420 | PixelFormat::Nv12 | PixelFormat::Nv21 => {
                Some(YuvChromaSubsampling::Yuv420)
            }
            PixelFormat::I422 => Some(YuvChromaSubsampling::Yuv422),
            PixelFormat::I444 => Some(YuvChromaSubsampling::Yuv444),
        }
    }

    pub(crate) const fn packed_channels(&self) -> Option<YuvSourceChannels> {
        match self {
            PixelFormat::Argb => Some(YuvSourceChannels::Bgra),
            PixelFormat::Rgb => Some(YuvSourceChannels::Rgb),
            _ => None,
        }
    }

    pub(crate) const fn nv_order(&self) -> Option<YuvNVOrder> {
        match self {
            PixelFormat::Nv12 => Some(YuvNVOrder::UV),
            PixelFormat::Nv21 => Some(YuvNVOrder::VU),
            _ => None,
        }
    }

    /// Exact byte count of a tightly packed `width` x `height` frame.
    ///
    /// Chroma planes of subsampled formats round their dimensions up,
    /// a 3x3 I420 frame takes `9 + 2 * 2 * 2` bytes.
    pub fn required_bytes(&self, width: u32, height: u32) -> Result<usize, PixelError> {
        Ok(self.plane_layout(width, height)?.total_len())
    }

    /// Positions of the planes of a tightly packed frame inside one contiguous buffer.
    pub fn plane_layout(&self, width: u32, height: u32) -> Result<PlaneLayout, PixelError> {
        let width = width as usize;
        let height = height as usize;
        if let Some(channels) = self.packed_channels() {
            let stride = check_overflow_v2(width, channels.get_channels_count())?;
            check_overflow_v3(width, height, channels.get_channels_count())?;
            return Ok(PlaneLayout::Packed(PlaneSpan {
                offset: 0,
                stride,
                rows: height,
            }));
        }
        let Some(subsampling) = self.chroma_subsampling() else {
            unreachable!("{} is neither packed nor YUV", self)
        };
        let y = PlaneSpan {
            offset: 0,
            stride: width,
            rows: height,
        };
        let y_len = check_overflow_v2(width, height)?;
        let chroma_width = subsampling.chroma_width(width);
        let chroma_height = subsampling.chroma_height(height);
        if self.nv_order().is_some() {
            let uv = PlaneSpan {
                offset: y_len,
                stride: check_overflow_v2(chroma_width, 2)?,
                rows: chroma_height,
            };
            uv.end()?;
            return Ok(PlaneLayout::BiPlanar { y, uv });
        }
        let chroma_len = check_overflow_v2(chroma_width, chroma_height)?;
        let u = PlaneSpan {
            offset: y_len,
            stride: chroma_width,
            rows: chroma_height,
        };
        let v = PlaneSpan {
            offset: u.end()?,
            stride: chroma_width,
            rows: chroma_height,
        };
        v.offset
            .checked_add(chroma_len)
            .ok_or(PixelError::PointerOverflow)?;
        Ok(PlaneLayout::Planar { y, u, v })
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = PixelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.code() == value)
            .ok_or(PixelError::UnknownFormat(value))
    }
}

impl FromStr for PixelFormat {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PixelError::UnknownFormatName(s.to_string()))
    }
}

/// One plane inside a frame buffer, stride here always means bytes per row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlaneSpan {
    pub offset: usize,
    pub stride: usize,
    pub rows: usize,
}

impl PlaneSpan {
    pub const fn len(&self) -> usize {
        self.stride * self.rows
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn end(&self) -> Result<usize, PixelError> {
        self.offset
            .checked_add(check_overflow_v2(self.stride, self.rows)?)
            .ok_or(PixelError::PointerOverflow)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaneLayout {
    Packed(PlaneSpan),
    Planar {
        y: PlaneSpan,
        u: PlaneSpan,
        v: PlaneSpan,
    },
    BiPlanar {
        y: PlaneSpan,
        uv: PlaneSpan,
    },
}

impl PlaneLayout {
    /// Total bytes covered by all planes.
    pub const fn total_len(&self) -> usize {
        match self {
            PlaneLayout::Packed(plane) => plane.offset + plane.len(),
            PlaneLayout::Planar { v, .. } => v.offset + v.len(),
            PlaneLayout::BiPlanar { uv, .. } => uv.offset + uv.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn closed_form(format: PixelFormat, w: usize, h: usize) -> usize {
        match format {
            PixelFormat::Argb => w * h * 4,
            PixelFormat::Rgb => w * h * 3,
            PixelFormat::I420 | PixelFormat::Nv12 | PixelFormat::Nv21 => w * h * 3 / 2,
            PixelFormat::I422 => w * h * 2,
            PixelFormat::I444 => w * h * 3,
        }
    }

    #[test]
    fn required_bytes_matches_closed_form_for_even_sizes() {
        let mut rng = rand::rng();
        let mut sizes = vec![(2usize, 2usize), (4, 4), (1920, 1080), (2, 1078)];
        for _ in 0..32 {
            sizes.push((rng.random_range(1..512) * 2, rng.random_range(1..512) * 2));
        }
        for format in PixelFormat::ALL {
            for &(w, h) in &sizes {
                assert_eq!(
                    format.required_bytes(w as u32, h as u32).unwrap(),
                    closed_form(format, w, h),
                    "{} at {}x{}",
                    format,
                    w,
                    h
                );
            }
        }
    }

    #[test]
    fn odd_sizes_round_chroma_up() {
        assert_eq!(PixelFormat::I420.required_bytes(3, 3).unwrap(), 17);
        assert_eq!(PixelFormat::Nv12.required_bytes(3, 3).unwrap(), 17);
        assert_eq!(PixelFormat::Nv21.required_bytes(5, 1).unwrap(), 5 + 6);
        assert_eq!(PixelFormat::I422.required_bytes(3, 2).unwrap(), 6 + 2 * 2 * 2);
        assert_eq!(PixelFormat::I444.required_bytes(3, 3).unwrap(), 27);
        assert_eq!(PixelFormat::Rgb.required_bytes(3, 3).unwrap(), 27);
    }

    #[test]
    fn required_bytes_is_monotonic() {
        for format in PixelFormat::ALL {
            for w in 0..12u32 {
                for h in 0..12u32 {
                    let size = format.required_bytes(w, h).unwrap();
                    assert!(size <= format.required_bytes(w + 1, h).unwrap());
                    assert!(size <= format.required_bytes(w, h + 1).unwrap());
                }
            }
        }
    }

    #[test]
    fn zero_sized_frames_need_no_bytes() {
        for format in PixelFormat::ALL {
            assert_eq!(format.required_bytes(0, 16).unwrap(), 0);
            assert_eq!(format.required_bytes(16, 0).unwrap(), 0);
        }
    }

    #[test]
    fn planar_layout_offsets() {
        let layout = PixelFormat::I420.plane_layout(4, 2).unwrap();
        assert_eq!(
            layout,
            PlaneLayout::Planar {
                y: PlaneSpan {
                    offset: 0,
                    stride: 4,
                    rows: 2
                },
                u: PlaneSpan {
                    offset: 8,
                    stride: 2,
                    rows: 1
                },
                v: PlaneSpan {
                    offset: 10,
                    stride: 2,
                    rows: 1
                },
            }
        );
        let layout = PixelFormat::Nv21.plane_layout(3, 3).unwrap();
        assert_eq!(
            layout,
            PlaneLayout::BiPlanar {
                y: PlaneSpan {
                    offset: 0,
                    stride: 3,
                    rows: 3
                },
                uv: PlaneSpan {
                    offset: 9,
                    stride: 4,
                    rows: 2
                },
            }
        );
    }

    #[test]
    fn format_codes_round_trip_through_names() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::try_from(format.code()).unwrap(), format);
            assert_eq!(format_name(format.code()), format.name());
            assert_eq!(format.name().parse::<PixelFormat>().unwrap(), format);
        }
        assert_eq!("nv12".parse::<PixelFormat>().unwrap(), PixelFormat::Nv12);
    }

    #[test]
    fn unknown_codes_and_names() {
        assert_eq!(PixelFormat::try_from(7u32), Err(PixelError::UnknownFormat(7)));
        assert_eq!(format_name(7), "unknown");
        assert_eq!(format_name(u32::MAX), UNKNOWN_FORMAT_NAME);
        assert_eq!(
            "YUY2".parse::<PixelFormat>(),
            Err(PixelError::UnknownFormatName("YUY2".to_string()))
        );
    }

    #[test]
    fn metadata() {
        assert_eq!(PixelFormat::Argb.plane_count(), 1);
        assert_eq!(PixelFormat::Nv12.plane_count(), 2);
        assert_eq!(PixelFormat::I444.plane_count(), 3);
        assert!(PixelFormat::Rgb.is_packed());
        assert!(!PixelFormat::Nv21.is_packed());
        assert_eq!(PixelFormat::Rgb.chroma_subsampling(), None);
        assert_eq!(
            PixelFormat::I422.chroma_subsampling(),
            Some(YuvChromaSubsampling::Yuv422)
        );
    }

    #[test]
    fn overflowing_sizes_fail() {
        assert_eq!(
            PixelFormat::Argb.required_bytes(u32::MAX, u32::MAX),
            Err(PixelError::PointerOverflow)
        );
    }
}
