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
use pixconv::{convert_with_options, ConversionOptions, PixelFormat, YuvRange, YuvStandardMatrix};

const WIDTH: u32 = 6;
const HEIGHT: u32 = 4;

fn round_trip(format: PixelFormat, r: u8, g: u8, b: u8, options: ConversionOptions) -> (u32, u32, u32) {
    let argb = [b, g, r, 255].repeat((WIDTH * HEIGHT) as usize);
    let mut yuv = vec![0u8; format.required_bytes(WIDTH, HEIGHT).unwrap()];
    convert_with_options(
        &argb,
        PixelFormat::Argb,
        &mut yuv,
        format,
        WIDTH,
        HEIGHT,
        options,
    )
    .unwrap();
    let mut rgb = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    convert_with_options(
        &yuv,
        format,
        &mut rgb,
        PixelFormat::Rgb,
        WIDTH,
        HEIGHT,
        options,
    )
    .unwrap();

    let mut m_r = u32::MIN;
    let mut m_g = u32::MIN;
    let mut m_b = u32::MIN;
    for px in rgb.chunks_exact(3) {
        m_r = m_r.max((px[0] as i32 - r as i32).unsigned_abs());
        m_g = m_g.max((px[1] as i32 - g as i32).unsigned_abs());
        m_b = m_b.max((px[2] as i32 - b as i32).unsigned_abs());
    }
    (m_r, m_g, m_b)
}

pub(crate) fn search_for_max_divergences(
    format: PixelFormat,
    options: ConversionOptions,
) -> (u32, u32, u32) {
    let mut m_r = u32::MIN;
    let mut m_g = u32::MIN;
    let mut m_b = u32::MIN;

    for r in (0..=255u8).step_by(5) {
        for g in (0..=255u8).step_by(5) {
            for b in (0..=255u8).step_by(5) {
                let (n_r, n_g, n_b) = round_trip(format, r, g, b, options);
                m_r = n_r.max(m_r);
                m_g = n_g.max(m_g);
                m_b = n_b.max(m_b);
            }
        }
    }
    (m_r, m_g, m_b)
}

pub(crate) fn check_div(format: PixelFormat) {
    for range in [YuvRange::Full, YuvRange::Limited] {
        for matrix in [
            YuvStandardMatrix::Bt601,
            YuvStandardMatrix::Bt709,
            YuvStandardMatrix::Bt2020,
        ] {
            let max_divergence =
                search_for_max_divergences(format, ConversionOptions::new(range, matrix));
            println!(
                "Max Divergence {} {:?} {:?} {:?}",
                format, range, matrix, max_divergence
            );
        }
    }
}
