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

#![no_main]

use libfuzzer_sys::fuzz_target;
use pixconv::{convert, supported_outputs, PixelFormat};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    let (i_width, i_height, r, g, b) = data;
    if i_width == 0 || i_height == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let argb = [b, g, r, 255].repeat(i_width as usize * i_height as usize);

    for format in supported_outputs(PixelFormat::Argb) {
        let mut yuv = vec![0u8; format.required_bytes(width, height).unwrap()];
        convert(&argb, PixelFormat::Argb, &mut yuv, format, width, height).unwrap();
        let mut rgb = vec![0u8; i_width as usize * i_height as usize * 3];
        convert(&yuv, format, &mut rgb, PixelFormat::Rgb, width, height).unwrap();

        for px in rgb.chunks_exact(3) {
            assert_eq!(px, &rgb[0..3]);
            for (got, expected) in px.iter().zip([r, g, b]) {
                assert!((*got as i32 - expected as i32).abs() <= 3);
            }
        }
    }
});
