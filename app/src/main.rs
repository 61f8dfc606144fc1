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
mod max_divergence;

use crate::max_divergence::check_div;
use image::{ImageReader, RgbImage};
use pixconv::{convert, supported_outputs, PixelFormat};
use rand::Rng;
use std::time::Instant;

fn load_argb(path: Option<String>) -> (Vec<u8>, u32, u32) {
    if let Some(path) = path {
        let img = ImageReader::open(&path).unwrap().decode().unwrap();
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let argb = rgba
            .as_raw()
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect();
        return (argb, width, height);
    }
    let (width, height) = (1921u32, 1081u32);
    let mut rng = rand::rng();
    let mut argb = vec![0u8; (width * height * 4) as usize];
    for (i, px) in argb.chunks_exact_mut(4).enumerate() {
        let x = (i as u32 % width) as f32 / width as f32;
        let y = (i as u32 / width) as f32 / height as f32;
        let noise: u8 = rng.random_range(0..8);
        px[0] = (x * 255.) as u8;
        px[1] = (y * 255.) as u8;
        px[2] = ((1. - x) * 200.) as u8 + noise;
        px[3] = 255;
    }
    (argb, width, height)
}

fn main() {
    let (argb, width, height) = load_argb(std::env::args().nth(1));
    println!("Frame {}x{}", width, height);

    for format in supported_outputs(PixelFormat::Argb) {
        let mut yuv = vec![0u8; format.required_bytes(width, height).unwrap()];
        let start = Instant::now();
        convert(&argb, PixelFormat::Argb, &mut yuv, format, width, height).unwrap();
        let forward = start.elapsed();

        let mut rgb = vec![0u8; PixelFormat::Rgb.required_bytes(width, height).unwrap()];
        let start = Instant::now();
        convert(&yuv, format, &mut rgb, PixelFormat::Rgb, width, height).unwrap();
        let inverse = start.elapsed();

        println!(
            "ARGB -> {} {:?}, {} -> RGB {:?}",
            format, forward, format, inverse
        );

        let image = RgbImage::from_raw(width, height, rgb).unwrap();
        image
            .save(format!("round_trip_{}.png", format.name().to_lowercase()))
            .unwrap();
    }

    for format in supported_outputs(PixelFormat::Argb) {
        check_div(format);
    }
}
