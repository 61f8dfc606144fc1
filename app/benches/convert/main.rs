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
use criterion::{criterion_group, criterion_main, Criterion};
use pixconv::{
    argb_to_i420, argb_to_i422, argb_to_i444, argb_to_nv21, i420_to_rgb, i422_to_rgb,
    i444_to_rgb, nv21_to_rgb, ConversionOptions, PixelFormat,
};
use rand::Rng;
use yuv_sys::{rs_ARGBToI420, rs_ARGBToNV21, rs_I420ToRAW, rs_NV21ToRAW};

pub fn criterion_benchmark(c: &mut Criterion) {
    let width = 1920u32;
    let height = 1080u32;
    let mut rng = rand::rng();
    let argb: Vec<u8> = (0..width as usize * height as usize * 4)
        .map(|_| rng.random())
        .collect();
    let options = ConversionOptions::default();

    let mut i420 = vec![0u8; PixelFormat::I420.required_bytes(width, height).unwrap()];
    let mut i422 = vec![0u8; PixelFormat::I422.required_bytes(width, height).unwrap()];
    let mut i444 = vec![0u8; PixelFormat::I444.required_bytes(width, height).unwrap()];
    let mut nv21 = vec![0u8; PixelFormat::Nv21.required_bytes(width, height).unwrap()];
    let mut rgb = vec![0u8; PixelFormat::Rgb.required_bytes(width, height).unwrap()];

    c.bench_function("pixconv ARGB -> I420", |b| {
        b.iter(|| {
            argb_to_i420(&argb, &mut i420, width, height, options).unwrap();
        })
    });

    c.bench_function("libyuv ARGB -> I420", |b| {
        let (y_plane, chroma) = i420.split_at_mut((width * height) as usize);
        let (u_plane, v_plane) = chroma.split_at_mut(chroma.len() / 2);
        b.iter(|| unsafe {
            rs_ARGBToI420(
                argb.as_ptr(),
                width as i32 * 4i32,
                y_plane.as_mut_ptr(),
                width as i32,
                u_plane.as_mut_ptr(),
                (width as i32 + 1) / 2,
                v_plane.as_mut_ptr(),
                (width as i32 + 1) / 2,
                width as i32,
                height as i32,
            );
        })
    });

    c.bench_function("pixconv ARGB -> I422", |b| {
        b.iter(|| {
            argb_to_i422(&argb, &mut i422, width, height, options).unwrap();
        })
    });

    c.bench_function("pixconv ARGB -> I444", |b| {
        b.iter(|| {
            argb_to_i444(&argb, &mut i444, width, height, options).unwrap();
        })
    });

    c.bench_function("pixconv ARGB -> NV21", |b| {
        b.iter(|| {
            argb_to_nv21(&argb, &mut nv21, width, height, options).unwrap();
        })
    });

    c.bench_function("libyuv ARGB -> NV21", |b| {
        let (y_plane, vu_plane) = nv21.split_at_mut((width * height) as usize);
        b.iter(|| unsafe {
            rs_ARGBToNV21(
                argb.as_ptr(),
                width as i32 * 4i32,
                y_plane.as_mut_ptr(),
                width as i32,
                vu_plane.as_mut_ptr(),
                (width as i32 + 1) / 2 * 2,
                width as i32,
                height as i32,
            );
        })
    });

    c.bench_function("pixconv I420 -> RGB", |b| {
        b.iter(|| {
            i420_to_rgb(&i420, &mut rgb, width, height, options).unwrap();
        })
    });

    c.bench_function("libyuv I420 -> RAW", |b| {
        let (y_plane, chroma) = i420.split_at((width * height) as usize);
        let (u_plane, v_plane) = chroma.split_at(chroma.len() / 2);
        b.iter(|| unsafe {
            rs_I420ToRAW(
                y_plane.as_ptr(),
                width as i32,
                u_plane.as_ptr(),
                (width as i32 + 1) / 2,
                v_plane.as_ptr(),
                (width as i32 + 1) / 2,
                rgb.as_mut_ptr(),
                width as i32 * 3i32,
                width as i32,
                height as i32,
            );
        })
    });

    c.bench_function("pixconv I422 -> RGB", |b| {
        b.iter(|| {
            i422_to_rgb(&i422, &mut rgb, width, height, options).unwrap();
        })
    });

    c.bench_function("pixconv I444 -> RGB", |b| {
        b.iter(|| {
            i444_to_rgb(&i444, &mut rgb, width, height, options).unwrap();
        })
    });

    c.bench_function("pixconv NV21 -> RGB", |b| {
        b.iter(|| {
            nv21_to_rgb(&nv21, &mut rgb, width, height, options).unwrap();
        })
    });

    c.bench_function("libyuv NV21 -> RAW", |b| {
        let (y_plane, vu_plane) = nv21.split_at((width * height) as usize);
        b.iter(|| unsafe {
            rs_NV21ToRAW(
                y_plane.as_ptr(),
                width as i32,
                vu_plane.as_ptr(),
                (width as i32 + 1) / 2 * 2,
                rgb.as_mut_ptr(),
                width as i32 * 3i32,
                width as i32,
                height as i32,
            );
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
