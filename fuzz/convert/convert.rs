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

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pixconv::{
    convert_with_options, is_conversion_supported, required_buffer_size_for_code,
    ConversionOptions, PixelError, PixelFormat, YuvRange, YuvStandardMatrix,
};

#[derive(Arbitrary, Debug)]
struct Request {
    input_code: u8,
    output_code: u8,
    width: u8,
    height: u8,
    input_slack: i8,
    output_slack: i8,
    limited: bool,
    matrix: u8,
    fill: u8,
}

fn sized(required: usize, slack: i8) -> usize {
    if slack < 0 {
        required.saturating_sub(slack.unsigned_abs() as usize)
    } else {
        required + slack as usize
    }
}

fuzz_target!(|request: Request| {
    let width = request.width as u32;
    let height = request.height as u32;
    let in_code = (request.input_code % 8) as u32;
    let out_code = (request.output_code % 8) as u32;

    let (input, output) = match (
        PixelFormat::try_from(in_code),
        PixelFormat::try_from(out_code),
    ) {
        (Ok(input), Ok(output)) => (input, output),
        _ => {
            assert!(required_buffer_size_for_code(7, width, height).is_err());
            return;
        }
    };

    let in_required = input.required_bytes(width, height).unwrap();
    let out_required = output.required_bytes(width, height).unwrap();
    let src = vec![request.fill; sized(in_required, request.input_slack)];
    let mut dst = vec![0xA5u8; sized(out_required, request.output_slack)];

    let options = ConversionOptions::new(
        if request.limited {
            YuvRange::Limited
        } else {
            YuvRange::Full
        },
        match request.matrix % 3 {
            0 => YuvStandardMatrix::Bt601,
            1 => YuvStandardMatrix::Bt709,
            _ => YuvStandardMatrix::Bt2020,
        },
    );

    let result = convert_with_options(&src, input, &mut dst, output, width, height, options);
    match result {
        Ok(()) => {
            assert!(is_conversion_supported(input, output));
            assert!(dst[out_required..].iter().all(|&v| v == 0xA5));
        }
        Err(PixelError::UnsupportedConversion(_)) => {
            assert!(!is_conversion_supported(input, output));
        }
        Err(PixelError::BufferTooSmall(_)) => {
            assert!(src.len() < in_required || dst.len() < out_required);
            assert!(dst.iter().all(|&v| v == 0xA5));
        }
        Err(e) => panic!("unexpected error {}", e),
    }
});
