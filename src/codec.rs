//! The cbddlp 1-bit run-length pixel codec.
//!
//! Each token is one byte: bit 7 carries the pixel color (1 = exposed/white),
//! bits 0..7 the run length. A layer's stream is the concatenation of its
//! tokens, and the run lengths of one stream must sum to exactly the image
//! area.

use std::io::{self, Write};

use itertools::Itertools;
use thiserror::Error;

/// Streams are staged through a buffer of this size on both decode and
/// encode. Any chunk size produces identical output; 1024 matches the
/// original tooling for this format.
pub const CHUNK_SIZE: usize = 1024;

/// Longest run the encoder will emit. The 7-bit field could hold 127, but
/// existing readers of the format expect runs no longer than this, so it
/// stays at 125.
pub const MAX_RUN: usize = 125;

const COLOR_BIT: u8 = 0x80;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("pixel stream under-fills the image: {decoded} of {expected} pixels")]
    Underfill { decoded: usize, expected: usize },
    #[error("pixel stream overflows the image area of {expected} pixels")]
    Overflow { expected: usize },
}

/// Decode a run-length stream into `pixels` (true = white/exposed).
///
/// The caller sizes `pixels` to the image area. A stream whose runs do not
/// fill it exactly is corrupt and fails; it is never truncated or padded.
/// The decoder accepts the full 7-bit run range on input; zero-length tokens
/// contribute nothing.
pub fn decode_into(stream: &[u8], pixels: &mut [bool]) -> Result<(), CodecError> {
    let mut pixel_index = 0;
    for chunk in stream.chunks(CHUNK_SIZE) {
        for &token in chunk {
            let color = token & COLOR_BIT != 0;
            let run = (token & !COLOR_BIT) as usize;
            if pixel_index + run > pixels.len() {
                return Err(CodecError::Overflow {
                    expected: pixels.len(),
                });
            }
            pixels[pixel_index..pixel_index + run].fill(color);
            pixel_index += run;
        }
    }
    if pixel_index != pixels.len() {
        return Err(CodecError::Underfill {
            decoded: pixel_index,
            expected: pixels.len(),
        });
    }
    Ok(())
}

/// Encode a pixel buffer as a run-length stream, returning the number of
/// bytes emitted. Runs are flushed at [`MAX_RUN`], at a color change, or at
/// the end of the buffer; output goes through a [`CHUNK_SIZE`] staging
/// buffer.
pub fn encode<W: Write>(pixels: &[bool], sink: &mut W) -> io::Result<usize> {
    let mut staged = [0u8; CHUNK_SIZE];
    let mut staged_len = 0;
    let mut written = 0;

    for (count, &color) in pixels.iter().dedup_with_count() {
        let color_bit = if color { COLOR_BIT } else { 0 };
        let mut remaining = count;
        while remaining > 0 {
            let run = remaining.min(MAX_RUN);
            staged[staged_len] = color_bit | run as u8;
            staged_len += 1;
            written += 1;
            if staged_len == CHUNK_SIZE {
                sink.write_all(&staged)?;
                staged_len = 0;
            }
            remaining -= run;
        }
    }
    if staged_len > 0 {
        sink.write_all(&staged[..staged_len])?;
    }
    Ok(written)
}
