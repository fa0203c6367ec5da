#![allow(dead_code)]

use std::io::Write;

use apngkit::checksum::crc32;
use flate2::write::ZlibEncoder;
use flate2::Compression;

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const TRUECOLOR: u8 = 2;
pub const INDEXED: u8 = 3;
pub const TRUECOLOR_ALPHA: u8 = 6;

/// Frames a chunk with a correct CRC.
pub fn chunk(tag: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut crc_input = tag.to_vec();
    crc_input.extend_from_slice(data);

    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
    out
}

/// Standard zlib stream (with a real Adler-32 of the uncompressed data).
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
    let mut out = width.to_be_bytes().to_vec();
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
    out
}

/// Rows prefixed with filter byte 0.
pub fn unfiltered(rows: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows {
        out.push(0);
        out.extend_from_slice(row);
    }
    out
}

/// Packed pixels split into rows of `row_bytes`, each prefixed with filter byte 0.
pub fn unfiltered_image(pixels: &[u8], row_bytes: usize) -> Vec<u8> {
    let rows: Vec<&[u8]> = pixels.chunks(row_bytes).collect();
    unfiltered(&rows)
}

pub fn fctl(seq: u32, width: u32, height: u32, x: u32, y: u32, delay: (u16, u16), dispose: u8, blend: u8) -> Vec<u8> {
    let mut out = Vec::new();
    for v in [seq, width, height, x, y] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend_from_slice(&delay.0.to_be_bytes());
    out.extend_from_slice(&delay.1.to_be_bytes());
    out.push(dispose);
    out.push(blend);
    out
}

pub fn fdat(seq: u32, compressed: &[u8]) -> Vec<u8> {
    let mut out = seq.to_be_bytes().to_vec();
    out.extend_from_slice(compressed);
    out
}

pub fn actl(num_frames: u32, num_plays: u32) -> Vec<u8> {
    let mut out = num_frames.to_be_bytes().to_vec();
    out.extend_from_slice(&num_plays.to_be_bytes());
    out
}

/// Hand-assembled PNG byte stream.
pub struct PngBuilder {
    bytes: Vec<u8>,
}

impl PngBuilder {
    pub fn new() -> Self {
        PngBuilder { bytes: SIGNATURE.to_vec() }
    }

    pub fn chunk(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.bytes.extend(chunk(tag, data));
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn header(self, width: u32, height: u32, color_type: u8) -> Self {
        self.chunk(b"IHDR", &ihdr(width, height, 8, color_type, 0))
    }

    /// One IDAT holding `pixels` with every row unfiltered.
    pub fn image(self, pixels: &[u8], row_bytes: usize) -> Self {
        self.chunk(b"IDAT", &zlib(&unfiltered_image(pixels, row_bytes)))
    }

    pub fn end(self) -> Vec<u8> {
        self.chunk(b"IEND", &[]).bytes
    }

    pub fn bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// RGBA test pattern with a gradient and a fully transparent first pixel.
pub fn pattern(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let alpha = if x == 0 && y == 0 { 0 } else { 255 - ((x + y) % 7) as u8 };
            out.extend_from_slice(&[(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x ^ y) * 11 % 256) as u8, alpha]);
        }
    }
    out
}

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.iter().copied().cycle().take((width * height * 4) as usize).collect()
}
