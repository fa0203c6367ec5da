//! The fixed two-byte-header zlib wrapper used for `IDAT`/`fdAT` payloads.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::utils::checksum::adler32;
use crate::utils::error::{PngError, PngResult};

/// CM = 8 (deflate), CINFO = 7, FLEVEL = 2 (default), no preset dictionary.
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x9C];

/// Wraps raw deflate output as `header || deflate || adler32(deflate)`.
///
/// The trailer checksums the compressed payload; [`decompress`] never reads it.
pub fn compress(data: &[u8]) -> PngResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let deflated = encoder.finish()?;

    let mut out = Vec::with_capacity(deflated.len() + 6);
    out.extend_from_slice(&ZLIB_HEADER);
    out.extend_from_slice(&deflated);
    out.extend_from_slice(&adler32(&deflated).to_be_bytes());

    Ok(out)
}

/// Strips the header and trailer and inflates what is left.
pub fn decompress(data: &[u8]) -> PngResult<Vec<u8>> {
    if data.len() < 6 {
        return Err(PngError::format(format!("zlib stream is only {} bytes", data.len())));
    }

    let (cmf, flg) = (data[0], data[1]);

    if cmf & 0x0F != 8 {
        return Err(PngError::unsupported(format!("zlib compression method {}", cmf & 0x0F)));
    }

    if flg & 0x20 != 0 {
        return Err(PngError::unsupported("zlib preset dictionary"));
    }

    let mut decoder = DeflateDecoder::new(&data[2..data.len() - 4]);
    let mut out = Vec::new();

    decoder
        .read_to_end(&mut out)
        .map_err(|e| PngError::data(format!("Failed to inflate image data: {}", e)))?;

    Ok(out)
}
