use crate::log_warn;
use crate::png::chunk::{Chunk, ChunkTag};
use crate::utils::bytereader::ByteReader;
use crate::utils::checksum::crc32_parts;
use crate::utils::error::{PngError, PngResult};

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const MAX_CHUNK_LENGTH: u32 = (1 << 31) - 1;

/// One framed chunk as it appears in the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub tag: ChunkTag,
    pub data: &'a [u8],
    /// CRC stored in the file.
    pub crc: u32,
}

impl RawChunk<'_> {
    pub fn computed_crc(&self) -> u32 {
        crc32_parts(&[self.tag.as_bytes(), self.data])
    }

    pub fn crc_matches(&self) -> bool {
        self.computed_crc() == self.crc
    }
}

/// Splits a PNG byte stream into its chunks, up to and including `IEND`.
pub fn read_chunks(bytes: &[u8]) -> PngResult<Vec<RawChunk<'_>>> {
    let mut reader = ByteReader::new(bytes, "PNG stream");

    let signature = reader
        .read_array::<8>()
        .map_err(|_| PngError::format("Input is too short to hold a PNG signature"))?;

    if signature != SIGNATURE {
        return Err(PngError::format("Invalid PNG signature"));
    }

    let mut chunks = Vec::new();

    loop {
        if reader.is_empty() {
            return Err(PngError::format("Reached end of input before IEND chunk"));
        }

        let length = reader.read_u32()?;
        if length > MAX_CHUNK_LENGTH {
            return Err(PngError::format(format!("Chunk length {} exceeds 2^31-1", length)));
        }

        let tag = ChunkTag(reader.read_array()?);
        let data = reader.read_bytes(length as usize)?;
        let crc = reader.read_u32()?;

        chunks.push(RawChunk { tag, data, crc });

        if tag == ChunkTag::IEND {
            break;
        }
    }

    if !reader.is_empty() {
        log_warn!("Ignoring {} bytes after IEND chunk", reader.bytes_left());
    }

    Ok(chunks)
}

/// Appends one framed chunk to `out`. The CRC is always computed here.
pub fn write_chunk_into(out: &mut Vec<u8>, tag: ChunkTag, data: &[u8]) {
    out.reserve(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag.as_bytes());
    out.extend_from_slice(data);

    out.extend_from_slice(&crc32_parts(&[tag.as_bytes(), data]).to_be_bytes());
}

pub fn write_chunk(tag: ChunkTag, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_chunk_into(&mut out, tag, data);
    out
}

/// Signature followed by every chunk in order. An `IEND` is appended if the
/// list does not already end with one.
pub fn write_png(chunks: &[Chunk]) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();

    for chunk in chunks {
        write_chunk_into(&mut out, chunk.tag(), &chunk.encode());
    }

    if !matches!(chunks.last(), Some(Chunk::End)) {
        write_chunk_into(&mut out, ChunkTag::IEND, &[]);
    }

    out
}
