use std::fs;
use std::path::Path;

use crate::png::chunk::Chunk;
use crate::png::container::write_png;
use crate::png::scanline;
use crate::utils::error::PngResult;
use crate::utils::options::EncodeOptions;

use super::{build_palette, check_buffer, header_chunks, pack_samples, passthrough_chunks};

/// Writes a packed RGBA buffer as a still PNG.
#[derive(Debug, Clone, Default)]
pub struct PngEncoder {
    options: EncodeOptions,
    ancillary: Vec<Chunk>,
}

impl PngEncoder {
    pub fn new() -> Self {
        PngEncoder::default()
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Extra chunks (usually `tEXt` and opaque ones from a decoded image)
    /// written between the header chunks and `IDAT`.
    pub fn with_ancillary(mut self, chunks: Vec<Chunk>) -> Self {
        self.ancillary = passthrough_chunks(chunks);
        self
    }

    pub fn encode(&self, width: u32, height: u32, rgba: &[u8]) -> PngResult<Vec<u8>> {
        check_buffer(width, height, rgba)?;

        let color_type = self.options.get_color_type();
        let palette = build_palette(color_type, [rgba])?;
        let samples = pack_samples(color_type, rgba, palette.as_ref())?;
        let compressed = scanline::encode(&samples, width, color_type.channels())?;

        let mut chunks = header_chunks(width, height, color_type, palette.as_ref());
        chunks.extend(self.ancillary.iter().cloned());
        chunks.push(Chunk::ImageData(compressed));
        chunks.push(Chunk::End);

        Ok(write_png(&chunks))
    }

    pub fn encode_to_file<P: AsRef<Path>>(&self, path: P, width: u32, height: u32, rgba: &[u8]) -> PngResult<()> {
        let bytes = self.encode(width, height, rgba)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
