use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::png::chunk::ChunkInfo;
use crate::png::parser::{parse_png, ChunkObserver};
use crate::png::registry::ChunkRegistry;
use crate::png::scanline;
use crate::utils::error::{PngError, PngResult};
use crate::utils::image::PngImage;
use crate::utils::info::PngInfo;
use crate::utils::options::DecodeOptions;

/// Reads a still PNG into a packed RGBA buffer.
///
/// The whole source is read into memory before parsing starts.
pub struct PngDecoder<R: Read + Seek> {
    reader: R,
    options: DecodeOptions,
    registry: ChunkRegistry,
    observer: Option<ChunkObserver>,
    info: Option<PngInfo>,
}

impl PngDecoder<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> PngResult<PngDecoder<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(PngDecoder::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> PngDecoder<R> {
    pub fn new(reader: R) -> Self {
        PngDecoder {
            reader,
            options: DecodeOptions::default(),
            registry: ChunkRegistry::png(),
            observer: None,
            info: None,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the chunk table used to interpret the stream.
    pub fn with_registry(mut self, registry: ChunkRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_observer<F: FnMut(&ChunkInfo) + 'static>(mut self, observer: F) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn registry_mut(&mut self) -> &mut ChunkRegistry {
        &mut self.registry
    }

    /// Container metadata of the last successful [`decode`](Self::decode).
    pub fn get_info(&self) -> Option<PngInfo> {
        self.info.clone()
    }

    pub fn decode(&mut self) -> PngResult<PngImage> {
        let bytes = read_all(&mut self.reader)?;
        let parsed = parse_png(&bytes, &self.registry, &self.options, self.observer.as_mut())?;

        self.info = Some(super::info_from_parsed(&parsed));
        let header = parsed.header;
        header.validate(&self.options)?;

        if parsed.image_data.is_empty() {
            return Err(PngError::format("Missing IDAT chunk"));
        }

        let palette = parsed.resolve_palette()?;
        let rgba = scanline::decode_rgba(
            header.color_type,
            header.width,
            header.height,
            &parsed.image_data,
            palette.as_ref(),
        )?;

        let image = PngImage::new(header.width, header.height, rgba).with_ancillary(parsed.ancillary);

        Ok(image)
    }
}

pub(crate) fn read_all<R: Read + Seek>(reader: &mut R) -> PngResult<Vec<u8>> {
    reader.seek(SeekFrom::Start(0))?;

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    Ok(bytes)
}
