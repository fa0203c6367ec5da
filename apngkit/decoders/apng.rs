use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::png::animation::assemble;
use crate::png::chunk::ChunkInfo;
use crate::png::compositor::Compositor;
use crate::png::parser::{parse_png, ChunkObserver};
use crate::png::registry::ChunkRegistry;
use crate::png::scanline;
use crate::utils::error::{PngError, PngResult};
use crate::utils::image::{AnimationFrame, ApngImage};
use crate::utils::info::PngInfo;
use crate::utils::options::DecodeOptions;

use super::png::read_all;

/// Reads an animated PNG into canvas-sized RGBA frames.
pub struct ApngDecoder<R: Read + Seek> {
    reader: R,
    options: DecodeOptions,
    registry: ChunkRegistry,
    observer: Option<ChunkObserver>,
    info: Option<PngInfo>,
}

impl ApngDecoder<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> PngResult<ApngDecoder<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(ApngDecoder::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> ApngDecoder<R> {
    pub fn new(reader: R) -> Self {
        ApngDecoder {
            reader,
            options: DecodeOptions::default(),
            registry: ChunkRegistry::apng(),
            observer: None,
            info: None,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

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

    pub fn get_info(&self) -> Option<PngInfo> {
        self.info.clone()
    }

    pub fn decode(&mut self) -> PngResult<ApngImage> {
        let bytes = read_all(&mut self.reader)?;
        let mut parsed = parse_png(&bytes, &self.registry, &self.options, self.observer.as_mut())?;

        self.info = Some(super::info_from_parsed(&parsed));
        let header = parsed.header;
        header.validate(&self.options)?;

        let control = parsed
            .animation
            .ok_or_else(|| PngError::format("Missing acTL chunk in animated image"))?;

        let palette = parsed.resolve_palette()?;
        let records = assemble(std::mem::take(&mut parsed.sequence), &parsed.image_data, &control)?;

        let mut compositor = Compositor::new(header.width, header.height);
        let mut frames = Vec::with_capacity(records.len());

        for record in &records {
            let fctl = &record.control;
            compositor.check_frame(fctl)?;

            let sub_image = scanline::decode_rgba(
                header.color_type,
                fctl.width,
                fctl.height,
                &record.payload,
                palette.as_ref(),
            )?;

            let canvas = compositor.compose(fctl, &sub_image)?;
            frames.push(AnimationFrame::new(header.width, header.height, fctl.duration_ms(), canvas));
        }

        let default_image = if parsed.image_data.is_empty() {
            frames.first().map(|f| f.rgba.clone()).unwrap_or_default()
        } else {
            scanline::decode_rgba(
                header.color_type,
                header.width,
                header.height,
                &parsed.image_data,
                palette.as_ref(),
            )?
        };

        let image = ApngImage::new(header.width, header.height, control.num_plays, frames, default_image)
            .with_ancillary(parsed.ancillary);

        Ok(image)
    }
}
