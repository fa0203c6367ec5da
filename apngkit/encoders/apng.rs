use std::fs;
use std::path::Path;

use crate::png::chunk::{AnimationControl, BlendOp, Chunk, DisposeOp, FrameControl, FrameData};
use crate::png::container::write_png;
use crate::png::scanline;
use crate::utils::error::{PngError, PngResult};
use crate::utils::image::AnimationFrame;
use crate::utils::options::EncodeOptions;

use super::{build_palette, check_buffer, header_chunks, pack_samples, passthrough_chunks};

/// Writes equally sized RGBA frames as an animated PNG.
///
/// Frame 0 doubles as the default image (`IDAT`); every later frame goes to
/// `fdAT`. Frames are full-canvas with dispose Background and blend Source.
#[derive(Debug, Clone, Default)]
pub struct ApngEncoder {
    options: EncodeOptions,
    ancillary: Vec<Chunk>,
}

impl ApngEncoder {
    pub fn new() -> Self {
        ApngEncoder::default()
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_ancillary(mut self, chunks: Vec<Chunk>) -> Self {
        self.ancillary = passthrough_chunks(chunks);
        self
    }

    pub fn encode(&self, frames: &[AnimationFrame]) -> PngResult<Vec<u8>> {
        let first = frames
            .first()
            .ok_or_else(|| PngError::invalid_input("Animation needs at least one frame"))?;
        let (width, height) = (first.width, first.height);

        for (index, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(PngError::invalid_input(format!(
                    "Frame {} is {}x{}, expected {}x{}",
                    index, frame.width, frame.height, width, height
                )));
            }
            check_buffer(frame.width, frame.height, &frame.rgba)?;
        }

        let color_type = self.options.get_color_type();
        let palette = build_palette(color_type, frames.iter().map(|f| f.rgba.as_slice()))?;

        let mut chunks = header_chunks(width, height, color_type, palette.as_ref());
        chunks.push(Chunk::AnimationControl(AnimationControl {
            num_frames: frames.len() as u32,
            num_plays: self.options.get_num_plays(),
        }));
        chunks.extend(self.ancillary.iter().cloned());

        let mut sequence_number = 0u32;

        for (index, frame) in frames.iter().enumerate() {
            let samples = pack_samples(color_type, &frame.rgba, palette.as_ref())?;
            let compressed = scanline::encode(&samples, width, color_type.channels())?;

            chunks.push(Chunk::FrameControl(frame_control(sequence_number, frame)));
            sequence_number += 1;

            if index == 0 {
                chunks.push(Chunk::ImageData(compressed));
            } else {
                chunks.push(Chunk::FrameData(FrameData {
                    sequence_number,
                    data: compressed,
                }));
                sequence_number += 1;
            }
        }

        chunks.push(Chunk::End);

        Ok(write_png(&chunks))
    }

    pub fn encode_to_file<P: AsRef<Path>>(&self, path: P, frames: &[AnimationFrame]) -> PngResult<()> {
        let bytes = self.encode(frames)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

fn frame_control(sequence_number: u32, frame: &AnimationFrame) -> FrameControl {
    FrameControl {
        sequence_number,
        width: frame.width,
        height: frame.height,
        x_offset: 0,
        y_offset: 0,
        delay_num: frame.duration_ms.min(u16::MAX as u32) as u16,
        delay_den: 1000,
        dispose_op: DisposeOp::Background,
        blend_op: BlendOp::Source,
    }
}
