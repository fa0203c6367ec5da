use crate::png::chunk::{Chunk, TextChunk};

/// A decoded still image as packed 8-bit RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    ancillary: Vec<Chunk>,
}

impl PngImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> PngImage {
        PngImage {
            width,
            height,
            rgba,
            ancillary: Vec::new(),
        }
    }

    pub fn with_ancillary(mut self, ancillary: Vec<Chunk>) -> PngImage {
        self.ancillary = ancillary;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }

    /// `tEXt` and uninterpreted chunks carried over from the source file.
    pub fn ancillary(&self) -> &[Chunk] {
        &self.ancillary
    }

    pub fn text(&self) -> Vec<&TextChunk> {
        text_chunks(&self.ancillary)
    }
}

/// One fully composited, canvas-sized animation frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    pub width: u32,
    pub height: u32,
    pub duration_ms: u32,
    pub rgba: Vec<u8>,
}

impl AnimationFrame {
    pub fn new(width: u32, height: u32, duration_ms: u32, rgba: Vec<u8>) -> AnimationFrame {
        AnimationFrame {
            width,
            height,
            duration_ms,
            rgba,
        }
    }
}

/// A decoded animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApngImage {
    width: u32,
    height: u32,
    num_plays: u32,
    frames: Vec<AnimationFrame>,
    default_image: Vec<u8>,
    ancillary: Vec<Chunk>,
}

impl ApngImage {
    pub fn new(
        width: u32,
        height: u32,
        num_plays: u32,
        frames: Vec<AnimationFrame>,
        default_image: Vec<u8>,
    ) -> ApngImage {
        ApngImage {
            width,
            height,
            num_plays,
            frames,
            default_image,
            ancillary: Vec::new(),
        }
    }

    pub fn with_ancillary(mut self, ancillary: Vec<Chunk>) -> ApngImage {
        self.ancillary = ancillary;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 0 means loop forever.
    pub fn num_plays(&self) -> u32 {
        self.num_plays
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<AnimationFrame> {
        self.frames
    }

    /// The `IDAT` image shown by readers without animation support.
    pub fn default_image(&self) -> &[u8] {
        &self.default_image
    }

    pub fn ancillary(&self) -> &[Chunk] {
        &self.ancillary
    }

    pub fn text(&self) -> Vec<&TextChunk> {
        text_chunks(&self.ancillary)
    }

    /// Sum of all frame durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms as u64).sum()
    }
}

fn text_chunks(chunks: &[Chunk]) -> Vec<&TextChunk> {
    chunks
        .iter()
        .filter_map(|chunk| match chunk {
            Chunk::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}
