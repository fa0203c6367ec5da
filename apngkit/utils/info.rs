use serde::Serialize;
use tsify::Tsify;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::png::chunk::{AnimationControl, ChunkInfo, ColorType, Interlace, TextChunk};

/// Container-level description of a PNG or APNG, gathered without decoding pixels.
#[derive(Debug, Clone, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub interlace: Interlace,
    pub palette_len: Option<usize>,
    pub text: Vec<TextChunk>,
    pub animation: Option<AnimationControl>,
    pub frame_count: usize,
    pub chunks: Vec<ChunkInfo>,
}

impl PngInfo {
    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }
}
