mod decoders;
mod encoders;
pub mod png;
mod utils;

pub use decoders::apng::ApngDecoder;
pub use decoders::png::PngDecoder;
pub use encoders::apng::ApngEncoder;
pub use encoders::png::PngEncoder;
pub use png::chunk::{Chunk, ChunkInfo, ChunkKind, ChunkTag, ColorType, TextChunk};
pub use png::registry::ChunkRegistry;
pub use utils::checksum;
pub use utils::error::{ErrorKind, PngError, PngResult};
pub use utils::image::{AnimationFrame, ApngImage, PngImage};
pub use utils::info::PngInfo;
pub use utils::logger::{LogLevel, Logger, LOG_ENV};
pub use utils::options::{DecodeOptions, EncodeOptions};

use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tsify::Tsify;
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};

use crate::png::parser::parse_png;

pub fn load_image(bytes: &[u8]) -> PngResult<PngImage> {
    load_image_with(bytes, DecodeOptions::default())
}

pub fn load_image_with(bytes: &[u8], options: DecodeOptions) -> PngResult<PngImage> {
    PngDecoder::new(Cursor::new(bytes)).with_options(options).decode()
}

pub fn load_animated_image(bytes: &[u8]) -> PngResult<ApngImage> {
    load_animated_image_with(bytes, DecodeOptions::default())
}

pub fn load_animated_image_with(bytes: &[u8], options: DecodeOptions) -> PngResult<ApngImage> {
    ApngDecoder::new(Cursor::new(bytes)).with_options(options).decode()
}

pub fn save_image(width: u32, height: u32, rgba: &[u8]) -> PngResult<Vec<u8>> {
    save_image_with(width, height, rgba, EncodeOptions::default())
}

pub fn save_image_with(width: u32, height: u32, rgba: &[u8], options: EncodeOptions) -> PngResult<Vec<u8>> {
    PngEncoder::new().with_options(options).encode(width, height, rgba)
}

pub fn save_animated_image(frames: &[AnimationFrame]) -> PngResult<Vec<u8>> {
    save_animated_image_with(frames, EncodeOptions::default())
}

pub fn save_animated_image_with(frames: &[AnimationFrame], options: EncodeOptions) -> PngResult<Vec<u8>> {
    ApngEncoder::new().with_options(options).encode(frames)
}

/// Parses the container and header without touching pixel data.
pub fn get_info(bytes: &[u8]) -> PngResult<PngInfo> {
    let mut registry = ChunkRegistry::apng();
    registry.register(ChunkTag::TEXT, png::chunk::decode_text);

    let parsed = parse_png(bytes, &registry, &DecodeOptions::default(), None)?;

    Ok(decoders::info_from_parsed(&parsed))
}

#[derive(Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct JsImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[derive(Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsImageFrame {
    width: u32,
    height: u32,
    duration_ms: u32,
    rgba: Vec<u8>,
}

#[derive(Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct JsAnimatedImage {
    width: u32,
    height: u32,
    num_plays: u32,
    frames: Vec<JsImageFrame>,
    default_image: Vec<u8>,
}

#[wasm_bindgen(js_name = getInfo)]
pub fn js_get_info(data: &[u8]) -> Result<PngInfo, String> {
    get_info(data).map_err(|e| e.to_string())
}

#[wasm_bindgen(js_name = loadImage)]
pub fn js_load_image(data: &[u8]) -> Result<JsImage, String> {
    let image = load_image(data).map_err(|e| e.to_string())?;

    Ok(JsImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_rgba(),
    })
}

#[wasm_bindgen(js_name = loadAnimatedImage)]
pub fn js_load_animated_image(data: &[u8]) -> Result<JsAnimatedImage, String> {
    let image = load_animated_image(data).map_err(|e| e.to_string())?;

    Ok(JsAnimatedImage {
        width: image.width(),
        height: image.height(),
        num_plays: image.num_plays(),
        default_image: image.default_image().to_vec(),
        frames: image
            .into_frames()
            .into_iter()
            .map(|frame| JsImageFrame {
                width: frame.width,
                height: frame.height,
                duration_ms: frame.duration_ms,
                rgba: frame.rgba,
            })
            .collect(),
    })
}

#[wasm_bindgen(js_name = saveImage)]
pub fn js_save_image(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, String> {
    save_image(width, height, rgba).map_err(|e| e.to_string())
}

/// Takes an array of `{ width, height, duration_ms, rgba }` objects.
#[wasm_bindgen(js_name = saveAnimatedImage)]
pub fn js_save_animated_image(frames: JsValue) -> Result<Vec<u8>, String> {
    let frames: Vec<JsImageFrame> = serde_wasm_bindgen::from_value(frames).map_err(|e| e.to_string())?;

    let frames: Vec<AnimationFrame> = frames
        .into_iter()
        .map(|f| AnimationFrame::new(f.width, f.height, f.duration_ms, f.rgba))
        .collect();

    save_animated_image(&frames).map_err(|e| e.to_string())
}
