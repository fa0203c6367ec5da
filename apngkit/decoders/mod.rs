pub mod apng;
pub mod png;

use crate::png::parser::ParsedPng;
use crate::utils::info::PngInfo;

pub(crate) fn info_from_parsed(parsed: &ParsedPng) -> PngInfo {
    let header = &parsed.header;

    PngInfo {
        width: header.width,
        height: header.height,
        bit_depth: header.bit_depth,
        color_type: header.color_type,
        interlace: header.interlace,
        palette_len: parsed.palette.as_ref().map(Vec::len),
        text: parsed.text.clone(),
        animation: parsed.animation,
        frame_count: parsed.frame_count(),
        chunks: parsed.chunks.clone(),
    }
}
