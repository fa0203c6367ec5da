pub mod apng;
pub mod png;

use crate::log_warn;
use crate::png::chunk::{Chunk, ColorType, ImageHeader};
use crate::png::palette::Palette;
use crate::utils::error::{PngError, PngResult};

pub(crate) fn check_buffer(width: u32, height: u32, rgba: &[u8]) -> PngResult<()> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions { width, height });
    }

    let expected = width as u64 * height as u64 * 4;
    if rgba.len() as u64 != expected {
        return Err(PngError::invalid_input(format!(
            "RGBA buffer is {} bytes, expected {} for {}x{}",
            rgba.len(),
            expected,
            width,
            height
        )));
    }

    Ok(())
}

/// Palette shared by every buffer when writing indexed images.
pub(crate) fn build_palette<'a>(
    color_type: ColorType,
    buffers: impl IntoIterator<Item = &'a [u8]>,
) -> PngResult<Option<Palette>> {
    match color_type {
        ColorType::Indexed => Ok(Some(Palette::from_rgba(buffers)?)),
        ColorType::Truecolor | ColorType::TruecolorAlpha => Ok(None),
        _ => Err(PngError::unsupported(format!("Encoding color type {:?}", color_type))),
    }
}

/// Converts RGBA to the sample layout of `color_type`.
pub(crate) fn pack_samples(color_type: ColorType, rgba: &[u8], palette: Option<&Palette>) -> PngResult<Vec<u8>> {
    match color_type {
        ColorType::TruecolorAlpha => Ok(rgba.to_vec()),
        ColorType::Truecolor => {
            if rgba.chunks_exact(4).any(|px| px[3] != 255) {
                return Err(PngError::data("Truecolor output requires every pixel to be opaque"));
            }
            Ok(rgba.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect())
        }
        ColorType::Indexed => {
            let palette = palette.ok_or_else(|| PngError::data("Indexed output without a palette"))?;
            palette.index_pixels(rgba)
        }
        _ => Err(PngError::unsupported(format!("Encoding color type {:?}", color_type))),
    }
}

/// `IHDR` plus `PLTE`/`tRNS` for indexed output.
pub(crate) fn header_chunks(width: u32, height: u32, color_type: ColorType, palette: Option<&Palette>) -> Vec<Chunk> {
    let mut chunks = vec![Chunk::Header(ImageHeader::new(width, height, color_type))];

    if let Some(palette) = palette {
        chunks.push(Chunk::Palette(palette.to_plte()));
        if let Some(trns) = palette.to_trns() {
            chunks.push(Chunk::Transparency(trns));
        }
    }

    chunks
}

/// Keeps only chunks the encoder does not generate itself.
pub(crate) fn passthrough_chunks(chunks: Vec<Chunk>) -> Vec<Chunk> {
    chunks
        .into_iter()
        .filter(|chunk| match chunk {
            Chunk::Text(_) => true,
            Chunk::Opaque { tag, .. } => !tag.is_animation(),
            other => {
                log_warn!("Dropping {} chunk from ancillary list, the encoder writes its own", other.tag());
                false
            }
        })
        .collect()
}
