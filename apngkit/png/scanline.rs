use crate::png::chunk::ColorType;
use crate::png::filter::{filter_scanlines, unfilter_scanlines, FilterType};
use crate::png::palette::Palette;
use crate::png::zlib;
use crate::utils::error::{PngError, PngResult};

/// Inflates, unfilters and expands a `width`×`height` image to packed RGBA.
///
/// `palette` is required for [`ColorType::Indexed`].
pub fn decode_rgba(
    color_type: ColorType,
    width: u32,
    height: u32,
    compressed: &[u8],
    palette: Option<&Palette>,
) -> PngResult<Vec<u8>> {
    let channels = color_type.channels();
    let row_bytes = (width as usize)
        .checked_mul(channels)
        .ok_or_else(|| PngError::data(format!("Scanline of {} pixels overflows", width)))?;

    let inflated = zlib::decompress(compressed)?;
    let samples = unfilter_scanlines(&inflated, row_bytes, height as usize, channels)?;

    expand_to_rgba(color_type, &samples, palette)
}

/// Converts unfiltered 8-bit samples to RGBA.
pub fn expand_to_rgba(color_type: ColorType, samples: &[u8], palette: Option<&Palette>) -> PngResult<Vec<u8>> {
    match color_type {
        ColorType::TruecolorAlpha => Ok(samples.to_vec()),
        ColorType::Truecolor => Ok(samples
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect()),
        ColorType::Indexed => {
            let palette = palette.ok_or_else(|| PngError::data("Indexed image without a palette"))?;
            let mut out = Vec::with_capacity(samples.len() * 4);

            for &index in samples {
                out.extend_from_slice(&palette.get(index)?);
            }

            Ok(out)
        }
        _ => Err(PngError::unsupported(format!("Color type {:?}", color_type))),
    }
}

/// Prefixes every row with filter type None and compresses the result.
pub fn encode(samples: &[u8], width: u32, channels: usize) -> PngResult<Vec<u8>> {
    let row_bytes = width as usize * channels;
    let filtered = filter_scanlines(samples, row_bytes, channels, FilterType::None);

    zlib::compress(&filtered)
}
