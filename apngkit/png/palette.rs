use std::collections::HashMap;

use crate::log_warn;
use crate::utils::error::{PngError, PngResult};

/// RGBA lookup table for indexed images, built from `PLTE` and an optional `tRNS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<[u8; 4]>,
}

impl Palette {
    /// Alpha comes from `trns` where present and defaults to 255 past its end.
    pub fn resolve(plte: &[[u8; 3]], trns: Option<&[u8]>) -> Palette {
        let trns = trns.unwrap_or(&[]);

        if trns.len() > plte.len() {
            log_warn!(
                "tRNS chunk has {} entries but the palette only {}, ignoring the rest",
                trns.len(),
                plte.len()
            );
        }

        let entries = plte
            .iter()
            .enumerate()
            .map(|(i, &[r, g, b])| [r, g, b, trns.get(i).copied().unwrap_or(255)])
            .collect();

        Palette { entries }
    }

    /// Builds a palette holding every distinct RGBA value across `buffers`,
    /// in first-seen order.
    pub fn from_rgba<'a>(buffers: impl IntoIterator<Item = &'a [u8]>) -> PngResult<Palette> {
        let mut seen = HashMap::new();
        let mut entries = Vec::new();

        for buffer in buffers {
            for px in buffer.chunks_exact(4) {
                let color = [px[0], px[1], px[2], px[3]];
                if seen.contains_key(&color) {
                    continue;
                }

                if entries.len() == 256 {
                    return Err(PngError::data("Image has more than 256 distinct colors"));
                }

                seen.insert(color, entries.len());
                entries.push(color);
            }
        }

        Ok(Palette { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[[u8; 4]] {
        &self.entries
    }

    pub fn get(&self, index: u8) -> PngResult<[u8; 4]> {
        self.entries.get(index as usize).copied().ok_or_else(|| {
            PngError::data(format!("Palette index {} out of range (palette has {} entries)", index, self.len()))
        })
    }

    /// Maps each RGBA pixel to its palette index.
    pub fn index_pixels(&self, rgba: &[u8]) -> PngResult<Vec<u8>> {
        let lookup: HashMap<[u8; 4], u8> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, &color)| (color, i as u8))
            .collect();

        rgba.chunks_exact(4)
            .map(|px| {
                lookup
                    .get(&[px[0], px[1], px[2], px[3]])
                    .copied()
                    .ok_or_else(|| PngError::data("Pixel color missing from palette"))
            })
            .collect()
    }

    /// RGB part, as stored in `PLTE`.
    pub fn to_plte(&self) -> Vec<[u8; 3]> {
        self.entries.iter().map(|&[r, g, b, _]| [r, g, b]).collect()
    }

    /// Alpha part, as stored in `tRNS`, with trailing opaque entries dropped.
    /// `None` when every entry is opaque.
    pub fn to_trns(&self) -> Option<Vec<u8>> {
        let last_translucent = self.entries.iter().rposition(|e| e[3] != 255)?;
        Some(self.entries[..=last_translucent].iter().map(|e| e[3]).collect())
    }
}
