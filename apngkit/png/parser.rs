use crate::png::animation::SequenceEntry;
use crate::png::chunk::{AnimationControl, Chunk, ChunkInfo, ChunkTag, ColorType, ImageHeader, TextChunk};
use crate::png::container::read_chunks;
use crate::png::palette::Palette;
use crate::png::registry::ChunkRegistry;
use crate::utils::error::{PngError, PngResult};
use crate::utils::options::DecodeOptions;
use crate::{log_debug, log_warn};

/// Callback receiving metadata for every chunk as it is parsed.
pub type ChunkObserver = Box<dyn FnMut(&ChunkInfo)>;

/// Everything collected from one pass over the chunk stream.
#[derive(Debug, Clone)]
pub struct ParsedPng {
    pub header: ImageHeader,
    pub palette: Option<Vec<[u8; 3]>>,
    pub transparency: Option<Vec<u8>>,
    /// Concatenated `IDAT` payloads.
    pub image_data: Vec<u8>,
    pub animation: Option<AnimationControl>,
    pub sequence: Vec<SequenceEntry>,
    pub text: Vec<TextChunk>,
    /// `tEXt` and uninterpreted chunks, in file order.
    pub ancillary: Vec<Chunk>,
    pub chunks: Vec<ChunkInfo>,
}

impl ParsedPng {
    /// Number of `fcTL` chunks seen.
    pub fn frame_count(&self) -> usize {
        self.sequence
            .iter()
            .filter(|e| matches!(e, SequenceEntry::FrameControl(_)))
            .count()
    }

    /// The RGBA palette for indexed images; `None` for the other colour types.
    pub fn resolve_palette(&self) -> PngResult<Option<Palette>> {
        if self.header.color_type != ColorType::Indexed {
            return Ok(None);
        }

        let plte = self
            .palette
            .as_ref()
            .ok_or_else(|| PngError::data("Indexed image without a PLTE chunk"))?;

        Ok(Some(Palette::resolve(plte, self.transparency.as_deref())))
    }
}

/// Frames, checks and decodes every chunk through `registry`.
pub fn parse_png(
    bytes: &[u8],
    registry: &ChunkRegistry,
    options: &DecodeOptions,
    mut observer: Option<&mut ChunkObserver>,
) -> PngResult<ParsedPng> {
    let raw_chunks = read_chunks(bytes)?;

    let mut header = None;
    let mut palette = None;
    let mut transparency = None;
    let mut image_data = Vec::new();
    let mut idat_seen = false;
    let mut animation = None;
    let mut sequence = Vec::new();
    let mut text = Vec::new();
    let mut ancillary = Vec::new();
    let mut chunks = Vec::with_capacity(raw_chunks.len());

    for (index, raw) in raw_chunks.iter().enumerate() {
        let crc_valid = raw.crc_matches();

        if !crc_valid {
            if options.get_strict_crc() {
                return Err(PngError::format(format!(
                    "CRC mismatch for chunk {}: stored 0x{:08x}, computed 0x{:08x}",
                    raw.tag,
                    raw.crc,
                    raw.computed_crc()
                )));
            }

            log_warn!(
                "CRC mismatch for chunk {}: stored 0x{:08x}, computed 0x{:08x}",
                raw.tag,
                raw.crc,
                raw.computed_crc()
            );
        }

        if index == 0 && raw.tag != ChunkTag::IHDR {
            return Err(PngError::format(format!("First chunk is {}, expected IHDR", raw.tag)));
        }

        let chunk = registry.decode(raw.tag, raw.data)?;

        let info = ChunkInfo {
            tag: raw.tag,
            length: raw.data.len() as u32,
            crc: raw.crc,
            crc_valid,
            kind: chunk.kind(),
        };

        if let Some(observer) = observer.as_deref_mut() {
            observer(&info);
        }
        chunks.push(info);

        match chunk {
            Chunk::Header(h) => {
                if header.is_some() {
                    return Err(PngError::format("Duplicate IHDR chunk"));
                }
                header = Some(h);
            }
            Chunk::Palette(entries) => {
                if palette.is_some() {
                    log_warn!("Duplicate PLTE chunk, keeping the last one");
                }
                palette = Some(entries);
            }
            Chunk::Transparency(alpha) => transparency = Some(alpha),
            Chunk::ImageData(data) => {
                idat_seen = true;
                image_data.extend_from_slice(&data);
            }
            Chunk::Text(t) => {
                text.push(t.clone());
                ancillary.push(Chunk::Text(t));
            }
            Chunk::AnimationControl(actl) => {
                if idat_seen {
                    return Err(PngError::format("acTL chunk appears after IDAT"));
                }
                animation = Some(actl);
            }
            Chunk::FrameControl(fctl) => sequence.push(SequenceEntry::FrameControl(fctl)),
            Chunk::FrameData(fdat) => sequence.push(SequenceEntry::FrameAppend(fdat)),
            Chunk::End => {}
            Chunk::Opaque { tag, data } => {
                if tag.is_animation() {
                    log_debug!("Skipping animation chunk {} in still image", tag);
                } else {
                    ancillary.push(Chunk::Opaque { tag, data });
                }
            }
        }
    }

    let header = header.ok_or_else(|| PngError::format("Missing IHDR chunk"))?;

    Ok(ParsedPng {
        header,
        palette,
        transparency,
        image_data,
        animation,
        sequence,
        text,
        ancillary,
        chunks,
    })
}
