use std::fmt::{self, Debug, Display, Formatter};

use serde::{Serialize, Serializer};
use tsify::Tsify;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::log_warn;
use crate::utils::bytereader::ByteReader;
use crate::utils::error::{PngError, PngResult};
use crate::utils::options::DecodeOptions;

/// Four-letter chunk type code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    pub const IHDR: ChunkTag = ChunkTag(*b"IHDR");
    pub const PLTE: ChunkTag = ChunkTag(*b"PLTE");
    pub const TRNS: ChunkTag = ChunkTag(*b"tRNS");
    pub const IDAT: ChunkTag = ChunkTag(*b"IDAT");
    pub const TEXT: ChunkTag = ChunkTag(*b"tEXt");
    pub const IEND: ChunkTag = ChunkTag(*b"IEND");
    pub const ACTL: ChunkTag = ChunkTag(*b"acTL");
    pub const FCTL: ChunkTag = ChunkTag(*b"fcTL");
    pub const FDAT: ChunkTag = ChunkTag(*b"fdAT");

    pub const fn new(bytes: [u8; 4]) -> Self {
        ChunkTag(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    // Property bits live in bit 5 (the ASCII case bit) of each byte.

    pub const fn is_critical(&self) -> bool {
        self.0[0] & 0x20 == 0
    }

    pub const fn is_public(&self) -> bool {
        self.0[1] & 0x20 == 0
    }

    pub const fn is_safe_to_copy(&self) -> bool {
        self.0[3] & 0x20 != 0
    }

    /// `acTL`, `fcTL` or `fdAT`.
    pub fn is_animation(&self) -> bool {
        *self == ChunkTag::ACTL || *self == ChunkTag::FCTL || *self == ChunkTag::FDAT
    }
}

impl Display for ChunkTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl Debug for ChunkTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({})", self)
    }
}

impl Serialize for ChunkTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tsify)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    Indexed = 3,
    GreyscaleAlpha = 4,
    TruecolorAlpha = 6,
}

impl ColorType {
    pub fn from_code(code: u8) -> PngResult<ColorType> {
        match code {
            0 => Ok(ColorType::Greyscale),
            2 => Ok(ColorType::Truecolor),
            3 => Ok(ColorType::Indexed),
            4 => Ok(ColorType::GreyscaleAlpha),
            6 => Ok(ColorType::TruecolorAlpha),
            _ => Err(PngError::unsupported(format!("Unknown color type {}", code))),
        }
    }

    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Samples per pixel at 8 bits per sample.
    pub const fn channels(&self) -> usize {
        match self {
            ColorType::Greyscale | ColorType::Indexed => 1,
            ColorType::GreyscaleAlpha => 2,
            ColorType::Truecolor => 3,
            ColorType::TruecolorAlpha => 4,
        }
    }

    pub const fn is_supported(&self) -> bool {
        matches!(self, ColorType::Truecolor | ColorType::TruecolorAlpha | ColorType::Indexed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tsify)]
pub enum Interlace {
    None = 0,
    Adam7 = 1,
}

impl Interlace {
    pub fn from_code(code: u8) -> PngResult<Interlace> {
        match code {
            0 => Ok(Interlace::None),
            1 => Ok(Interlace::Adam7),
            _ => Err(PngError::unsupported(format!("Unknown interlace method {}", code))),
        }
    }
}

/// Contents of `IHDR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace: Interlace,
}

impl ImageHeader {
    /// An 8-bit, non-interlaced header, the only layout the encoder writes.
    pub fn new(width: u32, height: u32, color_type: ColorType) -> Self {
        ImageHeader {
            width,
            height,
            bit_depth: 8,
            color_type,
            compression_method: 0,
            filter_method: 0,
            interlace: Interlace::None,
        }
    }

    pub fn decode(data: &[u8]) -> PngResult<ImageHeader> {
        let mut reader = ByteReader::new(data, "IHDR chunk");

        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        let bit_depth = reader.read_u8()?;
        let color_type = ColorType::from_code(reader.read_u8()?)?;
        let compression_method = reader.read_u8()?;
        let filter_method = reader.read_u8()?;
        let interlace = Interlace::from_code(reader.read_u8()?)?;

        if !reader.is_empty() {
            log_warn!("IHDR chunk has {} trailing bytes", reader.bytes_left());
        }

        Ok(ImageHeader {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(13);
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.push(self.bit_depth);
        out.push(self.color_type.code());
        out.push(self.compression_method);
        out.push(self.filter_method);
        out.push(self.interlace as u8);
        out
    }

    /// Rejects every header this codec cannot turn into RGBA pixels.
    pub fn validate(&self, options: &DecodeOptions) -> PngResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PngError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.width > options.get_max_width() || self.height > options.get_max_height() {
            return Err(PngError::unsupported(format!(
                "Image dimensions {}x{} exceed the configured limit of {}x{}",
                self.width,
                self.height,
                options.get_max_width(),
                options.get_max_height()
            )));
        }

        if self.bit_depth != 8 {
            return Err(PngError::unsupported(format!("Bit depth {}", self.bit_depth)));
        }

        if self.compression_method != 0 {
            return Err(PngError::unsupported(format!("Compression method {}", self.compression_method)));
        }

        if self.filter_method != 0 {
            return Err(PngError::unsupported(format!("Filter method {}", self.filter_method)));
        }

        if self.interlace != Interlace::None {
            return Err(PngError::unsupported("Interlaced images"));
        }

        if !self.color_type.is_supported() {
            return Err(PngError::unsupported(format!("Color type {:?}", self.color_type)));
        }

        Ok(())
    }
}

/// Contents of `acTL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tsify)]
pub struct AnimationControl {
    pub num_frames: u32,
    /// 0 means loop forever.
    pub num_plays: u32,
}

impl AnimationControl {
    pub fn decode(data: &[u8]) -> PngResult<AnimationControl> {
        let mut reader = ByteReader::new(data, "acTL chunk");

        let num_frames = reader.read_u32()?;
        let num_plays = reader.read_u32()?;

        if num_frames == 0 {
            log_warn!("acTL chunk declares zero frames");
        }

        Ok(AnimationControl { num_frames, num_plays })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8);
        out.extend_from_slice(&self.num_frames.to_be_bytes());
        out.extend_from_slice(&self.num_plays.to_be_bytes());
        out
    }
}

/// How the canvas is prepared before a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeOp {
    None = 0,
    Background = 1,
    Previous = 2,
}

impl DisposeOp {
    pub fn from_code(code: u8) -> PngResult<DisposeOp> {
        match code {
            0 => Ok(DisposeOp::None),
            1 => Ok(DisposeOp::Background),
            2 => Ok(DisposeOp::Previous),
            _ => Err(PngError::unsupported(format!("Unknown dispose op {}", code))),
        }
    }
}

/// How a frame's pixels are combined with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Source = 0,
    Over = 1,
}

impl BlendOp {
    pub fn from_code(code: u8) -> PngResult<BlendOp> {
        match code {
            0 => Ok(BlendOp::Source),
            1 => Ok(BlendOp::Over),
            _ => Err(PngError::unsupported(format!("Unknown blend op {}", code))),
        }
    }
}

/// Contents of `fcTL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameControl {
    pub sequence_number: u32,
    pub width: u32,
    pub height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub delay_num: u16,
    pub delay_den: u16,
    pub dispose_op: DisposeOp,
    pub blend_op: BlendOp,
}

impl FrameControl {
    pub fn decode(data: &[u8]) -> PngResult<FrameControl> {
        let mut reader = ByteReader::new(data, "fcTL chunk");

        Ok(FrameControl {
            sequence_number: reader.read_u32()?,
            width: reader.read_u32()?,
            height: reader.read_u32()?,
            x_offset: reader.read_u32()?,
            y_offset: reader.read_u32()?,
            delay_num: reader.read_u16()?,
            delay_den: reader.read_u16()?,
            dispose_op: DisposeOp::from_code(reader.read_u8()?)?,
            blend_op: BlendOp::from_code(reader.read_u8()?)?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(26);
        out.extend_from_slice(&self.sequence_number.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.x_offset.to_be_bytes());
        out.extend_from_slice(&self.y_offset.to_be_bytes());
        out.extend_from_slice(&self.delay_num.to_be_bytes());
        out.extend_from_slice(&self.delay_den.to_be_bytes());
        out.push(self.dispose_op as u8);
        out.push(self.blend_op as u8);
        out
    }

    /// Display time in milliseconds. A zero denominator counts as 100.
    pub fn duration_ms(&self) -> u32 {
        let den = if self.delay_den == 0 { 100 } else { self.delay_den as u32 };
        let num = self.delay_num as u32;

        (num * 1000 + den / 2) / den
    }
}

/// Contents of `fdAT`: a sequence number and a slice of compressed frame data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameData {
    pub sequence_number: u32,
    pub data: Vec<u8>,
}

impl FrameData {
    pub fn decode(data: &[u8]) -> PngResult<FrameData> {
        let mut reader = ByteReader::new(data, "fdAT chunk");
        let sequence_number = reader.read_u32()?;

        Ok(FrameData {
            sequence_number,
            data: reader.read_to_end().to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len());
        out.extend_from_slice(&self.sequence_number.to_be_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

/// Latin-1 `keyword\0text` pair from `tEXt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tsify)]
pub struct TextChunk {
    pub keyword: String,
    pub text: String,
}

impl TextChunk {
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        TextChunk {
            keyword: keyword.into(),
            text: text.into(),
        }
    }

    pub fn decode(data: &[u8]) -> PngResult<TextChunk> {
        let (keyword, text) = match data.iter().position(|&b| b == 0) {
            Some(nul) => (&data[..nul], &data[nul + 1..]),
            None => {
                log_warn!("tEXt chunk without a NUL separator");
                (data, &[][..])
            }
        };

        Ok(TextChunk {
            keyword: latin1_to_string(keyword),
            text: latin1_to_string(text),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = string_to_latin1(&self.keyword);
        out.push(0);
        out.extend(string_to_latin1(&self.text));
        out
    }
}

fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn string_to_latin1(s: &str) -> Vec<u8> {
    s.chars().map(|c| u8::try_from(c as u32).unwrap_or(b'?')).collect()
}

/// A chunk decoded into its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Header(ImageHeader),
    Palette(Vec<[u8; 3]>),
    /// Raw `tRNS` payload; per-entry alpha for indexed images.
    Transparency(Vec<u8>),
    ImageData(Vec<u8>),
    Text(TextChunk),
    AnimationControl(AnimationControl),
    FrameControl(FrameControl),
    FrameData(FrameData),
    End,
    /// Any chunk that was not interpreted, kept byte for byte.
    Opaque { tag: ChunkTag, data: Vec<u8> },
}

impl Chunk {
    pub fn tag(&self) -> ChunkTag {
        match self {
            Chunk::Header(_) => ChunkTag::IHDR,
            Chunk::Palette(_) => ChunkTag::PLTE,
            Chunk::Transparency(_) => ChunkTag::TRNS,
            Chunk::ImageData(_) => ChunkTag::IDAT,
            Chunk::Text(_) => ChunkTag::TEXT,
            Chunk::AnimationControl(_) => ChunkTag::ACTL,
            Chunk::FrameControl(_) => ChunkTag::FCTL,
            Chunk::FrameData(_) => ChunkTag::FDAT,
            Chunk::End => ChunkTag::IEND,
            Chunk::Opaque { tag, .. } => *tag,
        }
    }

    pub fn kind(&self) -> ChunkKind {
        match self {
            Chunk::Header(_) => ChunkKind::Header,
            Chunk::Palette(_) => ChunkKind::Palette,
            Chunk::Transparency(_) => ChunkKind::Transparency,
            Chunk::ImageData(_) => ChunkKind::ImageData,
            Chunk::Text(_) => ChunkKind::Text,
            Chunk::AnimationControl(_) => ChunkKind::AnimationControl,
            Chunk::FrameControl(_) => ChunkKind::FrameControl,
            Chunk::FrameData(_) => ChunkKind::FrameData,
            Chunk::End => ChunkKind::End,
            Chunk::Opaque { .. } => ChunkKind::Opaque,
        }
    }

    /// Serializes the data segment (no length, tag or CRC).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Chunk::Header(header) => header.encode(),
            Chunk::Palette(entries) => entries.iter().flatten().copied().collect(),
            Chunk::Transparency(alpha) => alpha.clone(),
            Chunk::ImageData(data) => data.clone(),
            Chunk::Text(text) => text.encode(),
            Chunk::AnimationControl(actl) => actl.encode(),
            Chunk::FrameControl(fctl) => fctl.encode(),
            Chunk::FrameData(fdat) => fdat.encode(),
            Chunk::End => Vec::new(),
            Chunk::Opaque { data, .. } => data.clone(),
        }
    }
}

pub fn decode_header(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::Header(ImageHeader::decode(data)?))
}

pub fn decode_palette(data: &[u8]) -> PngResult<Chunk> {
    if data.is_empty() || data.len() % 3 != 0 {
        return Err(PngError::format(format!("PLTE chunk length {} is not a positive multiple of 3", data.len())));
    }

    if data.len() / 3 > 256 {
        return Err(PngError::format(format!("PLTE chunk has {} entries", data.len() / 3)));
    }

    Ok(Chunk::Palette(data.chunks_exact(3).map(|rgb| [rgb[0], rgb[1], rgb[2]]).collect()))
}

pub fn decode_transparency(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::Transparency(data.to_vec()))
}

pub fn decode_image_data(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::ImageData(data.to_vec()))
}

pub fn decode_text(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::Text(TextChunk::decode(data)?))
}

pub fn decode_end(data: &[u8]) -> PngResult<Chunk> {
    if !data.is_empty() {
        log_warn!("IEND chunk carries {} bytes of data", data.len());
    }

    Ok(Chunk::End)
}

pub fn decode_animation_control(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::AnimationControl(AnimationControl::decode(data)?))
}

pub fn decode_frame_control(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::FrameControl(FrameControl::decode(data)?))
}

pub fn decode_frame_data(data: &[u8]) -> PngResult<Chunk> {
    Ok(Chunk::FrameData(FrameData::decode(data)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tsify)]
pub enum ChunkKind {
    Header,
    Palette,
    Transparency,
    ImageData,
    Text,
    AnimationControl,
    FrameControl,
    FrameData,
    End,
    Opaque,
}

/// Metadata about one framed chunk, reported to observers and kept in `PngInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tsify)]
pub struct ChunkInfo {
    #[tsify(type = "string")]
    pub tag: ChunkTag,
    pub length: u32,
    pub crc: u32,
    pub crc_valid: bool,
    pub kind: ChunkKind,
}
