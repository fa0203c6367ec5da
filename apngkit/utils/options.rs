use crate::png::chunk::ColorType;

/// Decoder configuration.
///
/// Fields are private; use the chained `set_*` methods.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Reject chunks whose stored CRC does not match the recomputed one.
    ///
    /// - Default value: `false` (mismatches are logged and ignored)
    strict_crc: bool,
    /// Images wider than this are rejected before any pixel work.
    ///
    /// - Default value: 65536
    max_width: u32,
    /// Images taller than this are rejected before any pixel work.
    ///
    /// - Default value: 65536
    max_height: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict_crc: false,
            max_width: 1 << 16,
            max_height: 1 << 16,
        }
    }
}

impl DecodeOptions {
    pub const fn get_strict_crc(&self) -> bool {
        self.strict_crc
    }

    pub const fn get_max_width(&self) -> u32 {
        self.max_width
    }

    pub const fn get_max_height(&self) -> u32 {
        self.max_height
    }

    pub const fn set_strict_crc(mut self, yes: bool) -> Self {
        self.strict_crc = yes;
        self
    }

    pub const fn set_max_width(mut self, width: u32) -> Self {
        self.max_width = width;
        self
    }

    pub const fn set_max_height(mut self, height: u32) -> Self {
        self.max_height = height;
        self
    }
}

/// Encoder configuration.
///
/// Compression level and scanline filter are fixed; only the stored
/// colour layout and the animation loop count can be chosen.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    color_type: ColorType,
    num_plays: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            color_type: ColorType::TruecolorAlpha,
            num_plays: 0,
        }
    }
}

impl EncodeOptions {
    pub const fn get_color_type(&self) -> ColorType {
        self.color_type
    }

    pub const fn get_num_plays(&self) -> u32 {
        self.num_plays
    }

    pub const fn set_color_type(mut self, color_type: ColorType) -> Self {
        self.color_type = color_type;
        self
    }

    /// Loop count written to `acTL`, 0 meaning forever.
    pub const fn set_num_plays(mut self, plays: u32) -> Self {
        self.num_plays = plays;
        self
    }
}
