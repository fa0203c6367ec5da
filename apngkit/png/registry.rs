use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use crate::png::chunk::{self, Chunk, ChunkTag};
use crate::utils::error::PngResult;

/// Turns a chunk's data segment into its typed form.
pub type DecodeFn = fn(&[u8]) -> PngResult<Chunk>;

/// Tag to decoder table owned by a single decoder instance.
///
/// Tags without an entry decode to [`Chunk::Opaque`].
#[derive(Clone, Default)]
pub struct ChunkRegistry {
    decoders: HashMap<ChunkTag, DecodeFn>,
}

impl ChunkRegistry {
    pub fn empty() -> Self {
        ChunkRegistry::default()
    }

    /// Chunks understood by the still-image reader.
    pub fn png() -> Self {
        let mut registry = ChunkRegistry::empty();
        registry.register(ChunkTag::IHDR, chunk::decode_header);
        registry.register(ChunkTag::PLTE, chunk::decode_palette);
        registry.register(ChunkTag::TRNS, chunk::decode_transparency);
        registry.register(ChunkTag::IDAT, chunk::decode_image_data);
        registry.register(ChunkTag::TEXT, chunk::decode_text);
        registry.register(ChunkTag::IEND, chunk::decode_end);
        registry
    }

    /// Chunks understood by the animation reader. `tEXt` stays opaque here.
    pub fn apng() -> Self {
        let mut registry = ChunkRegistry::png();
        registry.unregister(ChunkTag::TEXT);
        registry.register(ChunkTag::ACTL, chunk::decode_animation_control);
        registry.register(ChunkTag::FCTL, chunk::decode_frame_control);
        registry.register(ChunkTag::FDAT, chunk::decode_frame_data);
        registry
    }

    /// Returns the decoder previously bound to `tag`, if any.
    pub fn register(&mut self, tag: ChunkTag, decode: DecodeFn) -> Option<DecodeFn> {
        self.decoders.insert(tag, decode)
    }

    pub fn unregister(&mut self, tag: ChunkTag) -> Option<DecodeFn> {
        self.decoders.remove(&tag)
    }

    pub fn is_registered(&self, tag: ChunkTag) -> bool {
        self.decoders.contains_key(&tag)
    }

    pub fn decode(&self, tag: ChunkTag, data: &[u8]) -> PngResult<Chunk> {
        match self.decoders.get(&tag) {
            Some(decode) => decode(data),
            None => Ok(Chunk::Opaque {
                tag,
                data: data.to_vec(),
            }),
        }
    }
}

impl Debug for ChunkRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&ChunkTag> = self.decoders.keys().collect();
        tags.sort();
        f.debug_struct("ChunkRegistry").field("tags", &tags).finish()
    }
}
