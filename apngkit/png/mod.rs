pub mod animation;
pub mod chunk;
pub mod compositor;
pub mod container;
pub mod filter;
pub mod palette;
pub mod parser;
pub mod registry;
pub mod scanline;
pub mod zlib;
