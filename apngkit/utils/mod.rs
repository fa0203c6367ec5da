pub mod bytereader;
pub mod checksum;
pub mod error;
pub mod image;
pub mod info;
pub mod logger;
pub mod options;
pub(crate) mod traits;
