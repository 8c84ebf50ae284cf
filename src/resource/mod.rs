//! Resource access: asset sources and property files

pub mod assets;
pub mod propfile;

pub use assets::{AssetError, AssetSource, DirAssets, MemoryAssets};
pub use propfile::{parse_propfile, PropertyFile};
