//! Error types for atlas packing

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while packing sprites into atlases.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackError {
    /// The assets root could not be listed
    #[error("Failed to read assets root '{}': {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A sprite could not be decoded
    #[error("Failed to decode sprite '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Atlas canvas dimensions overflow u32
    #[error("Atlas too large: {columns}x{rows} cells of {cell_width}x{cell_height} overflows the canvas size")]
    AtlasTooLarge { cell_width: u32, cell_height: u32, columns: u32, rows: u32 },
    /// PNG encoding or file write failed
    #[error("Failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: crate::output::OutputError,
    },
}
