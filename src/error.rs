use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::binary::errors::ParseError;
use crate::codec::CodecError;
use crate::stencil::StencilError;

pub type Result<T> = std::result::Result<T, TexturizeError>;

/// Every failure mode of a texturize run. All of these abort the whole
/// operation: the source file is never modified and any partially written
/// temporary output is removed.
#[derive(Error, Debug)]
pub enum TexturizeError {
    #[error("invalid layer count: {0} (must be a positive integer)")]
    InvalidLayerCount(i64),
    #[error("input file not found \"{}\"", .0.display())]
    SourceNotFound(PathBuf),
    #[error("stencil file not found \"{}\"", .0.display())]
    StencilNotFound(PathBuf),
    #[error(transparent)]
    Stencil(#[from] StencilError),
    #[error("can't write to \"{}\", file already exists", .0.display())]
    OutputAlreadyExists(PathBuf),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("layer {layer} data extends past the end of the file")]
    TruncatedLayerData { layer: usize },
    #[error("corrupt pixel stream in layer {layer}: {source}")]
    CorruptPixelStream { layer: usize, source: CodecError },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TexturizeError {
    /// Process exit status for this error, distinct per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            TexturizeError::Io(_) => 1,
            TexturizeError::InvalidLayerCount(_) => 2,
            TexturizeError::SourceNotFound(_) => 3,
            TexturizeError::StencilNotFound(_) => 4,
            TexturizeError::Stencil(_) => 5,
            TexturizeError::OutputAlreadyExists(_) => 6,
            TexturizeError::Parse(ParseError::InvalidSignature) => 7,
            TexturizeError::Parse(ParseError::UnsupportedVersion(_)) => 8,
            TexturizeError::Parse(_) => 9,
            TexturizeError::TruncatedLayerData { .. }
            | TexturizeError::CorruptPixelStream { .. } => 10,
        }
    }
}
