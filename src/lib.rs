//! Texturizer for cbddlp/photon sliced-print files.
//!
//! Decodes the run-length pixel streams of the last N layers, masks them
//! against a tiling stencil, re-encodes them, and rewrites the layer
//! directory so every subsequent offset stays consistent with the new
//! stream lengths.

pub mod binary;
pub mod cli;
pub mod codec;
pub mod error;
pub mod patcher;
pub mod stencil;

pub use error::{Result, TexturizeError};
pub use patcher::{patch_layers, texturize_file};
pub use stencil::Stencil;
