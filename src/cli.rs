use std::path::PathBuf;

use clap::Parser;

/// Applies a pixel stencil to the top layers of a .cbddlp or .photon file
/// to add texture to 3D prints.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Sliced print file to texturize (.cbddlp / .photon)
    pub input: PathBuf,
    /// Stencil image; pixels brighter than the threshold keep print pixels on
    pub stencil: PathBuf,
    /// Number of trailing (top) layers to texturize, must be positive
    pub layers: i64,
}
