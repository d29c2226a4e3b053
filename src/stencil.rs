use std::path::{Path, PathBuf};

use thiserror::Error;

/// Channel-sum threshold separating "on" from "off" stencil pixels:
/// r + g + b above this counts as white. Design constant, not configurable.
pub const LUMA_THRESHOLD: u16 = 382;

#[derive(Error, Debug)]
pub enum StencilError {
    #[error("invalid stencil image \"{}\": {source}", .path.display())]
    InvalidImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("stencil image has zero area")]
    EmptyImage,
}

/// A black/white pixel mask tiled over layer images. Immutable once built;
/// `pixels.len() == width * height` always holds.
#[derive(Debug, Clone)]
pub struct Stencil {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Stencil {
    /// Decode an image file into a stencil.
    pub fn from_path(path: &Path) -> Result<Self, StencilError> {
        let img = image::open(path).map_err(|source| StencilError::InvalidImage {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(&img)
    }

    /// Threshold a decoded image into a stencil. Alpha and color nuance are
    /// ignored, only the RGB channel sum is consulted.
    pub fn from_image(img: &image::DynamicImage) -> Result<Self, StencilError> {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(StencilError::EmptyImage);
        }
        let pixels = rgb
            .pixels()
            .map(|p| u16::from(p.0[0]) + u16::from(p.0[1]) + u16::from(p.0[2]) > LUMA_THRESHOLD)
            .collect();
        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Mask `pixels` in place, tiling the stencil over a canvas of
    /// `canvas_width` columns with independent wraparound on both axes.
    /// Pure AND mask: an off pixel never turns on.
    pub fn apply(&self, pixels: &mut [bool], canvas_width: usize) {
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let x = (i % canvas_width) % self.width;
            let y = (i / canvas_width) % self.height;
            *pixel = *pixel && self.pixels[y * self.width + x];
        }
    }
}
