//! Layer-patching orchestration.
//!
//! The source file is read whole, the patched file image is computed in
//! memory, and the result is written out as a separate artifact, so the
//! source bytes are never aliased by writes.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::binary::header::parse_header;
use crate::binary::layer_table::{parse_layer_entry, patch_layer_entry, LayerEntry};
use crate::codec;
use crate::error::{Result, TexturizeError};
use crate::stencil::Stencil;

/// Suffix inserted before the extension of the derived output file name.
const OUTPUT_SUFFIX: &str = "_textured";

/// Apply `stencil` to the last `trailing_layers` layers of `source`,
/// returning the patched file image.
///
/// Layers are rewritten strictly in increasing index order at a running
/// write cursor anchored at the first target layer's original data address.
/// Re-encoded data may shrink or grow, so each rewritten directory entry
/// gets the cursor position and the exact encoded length, and the output is
/// truncated to the final cursor; directory records outside the target range
/// stay byte-identical. A request exceeding the layer count patches every
/// layer from index 0.
pub fn patch_layers(source: &[u8], stencil: &Stencil, trailing_layers: usize) -> Result<Vec<u8>> {
    let header = parse_header(source)?;
    let layer_count = header.layer_count as usize;
    let first_layer = layer_count.saturating_sub(trailing_layers);

    debug!(
        "cbddlp version {}, {}x{}, {} layers, patching [{first_layer}, {layer_count})",
        header.version, header.resolution_x, header.resolution_y, layer_count
    );

    let mut output = source.to_vec();
    let mut pixels = vec![false; header.pixel_count()];
    let mut write_cursor = 0usize;

    for layer in first_layer..layer_count {
        let entry = parse_layer_entry(source, header.layer_table_address, layer)?;
        if layer == first_layer {
            // the rewritten region starts where the first target layer's
            // data originally began; earlier layers are never touched
            write_cursor = entry.data_address as usize;
        }

        let start = entry.data_address as usize;
        let stream = source
            .get(start..start + entry.data_length as usize)
            .ok_or(TexturizeError::TruncatedLayerData { layer })?;
        codec::decode_into(stream, &mut pixels)
            .map_err(|source| TexturizeError::CorruptPixelStream { layer, source })?;

        stencil.apply(&mut pixels, header.resolution_x as usize);

        let mut encoded = Vec::with_capacity(entry.data_length as usize);
        let written = codec::encode(&pixels, &mut encoded)?;
        write_at(&mut output, write_cursor, &encoded);

        patch_layer_entry(
            &mut output,
            header.layer_table_address,
            layer,
            LayerEntry {
                data_address: write_cursor as u32,
                data_length: written as u32,
            },
        )?;

        info!(
            "layer {layer}: {} -> {written} bytes at {write_cursor:#x}",
            entry.data_length
        );
        write_cursor += written;
    }

    if first_layer < layer_count {
        // no layer data follows the last rewritten layer; drop whatever the
        // original file had past the final cursor
        output.truncate(write_cursor);
    }
    Ok(output)
}

/// Overwrite `output` at `at`, growing it if the new data runs past the end.
fn write_at(output: &mut Vec<u8>, at: usize, bytes: &[u8]) {
    let end = at + bytes.len();
    if output.len() < end {
        output.resize(end, 0);
    }
    output[at..end].copy_from_slice(bytes);
}

/// Derived output path: sibling of `input` with [`OUTPUT_SUFFIX`] before the
/// extension.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Texturize `input` with the stencil image at `stencil_path`, writing the
/// result next to the source. The output goes through a `.tmp` sibling that
/// is only renamed into place once the whole patch has succeeded, and is
/// removed on any failure.
pub fn texturize_file(input: &Path, stencil_path: &Path, trailing_layers: i64) -> Result<PathBuf> {
    if trailing_layers <= 0 {
        return Err(TexturizeError::InvalidLayerCount(trailing_layers));
    }
    if !input.exists() {
        return Err(TexturizeError::SourceNotFound(input.to_path_buf()));
    }
    if !stencil_path.exists() {
        return Err(TexturizeError::StencilNotFound(stencil_path.to_path_buf()));
    }

    let stencil = Stencil::from_path(stencil_path)?;
    info!(
        "stencil: {}x{} \"{}\"",
        stencil.width(),
        stencil.height(),
        stencil_path.display()
    );

    let output = output_path(input);
    if output.exists() {
        return Err(TexturizeError::OutputAlreadyExists(output));
    }

    let source = fs::read(input)?;
    info!("creating \"{}\"", output.display());

    let mut tmp = output.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = patch_layers(&source, &stencil, trailing_layers as usize)
        .and_then(|patched| fs::write(&tmp, patched).map_err(TexturizeError::from))
        .and_then(|()| fs::rename(&tmp, &output).map_err(TexturizeError::from));
    if let Err(err) = result {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(output)
}
