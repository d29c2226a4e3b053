use nom::bytes::complete::take;

use super::{
    errors::{ParseError, ParseResult},
    scalars::{dword, Dword},
};

/// Size of one layer directory record.
pub const LAYER_ENTRY_SIZE: usize = 36;
/// Byte offset of the data address field within a record.
pub const OFFSET_DATA_ADDRESS: usize = 12;
/// Byte offset of the data length field within a record.
pub const OFFSET_DATA_LENGTH: usize = 16;

/// The two live fields of a 36-byte layer directory record. The remaining
/// fields (layer height, exposure, off-time, ...) never change when layer
/// data moves, so they are skipped on parse and untouched on patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEntry {
    /// Absolute file offset of the layer's encoded pixel stream
    pub data_address: Dword,
    /// Byte length of that stream
    pub data_length: Dword,
}

/// Absolute file offset of layer `index`'s directory record.
pub fn entry_address(table_address: Dword, index: usize) -> usize {
    table_address as usize + index * LAYER_ENTRY_SIZE
}

/// Parse the record for layer `index` out of the whole file image.
pub fn parse_layer_entry(
    file: &[u8],
    table_address: Dword,
    index: usize,
) -> Result<LayerEntry, ParseError> {
    let start = entry_address(table_address, index);
    let record = file
        .get(start..start + LAYER_ENTRY_SIZE)
        .ok_or(ParseError::LayerEntryOutOfBounds(index))?;
    let (_, entry) = layer_entry(record)?;
    Ok(entry)
}

fn layer_entry(input: &[u8]) -> ParseResult<'_, LayerEntry> {
    let (input, _) = take(OFFSET_DATA_ADDRESS)(input)?;
    let (input, data_address) = dword(input)?;
    let (input, data_length) = dword(input)?;
    Ok((
        input,
        LayerEntry {
            data_address,
            data_length,
        },
    ))
}

/// Overwrite the address/length fields of layer `index`'s record in `file`,
/// leaving the other 28 bytes of the record byte-identical.
pub fn patch_layer_entry(
    file: &mut [u8],
    table_address: Dword,
    index: usize,
    entry: LayerEntry,
) -> Result<(), ParseError> {
    let start = entry_address(table_address, index) + OFFSET_DATA_ADDRESS;
    let fields = file
        .get_mut(start..start + 8)
        .ok_or(ParseError::LayerEntryOutOfBounds(index))?;
    fields[..4].copy_from_slice(&entry.data_address.to_le_bytes());
    fields[4..].copy_from_slice(&entry.data_length.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_one_entry() -> Vec<u8> {
        // one record at table address 4, every pass-through byte = 0xAB
        let mut file = vec![0xAB; 4 + LAYER_ENTRY_SIZE];
        file[4 + OFFSET_DATA_ADDRESS..4 + OFFSET_DATA_ADDRESS + 4]
            .copy_from_slice(&0x1000u32.to_le_bytes());
        file[4 + OFFSET_DATA_LENGTH..4 + OFFSET_DATA_LENGTH + 4]
            .copy_from_slice(&600u32.to_le_bytes());
        file
    }

    #[test]
    fn parses_entry_fields() {
        let file = table_with_one_entry();
        let entry = parse_layer_entry(&file, 4, 0).unwrap();
        assert_eq!(
            entry,
            LayerEntry {
                data_address: 0x1000,
                data_length: 600
            }
        );
    }

    #[test]
    fn out_of_bounds_index_fails() {
        let file = table_with_one_entry();
        let err = parse_layer_entry(&file, 4, 1).unwrap_err();
        assert_eq!(err, ParseError::LayerEntryOutOfBounds(1));
    }

    #[test]
    fn patch_only_touches_address_and_length() {
        let mut file = table_with_one_entry();
        let original = file.clone();
        patch_layer_entry(
            &mut file,
            4,
            0,
            LayerEntry {
                data_address: 0x2000,
                data_length: 123,
            },
        )
        .unwrap();

        let entry = parse_layer_entry(&file, 4, 0).unwrap();
        assert_eq!(entry.data_address, 0x2000);
        assert_eq!(entry.data_length, 123);

        // every byte outside the two patched fields is unchanged
        for (i, (a, b)) in original.iter().zip(file.iter()).enumerate() {
            let field_start = 4 + OFFSET_DATA_ADDRESS;
            if (field_start..field_start + 8).contains(&i) {
                continue;
            }
            assert_eq!(a, b, "byte {i} changed");
        }
    }
}
