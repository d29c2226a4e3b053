use nom::bytes::complete::take;

use super::{
    errors::{ParseError, ParseResult},
    scalars::{dword, Dword},
};

/// cbddlp/photon file signature, little-endian dword at offset 0.
pub const FILE_SIGNATURE: Dword = 0x12FD_0019;

/// Fixed-layout file header. Only the fields the patcher needs are kept;
/// everything between them (plate dimensions, exposure settings, ...) is
/// opaque and passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version, 1 or 2
    pub version: Dword,
    /// Printer image width in pixels
    pub resolution_x: Dword,
    /// Printer image height in pixels
    pub resolution_y: Dword,
    /// Absolute file offset of the first layer directory record
    pub layer_table_address: Dword,
    /// Total number of layers in the file
    pub layer_count: Dword,
}

impl Header {
    pub fn pixel_count(&self) -> usize {
        self.resolution_x as usize * self.resolution_y as usize
    }
}

/// Parse and validate the header at the start of a file image.
pub fn parse_header(input: &[u8]) -> Result<Header, ParseError> {
    let (_, header) = header(input)?;
    Ok(header)
}

fn header(input: &[u8]) -> ParseResult<'_, Header> {
    let (input, signature) = dword(input)?;
    if signature != FILE_SIGNATURE {
        return Err(nom::Err::Failure(ParseError::InvalidSignature));
    }
    let (input, version) = dword(input)?;
    if version != 1 && version != 2 {
        return Err(nom::Err::Failure(ParseError::UnsupportedVersion(version)));
    }
    // 0x08..0x34 holds print settings, none of which move when layer data
    // is rewritten
    let (input, _) = take(0x34usize - 0x08)(input)?;
    let (input, resolution_x) = dword(input)?;
    let (input, resolution_y) = dword(input)?;
    if resolution_x == 0 || resolution_y == 0 {
        return Err(nom::Err::Failure(ParseError::InvalidResolution(
            resolution_x,
            resolution_y,
        )));
    }
    let (input, _) = take(0x40usize - 0x3C)(input)?;
    let (input, layer_table_address) = dword(input)?;
    let (input, layer_count) = dword(input)?;
    Ok((
        input,
        Header {
            version,
            resolution_x,
            resolution_y,
            layer_table_address,
            layer_count,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(signature: u32, version: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; 0x48];
        bytes[0x00..0x04].copy_from_slice(&signature.to_le_bytes());
        bytes[0x04..0x08].copy_from_slice(&version.to_le_bytes());
        bytes[0x34..0x38].copy_from_slice(&1440u32.to_le_bytes());
        bytes[0x38..0x3C].copy_from_slice(&2560u32.to_le_bytes());
        bytes[0x40..0x44].copy_from_slice(&0x290u32.to_le_bytes());
        bytes[0x44..0x48].copy_from_slice(&50u32.to_le_bytes());
        bytes
    }

    #[test]
    fn parses_valid_header() {
        let header = parse_header(&header_bytes(FILE_SIGNATURE, 2)).unwrap();
        assert_eq!(header.version, 2);
        assert_eq!(header.resolution_x, 1440);
        assert_eq!(header.resolution_y, 2560);
        assert_eq!(header.layer_table_address, 0x290);
        assert_eq!(header.layer_count, 50);
        assert_eq!(header.pixel_count(), 1440 * 2560);
    }

    #[test]
    fn rejects_bad_signature() {
        let err = parse_header(&header_bytes(0xDEAD_BEEF, 1)).unwrap_err();
        assert_eq!(err, ParseError::InvalidSignature);
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = parse_header(&header_bytes(FILE_SIGNATURE, 3)).unwrap_err();
        assert_eq!(err, ParseError::UnsupportedVersion(3));
    }

    #[test]
    fn rejects_zero_resolution() {
        let mut bytes = header_bytes(FILE_SIGNATURE, 1);
        bytes[0x34..0x38].copy_from_slice(&0u32.to_le_bytes());
        let err = parse_header(&bytes).unwrap_err();
        assert_eq!(err, ParseError::InvalidResolution(0, 2560));
    }

    #[test]
    fn rejects_truncated_header() {
        let bytes = header_bytes(FILE_SIGNATURE, 1);
        assert!(parse_header(&bytes[..0x20]).is_err());
    }
}
