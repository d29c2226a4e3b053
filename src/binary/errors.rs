use nom::error::ErrorKind;
use thiserror::Error;

pub type ParseResult<'a, T> = nom::IResult<&'a [u8], T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a cbddlp/photon file (signature mismatch)")]
    InvalidSignature,
    #[error("unsupported cbddlp version: {0}")]
    UnsupportedVersion(u32),
    #[error("invalid image resolution: {0}x{1}")]
    InvalidResolution(u32, u32),
    #[error("layer directory entry {0} is out of bounds")]
    LayerEntryOutOfBounds(usize),
    #[error("unexpected end of input")]
    Incomplete,
    #[error("parse error: {0:?}")]
    Nom(ErrorKind),
}

impl<'a> nom::error::ParseError<&'a [u8]> for ParseError {
    fn from_error_kind(_input: &'a [u8], kind: ErrorKind) -> Self {
        ParseError::Nom(kind)
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<nom::Err<ParseError>> for ParseError {
    fn from(err: nom::Err<ParseError>) -> Self {
        match err {
            nom::Err::Incomplete(_) => ParseError::Incomplete,
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        }
    }
}
