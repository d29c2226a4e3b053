use nom::number::complete::le_u32;

use super::errors::ParseResult;

pub type Dword = u32;

pub fn dword(input: &[u8]) -> ParseResult<'_, Dword> {
    le_u32(input)
}
