//! Code point addresses: parsing `U+XXXX` style input and printing summaries.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::preceded,
    IResult,
};

use crate::error::{NormError, Result};

/// Convert an integer to a character, rejecting surrogates and values above U+10FFFF.
pub fn from_u32(value: u32) -> Result<char> {
    char::from_u32(value).ok_or(NormError::InvalidCharacter(value))
}

fn hex_value(input: &str) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(1, 8, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u32::from_str_radix(digits, 16),
    )(input)
}

fn address(input: &str) -> IResult<&str, u32> {
    all_consuming(preceded(alt((tag_no_case("U+"), tag_no_case("0x"))), hex_value))(input)
}

/// Read a character from a code point address.
///
/// A single character stands for itself. Anything longer must be a hex
/// address written as `U+XXXX` or `0xXXXX`.
///
/// # Examples
/// ```
/// use normforms::codepoint::parse_address;
///
/// assert_eq!(parse_address("U+FF21").unwrap(), '\u{FF21}');
/// assert_eq!(parse_address("0x41").unwrap(), 'A');
/// assert_eq!(parse_address("<").unwrap(), '<');
/// ```
pub fn parse_address(input: &str) -> Result<char> {
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }
    match address(input.trim()) {
        Ok((_, value)) => from_u32(value),
        Err(_) => Err(NormError::InvalidAddress(input.to_string())),
    }
}

/// Short human-readable form of a character: `U+FF21 (Ａ)`.
pub fn summarize(c: char) -> String {
    if c.is_control() {
        format!("U+{:04X}", c as u32)
    } else {
        format!("U+{:04X} ({})", c as u32, c)
    }
}
