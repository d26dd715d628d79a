//! Field escape codec.
//!
//! Station fields are stored inside a quoted, pipe-delimited line. Anything
//! that is not plain printable ASCII is written as one `\xHH` escape per
//! UTF-8 byte, so `"П"` becomes `\xd0\x9f`. Decoding reverses this at the
//! byte level and then reads the bytes back as UTF-8.
//!
//! Named escapes such as `\N{LATIN SMALL LETTER A}` are not resolved; a
//! token containing one is kept as written. The game never writes them and
//! [`encode`] never produces them.

use thiserror::Error;

/// Separator between the fields of one station line.
pub const FIELD_SEPARATOR: char = '|';

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Why a token could not be unescaped.
///
/// These never reach the caller of [`decode`], which falls back to the raw
/// token. [`try_decode`] exposes them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("trailing backslash at offset {offset}")]
    TrailingBackslash { offset: usize },

    #[error("truncated \\{kind} escape at offset {offset}")]
    TruncatedEscape { kind: char, offset: usize },

    #[error("escape at offset {offset} has value {value:#x}, which does not fit in one byte")]
    ValueOutOfRange { offset: usize, value: u32 },

    #[error("named \\N escape at offset {offset} is not supported")]
    NamedEscape { offset: usize },

    #[error("character {ch:?} at offset {offset} is outside Latin-1")]
    NonLatin1 { ch: char, offset: usize },

    #[error("escaped bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Returns true for bytes that are written to the file unescaped.
///
/// Printable ASCII passes through, except the field separator, the quote
/// that delimits the payload and the backslash that introduces escapes.
#[inline]
pub(crate) fn is_plain_byte(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7e) && !matches!(byte, b'|' | b'"' | b'\\')
}

/// Escapes `text` for embedding in a station line.
///
/// # Examples
///
/// ```
/// use sii_station_editor::sii::escape::encode;
///
/// assert_eq!(encode("Rock FM"), "Rock FM");
/// assert_eq!(encode("Пр"), "\\xd0\\x9f\\xd1\\x80");
/// assert_eq!(encode("a|b"), "a\\x7cb");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if is_plain_byte(byte) {
            escaped.push(char::from(byte));
        } else if byte == b'\\' {
            escaped.push_str("\\\\");
        } else {
            escaped.push('\\');
            escaped.push('x');
            escaped.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            escaped.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
    }
    escaped
}

/// Decodes an escaped token, returning it unchanged if it is malformed.
///
/// Hand-edited files regularly contain tokens that are not valid escapes,
/// and those are shown as typed rather than rejected.
///
/// # Examples
///
/// ```
/// use sii_station_editor::sii::escape::decode;
///
/// assert_eq!(decode("\\xd0\\x9f\\xd1\\x80"), "Пр");
/// assert_eq!(decode("plain"), "plain");
/// assert_eq!(decode("broken\\x4"), "broken\\x4");
/// ```
#[must_use]
pub fn decode(token: &str) -> String {
    match try_decode(token) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(token, error = %e, "keeping undecodable field as written");
            token.to_owned()
        }
    }
}

/// Decodes an escaped token, reporting why it is malformed.
pub fn try_decode(token: &str) -> Result<String, EscapeError> {
    if token.is_ascii() && !token.contains('\\') {
        return Ok(token.to_owned());
    }
    let bytes = unescape_bytes(token)?;
    Ok(String::from_utf8(bytes)?)
}

/// Splits a quoted payload into its raw (still escaped) fields.
#[must_use]
pub fn split_fields(payload: &str) -> Vec<&str> {
    payload.split(FIELD_SEPARATOR).collect()
}

/// Joins already escaped fields into a payload.
#[must_use]
pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut payload = String::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            payload.push(FIELD_SEPARATOR);
        }
        payload.push_str(field.as_ref());
    }
    payload
}

/// Turns escape sequences into raw bytes. Each escape yields at most one
/// byte; unescaped characters must be Latin-1 and map to their code point.
fn unescape_bytes(token: &str) -> Result<Vec<u8>, EscapeError> {
    let mut bytes = Vec::with_capacity(token.len());
    let mut chars = token.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            bytes.push(latin1_byte(ch, offset)?);
            continue;
        }

        let Some((escape_offset, escaped)) = chars.next() else {
            return Err(EscapeError::TrailingBackslash { offset });
        };

        match escaped {
            // backslash-newline is a line continuation
            '\n' => {}
            '\\' => bytes.push(b'\\'),
            '\'' => bytes.push(b'\''),
            '"' => bytes.push(b'"'),
            'a' => bytes.push(0x07),
            'b' => bytes.push(0x08),
            'f' => bytes.push(0x0c),
            'n' => bytes.push(b'\n'),
            'r' => bytes.push(b'\r'),
            't' => bytes.push(b'\t'),
            'v' => bytes.push(0x0b),
            'x' => bytes.push(read_hex(&mut chars, 2, 'x', offset)?),
            'u' => bytes.push(read_hex(&mut chars, 4, 'u', offset)?),
            'U' => bytes.push(read_hex(&mut chars, 8, 'U', offset)?),
            '0'..='7' => {
                let mut value = octal_value(escaped);
                for _ in 0..2 {
                    match chars.next_if(|&(_, c)| matches!(c, '0'..='7')) {
                        Some((_, digit)) => value = value * 8 + octal_value(digit),
                        None => break,
                    }
                }
                let byte = u8::try_from(value)
                    .map_err(|_| EscapeError::ValueOutOfRange { offset, value })?;
                bytes.push(byte);
            }
            'N' => return Err(EscapeError::NamedEscape { offset }),
            other => {
                // unknown escapes are kept literally
                bytes.push(b'\\');
                bytes.push(latin1_byte(other, escape_offset)?);
            }
        }
    }

    Ok(bytes)
}

fn read_hex<I>(
    chars: &mut std::iter::Peekable<I>,
    digits: usize,
    kind: char,
    offset: usize,
) -> Result<u8, EscapeError>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next_if(|&(_, c)| c.is_ascii_hexdigit())
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(EscapeError::TruncatedEscape { kind, offset })?;
        value = value * 16 + digit;
    }
    u8::try_from(value).map_err(|_| EscapeError::ValueOutOfRange { offset, value })
}

#[inline]
fn octal_value(digit: char) -> u32 {
    u32::from(digit) - u32::from('0')
}

#[inline]
fn latin1_byte(ch: char, offset: usize) -> Result<u8, EscapeError> {
    u8::try_from(ch).map_err(|_| EscapeError::NonLatin1 { ch, offset })
}
