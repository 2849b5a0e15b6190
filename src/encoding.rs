//! Text encoding resolution for tables and templates.
//!
//! An encoding identifier from the front end is resolved in three steps:
//! an empty identifier selects the platform default (UTF-8), an all-digit
//! identifier is looked up as a Windows code page, and anything else is
//! matched case-insensitively against the WHATWG label table.

use crate::error::{Error, Result};
use encoding_rs::Encoding;

/// Maps the Windows code pages the front ends commonly hand over onto encoding_rs.
fn code_page(page: u32) -> Option<&'static Encoding> {
    let encoding = match page {
        65001 => encoding_rs::UTF_8,
        1200 => encoding_rs::UTF_16LE,
        1201 => encoding_rs::UTF_16BE,
        874 => encoding_rs::WINDOWS_874,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1252 => encoding_rs::WINDOWS_1252,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1256 => encoding_rs::WINDOWS_1256,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        866 => encoding_rs::IBM866,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        20866 => encoding_rs::KOI8_R,
        21866 => encoding_rs::KOI8_U,
        // WHATWG decodes latin1 and ascii as windows-1252
        28591 => encoding_rs::WINDOWS_1252,
        20127 => encoding_rs::WINDOWS_1252,
        28592 => encoding_rs::ISO_8859_2,
        28593 => encoding_rs::ISO_8859_3,
        28594 => encoding_rs::ISO_8859_4,
        28595 => encoding_rs::ISO_8859_5,
        28596 => encoding_rs::ISO_8859_6,
        28597 => encoding_rs::ISO_8859_7,
        28598 => encoding_rs::ISO_8859_8,
        28603 => encoding_rs::ISO_8859_13,
        28605 => encoding_rs::ISO_8859_15,
        38598 => encoding_rs::ISO_8859_8_I,
        51932 => encoding_rs::EUC_JP,
        50220 => encoding_rs::ISO_2022_JP,
        54936 => encoding_rs::GB18030,
        10000 => encoding_rs::MACINTOSH,
        10007 => encoding_rs::X_MAC_CYRILLIC,
        _ => return None,
    };
    Some(encoding)
}

/// Every encoding that can be selected.
fn all() -> [&'static Encoding; 39] {
    [
        encoding_rs::BIG5,
        encoding_rs::EUC_JP,
        encoding_rs::EUC_KR,
        encoding_rs::GB18030,
        encoding_rs::GBK,
        encoding_rs::IBM866,
        encoding_rs::ISO_2022_JP,
        encoding_rs::ISO_8859_10,
        encoding_rs::ISO_8859_13,
        encoding_rs::ISO_8859_14,
        encoding_rs::ISO_8859_15,
        encoding_rs::ISO_8859_16,
        encoding_rs::ISO_8859_2,
        encoding_rs::ISO_8859_3,
        encoding_rs::ISO_8859_4,
        encoding_rs::ISO_8859_5,
        encoding_rs::ISO_8859_6,
        encoding_rs::ISO_8859_7,
        encoding_rs::ISO_8859_8,
        encoding_rs::ISO_8859_8_I,
        encoding_rs::KOI8_R,
        encoding_rs::KOI8_U,
        encoding_rs::MACINTOSH,
        encoding_rs::SHIFT_JIS,
        encoding_rs::UTF_16BE,
        encoding_rs::UTF_16LE,
        encoding_rs::UTF_8,
        encoding_rs::WINDOWS_1250,
        encoding_rs::WINDOWS_1251,
        encoding_rs::WINDOWS_1252,
        encoding_rs::WINDOWS_1253,
        encoding_rs::WINDOWS_1254,
        encoding_rs::WINDOWS_1255,
        encoding_rs::WINDOWS_1256,
        encoding_rs::WINDOWS_1257,
        encoding_rs::WINDOWS_1258,
        encoding_rs::WINDOWS_874,
        encoding_rs::X_MAC_CYRILLIC,
        encoding_rs::X_USER_DEFINED,
    ]
}

/// A resolved text encoding used for every read and write of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

/// Text decoded from a file, with what is needed to write it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Encoding actually used; differs from the requested one when a BOM was found
    pub encoding: TextEncoding,
    pub bom: bool,
    pub had_errors: bool,
}

impl TextEncoding {
    /// Resolves an encoding identifier.
    ///
    /// # Errors
    /// * `Error::UnknownEncoding` for an unknown code page or label
    pub fn resolve(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(Self::default());
        }

        if identifier.chars().all(|c| c.is_ascii_digit()) {
            let page: u32 = identifier
                .parse()
                .map_err(|_| Error::UnknownEncoding(identifier.to_string()))?;
            return code_page(page)
                .map(Self)
                .ok_or_else(|| Error::UnknownEncoding(identifier.to_string()));
        }

        match Encoding::for_label(identifier.as_bytes()) {
            // "replacement" is what WHATWG hands out for unsafe legacy labels
            Some(encoding) if encoding != encoding_rs::REPLACEMENT => Ok(Self(encoding)),
            _ => Err(Error::UnknownEncoding(identifier.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decodes raw file content, honouring a byte order mark if present.
    pub fn decode(&self, bytes: &[u8]) -> Decoded {
        let bom = Encoding::for_bom(bytes).is_some();
        let (text, actual, had_errors) = self.0.decode(bytes);
        Decoded {
            text: text.into_owned(),
            encoding: Self(actual),
            bom,
            had_errors,
        }
    }

    /// Encodes text, prefixing a byte order mark when asked to.
    ///
    /// Returns the bytes and whether any character had to be replaced.
    pub fn encode(&self, text: &str, bom: bool) -> (Vec<u8>, bool) {
        if self.0 == encoding_rs::UTF_16LE || self.0 == encoding_rs::UTF_16BE {
            let little_endian = self.0 == encoding_rs::UTF_16LE;
            let mut bytes = Vec::with_capacity(text.len() * 2 + 2);
            if bom {
                bytes.extend_from_slice(if little_endian { &[0xFF, 0xFE] } else { &[0xFE, 0xFF] });
            }
            for unit in text.encode_utf16() {
                if little_endian {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                } else {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
            }
            return (bytes, false);
        }

        let mut bytes = Vec::with_capacity(text.len() + 3);
        if bom && self.0 == encoding_rs::UTF_8 {
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
        }
        let (encoded, _, had_errors) = self.0.encode(text);
        bytes.extend_from_slice(&encoded);
        (bytes, had_errors)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self(encoding_rs::UTF_8)
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-cased names of all selectable encodings, sorted.
pub fn available() -> Vec<String> {
    let mut names: Vec<String> = all().iter().map(|e| e.name().to_lowercase()).collect();
    names.sort();
    names
}

/// Lower-cased name of the encoding used when none is configured.
pub fn default_name() -> String {
    TextEncoding::default().name().to_lowercase()
}
