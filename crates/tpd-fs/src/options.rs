//! Write options: text encoding and octal file mode

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::{Error, Result};

/// Padding is optional on decode, for both base64 alphabets.
const LENIENT_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_PADDING);
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_PADDING);

/// Encoding used to turn rendered text into bytes on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// Low byte of each character
    Ascii,
    /// Low byte of each character
    Latin1,
    Utf16Le,
    /// The text is base64 and is decoded before writing
    Base64,
    /// URL-safe base64 alphabet, padded or not
    Base64Url,
    /// The text is pairs of hex digits
    Hex,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Utf16Le => "utf16le",
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Hex => "hex",
        }
    }

    /// Encode `text` into the bytes that land on disk.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii | Self::Latin1 => Ok(text.chars().map(|c| (u32::from(c) & 0xff) as u8).collect()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Base64 => BASE64.decode(text.trim()).map_err(|e| self.decode_error(e)),
            Self::Base64Url => BASE64_URL.decode(text.trim()).map_err(|e| self.decode_error(e)),
            Self::Hex => hex::decode(text.trim()).map_err(|e| self.decode_error(e)),
        }
    }

    fn decode_error(&self, source: impl fmt::Display) -> Error {
        Error::Encoding {
            encoding: self.as_str().into(),
            message: source.to_string(),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "hex" => Ok(Self::Hex),
            _ => Err(Error::UnknownEncoding {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an octal mode string such as `"644"`, `"0644"` or `"0o644"`.
pub fn parse_mode(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(Error::InvalidMode {
            value: raw.to_string(),
        });
    }

    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
        .ok_or_else(|| Error::InvalidMode {
            value: raw.to_string(),
        })
}

/// Parsed options for a single file write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub encoding: Encoding,
    /// Permission bits applied on creation; `None` keeps the platform default
    pub mode: Option<u32>,
}

impl WriteOptions {
    /// Parse the raw option strings an intent declares.
    ///
    /// Absent values fall back to UTF-8 and the platform default mode.
    pub fn parse(encoding: Option<&str>, mode: Option<&str>) -> Result<Self> {
        Ok(Self {
            encoding: encoding.map(str::parse::<Encoding>).transpose()?.unwrap_or_default(),
            mode: mode.map(parse_mode).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("644", 0o644)]
    #[case("0644", 0o644)]
    #[case("0o600", 0o600)]
    #[case(" 755 ", 0o755)]
    #[case("4755", 0o4755)]
    fn parses_octal_modes(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_mode(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("789")]
    #[case("+644")]
    #[case("17777")]
    fn rejects_bad_modes(#[case] raw: &str) {
        assert!(matches!(parse_mode(raw), Err(Error::InvalidMode { .. })));
    }

    #[test]
    fn encoding_names_are_case_insensitive() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("Binary".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("ucs2".parse::<Encoding>().unwrap(), Encoding::Utf16Le);
    }

    #[test]
    fn unknown_encoding_is_an_error() {
        let err = "ebcdic".parse::<Encoding>().unwrap_err();
        assert!(matches!(err, Error::UnknownEncoding { ref name } if name == "ebcdic"));
    }

    #[test]
    fn latin1_keeps_low_byte() {
        assert_eq!(Encoding::Latin1.encode("é").unwrap(), vec![0xe9]);
    }

    #[test]
    fn utf16le_is_little_endian() {
        assert_eq!(Encoding::Utf16Le.encode("hi").unwrap(), vec![b'h', 0, b'i', 0]);
    }

    #[rstest]
    #[case::hex(Encoding::Hex, "6869", b"hi".to_vec())]
    #[case::hex_upper(Encoding::Hex, "FF00", vec![0xff, 0x00])]
    #[case::base64url_unpadded(Encoding::Base64Url, "-_8", vec![0xfb, 0xff])]
    #[case::base64url_padded(Encoding::Base64Url, "-_8=", vec![0xfb, 0xff])]
    #[case::base64_unpadded(Encoding::Base64, "aGk", b"hi".to_vec())]
    fn binary_encodings_decode(#[case] encoding: Encoding, #[case] text: &str, #[case] expected: Vec<u8>) {
        assert_eq!(encoding.encode(text).unwrap(), expected);
    }

    #[rstest]
    #[case::odd_hex(Encoding::Hex, "abc")]
    #[case::non_hex(Encoding::Hex, "zz")]
    #[case::standard_chars_in_url(Encoding::Base64Url, "+/8=")]
    fn malformed_binary_text_is_an_error(#[case] encoding: Encoding, #[case] text: &str) {
        assert!(matches!(encoding.encode(text), Err(Error::Encoding { .. })));
    }

    #[rstest]
    #[case("hex", Encoding::Hex)]
    #[case("Base64URL", Encoding::Base64Url)]
    fn binary_encoding_names_parse(#[case] name: &str, #[case] expected: Encoding) {
        assert_eq!(name.parse::<Encoding>().unwrap(), expected);
    }

    #[test]
    fn base64_is_decoded() {
        assert_eq!(Encoding::Base64.encode("aGk=\n").unwrap(), b"hi".to_vec());
        assert!(Encoding::Base64.encode("!!!").is_err());
    }

    #[test]
    fn write_options_default_when_absent() {
        let options = WriteOptions::parse(None, None).unwrap();
        assert_eq!(options, WriteOptions::default());
    }
}
