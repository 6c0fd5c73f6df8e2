use crate::error::{ErrorKind, Result, TagForgeError};
use crate::macros::err;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub(crate) enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub(crate) fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// The width of this encoding's null terminator in bytes
	pub(crate) fn terminator_width(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes).map_err(Into::into)
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	bytes.iter().map(|b| char::from(*b)).collect()
}

// Latin-1 maps bytes 0x00-0xFF 1:1 onto the first 256 code points, so encoding a
// string previously produced by `latin1_decode` is byte-preserving.
pub(crate) fn latin1_encode(text: &str) -> Vec<u8> {
	text.chars()
		.map(|c| {
			let c = c as u32;
			if c > 255 {
				log::warn!("Latin-1 encoding: replacing non-representable character");
				b'?'
			} else {
				c as u8
			}
		})
		.collect()
}

pub(crate) fn utf16_decode(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect();

	String::from_utf16(&unverified)
		.map_err(|_| TagForgeError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

/// Decode a byte run according to `encoding`
///
/// For [`TextEncoding::UTF16`], a byte order mark is expected at the start of `bytes`.
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
		TextEncoding::UTF8 => utf8_decode(bytes.to_vec())
			.map_err(|_| TagForgeError::new(ErrorKind::TextDecode("Expected a UTF-8 string"))),
		TextEncoding::UTF16BE => utf16_decode(bytes, u16::from_be_bytes),
		TextEncoding::UTF16 => {
			if bytes.len() < 2 {
				err!(TextDecode("UTF-16 string has an invalid length (< 2)"));
			}

			match [bytes[0], bytes[1]] {
				[0xFE, 0xFF] => utf16_decode(&bytes[2..], u16::from_be_bytes),
				[0xFF, 0xFE] => utf16_decode(&bytes[2..], u16::from_le_bytes),
				_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
			}
		},
	}
}

/// Encode `text` according to `encoding`, optionally appending a null terminator
///
/// [`TextEncoding::UTF16`] output is little endian, prefixed with a byte order mark.
pub(crate) fn encode_text(text: &str, encoding: TextEncoding, terminated: bool) -> Vec<u8> {
	let mut out = match encoding {
		TextEncoding::Latin1 => latin1_encode(text),
		TextEncoding::UTF8 => text.as_bytes().to_vec(),
		TextEncoding::UTF16 => {
			let mut bytes = vec![0xFF, 0xFE];
			for unit in text.encode_utf16() {
				bytes.extend_from_slice(&unit.to_le_bytes());
			}
			bytes
		},
		TextEncoding::UTF16BE => {
			let mut bytes = Vec::new();
			for unit in text.encode_utf16() {
				bytes.extend_from_slice(&unit.to_be_bytes());
			}
			bytes
		},
	};

	if terminated {
		out.extend(std::iter::repeat_n(0, encoding.terminator_width()));
	}

	out
}

/// Split `bytes` at the encoding's null terminator
///
/// Returns the content before the terminator and the total number of bytes consumed,
/// terminator included. Without a terminator, the entire slice is content.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> (&[u8], usize) {
	match encoding.terminator_width() {
		1 => match bytes.iter().position(|b| *b == 0) {
			Some(pos) => (&bytes[..pos], pos + 1),
			None => (bytes, bytes.len()),
		},
		_ => {
			let mut pos = 0;
			while pos + 1 < bytes.len() {
				if bytes[pos] == 0 && bytes[pos + 1] == 0 {
					return (&bytes[..pos], pos + 2);
				}
				pos += 2;
			}

			(bytes, bytes.len())
		},
	}
}

pub(crate) fn trim_end_nulls(text: &str) -> &str {
	text.trim_end_matches('\0')
}

#[cfg(test)]
mod tests {
	use super::{TextEncoding, decode_text, encode_text, split_terminated};

	#[test_log::test]
	fn text_roundtrip() {
		for encoding in [
			TextEncoding::Latin1,
			TextEncoding::UTF8,
			TextEncoding::UTF16,
			TextEncoding::UTF16BE,
		] {
			let encoded = encode_text("Foo bar", encoding, false);
			assert_eq!(decode_text(&encoded, encoding).unwrap(), "Foo bar");
		}
	}

	#[test_log::test]
	fn terminated_split() {
		let (content, consumed) = split_terminated(b"Foo\0bar", TextEncoding::UTF8);
		assert_eq!(content, b"Foo");
		assert_eq!(consumed, 4);

		let bytes = [b'F', 0, b'o', 0, 0, 0, 0xFF];
		let (content, consumed) = split_terminated(&bytes, TextEncoding::UTF16BE);
		assert_eq!(content, &bytes[..4]);
		assert_eq!(consumed, 6);
	}

	#[test_log::test]
	fn unterminated_split() {
		let (content, consumed) = split_terminated(b"Foo", TextEncoding::UTF8);
		assert_eq!(content, b"Foo");
		assert_eq!(consumed, 3);
	}
}
