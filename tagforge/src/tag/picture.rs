//! Format-agnostic picture handling

use std::fmt::{Debug, Formatter};

/// Common picture item keys for APE
pub const APE_PICTURE_TYPES: [&str; 21] = [
	"Cover Art (Other)",
	"Cover Art (Png Icon)",
	"Cover Art (Icon)",
	"Cover Art (Front)",
	"Cover Art (Back)",
	"Cover Art (Leaflet)",
	"Cover Art (Media)",
	"Cover Art (Lead Artist)",
	"Cover Art (Artist)",
	"Cover Art (Conductor)",
	"Cover Art (Band)",
	"Cover Art (Composer)",
	"Cover Art (Lyricist)",
	"Cover Art (Recording Location)",
	"Cover Art (During Recording)",
	"Cover Art (During Performance)",
	"Cover Art (Video Capture)",
	"Cover Art (Fish)",
	"Cover Art (Illustration)",
	"Cover Art (Band Logotype)",
	"Cover Art (Publisher Logotype)",
];

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
	/// No MIME type recorded
	#[default]
	None,
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::tag::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			"" => Self::None,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Guess a `MimeType` from a picture's leading bytes
	///
	/// Falls back to [`MimeType::None`] when no known signature matches.
	#[must_use]
	pub fn from_data(data: &[u8]) -> Self {
		match data {
			[0x89, b'P', b'N', b'G', ..] => Self::Png,
			[0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
			[b'G', b'I', b'F', b'8', ..] => Self::Gif,
			[b'B', b'M', ..] => Self::Bmp,
			[b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Self::Tiff,
			_ => Self::None,
		}
	}

	/// Get the string representation of the `MimeType`
	pub fn as_str(&self) -> &str {
		match self {
			Self::Jpeg => "image/jpeg",
			Self::Png => "image/png",
			Self::Tiff => "image/tiff",
			Self::Bmp => "image/bmp",
			Self::Gif => "image/gif",
			Self::Unknown(mime_type) => mime_type,
			Self::None => "",
		}
	}
}

/// The picture type, as defined by the ID3v2 APIC frame
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	#[default]
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	// ID3v2 numbers

	/// Get a `u8` from a `PictureType` according to ID3v2
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a `u8` according to ID3v2
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}

	// APE item keys

	/// Get an APE item key from a `PictureType`
	pub fn as_ape_key(&self) -> Option<&'static str> {
		let index = self.as_u8() as usize;
		APE_PICTURE_TYPES.get(index).copied()
	}

	/// Get a `PictureType` from an APE item key
	pub fn from_ape_key(key: &str) -> Self {
		APE_PICTURE_TYPES
			.iter()
			.position(|k| k.eq_ignore_ascii_case(key))
			.map_or(Self::Undefined(u8::MAX), |i| Self::from_u8(i as u8))
	}
}

/// An embedded picture
///
/// Within one tag, a picture is identified by `(picture type, native code, position)`.
/// `position` is lifecycle-assigned: 1-based, monotonically increasing within every
/// `(picture type, native code)` identity group, so several "front cover" pictures can
/// coexist and survive round-trips in order.
#[derive(Clone, Eq, PartialEq)]
pub struct Picture {
	pic_type: PictureType,
	native_code: String,
	position: u32,
	mime_type: MimeType,
	description: String,
	data: Vec<u8>,
	marked_for_deletion: bool,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("native_code", &self.native_code)
			.field("position", &self.position)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format_args!("<{} bytes>", self.data.len()))
			.field("marked_for_deletion", &self.marked_for_deletion)
			.finish()
	}
}

impl Picture {
	/// Create a new `Picture`
	///
	/// The MIME type is guessed from the data; the position starts out unassigned (0)
	/// and is filled in when the picture enters a [`TagData`](crate::tag::TagData).
	#[must_use]
	pub fn new(pic_type: PictureType, description: impl Into<String>, data: Vec<u8>) -> Self {
		Self {
			pic_type,
			native_code: String::new(),
			position: 0,
			mime_type: MimeType::from_data(&data),
			description: description.into(),
			data,
			marked_for_deletion: false,
		}
	}

	/// Builder-style format-native code (e.g. an APE item key)
	#[must_use]
	pub fn with_native_code(mut self, native_code: impl Into<String>) -> Self {
		self.native_code = native_code.into();
		self
	}

	/// Builder-style explicit MIME type, overriding the guess
	#[must_use]
	pub fn with_mime_type(mut self, mime_type: MimeType) -> Self {
		self.mime_type = mime_type;
		self
	}

	/// Builder-style explicit position
	///
	/// Needed when flagging a specific picture of an identity group for deletion.
	#[must_use]
	pub fn with_position(mut self, position: u32) -> Self {
		self.position = position;
		self
	}

	/// The picture's type
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// The format-native code this picture was stored under
	pub fn native_code(&self) -> &str {
		&self.native_code
	}

	/// The picture's 1-based position within its identity group (0 = unassigned)
	pub fn position(&self) -> u32 {
		self.position
	}

	pub(crate) fn set_position(&mut self, position: u32) {
		self.position = position;
	}

	/// The picture's MIME type
	pub fn mime_type(&self) -> &MimeType {
		&self.mime_type
	}

	/// The picture's description text
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Change the description text
	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = description.into();
	}

	/// The raw image bytes
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	pub(crate) fn replace_content(&mut self, other: &Picture) {
		self.data = other.data.clone();
		self.mime_type = other.mime_type.clone();
		self.description = other.description.clone();
	}

	/// Whether this picture requests deletion of its match when merged
	pub fn marked_for_deletion(&self) -> bool {
		self.marked_for_deletion
	}

	/// Flag this picture for deletion on the next merge
	pub fn mark_for_deletion(&mut self) {
		self.marked_for_deletion = true;
	}

	/// Whether `other` shares this picture's identity group `(type, native code)`
	pub fn same_group(&self, other: &Picture) -> bool {
		self.pic_type == other.pic_type && self.native_code == other.native_code
	}

	/// Whether `other` has the same full identity `(type, native code, position)`
	pub fn same_identity(&self, other: &Picture) -> bool {
		self.same_group(other) && self.position == other.position
	}

	/// FNV-1a hash of the raw image bytes
	pub fn content_hash(&self) -> u64 {
		const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
		const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

		let mut hash = FNV_OFFSET;
		for byte in &self.data {
			hash ^= u64::from(*byte);
			hash = hash.wrapping_mul(FNV_PRIME);
		}

		hash
	}
}
