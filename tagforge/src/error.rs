//! Contains the errors that can arise within tagforge
//!
//! The primary error is [`TagForgeError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::tag::TagType;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagForgeError>`
pub type Result<T> = std::result::Result<T, TagForgeError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// File format related errors
	/// Unable to recognize the container format
	UnknownFormat,

	// File data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// A header patch would underflow the encoded value
	///
	/// Arises when shrinking a zone by more bytes than a dependent size field accounts for.
	HeaderUnderflow,

	// Tag related errors
	/// A tag marker was found, but the data following it is not a tag
	FakeTag,
	/// A hard format constraint was violated before writing
	Validation(ValidationError),
	/// Corrupt or unexpected structure was encountered while reading
	StructuralParse(StructuralParseError),
	/// Errors that arise while decoding text
	TextDecode(&'static str),

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// An error raised by write-time pre-validation
///
/// Validation runs before any byte of the file is touched, so a `ValidationError`
/// always leaves the file in its original state.
pub struct ValidationError {
	tag_type: Option<TagType>,
	description: &'static str,
}

impl ValidationError {
	/// Create a `ValidationError` bound to a [`TagType`]
	#[must_use]
	pub const fn new(tag_type: TagType, description: &'static str) -> Self {
		Self {
			tag_type: Some(tag_type),
			description,
		}
	}

	/// Create a `ValidationError` without binding it to a [`TagType`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			tag_type: None,
			description,
		}
	}

	/// Returns the associated [`TagType`], if one exists
	pub fn tag_type(&self) -> Option<TagType> {
		self.tag_type
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for ValidationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(tag_type) = self.tag_type {
			write!(f, "{:?}: {:?}", tag_type, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for ValidationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(tag_type) = self.tag_type {
			write!(f, "{:?}: {}", tag_type, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// An error that arises while parsing a tag's structure
///
/// Whether this is fatal depends on the reader: formats that allow linear
/// resynchronization downgrade it to a warning under
/// [`ParsingMode::BestAttempt`](crate::config::ParsingMode::BestAttempt).
pub struct StructuralParseError {
	tag_type: Option<TagType>,
	description: &'static str,
}

impl StructuralParseError {
	/// Create a `StructuralParseError` bound to a [`TagType`]
	#[must_use]
	pub const fn new(tag_type: TagType, description: &'static str) -> Self {
		Self {
			tag_type: Some(tag_type),
			description,
		}
	}

	/// Create a `StructuralParseError` without binding it to a [`TagType`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			tag_type: None,
			description,
		}
	}

	/// Returns the associated [`TagType`], if one exists
	pub fn tag_type(&self) -> Option<TagType> {
		self.tag_type
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for StructuralParseError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(tag_type) = self.tag_type {
			write!(f, "{:?}: {:?}", tag_type, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for StructuralParseError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(tag_type) = self.tag_type {
			write!(f, "{:?}: {}", tag_type, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within tagforge
pub struct TagForgeError {
	pub(crate) kind: ErrorKind,
}

impl TagForgeError {
	/// Create a `TagForgeError` from an [`ErrorKind`]
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for TagForgeError {}

impl Debug for TagForgeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ValidationError> for TagForgeError {
	fn from(input: ValidationError) -> Self {
		Self {
			kind: ErrorKind::Validation(input),
		}
	}
}

impl From<StructuralParseError> for TagForgeError {
	fn from(input: StructuralParseError) -> Self {
		Self {
			kind: ErrorKind::StructuralParse(input),
		}
	}
}

impl From<std::io::Error> for TagForgeError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for TagForgeError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for TagForgeError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for TagForgeError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for TagForgeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::UnknownFormat => {
				write!(f, "No format could be determined from the provided file")
			},
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::HeaderUnderflow => write!(
				f,
				"A dependent header's size field would underflow when patched"
			),
			ErrorKind::FakeTag => write!(f, "Reading: Expected a tag, found invalid data"),
			ErrorKind::Validation(ref validation_err) => write!(f, "{validation_err}"),
			ErrorKind::StructuralParse(ref parse_err) => write!(f, "{parse_err}"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
