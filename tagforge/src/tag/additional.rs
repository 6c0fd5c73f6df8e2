use crate::tag::TagType;

/// A free-form field not covered by a canonical [`TagField`](crate::tag::TagField) slot
///
/// Additional fields are identified by `(tag_type, native_code, stream_number, language)`.
/// Deletion intent is carried through [`AdditionalField::marked_for_deletion`] rather
/// than a separate delete operation, so merging and deleting share one code path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdditionalField {
	tag_type: TagType,
	native_code: String,
	stream_number: u16,
	language: String,
	value: String,
	marked_for_deletion: bool,
	// The zone this field was parsed out of, if any. Identity matching ignores it.
	pub(crate) zone: Option<String>,
}

impl AdditionalField {
	/// Create a new `AdditionalField`
	#[must_use]
	pub fn new(
		tag_type: TagType,
		native_code: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self {
			tag_type,
			native_code: native_code.into(),
			stream_number: 0,
			language: String::new(),
			value: value.into(),
			marked_for_deletion: false,
			zone: None,
		}
	}

	/// Builder-style stream number (ASF-style formats address fields per stream)
	#[must_use]
	pub fn with_stream_number(mut self, stream_number: u16) -> Self {
		self.stream_number = stream_number;
		self
	}

	/// Builder-style language code
	#[must_use]
	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();
		self
	}

	/// The tag system this field belongs to
	pub fn tag_type(&self) -> TagType {
		self.tag_type
	}

	/// The format-native field code (frame ID, item key, chunk fourcc, ...)
	pub fn native_code(&self) -> &str {
		&self.native_code
	}

	/// The stream this field addresses (0 when not applicable)
	pub fn stream_number(&self) -> u16 {
		self.stream_number
	}

	/// The field's language code (empty when not applicable)
	pub fn language(&self) -> &str {
		&self.language
	}

	/// The field's value
	pub fn value(&self) -> &str {
		&self.value
	}

	pub(crate) fn set_value(&mut self, value: String) {
		self.value = value;
	}

	/// Whether this field requests deletion of its match when merged
	pub fn marked_for_deletion(&self) -> bool {
		self.marked_for_deletion
	}

	/// Flag this field for deletion on the next merge
	pub fn mark_for_deletion(&mut self) {
		self.marked_for_deletion = true;
	}

	/// Whether `other` addresses the same field, ignoring zone and value
	pub fn same_identity(&self, other: &AdditionalField) -> bool {
		self.tag_type == other.tag_type
			&& self.native_code == other.native_code
			&& self.stream_number == other.stream_number
			&& self.language == other.language
	}
}
