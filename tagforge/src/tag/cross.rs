//! Read-only fallback chain across multiple tag systems in one file

use crate::tag::{Chapter, Lyrics, Picture, TagData, TagField};

/// A read-only composite over an ordered list of already-read tags
///
/// For each queried field, the first source with a non-empty value wins. This is a
/// fallback chain evaluated independently per field, not a value-level merge: the
/// title may come from ID3v2 while the genre falls through to ID3v1.
#[derive(Debug, Default)]
pub struct CrossTagReader<'a> {
	sources: Vec<&'a TagData>,
}

impl<'a> CrossTagReader<'a> {
	/// Create an empty `CrossTagReader`
	#[must_use]
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	/// Append a source at the end of the fallback chain
	pub fn push_source(&mut self, source: &'a TagData) {
		self.sources.push(source);
	}

	/// Builder-style counterpart of [`CrossTagReader::push_source`]
	#[must_use]
	pub fn with_source(mut self, source: &'a TagData) -> Self {
		self.sources.push(source);
		self
	}

	/// The first non-empty value for `field`, in chain order
	pub fn get(&self, field: TagField) -> Option<&'a str> {
		self.sources
			.iter()
			.find_map(|s| s.get(field).filter(|v| !v.is_empty()))
	}

	/// The first source with any pictures
	pub fn pictures(&self) -> &'a [Picture] {
		self.sources
			.iter()
			.map(|s| s.pictures())
			.find(|p| !p.is_empty())
			.unwrap_or(&[])
	}

	/// The first source with a non-empty chapter list
	pub fn chapters(&self) -> &'a [Chapter] {
		self.sources
			.iter()
			.filter_map(|s| s.chapters())
			.find(|c| !c.is_empty())
			.unwrap_or(&[])
	}

	/// The first source with a non-empty lyrics list
	pub fn lyrics(&self) -> &'a [Lyrics] {
		self.sources
			.iter()
			.filter_map(|s| s.lyrics())
			.find(|l| !l.is_empty())
			.unwrap_or(&[])
	}
}

#[cfg(test)]
mod tests {
	use super::CrossTagReader;
	use crate::tag::{TagData, TagField};

	#[test_log::test]
	fn first_non_empty_wins_per_field() {
		let mut id3v2 = TagData::new();
		id3v2.set(TagField::Title, "From ID3v2");
		id3v2.set(TagField::Genre, "");

		let mut id3v1 = TagData::new();
		id3v1.set(TagField::Title, "From ID3v1");
		id3v1.set(TagField::Genre, "Rock");

		let reader = CrossTagReader::new()
			.with_source(&id3v2)
			.with_source(&id3v1);

		// Title comes from the higher-priority source, genre falls through
		assert_eq!(reader.get(TagField::Title), Some("From ID3v2"));
		assert_eq!(reader.get(TagField::Genre), Some("Rock"));
		assert_eq!(reader.get(TagField::Album), None);
	}
}
