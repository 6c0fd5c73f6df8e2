/// One timed phrase of synchronized lyrics
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyncedPhrase {
	/// Phrase start, in milliseconds from the start of the stream
	pub timestamp_ms: u32,
	/// The phrase text
	pub text: String,
}

impl SyncedPhrase {
	/// Create a new `SyncedPhrase`
	#[must_use]
	pub fn new(timestamp_ms: u32, text: impl Into<String>) -> Self {
		Self {
			timestamp_ms,
			text: text.into(),
		}
	}
}

/// A lyrics block, either unsynchronized text or a list of timed phrases
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Lyrics {
	/// ISO-639-2 language code (empty when unknown)
	pub language: String,
	/// Content descriptor
	pub description: String,
	/// Unsynchronized lyrics text
	pub unsynchronized: String,
	/// Synchronized phrases, in playback order
	pub synchronized: Vec<SyncedPhrase>,
}

impl Lyrics {
	/// Create an empty lyrics block for a language
	#[must_use]
	pub fn new(language: impl Into<String>) -> Self {
		Self {
			language: language.into(),
			..Self::default()
		}
	}

	/// Whether the block carries no content at all
	pub fn is_empty(&self) -> bool {
		self.unsynchronized.is_empty() && self.synchronized.is_empty()
	}
}
