/// A single chapter marker
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Chapter {
	/// Identifier unique within the tag, used by formats that reference chapters by ID
	pub unique_id: String,
	/// Chapter start, in milliseconds from the start of the stream
	pub start_ms: u32,
	/// Chapter end, in milliseconds from the start of the stream
	pub end_ms: u32,
	/// Human-readable chapter title
	pub title: String,
}

impl Chapter {
	/// Create a new `Chapter`
	#[must_use]
	pub fn new(
		unique_id: impl Into<String>,
		start_ms: u32,
		end_ms: u32,
		title: impl Into<String>,
	) -> Self {
		Self {
			unique_id: unique_id.into(),
			start_ms,
			end_ms,
			title: title.into(),
		}
	}
}
