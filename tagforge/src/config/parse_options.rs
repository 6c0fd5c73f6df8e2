/// The parsing strictness mode
///
/// This applies to all tag readers. When a reader encounters unexpected structure,
/// the mode decides between bailing out and attempting to recover.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-conformant spec violations, no matter how
	/// small the issue is.
	Strict,
	/// Default mode, less eager to error on recoverable structure
	///
	/// Readers for formats whose layout allows linear resynchronization will scan forward
	/// for the next valid marker, record a best-effort zone, and log a warning instead of
	/// failing the read.
	#[default]
	BestAttempt,
	/// Least eager to error, may produce invalid/partial output
	///
	/// Unreadable regions are silently skipped wherever possible.
	Relaxed,
}

/// Options to control how a tag is parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_pictures: bool,
	pub(crate) read_additional_fields: bool,
	pub(crate) prepare_for_writing: bool,
	pub(crate) max_junk_bytes: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	read_pictures: true,
	/// 	read_additional_fields: true,
	/// 	prepare_for_writing: false,
	/// 	max_junk_bytes: 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default number of junk bytes to read
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_pictures: true,
			read_additional_fields: true,
			prepare_for_writing: false,
			max_junk_bytes: Self::DEFAULT_MAX_JUNK_BYTES,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to read embedded pictures
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::ParseOptions;
	///
	/// // By default, `read_pictures` is enabled. Here, we only want the text fields.
	/// let parsing_options = ParseOptions::new().read_pictures(false);
	/// ```
	pub fn read_pictures(&mut self, read_pictures: bool) -> Self {
		self.read_pictures = read_pictures;
		*self
	}

	/// Whether or not to read fields without a canonical mapping
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::ParseOptions;
	///
	/// // By default, `read_additional_fields` is enabled.
	/// let parsing_options = ParseOptions::new().read_additional_fields(false);
	/// ```
	pub fn read_additional_fields(&mut self, read_additional_fields: bool) -> Self {
		self.read_additional_fields = read_additional_fields;
		*self
	}

	/// Whether this read is the discovery phase of a write
	///
	/// This forces rediscovery of every zone and picture, including ones normally
	/// filtered out, so a following merge has complete prior state. Readers may also
	/// register empty zones at their format's insertion point so the writer has a
	/// splice target.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().prepare_for_writing(true);
	/// ```
	pub fn prepare_for_writing(&mut self, prepare_for_writing: bool) -> Self {
		self.prepare_for_writing = prepare_for_writing;
		*self
	}

	/// The maximum number of allowed junk bytes to search
	///
	/// Some information may be surrounded by junk bytes, such as tag padding remnants. This sets
	/// the maximum number of junk/unrecognized bytes to search for required information before
	/// giving up.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::ParseOptions;
	///
	/// // I have files full of junk, I'll double the search window!
	/// let parsing_options = ParseOptions::new().max_junk_bytes(2048);
	/// ```
	pub fn max_junk_bytes(&mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = max_junk_bytes;
		*self
	}
}
