/// Options to control how a tag is written to a file
///
/// This acts as a dumping ground for all sorts of format-specific settings. As such, this is best
/// used as an application global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) uppercase_id3v2_chunk: bool,
	pub(crate) null_absent_values: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			uppercase_id3v2_chunk: true,
			null_absent_values: false,
		}
	}

	/// Whether to uppercase the ID3v2 chunk name
	///
	/// When embedding an ID3v2 tag in RIFF files, some software may expect the chunk name
	/// to be lowercase.
	///
	/// NOTE: The vast majority of software will be able to read both upper and lowercase
	/// chunk names.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::WriteOptions;
	///
	/// // I want to keep the ID3v2 chunk name lowercase
	/// let write_options = WriteOptions::new().uppercase_id3v2_chunk(false);
	/// ```
	pub fn uppercase_id3v2_chunk(mut self, uppercase_id3v2_chunk: bool) -> Self {
		self.uppercase_id3v2_chunk = uppercase_id3v2_chunk;
		self
	}

	/// How to treat `"0"` or empty values supplied for numeric fields
	///
	/// When enabled, a zero/empty value supplied for a numeric field (track number, disc
	/// number, rating, ...) deletes the field instead of storing a literal `"0"`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagforge::config::WriteOptions;
	///
	/// // A track number of "0" means "no track number" to me
	/// let write_options = WriteOptions::new().null_absent_values(true);
	/// ```
	pub fn null_absent_values(mut self, null_absent_values: bool) -> Self {
		self.null_absent_values = null_absent_values;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	uppercase_id3v2_chunk: true,
	/// 	null_absent_values: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
