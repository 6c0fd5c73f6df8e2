/// A canonical, format-agnostic tag field
///
/// Concrete formats map their native codes onto these through
/// [`TagCodec::map_native_code`](crate::engine::TagCodec::map_native_code); anything
/// without a mapping is carried as an [`AdditionalField`](crate::tag::AdditionalField)
/// instead. The two keyspaces are disjoint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum TagField {
	Title,
	Artist,
	AlbumArtist,
	Album,
	Composer,
	Conductor,
	Lyricist,
	Comment,
	Genre,
	Publisher,
	Copyright,
	EncodedBy,
	Language,
	OriginalArtist,
	OriginalAlbum,
	/// Full recording date, `YYYY-MM-DD` or any prefix longer than a year
	RecordingDate,
	/// Recording year only, `YYYY`
	RecordingYear,
	/// Composite input slot: decomposes into [`TagField::RecordingDate`] or
	/// [`TagField::RecordingYear`] depending on the value's length
	RecordingDateOrYear,
	TrackNumber,
	TrackTotal,
	DiscNumber,
	DiscTotal,
	Bpm,
	Rating,
}

impl TagField {
	/// Whether values for this field are numeric
	///
	/// Numeric fields are subject to the null-vs-zero normalization policy, see
	/// [`WriteOptions::null_absent_values`](crate::config::WriteOptions::null_absent_values).
	pub fn is_numeric(self) -> bool {
		matches!(
			self,
			Self::RecordingYear
				| Self::TrackNumber
				| Self::TrackTotal
				| Self::DiscNumber
				| Self::DiscTotal
				| Self::Bpm
				| Self::Rating
		)
	}
}

#[cfg(test)]
mod tests {
	use super::TagField;

	#[test_log::test]
	fn numeric_classification() {
		assert!(TagField::TrackNumber.is_numeric());
		assert!(TagField::Rating.is_numeric());
		assert!(!TagField::Title.is_numeric());
		assert!(!TagField::RecordingDate.is_numeric());
	}
}
