//! Whole-file orchestration across coexisting tags
//!
//! A [`TaggedFile`] owns one [`TagEngine`] per supported tag system plus one for the
//! container's native metadata, reads them in a fixed order, and routes saves and
//! removals to the right engine. The native codec's [`Embedder`] capability (when the
//! container has one) is threaded into every ID3v2 operation explicitly.

use crate::config::{ParseOptions, WriteOptions};
use crate::engine::{TagCodec, TagEngine};
use crate::error::{Result, TagForgeError};
use crate::formats::{ApeCodec, Id3v1Codec, Id3v2Codec};
use crate::tag::{CrossTagReader, TagData, TagType};
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek, SeekFrom};

/// Physical layout numbers computed from the last read
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SizeInfo {
	/// Total file size in bytes
	pub file_size: u64,
	/// Offset of the audio payload
	pub audio_offset: u64,
	/// Size of the audio payload
	pub audio_size: u64,
}

/// All tags of one file, read together and saved independently
///
/// `N` is the codec for the container's native metadata; formats without any use
/// [`DummyCodec`](crate::formats::DummyCodec).
pub struct TaggedFile<N: TagCodec> {
	id3v1: TagEngine<Id3v1Codec>,
	id3v2: TagEngine<Id3v2Codec>,
	ape: TagEngine<ApeCodec>,
	native: TagEngine<N>,
	sizes: SizeInfo,
}

impl<N: TagCodec> TaggedFile<N> {
	/// Create an unread `TaggedFile` around a native codec
	#[must_use]
	pub fn new(native_codec: N) -> Self {
		Self {
			id3v1: TagEngine::new(Id3v1Codec),
			id3v2: TagEngine::new(Id3v2Codec),
			ape: TagEngine::new(ApeCodec::default()),
			native: TagEngine::new(native_codec),
			sizes: SizeInfo::default(),
		}
	}

	/// The ID3v1 engine
	pub fn id3v1(&self) -> &TagEngine<Id3v1Codec> {
		&self.id3v1
	}

	/// The ID3v2 engine
	pub fn id3v2(&self) -> &TagEngine<Id3v2Codec> {
		&self.id3v2
	}

	/// The APE engine
	pub fn ape(&self) -> &TagEngine<ApeCodec> {
		&self.ape
	}

	/// The native metadata engine
	pub fn native(&self) -> &TagEngine<N> {
		&self.native
	}

	/// Layout numbers from the last read
	pub fn sizes(&self) -> SizeInfo {
		self.sizes
	}

	/// Whether any tag was found by the last read
	pub fn any_exists(&self) -> bool {
		self.id3v1.exists() || self.id3v2.exists() || self.ape.exists() || self.native.exists()
	}

	/// Read every tag system the file may carry
	///
	/// Reads ID3v1, then ID3v2, then APE, then the native container. When the native
	/// codec can host an embedded tag chunk, a structural pre-pass over the container
	/// runs first so the ID3v2 read happens at the hosted payload's offset. A tag
	/// system that is simply absent reads as non-existent; only structural failures
	/// surface as errors.
	pub fn read_from<R>(&mut self, reader: &mut R, options: ParseOptions) -> Result<()>
	where
		R: Read + Seek,
	{
		self.id3v1.read_from(reader, options)?;

		if self.native.codec_mut().embedder().is_some() {
			reader.rewind()?;
			self.native
				.read_from(reader, ParseOptions::new().prepare_for_writing(true))?;
		}

		match self.embedded_payload_offset() {
			Some(offset) => {
				reader.seek(SeekFrom::Start(offset))?;
			},
			None => reader.rewind()?,
		}
		self.id3v2.read_from(reader, options)?;

		self.ape.read_from(reader, options)?;

		reader.rewind()?;
		self.native.read_from(reader, options)?;

		self.sizes = self.compute_sizes(reader.seek(SeekFrom::End(0))?);
		Ok(())
	}

	/// Merge `data` into one tag system and rewrite the file in place
	///
	/// The targeted engine re-reads its own on-disk state first, so engines for the
	/// other tag systems keep working off their own (now possibly stale) offsets until
	/// the next [`read_from`](TaggedFile::read_from).
	pub fn save_tag_to<F>(
		&mut self,
		file: &mut F,
		tag_type: TagType,
		data: &TagData,
		write_options: WriteOptions,
	) -> Result<()>
	where
		F: FileLike,
		TagForgeError: From<<F as Truncate>::Error>,
		TagForgeError: From<<F as Length>::Error>,
	{
		match tag_type {
			TagType::Id3v1 => self.id3v1.save_to(file, data, None, write_options),
			TagType::Ape => self.ape.save_to(file, data, None, write_options),
			TagType::Native => self.native.save_to(file, data, None, write_options),
			TagType::Id3v2 => {
				self.refresh_native_structure(file)?;
				self.id3v2
					.save_to(file, data, self.native.codec_mut().embedder(), write_options)
			},
		}
	}

	/// Strip one tag system from the file
	pub fn remove_tag_from<F>(&mut self, file: &mut F, tag_type: TagType) -> Result<()>
	where
		F: FileLike,
		TagForgeError: From<<F as Truncate>::Error>,
		TagForgeError: From<<F as Length>::Error>,
	{
		match tag_type {
			TagType::Id3v1 => self.id3v1.remove_from(file, None),
			TagType::Ape => self.ape.remove_from(file, None),
			TagType::Native => self.native.remove_from(file, None),
			TagType::Id3v2 => {
				self.refresh_native_structure(file)?;
				self.id3v2
					.remove_from(file, self.native.codec_mut().embedder())
			},
		}
	}

	/// A fallback view over all tags, most expressive system first
	pub fn cross_reader(&self) -> CrossTagReader<'_> {
		let mut reader = CrossTagReader::new();

		for (exists, data) in [
			(self.id3v2.exists(), self.id3v2.data()),
			(self.ape.exists(), self.ape.data()),
			(self.native.exists(), self.native.data()),
			(self.id3v1.exists(), self.id3v1.data()),
		] {
			if exists {
				reader.push_source(data);
			}
		}

		reader
	}

	fn embedded_payload_offset(&mut self) -> Option<u64> {
		let embedder = self.native.codec_mut().embedder()?;
		embedder
			.embedded_offset()
			.map(|offset| offset + embedder.embedding_header_size())
	}

	// An embedder is only trustworthy right after a container read; a preceding save
	// of any tag may have shifted the hosting chunk
	fn refresh_native_structure<F>(&mut self, file: &mut F) -> Result<()>
	where
		F: FileLike,
		TagForgeError: From<<F as Truncate>::Error>,
		TagForgeError: From<<F as Length>::Error>,
	{
		if self.native.codec_mut().embedder().is_none() {
			return Ok(());
		}

		file.rewind()?;
		self.native
			.read_from(file, ParseOptions::new().prepare_for_writing(true))?;
		Ok(())
	}

	fn compute_sizes(&self, file_size: u64) -> SizeInfo {
		if let Some((audio_offset, audio_size)) = self.native.codec().audio_range() {
			return SizeInfo {
				file_size,
				audio_offset,
				audio_size,
			};
		}

		// No container knowledge: whatever is not a tag is audio
		let tag_total = self.id3v1.size() + self.id3v2.size() + self.ape.size();
		let audio_offset = if self.id3v2.exists() && self.id3v2.offset() == 0 {
			self.id3v2.size()
		} else {
			0
		};

		SizeInfo {
			file_size,
			audio_offset,
			audio_size: file_size.saturating_sub(tag_total),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::formats::{DummyCodec, RiffCodec};
	use crate::tag::TagField;

	use std::io::{Cursor, Write};

	use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

	fn wav() -> Vec<u8> {
		let mut out = b"RIFF".to_vec();
		out.write_u32::<LittleEndian>(0).unwrap();
		out.extend_from_slice(b"WAVE");
		out.extend_from_slice(b"fmt ");
		out.write_u32::<LittleEndian>(16).unwrap();
		out.extend_from_slice(&[0u8; 16]);
		out.extend_from_slice(b"data");
		out.write_u32::<LittleEndian>(32).unwrap();
		out.extend_from_slice(&[0x7Fu8; 32]);
		let riff_size = out.len() as u32 - 8;
		LittleEndian::write_u32(&mut out[4..8], riff_size);
		out
	}

	#[test_log::test]
	fn untagged_wav_scenario() {
		let mut file = Cursor::new(wav());
		let mut tagged = TaggedFile::new(RiffCodec::default());

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert!(!tagged.any_exists());
		assert_eq!(tagged.sizes().audio_size, 32);

		let mut data = TagData::new();
		data.set(TagField::Title, "Test !!");
		data.set(TagField::TrackNumber, "1");
		tagged
			.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
			.unwrap();

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert!(tagged.native().exists());
		assert_eq!(tagged.native().data().get(TagField::Title), Some("Test !!"));
		assert_eq!(
			tagged.native().data().get(TagField::TrackNumber),
			Some("1")
		);
		// The audio payload did not move relative to the chunk walk
		assert_eq!(tagged.sizes().audio_size, 32);

		tagged
			.remove_tag_from(&mut file, TagType::Native)
			.unwrap();
		assert_eq!(file.into_inner(), wav());
	}

	#[test_log::test]
	fn id3v2_in_wav_goes_through_the_embedder() {
		let mut file = Cursor::new(wav());
		let mut tagged = TaggedFile::new(RiffCodec::default());

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();

		let mut data = TagData::new();
		data.set(TagField::Artist, "Chunked");
		tagged
			.save_tag_to(&mut file, TagType::Id3v2, &data, WriteOptions::new())
			.unwrap();

		// The tag is not at offset 0; it lives inside the container
		assert_eq!(&file.get_ref()[..4], b"RIFF");

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert!(tagged.id3v2().exists());
		assert_eq!(tagged.id3v2().data().get(TagField::Artist), Some("Chunked"));

		tagged.remove_tag_from(&mut file, TagType::Id3v2).unwrap();
		assert_eq!(file.into_inner(), wav());
	}

	#[test_log::test]
	fn hosted_and_standalone_tags_are_all_read_in_one_pass() {
		let mut file = Cursor::new(wav());
		let mut tagged = TaggedFile::new(RiffCodec::default());

		let mut native = TagData::new();
		native.set(TagField::Genre, "Darkwave");
		tagged
			.save_tag_to(&mut file, TagType::Native, &native, WriteOptions::new())
			.unwrap();

		let mut hosted = TagData::new();
		hosted.set(TagField::Title, "Hosted Title");
		tagged
			.save_tag_to(&mut file, TagType::Id3v2, &hosted, WriteOptions::new())
			.unwrap();

		let mut trailer = TagData::new();
		trailer.set(TagField::Artist, "Trailer Artist");
		tagged
			.save_tag_to(&mut file, TagType::Id3v1, &trailer, WriteOptions::new())
			.unwrap();

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert!(tagged.id3v1().exists());
		assert!(tagged.id3v2().exists());
		assert!(tagged.native().exists());
		assert_eq!(
			tagged.id3v1().data().get(TagField::Artist),
			Some("Trailer Artist")
		);
		assert_eq!(
			tagged.id3v2().data().get(TagField::Title),
			Some("Hosted Title")
		);
		assert_eq!(tagged.native().data().get(TagField::Genre), Some("Darkwave"));
	}

	#[test_log::test]
	fn all_three_standalone_tags_coexist_on_a_raw_stream() {
		let audio = vec![0xF0u8; 200];
		let mut file = Cursor::new(audio.clone());
		let mut tagged = TaggedFile::new(DummyCodec);

		let mut v2 = TagData::new();
		v2.set(TagField::Title, "From v2");
		v2.set(TagField::Album, "Shared Album");
		tagged
			.save_tag_to(&mut file, TagType::Id3v2, &v2, WriteOptions::new())
			.unwrap();

		let mut ape = TagData::new();
		ape.set(TagField::Artist, "From APE");
		tagged
			.save_tag_to(&mut file, TagType::Ape, &ape, WriteOptions::new())
			.unwrap();

		let mut v1 = TagData::new();
		v1.set(TagField::Title, "From v1");
		tagged
			.save_tag_to(&mut file, TagType::Id3v1, &v1, WriteOptions::new())
			.unwrap();

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert!(tagged.id3v1().exists());
		assert!(tagged.id3v2().exists());
		assert!(tagged.ape().exists());

		// Fallback order: ID3v2 wins for Title, APE supplies Artist
		let reader = tagged.cross_reader();
		assert_eq!(reader.get(TagField::Title), Some("From v2"));
		assert_eq!(reader.get(TagField::Artist), Some("From APE"));
		assert_eq!(reader.get(TagField::Album), Some("Shared Album"));

		let sizes = tagged.sizes();
		assert_eq!(sizes.audio_size, 200);
		assert_eq!(sizes.audio_offset, tagged.id3v2().size());

		// Strip everything, innermost last
		tagged.remove_tag_from(&mut file, TagType::Id3v1).unwrap();
		tagged.remove_tag_from(&mut file, TagType::Ape).unwrap();
		tagged.remove_tag_from(&mut file, TagType::Id3v2).unwrap();
		assert_eq!(file.into_inner(), audio);
	}

	#[test_log::test]
	fn file_backed_wav_round_trip() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(&wav()).unwrap();

		let mut tagged = TaggedFile::new(RiffCodec::default());
		let mut data = TagData::new();
		data.set(TagField::Title, "On Disk");
		tagged
			.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
			.unwrap();

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert_eq!(tagged.native().data().get(TagField::Title), Some("On Disk"));
	}
}
