//! The generic zone-based tag rewrite engine
//!
//! [`TagEngine`] drives one tag instance through its read → merge → splice → patch-headers
//! lifecycle. It knows nothing about any concrete byte grammar: structure discovery and
//! zone serialization are delegated to a [`TagCodec`], and containers that can host a
//! foreign tag inside their own chunk structure expose an [`Embedder`].

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TagForgeError};
use crate::structure::{FileStructure, Zone, ZoneAction};
use crate::tag::{TagData, TagField, TagType};
use crate::util::io::{FileLike, Length, Truncate};
use crate::util::splice;

use std::io::{Read, Seek, SeekFrom};

/// Where a zone with no prior on-disk presence is spliced in
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ZoneAnchor {
	/// Prepend to the file (header tags, e.g. ID3v2)
	BeginningOfFile,
	/// Append to the file (trailer tags, e.g. ID3v1)
	EndOfFile,
	/// A location the container dictates, resolved during the last read
	ContainerBuiltin(u64),
}

/// The collaborator contract a concrete tag format implements
///
/// The engine owns the protocol; the codec owns the bytes. During a read the codec
/// walks the stream, registers a [`Zone`] for every structural region it recognizes and
/// fills the [`TagData`]; during a write it serializes the merged content one zone at a
/// time.
pub trait TagCodec {
	/// The tag system this codec implements
	const TAG_TYPE: TagType;

	/// Whether this tag type can live inside a foreign container's chunk structure
	const EMBEDDABLE: bool = false;

	/// The zone name used when the tag has no prior on-disk presence
	const DEFAULT_ZONE: &'static str;

	/// Parse the tag's structure starting at the stream's current position
	///
	/// Returns whether at least one structural marker was found. Codecs for formats
	/// that allow linear resynchronization should recover from junk under
	/// [`ParsingMode::BestAttempt`](crate::config::ParsingMode::BestAttempt) instead
	/// of failing.
	fn read<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		structure: &mut FileStructure,
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<bool>;

	/// Serialize the content belonging to one named zone
	///
	/// Returning an empty buffer signals "nothing to write here"; the engine then falls
	/// back to the zone's core signature.
	fn write_zone(
		&mut self,
		data: &TagData,
		zone_name: &str,
		options: WriteOptions,
	) -> Result<Vec<u8>>;

	/// Check hard format constraints before any byte of the file is touched
	///
	/// Soft restrictions (oversized values for fixed-size slots, unsupported picture
	/// kinds) must *not* fail here; they are logged and handled leniently at
	/// serialization time instead.
	fn validate(&self, data: &TagData) -> Result<()> {
		let _ = data;
		Ok(())
	}

	/// Where to splice in a zone that has no prior on-disk presence
	fn default_anchor(&self) -> ZoneAnchor;

	/// Classify a format-native field code as canonical, or `None` for additional
	fn map_native_code(&self, code: &str) -> Option<TagField> {
		let _ = code;
		None
	}

	/// The optional embedding capability of this *container* codec
	///
	/// A container that can host a foreign tag (ID3v2) inside one of its own chunks
	/// returns itself here. Resolved once by the orchestrator and threaded through;
	/// never discovered by runtime type inspection.
	fn embedder(&mut self) -> Option<&mut dyn Embedder> {
		None
	}

	/// The audio payload's `(offset, size)`, when the container knows it exactly
	fn audio_range(&self) -> Option<(u64, u64)> {
		None
	}
}

/// The capability of hosting a foreign tag inside a container's own chunk structure
///
/// The implementing container codec is authoritative about the hosting chunk's
/// location and layout; the engine substitutes the embedder-supplied zone for whatever
/// the embedded tag's own codec discovered.
pub trait Embedder {
	/// The absolute offset of the hosting chunk's header, if the chunk exists
	fn embedded_offset(&self) -> Option<u64>;

	/// The zone covering the hosting chunk, dependent headers included
	///
	/// For a chunk not yet present, the zone is empty and anchored at the container's
	/// insertion point.
	fn embedded_zone(&self) -> Zone;

	/// The size of the hosting chunk's header preceding the embedded payload
	fn embedding_header_size(&self) -> u64;

	/// Write the hosting chunk's header for a payload of the given size
	fn write_embedding_header(
		&self,
		out: &mut Vec<u8>,
		payload_size: u64,
		options: WriteOptions,
	) -> Result<()>;

	/// Write any trailing bytes the container requires after the payload
	///
	/// RIFF-style containers pad odd-sized chunks with a null byte that is not counted
	/// in the chunk size.
	fn write_embedding_trailer(&self, out: &mut Vec<u8>, payload_size: u64) -> Result<()> {
		let _ = (out, payload_size);
		Ok(())
	}
}

/// One tag instance's read/write/remove state machine
///
/// Holds the codec, the canonical [`TagData`] and the [`FileStructure`] discovered by
/// the last read. Both are rebuilt from scratch on every read; a write merges new data
/// into the re-read state and replays every zone through the splice primitives.
pub struct TagEngine<C: TagCodec> {
	codec: C,
	data: TagData,
	structure: FileStructure,
	exists: bool,
	offset: u64,
	size: u64,
}

impl<C: TagCodec> TagEngine<C> {
	/// Create an engine around a codec, in the unread state
	#[must_use]
	pub fn new(codec: C) -> Self {
		Self {
			codec,
			data: TagData::new(),
			structure: FileStructure::new(),
			exists: false,
			offset: 0,
			size: 0,
		}
	}

	/// The canonical content of the last read (or the last committed write)
	pub fn data(&self) -> &TagData {
		&self.data
	}

	/// The engine's codec
	pub fn codec(&self) -> &C {
		&self.codec
	}

	/// The engine's codec, mutably
	pub fn codec_mut(&mut self) -> &mut C {
		&mut self.codec
	}

	/// The zone registry of the last read
	pub fn structure(&self) -> &FileStructure {
		&self.structure
	}

	/// Whether the last read found the tag on disk
	pub fn exists(&self) -> bool {
		self.exists
	}

	/// The file-relative offset of the tag's first zone (0 when absent)
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// The total on-disk size of the tag's zones
	pub fn size(&self) -> u64 {
		self.size
	}

	/// Read the tag starting at the stream's current position
	///
	/// Zones and data are rebuilt from scratch. A failed read of this tag type leaves
	/// sibling tags (driven by their own engines) unaffected.
	pub fn read_from<R>(&mut self, reader: &mut R, options: ParseOptions) -> Result<bool>
	where
		R: Read + Seek,
	{
		self.structure.clear();
		self.data.clear();

		self.exists = self
			.codec
			.read(reader, &mut self.structure, &mut self.data, options)?;
		self.recompute_extent();

		Ok(self.exists)
	}

	/// Merge `new_data` into the on-disk tag and rewrite the file in place
	///
	/// This is the two-phase protocol: a discovery re-read (with
	/// [`prepare_for_writing`](ParseOptions::prepare_for_writing) semantics) rebuilds
	/// every zone and the complete prior state, then the merged content is serialized
	/// per zone and spliced in registration order, patching dependent headers as zones
	/// resize.
	///
	/// All zone buffers are serialized *before* the first splice, so a serialization
	/// failure leaves the file untouched. An I/O failure between the splices of a
	/// multi-zone tag can still leave earlier zones migrated and later ones not; no
	/// cross-zone rollback is attempted.
	pub fn save_to<F>(
		&mut self,
		file: &mut F,
		new_data: &TagData,
		embedder: Option<&mut dyn Embedder>,
		write_options: WriteOptions,
	) -> Result<()>
	where
		F: FileLike,
		TagForgeError: From<<F as Truncate>::Error>,
		TagForgeError: From<<F as Length>::Error>,
	{
		// Step 1: hard constraints abort before any byte is touched
		self.codec.validate(new_data)?;

		// Step 2: full rediscovery, nothing filtered out
		self.structure.clear();
		self.data.clear();

		let read_options = ParseOptions::new()
			.read_pictures(true)
			.read_additional_fields(true)
			.prepare_for_writing(true);

		if C::EMBEDDABLE && embedder.is_some() {
			let hosted = embedder
				.as_ref()
				.and_then(|e| e.embedded_offset().map(|o| o + e.embedding_header_size()));

			if let Some(payload_offset) = hosted {
				file.seek(SeekFrom::Start(payload_offset))?;
				self.exists =
					self.codec
						.read(file, &mut self.structure, &mut self.data, read_options)?;
			} else {
				self.exists = false;
			}

			// Step 3: the embedder is authoritative about the foreign container's
			// layout; the codec's self-discovered zones are discarded
			if let Some(e) = embedder.as_ref() {
				self.structure.clear();
				self.structure.add_zone(e.embedded_zone());
			}
		} else {
			file.rewind()?;
			self.exists = self
				.codec
				.read(file, &mut self.structure, &mut self.data, read_options)?;
		}

		// Step 4: guarantee a splice target even for a tag with no prior presence
		if self.structure.is_empty() {
			let offset = match self.codec.default_anchor() {
				ZoneAnchor::BeginningOfFile => 0,
				ZoneAnchor::EndOfFile => file.len()?,
				ZoneAnchor::ContainerBuiltin(offset) => offset,
			};
			self.structure
				.add_zone(Zone::new(C::DEFAULT_ZONE, offset, 0, Vec::new()));
		}

		// Step 5: merge prior state with the caller's changes
		let mut merged = self.data.clone();
		merged.integrate(new_data, write_options);

		// Step 6a: serialize every zone before the first splice
		let zone_count = self.structure.zone_count();
		let mut buffers: Vec<Vec<u8>> = Vec::with_capacity(zone_count);

		for index in 0..zone_count {
			let zone_name = self.structure.zone_at(index).name().to_owned();
			let payload = self.codec.write_zone(&merged, &zone_name, write_options)?;

			let buffer = if payload.is_empty() {
				// Tag became fully empty: leave only the core signature behind
				self.structure.zone_at(index).core_signature().to_vec()
			} else if C::EMBEDDABLE {
				match embedder.as_ref() {
					Some(e) => {
						let mut wrapped =
							Vec::with_capacity(payload.len() + e.embedding_header_size() as usize);
						e.write_embedding_header(&mut wrapped, payload.len() as u64, write_options)?;
						wrapped.extend_from_slice(&payload);
						e.write_embedding_trailer(&mut wrapped, payload.len() as u64)?;
						wrapped
					},
					None => payload,
				}
			} else {
				payload
			};

			buffers.push(buffer);
		}

		// Step 6b-e: splice zone by zone, in registration order
		for (index, buffer) in buffers.into_iter().enumerate() {
			let (zone_name, offset, old_size, sig_len) = {
				let zone = self.structure.zone_at(index);
				(
					zone.name().to_owned(),
					zone.offset(),
					zone.size(),
					zone.core_signature().len() as u64,
				)
			};

			let new_size = buffer.len() as u64;
			let delta = new_size as i64 - old_size as i64;

			if delta > 0 {
				splice::lengthen(file, offset + old_size, delta as u64, false)?;
			} else if delta < 0 {
				splice::shorten(file, offset + old_size, delta.unsigned_abs())?;
			}

			if !buffer.is_empty() {
				file.seek(SeekFrom::Start(offset))?;
				file.write_all(&buffer)?;
			}

			if delta != 0 {
				let action = match (old_size <= sig_len, new_size <= sig_len) {
					(true, false) => ZoneAction::Add,
					(false, true) => ZoneAction::Delete,
					_ => ZoneAction::Edit,
				};

				log::debug!(
					"Zone {zone_name:?}: {action:?}, {old_size} -> {new_size} bytes at {offset}"
				);

				// Later zones and header positions move with the splice before
				// their headers are patched
				self.structure.shift_after(&zone_name, offset, delta);
				self.structure
					.rewrite_headers(file, &zone_name, delta, action)?;
			}

			self.structure.zone_at_mut(index).set_size(new_size);
		}

		// Step 7: commit the merged state
		self.data = merged;
		self.exists = !self.data.is_empty();
		self.recompute_extent();

		Ok(())
	}

	/// Strip the tag from the file, leaving each zone's core signature behind
	///
	/// Zones are processed in registration order with a running cumulative delta, so
	/// every later zone is spliced at its corrected offset.
	pub fn remove_from<F>(
		&mut self,
		file: &mut F,
		embedder: Option<&mut dyn Embedder>,
	) -> Result<()>
	where
		F: FileLike,
		TagForgeError: From<<F as Truncate>::Error>,
		TagForgeError: From<<F as Length>::Error>,
	{
		// Rediscover the current layout
		self.structure.clear();
		self.data.clear();

		let read_options = ParseOptions::new().prepare_for_writing(true);

		if C::EMBEDDABLE && embedder.is_some() {
			let hosted = embedder
				.as_ref()
				.and_then(|e| e.embedded_offset().map(|o| o + e.embedding_header_size()));

			if let Some(payload_offset) = hosted {
				file.seek(SeekFrom::Start(payload_offset))?;
				let _ = self
					.codec
					.read(file, &mut self.structure, &mut self.data, read_options)?;
			}

			if let Some(e) = embedder.as_ref() {
				self.structure.clear();
				if e.embedded_offset().is_some() {
					self.structure.add_zone(e.embedded_zone());
				}
			}
		} else {
			file.rewind()?;
			let _ = self
				.codec
				.read(file, &mut self.structure, &mut self.data, read_options)?;
		}

		for index in 0..self.structure.zone_count() {
			let (zone_name, offset, size, signature) = {
				let zone = self.structure.zone_at(index);
				(
					zone.name().to_owned(),
					zone.offset(),
					zone.size(),
					zone.core_signature().to_vec(),
				)
			};

			let sig_len = signature.len() as u64;
			if size <= sig_len {
				continue;
			}

			let removed = size - sig_len;
			splice::shorten(file, offset + size, removed)?;

			if !signature.is_empty() {
				file.seek(SeekFrom::Start(offset))?;
				file.write_all(&signature)?;
			}

			let delta = -(removed as i64);
			self.structure.shift_after(&zone_name, offset, delta);
			self.structure
				.rewrite_headers(file, &zone_name, delta, ZoneAction::Delete)?;
			self.structure.zone_at_mut(index).set_size(sig_len);
		}

		self.data.clear();
		self.exists = false;
		self.recompute_extent();

		Ok(())
	}

	fn recompute_extent(&mut self) {
		let live = self
			.structure
			.zones()
			.iter()
			.filter(|z| z.size() > 0);

		self.size = live.clone().map(Zone::size).sum();
		self.offset = live.map(Zone::offset).min().unwrap_or(0);
	}
}

#[cfg(test)]
mod tests {
	use super::{Embedder, TagCodec, TagEngine, ZoneAnchor};
	use crate::config::{ParseOptions, WriteOptions};
	use crate::error::Result;
	use crate::macros::validation_err;
	use crate::structure::{FileStructure, HeaderEncoding, Zone};
	use crate::tag::{AdditionalField, TagData, TagType};

	use std::io::{Cursor, Read, Seek, Write};

	use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

	// A minimal two-zone container: "TOY0", a u32le payload size, then up to two
	// records of the form [id u8][len u16le][bytes], ids b'a' and b'b'. The payload
	// size header belongs to both zones, so resizing either must patch it.
	struct ToyCodec;

	const ZONE_IDS: [(&str, u8); 2] = [("a", b'a'), ("b", b'b')];

	impl TagCodec for ToyCodec {
		const DEFAULT_ZONE: &'static str = "a";
		const TAG_TYPE: TagType = TagType::Native;

		fn read<R: Read + Seek>(
			&mut self,
			reader: &mut R,
			structure: &mut FileStructure,
			data: &mut TagData,
			_options: ParseOptions,
		) -> Result<bool> {
			let start = reader.stream_position()?;

			let mut magic = [0u8; 4];
			if reader.read_exact(&mut magic).is_err() || magic != *b"TOY0" {
				return Ok(false);
			}

			let total = u64::from(reader.read_u32::<LittleEndian>()?);
			let end = start + 8 + total;

			let mut pos = start + 8;
			let mut seen = Vec::new();
			while pos < end {
				let id = reader.read_u8()?;
				let len = reader.read_u16::<LittleEndian>()?;
				let mut value = vec![0u8; usize::from(len)];
				reader.read_exact(&mut value)?;

				let Some((name, _)) = ZONE_IDS.iter().find(|(_, i)| *i == id) else {
					return Ok(false);
				};

				let size = 3 + u64::from(len);
				structure.add_zone(Zone::new(*name, pos, size, Vec::new()));
				structure.declare_size_header(name, start + 4, HeaderEncoding::U32Le);
				data.add_additional_field(AdditionalField::new(
					TagType::Native,
					*name,
					String::from_utf8(value)?,
				));

				seen.push(*name);
				pos += size;
			}

			// Absent records still get an (empty) zone at the insertion point
			for (name, _) in ZONE_IDS {
				if !seen.contains(&name) {
					structure.add_zone(Zone::new(name, end, 0, Vec::new()));
					structure.declare_size_header(name, start + 4, HeaderEncoding::U32Le);
				}
			}

			Ok(!seen.is_empty())
		}

		fn write_zone(
			&mut self,
			data: &TagData,
			zone_name: &str,
			_options: WriteOptions,
		) -> Result<Vec<u8>> {
			let Some(field) = data
				.additional_fields()
				.iter()
				.find(|f| f.native_code() == zone_name && !f.value().is_empty())
			else {
				return Ok(Vec::new());
			};

			let (_, id) = ZONE_IDS
				.iter()
				.find(|(name, _)| *name == zone_name)
				.copied()
				.unwrap();

			let value = field.value().as_bytes();
			let mut out = Vec::with_capacity(3 + value.len());
			out.write_u8(id)?;
			out.write_u16::<LittleEndian>(value.len() as u16)?;
			out.extend_from_slice(value);
			Ok(out)
		}

		fn validate(&self, data: &TagData) -> Result<()> {
			for field in data.additional_fields() {
				if field.native_code().len() != 1 {
					validation_err!(@BAIL Native, "Item codes must be a single character");
				}
			}

			Ok(())
		}

		fn default_anchor(&self) -> ZoneAnchor {
			ZoneAnchor::ContainerBuiltin(8)
		}
	}

	fn toy_file(records: &[(u8, &[u8])]) -> Vec<u8> {
		let mut out = b"TOY0".to_vec();
		let total: usize = records.iter().map(|(_, v)| 3 + v.len()).sum();
		out.write_u32::<LittleEndian>(total as u32).unwrap();
		for (id, value) in records {
			out.write_u8(*id).unwrap();
			out.write_u16::<LittleEndian>(value.len() as u16).unwrap();
			out.extend_from_slice(value);
		}
		out
	}

	fn field(code: &str, value: &str) -> TagData {
		let mut data = TagData::new();
		data.add_additional_field(AdditionalField::new(TagType::Native, code, value));
		data
	}

	#[test_log::test]
	fn grow_zone_shifts_followers_and_patches_header() {
		let mut file = Cursor::new(toy_file(&[(b'a', b"aaaa"), (b'b', b"bb")]));
		let mut engine = TagEngine::new(ToyCodec);

		engine
			.save_to(&mut file, &field("a", "aaaaaaaa"), None, WriteOptions::new())
			.unwrap();

		assert_eq!(
			file.into_inner(),
			toy_file(&[(b'a', b"aaaaaaaa"), (b'b', b"bb")])
		);
		assert!(engine.exists());
		assert_eq!(engine.offset(), 8);
		assert_eq!(engine.size(), 11 + 5);
	}

	#[test_log::test]
	fn second_identical_write_is_byte_identical() {
		let mut file = Cursor::new(toy_file(&[(b'a', b"aaaa"), (b'b', b"bb")]));
		let mut engine = TagEngine::new(ToyCodec);

		let new_data = field("b", "longer than before");
		engine
			.save_to(&mut file, &new_data, None, WriteOptions::new())
			.unwrap();
		let first = file.get_ref().clone();

		engine
			.save_to(&mut file, &new_data, None, WriteOptions::new())
			.unwrap();
		assert_eq!(*file.get_ref(), first);
	}

	#[test_log::test]
	fn deleting_one_zone_shrinks_the_container() {
		let mut file = Cursor::new(toy_file(&[(b'a', b"aaaa"), (b'b', b"bb")]));
		let mut engine = TagEngine::new(ToyCodec);

		let mut deletion = TagData::new();
		let mut dead = AdditionalField::new(TagType::Native, "a", "");
		dead.mark_for_deletion();
		deletion.add_additional_field(dead);

		engine
			.save_to(&mut file, &deletion, None, WriteOptions::new())
			.unwrap();

		assert_eq!(file.into_inner(), toy_file(&[(b'b', b"bb")]));
	}

	#[test_log::test]
	fn new_zone_is_spliced_at_the_insertion_point() {
		let mut file = Cursor::new(toy_file(&[(b'a', b"aaaa")]));
		let mut engine = TagEngine::new(ToyCodec);

		engine
			.save_to(&mut file, &field("b", "xyz"), None, WriteOptions::new())
			.unwrap();

		assert_eq!(
			file.into_inner(),
			toy_file(&[(b'a', b"aaaa"), (b'b', b"xyz")])
		);
	}

	#[test_log::test]
	fn remove_strips_all_zones_and_zeroes_the_header() {
		let mut file = Cursor::new(toy_file(&[(b'a', b"aaaa"), (b'b', b"bb")]));
		let mut engine = TagEngine::new(ToyCodec);

		engine.remove_from(&mut file, None).unwrap();

		assert_eq!(file.into_inner(), toy_file(&[]));
		assert!(!engine.exists());
		assert!(engine.data().is_empty());
		assert_eq!(engine.size(), 0);
	}

	#[test_log::test]
	fn validation_failure_leaves_the_file_untouched() {
		let original = toy_file(&[(b'a', b"aaaa")]);
		let mut file = Cursor::new(original.clone());
		let mut engine = TagEngine::new(ToyCodec);

		let err = engine
			.save_to(&mut file, &field("oops", "v"), None, WriteOptions::new())
			.unwrap_err();

		assert!(matches!(
			err.kind(),
			crate::error::ErrorKind::Validation(_)
		));
		assert_eq!(file.into_inner(), original);
	}

	#[test_log::test]
	fn file_backed_save_round_trips() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(&toy_file(&[(b'a', b"hello")])).unwrap();

		let mut engine = TagEngine::new(ToyCodec);
		engine
			.save_to(&mut file, &field("b", "world"), None, WriteOptions::new())
			.unwrap();

		file.rewind().unwrap();
		let mut contents = Vec::new();
		file.read_to_end(&mut contents).unwrap();
		assert_eq!(contents, toy_file(&[(b'a', b"hello"), (b'b', b"world")]));

		file.rewind().unwrap();
		let mut reread = TagEngine::new(ToyCodec);
		assert!(reread.read_from(&mut file, ParseOptions::new()).unwrap());
		assert_eq!(
			reread
				.data()
				.additional_fields()
				.iter()
				.map(|f| (f.native_code().to_owned(), f.value().to_owned()))
				.collect::<Vec<_>>(),
			[("a".to_owned(), "hello".to_owned()), ("b".to_owned(), "world".to_owned())]
		);
	}

	// A toy embedder hosting the "a"/"b" payload inside an outer [u32le chunk size]
	// prefix at a fixed offset, to exercise zone substitution and payload wrapping
	struct ToyEmbedder {
		chunk_offset: Option<u64>,
		chunk_size: u64,
	}

	impl Embedder for ToyEmbedder {
		fn embedded_offset(&self) -> Option<u64> {
			self.chunk_offset
		}

		fn embedded_zone(&self) -> Zone {
			match self.chunk_offset {
				Some(offset) => Zone::new("outer.toy", offset, 4 + self.chunk_size, Vec::new()),
				None => Zone::new("outer.toy", 4, 0, Vec::new()),
			}
		}

		fn embedding_header_size(&self) -> u64 {
			4
		}

		fn write_embedding_header(
			&self,
			out: &mut Vec<u8>,
			payload_size: u64,
			_options: WriteOptions,
		) -> Result<()> {
			out.write_u32::<LittleEndian>(payload_size as u32)?;
			Ok(())
		}
	}

	struct EmbeddedToyCodec;

	impl TagCodec for EmbeddedToyCodec {
		const DEFAULT_ZONE: &'static str = "toy";
		const EMBEDDABLE: bool = true;
		const TAG_TYPE: TagType = TagType::Native;

		fn read<R: Read + Seek>(
			&mut self,
			reader: &mut R,
			structure: &mut FileStructure,
			data: &mut TagData,
			options: ParseOptions,
		) -> Result<bool> {
			ToyCodec.read(reader, structure, data, options)
		}

		fn write_zone(
			&mut self,
			data: &TagData,
			_zone_name: &str,
			options: WriteOptions,
		) -> Result<Vec<u8>> {
			// The whole tag serializes into the single hosting chunk
			let mut out = b"TOY0".to_vec();
			let mut body = Vec::new();
			for (name, _) in ZONE_IDS {
				body.extend_from_slice(&ToyCodec.write_zone(data, name, options)?);
			}
			if body.is_empty() {
				return Ok(Vec::new());
			}
			out.write_u32::<LittleEndian>(body.len() as u32)?;
			out.extend_from_slice(&body);
			Ok(out)
		}

		fn default_anchor(&self) -> ZoneAnchor {
			ZoneAnchor::BeginningOfFile
		}
	}

	#[test_log::test]
	fn embedded_write_substitutes_the_host_zone() {
		// Outer file: 4 bytes of preamble, then the hosting chunk, then a trailer
		let inner = toy_file(&[(b'a', b"aa")]);
		let mut bytes = b"OUTR".to_vec();
		bytes.write_u32::<LittleEndian>(inner.len() as u32).unwrap();
		bytes.extend_from_slice(&inner);
		bytes.extend_from_slice(b"TRAILER");

		let mut file = Cursor::new(bytes);
		let mut embedder = ToyEmbedder {
			chunk_offset: Some(4),
			chunk_size: inner.len() as u64,
		};
		let mut engine = TagEngine::new(EmbeddedToyCodec);

		engine
			.save_to(
				&mut file,
				&field("a", "aaaaaa"),
				Some(&mut embedder),
				WriteOptions::new(),
			)
			.unwrap();

		let new_inner = toy_file(&[(b'a', b"aaaaaa")]);
		let mut expected = b"OUTR".to_vec();
		expected
			.write_u32::<LittleEndian>(new_inner.len() as u32)
			.unwrap();
		expected.extend_from_slice(&new_inner);
		expected.extend_from_slice(b"TRAILER");

		assert_eq!(file.into_inner(), expected);
	}
}
