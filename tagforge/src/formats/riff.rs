//! RIFF/WAVE support
//!
//! The native metadata lives in a `LIST`/`INFO` chunk of `[fourcc][u32le size][text]`
//! entries. The container also acts as an [`Embedder`], hosting a full ID3v2 tag inside
//! an `"id3 "` chunk. Every chunk is padded to an even boundary with a null byte that
//! is not counted in the chunk size, and the global RIFF size at offset 4 covers
//! everything after the first 8 bytes.

use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::engine::{Embedder, TagCodec, ZoneAnchor};
use crate::error::Result;
use crate::macros::{err, parse_err, try_vec, validation_err};
use crate::structure::{FileStructure, HeaderEncoding, HeaderField, HeaderRole, Zone};
use crate::tag::{AdditionalField, TagData, TagField, TagType};
use crate::util::text::utf8_decode;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

const INFO_ZONE: &str = "riff.info";
const ID3_ZONE: &str = "riff.id3";

// INFO entries mapped to canonical fields, in serialization order
const INFO_MAP: [([u8; 4], TagField); 10] = [
	(*b"INAM", TagField::Title),
	(*b"IART", TagField::Artist),
	(*b"IPRD", TagField::Album),
	(*b"ICMT", TagField::Comment),
	(*b"ICRD", TagField::RecordingDateOrYear),
	(*b"IGNR", TagField::Genre),
	(*b"ITRK", TagField::TrackNumber),
	(*b"ICOP", TagField::Copyright),
	(*b"IENG", TagField::EncodedBy),
	(*b"ILNG", TagField::Language),
];

/// Codec for the RIFF/WAVE container's `LIST INFO` metadata
///
/// Also implements [`Embedder`] for the `"id3 "` chunk, so an
/// [`Id3v2Codec`](super::Id3v2Codec) engine can rewrite the hosted tag through it.
pub struct RiffCodec {
	riff_end: u64,
	id3_chunk: Option<(u64, u64)>,
	audio: Option<(u64, u64)>,
}

impl Default for RiffCodec {
	fn default() -> Self {
		Self {
			riff_end: 12,
			id3_chunk: None,
			audio: None,
		}
	}
}

impl TagCodec for RiffCodec {
	const DEFAULT_ZONE: &'static str = INFO_ZONE;
	const TAG_TYPE: TagType = TagType::Native;

	fn read<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		structure: &mut FileStructure,
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<bool> {
		let start = reader.stream_position()?;
		self.id3_chunk = None;
		self.audio = None;

		let mut header = [0u8; 12];
		if reader.read_exact(&mut header).is_err() {
			err!(UnknownFormat);
		}
		if header[..4] != *b"RIFF" || header[8..12] != *b"WAVE" {
			err!(UnknownFormat);
		}

		let riff_size = u64::from(LittleEndian::read_u32(&header[4..8]));
		self.riff_end = start + 8 + riff_size;

		let mut info_found = false;
		let mut pos = start + 12;

		while pos + 8 <= self.riff_end {
			reader.seek(SeekFrom::Start(pos))?;

			let mut fourcc = [0u8; 4];
			let mut size_bytes = [0u8; 4];
			if reader.read_exact(&mut fourcc).is_err()
				|| reader.read_exact(&mut size_bytes).is_err()
			{
				break;
			}
			let chunk_size = u64::from(LittleEndian::read_u32(&size_bytes));
			let padded_size = chunk_size + (chunk_size & 1);

			if pos + 8 + chunk_size > self.riff_end {
				if options.parsing_mode == ParsingMode::Strict {
					parse_err!(@BAIL Native, "Chunk runs past the RIFF size");
				}
				log::warn!("RIFF: chunk runs past the container, stopping the walk");
				break;
			}

			match &fourcc {
				b"LIST" => {
					let mut list_type = [0u8; 4];
					reader.read_exact(&mut list_type)?;

					if list_type == *b"INFO" && chunk_size >= 4 {
						info_found = true;
						structure.add_zone(Zone::new(
							INFO_ZONE,
							pos,
							8 + padded_size,
							Vec::new(),
						));
						structure.declare_size_header(
							INFO_ZONE,
							start + 4,
							HeaderEncoding::U32Le,
						);

						let mut body = try_vec![0; chunk_size as usize - 4];
						reader.read_exact(&mut body)?;
						read_info_entries(&body, data, options)?;
					}
				},
				b"id3 " | b"ID3 " => {
					self.id3_chunk = Some((pos, chunk_size));
				},
				b"data" => {
					self.audio = Some((pos + 8, chunk_size));
				},
				_ => {},
			}

			pos += 8 + padded_size;
		}

		// New metadata chunks are appended at the end of the container, leaving any
		// trailing standalone tags (APE, ID3v1) outside the RIFF structure
		if options.prepare_for_writing && !info_found {
			structure.add_zone(Zone::new(INFO_ZONE, self.riff_end, 0, Vec::new()));
			structure.declare_size_header(INFO_ZONE, start + 4, HeaderEncoding::U32Le);
		}

		Ok(info_found)
	}

	fn write_zone(
		&mut self,
		data: &TagData,
		_zone_name: &str,
		_options: WriteOptions,
	) -> Result<Vec<u8>> {
		let mut entries = Vec::new();

		for (fourcc, field) in INFO_MAP {
			let Some(value) = data.get(field).filter(|v| !v.is_empty()) else {
				continue;
			};
			push_info_entry(&mut entries, fourcc, value)?;
		}

		for field in data.additional_fields() {
			if field.tag_type() != TagType::Native
				|| field.value().is_empty()
				|| field.native_code().len() != 4
			{
				continue;
			}

			let mut fourcc = [0u8; 4];
			fourcc.copy_from_slice(field.native_code().as_bytes());
			push_info_entry(&mut entries, fourcc, field.value())?;
		}

		if entries.is_empty() {
			return Ok(Vec::new());
		}

		let mut out = Vec::with_capacity(12 + entries.len());
		out.extend_from_slice(b"LIST");
		out.write_u32::<LittleEndian>(entries.len() as u32 + 4)?;
		out.extend_from_slice(b"INFO");
		out.extend_from_slice(&entries);
		if out.len() & 1 == 1 {
			out.push(0);
		}

		Ok(out)
	}

	fn validate(&self, data: &TagData) -> Result<()> {
		for field in data.additional_fields() {
			if field.tag_type() != TagType::Native {
				continue;
			}

			let code = field.native_code();
			if code.len() != 4 || !code.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
				validation_err!(@BAIL Native, "INFO entry codes must be exactly 4 printable ASCII characters");
			}
		}

		Ok(())
	}

	fn default_anchor(&self) -> ZoneAnchor {
		ZoneAnchor::ContainerBuiltin(self.riff_end)
	}

	fn map_native_code(&self, code: &str) -> Option<TagField> {
		INFO_MAP
			.iter()
			.find(|(fourcc, _)| fourcc.as_slice() == code.as_bytes())
			.map(|(_, field)| *field)
	}

	fn embedder(&mut self) -> Option<&mut dyn Embedder> {
		Some(self)
	}

	fn audio_range(&self) -> Option<(u64, u64)> {
		self.audio
	}
}

impl Embedder for RiffCodec {
	fn embedded_offset(&self) -> Option<u64> {
		self.id3_chunk.map(|(offset, _)| offset)
	}

	fn embedded_zone(&self) -> Zone {
		let zone = match self.id3_chunk {
			Some((offset, size)) => {
				Zone::new(ID3_ZONE, offset, 8 + size + (size & 1), Vec::new())
			},
			None => Zone::new(ID3_ZONE, self.riff_end, 0, Vec::new()),
		};

		zone.with_header(HeaderField::new(4, HeaderEncoding::U32Le, HeaderRole::Size))
	}

	fn embedding_header_size(&self) -> u64 {
		8
	}

	fn write_embedding_header(
		&self,
		out: &mut Vec<u8>,
		payload_size: u64,
		options: WriteOptions,
	) -> Result<()> {
		if payload_size > u64::from(u32::MAX) {
			err!(TooMuchData);
		}

		out.extend_from_slice(if options.uppercase_id3v2_chunk {
			b"ID3 "
		} else {
			b"id3 "
		});
		out.write_u32::<LittleEndian>(payload_size as u32)?;
		Ok(())
	}

	fn write_embedding_trailer(&self, out: &mut Vec<u8>, payload_size: u64) -> Result<()> {
		if payload_size & 1 == 1 {
			out.push(0);
		}
		Ok(())
	}
}

fn read_info_entries(body: &[u8], data: &mut TagData, options: ParseOptions) -> Result<()> {
	let mut pos = 0usize;

	while pos + 8 <= body.len() {
		let fourcc: [u8; 4] = body[pos..pos + 4].try_into().unwrap_or_default();
		let size = LittleEndian::read_u32(&body[pos + 4..pos + 8]) as usize;
		pos += 8;

		if pos + size > body.len() {
			log::warn!("RIFF: INFO entry runs past the list, stopping");
			break;
		}

		let raw = &body[pos..pos + size];
		pos += size + (size & 1);

		let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
		let text = utf8_decode(raw[..end].to_vec())?;
		if text.is_empty() {
			continue;
		}

		match INFO_MAP.iter().find(|(code, _)| *code == fourcc) {
			Some((_, field)) => data.set(*field, text),
			None => {
				if options.read_additional_fields {
					let code = String::from_utf8_lossy(&fourcc).into_owned();
					let mut field = AdditionalField::new(TagType::Native, code, text);
					field.zone = Some(INFO_ZONE.to_owned());
					data.add_additional_field(field);
				}
			},
		}
	}

	Ok(())
}

fn push_info_entry(out: &mut Vec<u8>, fourcc: [u8; 4], value: &str) -> Result<()> {
	// Value is null-terminated; the chunk itself pads to an even boundary
	let bytes = value.as_bytes();
	out.extend_from_slice(&fourcc);
	out.write_u32::<LittleEndian>(bytes.len() as u32 + 1)?;
	out.extend_from_slice(bytes);
	out.push(0);
	if (bytes.len() + 1) & 1 == 1 {
		out.push(0);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::TagEngine;
	use crate::formats::Id3v2Codec;

	use std::io::Cursor;

	// A minimal WAVE file: fmt chunk + 64 bytes of samples
	fn wav() -> Vec<u8> {
		let mut out = b"RIFF".to_vec();
		out.write_u32::<LittleEndian>(0).unwrap(); // patched below
		out.extend_from_slice(b"WAVE");

		out.extend_from_slice(b"fmt ");
		out.write_u32::<LittleEndian>(16).unwrap();
		out.extend_from_slice(&[0u8; 16]);

		out.extend_from_slice(b"data");
		out.write_u32::<LittleEndian>(64).unwrap();
		out.extend_from_slice(&[0x7Fu8; 64]);

		let riff_size = out.len() as u32 - 8;
		LittleEndian::write_u32(&mut out[4..8], riff_size);
		out
	}

	fn riff_size_of(bytes: &[u8]) -> u32 {
		LittleEndian::read_u32(&bytes[4..8])
	}

	#[test_log::test]
	fn info_list_round_trips_through_the_engine() {
		let mut file = Cursor::new(wav());
		let mut engine = TagEngine::new(RiffCodec::default());

		let mut data = TagData::new();
		data.set(TagField::Title, "Test !!");
		data.set(TagField::TrackNumber, "1");

		engine
			.save_to(&mut file, &data, None, WriteOptions::new())
			.unwrap();

		let bytes = file.get_ref().clone();
		assert_eq!(riff_size_of(&bytes), bytes.len() as u32 - 8);

		file.rewind().unwrap();
		let mut reread = TagEngine::new(RiffCodec::default());
		assert!(reread.read_from(&mut file, ParseOptions::new()).unwrap());
		assert_eq!(reread.data().get(TagField::Title), Some("Test !!"));
		assert_eq!(reread.data().get(TagField::TrackNumber), Some("1"));

		// The data chunk must be untouched
		assert_eq!(reread.codec().audio_range(), Some((36, 64)));
	}

	#[test_log::test]
	fn removal_restores_the_original_file() {
		let mut file = Cursor::new(wav());
		let mut engine = TagEngine::new(RiffCodec::default());

		let mut data = TagData::new();
		data.set(TagField::Artist, "Someone");
		engine
			.save_to(&mut file, &data, None, WriteOptions::new())
			.unwrap();
		assert_ne!(*file.get_ref(), wav());

		engine.remove_from(&mut file, None).unwrap();
		assert_eq!(file.into_inner(), wav());
	}

	#[test_log::test]
	fn non_fourcc_entry_codes_are_rejected_before_writing() {
		let mut file = Cursor::new(wav());
		let mut engine = TagEngine::new(RiffCodec::default());

		let mut data = TagData::new();
		data.add_additional_field(AdditionalField::new(TagType::Native, "ABC", "value"));

		let err = engine
			.save_to(&mut file, &data, None, WriteOptions::new())
			.unwrap_err();
		assert!(matches!(
			err.kind(),
			crate::error::ErrorKind::Validation(_)
		));

		// Hard constraints fail before any byte is touched
		assert_eq!(file.into_inner(), wav());
	}

	#[test_log::test]
	fn non_riff_input_is_an_unknown_format() {
		let mut codec = RiffCodec::default();
		let mut structure = FileStructure::new();
		let mut data = TagData::new();
		let mut cursor = Cursor::new(b"not a riff file at all".to_vec());

		let err = codec
			.read(&mut cursor, &mut structure, &mut data, ParseOptions::new())
			.unwrap_err();
		assert!(matches!(
			err.kind(),
			crate::error::ErrorKind::UnknownFormat
		));
	}

	#[test_log::test]
	fn embedded_id3v2_is_rewritten_through_the_host() {
		let mut file = Cursor::new(wav());

		// Discover the container, then drive an ID3v2 engine through its embedder
		let mut riff = TagEngine::new(RiffCodec::default());
		let _ = riff
			.read_from(
				&mut file,
				ParseOptions::new().prepare_for_writing(true),
			)
			.unwrap();

		let mut id3v2 = TagEngine::new(Id3v2Codec);
		let mut data = TagData::new();
		data.set(TagField::Title, "hosted");

		id3v2
			.save_to(
				&mut file,
				&data,
				riff.codec_mut().embedder(),
				WriteOptions::new(),
			)
			.unwrap();

		let bytes = file.get_ref().clone();
		assert_eq!(riff_size_of(&bytes), bytes.len() as u32 - 8);
		// The chunk lands at the former end of the container
		assert_eq!(&bytes[wav().len()..wav().len() + 4], b"ID3 ");
		assert_eq!(&bytes[wav().len() + 8..wav().len() + 11], b"ID3");

		// A fresh container read now sees the chunk; read the hosted tag back
		file.rewind().unwrap();
		let mut riff = TagEngine::new(RiffCodec::default());
		let _ = riff
			.read_from(
				&mut file,
				ParseOptions::new().prepare_for_writing(true),
			)
			.unwrap();

		let (chunk_offset, _) = riff.codec().id3_chunk.unwrap();
		file.seek(SeekFrom::Start(chunk_offset + 8)).unwrap();
		let mut hosted = TagEngine::new(Id3v2Codec);
		assert!(hosted.read_from(&mut file, ParseOptions::new()).unwrap());
		assert_eq!(hosted.data().get(TagField::Title), Some("hosted"));

		// Removing the hosted tag restores the original container
		let mut id3v2 = TagEngine::new(Id3v2Codec);
		id3v2
			.remove_from(&mut file, riff.codec_mut().embedder())
			.unwrap();
		assert_eq!(file.into_inner(), wav());
	}
}
