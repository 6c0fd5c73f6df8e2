//! APEv2 support
//!
//! An APE tag is a list of keyed items framed by 32-byte "APETAGEX" header/footer
//! blocks. The footer is mandatory and self-describing, so the tag is located by
//! probing the end of the file; an ID3v1 trailer after the tag is accounted for.

use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::engine::{TagCodec, ZoneAnchor};
use crate::error::Result;
use crate::macros::{parse_err, try_vec, validation_err};
use crate::structure::{FileStructure, Zone};
use crate::tag::{AdditionalField, MimeType, Picture, PictureType, TagData, TagField, TagType};
use crate::util::text::{latin1_decode, utf8_decode};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

const ZONE: &str = "ape";
const PREAMBLE: [u8; 8] = *b"APETAGEX";
const VERSION: u32 = 2000;
const BLOCK_SIZE: u64 = 32;

const FLAG_HAS_HEADER: u32 = 1 << 31;
const FLAG_IS_HEADER: u32 = 1 << 29;
const ITEM_FLAG_BINARY: u32 = 1 << 1;

// Keys that collide with the markers of other tag systems
const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

// Fixed serialization order for canonical fields
const KEY_MAP: [(&str, TagField); 16] = [
	("Title", TagField::Title),
	("Artist", TagField::Artist),
	("Album", TagField::Album),
	("Album Artist", TagField::AlbumArtist),
	("Composer", TagField::Composer),
	("Conductor", TagField::Conductor),
	("Lyricist", TagField::Lyricist),
	("Publisher", TagField::Publisher),
	("Copyright", TagField::Copyright),
	("Language", TagField::Language),
	("Comment", TagField::Comment),
	("Genre", TagField::Genre),
	("Year", TagField::RecordingDateOrYear),
	("BPM", TagField::Bpm),
	("Track", TagField::TrackNumber),
	("Disc", TagField::DiscNumber),
];

/// Codec for APEv2 tags located by their trailing footer
pub struct ApeCodec {
	anchor: ZoneAnchor,
}

impl Default for ApeCodec {
	fn default() -> Self {
		Self {
			anchor: ZoneAnchor::EndOfFile,
		}
	}
}

impl TagCodec for ApeCodec {
	const DEFAULT_ZONE: &'static str = ZONE;
	const TAG_TYPE: TagType = TagType::Ape;

	fn read<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		structure: &mut FileStructure,
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<bool> {
		let file_len = reader.seek(SeekFrom::End(0))?;

		// An ID3v1 trailer sits after the APE tag; new APE tags also go before it
		let mut trailing = 0u64;
		self.anchor = ZoneAnchor::EndOfFile;
		if file_len >= 128 {
			reader.seek(SeekFrom::End(-128))?;
			let mut marker = [0u8; 3];
			reader.read_exact(&mut marker)?;
			if marker == *b"TAG" {
				trailing = 128;
				self.anchor = ZoneAnchor::ContainerBuiltin(file_len - 128);
			}
		}

		if file_len < trailing + BLOCK_SIZE {
			return Ok(false);
		}

		let footer_end = file_len - trailing;
		reader.seek(SeekFrom::Start(footer_end - BLOCK_SIZE))?;
		let mut footer = [0u8; BLOCK_SIZE as usize];
		reader.read_exact(&mut footer)?;

		if footer[..8] != PREAMBLE {
			return Ok(false);
		}

		let version = LittleEndian::read_u32(&footer[8..12]);
		let tag_size = u64::from(LittleEndian::read_u32(&footer[12..16]));
		let item_count = LittleEndian::read_u32(&footer[16..20]);
		let flags = LittleEndian::read_u32(&footer[20..24]);

		if flags & FLAG_IS_HEADER != 0 || tag_size < BLOCK_SIZE || tag_size > footer_end {
			if options.parsing_mode == ParsingMode::Strict {
				parse_err!(@BAIL Ape, "Inconsistent APE footer");
			}
			log::warn!("APE: inconsistent footer, ignoring the tag");
			return Ok(false);
		}

		if version > VERSION {
			log::warn!("APE: unexpected version {version}");
		}

		let header_size = if flags & FLAG_HAS_HEADER != 0 {
			BLOCK_SIZE
		} else {
			0
		};
		let items_start = footer_end - tag_size;
		let zone_offset = items_start - header_size;

		structure.add_zone(Zone::new(
			ZONE,
			zone_offset,
			tag_size + header_size,
			Vec::new(),
		));
		self.anchor = ZoneAnchor::ContainerBuiltin(zone_offset);

		reader.seek(SeekFrom::Start(items_start))?;
		let mut remaining = tag_size - BLOCK_SIZE;

		for _ in 0..item_count {
			if remaining < 9 {
				if options.parsing_mode == ParsingMode::Strict {
					parse_err!(@BAIL Ape, "Item count exceeds the tag");
				}
				log::warn!("APE: item count exceeds the tag, stopping early");
				break;
			}

			let mut item_header = [0u8; 8];
			reader.read_exact(&mut item_header)?;
			let value_size = LittleEndian::read_u32(&item_header[..4]) as usize;
			let item_flags = LittleEndian::read_u32(&item_header[4..8]);

			let mut key_bytes = Vec::new();
			loop {
				let mut byte = [0u8; 1];
				reader.read_exact(&mut byte)?;
				if byte[0] == 0 {
					break;
				}
				key_bytes.push(byte[0]);
			}

			let consumed = 8 + key_bytes.len() as u64 + 1 + value_size as u64;
			if consumed > remaining {
				if options.parsing_mode == ParsingMode::Strict {
					parse_err!(@BAIL Ape, "Item value exceeds the tag");
				}
				log::warn!("APE: item value exceeds the tag, stopping early");
				break;
			}
			remaining -= consumed;

			let key = latin1_decode(&key_bytes);
			let mut value = try_vec![0; value_size];
			reader.read_exact(&mut value)?;

			self.handle_item(&key, item_flags, value, data, options)?;
		}

		Ok(true)
	}

	fn write_zone(
		&mut self,
		data: &TagData,
		_zone_name: &str,
		_options: WriteOptions,
	) -> Result<Vec<u8>> {
		let mut items = Vec::new();
		let mut item_count = 0u32;

		for (key, field) in KEY_MAP {
			let value = match field {
				TagField::TrackNumber => pair(data, TagField::TrackNumber, TagField::TrackTotal),
				TagField::DiscNumber => pair(data, TagField::DiscNumber, TagField::DiscTotal),
				_ => data.get(field).filter(|v| !v.is_empty()).map(str::to_owned),
			};

			if let Some(value) = value {
				push_item(&mut items, key, value.as_bytes(), 0)?;
				item_count += 1;
			}
		}

		for field in data.additional_fields() {
			if field.tag_type() != TagType::Ape || field.value().is_empty() {
				continue;
			}

			push_item(&mut items, field.native_code(), field.value().as_bytes(), 0)?;
			item_count += 1;
		}

		for picture in data.pictures() {
			let key = picture
				.pic_type()
				.as_ape_key()
				.unwrap_or("Cover Art (Other)");

			let mut value = picture.description().as_bytes().to_vec();
			value.push(0);
			value.extend_from_slice(picture.data());

			push_item(&mut items, key, &value, ITEM_FLAG_BINARY)?;
			item_count += 1;
		}

		if item_count == 0 {
			return Ok(Vec::new());
		}

		let tag_size = items.len() as u32 + BLOCK_SIZE as u32;

		let mut out = Vec::with_capacity(items.len() + 2 * BLOCK_SIZE as usize);
		write_block(
			&mut out,
			tag_size,
			item_count,
			FLAG_HAS_HEADER | FLAG_IS_HEADER,
		)?;
		out.extend_from_slice(&items);
		write_block(&mut out, tag_size, item_count, FLAG_HAS_HEADER)?;

		Ok(out)
	}

	fn validate(&self, data: &TagData) -> Result<()> {
		for field in data.additional_fields() {
			if field.tag_type() != TagType::Ape {
				continue;
			}

			let key = field.native_code();
			if !(2..=255).contains(&key.len())
				|| !key.bytes().all(|b| (0x20..=0x7E).contains(&b))
			{
				validation_err!(@BAIL Ape, "Item keys must be 2 to 255 printable ASCII characters");
			}

			if INVALID_KEYS.contains(&key.to_uppercase().as_str()) {
				validation_err!(@BAIL Ape, "Item key is reserved");
			}
		}

		Ok(())
	}

	fn default_anchor(&self) -> ZoneAnchor {
		self.anchor
	}

	fn map_native_code(&self, code: &str) -> Option<TagField> {
		KEY_MAP
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(code))
			.map(|(_, field)| *field)
	}
}

impl ApeCodec {
	fn handle_item(
		&mut self,
		key: &str,
		flags: u32,
		value: Vec<u8>,
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<()> {
		if INVALID_KEYS.contains(&key.to_uppercase().as_str()) {
			if options.parsing_mode == ParsingMode::Strict {
				parse_err!(@BAIL Ape, "Item key is reserved");
			}
			log::warn!("APE: skipping item with reserved key {key:?}");
			return Ok(());
		}

		let binary = flags & ITEM_FLAG_BINARY != 0;

		if binary {
			if key.to_ascii_lowercase().starts_with("cover art") {
				if !options.read_pictures || value.is_empty() {
					return Ok(());
				}

				// Binary value: a null-terminated filename, then the image itself
				let split = value.iter().position(|&b| b == 0).unwrap_or(0);
				let description = latin1_decode(&value[..split]);
				let image = value[(split + 1).min(value.len())..].to_vec();
				let mime = MimeType::from_data(&image);

				data.add_picture(
					Picture::new(PictureType::from_ape_key(key), description, image)
						.with_mime_type(mime),
				);
				return Ok(());
			}

			if options.read_additional_fields {
				let mut field =
					AdditionalField::new(TagType::Ape, key, latin1_decode(&value));
				field.zone = Some(ZONE.to_owned());
				data.add_additional_field(field);
			}
			return Ok(());
		}

		let text = utf8_decode(value)?;
		let text = text.trim_end_matches('\0');

		match self.map_native_code(key) {
			Some(TagField::TrackNumber) => set_pair(data, text, TagField::TrackNumber, TagField::TrackTotal),
			Some(TagField::DiscNumber) => set_pair(data, text, TagField::DiscNumber, TagField::DiscTotal),
			Some(field) => data.set(field, text),
			None => {
				if options.read_additional_fields {
					let mut field = AdditionalField::new(TagType::Ape, key, text);
					field.zone = Some(ZONE.to_owned());
					data.add_additional_field(field);
				}
			},
		}

		Ok(())
	}
}

fn set_pair(data: &mut TagData, text: &str, number: TagField, total: TagField) {
	match text.split_once('/') {
		Some((n, t)) => {
			if !n.is_empty() {
				data.set(number, n);
			}
			if !t.is_empty() {
				data.set(total, t);
			}
		},
		None => data.set(number, text),
	}
}

fn pair(data: &TagData, number: TagField, total: TagField) -> Option<String> {
	let number = data.get(number).filter(|v| !v.is_empty());
	let total = data.get(total).filter(|v| !v.is_empty());

	match (number, total) {
		(Some(n), Some(t)) => Some(format!("{n}/{t}")),
		(Some(n), None) => Some(n.to_owned()),
		(None, Some(t)) => Some(format!("0/{t}")),
		(None, None) => None,
	}
}

fn push_item(out: &mut Vec<u8>, key: &str, value: &[u8], flags: u32) -> Result<()> {
	out.write_u32::<LittleEndian>(value.len() as u32)?;
	out.write_u32::<LittleEndian>(flags)?;
	out.extend_from_slice(key.as_bytes());
	out.push(0);
	out.extend_from_slice(value);
	Ok(())
}

fn write_block(out: &mut Vec<u8>, tag_size: u32, item_count: u32, flags: u32) -> Result<()> {
	out.extend_from_slice(&PREAMBLE);
	out.write_u32::<LittleEndian>(VERSION)?;
	out.write_u32::<LittleEndian>(tag_size)?;
	out.write_u32::<LittleEndian>(item_count)?;
	out.write_u32::<LittleEndian>(flags)?;
	out.extend_from_slice(&[0u8; 8]);
	Ok(())
}
