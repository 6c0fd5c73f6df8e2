//! ID3v2 support
//!
//! Reads ID3v2.3 and ID3v2.4 tags and always writes ID3v2.4. The tag lives wherever the
//! stream is positioned when [`TagCodec::read`] is called: at the start of the file for
//! standalone tags, or inside a host container's chunk for embedded ones.

use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::engine::{TagCodec, ZoneAnchor};
use crate::error::Result;
use crate::macros::{parse_err, try_vec, validation_err};
use crate::structure::{FileStructure, Zone};
use crate::tag::{
	AdditionalField, Chapter, Lyrics, MimeType, Picture, PictureType, SyncedPhrase, TagData,
	TagField, TagType,
};
use crate::util::text::{
	TextEncoding, decode_text, encode_text, latin1_decode, latin1_encode, split_terminated,
	trim_end_nulls,
};

use std::io::{Read, Seek};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

const ZONE: &str = "id3v2";

// Tag header flags
const FLAG_UNSYNCHRONISATION: u8 = 0x80;
const FLAG_EXTENDED_HEADER: u8 = 0x40;
const FLAG_FOOTER: u8 = 0x10;

// Frame format flags (v2.4)
const FRAME_FLAG_UNSYNCHRONISED: u16 = 0x0002;
const FRAME_FLAG_DATA_LENGTH: u16 = 0x0001;

// Simple text frames; doubles as the fixed serialization order
const TEXT_FRAMES: [(&str, TagField); 14] = [
	("TIT2", TagField::Title),
	("TPE1", TagField::Artist),
	("TPE2", TagField::AlbumArtist),
	("TPE3", TagField::Conductor),
	("TALB", TagField::Album),
	("TCOM", TagField::Composer),
	("TEXT", TagField::Lyricist),
	("TPUB", TagField::Publisher),
	("TCOP", TagField::Copyright),
	("TENC", TagField::EncodedBy),
	("TLAN", TagField::Language),
	("TOPE", TagField::OriginalArtist),
	("TOAL", TagField::OriginalAlbum),
	("TBPM", TagField::Bpm),
];

/// Codec for ID3v2.3/ID3v2.4 tags, standalone or hosted inside a container chunk
#[derive(Default)]
pub struct Id3v2Codec;

impl TagCodec for Id3v2Codec {
	const DEFAULT_ZONE: &'static str = ZONE;
	const EMBEDDABLE: bool = true;
	const TAG_TYPE: TagType = TagType::Id3v2;

	fn read<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		structure: &mut FileStructure,
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<bool> {
		let mut offset = reader.stream_position()?;

		let mut header = [0u8; 10];
		if reader.read_exact(&mut header).is_err() {
			return Ok(false);
		}

		if header[..3] != *b"ID3" {
			if options.parsing_mode == ParsingMode::Strict || options.max_junk_bytes == 0 {
				return Ok(false);
			}

			// Some writers leave garbage before the tag; scan forward a bounded
			// distance for the marker
			let Some(marker_offset) = scan_for_marker(reader, offset, options.max_junk_bytes)?
			else {
				return Ok(false);
			};

			log::warn!(
				"ID3v2: skipping {} junk bytes before the tag header",
				marker_offset - offset
			);

			offset = marker_offset;
			reader.seek(std::io::SeekFrom::Start(offset))?;
			reader.read_exact(&mut header)?;
		}

		let version = header[3];
		let flags = header[5];
		let tag_size = u64::from(decode_synchsafe(&header[6..10]));

		let full_size = 10
			+ tag_size
			+ if flags & FLAG_FOOTER == FLAG_FOOTER {
				10
			} else {
				0
			};
		structure.add_zone(Zone::new(ZONE, offset, full_size, Vec::new()));

		if !(3..=4).contains(&version) {
			if options.parsing_mode == ParsingMode::Strict {
				parse_err!(@BAIL Id3v2, "Unsupported ID3v2 revision");
			}

			// The zone stays registered so a write can replace the tag wholesale
			log::warn!("ID3v2: unsupported revision 2.{version}, content not read");
			return Ok(true);
		}

		let mut body = try_vec![0; tag_size as usize];
		reader.read_exact(&mut body)?;

		if flags & FLAG_UNSYNCHRONISATION == FLAG_UNSYNCHRONISATION {
			body = deunsynchronize(&body);
		}

		let mut pos = 0usize;
		if flags & FLAG_EXTENDED_HEADER == FLAG_EXTENDED_HEADER && body.len() >= 4 {
			let ext_size = if version == 4 {
				// v2.4 extended header size counts itself
				decode_synchsafe(&body[..4]) as usize
			} else {
				BigEndian::read_u32(&body[..4]) as usize + 4
			};
			pos = ext_size.min(body.len());
		}

		while pos + 10 <= body.len() {
			if body[pos] == 0 {
				// Padding
				break;
			}

			let Ok(id) = std::str::from_utf8(&body[pos..pos + 4]) else {
				if options.parsing_mode == ParsingMode::Strict {
					parse_err!(@BAIL Id3v2, "Invalid frame ID");
				}
				log::warn!("ID3v2: invalid frame ID, stopping at offset {pos}");
				break;
			};
			let id = id.to_owned();

			let frame_size = if version == 4 {
				decode_synchsafe(&body[pos + 4..pos + 8]) as usize
			} else {
				BigEndian::read_u32(&body[pos + 4..pos + 8]) as usize
			};
			let frame_flags = BigEndian::read_u16(&body[pos + 8..pos + 10]);
			pos += 10;

			if pos + frame_size > body.len() {
				if options.parsing_mode == ParsingMode::Strict {
					parse_err!(@BAIL Id3v2, "Frame size exceeds the tag");
				}
				log::warn!("ID3v2: frame {id} runs past the tag, stopping");
				break;
			}

			let mut payload = body[pos..pos + frame_size].to_vec();
			pos += frame_size;

			if version == 4 && frame_flags & FRAME_FLAG_UNSYNCHRONISED != 0 {
				payload = deunsynchronize(&payload);
			}
			if frame_flags & FRAME_FLAG_DATA_LENGTH != 0 && payload.len() >= 4 {
				payload.drain(..4);
			}

			if payload.is_empty() {
				continue;
			}

			self.handle_frame(&id, &payload, data, options)?;
		}

		Ok(true)
	}

	fn write_zone(
		&mut self,
		data: &TagData,
		_zone_name: &str,
		_options: WriteOptions,
	) -> Result<Vec<u8>> {
		let mut frames = Vec::new();

		for (id, field) in TEXT_FRAMES {
			if let Some(value) = data.get(field).filter(|v| !v.is_empty()) {
				push_text_frame(&mut frames, id, value)?;
			}
		}

		if let Some(track) = pair_value(data, TagField::TrackNumber, TagField::TrackTotal) {
			push_text_frame(&mut frames, "TRCK", &track)?;
		}
		if let Some(disc) = pair_value(data, TagField::DiscNumber, TagField::DiscTotal) {
			push_text_frame(&mut frames, "TPOS", &disc)?;
		}
		if let Some(genre) = data.get(TagField::Genre).filter(|v| !v.is_empty()) {
			push_text_frame(&mut frames, "TCON", genre)?;
		}
		if let Some(date) = data.get(TagField::RecordingDateOrYear) {
			if !date.is_empty() {
				push_text_frame(&mut frames, "TDRC", date)?;
			}
		}

		if let Some(comment) = data.get(TagField::Comment).filter(|v| !v.is_empty()) {
			push_comment_frame(&mut frames, "eng", "", comment)?;
		}
		if let Some(rating) = data
			.get(TagField::Rating)
			.and_then(|r| r.parse::<u8>().ok())
		{
			// POPM with an anonymous user and no play counter
			let mut payload = vec![0u8];
			payload.push(rating);
			push_frame(&mut frames, "POPM", &payload)?;
		}

		for field in data.additional_fields() {
			if field.tag_type() != TagType::Id3v2 || field.value().is_empty() {
				continue;
			}

			let code = field.native_code();
			if let Some(description) = code.strip_prefix("TXXX:") {
				let mut payload = vec![TextEncoding::UTF8 as u8];
				payload.extend_from_slice(&encode_text(description, TextEncoding::UTF8, true));
				payload.extend_from_slice(&encode_text(field.value(), TextEncoding::UTF8, false));
				push_frame(&mut frames, "TXXX", &payload)?;
			} else if let Some(description) = code.strip_prefix("COMM:") {
				let language = if field.language().is_empty() {
					"eng"
				} else {
					field.language()
				};
				push_comment_frame(&mut frames, language, description, field.value())?;
			} else if code.starts_with('T') {
				push_text_frame(&mut frames, code, field.value())?;
			} else {
				// Unknown non-text frames round-trip byte-for-byte through
				// Latin-1 storage
				push_frame(&mut frames, code, &latin1_encode(field.value()))?;
			}
		}

		for picture in data.pictures() {
			let mut payload = vec![TextEncoding::UTF8 as u8];
			payload.extend_from_slice(picture.mime_type().as_str().as_bytes());
			payload.push(0);
			payload.push(picture.pic_type().as_u8());
			payload.extend_from_slice(&encode_text(
				picture.description(),
				TextEncoding::UTF8,
				true,
			));
			payload.extend_from_slice(picture.data());
			push_frame(&mut frames, "APIC", &payload)?;
		}

		for block in data.lyrics().unwrap_or_default() {
			let language = normalize_language(&block.language);

			if !block.unsynchronized.is_empty() {
				let mut payload = vec![TextEncoding::UTF8 as u8];
				payload.extend_from_slice(&language);
				payload.extend_from_slice(&encode_text(
					&block.description,
					TextEncoding::UTF8,
					true,
				));
				payload.extend_from_slice(&encode_text(
					&block.unsynchronized,
					TextEncoding::UTF8,
					false,
				));
				push_frame(&mut frames, "USLT", &payload)?;
			}

			if !block.synchronized.is_empty() {
				let mut payload = vec![TextEncoding::UTF8 as u8];
				payload.extend_from_slice(&language);
				payload.push(2); // millisecond timestamps
				payload.push(1); // content type: lyrics
				payload.extend_from_slice(&encode_text(
					&block.description,
					TextEncoding::UTF8,
					true,
				));
				for phrase in &block.synchronized {
					payload.extend_from_slice(&encode_text(
						&phrase.text,
						TextEncoding::UTF8,
						true,
					));
					payload.write_u32::<BigEndian>(phrase.timestamp_ms)?;
				}
				push_frame(&mut frames, "SYLT", &payload)?;
			}
		}

		for (index, chapter) in data.chapters().unwrap_or_default().iter().enumerate() {
			let element_id = if chapter.unique_id.is_empty() {
				format!("chp{index}")
			} else {
				chapter.unique_id.clone()
			};

			let mut payload = latin1_encode(&element_id);
			payload.push(0);
			payload.write_u32::<BigEndian>(chapter.start_ms)?;
			payload.write_u32::<BigEndian>(chapter.end_ms)?;
			// Byte offsets unused, timestamps are authoritative
			payload.extend_from_slice(&[0xFF; 8]);

			if !chapter.title.is_empty() {
				let mut title = vec![TextEncoding::UTF8 as u8];
				title.extend_from_slice(chapter.title.as_bytes());
				write_frame_header(&mut payload, "TIT2", title.len() as u32)?;
				payload.extend_from_slice(&title);
			}

			push_frame(&mut frames, "CHAP", &payload)?;
		}

		if frames.is_empty() {
			return Ok(Vec::new());
		}

		let mut tag = Vec::with_capacity(10 + frames.len());
		tag.extend_from_slice(b"ID3\x04\x00\x00");
		tag.write_u32::<BigEndian>(encode_synchsafe(frames.len() as u32)?)?;
		tag.extend_from_slice(&frames);
		Ok(tag)
	}

	fn validate(&self, data: &TagData) -> Result<()> {
		for field in data.additional_fields() {
			if field.tag_type() != TagType::Id3v2 {
				continue;
			}

			let code = field.native_code();
			if code.starts_with("TXXX:") || code.starts_with("COMM:") {
				continue;
			}

			if code.len() != 4
				|| !code
					.bytes()
					.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
			{
				validation_err!(@BAIL Id3v2, "Frame IDs must be exactly 4 uppercase ASCII characters");
			}
		}

		Ok(())
	}

	fn default_anchor(&self) -> ZoneAnchor {
		ZoneAnchor::BeginningOfFile
	}

	fn map_native_code(&self, code: &str) -> Option<TagField> {
		if let Some((_, field)) = TEXT_FRAMES.iter().find(|(id, _)| *id == code) {
			return Some(*field);
		}

		match code {
			"TRCK" => Some(TagField::TrackNumber),
			"TPOS" => Some(TagField::DiscNumber),
			"TCON" => Some(TagField::Genre),
			"TDRC" => Some(TagField::RecordingDateOrYear),
			"TYER" => Some(TagField::RecordingYear),
			"COMM" => Some(TagField::Comment),
			"POPM" => Some(TagField::Rating),
			_ => None,
		}
	}
}

impl Id3v2Codec {
	fn handle_frame(
		&mut self,
		id: &str,
		payload: &[u8],
		data: &mut TagData,
		options: ParseOptions,
	) -> Result<()> {
		match id {
			"TXXX" => {
				if !options.read_additional_fields {
					return Ok(());
				}
				let Some(encoding) = TextEncoding::from_u8(payload[0]) else {
					return skip_malformed(id, options);
				};
				let (raw_desc, consumed) = split_terminated(&payload[1..], encoding);
				let description = decode_text(raw_desc, encoding)?;
				let value = decode_text(&payload[1 + consumed..], encoding)?;

				let mut field = AdditionalField::new(
					TagType::Id3v2,
					format!("TXXX:{description}"),
					trim_end_nulls(&value),
				);
				field.zone = Some(ZONE.to_owned());
				data.add_additional_field(field);
			},
			"COMM" | "USLT" => {
				if payload.len() < 5 {
					return skip_malformed(id, options);
				}
				let Some(encoding) = TextEncoding::from_u8(payload[0]) else {
					return skip_malformed(id, options);
				};
				let language = latin1_decode(&payload[1..4]);
				let (raw_desc, consumed) = split_terminated(&payload[4..], encoding);
				let description = decode_text(raw_desc, encoding)?;
				let text = decode_text(&payload[4 + consumed..], encoding)?;
				let text = trim_end_nulls(&text);

				if id == "USLT" {
					let mut block = Lyrics::new(language);
					block.description = description;
					block.unsynchronized = text.to_owned();
					let mut all = data.lyrics().map(<[Lyrics]>::to_vec).unwrap_or_default();
					all.push(block);
					data.set_lyrics(all);
				} else if description.is_empty() {
					data.set(TagField::Comment, text);
				} else if options.read_additional_fields {
					let mut field = AdditionalField::new(
						TagType::Id3v2,
						format!("COMM:{description}"),
						text,
					)
					.with_language(language);
					field.zone = Some(ZONE.to_owned());
					data.add_additional_field(field);
				}
			},
			"SYLT" => {
				if payload.len() < 7 {
					return skip_malformed(id, options);
				}
				let Some(encoding) = TextEncoding::from_u8(payload[0]) else {
					return skip_malformed(id, options);
				};
				let language = latin1_decode(&payload[1..4]);
				// payload[4] is the timestamp format, payload[5] the content type
				let (raw_desc, consumed) = split_terminated(&payload[6..], encoding);

				let mut block = Lyrics::new(language);
				block.description = decode_text(raw_desc, encoding)?;

				let mut rest = &payload[6 + consumed..];
				while !rest.is_empty() {
					let (raw_text, consumed) = split_terminated(rest, encoding);
					let text = decode_text(raw_text, encoding)?;
					rest = &rest[consumed..];
					if rest.len() < 4 {
						break;
					}
					let timestamp = BigEndian::read_u32(&rest[..4]);
					rest = &rest[4..];
					block.synchronized.push(SyncedPhrase::new(timestamp, text));
				}

				let mut all = data.lyrics().map(<[Lyrics]>::to_vec).unwrap_or_default();
				all.push(block);
				data.set_lyrics(all);
			},
			"APIC" => {
				if !options.read_pictures {
					return Ok(());
				}
				if payload.len() < 4 {
					return skip_malformed(id, options);
				}
				let Some(encoding) = TextEncoding::from_u8(payload[0]) else {
					return skip_malformed(id, options);
				};
				let (raw_mime, consumed) = split_terminated(&payload[1..], TextEncoding::Latin1);
				let mime = latin1_decode(raw_mime);
				let mut pos = 1 + consumed;
				if pos >= payload.len() {
					return skip_malformed(id, options);
				}
				let pic_type = PictureType::from_u8(payload[pos]);
				pos += 1;
				let (raw_desc, consumed) = split_terminated(&payload[pos..], encoding);
				let description = decode_text(raw_desc, encoding)?;
				pos += consumed;

				data.add_picture(
					Picture::new(pic_type, description, payload[pos..].to_vec())
						.with_mime_type(MimeType::from_str(&mime)),
				);
			},
			"CHAP" => {
				let (raw_element, consumed) = split_terminated(payload, TextEncoding::Latin1);
				let element_id = latin1_decode(raw_element);
				let rest = &payload[consumed..];
				if rest.len() < 16 {
					return skip_malformed(id, options);
				}
				let start_ms = BigEndian::read_u32(&rest[..4]);
				let end_ms = BigEndian::read_u32(&rest[4..8]);

				let mut chapter = Chapter::new(element_id, start_ms, end_ms, "");

				// The only embedded subframe carried over is the title
				let mut sub = &rest[16..];
				while sub.len() > 10 {
					let sub_id = &sub[..4];
					let sub_size = decode_synchsafe(&sub[4..8]) as usize;
					if sub.len() < 10 + sub_size {
						break;
					}
					if sub_id == b"TIT2" && sub_size > 1 {
						if let Some(encoding) = TextEncoding::from_u8(sub[10]) {
							let text = decode_text(&sub[11..10 + sub_size], encoding)?;
							chapter.title = trim_end_nulls(&text).to_owned();
						}
					}
					sub = &sub[10 + sub_size..];
				}

				let mut all = data
					.chapters()
					.map(<[Chapter]>::to_vec)
					.unwrap_or_default();
				all.push(chapter);
				data.set_chapters(all);
			},
			"POPM" => {
				let (_, consumed) = split_terminated(payload, TextEncoding::Latin1);
				if let Some(&rating) = payload.get(consumed) {
					data.set(TagField::Rating, rating.to_string());
				}
			},
			_ if id.starts_with('T') => {
				let Some(encoding) = TextEncoding::from_u8(payload[0]) else {
					return skip_malformed(id, options);
				};
				let text = decode_text(&payload[1..], encoding)?;
				let text = trim_end_nulls(&text);
				if text.is_empty() {
					return Ok(());
				}

				match id {
					"TRCK" => set_pair(data, text, TagField::TrackNumber, TagField::TrackTotal),
					"TPOS" => set_pair(data, text, TagField::DiscNumber, TagField::DiscTotal),
					"TCON" => data.set(TagField::Genre, decode_genre(text)),
					"TDRC" => data.set(TagField::RecordingDateOrYear, text),
					"TYER" => data.set(TagField::RecordingYear, text),
					_ => match TEXT_FRAMES.iter().find(|(frame_id, _)| *frame_id == id) {
						Some((_, field)) => data.set(*field, text),
						None => {
							// Unmapped text frame; keep the decoded text itself
							if options.read_additional_fields {
								let mut field =
									AdditionalField::new(TagType::Id3v2, id, text);
								field.zone = Some(ZONE.to_owned());
								data.add_additional_field(field);
							}
						},
					},
				}
			},
			_ => store_unknown(data, id, payload, options),
		}

		Ok(())
	}
}

fn skip_malformed(id: &str, options: ParseOptions) -> Result<()> {
	if options.parsing_mode == ParsingMode::Strict {
		parse_err!(@BAIL Id3v2, "Malformed frame content");
	}

	log::warn!("ID3v2: malformed {id} frame, skipping");
	Ok(())
}

fn store_unknown(data: &mut TagData, id: &str, payload: &[u8], options: ParseOptions) {
	if !options.read_additional_fields {
		return;
	}

	// Latin-1 maps bytes 1:1 onto chars, so arbitrary frame content survives a
	// read/write cycle untouched
	let mut field = AdditionalField::new(TagType::Id3v2, id, latin1_decode(payload));
	field.zone = Some(ZONE.to_owned());
	data.add_additional_field(field);
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

fn pair_value(data: &TagData, number: TagField, total: TagField) -> Option<String> {
	let number = data.get(number).filter(|v| !v.is_empty());
	let total = data.get(total).filter(|v| !v.is_empty());

	match (number, total) {
		(Some(n), Some(t)) => Some(format!("{n}/{t}")),
		(Some(n), None) => Some(n.to_owned()),
		(None, Some(t)) => Some(format!("0/{t}")),
		(None, None) => None,
	}
}

// ID3v2.3 writers often store genres as "(nn)" references into the ID3v1 list
fn decode_genre(text: &str) -> String {
	let index = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
		Some(numeric) => numeric,
		None => text,
	};

	if let Ok(index) = index.parse::<usize>() {
		if let Some(genre) = super::id3v1::GENRES.get(index) {
			return (*genre).to_owned();
		}
	}

	text.to_owned()
}

fn normalize_language(language: &str) -> [u8; 3] {
	let mut out = *b"XXX";
	let encoded = latin1_encode(language);
	if encoded.len() == 3 {
		out.copy_from_slice(&encoded);
	}
	out
}

fn write_frame_header(out: &mut Vec<u8>, id: &str, size: u32) -> Result<()> {
	out.extend_from_slice(id.as_bytes());
	out.write_u32::<BigEndian>(encode_synchsafe(size)?)?;
	out.extend_from_slice(&[0, 0]);
	Ok(())
}

fn push_frame(out: &mut Vec<u8>, id: &str, payload: &[u8]) -> Result<()> {
	write_frame_header(out, id, payload.len() as u32)?;
	out.extend_from_slice(payload);
	Ok(())
}

fn push_text_frame(out: &mut Vec<u8>, id: &str, text: &str) -> Result<()> {
	let mut payload = vec![TextEncoding::UTF8 as u8];
	payload.extend_from_slice(text.as_bytes());
	push_frame(out, id, &payload)
}

fn push_comment_frame(
	out: &mut Vec<u8>,
	language: &str,
	description: &str,
	text: &str,
) -> Result<()> {
	let mut payload = vec![TextEncoding::UTF8 as u8];
	payload.extend_from_slice(&normalize_language(language));
	payload.extend_from_slice(&encode_text(description, TextEncoding::UTF8, true));
	payload.extend_from_slice(&encode_text(text, TextEncoding::UTF8, false));
	push_frame(out, "COMM", &payload)
}

fn scan_for_marker<R: Read + Seek>(
	reader: &mut R,
	start: u64,
	max_junk: usize,
) -> Result<Option<u64>> {
	reader.seek(std::io::SeekFrom::Start(start))?;

	let mut window = Vec::with_capacity(max_junk + 3);
	reader
		.take(max_junk as u64 + 3)
		.read_to_end(&mut window)?;

	Ok(window
		.windows(3)
		.position(|w| w == b"ID3")
		.filter(|&pos| pos > 0 && pos <= max_junk)
		.map(|pos| start + pos as u64))
}

// 7 bits per byte, the high bit of each is always clear
fn decode_synchsafe(bytes: &[u8]) -> u32 {
	let n = BigEndian::read_u32(&bytes[..4]);
	((n & 0x7F00_0000) >> 3) | ((n & 0x7F_0000) >> 2) | ((n & 0x7F00) >> 1) | (n & 0x7F)
}

fn encode_synchsafe(n: u32) -> Result<u32> {
	if n > 0x0FFF_FFFF {
		crate::macros::err!(TooMuchData);
	}

	Ok(((n & 0x0FE0_0000) << 3) | ((n & 0x1F_C000) << 2) | ((n & 0x3F80) << 1) | (n & 0x7F))
}

fn deunsynchronize(data: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(data.len());
	let mut iter = data.iter().copied().peekable();
	while let Some(byte) = iter.next() {
		out.push(byte);
		if byte == 0xFF && iter.peek() == Some(&0) {
			iter.next();
		}
	}
	out
}
