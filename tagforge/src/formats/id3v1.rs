//! ID3v1 support
//!
//! ID3v1 is a fixed 128-byte block at the very end of the file, marked "TAG". All text
//! is Latin-1 in fixed-size slots. The v1.1 layout steals the last two comment bytes
//! for a track number (a null at comment byte 28 followed by a non-zero byte).

use crate::config::{ParseOptions, WriteOptions};
use crate::engine::{TagCodec, ZoneAnchor};
use crate::error::Result;
use crate::structure::{FileStructure, Zone};
use crate::tag::{TagData, TagField, TagType};
use crate::util::text::{latin1_decode, latin1_encode};

use std::io::{Read, Seek, SeekFrom};

pub(crate) const TAG_SIZE: u64 = 128;
const MARKER: [u8; 3] = *b"TAG";
const ZONE: &str = "id3v1";

/// The standard genre list, indexed by the genre byte
pub static GENRES: [&str; 80] = [
	"Blues",
	"Classic Rock",
	"Country",
	"Dance",
	"Disco",
	"Funk",
	"Grunge",
	"Hip-Hop",
	"Jazz",
	"Metal",
	"New Age",
	"Oldies",
	"Other",
	"Pop",
	"R&B",
	"Rap",
	"Reggae",
	"Rock",
	"Techno",
	"Industrial",
	"Alternative",
	"Ska",
	"Death Metal",
	"Pranks",
	"Soundtrack",
	"Euro-Techno",
	"Ambient",
	"Trip-Hop",
	"Vocal",
	"Jazz+Funk",
	"Fusion",
	"Trance",
	"Classical",
	"Instrumental",
	"Acid",
	"House",
	"Game",
	"Sound Clip",
	"Gospel",
	"Noise",
	"AlternRock",
	"Bass",
	"Soul",
	"Punk",
	"Space",
	"Meditative",
	"Instrumental Pop",
	"Instrumental Rock",
	"Ethnic",
	"Gothic",
	"Darkwave",
	"Techno-Industrial",
	"Electronic",
	"Pop-Folk",
	"Eurodance",
	"Dream",
	"Southern Rock",
	"Comedy",
	"Cult",
	"Gangsta",
	"Top 40",
	"Christian Rap",
	"Pop/Funk",
	"Jungle",
	"Native American",
	"Cabaret",
	"New Wave",
	"Psychadelic",
	"Rave",
	"Showtunes",
	"Trailer",
	"Lo-Fi",
	"Tribal",
	"Acid Punk",
	"Acid Jazz",
	"Polka",
	"Retro",
	"Musical",
	"Rock & Roll",
	"Hard Rock",
];

/// Codec for the fixed 128-byte ID3v1 trailer
#[derive(Default)]
pub struct Id3v1Codec;

impl TagCodec for Id3v1Codec {
	const DEFAULT_ZONE: &'static str = ZONE;
	const TAG_TYPE: TagType = TagType::Id3v1;

	fn read<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		structure: &mut FileStructure,
		data: &mut TagData,
		_options: ParseOptions,
	) -> Result<bool> {
		// Self-locating: the tag lives in the last 128 bytes regardless of the
		// caller's stream position
		let file_len = reader.seek(SeekFrom::End(0))?;
		if file_len < TAG_SIZE {
			return Ok(false);
		}

		let offset = reader.seek(SeekFrom::End(-(TAG_SIZE as i64)))?;

		let mut block = [0u8; TAG_SIZE as usize];
		reader.read_exact(&mut block)?;

		if block[..3] != MARKER {
			return Ok(false);
		}

		structure.add_zone(Zone::new(ZONE, offset, TAG_SIZE, Vec::new()));

		set_slot(data, TagField::Title, &block[3..33]);
		set_slot(data, TagField::Artist, &block[33..63]);
		set_slot(data, TagField::Album, &block[63..93]);
		set_slot(data, TagField::RecordingYear, &block[93..97]);

		// v1.1: a null at comment byte 28 followed by a non-zero track number
		if block[125] == 0 && block[126] != 0 {
			set_slot(data, TagField::Comment, &block[97..125]);
			data.set(TagField::TrackNumber, block[126].to_string());
		} else {
			set_slot(data, TagField::Comment, &block[97..127]);
		}

		if let Some(genre) = GENRES.get(usize::from(block[127])) {
			data.set(TagField::Genre, *genre);
		}

		Ok(true)
	}

	fn write_zone(
		&mut self,
		data: &TagData,
		_zone_name: &str,
		_options: WriteOptions,
	) -> Result<Vec<u8>> {
		if data.is_empty() {
			return Ok(Vec::new());
		}

		let mut block = vec![0u8; TAG_SIZE as usize];
		block[..3].copy_from_slice(&MARKER);

		fill_slot(&mut block[3..33], data.get(TagField::Title), "title");
		fill_slot(&mut block[33..63], data.get(TagField::Artist), "artist");
		fill_slot(&mut block[63..93], data.get(TagField::Album), "album");
		fill_slot(&mut block[93..97], data.get(TagField::RecordingYear), "year");

		let track = data
			.get(TagField::TrackNumber)
			.and_then(|t| t.parse::<u8>().ok())
			.filter(|&t| t != 0);

		match track {
			Some(track) => {
				fill_slot(&mut block[97..125], data.get(TagField::Comment), "comment");
				block[125] = 0;
				block[126] = track;
			},
			None => fill_slot(&mut block[97..127], data.get(TagField::Comment), "comment"),
		}

		block[127] = match data.get(TagField::Genre) {
			Some(genre) => GENRES
				.iter()
				.position(|g| g.eq_ignore_ascii_case(genre))
				.map_or(255, |i| i as u8),
			None => 255,
		};

		Ok(block)
	}

	fn default_anchor(&self) -> ZoneAnchor {
		ZoneAnchor::EndOfFile
	}
}

fn set_slot(data: &mut TagData, field: TagField, slot: &[u8]) {
	let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
	if end == 0 {
		return;
	}

	let text = latin1_decode(&slot[..end]);
	let trimmed = text.trim_end();
	if !trimmed.is_empty() {
		data.set(field, trimmed);
	}
}

fn fill_slot(slot: &mut [u8], value: Option<&str>, what: &str) {
	let Some(value) = value else { return };

	let encoded = latin1_encode(value);
	if encoded.len() > slot.len() {
		// Soft restriction: truncate rather than fail the write
		log::warn!(
			"ID3v1: {what} longer than {} bytes, truncating",
			slot.len()
		);
	}

	let len = encoded.len().min(slot.len());
	slot[..len].copy_from_slice(&encoded[..len]);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::TagEngine;

	use std::io::Cursor;

	fn audio() -> Vec<u8> {
		vec![0xAA; 512]
	}

	fn tagged(audio: &[u8]) -> Vec<u8> {
		let mut codec = Id3v1Codec::default();
		let mut data = TagData::new();
		data.set(TagField::Title, "Some Title");
		data.set(TagField::Artist, "Some Artist");
		data.set(TagField::RecordingYear, "1999");
		data.set(TagField::TrackNumber, "7");
		data.set(TagField::Genre, "Darkwave");

		let block = codec
			.write_zone(&data, ZONE, WriteOptions::new())
			.unwrap();
		assert_eq!(block.len(), 128);

		let mut file = audio.to_vec();
		file.extend_from_slice(&block);
		file
	}

	#[test_log::test]
	fn read_round_trips_v1_1_fields() {
		let mut engine = TagEngine::new(Id3v1Codec::default());
		let mut file = Cursor::new(tagged(&audio()));

		assert!(engine.read_from(&mut file, ParseOptions::new()).unwrap());
		let data = engine.data();
		assert_eq!(data.get(TagField::Title), Some("Some Title"));
		assert_eq!(data.get(TagField::Artist), Some("Some Artist"));
		assert_eq!(data.get(TagField::RecordingYear), Some("1999"));
		assert_eq!(data.get(TagField::TrackNumber), Some("7"));
		assert_eq!(data.get(TagField::Genre), Some("Darkwave"));
		assert_eq!(engine.offset(), 512);
		assert_eq!(engine.size(), 128);
	}

	#[test_log::test]
	fn save_appends_to_an_untagged_file() {
		let mut engine = TagEngine::new(Id3v1Codec::default());
		let mut file = Cursor::new(audio());

		let mut data = TagData::new();
		data.set(TagField::Title, "Test !!");
		engine
			.save_to(&mut file, &data, None, WriteOptions::new())
			.unwrap();

		let bytes = file.into_inner();
		assert_eq!(bytes.len(), 512 + 128);
		assert_eq!(&bytes[..512], &audio()[..]);
		assert_eq!(&bytes[512..515], b"TAG");
		assert_eq!(&bytes[515..522], b"Test !!");
	}

	#[test_log::test]
	fn remove_restores_the_original_bytes() {
		let mut engine = TagEngine::new(Id3v1Codec::default());
		let mut file = Cursor::new(tagged(&audio()));

		engine.remove_from(&mut file, None).unwrap();
		assert_eq!(file.into_inner(), audio());
		assert!(!engine.exists());
	}

	#[test_log::test]
	fn oversized_title_is_truncated_not_rejected() {
		let mut codec = Id3v1Codec::default();
		let mut data = TagData::new();
		data.set(TagField::Title, "X".repeat(40));

		let block = codec
			.write_zone(&data, ZONE, WriteOptions::new())
			.unwrap();
		assert_eq!(&block[3..33], "X".repeat(30).as_bytes());
		assert_eq!(block[33], 0);
	}

	#[test_log::test]
	fn unknown_genre_writes_255() {
		let mut codec = Id3v1Codec::default();
		let mut data = TagData::new();
		data.set(TagField::Title, "t");
		data.set(TagField::Genre, "Vaporwave Revival");

		let block = codec
			.write_zone(&data, ZONE, WriteOptions::new())
			.unwrap();
		assert_eq!(block[127], 255);
	}
}
