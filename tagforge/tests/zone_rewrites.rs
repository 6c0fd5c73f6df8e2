//! End-to-end rewrite scenarios across coexisting tags and zones

use tagforge::config::{ParseOptions, WriteOptions};
use tagforge::file::TaggedFile;
use tagforge::formats::{DummyCodec, RiffCodec};
use tagforge::tag::{Picture, PictureType, TagData, TagField, TagType};

use std::io::Cursor;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

fn wav() -> Vec<u8> {
	let mut out = b"RIFF".to_vec();
	out.write_u32::<LittleEndian>(0).unwrap();
	out.extend_from_slice(b"WAVE");
	out.extend_from_slice(b"fmt ");
	out.write_u32::<LittleEndian>(16).unwrap();
	out.extend_from_slice(&[0u8; 16]);
	out.extend_from_slice(b"data");
	out.write_u32::<LittleEndian>(100).unwrap();
	out.extend_from_slice(&[0x42u8; 100]);
	let riff_size = out.len() as u32 - 8;
	LittleEndian::write_u32(&mut out[4..8], riff_size);
	out
}

#[test_log::test]
fn repeated_identical_saves_are_byte_identical() {
	let mut file = Cursor::new(wav());
	let mut tagged = TaggedFile::new(RiffCodec::default());

	let mut data = TagData::new();
	data.set(TagField::Title, "Stable");
	data.set(TagField::Genre, "Field Recording");

	tagged
		.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
		.unwrap();
	let first = file.get_ref().clone();

	tagged
		.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
		.unwrap();
	assert_eq!(*file.get_ref(), first);

	// An effectively empty change set also rewrites to the same bytes
	tagged
		.save_tag_to(
			&mut file,
			TagType::Native,
			&TagData::new(),
			WriteOptions::new(),
		)
		.unwrap();
	assert_eq!(*file.get_ref(), first);
}

#[test_log::test]
fn resizing_an_early_zone_keeps_a_later_chunk_intact() {
	let mut file = Cursor::new(wav());
	let mut tagged = TaggedFile::new(RiffCodec::default());

	// First the hosted ID3v2 chunk, appended at the container's end
	let mut hosted = TagData::new();
	hosted.set(TagField::Artist, "Host Artist");
	tagged
		.save_tag_to(&mut file, TagType::Id3v2, &hosted, WriteOptions::new())
		.unwrap();

	// Then an INFO list; depending on insertion order it lands after the id3 chunk,
	// and growing it repeatedly must never corrupt the neighbor
	for title in ["a", "a much longer title than before", "short again"] {
		let mut info = TagData::new();
		info.set(TagField::Title, title);
		tagged
			.save_tag_to(&mut file, TagType::Native, &info, WriteOptions::new())
			.unwrap();

		tagged.read_from(&mut file, ParseOptions::new()).unwrap();
		assert_eq!(tagged.native().data().get(TagField::Title), Some(title));
		assert_eq!(
			tagged.id3v2().data().get(TagField::Artist),
			Some("Host Artist")
		);

		let bytes = file.get_ref();
		assert_eq!(
			LittleEndian::read_u32(&bytes[4..8]) as usize,
			bytes.len() - 8
		);
	}
}

#[test_log::test]
fn merge_preserves_untouched_fields_and_honors_deletions() {
	let mut file = Cursor::new(wav());
	let mut tagged = TaggedFile::new(RiffCodec::default());

	let mut initial = TagData::new();
	initial.set(TagField::Title, "Keep Me Around");
	initial.set(TagField::Artist, "Replace Me");
	initial.set(TagField::Comment, "Delete Me");
	tagged
		.save_tag_to(&mut file, TagType::Native, &initial, WriteOptions::new())
		.unwrap();

	let mut changes = TagData::new();
	changes.set(TagField::Artist, "Replaced");
	changes.mark_field_for_deletion(TagField::Comment);
	tagged
		.save_tag_to(&mut file, TagType::Native, &changes, WriteOptions::new())
		.unwrap();

	tagged.read_from(&mut file, ParseOptions::new()).unwrap();
	let data = tagged.native().data();
	assert_eq!(data.get(TagField::Title), Some("Keep Me Around"));
	assert_eq!(data.get(TagField::Artist), Some("Replaced"));
	assert_eq!(data.get(TagField::Comment), None);
}

#[test_log::test]
fn picture_deletion_by_marker_leaves_the_rest() {
	let audio = vec![0x0Fu8; 64];
	let mut file = Cursor::new(audio);
	let mut tagged = TaggedFile::new(DummyCodec);

	let front = Picture::new(PictureType::CoverFront, "front", vec![1, 2, 3]);
	let back = Picture::new(PictureType::CoverBack, "back", vec![4, 5, 6]);

	let mut initial = TagData::new();
	initial.add_picture(front.clone());
	initial.add_picture(back);
	tagged
		.save_tag_to(&mut file, TagType::Id3v2, &initial, WriteOptions::new())
		.unwrap();

	let mut doomed = front.with_position(1);
	doomed.mark_for_deletion();
	let mut changes = TagData::new();
	changes.add_picture(doomed);
	tagged
		.save_tag_to(&mut file, TagType::Id3v2, &changes, WriteOptions::new())
		.unwrap();

	tagged.read_from(&mut file, ParseOptions::new()).unwrap();
	let pictures = tagged.id3v2().data().pictures();
	assert_eq!(pictures.len(), 1);
	assert_eq!(pictures[0].pic_type(), PictureType::CoverBack);
	assert_eq!(pictures[0].data(), &[4, 5, 6]);
}

#[test_log::test]
fn year_only_and_full_date_round_trip_via_the_composite_field() {
	let mut file = Cursor::new(wav());
	let mut tagged = TaggedFile::new(RiffCodec::default());

	let mut data = TagData::new();
	data.set(TagField::RecordingDateOrYear, "2003");
	tagged
		.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
		.unwrap();

	tagged.read_from(&mut file, ParseOptions::new()).unwrap();
	assert_eq!(
		tagged.native().data().get(TagField::RecordingYear),
		Some("2003")
	);
	assert_eq!(tagged.native().data().get(TagField::RecordingDate), None);

	let mut data = TagData::new();
	data.set(TagField::RecordingDateOrYear, "2003-11-30");
	tagged
		.save_tag_to(&mut file, TagType::Native, &data, WriteOptions::new())
		.unwrap();

	tagged.read_from(&mut file, ParseOptions::new()).unwrap();
	assert_eq!(
		tagged.native().data().get(TagField::RecordingDate),
		Some("2003-11-30")
	);
}
